mod client;
mod comments;
mod config;
mod error;
mod export;
mod model;
mod pipeline;
mod progress;
mod record;
mod source;
mod util;

pub use crate::config::{CollectorOptions, CommentMode, Credentials, RetryPolicy};
pub use crate::error::{CollectError, IsRetryable, Result};
pub use crate::pipeline::{CollectSummary, RedditCollector};

// Session and transport surface.
pub use crate::client::{resolve_subreddit, ApiGet, RedditClient, SubredditRef};

// Wire model, exposed for consumers that want to decode payloads directly.
pub use crate::model::{parse_listing, parse_post, ListingData, MoreStub, Post, RawComment, Thing};

// Fetch stages.
pub use crate::comments::CommentTree;
pub use crate::source::{PostSource, PostStream};

// Tabulation & export helpers.
pub use crate::export::{output_file_name, render_string_seq, write_csv, CSV_HEADER};
pub use crate::record::{format_created, local_offset, sort_by_created_desc, PostRecord};

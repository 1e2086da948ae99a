//! Per-post record assembly and the global sort.

use crate::model::Post;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

const CREATED_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// One output row. Built once per post during extraction, never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct PostRecord {
    pub title: String,
    pub score: i64,
    pub id: String,
    pub url: String,
    pub num_comments: u64,
    pub num_top_level: u64,
    pub selftext: String,
    pub created_utc: i64,
    pub created_local: String,
    pub comments_all: Vec<String>,
    pub comments_top_level: Vec<String>,
}

impl PostRecord {
    /// Assemble a record from a post and its two comment views. Views the
    /// mode did not request arrive (and stay) empty, so `num_top_level` is
    /// the length of whatever top-level view was actually collected.
    pub fn assemble(
        post: &Post,
        comments_all: Vec<String>,
        comments_top_level: Vec<String>,
        offset: UtcOffset,
    ) -> Self {
        let created_utc = post.created_epoch();
        Self {
            title: post.title.clone(),
            score: post.score,
            id: post.id.clone(),
            url: post.url.clone(),
            num_comments: post.num_comments,
            num_top_level: comments_top_level.len() as u64,
            selftext: post.selftext.clone(),
            created_utc,
            created_local: format_created(created_utc, offset),
            comments_all,
            comments_top_level,
        }
    }
}

/// Epoch seconds rendered in `offset` as `YYYY-MM-DD HH:MM:SS`. Falls back to
/// the bare epoch number for timestamps outside the representable range.
pub fn format_created(epoch: i64, offset: UtcOffset) -> String {
    match OffsetDateTime::from_unix_timestamp(epoch) {
        Ok(dt) => dt
            .to_offset(offset)
            .format(CREATED_FORMAT)
            .unwrap_or_else(|_| epoch.to_string()),
        Err(_) => epoch.to_string(),
    }
}

/// The machine's local offset, resolved once at pipeline entry; UTC when the
/// platform refuses to disclose it.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// Stable descending sort by creation time; ties keep fetch order.
pub fn sort_by_created_desc(records: &mut [PostRecord]) {
    records.sort_by(|a, b| b.created_utc.cmp(&a.created_utc));
}

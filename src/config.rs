use crate::error::{CollectError, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Which comment views get populated on each record.
///
/// The tree is fetched and expanded once per post regardless of mode; the
/// mode only decides which traversals run afterwards. `All` and `TopLevel`
/// skip the traversal (and output width) of the view they don't need, `Both`
/// pays for both traversals on the same fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentMode {
    All,
    TopLevel,
    Both,
}

impl CommentMode {
    pub fn wants_all(self) -> bool {
        matches!(self, CommentMode::All | CommentMode::Both)
    }
    pub fn wants_top_level(self) -> bool {
        matches!(self, CommentMode::TopLevel | CommentMode::Both)
    }
}

impl FromStr for CommentMode {
    type Err = CollectError;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(CommentMode::All),
            "top" | "top-level" | "top_level" => Ok(CommentMode::TopLevel),
            "both" => Ok(CommentMode::Both),
            other => Err(CollectError::Config(format!(
                "unknown comment mode {other:?} (expected all | top | both)"
            ))),
        }
    }
}

/// Reddit script-app credentials. Loaded from the environment; a `.env` file
/// next to the binary is honored.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let var = |name: &str| {
            std::env::var(name).map_err(|_| CollectError::Config(format!("{name} not set")))
        };
        Ok(Self {
            client_id: var("REDDIT_CLIENT_ID")?,
            client_secret: var("REDDIT_CLIENT_SECRET")?,
            user_agent: var("REDDIT_USER_AGENT")?,
        })
    }
}

/// Bounded-retry tuning for transient API faults.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct CollectorOptions {
    pub subreddit: String,              // normalized: trimmed, no "r/"
    pub limit: Option<u64>,             // None = run to pagination exhaustion
    pub search_keyword: Option<String>, // None/empty = newest-first listing
    pub comment_mode: CommentMode,
    pub progress: bool,
    pub out_dir: PathBuf,
    pub retry: RetryPolicy,
}

impl Default for CollectorOptions {
    fn default() -> Self {
        Self {
            subreddit: String::new(),
            limit: None,
            search_keyword: None,
            comment_mode: CommentMode::TopLevel,
            progress: true,
            out_dir: PathBuf::from("."),
            retry: RetryPolicy::default(),
        }
    }
}

impl CollectorOptions {
    pub fn with_subreddit(mut self, sub: impl AsRef<str>) -> Self {
        let mut s = sub.as_ref().trim().to_string();
        if let Some(rest) = s.strip_prefix("r/") {
            s = rest.to_string();
        }
        self.subreddit = s;
        self
    }
    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }
    /// Empty or whitespace-only keywords select the newest-first listing.
    pub fn with_search_keyword(mut self, keyword: impl AsRef<str>) -> Self {
        let k = keyword.as_ref().trim();
        self.search_keyword = if k.is_empty() { None } else { Some(k.to_string()) };
        self
    }
    pub fn with_comment_mode(mut self, mode: CommentMode) -> Self {
        self.comment_mode = mode;
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_out_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.out_dir = dir.as_ref().to_path_buf();
        self
    }
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

//! The collector pipeline: post source selection, comment extraction,
//! tabulation, and export, sequential in that order.
//!
//! Nothing touches the output file until every fetch has succeeded; a failed
//! run leaves no partial CSV.

use crate::client::{resolve_subreddit, ApiGet};
use crate::comments::CommentTree;
use crate::config::{CollectorOptions, CommentMode, RetryPolicy};
use crate::error::{CollectError, Result};
use crate::export::write_csv;
use crate::progress::make_collect_progress;
use crate::record::{local_offset, sort_by_created_desc, PostRecord};
use crate::source::{PostSource, PostStream};
use crate::util::init_tracing_once;
use std::path::{Path, PathBuf};

/// Builder over [`CollectorOptions`], mirroring the options' `with_*` chain.
#[derive(Clone)]
pub struct RedditCollector {
    opts: CollectorOptions,
}

/// What a finished run produced.
#[derive(Debug)]
pub struct CollectSummary {
    pub total_posts: usize,
    pub out_path: PathBuf,
}

impl RedditCollector {
    pub fn new() -> Self {
        Self { opts: CollectorOptions::default() }
    }

    // -------- Builder methods --------
    pub fn subreddit(mut self, sub: impl AsRef<str>) -> Self { self.opts = self.opts.with_subreddit(sub); self }
    pub fn limit(mut self, limit: Option<u64>) -> Self { self.opts = self.opts.with_limit(limit); self }
    pub fn search_keyword(mut self, keyword: impl AsRef<str>) -> Self { self.opts = self.opts.with_search_keyword(keyword); self }
    pub fn comment_mode(mut self, mode: CommentMode) -> Self { self.opts = self.opts.with_comment_mode(mode); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn out_dir(mut self, dir: impl AsRef<Path>) -> Self { self.opts = self.opts.with_out_dir(dir); self }
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self { self.opts = self.opts.with_retry(retry); self }

    pub fn options(&self) -> &CollectorOptions {
        &self.opts
    }

    /// Fetch posts from the selected source and materialize their comment
    /// views, in fetch order.
    pub fn collect<C: ApiGet>(&self, client: &C) -> Result<Vec<PostRecord>> {
        init_tracing_once();
        if self.opts.subreddit.is_empty() {
            return Err(CollectError::Config("subreddit is required".into()));
        }
        let sub = resolve_subreddit(client, &self.opts.subreddit)?;
        let source = PostSource::from_keyword(self.opts.search_keyword.as_deref());
        tracing::info!(subreddit = %sub.name, ?source, limit = ?self.opts.limit, "collecting posts");

        let offset = local_offset();
        let mode = self.opts.comment_mode;
        let pb = self
            .opts
            .progress
            .then(|| make_collect_progress(self.opts.limit, "Collecting posts"));

        let mut records = Vec::new();
        for post in PostStream::new(client, sub, source, self.opts.limit) {
            let post = post?;
            tracing::debug!(id = %post.id, comments = post.num_comments, "expanding comment tree");
            let tree = CommentTree::fetch(client, &post)?;
            let (all, top) = tree.views(mode);
            records.push(PostRecord::assemble(&post, all, top, offset));
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }
        tracing::info!(total = records.len(), "collection finished");
        Ok(records)
    }

    /// Stable sort by creation time (descending, ties keep fetch order) and
    /// CSV export.
    pub fn export(&self, mut records: Vec<PostRecord>) -> Result<PathBuf> {
        sort_by_created_desc(&mut records);
        write_csv(&records, &self.opts.subreddit, &self.opts.out_dir)
    }

    /// The whole pipeline: collect, sort, export.
    pub fn run<C: ApiGet>(&self, client: &C) -> Result<CollectSummary> {
        let records = self.collect(client)?;
        let total_posts = records.len();
        let out_path = self.export(records)?;
        tracing::info!(total_posts, out = %out_path.display(), "export complete");
        Ok(CollectSummary { total_posts, out_path })
    }
}

impl Default for RedditCollector {
    fn default() -> Self {
        Self::new()
    }
}

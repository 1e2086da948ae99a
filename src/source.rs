//! Post source selection and the lazy page-following post stream.

use crate::client::{ApiGet, SubredditRef};
use crate::error::Result;
use crate::model::{self, Post};
use std::collections::VecDeque;

const PAGE_SIZE: u64 = 100;

/// Where posts come from: the newest-first listing, or keyword search in the
/// client's relevance order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostSource {
    Newest,
    Search { keyword: String },
}

impl PostSource {
    /// An empty or absent keyword selects the newest-first listing.
    pub fn from_keyword(keyword: Option<&str>) -> Self {
        match keyword.map(str::trim) {
            Some(k) if !k.is_empty() => PostSource::Search { keyword: k.to_string() },
            _ => PostSource::Newest,
        }
    }

    fn path(&self, sub: &SubredditRef) -> String {
        match self {
            PostSource::Newest => format!("/r/{}/new", sub.name),
            PostSource::Search { .. } => format!("/r/{}/search", sub.name),
        }
    }

    fn base_query(&self) -> Vec<(&'static str, String)> {
        match self {
            PostSource::Newest => Vec::new(),
            PostSource::Search { keyword } => vec![
                ("q", keyword.clone()),
                ("restrict_sr", "1".to_string()),
                ("sort", "relevance".to_string()),
            ],
        }
    }
}

/// Lazy sequence of posts. Pages are fetched on demand and the `after`
/// cursor followed until the API runs dry or `limit` is reached. Client
/// faults surface through the iterator unchanged and end the stream.
pub struct PostStream<'a, C: ApiGet> {
    client: &'a C,
    sub: SubredditRef,
    source: PostSource,
    buffer: VecDeque<Post>,
    after: Option<String>,
    remaining: Option<u64>,
    exhausted: bool,
}

impl<'a, C: ApiGet> PostStream<'a, C> {
    pub fn new(client: &'a C, sub: SubredditRef, source: PostSource, limit: Option<u64>) -> Self {
        Self {
            client,
            sub,
            source,
            buffer: VecDeque::new(),
            after: None,
            remaining: limit,
            exhausted: false,
        }
    }

    fn fetch_page(&mut self) -> Result<()> {
        let page = self.remaining.map_or(PAGE_SIZE, |r| r.min(PAGE_SIZE));
        let mut query = self.source.base_query();
        query.push(("limit", page.to_string()));
        if let Some(after) = &self.after {
            query.push(("after", after.clone()));
        }

        let payload = self.client.get_json(&self.source.path(&self.sub), &query)?;
        let listing = model::parse_listing(&payload)?;

        let before = self.buffer.len();
        for thing in &listing.children {
            if let Some(post) = model::parse_post(thing) {
                self.buffer.push_back(post);
            }
        }
        self.after = listing.after;
        // An empty page or a missing cursor ends the stream.
        if self.buffer.len() == before || self.after.is_none() {
            self.exhausted = true;
        }
        Ok(())
    }
}

impl<C: ApiGet> Iterator for PostStream<'_, C> {
    type Item = Result<Post>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == Some(0) {
            return None;
        }
        if self.buffer.is_empty() {
            if self.exhausted {
                return None;
            }
            if let Err(e) = self.fetch_page() {
                self.exhausted = true;
                return Some(Err(e));
            }
        }
        let post = self.buffer.pop_front()?;
        if let Some(r) = self.remaining.as_mut() {
            *r -= 1;
        }
        Some(Ok(post))
    }
}

//! One-shot comment tree materialization and the two derived views.
//!
//! Fetching a tree resolves every "load more" placeholder before anything is
//! read out of it, so the views only ever see real comments. Expansion runs
//! once per post; the views are pure traversals over the result.

use crate::client::ApiGet;
use crate::config::CommentMode;
use crate::error::Result;
use crate::model::{self, MoreStub, Post, RawComment, Thing};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};

/// The morechildren endpoint caps each request at 100 ids.
const MORE_CHUNK: usize = 100;

struct Node {
    fullname: String,
    body: String,
}

/// A fully materialized comment tree for one post.
///
/// Stored as a flat arena plus a parent-fullname index rather than a nested
/// structure; order within a parent is listing order, with late-resolved
/// placeholder children appended after the initially listed ones.
pub struct CommentTree {
    link: String, // t3_{post id}
    nodes: Vec<Node>,
    children: HashMap<String, Vec<usize>>,
}

impl CommentTree {
    /// Fetch and fully expand the tree for `post`: one round for the initial
    /// listing plus one per 100 unresolved placeholder ids, to unbounded
    /// depth. This is the dominant network cost of the whole pipeline on
    /// comment-heavy forums.
    pub fn fetch<C: ApiGet>(client: &C, post: &Post) -> Result<Self> {
        let link = post.fullname();
        let mut tree = Self {
            link: link.clone(),
            nodes: Vec::new(),
            children: HashMap::new(),
        };
        let mut pending: VecDeque<String> = VecDeque::new();

        let payload = client.get_json(
            &format!("/comments/{}", post.id),
            &[("limit", "500".to_string())],
        )?;
        // The payload is a two-element array: [post listing, comment listing].
        let comment_listing = payload.get(1).cloned().unwrap_or(Value::Null);
        let listing = model::parse_listing(&comment_listing)?;
        for thing in listing.children {
            tree.absorb(thing, &mut pending)?;
        }

        while let Some(ids) = next_chunk(&mut pending) {
            let query = vec![
                ("api_type", "json".to_string()),
                ("link_id", link.clone()),
                ("children", ids.join(",")),
            ];
            let payload = client.get_json("/api/morechildren", &query)?;
            let things = payload
                .pointer("/json/data/things")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            for raw in things {
                let thing: Thing = serde_json::from_value(raw)?;
                tree.absorb(thing, &mut pending)?;
            }
        }
        Ok(tree)
    }

    fn absorb(&mut self, thing: Thing, pending: &mut VecDeque<String>) -> Result<()> {
        match thing.kind.as_str() {
            "t1" => {
                let raw: RawComment = serde_json::from_value(thing.data)?;
                let fullname = format!("t1_{}", raw.id);
                let parent = if raw.parent_id.is_empty() {
                    self.link.clone()
                } else {
                    raw.parent_id.clone()
                };
                let idx = self.nodes.len();
                self.nodes.push(Node { fullname, body: raw.body });
                self.children.entry(parent).or_default().push(idx);

                if let Value::Object(_) = &raw.replies {
                    let listing = model::parse_listing(&raw.replies)?;
                    for child in listing.children {
                        self.absorb(child, pending)?;
                    }
                }
            }
            "more" => {
                let stub: MoreStub = serde_json::from_value(thing.data)?;
                if stub.children.is_empty() {
                    // Continue-this-thread marker: the listing exposes no
                    // child ids to chase here.
                    tracing::debug!(parent = %stub.parent_id, count = stub.count, "skipping placeholder with no child ids");
                } else {
                    pending.extend(stub.children);
                }
            }
            other => {
                tracing::debug!(kind = other, "ignoring unexpected node kind");
            }
        }
        Ok(())
    }

    /// Every comment body, depth-first in tree order.
    pub fn all_bodies(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.walk(&self.link, &mut out);
        out
    }

    /// Bodies of comments whose parent is the post itself, in listing order.
    pub fn top_level_bodies(&self) -> Vec<String> {
        self.children
            .get(&self.link)
            .map(|kids| kids.iter().map(|&i| self.nodes[i].body.clone()).collect())
            .unwrap_or_default()
    }

    /// The two views, each computed only when `mode` requests it. An
    /// unrequested view is an empty vector, not absent.
    pub fn views(&self, mode: CommentMode) -> (Vec<String>, Vec<String>) {
        let all = if mode.wants_all() { self.all_bodies() } else { Vec::new() };
        let top = if mode.wants_top_level() { self.top_level_bodies() } else { Vec::new() };
        (all, top)
    }

    fn walk(&self, parent: &str, out: &mut Vec<String>) {
        if let Some(kids) = self.children.get(parent) {
            for &i in kids {
                out.push(self.nodes[i].body.clone());
                self.walk(&self.nodes[i].fullname, out);
            }
        }
    }
}

fn next_chunk(pending: &mut VecDeque<String>) -> Option<Vec<String>> {
    if pending.is_empty() {
        return None;
    }
    let take = pending.len().min(MORE_CHUNK);
    Some(pending.drain(..take).collect())
}

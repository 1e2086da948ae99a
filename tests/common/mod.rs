use rcollect::{ApiGet, CollectError, Post};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

type Canned = Result<Value, u16>;

/// Canned API: maps a request path to a FIFO of responses. A path with no
/// queued response fails the calling test loudly; every call is recorded so
/// tests can assert on paths and query parameters.
#[derive(Default)]
pub struct FakeApi {
    routes: RefCell<HashMap<String, VecDeque<Canned>>>,
    pub calls: RefCell<Vec<(String, Vec<(String, String)>)>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, path: &str, payload: Value) {
        self.routes
            .borrow_mut()
            .entry(path.to_string())
            .or_default()
            .push_back(Ok(payload));
    }

    /// Queue a bare HTTP status for a path (e.g. 404 for an unknown forum).
    pub fn enqueue_status(&self, path: &str, status: u16) {
        self.routes
            .borrow_mut()
            .entry(path.to_string())
            .or_default()
            .push_back(Err(status));
    }

    /// Route `/r/{name}/about` so subreddit resolution succeeds.
    pub fn with_subreddit(self, name: &str) -> Self {
        self.enqueue(
            &format!("/r/{name}/about"),
            json!({"kind": "t5", "data": {"display_name": name}}),
        );
        self
    }
}

impl ApiGet for FakeApi {
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> rcollect::Result<Value> {
        self.calls.borrow_mut().push((
            path.to_string(),
            query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        ));
        match self
            .routes
            .borrow_mut()
            .get_mut(path)
            .and_then(|q| q.pop_front())
        {
            Some(Ok(v)) => Ok(v),
            Some(Err(status)) => Err(CollectError::Http { status, url: path.to_string() }),
            None => Err(CollectError::Config(format!("no canned response for {path}"))),
        }
    }
}

/// `{"kind":"Listing","data":{"children":...,"after":...}}`
pub fn listing(children: Vec<Value>, after: Option<&str>) -> Value {
    json!({"kind": "Listing", "data": {"children": children, "after": after}})
}

pub fn post_thing(
    id: &str,
    title: &str,
    score: i64,
    url: &str,
    num_comments: u64,
    selftext: &str,
    created_utc: f64,
) -> Value {
    json!({"kind": "t3", "data": {
        "id": id, "title": title, "score": score, "url": url,
        "num_comments": num_comments, "selftext": selftext, "created_utc": created_utc
    }})
}

/// A `t1` node. `replies` nest as further things; an empty slice renders the
/// API's empty-string replies marker.
pub fn comment_thing(id: &str, parent: &str, body: &str, replies: Vec<Value>) -> Value {
    let replies_val = if replies.is_empty() { json!("") } else { listing(replies, None) };
    json!({"kind": "t1", "data": {
        "id": id, "parent_id": parent, "body": body, "replies": replies_val
    }})
}

pub fn more_thing(parent: &str, children: &[&str]) -> Value {
    json!({"kind": "more", "data": {
        "parent_id": parent, "children": children, "count": children.len()
    }})
}

/// The two-element `/comments/{id}` payload: [post listing, comment listing].
pub fn comments_payload(post: Value, comments: Vec<Value>) -> Value {
    json!([listing(vec![post], None), listing(comments, None)])
}

/// The `/api/morechildren` envelope.
pub fn morechildren_payload(things: Vec<Value>) -> Value {
    json!({"json": {"errors": [], "data": {"things": things}}})
}

/// A post snapshot with throwaway metadata, for driving comment extraction.
pub fn sample_post(id: &str, num_comments: u64) -> Post {
    Post {
        title: format!("post {id}"),
        score: 1,
        id: id.to_string(),
        url: format!("https://example.com/{id}"),
        num_comments,
        selftext: String::new(),
        created_utc: 1_700_000_000.0,
    }
}

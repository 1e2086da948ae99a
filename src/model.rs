//! Serde view of the Reddit listing envelope.
//!
//! Only the fields the pipeline consumes are modeled; everything else in a
//! payload is ignored. Missing fields default rather than fail, matching the
//! API's habit of omitting attributes on deleted or quarantined content.

use crate::error::Result;
use serde::Deserialize;
use serde_json::Value;

/// A kinded node: `t1` (comment), `t3` (submission), `more` (placeholder),
/// `Listing` (page envelope).
#[derive(Clone, Debug, Deserialize)]
pub struct Thing {
    pub kind: String,
    pub data: Value,
}

/// One page of a listing: its children and the pagination cursor.
#[derive(Debug, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Thing>,
    #[serde(default)]
    pub after: Option<String>,
}

/// A submission as fetched. Immutable snapshot; never re-fetched or mutated.
#[derive(Clone, Debug, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub score: i64,
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub num_comments: u64,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub created_utc: f64,
}

impl Post {
    /// Fullname in the API's `t3_` namespace.
    pub fn fullname(&self) -> String {
        format!("t3_{}", self.id)
    }

    pub fn created_epoch(&self) -> i64 {
        self.created_utc as i64
    }
}

/// One comment node as it appears in a tree payload.
#[derive(Clone, Debug, Deserialize)]
pub struct RawComment {
    pub id: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub parent_id: String,
    /// The empty string when the subtree is empty; a listing otherwise.
    #[serde(default)]
    pub replies: Value,
}

/// A "load more" placeholder. Not a comment: it must be resolved before any
/// view is derived, and never appears in output.
#[derive(Clone, Debug, Deserialize)]
pub struct MoreStub {
    #[serde(default)]
    pub parent_id: String,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub count: i64,
}

/// Decode the `data` of a listing payload (`{"kind":"Listing","data":{...}}`).
pub fn parse_listing(v: &Value) -> Result<ListingData> {
    let data = v.get("data").cloned().unwrap_or(Value::Null);
    Ok(serde_json::from_value(data)?)
}

/// Decode a `t3` child into a [`Post`]; anything else yields `None`.
pub fn parse_post(thing: &Thing) -> Option<Post> {
    if thing.kind != "t3" {
        return None;
    }
    serde_json::from_value(thing.data.clone()).ok()
}

#[path = "common/mod.rs"]
mod common;

use common::*;
use rcollect::{
    output_file_name, parse_listing, parse_post, render_string_seq, resolve_subreddit,
    CollectError, CollectorOptions, CommentMode, IsRetryable, RetryPolicy, Thing,
};
use std::time::Duration;

#[test]
fn listing_page_decodes_children_and_cursor() {
    let page = listing(
        vec![
            post_thing("p1", "a", 10, "u", 3, "", 5.0),
            post_thing("p2", "b", 20, "u", 0, "self", 6.0),
        ],
        Some("t3_p2"),
    );
    let data = parse_listing(&page).unwrap();
    assert_eq!(data.children.len(), 2);
    assert_eq!(data.after.as_deref(), Some("t3_p2"));

    let post = parse_post(&data.children[0]).unwrap();
    assert_eq!(post.id, "p1");
    assert_eq!(post.score, 10);
    assert_eq!(post.num_comments, 3);
    assert_eq!(post.fullname(), "t3_p1");
    assert_eq!(post.created_epoch(), 5);
}

#[test]
fn non_post_children_are_ignored() {
    let thing: Thing =
        serde_json::from_value(comment_thing("c1", "t3_p1", "hi", vec![])).unwrap();
    assert!(parse_post(&thing).is_none());
}

#[test]
fn payload_without_data_is_a_decode_fault() {
    assert!(parse_listing(&serde_json::json!({"kind": "Listing"})).is_err());
}

#[test]
fn unknown_forum_maps_to_forum_not_found() {
    let api = FakeApi::new();
    api.enqueue_status("/r/nope/about", 404);
    match resolve_subreddit(&api, "nope") {
        Err(CollectError::ForumNotFound(name)) => assert_eq!(name, "nope"),
        other => panic!("expected ForumNotFound, got {other:?}"),
    }
}

#[test]
fn comment_mode_parses_known_names_only() {
    assert_eq!("all".parse::<CommentMode>().unwrap(), CommentMode::All);
    assert_eq!("TOP".parse::<CommentMode>().unwrap(), CommentMode::TopLevel);
    assert_eq!("top-level".parse::<CommentMode>().unwrap(), CommentMode::TopLevel);
    assert_eq!(" both ".parse::<CommentMode>().unwrap(), CommentMode::Both);
    assert!(matches!(
        "everything".parse::<CommentMode>(),
        Err(CollectError::Config(_))
    ));
}

#[test]
fn comment_mode_view_requests() {
    assert!(CommentMode::All.wants_all() && !CommentMode::All.wants_top_level());
    assert!(!CommentMode::TopLevel.wants_all() && CommentMode::TopLevel.wants_top_level());
    assert!(CommentMode::Both.wants_all() && CommentMode::Both.wants_top_level());
}

#[test]
fn transient_faults_are_retryable_and_fatal_ones_are_not() {
    assert!(CollectError::RateLimited { retry_after: Some(Duration::from_secs(2)) }.is_retryable());
    assert!(CollectError::RateLimited { retry_after: None }.is_retryable());
    assert!(CollectError::Http { status: 500, url: "u".into() }.is_retryable());
    assert!(CollectError::Http { status: 503, url: "u".into() }.is_retryable());
    assert!(!CollectError::Http { status: 404, url: "u".into() }.is_retryable());
    assert!(!CollectError::Auth("bad creds".into()).is_retryable());
    assert!(!CollectError::ForumNotFound("x".into()).is_retryable());
    assert!(!CollectError::Config("bad mode".into()).is_retryable());

    let timeout = std::io::Error::new(std::io::ErrorKind::TimedOut, "timeout");
    assert!(CollectError::Io(timeout).is_retryable());
    let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    assert!(!CollectError::Io(denied).is_retryable());
}

#[test]
fn retry_policy_defaults_are_bounded() {
    let p = RetryPolicy::default();
    assert_eq!(p.max_attempts, 3);
    assert!(p.initial_delay <= p.max_delay);
    assert!(p.backoff_multiplier > 1.0);
}

#[test]
fn output_file_is_named_after_the_forum() {
    assert_eq!(
        output_file_name("MySub"),
        "MySub_posts_and_comments_sorted.csv"
    );
}

#[test]
fn string_sequences_render_literally_with_escaping() {
    assert_eq!(render_string_seq(&[]), "[]");
    assert_eq!(
        render_string_seq(&["a".to_string(), "b".to_string()]),
        r#"["a", "b"]"#
    );
    assert_eq!(
        render_string_seq(&["say \"hi\"".to_string()]),
        r#"["say \"hi\""]"#
    );
}

#[test]
fn options_normalize_subreddit_and_keyword() {
    let opts = CollectorOptions::default()
        .with_subreddit("  r/Rust ")
        .with_search_keyword("   ");
    assert_eq!(opts.subreddit, "Rust");
    assert_eq!(opts.search_keyword, None);

    let opts = CollectorOptions::default().with_search_keyword(" lifetimes ");
    assert_eq!(opts.search_keyword.as_deref(), Some("lifetimes"));
}

use anyhow::{Context, Result};
use rcollect::{CommentMode, Credentials, RedditClient, RedditCollector, RetryPolicy};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let creds = Credentials::from_env()?;
    let subreddit =
        std::env::var("COLLECT_SUBREDDIT").context("COLLECT_SUBREDDIT not set")?;
    let keyword = std::env::var("COLLECT_KEYWORD").unwrap_or_default();
    let limit = match std::env::var("COLLECT_LIMIT") {
        Ok(v) if !v.trim().is_empty() => Some(
            v.trim()
                .parse::<u64>()
                .context("COLLECT_LIMIT must be a non-negative integer")?,
        ),
        _ => None,
    };
    let mode: CommentMode = std::env::var("COLLECT_COMMENT_MODE")
        .unwrap_or_else(|_| "top".into())
        .parse()?;

    let client = RedditClient::authenticate(&creds, RetryPolicy::default())?;
    let summary = RedditCollector::new()
        .subreddit(&subreddit)
        .search_keyword(&keyword)
        .limit(limit)
        .comment_mode(mode)
        .progress(true)
        .run(&client)?;

    println!("Total number of posts: {}", summary.total_posts);
    println!("Wrote {}", summary.out_path.display());
    Ok(())
}

//! Blocking HTTP layer over the Reddit OAuth API: token grant, subreddit
//! resolution, and a GET-with-retry primitive the fetch stages build on.
//!
//! Every call is synchronous and sequential; the pipeline has no internal
//! parallelism, so suspension happens only at these I/O boundaries.

use crate::config::{Credentials, RetryPolicy};
use crate::error::{CollectError, IsRetryable, Result};
use rand::Rng;
use serde::Deserialize;
use serde_json::Value;
use std::thread::sleep;
use std::time::Duration;

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE: &str = "https://oauth.reddit.com";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// GET seam the fetch stages call through. Implemented by [`RedditClient`];
/// tests substitute canned payloads.
pub trait ApiGet {
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value>;
}

/// A resolved subreddit handle.
#[derive(Clone, Debug)]
pub struct SubredditRef {
    pub name: String,
}

/// Resolve a subreddit by name; a 404 maps to `ForumNotFound`.
pub fn resolve_subreddit<C: ApiGet>(client: &C, name: &str) -> Result<SubredditRef> {
    match client.get_json(&format!("/r/{name}/about"), &[]) {
        Ok(_) => Ok(SubredditRef { name: name.to_string() }),
        Err(CollectError::Http { status: 404, .. }) => {
            Err(CollectError::ForumNotFound(name.to_string()))
        }
        Err(e) => Err(e),
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Authenticated session handle. Built once and passed by reference into the
/// fetch stages; never reconstructed per call.
pub struct RedditClient {
    http: reqwest::blocking::Client,
    token: String,
    retry: RetryPolicy,
}

impl RedditClient {
    /// `client_credentials` grant against the token endpoint. Invalid
    /// credentials surface as `Auth` and are never retried.
    pub fn authenticate(creds: &Credentials, retry: RetryPolicy) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(creds.user_agent.clone())
            .timeout(HTTP_TIMEOUT)
            .build()?;

        let resp = http
            .post(TOKEN_URL)
            .basic_auth(&creds.client_id, Some(&creds.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(CollectError::Auth(format!("token endpoint returned {status}")));
        }
        if !status.is_success() {
            return Err(CollectError::Http {
                status: status.as_u16(),
                url: TOKEN_URL.to_string(),
            });
        }
        let body: TokenResponse = resp.json()?;
        if let Some(err) = body.error {
            return Err(CollectError::Auth(format!("token endpoint rejected credentials: {err}")));
        }
        let token = body
            .access_token
            .ok_or_else(|| CollectError::Auth("token endpoint returned no access_token".into()))?;

        tracing::debug!("authenticated against the reddit API");
        Ok(Self { http, token, retry })
    }

    pub fn subreddit(&self, name: &str) -> Result<SubredditRef> {
        resolve_subreddit(self, name)
    }

    /// GET an API path and decode the JSON body. Transient faults (429, 5xx,
    /// timeouts) get exponential backoff bounded by the retry policy;
    /// everything else propagates unchanged.
    pub fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let mut attempt = 0u32;
        let mut delay = self.retry.initial_delay;
        loop {
            match self.get_once(path, query) {
                Ok(v) => {
                    if attempt > 0 {
                        tracing::info!(attempts = attempt + 1, path, "request succeeded after retry");
                    }
                    return Ok(v);
                }
                Err(e) if e.is_retryable() && attempt < self.retry.max_attempts => {
                    attempt += 1;
                    // A Retry-After hint overrides the computed backoff.
                    let wait = match &e {
                        CollectError::RateLimited { retry_after: Some(d) } => *d,
                        _ if self.retry.jitter => jittered(delay),
                        _ => delay,
                    };
                    tracing::warn!(
                        error = %e,
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        delay_ms = wait.as_millis() as u64,
                        "transient fault, retrying"
                    );
                    sleep(wait);
                    delay = Duration::from_secs_f64(
                        delay.as_secs_f64() * self.retry.backoff_multiplier,
                    )
                    .min(self.retry.max_delay);
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn get_once(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{API_BASE}{path}");
        tracing::debug!(%url, "GET");
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()?;
        let status = resp.status();
        match status.as_u16() {
            200..=299 => Ok(resp.json()?),
            401 | 403 => Err(CollectError::Auth(format!("API returned {status} for {url}"))),
            429 => Err(CollectError::RateLimited { retry_after: parse_retry_after(&resp) }),
            s => Err(CollectError::Http { status: s, url }),
        }
    }
}

impl ApiGet for RedditClient {
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        RedditClient::get_json(self, path, query)
    }
}

fn parse_retry_after(resp: &reqwest::blocking::Response) -> Option<Duration> {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Uniform jitter between 1x and 2x of the computed delay.
fn jittered(delay: Duration) -> Duration {
    let mut rng = rand::thread_rng();
    let factor: f64 = rng.gen_range(0.0..=1.0);
    Duration::from_secs_f64(delay.as_secs_f64() * (1.0 + factor))
}

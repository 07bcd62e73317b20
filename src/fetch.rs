use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::FetchConfig;

const MAX_RETRIES: u32 = 3;
const BASE_BACKOFF_MS: u64 = 500;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fetch the schedule page, retrying transient failures with exponential
/// backoff. Returns the page body as a string.
pub async fn fetch_schedule(config: &FetchConfig) -> Result<String> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?;

    info!("Fetching schedule: {}", config.schedule_url);

    for attempt in 0..=MAX_RETRIES {
        let result = fetch_once(&client, config).await;
        let transient = result.as_ref().err().is_some_and(is_transient);

        if !transient || attempt == MAX_RETRIES {
            return result;
        }

        let backoff = Duration::from_millis(BASE_BACKOFF_MS * 2u64.pow(attempt));
        warn!(
            "Fetch attempt {}/{} failed, backing off {:.1}s",
            attempt + 1,
            MAX_RETRIES + 1,
            backoff.as_secs_f64()
        );
        tokio::time::sleep(backoff).await;
    }

    fetch_once(&client, config).await
}

async fn fetch_once(client: &reqwest::Client, config: &FetchConfig) -> Result<String> {
    let response = client
        .get(&config.schedule_url)
        .header(reqwest::header::COOKIE, &config.cookie)
        .send()
        .await
        .with_context(|| format!("GET {} failed", config.schedule_url))?
        .error_for_status()
        .with_context(|| format!("GET {} returned an error status", config.schedule_url))?;

    response
        .text()
        .await
        .context("failed to read schedule page body")
}

/// Connection-level failures and throttling/server statuses are worth a
/// retry; everything else (404, auth walls) fails the run immediately.
fn is_transient(err: &anyhow::Error) -> bool {
    let Some(e) = err.downcast_ref::<reqwest::Error>() else {
        return false;
    };
    if e.is_connect() || e.is_timeout() {
        return true;
    }
    match e.status() {
        Some(status) => status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS,
        None => false,
    }
}

// ── Tests ──

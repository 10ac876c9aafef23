use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time;

use crate::{
    configuration::RetrySettings,
    domain::provider::Provider,
    error::{ConfigurationError, ProviderError},
};

/// Unix timestamp (seconds) at which the provider's rate-limit window resets.
pub const RATE_LIMIT_RESET_HEADER: &str = "X-RateLimit-Reset";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_base: Duration,
    pub max_wait: Duration,
}

impl RetryPolicy {
    pub fn from_settings(settings: &RetrySettings) -> Self {
        RetryPolicy {
            max_attempts: settings.max_attempts,
            backoff_base: Duration::from_secs(settings.backoff_base_seconds),
            max_wait: Duration::from_secs(settings.max_wait_seconds),
        }
    }

    pub fn linear_backoff(&self, attempt: u32) -> Duration {
        self.backoff_base
            .saturating_mul(attempt)
            .min(self.max_wait)
    }

    /// Wait before retrying a 429. Uses the reset header when it parses, never negative.
    pub fn rate_limit_wait(&self, reset_header: Option<&str>, now: i64, attempt: u32) -> Duration {
        match reset_header.and_then(|reset| reset.trim().parse::<i64>().ok()) {
            Some(reset_timestamp) => {
                let seconds = reset_timestamp.saturating_sub(now).max(0) as u64;
                Duration::from_secs(seconds).min(self.max_wait)
            }
            None => self.linear_backoff(attempt),
        }
    }
}

/// Shared outbound HTTP client with bounded retries.
///
/// 2xx returns immediately. 429 and transport failures are retried after a
/// wait; every other status aborts without retrying.
#[derive(Clone)]
pub struct HttpRetryClient {
    client: Client,
    policy: RetryPolicy,
}

impl HttpRetryClient {
    pub fn new(timeout: Duration, policy: RetryPolicy) -> Result<Self, ConfigurationError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(HttpRetryClient { client, policy })
    }

    pub fn from_settings(settings: &RetrySettings) -> Result<Self, ConfigurationError> {
        Self::new(settings.timeout(), RetryPolicy::from_settings(settings))
    }

    /// `build_request` is called once per attempt since a sent request can't be reused.
    pub async fn execute<F>(
        &self,
        provider: Provider,
        build_request: F,
    ) -> Result<Response, ProviderError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            let (error, wait) = match build_request(&self.client).send().await {
                Ok(res) if res.status().is_success() => return Ok(res),
                Ok(res) if res.status() == StatusCode::TOO_MANY_REQUESTS => {
                    let reset = res
                        .headers()
                        .get(RATE_LIMIT_RESET_HEADER)
                        .and_then(|value| value.to_str().ok());
                    let wait = self
                        .policy
                        .rate_limit_wait(reset, Utc::now().timestamp(), attempt);

                    log::warn!(
                        "{} rate limit hit on attempt {}/{}, waiting {:?}",
                        provider,
                        attempt,
                        max_attempts,
                        wait
                    );
                    (ProviderError::RateLimited { provider, wait }, wait)
                }
                Ok(res) => {
                    let status = res.status().as_u16();
                    let body = res.text().await.unwrap_or_default();

                    log::error!("{} API Error ({}): {}", provider, status, body);
                    return Err(ProviderError::ClientOrServer {
                        provider,
                        status,
                        body,
                    });
                }
                Err(e) => {
                    let wait = self.policy.linear_backoff(attempt);

                    log::warn!(
                        "{} request error on attempt {}/{} (timeout: {}), waiting {:?}. Error: {:?}",
                        provider,
                        attempt,
                        max_attempts,
                        e.is_timeout(),
                        wait,
                        e
                    );
                    (ProviderError::Transport { provider, source: e }, wait)
                }
            };

            if attempt >= max_attempts {
                log::error!("{} request failed after {} attempts", provider, attempt);
                return Err(ProviderError::RetriesExhausted {
                    provider,
                    attempts: attempt,
                    source: Box::new(error),
                });
            }

            time::sleep(wait).await;
        }
    }

    pub async fn execute_json<T, F>(
        &self,
        provider: Provider,
        build_request: F,
    ) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
        F: Fn(&Client) -> RequestBuilder,
    {
        let res = self.execute(provider, build_request).await?;

        res.json::<T>()
            .await
            .map_err(|source| ProviderError::Decode { provider, source })
    }
}

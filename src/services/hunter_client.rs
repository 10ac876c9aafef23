use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{domain::email::EmailStatus, domain::provider::Provider, error::ProviderError};

use super::{EmailFinder, EmailVerifier, HttpRetryClient};

/// Email finder and verifier backed by the same account.
pub struct HunterClient {
    http: HttpRetryClient,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct FinderQuery<'a> {
    api_key: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    domain: &'a str,
}

#[derive(Serialize)]
struct VerifierQuery<'a> {
    api_key: &'a str,
    email: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse<T> {
    data: Option<T>,
}

#[derive(Deserialize)]
struct FinderData {
    email: Option<String>,
}

#[derive(Deserialize)]
struct VerifierData {
    status: Option<String>,
    // Older accounts still answer with `result`
    result: Option<String>,
}

impl HunterClient {
    pub fn new(http: HttpRetryClient, api_key: String, base_url: String) -> Self {
        HunterClient {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl EmailFinder for HunterClient {
    async fn find_email(
        &self,
        first_name: &str,
        last_name: &str,
        domain: &str,
    ) -> Result<Option<String>, ProviderError> {
        let url = format!("{}/email-finder", self.base_url);
        let query = FinderQuery {
            api_key: &self.api_key,
            first_name,
            last_name,
            domain,
        };

        let response: ApiResponse<FinderData> = self
            .http
            .execute_json(Provider::Hunter, |client| client.get(&url).query(&query))
            .await?;

        Ok(response
            .data
            .and_then(|data| data.email)
            .filter(|email| !email.trim().is_empty()))
    }
}

#[async_trait]
impl EmailVerifier for HunterClient {
    async fn verify_email(&self, email: &str) -> Result<EmailStatus, ProviderError> {
        let url = format!("{}/email-verifier", self.base_url);
        let query = VerifierQuery {
            api_key: &self.api_key,
            email,
        };

        let response: ApiResponse<VerifierData> = self
            .http
            .execute_json(Provider::Hunter, |client| client.get(&url).query(&query))
            .await
            .map_err(|e| ProviderError::VerificationUnavailable {
                provider: Provider::Hunter,
                email: email.to_string(),
                source: Box::new(e),
            })?;

        let status = response
            .data
            .and_then(|data| data.status.or(data.result))
            .map(|status| EmailStatus::from_verifier(&status))
            .unwrap_or(EmailStatus::Unknown);

        Ok(status)
    }
}

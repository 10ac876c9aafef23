use std::time::Duration;

use thiserror::Error;

use crate::domain::provider::Provider;

/// Failure of a single call to a third-party provider.
///
/// None of these abort a prospecting run. Stages log them and degrade to
/// "no result from this provider".
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network failure or timeout before a response arrived
    #[error("{provider} transport error: {source}")]
    Transport {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP 429
    #[error("{provider} rate limited, waited {wait:?}")]
    RateLimited { provider: Provider, wait: Duration },

    /// Any other non-2xx status. Never retried.
    #[error("{provider} returned {status}: {body}")]
    ClientOrServer {
        provider: Provider,
        status: u16,
        body: String,
    },

    #[error("{provider} failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        provider: Provider,
        attempts: u32,
        #[source]
        source: Box<ProviderError>,
    },

    /// A 2xx body that does not match the expected schema
    #[error("{provider} response could not be decoded: {source}")]
    Decode {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    /// The verifier could not give a verdict. Distinct from an `invalid` verdict.
    #[error("{provider} could not verify {email}: {source}")]
    VerificationUnavailable {
        provider: Provider,
        email: String,
        #[source]
        source: Box<ProviderError>,
    },
}

/// Fatal startup errors. These stop the process before any run starts.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("missing api key for {0}")]
    MissingCredential(Provider),

    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

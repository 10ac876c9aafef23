pub mod apollo_client;
pub mod company_discovery;
pub mod contact_discovery;
pub mod crunchbase_client;
pub mod email_resolution;
pub mod http_retry;
pub mod hunter_client;
pub mod prospector;
pub mod providers;

#[cfg(test)]
pub mod test_support;

pub use apollo_client::*;
pub use company_discovery::*;
pub use contact_discovery::*;
pub use crunchbase_client::*;
pub use email_resolution::*;
pub use http_retry::*;
pub use hunter_client::*;
pub use prospector::*;
pub use providers::*;

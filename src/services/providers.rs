//! Seams between the pipeline stages and the third-party services they call.
//!
//! Each stage holds `Arc<dyn Trait>` handles so the HTTP clients can be swapped
//! for stubs.

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    domain::{company::Company, email::EmailStatus},
    error::ProviderError,
};

/// One page of company-search results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyPage {
    pub companies: Vec<Company>,
    /// Cursor for the next page, `None` when there is none
    pub after_id: Option<String>,
}

#[async_trait]
pub trait CompanySearch: Send + Sync {
    /// Companies whose description or identifier contains `term`, tagged with `term`.
    async fn search_page(
        &self,
        term: &str,
        limit: u32,
        after_id: Option<&str>,
    ) -> Result<CompanyPage, ProviderError>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeopleQuery {
    pub domain: String,
    pub titles: Vec<String>,
    pub seniorities: Vec<String>,
    pub per_page: u32,
    pub page: u32,
}

/// A person as the people-search service reports them. Omitted fields stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
}

#[async_trait]
pub trait PeopleSearch: Send + Sync {
    async fn search_people(&self, query: &PeopleQuery) -> Result<Vec<Person>, ProviderError>;
}

#[async_trait]
pub trait EmailFinder: Send + Sync {
    async fn find_email(
        &self,
        first_name: &str,
        last_name: &str,
        domain: &str,
    ) -> Result<Option<String>, ProviderError>;
}

#[async_trait]
pub trait EmailVerifier: Send + Sync {
    async fn verify_email(&self, email: &str) -> Result<EmailStatus, ProviderError>;
}

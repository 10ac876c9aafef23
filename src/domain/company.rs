use serde::{Deserialize, Serialize};
use url::Url;

/// A company returned by the company-search service, tagged with the term that found it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub website_url: Option<String>,
    pub permalink: Option<String>,
    pub search_term: String,
}

impl Company {
    /// Bare lower-case host derived from `website_url`, or `None` when the value
    /// is absent or unusable as a domain.
    pub fn domain(&self) -> Option<String> {
        self.website_url.as_deref().and_then(normalize_domain)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

pub fn normalize_domain(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    // Bare values like "acme.com/about" are read as http urls
    let parsed_url = match raw.contains("://") {
        true => Url::parse(raw),
        false => Url::parse(&format!("http://{}", raw)),
    };

    let host = match parsed_url.ok()?.host_str() {
        Some("") | None => return None,
        Some(host) => host.to_lowercase(),
    };

    let host = match host.strip_prefix("www.") {
        Some(h) => h.to_string(),
        None => host,
    };

    match host.contains('.') && !host.chars().any(char::is_whitespace) {
        true => Some(host),
        false => None,
    }
}

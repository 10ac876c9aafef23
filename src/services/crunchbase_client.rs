use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{domain::company::Company, domain::provider::Provider, error::ProviderError};

use super::{CompanyPage, CompanySearch, HttpRetryClient};

const FIELD_IDS: [&str; 7] = [
    "identifier",
    "short_description",
    "location_identifiers",
    "linkedin",
    "twitter",
    "permalink",
    "website_url",
];

pub struct CrunchbaseClient {
    http: HttpRetryClient,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    field_ids: &'a [&'a str],
    limit: u32,
    query: [Predicate<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    after_id: Option<&'a str>,
}

#[derive(Serialize)]
struct Predicate<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    field_id: &'static str,
    operator_id: &'static str,
    values: [&'a str; 1],
}

impl<'a> Predicate<'a> {
    fn contains(field_id: &'static str, term: &'a str) -> Self {
        Predicate {
            kind: "predicate",
            field_id,
            operator_id: "contains",
            values: [term],
        }
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    entities: Vec<Entity>,
    #[serde(default)]
    after_id: Option<String>,
}

#[derive(Deserialize)]
struct Entity {
    #[serde(default)]
    properties: Properties,
}

#[derive(Deserialize, Default)]
struct Properties {
    identifier: Option<ValueField>,
    short_description: Option<String>,
    location_identifiers: Option<Vec<ValueField>>,
    linkedin: Option<ValueField>,
    twitter: Option<ValueField>,
    // Not always a string in the wild
    website_url: Option<serde_json::Value>,
    permalink: Option<String>,
}

#[derive(Deserialize)]
struct ValueField {
    value: Option<String>,
}

impl Properties {
    fn into_company(self, term: &str) -> Company {
        let value_of = |field: Option<ValueField>| field.and_then(|f| f.value);

        Company {
            name: value_of(self.identifier),
            description: self.short_description,
            location: self
                .location_identifiers
                .and_then(|locations| locations.into_iter().next())
                .and_then(|location| location.value),
            linkedin: value_of(self.linkedin),
            twitter: value_of(self.twitter),
            website_url: match self.website_url {
                Some(serde_json::Value::String(url)) => Some(url),
                _ => None,
            },
            permalink: self.permalink,
            search_term: term.to_string(),
        }
    }
}

impl CrunchbaseClient {
    pub fn new(http: HttpRetryClient, api_key: String, base_url: String) -> Self {
        CrunchbaseClient {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CompanySearch for CrunchbaseClient {
    async fn search_page(
        &self,
        term: &str,
        limit: u32,
        after_id: Option<&str>,
    ) -> Result<CompanyPage, ProviderError> {
        let url = format!("{}/searches/organizations", self.base_url);
        // Categories are unavailable on the basic plan, so match on text fields
        let body = SearchRequest {
            field_ids: &FIELD_IDS,
            limit,
            query: [
                Predicate::contains("short_description", term),
                Predicate::contains("identifier", term),
            ],
            after_id,
        };

        let response: SearchResponse = self
            .http
            .execute_json(Provider::Crunchbase, |client| {
                client
                    .post(&url)
                    .header("X-Cb-User-Key", &self.api_key)
                    .json(&body)
            })
            .await?;

        Ok(CompanyPage {
            companies: response
                .entities
                .into_iter()
                .map(|entity| entity.properties.into_company(term))
                .collect(),
            after_id: response.after_id.filter(|id| !id.trim().is_empty()),
        })
    }
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{domain::provider::Provider, error::ProviderError};

use super::{HttpRetryClient, PeopleQuery, PeopleSearch, Person};

pub struct ApolloClient {
    http: HttpRetryClient,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct PeopleSearchRequest<'a> {
    q_organization_domains: &'a str,
    #[serde(skip_serializing_if = "no_values")]
    person_titles: &'a [String],
    #[serde(skip_serializing_if = "no_values")]
    person_seniorities: &'a [String],
    per_page: u32,
    page: u32,
}

fn no_values(values: &&[String]) -> bool {
    values.is_empty()
}

#[derive(Deserialize)]
struct PeopleSearchResponse {
    #[serde(default)]
    people: Vec<Person>,
}

impl ApolloClient {
    pub fn new(http: HttpRetryClient, api_key: String, base_url: String) -> Self {
        ApolloClient {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PeopleSearch for ApolloClient {
    async fn search_people(&self, query: &PeopleQuery) -> Result<Vec<Person>, ProviderError> {
        let url = format!("{}/mixed_people/search", self.base_url);
        let body = PeopleSearchRequest {
            q_organization_domains: &query.domain,
            person_titles: &query.titles,
            person_seniorities: &query.seniorities,
            per_page: query.per_page,
            page: query.page.max(1),
        };

        let response: PeopleSearchResponse = self
            .http
            .execute_json(Provider::Apollo, |client| {
                client
                    .post(&url)
                    .header("accept", "application/json")
                    .header("Cache-Control", "no-cache")
                    .header("x-api-key", &self.api_key)
                    .json(&body)
            })
            .await?;

        Ok(response.people)
    }
}

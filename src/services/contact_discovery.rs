use std::sync::Arc;

use crate::domain::{company::Company, contact::DecisionMaker};

use super::{PeopleQuery, PeopleSearch, Person};

/// Which people count as decision makers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFilter {
    pub titles: Vec<String>,
    pub seniorities: Vec<String>,
    pub per_page: u32,
}

pub struct ContactDiscovery {
    people: Arc<dyn PeopleSearch>,
    filter: ContactFilter,
}

impl ContactDiscovery {
    pub fn new(people: Arc<dyn PeopleSearch>, filter: ContactFilter) -> Self {
        ContactDiscovery { people, filter }
    }

    pub async fn discover_all(&self, companies: &[Company]) -> Vec<DecisionMaker> {
        let mut decision_makers = vec![];

        for company in companies {
            decision_makers.extend(self.discover(company).await);
        }

        decision_makers
    }

    /// Decision makers at `company`. Only the first page is fetched; companies
    /// without a usable domain are skipped without calling the service.
    pub async fn discover(&self, company: &Company) -> Vec<DecisionMaker> {
        let Some(domain) = company.domain() else {
            log::info!(
                "Skipping {} (No valid domain: {:?})",
                company.display_name(),
                company.website_url
            );
            return vec![];
        };

        log::info!(
            "Searching decision-makers for {} ({})",
            company.display_name(),
            domain
        );

        let query = PeopleQuery {
            domain: domain.clone(),
            titles: self.filter.titles.clone(),
            seniorities: self.filter.seniorities.clone(),
            per_page: self.filter.per_page,
            page: 1,
        };

        match self.people.search_people(&query).await {
            Ok(people) => people
                .into_iter()
                .map(|person| into_decision_maker(person, &domain))
                .collect(),
            Err(e) => {
                log::error!(
                    "People search failed for {} ({}). Error: {}",
                    company.display_name(),
                    domain,
                    e
                );
                vec![]
            }
        }
    }
}

fn into_decision_maker(person: Person, domain: &str) -> DecisionMaker {
    DecisionMaker {
        name: person.name,
        role: person.title,
        email: person.email,
        linkedin: person.linkedin_url,
        company_domain: domain.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{ContactDiscovery, ContactFilter};
    use crate::services::{
        test_support::{company, person, StubPeopleSearch},
        Person,
    };

    fn filter() -> ContactFilter {
        ContactFilter {
            titles: vec!["CEO".into(), "Founder".into()],
            seniorities: vec!["c_suite".into()],
            per_page: 10,
        }
    }

    #[tokio::test]
    async fn company_without_domain_is_skipped_without_a_call() {
        let people = Arc::new(StubPeopleSearch::returning(vec![person(
            "Jane Doe",
            Some("jane@acme.com"),
        )]));
        let discovery = ContactDiscovery::new(people.clone(), filter());

        for website_url in [None, Some(""), Some("   ")] {
            let found = discovery.discover(&company("Acme", website_url, "AI")).await;
            assert!(found.is_empty());
        }

        assert!(people.calls().is_empty());
    }

    #[tokio::test]
    async fn one_page_of_filtered_people_per_company() {
        let people = Arc::new(StubPeopleSearch::returning(vec![
            person("Jane Doe", Some("jane@acme.com")),
            Person {
                name: Some("Anon".into()),
                ..Person::default()
            },
        ]));
        let discovery = ContactDiscovery::new(people.clone(), filter());

        let found = discovery
            .discover(&company("Acme", Some("https://www.acme.com"), "AI"))
            .await;

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].email.as_deref(), Some("jane@acme.com"));
        assert_eq!(found[0].company_domain, "acme.com");
        assert_eq!(found[1].role, None);
        assert_eq!(found[1].linkedin, None);

        let calls = people.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].domain, "acme.com");
        assert_eq!(calls[0].titles, vec!["CEO", "Founder"]);
        assert_eq!(calls[0].seniorities, vec!["c_suite"]);
        assert_eq!(calls[0].page, 1);
        assert_eq!(calls[0].per_page, 10);
    }

    #[tokio::test]
    async fn website_path_is_stripped_before_searching() {
        let people = Arc::new(StubPeopleSearch::returning(vec![person("Jane Doe", None)]));
        let discovery = ContactDiscovery::new(people.clone(), filter());

        let found = discovery
            .discover(&company("Acme", Some("www.acme.com/about?ref=cb"), "AI"))
            .await;

        assert_eq!(found[0].company_domain, "acme.com");
        assert_eq!(people.calls()[0].domain, "acme.com");

        let row = serde_json::to_value(&found[0]).unwrap();
        assert_eq!(row["company"], "acme.com");
        assert!(row.get("company_domain").is_none());
    }

    #[tokio::test]
    async fn failed_search_yields_no_records() {
        let people = Arc::new(StubPeopleSearch::failing());
        let discovery = ContactDiscovery::new(people.clone(), filter());

        let companies = vec![
            company("Acme", Some("acme.com"), "AI"),
            company("Globex", None, "AI"),
        ];
        let found = discovery.discover_all(&companies).await;

        assert!(found.is_empty());
        assert_eq!(people.calls().len(), 1);
    }
}

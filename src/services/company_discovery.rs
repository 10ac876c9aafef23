use std::{collections::HashSet, sync::Arc};

use crate::domain::company::Company;

use super::CompanySearch;

/// Pages through the company-search service, one term at a time.
pub struct CompanyDiscovery {
    search: Arc<dyn CompanySearch>,
    page_size: u32,
}

impl CompanyDiscovery {
    pub fn new(search: Arc<dyn CompanySearch>, page_size: u32) -> Self {
        CompanyDiscovery { search, page_size }
    }

    /// Companies for every term, grouped by term in the order given. A company
    /// matching several terms appears once per term.
    pub async fn discover(&self, terms: &[String]) -> Vec<Company> {
        let mut companies = vec![];

        for term in terms {
            log::info!("Searching companies with term: {}", term);
            let found = self.discover_term(term).await;
            log::info!("Found {} companies for term: {}", found.len(), term);
            companies.extend(found);
        }

        companies
    }

    pub async fn discover_term(&self, term: &str) -> Vec<Company> {
        let mut companies = vec![];
        let mut after_id: Option<String> = None;
        let mut seen_cursors = HashSet::new();
        let mut page_number = 0;

        loop {
            page_number += 1;

            let page = match self
                .search
                .search_page(term, self.page_size, after_id.as_deref())
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    // No cursor to continue from, keep what earlier pages returned
                    log::error!(
                        "Company search failed for term {} on page {}. Error: {}",
                        term,
                        page_number,
                        e
                    );
                    break;
                }
            };

            log::debug!(
                "Page {} for term {} returned {} companies, next page? {}",
                page_number,
                term,
                page.companies.len(),
                page.after_id.is_some()
            );
            companies.extend(page.companies);

            match page.after_id {
                None => break,
                Some(next) if !seen_cursors.insert(next.clone()) => {
                    log::warn!(
                        "Company search repeated cursor {} for term {}, stopping pagination",
                        next,
                        term
                    );
                    break;
                }
                Some(next) => after_id = Some(next),
            }
        }

        companies
    }
}

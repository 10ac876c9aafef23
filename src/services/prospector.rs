use std::collections::HashMap;

use itertools::Itertools;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{company::Company, contact::Prospect, email::EmailStatus};

use super::{CompanyDiscovery, ContactDiscovery, EmailResolution};

#[derive(Debug, Clone, Serialize)]
pub struct ProspectingReport {
    pub run_id: Uuid,
    pub companies: Vec<Company>,
    pub prospects: Vec<Prospect>,
}

impl ProspectingReport {
    pub fn summary(&self) -> HashMap<EmailStatus, usize> {
        self.prospects.iter().counts_by(|p| p.email_status)
    }
}

/// Runs company discovery, contact discovery and email resolution in sequence.
pub struct Prospector {
    companies: CompanyDiscovery,
    contacts: ContactDiscovery,
    emails: EmailResolution,
    default_terms: Vec<String>,
    max_companies: Option<usize>,
}

impl Prospector {
    pub fn new(
        companies: CompanyDiscovery,
        contacts: ContactDiscovery,
        emails: EmailResolution,
        default_terms: Vec<String>,
        max_companies: Option<usize>,
    ) -> Self {
        Prospector {
            companies,
            contacts,
            emails,
            default_terms,
            max_companies,
        }
    }

    pub fn companies(&self) -> &CompanyDiscovery {
        &self.companies
    }

    pub fn contacts(&self) -> &ContactDiscovery {
        &self.contacts
    }

    pub fn emails(&self) -> &EmailResolution {
        &self.emails
    }

    pub fn default_terms(&self) -> &[String] {
        &self.default_terms
    }

    pub async fn run(&self, terms: &[String]) -> ProspectingReport {
        let run_id = Uuid::new_v4();
        log::info!("[{}] Fetching companies for {} terms", run_id, terms.len());

        let companies = self.companies.discover(terms).await;
        log::info!("[{}] {} companies retrieved", run_id, companies.len());

        let selected = match self.max_companies {
            Some(max) if companies.len() > max => {
                log::info!("[{}] Only the first {} companies go on", run_id, max);
                &companies[..max]
            }
            _ => &companies[..],
        };

        log::info!("[{}] Fetching decision-makers", run_id);
        let decision_makers = self.contacts.discover_all(selected).await;
        log::info!(
            "[{}] {} decision-makers retrieved",
            run_id,
            decision_makers.len()
        );

        log::info!("[{}] Resolving emails", run_id);
        let prospects = self.emails.resolve_all(decision_makers).await;

        let report = ProspectingReport {
            run_id,
            companies,
            prospects,
        };
        let summary = report
            .summary()
            .into_iter()
            .sorted_by_key(|(status, _)| status.to_string())
            .map(|(status, count)| format!("{}={}", status, count))
            .join(", ");
        log::info!("[{}] Workflow completed: {}", run_id, summary);

        report
    }
}

use std::sync::Arc;

use crate::domain::{
    contact::{DecisionMaker, Prospect},
    email::{
        construct_email_permutations, is_usable_email, EmailSource, EmailStatus, PersonName,
    },
};

use super::{EmailFinder, EmailVerifier, PeopleQuery, PeopleSearch};

/// Strategies tried for a contact without a usable email, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStep {
    Finder,
    PeopleSearch,
    Pattern,
}

pub const CASCADE: [ResolutionStep; 3] = [
    ResolutionStep::Finder,
    ResolutionStep::PeopleSearch,
    ResolutionStep::Pattern,
];

impl ResolutionStep {
    fn source(&self) -> EmailSource {
        match self {
            ResolutionStep::Finder => EmailSource::FinderService,
            ResolutionStep::PeopleSearch => EmailSource::PeopleSearch,
            ResolutionStep::Pattern => EmailSource::Pattern,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved { address: String, source: EmailSource },
    Exhausted,
}

pub struct EmailResolution {
    finder: Arc<dyn EmailFinder>,
    people: Arc<dyn PeopleSearch>,
    verifier: Arc<dyn EmailVerifier>,
    fallback_per_page: u32,
}

impl EmailResolution {
    pub fn new(
        finder: Arc<dyn EmailFinder>,
        people: Arc<dyn PeopleSearch>,
        verifier: Arc<dyn EmailVerifier>,
        fallback_per_page: u32,
    ) -> Self {
        EmailResolution {
            finder,
            people,
            verifier,
            fallback_per_page,
        }
    }

    pub async fn resolve_all(&self, decision_makers: Vec<DecisionMaker>) -> Vec<Prospect> {
        let mut prospects = Vec::with_capacity(decision_makers.len());

        for decision_maker in decision_makers {
            prospects.push(self.resolve(decision_maker).await);
        }

        prospects
    }

    /// Finalizes one decision maker. A usable email on input is kept as is and
    /// no provider is called.
    pub async fn resolve(&self, decision_maker: DecisionMaker) -> Prospect {
        if is_usable_email(decision_maker.email.as_deref()) {
            let email = decision_maker.email.clone();
            return Prospect::finalize(
                decision_maker,
                email,
                EmailStatus::Unknown,
                Some(EmailSource::Existing),
            );
        }

        let name = decision_maker.name.as_deref().and_then(PersonName::parse);

        let resolution = self
            .cascade(name.as_ref(), &decision_maker.company_domain)
            .await;

        match resolution {
            Resolution::Resolved { address, source } => {
                // Pattern candidates only resolve once the verifier said `valid`
                let status = match source {
                    EmailSource::Pattern => EmailStatus::Valid,
                    _ => self.verify(&address).await,
                };
                log::info!(
                    "Resolved {} via {:?}, status {}",
                    address,
                    source,
                    status
                );
                Prospect::finalize(decision_maker, Some(address), status, Some(source))
            }
            Resolution::Exhausted => {
                log::info!(
                    "No email found for {:?} at {}",
                    decision_maker.name,
                    decision_maker.company_domain
                );
                Prospect::finalize(decision_maker, None, EmailStatus::NotFound, None)
            }
        }
    }

    pub async fn cascade(&self, name: Option<&PersonName>, domain: &str) -> Resolution {
        for step in CASCADE {
            if let Some(address) = self.attempt(step, name, domain).await {
                return Resolution::Resolved {
                    address,
                    source: step.source(),
                };
            }
            log::debug!("{:?} found nothing for {:?} at {}", step, name, domain);
        }

        Resolution::Exhausted
    }

    async fn attempt(
        &self,
        step: ResolutionStep,
        name: Option<&PersonName>,
        domain: &str,
    ) -> Option<String> {
        match step {
            ResolutionStep::Finder => self.find_with_finder(name?, domain).await,
            ResolutionStep::PeopleSearch => self.find_with_people_search(domain).await,
            ResolutionStep::Pattern => self.predict_email(name?, domain).await,
        }
    }

    async fn find_with_finder(&self, name: &PersonName, domain: &str) -> Option<String> {
        match self.finder.find_email(&name.first, &name.last, domain).await {
            Ok(email) => email.filter(|email| is_usable_email(Some(email.as_str()))),
            Err(e) => {
                log::warn!(
                    "Email finder failed for {} {} at {}. Error: {}",
                    name.first,
                    name.last,
                    domain,
                    e
                );
                None
            }
        }
    }

    async fn find_with_people_search(&self, domain: &str) -> Option<String> {
        let query = PeopleQuery {
            domain: domain.to_string(),
            per_page: self.fallback_per_page,
            page: 1,
            ..PeopleQuery::default()
        };

        match self.people.search_people(&query).await {
            Ok(people) => people
                .into_iter()
                .next()
                .and_then(|person| person.email)
                .filter(|email| is_usable_email(Some(email.as_str()))),
            Err(e) => {
                log::warn!("People search fallback failed for {}. Error: {}", domain, e);
                None
            }
        }
    }

    async fn predict_email(&self, name: &PersonName, domain: &str) -> Option<String> {
        for candidate in construct_email_permutations(name, domain) {
            match self.verifier.verify_email(&candidate).await {
                Ok(EmailStatus::Valid) => return Some(candidate),
                Ok(status) => log::debug!("Predicted email {} is {}", candidate, status),
                Err(e) => log::warn!("Could not verify predicted email {}. Error: {}", candidate, e),
            }
        }

        None
    }

    async fn verify(&self, address: &str) -> EmailStatus {
        match self.verifier.verify_email(address).await {
            Ok(status) => status,
            Err(e) => {
                log::warn!("Verification unavailable for {}. Error: {}", address, e);
                EmailStatus::Unknown
            }
        }
    }
}

use serde::{Deserialize, Serialize};

use super::email::{EmailSource, EmailStatus};

/// A person found at a company, before email resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionMaker {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub linkedin: Option<String>,
    #[serde(rename = "company")]
    pub company_domain: String,
}

/// A decision maker after email resolution. Only `EmailResolution` builds these,
/// so `email_status` is always set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prospect {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub email_status: EmailStatus,
    pub email_source: Option<EmailSource>,
    pub linkedin: Option<String>,
    #[serde(rename = "company")]
    pub company_domain: String,
}

impl Prospect {
    pub(crate) fn finalize(
        decision_maker: DecisionMaker,
        email: Option<String>,
        email_status: EmailStatus,
        email_source: Option<EmailSource>,
    ) -> Self {
        Prospect {
            name: decision_maker.name,
            role: decision_maker.role,
            email,
            email_status,
            email_source,
            linkedin: decision_maker.linkedin,
            company_domain: decision_maker.company_domain,
        }
    }
}

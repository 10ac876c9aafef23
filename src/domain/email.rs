use std::fmt;

use serde::{Deserialize, Serialize};

/// Returned by the people-search service for contacts whose email has not been unlocked.
pub const LOCKED_EMAIL_PLACEHOLDER: &str = "email_not_unlocked@domain.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailSource {
    Existing,
    FinderService,
    PeopleSearch,
    Pattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailStatus {
    Valid,
    Invalid,
    /// An address was tried but the verifier gave no definitive verdict
    Unknown,
    /// No candidate address could be produced at all
    NotFound,
}

impl EmailStatus {
    /// Maps the verifier's vocabulary onto our statuses.
    pub fn from_verifier(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "valid" | "deliverable" => EmailStatus::Valid,
            "invalid" | "undeliverable" | "disposable" => EmailStatus::Invalid,
            _ => EmailStatus::Unknown,
        }
    }
}

impl fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            EmailStatus::Valid => "valid",
            EmailStatus::Invalid => "invalid",
            EmailStatus::Unknown => "unknown",
            EmailStatus::NotFound => "not_found",
        };
        f.write_str(status)
    }
}

/// `false` for absent, blank and placeholder addresses.
pub fn is_usable_email(email: Option<&str>) -> bool {
    match email.map(str::trim) {
        None | Some("") => false,
        Some(email) => !email.eq_ignore_ascii_case(LOCKED_EMAIL_PLACEHOLDER),
    }
}

/// A full name split on the first space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    pub first: String,
    pub last: String,
}

impl PersonName {
    pub fn parse(full_name: &str) -> Option<Self> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return None;
        }

        let (first, last) = full_name.split_once(' ').unwrap_or((full_name, ""));
        Some(PersonName {
            first: first.trim().to_string(),
            last: last.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailPattern {
    FirstDotLast,
    First,
    FirstLast,
    FirstUnderscoreLast,
    FirstDashLast,
}

/// Tried in this order; the first one the verifier accepts wins.
pub const EMAIL_PATTERNS: [EmailPattern; 5] = [
    EmailPattern::FirstDotLast,
    EmailPattern::First,
    EmailPattern::FirstLast,
    EmailPattern::FirstUnderscoreLast,
    EmailPattern::FirstDashLast,
];

impl EmailPattern {
    fn needs_last_name(&self) -> bool {
        !matches!(self, EmailPattern::First)
    }

    fn local_part(&self, first: &str, last: &str) -> String {
        match self {
            EmailPattern::FirstDotLast => format!("{}.{}", first, last),
            EmailPattern::First => first.to_string(),
            EmailPattern::FirstLast => format!("{}{}", first, last),
            EmailPattern::FirstUnderscoreLast => format!("{}_{}", first, last),
            EmailPattern::FirstDashLast => format!("{}-{}", first, last),
        }
    }
}

fn email_local_token(part: &str) -> String {
    part.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Candidate addresses for `name` at `domain`, in pattern order.
pub fn construct_email_permutations(name: &PersonName, domain: &str) -> Vec<String> {
    let first = email_local_token(&name.first);
    let last = email_local_token(&name.last);
    let domain = domain.trim().to_lowercase();

    if first.is_empty() || domain.is_empty() {
        return vec![];
    }

    EMAIL_PATTERNS
        .iter()
        .filter(|pattern| !last.is_empty() || !pattern.needs_last_name())
        .map(|pattern| format!("{}@{}", pattern.local_part(&first, &last), domain))
        .collect()
}

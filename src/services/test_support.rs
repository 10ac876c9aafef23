//! Stub providers and a throwaway HTTP server for tests.

use std::{
    collections::{HashSet, VecDeque},
    net::TcpListener,
    sync::Mutex,
    time::Duration,
};

use actix_web::{web, App, HttpServer};
use async_trait::async_trait;

use crate::{
    domain::{company::Company, email::EmailStatus, provider::Provider},
    error::ProviderError,
};

use super::{
    CompanyPage, CompanySearch, EmailFinder, EmailVerifier, HttpRetryClient, PeopleQuery,
    PeopleSearch, Person, RetryPolicy,
};

/// Serves whatever `configure` registers on a random local port, returns its base url.
pub fn spawn_stub<F>(configure: F) -> String
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let server = HttpServer::new(move || App::new().configure(configure.clone()))
        .workers(1)
        .listen(listener)
        .expect("Failed to listen on stub port")
        .run();
    tokio::spawn(server);

    format!("http://127.0.0.1:{}", port)
}

pub fn instant_http_client() -> HttpRetryClient {
    let policy = RetryPolicy {
        max_attempts: 3,
        backoff_base: Duration::ZERO,
        max_wait: Duration::ZERO,
    };
    HttpRetryClient::new(Duration::from_secs(5), policy).unwrap()
}

fn stub_failure(provider: Provider) -> ProviderError {
    ProviderError::ClientOrServer {
        provider,
        status: 500,
        body: "stub failure".to_string(),
    }
}

pub fn company(name: &str, website_url: Option<&str>, term: &str) -> Company {
    Company {
        name: Some(name.to_string()),
        description: None,
        location: None,
        linkedin: None,
        twitter: None,
        website_url: website_url.map(str::to_string),
        permalink: None,
        search_term: term.to_string(),
    }
}

pub fn person(name: &str, email: Option<&str>) -> Person {
    Person {
        name: Some(name.to_string()),
        title: Some("CEO".to_string()),
        email: email.map(str::to_string),
        linkedin_url: None,
    }
}

/// Replays scripted pages in order, then reports no results.
pub struct StubCompanySearch {
    pages: Mutex<VecDeque<Result<CompanyPage, ()>>>,
    calls: Mutex<Vec<(String, u32, Option<String>)>>,
}

impl StubCompanySearch {
    pub fn new(pages: Vec<Result<CompanyPage, ()>>) -> Self {
        StubCompanySearch {
            pages: Mutex::new(pages.into()),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> Vec<(String, u32, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompanySearch for StubCompanySearch {
    async fn search_page(
        &self,
        term: &str,
        limit: u32,
        after_id: Option<&str>,
    ) -> Result<CompanyPage, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((term.to_string(), limit, after_id.map(str::to_string)));

        match self.pages.lock().unwrap().pop_front() {
            Some(Ok(page)) => Ok(page),
            Some(Err(())) => Err(stub_failure(Provider::Crunchbase)),
            None => Ok(CompanyPage::default()),
        }
    }
}

pub struct StubPeopleSearch {
    responses: Mutex<VecDeque<Vec<Person>>>,
    fallback: Option<Vec<Person>>,
    calls: Mutex<Vec<PeopleQuery>>,
}

impl StubPeopleSearch {
    /// Same people for every query.
    pub fn returning(people: Vec<Person>) -> Self {
        StubPeopleSearch {
            responses: Mutex::new(VecDeque::new()),
            fallback: Some(people),
            calls: Mutex::new(vec![]),
        }
    }

    /// One response per call, then empty results.
    pub fn sequence(responses: Vec<Vec<Person>>) -> Self {
        StubPeopleSearch {
            responses: Mutex::new(responses.into()),
            fallback: Some(vec![]),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn failing() -> Self {
        StubPeopleSearch {
            responses: Mutex::new(VecDeque::new()),
            fallback: None,
            calls: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> Vec<PeopleQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PeopleSearch for StubPeopleSearch {
    async fn search_people(&self, query: &PeopleQuery) -> Result<Vec<Person>, ProviderError> {
        self.calls.lock().unwrap().push(query.clone());

        if let Some(people) = self.responses.lock().unwrap().pop_front() {
            return Ok(people);
        }
        self.fallback
            .clone()
            .ok_or_else(|| stub_failure(Provider::Apollo))
    }
}

pub struct StubEmailFinder {
    email: Result<Option<String>, ()>,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl StubEmailFinder {
    pub fn returning(email: Option<&str>) -> Self {
        StubEmailFinder {
            email: Ok(email.map(str::to_string)),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn failing() -> Self {
        StubEmailFinder {
            email: Err(()),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailFinder for StubEmailFinder {
    async fn find_email(
        &self,
        first_name: &str,
        last_name: &str,
        domain: &str,
    ) -> Result<Option<String>, ProviderError> {
        self.calls.lock().unwrap().push((
            first_name.to_string(),
            last_name.to_string(),
            domain.to_string(),
        ));

        self.email
            .clone()
            .map_err(|_| stub_failure(Provider::Hunter))
    }
}

enum Verdicts {
    Accepting(HashSet<String>),
    Always(EmailStatus),
    Unavailable,
}

pub struct StubEmailVerifier {
    verdicts: Verdicts,
    calls: Mutex<Vec<String>>,
}

impl StubEmailVerifier {
    /// `valid` for the listed addresses, `invalid` for everything else.
    pub fn accepting(emails: &[&str]) -> Self {
        Self::with(Verdicts::Accepting(
            emails.iter().map(|e| e.to_string()).collect(),
        ))
    }

    pub fn always(status: EmailStatus) -> Self {
        Self::with(Verdicts::Always(status))
    }

    pub fn unavailable() -> Self {
        Self::with(Verdicts::Unavailable)
    }

    fn with(verdicts: Verdicts) -> Self {
        StubEmailVerifier {
            verdicts,
            calls: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailVerifier for StubEmailVerifier {
    async fn verify_email(&self, email: &str) -> Result<EmailStatus, ProviderError> {
        self.calls.lock().unwrap().push(email.to_string());

        match &self.verdicts {
            Verdicts::Accepting(valid) if valid.contains(email) => Ok(EmailStatus::Valid),
            Verdicts::Accepting(_) => Ok(EmailStatus::Invalid),
            Verdicts::Always(status) => Ok(*status),
            Verdicts::Unavailable => Err(ProviderError::VerificationUnavailable {
                provider: Provider::Hunter,
                email: email.to_string(),
                source: Box::new(stub_failure(Provider::Hunter)),
            }),
        }
    }
}

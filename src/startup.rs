use std::{net::TcpListener, sync::Arc};

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    configuration::Settings,
    domain::provider::Provider,
    error::ConfigurationError,
    routes::{default_route, prospect_route},
    services::{
        ApolloClient, CompanyDiscovery, ContactDiscovery, ContactFilter, CrunchbaseClient,
        EmailResolution, HttpRetryClient, HunterClient, Prospector,
    },
};

/// Wires the provider clients and pipeline stages. Fails when a credential is missing.
pub fn build_prospector(settings: &Settings) -> Result<Prospector, ConfigurationError> {
    let crunchbase_key = settings.api_keys.require(Provider::Crunchbase)?;
    let apollo_key = settings.api_keys.require(Provider::Apollo)?;
    let hunter_key = settings.api_keys.require(Provider::Hunter)?;

    let http = HttpRetryClient::from_settings(&settings.retry)?;

    let crunchbase = Arc::new(CrunchbaseClient::new(
        http.clone(),
        crunchbase_key,
        settings.endpoints.crunchbase.clone(),
    ));
    let apollo = Arc::new(ApolloClient::new(
        http.clone(),
        apollo_key,
        settings.endpoints.apollo.clone(),
    ));
    let hunter = Arc::new(HunterClient::new(
        http,
        hunter_key,
        settings.endpoints.hunter.clone(),
    ));

    let discovery = &settings.discovery;
    let filter = ContactFilter {
        titles: discovery.contact_titles.clone(),
        seniorities: discovery.contact_seniorities.clone(),
        per_page: discovery.contacts_per_page,
    };

    Ok(Prospector::new(
        CompanyDiscovery::new(crunchbase, discovery.page_size),
        ContactDiscovery::new(apollo.clone(), filter),
        EmailResolution::new(
            hunter.clone(),
            apollo,
            hunter,
            discovery.fallback_per_page,
        ),
        discovery.search_terms.clone(),
        discovery.max_companies,
    ))
}

pub fn run(
    listener: TcpListener,
    prospector: web::Data<Prospector>,
) -> Result<Server, std::io::Error> {
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::default)
            .service(
                web::scope("/prospect")
                    .service(prospect_route::run_pipeline)
                    .service(prospect_route::discover_companies)
                    .service(prospect_route::discover_contacts)
                    .service(prospect_route::resolve_emails),
            )
            .app_data(prospector.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;

use crate::{
    domain::{company::Company, contact::DecisionMaker},
    services::Prospector,
};

#[derive(Deserialize)]
struct RunPipelineBody {
    #[serde(default)]
    terms: Option<Vec<String>>,
}

/// Runs the whole pipeline. Without `terms` the configured search terms are used.
#[post("/run")]
async fn run_pipeline(
    prospector: web::Data<Prospector>,
    body: web::Json<RunPipelineBody>,
) -> HttpResponse {
    let terms = match body.into_inner().terms {
        Some(terms) => terms,
        None => prospector.default_terms().to_vec(),
    };

    let report = prospector.run(&terms).await;
    HttpResponse::Ok().json(report)
}

#[derive(Deserialize)]
struct DiscoverCompaniesQuery {
    term: String,
}

#[get("/companies")]
async fn discover_companies(
    prospector: web::Data<Prospector>,
    query: web::Query<DiscoverCompaniesQuery>,
) -> HttpResponse {
    let companies = prospector.companies().discover_term(&query.term).await;
    HttpResponse::Ok().json(companies)
}

#[post("/contacts")]
async fn discover_contacts(
    prospector: web::Data<Prospector>,
    body: web::Json<Vec<Company>>,
) -> HttpResponse {
    let decision_makers = prospector.contacts().discover_all(&body).await;
    HttpResponse::Ok().json(decision_makers)
}

#[post("/emails")]
async fn resolve_emails(
    prospector: web::Data<Prospector>,
    body: web::Json<Vec<DecisionMaker>>,
) -> HttpResponse {
    let prospects = prospector.emails().resolve_all(body.into_inner()).await;
    HttpResponse::Ok().json(prospects)
}

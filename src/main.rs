use std::net::TcpListener;

use actix_web::web;
use anyhow::Context;
use env_logger::Env;
use prospector::{
    configuration::get_configuration,
    startup::{build_prospector, run},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;

    let prospector = match build_prospector(&configuration) {
        Ok(p) => p,
        Err(e) => {
            log::error!("Unable to start the prospecting pipeline. Error: {}", e);
            return Err(e.into());
        }
    };

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener =
        TcpListener::bind(&address).with_context(|| format!("Failed to bind {}", address))?;
    log::info!("Listening on {}", address);

    run(listener, web::Data::new(prospector))?.await?;

    Ok(())
}

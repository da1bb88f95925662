use portfolio_config::Config;
use portfolio_di::Provide;
use tracing::{info, warn};

use crate::{
    email,
    environment::{types::RestServer, ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let config_provider = ConfigProvider::new(&config)?;
    if config_provider.simulation_mode() {
        warn!("Mail relay credentials are missing, contact submissions will only be logged");
    }

    info!("Creating smtp transport for {}", config.email.smtp_url);
    let email = email::connect(&config.email)?;

    let mut provider = Provider::new(config_provider, email);
    let server: RestServer = provider.provide();
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}

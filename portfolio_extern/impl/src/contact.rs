use std::sync::Arc;

use portfolio_di::Build;
use portfolio_extern_contracts::ContactApiService;
use portfolio_models::contact::ContactFormData;
use url::Url;

use crate::http::HttpClient;

#[derive(Debug, Clone, Build)]
pub struct ContactApiServiceImpl {
    config: ContactApiServiceConfig,
    #[state]
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ContactApiServiceConfig {
    pub endpoint: Arc<Url>,
}

impl ContactApiServiceImpl {
    pub fn new(config: ContactApiServiceConfig) -> Self {
        Self {
            config,
            client: HttpClient::default(),
        }
    }
}

impl ContactApiService for ContactApiServiceImpl {
    async fn submit(&self, data: &ContactFormData) -> anyhow::Result<()> {
        self.client
            .post((*self.config.endpoint).clone())
            .json(data)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

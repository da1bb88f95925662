use std::sync::Arc;

use anyhow::Context;
use portfolio_config::Config;
use portfolio_core_contact_impl::ContactFeatureConfig;
use portfolio_di::provider;
use portfolio_extern_impl::contact::ContactApiServiceConfig;
use portfolio_models::email_address::EmailAddress;
use types::Email;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        email: Email,
        ..config: ConfigProvider {
            // Extern
            ContactApiServiceConfig,

            // Core
            ContactFeatureConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self {
            _cache: Default::default(),
            email,
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        // Extern
        contact_api_service_config: ContactApiServiceConfig,

        // Core
        contact_feature_config: ContactFeatureConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // Extern
        let contact_api_service_config = ContactApiServiceConfig {
            endpoint: config.form.endpoint.clone().into(),
        };

        // Core
        let account = config
            .email
            .relay()
            .map(|relay| {
                relay
                    .user
                    .parse::<EmailAddress>()
                    .with_context(|| format!("Invalid relay account {:?}", relay.user))
            })
            .transpose()?;

        let contact_feature_config = ContactFeatureConfig {
            account: account.map(Arc::new),
        };

        Ok(Self {
            _cache: Default::default(),

            // Extern
            contact_api_service_config,

            // Core
            contact_feature_config,
        })
    }

    /// Whether contact submissions are only logged instead of emailed.
    pub fn simulation_mode(&self) -> bool {
        self.contact_feature_config.account.is_none()
    }
}

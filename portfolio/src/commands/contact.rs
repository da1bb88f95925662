use anyhow::ensure;
use clap::Subcommand;
use portfolio_config::Config;
use portfolio_di::Provide;
use portfolio_form::{ContactForm, ContactFormConfig, FormField, FormStatus};
use url::Url;

use crate::environment::{types::ContactApi, ConfigProvider};

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Submit the contact form to a running server
    #[command(aliases(["s"]))]
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        mobile: Option<String>,
        #[arg(long)]
        message: String,
        /// Contact endpoint [default: form.endpoint from the config]
        #[arg(long)]
        endpoint: Option<Url>,
    },
}

impl ContactCommand {
    pub async fn invoke(self, mut config: Config) -> anyhow::Result<()> {
        match self {
            ContactCommand::Send {
                name,
                email,
                mobile,
                message,
                endpoint,
            } => {
                if let Some(endpoint) = endpoint {
                    config.form.endpoint = endpoint;
                }

                let api: ContactApi = ConfigProvider::new(&config)?.provide();
                let form = ContactForm::new(
                    api,
                    ContactFormConfig {
                        error_reset_delay: config.form.error_reset_delay.into(),
                    },
                );

                form.set_field(FormField::Name, name);
                form.set_field(FormField::Email, email);
                form.set_field(FormField::Mobile, mobile.unwrap_or_default());
                form.set_field(FormField::Message, message);

                let status = form.submit().await;
                println!("{status:?}");
                ensure!(
                    status == FormStatus::Success,
                    "Failed to submit contact form to {}",
                    config.form.endpoint
                );

                Ok(())
            }
        }
    }
}

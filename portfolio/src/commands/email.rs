use anyhow::{ensure, Context};
use clap::Subcommand;
use portfolio_config::Config;
use portfolio_email_contracts::{Email, EmailBody, EmailService};
use portfolio_models::email_address::{EmailAddress, EmailAddressWithName};
use tracing::info;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let relay = config
        .email
        .relay()
        .context("Mail relay credentials are not configured")?;
    let sender = relay
        .user
        .parse::<EmailAddress>()
        .with_context(|| format!("Invalid relay account {:?}", relay.user))?;

    let email_service = email::connect(&config.email)?;

    info!("Verifying smtp connection");
    email_service.verify().await?;

    let ok = email_service
        .send(Email {
            sender: sender.into(),
            recipient,
            subject: "Email Deliverability Test".into(),
            body: EmailBody::Text("Email deliverability seems to be working!".into()),
            reply_to: None,
        })
        .await?;

    ensure!(ok, "Failed to send email");
    info!("Test email sent");

    Ok(())
}

use anyhow::Context;
use portfolio_config::EmailConfig;
use portfolio_email_impl::EmailServiceImpl;

/// Create the SMTP transport, authenticated with the relay account if one is
/// configured.
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    let credentials = config.relay().map(|relay| (relay.user, relay.password));

    EmailServiceImpl::new(&config.smtp_url, credentials).context("Failed to create SMTP transport")
}

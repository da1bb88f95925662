use anyhow::anyhow;
use lettre::{
    message::{header::ContentType, MessageBuilder, MultiPart},
    transport::smtp::{authentication::Credentials, AsyncSmtpTransportBuilder},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use portfolio_email_contracts::{Email, EmailBody, EmailService};
use portfolio_utils::Apply;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailServiceImpl {
    /// Create a pooled SMTP transport for `url`.
    ///
    /// No connection is opened until the first email is sent or
    /// [`EmailService::verify`] is called.
    pub fn new(url: &str, credentials: Option<(String, String)>) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?
            .apply_map(
                credentials.map(|(user, password)| Credentials::new(user, password)),
                AsyncSmtpTransportBuilder::credentials,
            )
            .build();

        Ok(Self { transport })
    }

    #[cfg(feature = "dummy")]
    pub fn dummy() -> Self {
        Self::new("smtp://dummy", None).unwrap()
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let message = build_message(email)?;

        let response = self.transport.send(message).await?;
        debug!(code = %response.code(), "smtp server answered");

        Ok(response.is_positive())
    }

    async fn verify(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to verify connection to smtp server"))
    }
}

fn build_message(email: Email) -> anyhow::Result<Message> {
    let builder = Message::builder()
        .from(email.sender.0)
        .to(email.recipient.0)
        .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
        .subject(email.subject);

    let message = match email.body {
        EmailBody::Text(body) => builder.header(ContentType::TEXT_PLAIN).body(body)?,
        EmailBody::Alternative { text, html } => {
            builder.multipart(MultiPart::alternative_plain_html(text, html))?
        }
    };

    Ok(message)
}

use std::sync::Arc;

use anyhow::anyhow;
use portfolio_core_contact_contracts::{
    ContactFeatureService, ContactSubmitError, ContactSubmitOutcome,
};
use portfolio_di::Build;
use portfolio_email_contracts::{Email, EmailBody, EmailService};
use portfolio_models::{
    contact::ContactSubmission,
    email_address::{EmailAddress, EmailAddressWithName},
};
use portfolio_templates_contracts::{ContactEmailTemplate, TemplateService};
use tracing::{info, warn};

#[derive(Debug, Clone, Build)]
pub struct ContactFeatureServiceImpl<Email, Template> {
    email: Email,
    template: Template,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// The relay account. Contact emails are sent from and to this address.
    /// `None` enables simulation mode.
    pub account: Option<Arc<EmailAddress>>,
}

impl<EmailS, TemplateS> ContactFeatureService for ContactFeatureServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn submit(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactSubmitOutcome, ContactSubmitError> {
        let Some(account) = &self.config.account else {
            warn!("mail relay credentials are not configured, email will not be sent");
            info!(
                name = %submission.name,
                email = %submission.email,
                message = %submission.message,
                "simulating contact email"
            );
            return Ok(ContactSubmitOutcome::Simulated);
        };

        self.email
            .verify()
            .await
            .map_err(ContactSubmitError::Transport)?;
        info!("smtp connection verified");

        let email = self
            .compose(account, submission)
            .map_err(ContactSubmitError::Delivery)?;

        match self.email.send(email).await {
            Ok(true) => Ok(ContactSubmitOutcome::Sent),
            Ok(false) => Err(ContactSubmitError::Delivery(anyhow!(
                "mail relay did not accept the message"
            ))),
            Err(err) => Err(ContactSubmitError::Delivery(err)),
        }
    }
}

impl<EmailS, TemplateS> ContactFeatureServiceImpl<EmailS, TemplateS>
where
    TemplateS: TemplateService,
{
    fn compose(
        &self,
        account: &EmailAddress,
        submission: ContactSubmission,
    ) -> anyhow::Result<Email> {
        let reply_to = match submission.email.parse::<EmailAddress>() {
            Ok(address) => Some(EmailAddressWithName::from(address)),
            Err(err) => {
                warn!(
                    email = %submission.email,
                    "submitter address cannot be used as reply-to: {err}"
                );
                None
            }
        };

        let rendered = self.template.render(&ContactEmailTemplate {
            name: submission.name.to_string(),
            email: submission.email.to_string(),
            mobile: submission.mobile_or_default().to_owned(),
            message: submission.message.to_string(),
        })?;

        Ok(Email {
            sender: account.clone().into(),
            recipient: account.clone().into(),
            subject: format!("Portfolio Contact: {}", submission.name),
            body: EmailBody::Alternative {
                text: rendered.text,
                html: rendered.html,
            },
            reply_to,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::future::ready;

    use portfolio_email_contracts::MockEmailService;
    use portfolio_templates_contracts::{MockTemplateService, RenderedTemplate};
    use portfolio_templates_impl::TemplateServiceImpl;
    use portfolio_utils::assert_matches;

    use super::*;

    fn configured() -> ContactFeatureConfig {
        ContactFeatureConfig {
            account: Some(Arc::new("owner@example.com".parse().unwrap())),
        }
    }

    fn unconfigured() -> ContactFeatureConfig {
        ContactFeatureConfig { account: None }
    }

    fn submission(mobile: Option<&str>) -> ContactSubmission {
        ContactSubmission::new(
            Some("Ada".into()),
            Some("ada@example.com".into()),
            mobile.map(Into::into),
            Some("Hello".into()),
        )
        .unwrap()
    }

    fn owner() -> EmailAddressWithName {
        "owner@example.com".parse().unwrap()
    }

    fn expected_email(mobile: &str) -> Email {
        let rendered = TemplateServiceImpl::default()
            .render(&ContactEmailTemplate {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                mobile: mobile.into(),
                message: "Hello".into(),
            })
            .unwrap();

        Email {
            sender: owner(),
            recipient: owner(),
            subject: "Portfolio Contact: Ada".into(),
            body: EmailBody::Alternative {
                text: rendered.text,
                html: rendered.html,
            },
            reply_to: Some("ada@example.com".parse().unwrap()),
        }
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let email = MockEmailService::new()
            .with_verify(true)
            .with_send(expected_email("+49 123 456"), true);

        let sut = ContactFeatureServiceImpl {
            email,
            template: TemplateServiceImpl::default(),
            config: configured(),
        };

        // Act
        let result = sut.submit(submission(Some("+49 123 456"))).await;

        // Assert
        assert_matches!(result, Ok(ContactSubmitOutcome::Sent));
    }

    #[tokio::test]
    async fn ok_without_mobile() {
        // Arrange
        let mut email = MockEmailService::new().with_verify(true);
        email
            .expect_send()
            .once()
            .withf(|email| {
                let EmailBody::Alternative { text, html } = &email.body else {
                    return false;
                };
                email.reply_to == Some("ada@example.com".parse().unwrap())
                    && email.subject.contains("Ada")
                    && text.contains("Mobile: Not provided")
                    && text.contains("Hello")
                    && html.contains("Not provided")
                    && html.contains("Hello")
            })
            .return_once(|_| Box::pin(ready(Ok(true))));

        let sut = ContactFeatureServiceImpl {
            email,
            template: TemplateServiceImpl::default(),
            config: configured(),
        };

        // Act
        let result = sut.submit(submission(None)).await;

        // Assert
        assert_matches!(result, Ok(ContactSubmitOutcome::Sent));
    }

    #[tokio::test]
    async fn simulation_mode() {
        // Arrange
        let sut = ContactFeatureServiceImpl {
            email: MockEmailService::new(),
            template: MockTemplateService::new(),
            config: unconfigured(),
        };

        // Act
        let result = sut.submit(submission(None)).await;

        // Assert
        assert_matches!(result, Ok(ContactSubmitOutcome::Simulated));
    }

    #[tokio::test]
    async fn verify_failed() {
        // Arrange
        let sut = ContactFeatureServiceImpl {
            email: MockEmailService::new().with_verify(false),
            template: MockTemplateService::new(),
            config: configured(),
        };

        // Act
        let result = sut.submit(submission(None)).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::Transport(_)));
    }

    #[tokio::test]
    async fn send_failed() {
        // Arrange
        let sut = ContactFeatureServiceImpl {
            email: MockEmailService::new().with_verify(true).with_send_error(),
            template: TemplateServiceImpl::default(),
            config: configured(),
        };

        // Act
        let result = sut.submit(submission(None)).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::Delivery(_)));
    }

    #[tokio::test]
    async fn send_rejected() {
        // Arrange
        let email = MockEmailService::new()
            .with_verify(true)
            .with_send(expected_email("Not provided"), false);

        let sut = ContactFeatureServiceImpl {
            email,
            template: TemplateServiceImpl::default(),
            config: configured(),
        };

        // Act
        let result = sut.submit(submission(None)).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::Delivery(_)));
    }

    #[tokio::test]
    async fn unparsable_reply_to_is_omitted() {
        // Arrange
        let mut email = MockEmailService::new().with_verify(true);
        email
            .expect_send()
            .once()
            .withf(|email| {
                let EmailBody::Alternative { text, html } = &email.body else {
                    return false;
                };
                email.reply_to.is_none()
                    && email.recipient == owner()
                    && text.contains("Email: ada(at)example.com")
                    && html.contains("ada(at)example.com")
            })
            .return_once(|_| Box::pin(ready(Ok(true))));

        let sut = ContactFeatureServiceImpl {
            email,
            template: TemplateServiceImpl::default(),
            config: configured(),
        };

        let submission = ContactSubmission::new(
            Some("Ada".into()),
            Some("ada(at)example.com".into()),
            None,
            Some("Hello".into()),
        )
        .unwrap();

        // Act
        let result = sut.submit(submission).await;

        // Assert
        assert_matches!(result, Ok(ContactSubmitOutcome::Sent));
    }

    #[tokio::test]
    async fn render_failed() {
        // Arrange
        let template = MockTemplateService::new().with_render(
            ContactEmailTemplate {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                mobile: "Not provided".into(),
                message: "Hello".into(),
            },
            None::<RenderedTemplate>,
        );

        let sut = ContactFeatureServiceImpl {
            email: MockEmailService::new().with_verify(true),
            template,
            config: configured(),
        };

        // Act
        let result = sut.submit(submission(None)).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::Delivery(_)));
    }

    #[tokio::test]
    async fn no_deduplication() {
        // Arrange
        let mut email = MockEmailService::new();
        email
            .expect_verify()
            .times(2)
            .returning(|| Box::pin(ready(Ok(()))));
        email
            .expect_send()
            .times(2)
            .withf(|email| *email == expected_email("Not provided"))
            .returning(|_| Box::pin(ready(Ok(true))));

        let sut = ContactFeatureServiceImpl {
            email,
            template: TemplateServiceImpl::default(),
            config: configured(),
        };

        // Act
        let first = sut.submit(submission(None)).await;
        let second = sut.submit(submission(None)).await;

        // Assert
        assert_matches!(first, Ok(ContactSubmitOutcome::Sent));
        assert_matches!(second, Ok(ContactSubmitOutcome::Sent));
    }
}

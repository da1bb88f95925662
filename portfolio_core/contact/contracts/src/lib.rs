use std::future::Future;

use portfolio_models::contact::ContactSubmission;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Relay a contact submission to the site owner.
    ///
    /// Exactly one delivery attempt is made per call. If no relay account is
    /// configured, nothing is sent and [`ContactSubmitOutcome::Simulated`] is
    /// returned.
    fn submit(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<ContactSubmitOutcome, ContactSubmitError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSubmitOutcome {
    Sent,
    Simulated,
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("Failed to verify the connection to the mail relay.")]
    Transport(#[source] anyhow::Error),
    #[error("Failed to send the contact email.")]
    Delivery(#[source] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        submission: ContactSubmission,
        result: Result<ContactSubmitOutcome, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}

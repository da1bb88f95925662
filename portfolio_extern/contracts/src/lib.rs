use std::future::Future;

use portfolio_models::contact::ContactFormData;

/// Client side of the contact endpoint.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactApiService: Send + Sync + 'static {
    /// Post the form data once. Any non-2xx answer is an error.
    fn submit(&self, data: &ContactFormData) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockContactApiService {
    pub fn with_submit(mut self, data: ContactFormData, ok: bool) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(data))
            .return_once(move |_| {
                Box::pin(std::future::ready(if ok {
                    Ok(())
                } else {
                    Err(anyhow::anyhow!("HTTP status server error (500 Internal Server Error)"))
                }))
            });
        self
    }
}

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, response::Response, routing, Router};
use portfolio_core_contact_contracts::{
    ContactFeatureService, ContactSubmitError, ContactSubmitOutcome,
};
use portfolio_models::contact::ContactSubmission;

use super::{error, message, send_failed};
use crate::models::contact::ApiContactSubmission;

pub const CONTACT_ROUTE: &str = "/api/contact";

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route(CONTACT_ROUTE, routing::post(submit))
        .with_state(service)
}

async fn submit(service: State<Arc<impl ContactFeatureService>>, body: Bytes) -> Response {
    // The body is parsed as JSON regardless of the content type.
    let payload = match serde_json::from_slice::<ApiContactSubmission>(&body) {
        Ok(payload) => payload,
        Err(err) => return send_failed(err),
    };

    let Ok(submission) = ContactSubmission::try_from(payload) else {
        return error(StatusCode::BAD_REQUEST, "Missing required fields");
    };

    match service.submit(submission).await {
        Ok(ContactSubmitOutcome::Sent) => message("Email sent successfully"),
        Ok(ContactSubmitOutcome::Simulated) => {
            message("Form submitted successfully (Simulation mode)")
        }
        Err(ContactSubmitError::Transport(err)) => {
            tracing::error!("SMTP verification failed: {err:#}");
            error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "SMTP Connection Failed. Check server logs.",
            )
        }
        Err(ContactSubmitError::Delivery(err)) => send_failed(err),
    }
}

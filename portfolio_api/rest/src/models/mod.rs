use serde::Serialize;

pub mod contact;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub message: &'static str,
}

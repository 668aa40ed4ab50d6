use serde::{Deserialize, Serialize};

/// Error body returned by the date test service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorModel {
    pub status: Option<i32>,
    pub message: Option<String>,
}

/// A fully read response, detached from the transport.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}


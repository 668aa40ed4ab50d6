use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::RequestBuilder;

/// Attaches authentication to an outgoing request.
///
/// Implementations fail with `AuthenticationError` when the credential itself
/// is unusable and with `TokenExpiredError` when it has lapsed. Neither is
/// retried by the service client.
#[async_trait]
pub trait Credentials: Send + Sync + std::fmt::Debug {
    async fn sign_request(&self, request: RequestBuilder) -> Result<RequestBuilder>;
}

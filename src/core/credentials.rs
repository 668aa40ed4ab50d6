//! Credential implementations for signing outgoing requests.

use crate::domain::ports::Credentials;
use crate::utils::error::{AuthenticationError, Result, TokenExpiredError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;

/// HTTP Basic authentication.
#[derive(Clone)]
pub struct BasicAuthentication {
    username: String,
    password: String,
}

impl BasicAuthentication {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for BasicAuthentication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthentication")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Credentials for BasicAuthentication {
    async fn sign_request(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        if self.username.trim().is_empty() {
            return Err(AuthenticationError::new("username cannot be empty").into());
        }
        Ok(request.basic_auth(&self.username, Some(&self.password)))
    }
}

/// An already-acquired access token.
#[derive(Clone)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expires_on: Option<DateTime<Utc>>,
}

impl Token {
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "Bearer".to_string(),
            expires_on: None,
        }
    }

    pub fn expires_on(mut self, at: DateTime<Utc>) -> Self {
        self.expires_on = Some(at);
        self
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_on.is_some_and(|at| at <= now)
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

/// Sends `Authorization: <token_type> <access_token>`.
#[derive(Debug, Clone)]
pub struct BasicTokenAuthentication {
    token: Token,
}

impl BasicTokenAuthentication {
    pub fn new(token: Token) -> Self {
        Self { token }
    }
}

#[async_trait]
impl Credentials for BasicTokenAuthentication {
    async fn sign_request(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        if self.token.access_token.trim().is_empty() {
            return Err(AuthenticationError::new("access token cannot be empty").into());
        }
        if let Some(expired_at) = self.token.expires_on.filter(|_| self.token.is_expired_at(Utc::now())) {
            return Err(TokenExpiredError { expired_at }.into());
        }

        let token_type = if self.token.token_type.trim().is_empty() {
            "Bearer"
        } else {
            self.token.token_type.as_str()
        };

        Ok(request.header(
            AUTHORIZATION,
            format!("{} {}", token_type, self.token.access_token),
        ))
    }
}

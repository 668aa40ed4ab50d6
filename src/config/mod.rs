#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::retry::RetryPolicy;
use crate::domain::ports::Credentials;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(100);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings that control how an `AutoRestDateTestService` client is built.
#[derive(Debug, Clone)]
pub struct AutoRestDateTestServiceConfiguration {
    pub base_url: String,
    pub credentials: Option<Arc<dyn Credentials>>,
    pub user_agent: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub retry_policy: RetryPolicy,
    /// Sent with every request.
    pub custom_headers: BTreeMap<String, String>,
}

impl Default for AutoRestDateTestServiceConfiguration {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl AutoRestDateTestServiceConfiguration {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: None,
            user_agent: default_user_agent(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            retry_policy: RetryPolicy::default(),
            custom_headers: BTreeMap::new(),
        }
    }

    pub fn with_credentials(mut self, credentials: impl Credentials + 'static) -> Self {
        self.credentials = Some(Arc::new(credentials));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.insert(name.into(), value.into());
        self
    }

    /// Appends a product token, e.g. `my-app/1.2`, to the user agent.
    pub fn add_user_agent(&mut self, value: &str) {
        let value = value.trim();
        if !value.is_empty() && !self.user_agent.split(' ').any(|token| token == value) {
            self.user_agent = format!("{} {}", self.user_agent, value);
        }
    }
}

impl Validate for AutoRestDateTestServiceConfiguration {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_non_empty_string("user_agent", &self.user_agent)?;
        validation::validate_non_zero_duration("timeout", self.timeout)?;
        validation::validate_non_zero_duration("connect_timeout", self.connect_timeout)?;
        validation::validate_range(
            "retry.backoff_factor",
            self.retry_policy.backoff_factor,
            0.0,
            self.retry_policy.max_backoff.as_secs_f64().max(0.0),
        )?;

        for (name, value) in &self.custom_headers {
            validation::validate_header("custom_headers", name, value)?;
        }

        Ok(())
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

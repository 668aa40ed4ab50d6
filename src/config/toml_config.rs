use super::AutoRestDateTestServiceConfiguration;
use crate::core::credentials::{BasicAuthentication, BasicTokenAuthentication, Token};
use crate::core::retry::RetryPolicy;
use crate::domain::ports::Credentials;
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{validate_required_field, Validate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// On-disk form of the client configuration.
///
/// ```toml
/// [service]
/// base_url = "http://localhost:3000"
/// timeout_seconds = 30
///
/// [retry]
/// max_retries = 2
/// backoff_factor = 0.5
///
/// [credentials]
/// type = "token"
/// access_token = "${DATE_SERVICE_TOKEN}"
///
/// [headers]
/// x-client-name = "nightly-check"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub service: ServiceSection,
    pub retry: Option<RetrySection>,
    pub credentials: Option<CredentialsSection>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceSection {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub connect_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySection {
    pub max_retries: Option<u32>,
    pub backoff_factor: Option<f64>,
    pub max_backoff_seconds: Option<u64>,
    pub retry_statuses: Option<Vec<u16>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CredentialsSection {
    Basic {
        username: Option<String>,
        password: Option<String>,
    },
    Token {
        access_token: Option<String>,
        token_type: Option<String>,
        /// RFC 3339 string, e.g. `"2030-01-01T00:00:00Z"`.
        expires_on: Option<DateTime<Utc>>,
    },
}

impl TomlConfig {
    /// Reads and parses a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClientError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClientError::InvalidConfigValue {
            field: "toml_parsing".to_string(),
            value: String::new(),
            reason: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ClientError::InvalidConfigValue {
            field: "env_substitution".to_string(),
            value: String::new(),
            reason: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Builds a validated client configuration from the file's sections.
    pub fn into_configuration(self) -> Result<AutoRestDateTestServiceConfiguration> {
        let mut config = match &self.service.base_url {
            Some(url) => AutoRestDateTestServiceConfiguration::new(url.clone()),
            None => AutoRestDateTestServiceConfiguration::default(),
        };

        if let Some(user_agent) = &self.service.user_agent {
            config.add_user_agent(user_agent);
        }
        if let Some(secs) = self.service.timeout_seconds {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.service.connect_timeout_seconds {
            config.connect_timeout = Duration::from_secs(secs);
        }

        if let Some(retry) = self.retry {
            let mut policy = RetryPolicy::default();
            if let Some(max_retries) = retry.max_retries {
                policy.max_retries = max_retries;
            }
            if let Some(factor) = retry.backoff_factor {
                policy.backoff_factor = factor;
            }
            if let Some(secs) = retry.max_backoff_seconds {
                policy.max_backoff = Duration::from_secs(secs);
            }
            if let Some(statuses) = retry.retry_statuses {
                policy.retry_statuses = statuses;
            }
            config.retry_policy = policy;
        }

        if let Some(credentials) = self.credentials {
            let credentials: Arc<dyn Credentials> = match credentials {
                CredentialsSection::Basic { username, password } => {
                    let username = validate_required_field("credentials.username", &username)?;
                    Arc::new(BasicAuthentication::new(
                        username.clone(),
                        password.unwrap_or_default(),
                    ))
                }
                CredentialsSection::Token {
                    access_token,
                    token_type,
                    expires_on,
                } => {
                    let access_token =
                        validate_required_field("credentials.access_token", &access_token)?;
                    let mut token = Token::bearer(access_token.clone());
                    if let Some(token_type) = token_type {
                        token.token_type = token_type;
                    }
                    token.expires_on = expires_on;
                    Arc::new(BasicTokenAuthentication::new(token))
                }
            };
            config.credentials = Some(credentials);
        }

        config.custom_headers.extend(self.headers);
        config.validate()?;

        Ok(config)
    }
}

impl AutoRestDateTestServiceConfiguration {
    /// Loads and validates a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        TomlConfig::from_file(path)?.into_configuration()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        TomlConfig::from_toml_str(content)?.into_configuration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AutoRestDateTestServiceConfiguration::from_toml_str("").unwrap();
        assert_eq!(config.base_url, "http://localhost");
        assert_eq!(config.retry_policy, RetryPolicy::default());
    }

    #[test]
    fn test_full_file() {
        let content = r#"
[service]
base_url = "http://localhost:3000"
user_agent = "nightly/2.0"
timeout_seconds = 5

[retry]
max_retries = 1
backoff_factor = 0.1
retry_statuses = [503]

[credentials]
type = "basic"
username = "tester"
password = "pw"

[headers]
x-client-name = "nightly-check"
"#;
        let config = AutoRestDateTestServiceConfiguration::from_toml_str(content).unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(config.user_agent.ends_with(" nightly/2.0"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.retry_policy.max_retries, 1);
        assert_eq!(config.retry_policy.retry_statuses, vec![503]);
        assert!(format!("{:?}", config.credentials).contains("tester"));
        assert_eq!(
            config.custom_headers.get("x-client-name").map(String::as_str),
            Some("nightly-check")
        );
    }

    #[test]
    fn test_unset_env_var_is_left_verbatim() {
        let content = r#"
[service]
base_url = "http://localhost"

[headers]
x-trace = "${AUTOREST_DATE_TEST_SURELY_UNSET_VAR}"
"#;
        let config = TomlConfig::from_toml_str(content).unwrap();
        assert_eq!(
            config.headers.get("x-trace").map(String::as_str),
            Some("${AUTOREST_DATE_TEST_SURELY_UNSET_VAR}")
        );
    }

    #[test]
    fn test_token_credentials_require_access_token() {
        let content = r#"
[credentials]
type = "token"
"#;
        let err = AutoRestDateTestServiceConfiguration::from_toml_str(content).unwrap_err();
        assert!(matches!(err, ClientError::MissingConfig { ref field } if field == "credentials.access_token"));
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = TomlConfig::from_toml_str("[service\nbase_url = 1").unwrap_err();
        assert!(matches!(err, ClientError::InvalidConfigValue { ref field, .. } if field == "toml_parsing"));
    }
}

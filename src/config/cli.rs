use super::AutoRestDateTestServiceConfiguration;
use crate::core::credentials::{BasicAuthentication, BasicTokenAuthentication, Token};
use crate::utils::error::{ClientError, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "date-test-client")]
#[command(about = "Call the AutoRest date test service")]
pub struct CliConfig {
    /// Service base URL; overrides the config file
    #[arg(long)]
    pub base_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, requires = "password", conflicts_with = "token")]
    pub username: Option<String>,

    #[arg(long, requires = "username")]
    pub password: Option<String>,

    /// Bearer token sent as `Authorization: Bearer <token>`
    #[arg(long)]
    pub token: Option<String>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Retries on transient failures
    #[arg(long)]
    pub retries: Option<u32>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: DateCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum DateCommand {
    GetNull,
    GetInvalid,
    GetOverflow,
    GetUnderflow,
    GetMax,
    GetMin,
    PutMax {
        #[arg(long, default_value = "9999-12-31")]
        date: NaiveDate,
    },
    PutMin {
        #[arg(long, default_value = "0001-01-01")]
        date: NaiveDate,
    },
}

impl CliConfig {
    /// Config file first, then command line overrides.
    pub fn to_configuration(&self) -> Result<AutoRestDateTestServiceConfiguration> {
        let mut config = match &self.config {
            Some(path) => AutoRestDateTestServiceConfiguration::from_file(path)?,
            None => AutoRestDateTestServiceConfiguration::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = self.retries {
            config.retry_policy.max_retries = retries;
        }

        match (&self.username, &self.password, &self.token) {
            (Some(username), Some(password), _) => {
                config = config.with_credentials(BasicAuthentication::new(username, password));
            }
            (None, None, Some(token)) => {
                config = config.with_credentials(BasicTokenAuthentication::new(Token::bearer(token)));
            }
            (None, None, None) => {}
            _ => {
                return Err(ClientError::MissingConfig {
                    field: "username/password".to_string(),
                });
            }
        }

        Ok(config)
    }
}

pub mod date_model;

use crate::config::AutoRestDateTestServiceConfiguration;
use crate::core::service_client::ServiceClient;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use date_model::DateModelOperations;

/// Test infrastructure for AutoRest date handling.
#[derive(Debug, Clone)]
pub struct AutoRestDateTestService {
    pub date_model: DateModelOperations,
    client: ServiceClient,
}

impl AutoRestDateTestService {
    /// Validates the configuration and prepares the HTTP stack. No request is
    /// sent until an operation is called.
    pub fn new(config: AutoRestDateTestServiceConfiguration) -> Result<Self> {
        config.validate()?;

        let client = ServiceClient::new(config)?;
        tracing::debug!("date test client ready for {}", client.config().base_url);

        Ok(Self {
            date_model: DateModelOperations::new(client.clone()),
            client,
        })
    }

    pub fn config(&self) -> &AutoRestDateTestServiceConfiguration {
        self.client.config()
    }
}

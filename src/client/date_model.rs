use crate::core::service_client::ServiceClient;
use crate::domain::model::HttpResponse;
use crate::utils::error::{HttpOperationError, Result};
use crate::utils::serialization::{deserialize_date, serialize_date};
use chrono::NaiveDate;
use reqwest::Method;

/// Operations on the `/date` resource of the test service.
#[derive(Debug, Clone)]
pub struct DateModelOperations {
    client: ServiceClient,
}

impl DateModelOperations {
    pub(crate) fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// Get null date value.
    pub async fn get_null(&self) -> Result<Option<NaiveDate>> {
        self.get_date("/date/null").await
    }

    /// Get invalid date value. The service answers with `"201O-18-90"`.
    pub async fn get_invalid_date(&self) -> Result<Option<NaiveDate>> {
        self.get_date("/date/invaliddate").await
    }

    /// Get overflow date value. The service answers with `"10000000000-12-31"`.
    pub async fn get_overflow_date(&self) -> Result<Option<NaiveDate>> {
        self.get_date("/date/overflowdate").await
    }

    /// Get underflow date value. The service answers with `"0000-00-00"`.
    pub async fn get_underflow_date(&self) -> Result<Option<NaiveDate>> {
        self.get_date("/date/underflowdate").await
    }

    /// Put max date value 9999-12-31.
    pub async fn put_max_date(&self, date_body: NaiveDate) -> Result<()> {
        self.put_date("/date/max", date_body).await
    }

    /// Get max date value 9999-12-31.
    pub async fn get_max_date(&self) -> Result<Option<NaiveDate>> {
        self.get_date("/date/max").await
    }

    /// Put min date value 0001-01-01.
    pub async fn put_min_date(&self, date_body: NaiveDate) -> Result<()> {
        self.put_date("/date/min", date_body).await
    }

    /// Get min date value 0001-01-01.
    pub async fn get_min_date(&self) -> Result<Option<NaiveDate>> {
        self.get_date("/date/min").await
    }

    async fn get_date(&self, path: &str) -> Result<Option<NaiveDate>> {
        let response = self.client.send(Method::GET, path, None).await?;
        let response = expect_ok(response)?;
        Ok(deserialize_date(&response.body)?)
    }

    async fn put_date(&self, path: &str, date_body: NaiveDate) -> Result<()> {
        let body = serialize_date(date_body)?;
        let response = self.client.send(Method::PUT, path, Some(&body)).await?;
        expect_ok(response)?;
        Ok(())
    }
}

fn expect_ok(response: HttpResponse) -> std::result::Result<HttpResponse, HttpOperationError> {
    if response.status == 200 {
        return Ok(response);
    }

    let err = HttpOperationError::new(response.status, response.reason, response.body);
    tracing::debug!("operation failed: {}", err);
    Err(err)
}

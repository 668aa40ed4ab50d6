use crate::config::AutoRestDateTestServiceConfiguration;
use crate::domain::model::HttpResponse;
use crate::utils::error::{ClientError, ClientRequestError, Result};
use reqwest::header::{HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Request pipeline shared by every operation group: URL formatting, headers,
/// signing and retries.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    config: AutoRestDateTestServiceConfiguration,
    client: Client,
}

impl ServiceClient {
    /// Builds the HTTP stack. Opens no connections.
    pub fn new(config: AutoRestDateTestServiceConfiguration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ClientRequestError {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(e),
            })?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &AutoRestDateTestServiceConfiguration {
        &self.config
    }

    /// Joins an operation path onto the base URL, keeping any base path prefix.
    pub fn format_url(&self, path: &str) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        Url::parse(&joined).map_err(|e| {
            ClientRequestError::new(format!("Invalid request URL '{}': {}", joined, e)).into()
        })
    }

    async fn build_request(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&str>,
    ) -> Result<RequestBuilder> {
        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(ACCEPT, "application/json");

        for (name, value) in &self.config.custom_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ClientRequestError::new(format!("Invalid header name '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ClientRequestError::new(format!("Invalid header value: {}", e)))?;
            request = request.header(name, value);
        }

        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(body.to_string());
        }

        match &self.config.credentials {
            Some(credentials) => credentials.sign_request(request).await,
            None => Ok(request),
        }
    }

    /// Sends a request, retrying transient failures according to the
    /// configured policy. Non-success statuses are returned, not raised; the
    /// calling operation decides which statuses it accepts.
    pub async fn send(&self, method: Method, path: &str, body: Option<&str>) -> Result<HttpResponse> {
        let url = self.format_url(path)?;
        let policy = &self.config.retry_policy;
        let mut retry = 0;

        loop {
            let request = self.build_request(&method, &url, body).await?;

            tracing::debug!("{} {} (attempt {})", method, url, retry + 1);
            let outcome = request.send().await;

            match outcome {
                Ok(response) => {
                    let status = response.status();
                    tracing::debug!("{} {} -> {}", method, url, status);

                    if policy.should_retry_status(status.as_u16()) && retry < policy.max_retries {
                        retry += 1;
                        let delay = policy.delay_for_retry(retry);
                        tracing::warn!(
                            "{} {} returned {}, retrying in {:?} ({}/{})",
                            method,
                            url,
                            status,
                            delay,
                            retry,
                            policy.max_retries
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    let body = response.text().await.map_err(ClientError::from)?;

                    return Ok(HttpResponse {
                        status: status.as_u16(),
                        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                        body,
                    });
                }
                Err(e) => {
                    let err = ClientRequestError::from(e);
                    if err.is_transient() && retry < policy.max_retries {
                        retry += 1;
                        let delay = policy.delay_for_retry(retry);
                        tracing::warn!(
                            "{} {} failed: {}, retrying in {:?} ({}/{})",
                            method,
                            url,
                            err,
                            delay,
                            retry,
                            policy.max_retries
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    tracing::debug!("{} {} failed: {}", method, url, err);
                    return Err(err.into());
                }
            }
        }
    }
}

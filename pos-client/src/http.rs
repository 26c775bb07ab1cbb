//! HTTP client for the POS server endpoints

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::order::OrderSubmission;
use shared::table::TableSnapshot;

/// HTTP client for the polling and submission endpoints
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut request = self.client.request(method, self.url(path));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// GET and decode a JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        let response = Self::check_status(response).await?;
        response.json().await.map_err(Into::into)
    }

    /// GET a text body (HTML fragments)
    pub async fn get_text(&self, path: &str) -> ClientResult<String> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        let response = Self::check_status(response).await?;
        response.text().await.map_err(Into::into)
    }

    /// Map non-success statuses to client errors
    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        match status {
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
            StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
            _ => Err(ClientError::Internal(text)),
        }
    }

    // ========== Polling endpoints ==========

    /// Tables with open orders
    pub async fn fetch_occupied_tables(&self) -> ClientResult<TableSnapshot> {
        self.get_json("fetch/service").await
    }

    /// Rendered body of a bar's order feed
    pub async fn fetch_bar_fragment(&self, bar: &str) -> ClientResult<String> {
        self.get_text(&format!("fetch/bar/{bar}")).await
    }

    // ========== Orders ==========

    /// Post a new order for `submission.table`
    pub async fn submit_order(&self, submission: &OrderSubmission) -> ClientResult<()> {
        let path = format!("service/{}", submission.table);
        let response = self
            .request(reqwest::Method::POST, &path)
            .json(submission)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = HttpClient::new(&ClientConfig::new("http://pos.local/")).unwrap();
        assert_eq!(client.url("/fetch/service"), "http://pos.local/fetch/service");
        assert_eq!(client.url("fetch/bar/Drinks"), "http://pos.local/fetch/bar/Drinks");
    }

    #[test]
    fn test_token() {
        let client = HttpClient::new(&ClientConfig::default()).unwrap();
        assert!(client.token().is_none());
        let client = client.with_token("abc");
        assert_eq!(client.token(), Some("abc"));
    }
}

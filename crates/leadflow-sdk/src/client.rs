//! Leadflow API client implementation

use crate::error::{LeadflowError, Result};
use crate::models::*;
use leadflow_webhook::WebhookRecord;
use reqwest::{header, Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::instrument;
use url::Url;

/// Fallback shown when an error response carries no usable message.
const GENERIC_ERROR: &str = "Something went wrong";

/// Client for the Leadflow REST API
#[derive(Clone)]
pub struct LeadflowClient {
    http: Client,
    base_url: Url,
    api_key: Option<Secret<String>>,
}

impl std::fmt::Debug for LeadflowClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadflowClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Builder for creating a LeadflowClient
#[derive(Default)]
pub struct LeadflowClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl LeadflowClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL for the API
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key for authentication
    pub fn api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<LeadflowClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| "http://localhost:5000".to_string());

        let base_url = Url::parse(&base_url)?;

        let timeout = self.timeout.unwrap_or(Duration::from_secs(30));
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("leadflow-sdk/{}", env!("CARGO_PKG_VERSION")));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(LeadflowError::Http)?;

        Ok(LeadflowClient {
            http,
            base_url,
            api_key: self.api_key.map(Secret::new),
        })
    }
}

impl LeadflowClient {
    /// Create a new client builder
    pub fn builder() -> LeadflowClientBuilder {
        LeadflowClientBuilder::new()
    }

    /// Create a client with default settings
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a URL for an endpoint
    fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(LeadflowError::Url)
    }

    /// Add authentication header if API key is set
    fn auth_header(&self) -> Option<String> {
        self.api_key
            .as_ref()
            .map(|key| format!("Bearer {}", key.expose_secret()))
    }

    /// Decode a response, mapping non-2xx bodies onto the error taxonomy
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(LeadflowError::Http)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Self::error_from(status, &body))
        }
    }

    /// Error responses carry `{ "error": "..." }`; anything else falls back
    /// to a generic message.
    fn error_from(status: StatusCode, body: &str) -> LeadflowError {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .map(|body| body.error)
            .unwrap_or_else(|_| GENERIC_ERROR.to_string());

        match status {
            StatusCode::NOT_FOUND => LeadflowError::NotFound(message),
            _ => LeadflowError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    // ===== Webhooks API =====

    /// List all configured webhooks
    #[instrument(skip(self))]
    pub async fn list_webhooks(&self) -> Result<Vec<WebhookRecord>> {
        let mut req = self.http.get(self.url("/api/settings/webhooks")?);

        if let Some(auth) = self.auth_header() {
            req = req.header(header::AUTHORIZATION, auth);
        }

        let response = req.send().await.map_err(LeadflowError::Http)?;
        let list: WebhookList = self.handle_response(response).await?;
        Ok(list.webhooks)
    }

    /// Create a webhook. The record is sent without an `id`; the saved
    /// record comes back either directly or enveloped and is normalized
    /// before returning.
    #[instrument(skip(self, record))]
    pub async fn create_webhook(&self, record: &WebhookRecord) -> Result<WebhookRecord> {
        let mut req = self
            .http
            .post(self.url("/api/settings/webhooks")?)
            .json(record);

        if let Some(auth) = self.auth_header() {
            req = req.header(header::AUTHORIZATION, auth);
        }

        let response = req.send().await.map_err(LeadflowError::Http)?;
        let saved: SavedWebhook = self.handle_response(response).await?;
        Ok(saved.into_record())
    }

    /// Update an existing webhook in place
    #[instrument(skip(self, record))]
    pub async fn update_webhook(&self, record: &WebhookRecord) -> Result<WebhookRecord> {
        if !record.is_persisted() {
            return Err(LeadflowError::InvalidInput(
                "webhook has no id; create it instead".to_string(),
            ));
        }
        let id = record.id.as_deref().unwrap_or_default();

        let mut req = self
            .http
            .put(self.url(&format!("/api/settings/webhooks/{id}"))?)
            .json(record);

        if let Some(auth) = self.auth_header() {
            req = req.header(header::AUTHORIZATION, auth);
        }

        let response = req.send().await.map_err(LeadflowError::Http)?;
        let saved: SavedWebhook = self.handle_response(response).await?;
        Ok(saved.into_record())
    }

    /// Delete a webhook by id
    #[instrument(skip(self))]
    pub async fn delete_webhook(&self, id: &str) -> Result<()> {
        let mut req = self
            .http
            .delete(self.url(&format!("/api/settings/webhooks/{id}"))?);

        if let Some(auth) = self.auth_header() {
            req = req.header(header::AUTHORIZATION, auth);
        }

        let response = req.send().await.map_err(LeadflowError::Http)?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(Self::error_from(status, &body))
        }
    }

    // ===== Contacts API =====

    /// List contacts
    #[instrument(skip(self))]
    pub async fn list_contacts(&self) -> Result<Vec<Contact>> {
        let mut req = self.http.get(self.url("/api/contacts")?);

        if let Some(auth) = self.auth_header() {
            req = req.header(header::AUTHORIZATION, auth);
        }

        let response = req.send().await.map_err(LeadflowError::Http)?;
        let list: ContactList = self.handle_response(response).await?;
        Ok(list.contacts)
    }

    /// Create a contact
    #[instrument(skip(self, contact))]
    pub async fn create_contact(&self, contact: &NewContact) -> Result<Contact> {
        let mut req = self.http.post(self.url("/api/contacts")?).json(contact);

        if let Some(auth) = self.auth_header() {
            req = req.header(header::AUTHORIZATION, auth);
        }

        let response = req.send().await.map_err(LeadflowError::Http)?;
        let created: CreatedContact = self.handle_response(response).await?;
        Ok(created.contact)
    }

    // ===== Verification API =====

    /// Queue an email-verification job for the given contacts
    #[instrument(skip(self))]
    pub async fn create_verification_job(&self, contact_ids: &[i64]) -> Result<VerificationJob> {
        if contact_ids.is_empty() {
            return Err(LeadflowError::InvalidInput(
                "Please select at least one contact to verify.".to_string(),
            ));
        }

        let body = serde_json::json!({ "contact_ids": contact_ids });

        let mut req = self
            .http
            .post(self.url("/api/verification/jobs")?)
            .json(&body);

        if let Some(auth) = self.auth_header() {
            req = req.header(header::AUTHORIZATION, auth);
        }

        let response = req.send().await.map_err(LeadflowError::Http)?;
        let created: CreatedJob = self.handle_response(response).await?;
        Ok(created.job)
    }

    /// Trigger a previously created verification job
    #[instrument(skip(self))]
    pub async fn run_verification_job(&self, job_id: &str) -> Result<()> {
        let body = serde_json::json!({ "job_id": job_id });

        let mut req = self
            .http
            .post(self.url("/api/verification/jobs/run")?)
            .json(&body);

        if let Some(auth) = self.auth_header() {
            req = req.header(header::AUTHORIZATION, auth);
        }

        let response = req.send().await.map_err(LeadflowError::Http)?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(Self::error_from(status, &body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header as header_matcher, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn builder_defaults() {
        let client = LeadflowClient::builder()
            .api_key(Some("test-key".to_string()))
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap();

        assert_eq!(client.base_url().as_str(), "http://localhost:5000/");
    }

    #[test]
    fn url_building() {
        let client = LeadflowClient::new("http://localhost:5000").unwrap();
        let url = client.url("/api/settings/webhooks").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/settings/webhooks");
    }

    #[tokio::test]
    async fn list_unwraps_the_webhooks_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/settings/webhooks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "webhooks": [{
                    "id": "wh_1",
                    "url": "https://example.com/hook",
                    "events": ["contact.created"],
                    "headers": "{}"
                }]
            })))
            .mount(&server)
            .await;

        let client = LeadflowClient::new(server.uri()).unwrap();
        let webhooks = client.list_webhooks().await.unwrap();

        assert_eq!(webhooks.len(), 1);
        assert_eq!(webhooks[0].id.as_deref(), Some("wh_1"));
        assert_eq!(webhooks[0].url, "https://example.com/hook");
    }

    #[tokio::test]
    async fn create_sends_no_id_and_normalizes_an_enveloped_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/settings/webhooks"))
            .and(body_json(json!({
                "url": "https://example.com/hook",
                "events": ["contact.created"],
                "headers": "{}"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "webhook": {
                    "id": "wh_new",
                    "url": "https://example.com/hook",
                    "events": ["contact.created"],
                    "headers": "{}"
                }
            })))
            .mount(&server)
            .await;

        let client = LeadflowClient::new(server.uri()).unwrap();
        let record = WebhookRecord {
            id: None,
            url: "https://example.com/hook".to_string(),
            events: vec!["contact.created".to_string()],
            headers: "{}".to_string(),
        };

        let saved = client.create_webhook(&record).await.unwrap();
        assert_eq!(saved.id.as_deref(), Some("wh_new"));
    }

    #[tokio::test]
    async fn create_accepts_a_direct_record_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/settings/webhooks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "wh_direct",
                "url": "https://example.com/hook",
                "events": [],
                "headers": "{}"
            })))
            .mount(&server)
            .await;

        let client = LeadflowClient::new(server.uri()).unwrap();
        let record = WebhookRecord {
            id: None,
            url: "https://example.com/hook".to_string(),
            events: Vec::new(),
            headers: "{}".to_string(),
        };

        let saved = client.create_webhook(&record).await.unwrap();
        assert_eq!(saved.id.as_deref(), Some("wh_direct"));
    }

    #[tokio::test]
    async fn update_requires_an_id() {
        let client = LeadflowClient::new("http://localhost:5000").unwrap();
        let record = WebhookRecord {
            id: None,
            url: "https://example.com/hook".to_string(),
            events: Vec::new(),
            headers: "{}".to_string(),
        };

        let err = client.update_webhook(&record).await.unwrap_err();
        assert!(matches!(err, LeadflowError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn update_puts_to_the_record_path() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/settings/webhooks/wh_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "webhook": {
                    "id": "wh_1",
                    "url": "https://changed.example.com/hook",
                    "events": [],
                    "headers": "{}"
                }
            })))
            .mount(&server)
            .await;

        let client = LeadflowClient::new(server.uri()).unwrap();
        let record = WebhookRecord {
            id: Some("wh_1".to_string()),
            url: "https://changed.example.com/hook".to_string(),
            events: Vec::new(),
            headers: "{}".to_string(),
        };

        let saved = client.update_webhook(&record).await.unwrap();
        assert_eq!(saved.url, "https://changed.example.com/hook");
    }

    #[tokio::test]
    async fn delete_succeeds_on_empty_ack() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/settings/webhooks/wh_1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = LeadflowClient::new(server.uri()).unwrap();
        assert!(client.delete_webhook("wh_1").await.is_ok());
    }

    #[tokio::test]
    async fn error_body_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/settings/webhooks"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "error": "database is down" })),
            )
            .mount(&server)
            .await;

        let client = LeadflowClient::new(server.uri()).unwrap();
        let err = client.list_webhooks().await.unwrap_err();

        match err {
            LeadflowError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "database is down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unparseable_error_body_falls_back_to_a_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/settings/webhooks/wh_1"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let client = LeadflowClient::new(server.uri()).unwrap();
        let err = client.delete_webhook("wh_1").await.unwrap_err();

        match err {
            LeadflowError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, GENERIC_ERROR);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn api_key_is_sent_as_a_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/contacts"))
            .and(header_matcher("authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "contacts": [] })))
            .mount(&server)
            .await;

        let client = LeadflowClient::builder()
            .base_url(server.uri())
            .api_key(Some("secret-token".to_string()))
            .build()
            .unwrap();

        assert!(client.list_contacts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_contact_unwraps_the_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/contacts"))
            .and(body_json(json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email_address": "ada@example.com"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "contact": {
                    "contact_id": 7,
                    "first_name": "Ada",
                    "last_name": "Lovelace",
                    "email_address": "ada@example.com",
                    "email_verification_status": "not_verified"
                }
            })))
            .mount(&server)
            .await;

        let client = LeadflowClient::new(server.uri()).unwrap();
        let contact = client
            .create_contact(&NewContact {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email_address: "ada@example.com".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(contact.contact_id, 7);
        assert_eq!(
            contact.email_verification_status.as_deref(),
            Some("not_verified")
        );
    }

    #[tokio::test]
    async fn verification_job_requires_contacts() {
        let client = LeadflowClient::new("http://localhost:5000").unwrap();
        let err = client.create_verification_job(&[]).await.unwrap_err();

        assert!(matches!(err, LeadflowError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn verification_job_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/verification/jobs"))
            .and(body_json(json!({ "contact_ids": [1, 2] })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "job": { "job_id": "job_1", "status": "pending" }
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/verification/jobs/run"))
            .and(body_json(json!({ "job_id": "job_1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .mount(&server)
            .await;

        let client = LeadflowClient::new(server.uri()).unwrap();
        let job = client.create_verification_job(&[1, 2]).await.unwrap();
        assert_eq!(job.job_id, "job_1");

        client.run_verification_job(&job.job_id).await.unwrap();
    }
}

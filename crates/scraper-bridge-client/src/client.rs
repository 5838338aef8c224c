//! Authenticated HTTP client for a single hub.
//!
//! [`HubClient`] prefixes every request with the hub's base URL, attaches the
//! API key as a Basic `Authorization` header and maps non-success statuses to
//! [`FetchError::Status`]. The `*_with_retries` variants wrap a request in the
//! configured [`RetryPolicy`](crate::RetryPolicy).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use scraper_bridge_core::HubIdentity;
use serde::de::DeserializeOwned;

use crate::config::HubClientConfig;
use crate::error::FetchError;
use crate::request::{FetchBody, FetchRequest};

/// HTTP client bound to one hub identity.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HubClient {
    client: reqwest::Client,
    identity: HubIdentity,
    config: HubClientConfig,
    authorization: HeaderValue,
}

impl HubClient {
    /// Create a client for `identity`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the HTTP client cannot be built, or
    /// [`FetchError::InvalidHeader`] if the credentials cannot be used in a
    /// header.
    pub fn new(identity: HubIdentity, config: HubClientConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(FetchError::Client)?;

        Self::with_client(client, identity, config)
    }

    /// Create a client with a custom reqwest client.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidHeader`] if the credentials cannot be used
    /// in a header.
    pub fn with_client(
        client: reqwest::Client,
        identity: HubIdentity,
        config: HubClientConfig,
    ) -> Result<Self, FetchError> {
        let authorization = authorization_header(&identity, config.legacy_auth_header)?;
        Ok(Self {
            client,
            identity,
            config,
            authorization,
        })
    }

    /// The identity this client authenticates as.
    #[must_use]
    pub const fn identity(&self) -> &HubIdentity {
        &self.identity
    }

    /// The hub URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.identity.base_url()
    }

    /// The client settings.
    #[must_use]
    pub const fn config(&self) -> &HubClientConfig {
        &self.config
    }

    /// Send `request` once and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the request fails, the hub answers with a
    /// non-success status, or the response does not decode into `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: &FetchRequest) -> Result<T, FetchError> {
        let body = self.execute(request).await?;
        serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            path: request.path().to_string(),
            source,
        })
    }

    /// Send `request` once and discard the response body.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the request fails or the hub answers with a
    /// non-success status.
    pub async fn send(&self, request: &FetchRequest) -> Result<(), FetchError> {
        self.execute(request).await.map(drop)
    }

    /// Like [`HubClient::fetch`], retried according to the retry policy.
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempt.
    pub async fn fetch_with_retries<T: DeserializeOwned>(
        &self,
        request: &FetchRequest,
    ) -> Result<T, FetchError> {
        self.config.retry.run(|| self.fetch(request)).await
    }

    /// Like [`HubClient::send`], retried according to the retry policy.
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempt.
    pub async fn send_with_retries(&self, request: &FetchRequest) -> Result<(), FetchError> {
        self.config.retry.run(|| self.send(request)).await
    }

    async fn execute(&self, request: &FetchRequest) -> Result<String, FetchError> {
        let method = request.effective_method();
        let url = self.identity.url_for(request.path());

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.authorization.clone());
        if matches!(request.body(), Some(FetchBody::Json(_) | FetchBody::Raw(_))) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        for (name, value) in request.headers() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| FetchError::InvalidHeader(format!("{name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| FetchError::InvalidHeader(format!("{name}: {e}")))?;
            headers.insert(name, value);
        }

        let mut builder = self
            .client
            .request(method.clone(), &url)
            .headers(headers)
            .timeout(request.request_timeout().unwrap_or(self.config.request_timeout));
        if let Some(FetchBody::Multipart(form)) = request.body() {
            builder = builder.multipart(form.to_form()?);
        } else if let Some(body) = request.body_bytes() {
            builder = builder.body(body);
        }

        tracing::debug!(method = %method, path = request.path(), "Sending hub request");

        let transport = |source| FetchError::Transport {
            path: request.path().to_string(),
            source,
        };
        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        let text = response.text().await.map_err(transport)?;

        if status.is_success() {
            Ok(text)
        } else {
            tracing::debug!(
                method = %method,
                path = request.path(),
                status = %status,
                "Hub returned an error status"
            );
            Err(FetchError::Status {
                path: request.path().to_string(),
                status: status.as_u16(),
                body: text,
            })
        }
    }
}

fn authorization_header(identity: &HubIdentity, legacy: bool) -> Result<HeaderValue, FetchError> {
    let pair = format!("{}:{}", identity.key_id(), identity.secret());
    let encoded = if legacy { pair } else { STANDARD.encode(pair) };
    let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
        .map_err(|e| FetchError::InvalidHeader(format!("authorization: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::Method;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::request::MultipartForm;
    use crate::retry::RetryPolicy;

    fn fast_config() -> HubClientConfig {
        HubClientConfig::default().with_retry(RetryPolicy::new(3, Duration::from_millis(5)))
    }

    fn client_for(server: &MockServer) -> HubClient {
        let identity = HubIdentity::new("key", "secret", server.uri()).unwrap();
        HubClient::new(identity, fast_config()).unwrap()
    }

    #[tokio::test]
    async fn sends_basic_auth_and_decodes_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/health"))
            .and(header("Authorization", "Basic a2V5OnNlY3JldA=="))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let body: serde_json::Value = client
            .fetch(&FetchRequest::new("/api/v1/health"))
            .await
            .unwrap();

        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn resolved_key_is_sent_decoded() {
        let server = MockServer::start().await;
        Mock::given(path("/api/v1/health"))
            .and(header("Authorization", "Basic aWQ6YWJjPT0="))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("http://id:abc==@{}", server.address());
        let identity = HubIdentity::resolve("RTCV_SERVER", &url).unwrap();
        let client = HubClient::new(identity, fast_config()).unwrap();

        client.send(&FetchRequest::new("/api/v1/health")).await.unwrap();
    }

    #[tokio::test]
    async fn multipart_body_keeps_its_own_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let form = MultipartForm::new().text("metadata", "{}");
        client_for(&server)
            .send(&FetchRequest::new("/upload").multipart(form))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let content_types: Vec<_> = requests[0].headers.get_all("content-type").iter().collect();
        assert_eq!(content_types.len(), 1);
        assert!(content_types[0]
            .to_str()
            .unwrap()
            .starts_with("multipart/form-data"));
    }

    #[tokio::test]
    async fn legacy_auth_header_is_not_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/health"))
            .and(header("Authorization", "Basic key:secret"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let identity = HubIdentity::new("key", "secret", server.uri()).unwrap();
        let config = HubClientConfig {
            legacy_auth_header: true,
            ..fast_config()
        };
        let client = HubClient::new(identity, config).unwrap();

        client.send(&FetchRequest::new("/api/v1/health")).await.unwrap();
    }

    #[tokio::test]
    async fn body_defaults_to_post_with_json_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/scraper/scanCV"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({"cv": {"referenceNumber": "1"}})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = FetchRequest::new("/api/v1/scraper/scanCV")
            .json(&json!({"cv": {"referenceNumber": "1"}}))
            .unwrap();

        client.send(&request).await.unwrap();
    }

    #[tokio::test]
    async fn caller_headers_override_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/custom"))
            .and(header("Content-Type", "text/plain"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = FetchRequest::new("/custom")
            .method(Method::PUT)
            .raw("hello")
            .header("Content-Type", "text/plain");

        client.send(&request).await.unwrap();
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(path("/api/v1/health"))
            .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"nope"}"#))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .send(&FetchRequest::new("/api/v1/health"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("nope"));
    }

    #[tokio::test]
    async fn undecodable_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(path("/api/v1/health"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .fetch::<serde_json::Value>(&FetchRequest::new("/api/v1/health"))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[tokio::test]
    async fn persistent_failure_is_attempted_four_times() {
        let server = MockServer::start().await;
        Mock::given(path("/api/v1/health"))
            .respond_with(ResponseTemplate::new(500))
            .expect(4)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .send_with_retries(&FetchRequest::new("/api/v1/health"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn success_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(path("/api/v1/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let body: serde_json::Value = client
            .fetch_with_retries(&FetchRequest::new("/api/v1/health"))
            .await
            .unwrap();

        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn per_request_timeout_applies() {
        let server = MockServer::start().await;
        Mock::given(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .send(&FetchRequest::new("/slow").timeout(Duration::from_millis(50)))
            .await
            .unwrap_err();

        assert!(err.is_timeout());
    }
}

//! A single logical request to the hub.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;

use crate::error::FetchError;

/// Body of a hub request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchBody {
    /// A payload already encoded as JSON.
    Json(Vec<u8>),
    /// A string sent verbatim.
    Raw(String),
    /// A `multipart/form-data` form.
    Multipart(MultipartForm),
}

impl FetchBody {
    /// The encoded body, or `None` for multipart forms which are encoded by
    /// the HTTP client.
    fn to_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Self::Json(bytes) => Some(bytes.clone()),
            Self::Raw(text) => Some(text.clone().into_bytes()),
            Self::Multipart(_) => None,
        }
    }
}

/// One field of a [`MultipartForm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPart {
    name: String,
    content: Vec<u8>,
    file_name: Option<String>,
    mime_type: Option<String>,
}

impl MultipartPart {
    /// The form field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw field content.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// The file name, for file fields.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// The content type, for file fields.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }
}

/// A `multipart/form-data` body kept as plain data.
///
/// A fresh [`reqwest::multipart::Form`] is built for every attempt, so the
/// form can be resent by the retrying client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<MultipartPart>,
}

impl MultipartForm {
    /// An empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(MultipartPart {
            name: name.into(),
            content: value.into().into_bytes(),
            file_name: None,
            mime_type: None,
        });
        self
    }

    /// Add a file field.
    #[must_use]
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content: Vec<u8>,
        mime_type: Option<&str>,
    ) -> Self {
        self.parts.push(MultipartPart {
            name: name.into(),
            content,
            file_name: Some(file_name.into()),
            mime_type: mime_type.map(str::to_string),
        });
        self
    }

    /// The fields, in the order they were added.
    #[must_use]
    pub fn parts(&self) -> &[MultipartPart] {
        &self.parts
    }

    pub(crate) fn to_form(&self) -> Result<Form, FetchError> {
        let mut form = Form::new();
        for part in &self.parts {
            let mut field = match &part.file_name {
                Some(file_name) => Part::bytes(part.content.clone()).file_name(file_name.clone()),
                None => Part::text(String::from_utf8_lossy(&part.content).into_owned()),
            };
            if let Some(mime_type) = &part.mime_type {
                field = field
                    .mime_str(mime_type)
                    .map_err(|e| FetchError::InvalidHeader(format!("{}: {e}", part.name)))?;
            }
            form = form.part(part.name.clone(), field);
        }
        Ok(form)
    }
}

/// Describes one request to the hub: path, method, body, extra headers and
/// an optional deadline.
///
/// Requests are cheap to clone so the retrying client can send the same
/// request again.
///
/// # Example
///
/// ```
/// use reqwest::multipart::{Form, Part};
/// use reqwest::Method;
/// use scraper_bridge_client::FetchRequest;
///
/// # fn example() -> Result<(), scraper_bridge_client::FetchError> {
/// let request = FetchRequest::new("/api/v1/scraper/setSlug")
///     .method(Method::PUT)
///     .json(&serde_json::json!({ "slug": "my-scraper" }))?;
/// assert_eq!(request.effective_method(), Method::PUT);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FetchRequest {
    path: String,
    method: Option<Method>,
    body: Option<FetchBody>,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl FetchRequest {
    /// Create a request for a hub path (starting with `/`).
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the HTTP method explicitly.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Encode `body` as JSON and send it with the request.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Encode`] if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, FetchError> {
        self.body = Some(FetchBody::Json(serde_json::to_vec(body)?));
        Ok(self)
    }

    /// Send `body` verbatim.
    #[must_use]
    pub fn raw(mut self, body: impl Into<String>) -> Self {
        self.body = Some(FetchBody::Raw(body.into()));
        self
    }

    /// Send `form` as a `multipart/form-data` body.
    #[must_use]
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(FetchBody::Multipart(form));
        self
    }

    /// Add a header, applied after (and overriding) the default headers.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Give this request its own deadline instead of the client default.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The hub path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The request body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&FetchBody> {
        self.body.as_ref()
    }

    /// Extra headers, in the order they were added.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The per-request deadline, if one was set.
    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The method that will be used: the explicit one, otherwise `POST` when
    /// a body is present and `GET` when not.
    #[must_use]
    pub fn effective_method(&self) -> Method {
        match (&self.method, &self.body) {
            (Some(method), _) => method.clone(),
            (None, Some(_)) => Method::POST,
            (None, None) => Method::GET,
        }
    }

    pub(crate) fn body_bytes(&self) -> Option<Vec<u8>> {
        self.body.as_ref().and_then(FetchBody::to_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_defaults_to_get_without_body() {
        let request = FetchRequest::new("/api/v1/health");
        assert_eq!(request.effective_method(), Method::GET);
        assert!(request.body().is_none());
    }

    #[test]
    fn method_defaults_to_post_with_body() {
        let request = FetchRequest::new("/api/v1/scraper/scanCV")
            .json(&serde_json::json!({"cv": {}}))
            .unwrap();
        assert_eq!(request.effective_method(), Method::POST);
    }

    #[test]
    fn explicit_method_wins() {
        let request = FetchRequest::new("/api/v1/siteStorageCredentials/1/validate")
            .method(Method::PATCH)
            .raw("{}");
        assert_eq!(request.effective_method(), Method::PATCH);
    }

    #[test]
    fn raw_body_is_sent_verbatim() {
        let request = FetchRequest::new("/x").raw(r#"{"already":"encoded"}"#);
        assert_eq!(
            request.body(),
            Some(&FetchBody::Raw(r#"{"already":"encoded"}"#.to_string()))
        );
        assert_eq!(
            request.body_bytes().unwrap(),
            br#"{"already":"encoded"}"#.to_vec()
        );
    }

    #[test]
    fn json_body_is_encoded() {
        let request = FetchRequest::new("/x")
            .json(&serde_json::json!({"slug": "abc"}))
            .unwrap();
        assert_eq!(request.body_bytes().unwrap(), br#"{"slug":"abc"}"#.to_vec());
    }

    #[test]
    fn multipart_body_defaults_to_post() {
        let form = MultipartForm::new()
            .text("metadata", r#"{"referenceNumber":"1"}"#)
            .file("cv", "cv.pdf", b"%PDF".to_vec(), Some("application/pdf"));
        let request = FetchRequest::new("/x").multipart(form);

        assert_eq!(request.effective_method(), Method::POST);
        assert!(request.body_bytes().is_none());
        let Some(FetchBody::Multipart(form)) = request.body() else {
            panic!("expected a multipart body");
        };
        assert_eq!(form.parts().len(), 2);
        assert_eq!(form.parts()[1].file_name(), Some("cv.pdf"));
        assert_eq!(form.parts()[1].mime_type(), Some("application/pdf"));
        assert!(form.to_form().is_ok());
    }

    #[test]
    fn invalid_part_mime_type_is_rejected() {
        let form = MultipartForm::new().file("cv", "cv.pdf", Vec::new(), Some("not a mime"));
        assert!(matches!(form.to_form(), Err(FetchError::InvalidHeader(_))));
    }

    #[test]
    fn headers_and_timeout_are_kept() {
        let request = FetchRequest::new("/x")
            .header("X-Trace", "1")
            .timeout(Duration::from_secs(2));
        assert_eq!(request.headers(), &[("X-Trace".to_string(), "1".to_string())]);
        assert_eq!(request.request_timeout(), Some(Duration::from_secs(2)));
    }
}

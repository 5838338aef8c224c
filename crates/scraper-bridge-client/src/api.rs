//! Typed hub operations on top of [`HubClient`].
//!
//! Every operation except [`HubClient::get_users`] goes through the retrying
//! path. CVs are validated locally before anything is sent.

use reqwest::Method;
use scraper_bridge_core::de::null_as_default;
use scraper_bridge_core::{
    format_cv_filename, Cv, LoginUser, Profile, SiteStorageCredential, SiteStorageCredentials,
};
use serde::{Deserialize, Serialize};

use crate::client::HubClient;
use crate::error::{FetchError, HubError, Result};
use crate::request::{FetchRequest, MultipartForm};

const HEALTH_PATH: &str = "/api/v1/health";
const SET_SLUG_PATH: &str = "/api/v1/scraper/setSlug";
const REPORT_LOGIN_PATH: &str = "/api/v1/scraperUsers/reportLoginAttempt";
const SCAN_CV_PATH: &str = "/api/v1/scraper/scanCV";
const DRY_SCAN_CV_PATH: &str = "/api/v1/scraper/dryScanCV";
const ALL_CVS_PATH: &str = "/api/v1/scraper/allCVs";
const SCAN_CV_DOCUMENT_PATH: &str = "/api/v1/scraper/scanCVDocument";
const ACTIVE_PROFILES_PATH: &str = "/api/v1/profiles/active";

/// The hub's answer to a slug registration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlugUpdate {
    /// The slug the hub stored.
    pub slug: String,
    /// Whether a different slug was registered for this key before.
    pub overwrote_existing: bool,
    /// The slug that was replaced, if any.
    pub old_slug: String,
}

#[derive(Debug, Deserialize)]
struct UsersResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    users: Vec<LoginUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DryScanResponse {
    #[serde(default)]
    has_matches: bool,
}

#[derive(Serialize)]
struct SlugBody<'a> {
    slug: &'a str,
}

#[derive(Serialize)]
struct LoginAttemptBody<'a> {
    username: &'a str,
    success: bool,
}

#[derive(Serialize)]
struct CvBody<'a> {
    cv: &'a Cv,
}

#[derive(Serialize)]
struct CvsBody<'a> {
    cvs: &'a [Cv],
}

impl HubClient {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Check that the hub is reachable, retrying on failure.
    ///
    /// # Errors
    ///
    /// Returns the last failure once the retry policy is exhausted.
    pub async fn health(&self) -> Result<()> {
        self.send_with_retries(&FetchRequest::new(HEALTH_PATH))
            .await
            .map_err(HubError::from)
    }

    /// Register `slug` as this scraper's name.
    ///
    /// # Errors
    ///
    /// Returns the last failure once the retry policy is exhausted.
    pub async fn set_slug(&self, slug: &str) -> Result<SlugUpdate> {
        let request = FetchRequest::new(SET_SLUG_PATH)
            .method(Method::PUT)
            .json(&SlugBody { slug })?;
        Ok(self.fetch_with_retries(&request).await?)
    }

    // ========================================================================
    // Login users
    // ========================================================================

    /// Fetch the site login users assigned to this key. Not retried.
    ///
    /// # Errors
    ///
    /// - [`HubError::NoUsers`] if the list is empty and `must_have_at_least_one` is set
    /// - [`HubError::DeprecatedEncryption`] if every returned user lacks a password
    /// - [`HubError::Fetch`] if the request fails
    pub async fn get_users(&self, must_have_at_least_one: bool) -> Result<Vec<LoginUser>> {
        let path = format!("/api/v1/scraperUsers/{}", self.identity().key_id());
        let response: UsersResponse = self.fetch(&FetchRequest::new(path)).await?;
        let users = response.users;

        if users.is_empty() {
            if must_have_at_least_one {
                return Err(HubError::NoUsers);
            }
            return Ok(users);
        }

        if users.iter().all(|user| user.password.is_empty()) {
            return Err(HubError::DeprecatedEncryption);
        }

        Ok(users)
    }

    /// Tell the hub whether logging in as `username` worked.
    ///
    /// # Errors
    ///
    /// Returns the last failure once the retry policy is exhausted.
    pub async fn report_login_attempt(&self, username: &str, success: bool) -> Result<()> {
        let request =
            FetchRequest::new(REPORT_LOGIN_PATH).json(&LoginAttemptBody { username, success })?;
        Ok(self.send_with_retries(&request).await?)
    }

    // ========================================================================
    // CVs
    // ========================================================================

    /// Validate and submit a scraped CV.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Core`] if the CV is invalid (nothing is sent), or
    /// the last failure once the retry policy is exhausted.
    pub async fn send_cv(&self, cv: &Cv) -> Result<()> {
        cv.validate()?;
        let request = FetchRequest::new(SCAN_CV_PATH).json(&CvBody { cv })?;
        Ok(self.send_with_retries(&request).await?)
    }

    /// Ask the hub whether `cv` would match any profile, without storing it.
    ///
    /// # Errors
    ///
    /// Same as [`HubClient::send_cv`].
    pub async fn cv_has_matches(&self, cv: &Cv) -> Result<bool> {
        cv.validate()?;
        let request = FetchRequest::new(DRY_SCAN_CV_PATH).json(&CvBody { cv })?;
        let response: DryScanResponse = self.fetch_with_retries(&request).await?;
        Ok(response.has_matches)
    }

    /// Validate and submit the full list of CVs the scraper currently sees.
    ///
    /// Each CV is reduced to its [list entry](Cv::list_entry) before sending.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Core`] for the first invalid CV (nothing is sent),
    /// or the last failure once the retry policy is exhausted.
    pub async fn send_cvs_list(&self, cvs: &[Cv]) -> Result<()> {
        for cv in cvs {
            cv.validate()?;
        }
        let entries: Vec<Cv> = cvs.iter().map(Cv::list_entry).collect();
        let request = FetchRequest::new(ALL_CVS_PATH).json(&CvsBody { cvs: &entries })?;
        Ok(self.send_with_retries(&request).await?)
    }

    /// Upload a CV document (a PDF, Word file or image) for the hub to scan.
    ///
    /// `metadata` is sent as JSON next to the file and is not validated, the
    /// hub fills in what it reads from the document. The file name is derived
    /// from `mime_type` with [`format_cv_filename`].
    ///
    /// # Errors
    ///
    /// Returns the last failure once the retry policy is exhausted.
    pub async fn send_cv_document(
        &self,
        metadata: &Cv,
        document: &[u8],
        mime_type: Option<&str>,
    ) -> Result<()> {
        let metadata = serde_json::to_string(metadata).map_err(FetchError::from)?;
        let form = MultipartForm::new().text("metadata", metadata).file(
            "cv",
            format_cv_filename(None, mime_type),
            document.to_vec(),
            mime_type,
        );
        let request = FetchRequest::new(SCAN_CV_DOCUMENT_PATH).multipart(form);
        Ok(self.send_with_retries(&request).await?)
    }

    // ========================================================================
    // Site storage credentials
    // ========================================================================

    /// Fetch the site storage credentials owned by this key.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::HiddenCredentials`] (carrying the full list) if any
    /// credential is hidden from this key, or the last failure once the retry
    /// policy is exhausted.
    pub async fn get_site_storage_credentials(&self) -> Result<SiteStorageCredentials> {
        let path = format!(
            "/api/v1/siteStorageCredentials/scraper/{}",
            self.identity().key_id()
        );
        let credentials: SiteStorageCredentials =
            self.fetch_with_retries(&FetchRequest::new(path)).await?;

        if credentials.any_hidden() {
            return Err(HubError::HiddenCredentials { credentials });
        }
        Ok(credentials)
    }

    /// Mark `credential` as no longer working and replace it with the hub's copy.
    ///
    /// # Errors
    ///
    /// Returns the last failure once the retry policy is exhausted.
    pub async fn invalidate_site_storage_credential(
        &self,
        credential: &mut SiteStorageCredential,
    ) -> Result<()> {
        self.patch_site_storage_credential(credential, "invalidate")
            .await
    }

    /// Mark `credential` as working again and replace it with the hub's copy.
    ///
    /// # Errors
    ///
    /// Returns the last failure once the retry policy is exhausted.
    pub async fn validate_site_storage_credential(
        &self,
        credential: &mut SiteStorageCredential,
    ) -> Result<()> {
        self.patch_site_storage_credential(credential, "validate")
            .await
    }

    async fn patch_site_storage_credential(
        &self,
        credential: &mut SiteStorageCredential,
        action: &str,
    ) -> Result<()> {
        let path = format!("/api/v1/siteStorageCredentials/{}/{action}", credential.id);
        let request = FetchRequest::new(path).method(Method::PATCH);
        *credential = self.fetch_with_retries(&request).await?;
        Ok(())
    }

    // ========================================================================
    // Profiles
    // ========================================================================

    /// Fetch all active search profiles.
    ///
    /// # Errors
    ///
    /// Returns the last failure once the retry policy is exhausted.
    pub async fn get_active_profiles(&self) -> Result<Vec<Profile>> {
        Ok(self
            .fetch_with_retries(&FetchRequest::new(ACTIVE_PROFILES_PATH))
            .await?)
    }
}

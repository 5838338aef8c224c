//! Bootstrapping a scraper and mirroring its submissions.
//!
//! [`start`] brings a scraper online against its primary hub: it checks the
//! hub is reachable, registers the scraper's slug and starts the inbound
//! gateway. When an alternative hub is configured, [`AgentHandle`] copies
//! every submission to it after the primary accepted it.

use std::net::SocketAddr;
use std::sync::Arc;

use scraper_bridge_client::{HubClient, HubClientConfig, HubError, Result as HubResult};
use scraper_bridge_core::{
    Cv, HubIdentity, LoginUser, Profile, SiteStorageCredential, SiteStorageCredentials,
};
use scraper_bridge_gateway::{
    create_router, spawn_server, CredentialSet, GatewayError, GatewayHandle, GatewayState,
    HandlerSet,
};

use crate::error::{BootstrapError, Result};
use crate::options::{AgentOptions, ALTERNATIVE_SERVER_ENV, PRIMARY_SERVER_ENV};

/// Start a scraper agent.
///
/// Steps, in order; the first failure is returned:
///
/// 1. Resolve the primary hub credentials.
/// 2. Require a slug unless `skip_slug_check` is set.
/// 3. Resolve the alternative hub credentials, when configured.
/// 4. Health-check the primary hub.
/// 5. Register the slug unless `skip_slug_check` is set.
/// 6. Start the gateway unless `start_server` is false.
/// 7. Health-check the alternative hub, when configured.
///
/// # Errors
///
/// Returns a [`BootstrapError`] naming the step that failed.
pub async fn start<H>(
    slug: &str,
    handlers: Arc<H>,
    mut options: AgentOptions,
) -> Result<AgentHandle>
where
    H: HandlerSet + 'static,
{
    let router_hook = options.router_hook.take();
    let raw_primary = options
        .api_server
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .ok_or(BootstrapError::MissingConfig {
            key: PRIMARY_SERVER_ENV,
        })?;
    let primary_identity = HubIdentity::resolve(PRIMARY_SERVER_ENV, raw_primary)?;

    if !options.skip_slug_check && slug.trim().is_empty() {
        return Err(BootstrapError::MissingSlug);
    }

    let alternative_identity = match options.alternative_api_server.as_deref() {
        Some(raw) if !options.disable_alternative && !raw.trim().is_empty() => {
            Some(HubIdentity::resolve(ALTERNATIVE_SERVER_ENV, raw)?)
        }
        _ => None,
    };

    tracing::info!(
        hub = %primary_identity.base_url(),
        key_id = %primary_identity.key_id(),
        alternative = alternative_identity.is_some(),
        "Starting scraper agent"
    );

    let primary = HubClient::new(primary_identity.clone(), options.client)?;
    primary.health().await.map_err(BootstrapError::HealthCheck)?;

    if !options.skip_slug_check {
        register_slug(&primary, slug).await?;
    }

    let gateway = if options.start_server {
        let credentials: CredentialSet = std::iter::once(&primary_identity)
            .chain(alternative_identity.as_ref())
            .collect();
        let config = options.gateway_config();
        let state = GatewayState::new(handlers, credentials, config.clone());
        let router = create_router(state, router_hook);
        Some(spawn_server(router, &config).await?)
    } else {
        None
    };

    let alternative = match alternative_identity {
        Some(identity) => {
            match connect_alternative(identity, options.client).await {
                Ok(client) => Some(client),
                Err(err) => {
                    if let Some(gateway) = &gateway {
                        gateway.abort();
                    }
                    return Err(err);
                }
            }
        }
        None => None,
    };

    tracing::info!(
        gateway = ?gateway.as_ref().map(GatewayHandle::local_addr),
        "Scraper agent started"
    );

    Ok(AgentHandle {
        primary,
        alternative,
        gateway,
    })
}

async fn register_slug(primary: &HubClient, slug: &str) -> Result<()> {
    let update = primary
        .set_slug(slug)
        .await
        .map_err(BootstrapError::SetSlug)?;

    if update.slug != slug {
        return Err(BootstrapError::SlugMismatch {
            requested: slug.to_string(),
            received: update.slug,
        });
    }
    if update.overwrote_existing {
        tracing::warn!(
            slug = %slug,
            old_slug = %update.old_slug,
            "Replaced the slug previously registered for this api key"
        );
    }
    Ok(())
}

async fn connect_alternative(identity: HubIdentity, config: HubClientConfig) -> Result<HubClient> {
    let client = HubClient::new(identity, config)?;
    client
        .health()
        .await
        .map_err(BootstrapError::AlternativeHealthCheck)?;
    tracing::info!(hub = %client.base_url(), "Alternative hub connected");
    Ok(client)
}

/// A started scraper agent.
///
/// Submissions (`send_cv`, `send_cvs_list`, `send_cv_document`,
/// `report_login_attempt`) go to the
/// primary hub first and are then copied to the alternative hub. Everything
/// else only talks to the primary.
#[derive(Debug)]
pub struct AgentHandle {
    primary: HubClient,
    alternative: Option<HubClient>,
    gateway: Option<GatewayHandle>,
}

impl AgentHandle {
    /// The primary hub client.
    #[must_use]
    pub const fn primary(&self) -> &HubClient {
        &self.primary
    }

    /// The alternative hub client, when configured.
    #[must_use]
    pub const fn alternative(&self) -> Option<&HubClient> {
        self.alternative.as_ref()
    }

    /// The address the gateway is bound to, when it was started.
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.gateway.as_ref().map(GatewayHandle::local_addr)
    }

    /// Wait for the gateway to stop. Returns immediately without a gateway.
    ///
    /// # Errors
    ///
    /// Returns the error that ended the gateway.
    pub async fn wait(self) -> std::result::Result<(), GatewayError> {
        match self.gateway {
            Some(gateway) => gateway.wait().await,
            None => Ok(()),
        }
    }

    /// Stop the gateway, if running.
    pub fn shutdown(&self) {
        if let Some(gateway) = &self.gateway {
            gateway.abort();
        }
    }

    // ========================================================================
    // Primary only
    // ========================================================================

    /// See [`HubClient::get_users`].
    ///
    /// # Errors
    ///
    /// See [`HubClient::get_users`].
    pub async fn get_users(&self, must_have_at_least_one: bool) -> HubResult<Vec<LoginUser>> {
        self.primary.get_users(must_have_at_least_one).await
    }

    /// See [`HubClient::cv_has_matches`].
    ///
    /// # Errors
    ///
    /// See [`HubClient::cv_has_matches`].
    pub async fn cv_has_matches(&self, cv: &Cv) -> HubResult<bool> {
        self.primary.cv_has_matches(cv).await
    }

    /// See [`HubClient::get_site_storage_credentials`].
    ///
    /// # Errors
    ///
    /// See [`HubClient::get_site_storage_credentials`].
    pub async fn get_site_storage_credentials(&self) -> HubResult<SiteStorageCredentials> {
        self.primary.get_site_storage_credentials().await
    }

    /// See [`HubClient::invalidate_site_storage_credential`].
    ///
    /// # Errors
    ///
    /// See [`HubClient::invalidate_site_storage_credential`].
    pub async fn invalidate_site_storage_credential(
        &self,
        credential: &mut SiteStorageCredential,
    ) -> HubResult<()> {
        self.primary
            .invalidate_site_storage_credential(credential)
            .await
    }

    /// See [`HubClient::validate_site_storage_credential`].
    ///
    /// # Errors
    ///
    /// See [`HubClient::validate_site_storage_credential`].
    pub async fn validate_site_storage_credential(
        &self,
        credential: &mut SiteStorageCredential,
    ) -> HubResult<()> {
        self.primary.validate_site_storage_credential(credential).await
    }

    /// See [`HubClient::get_active_profiles`].
    ///
    /// # Errors
    ///
    /// See [`HubClient::get_active_profiles`].
    pub async fn get_active_profiles(&self) -> HubResult<Vec<Profile>> {
        self.primary.get_active_profiles().await
    }

    // ========================================================================
    // Mirrored
    // ========================================================================

    /// Submit a CV to the primary hub, then copy it to the alternative.
    ///
    /// # Errors
    ///
    /// Returns the primary hub's error; the alternative is then not contacted.
    /// Failures of the alternative are only logged.
    pub async fn send_cv(&self, cv: &Cv) -> HubResult<()> {
        self.primary.send_cv(cv).await?;
        if let Some(alternative) = &self.alternative {
            log_mirror_failure("send_cv", alternative.send_cv(cv).await);
        }
        Ok(())
    }

    /// Submit a CV list to the primary hub, then copy it to the alternative.
    ///
    /// # Errors
    ///
    /// Same as [`AgentHandle::send_cv`].
    pub async fn send_cvs_list(&self, cvs: &[Cv]) -> HubResult<()> {
        self.primary.send_cvs_list(cvs).await?;
        if let Some(alternative) = &self.alternative {
            log_mirror_failure("send_cvs_list", alternative.send_cvs_list(cvs).await);
        }
        Ok(())
    }

    /// Upload a CV document to the primary hub, then copy it to the alternative.
    ///
    /// The alternative only scans the document after the primary accepted it,
    /// so both hubs see the same upload once.
    ///
    /// # Errors
    ///
    /// Same as [`AgentHandle::send_cv`].
    pub async fn send_cv_document(
        &self,
        metadata: &Cv,
        document: &[u8],
        mime_type: Option<&str>,
    ) -> HubResult<()> {
        self.primary
            .send_cv_document(metadata, document, mime_type)
            .await?;
        if let Some(alternative) = &self.alternative {
            log_mirror_failure(
                "send_cv_document",
                alternative
                    .send_cv_document(metadata, document, mime_type)
                    .await,
            );
        }
        Ok(())
    }

    /// Report a login attempt to both hubs.
    ///
    /// Reporting is best effort: failures on either hub are logged.
    pub async fn report_login_attempt(&self, username: &str, success: bool) {
        if let Err(err) = self.primary.report_login_attempt(username, success).await {
            tracing::warn!(
                username = %username,
                success,
                error = %err,
                "Failed to report login attempt"
            );
        }
        if let Some(alternative) = &self.alternative {
            log_mirror_failure(
                "report_login_attempt",
                alternative.report_login_attempt(username, success).await,
            );
        }
    }
}

fn log_mirror_failure(operation: &'static str, result: std::result::Result<(), HubError>) {
    if let Err(err) = result {
        tracing::warn!(operation, error = %err, "Mirroring to alternative hub failed");
    }
}

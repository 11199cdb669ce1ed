// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential cache with proactive refresh and single-flight semantics.
//!
//! The cache state lives behind one `tokio::sync::Mutex` that is held
//! across the refresh await. Concurrent callers therefore serialize: the
//! first performs the network call, the rest observe the freshly stored
//! token and never issue a second request.

use std::sync::Arc;
use std::time::Duration;

use mynah_config::OutboundConfig;
use mynah_core::{MessagingApi, MynahError};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

#[derive(Clone)]
struct CachedToken {
    token: String,
    /// Expiry minus the safety margin; past this the token is treated as stale.
    refresh_after: Instant,
    /// The API-reported expiry. A stale token is kept until this instant.
    hard_expiry: Instant,
}

/// Keeps the outbound API usable without per-call re-authentication.
pub struct CredentialCache {
    api: Arc<dyn MessagingApi>,
    app_id: String,
    app_secret: String,
    safety_margin: Duration,
    state: Mutex<Option<CachedToken>>,
}

impl std::fmt::Debug for CredentialCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialCache")
            .field("app_id", &self.app_id)
            .field("app_secret", &"[redacted]")
            .finish()
    }
}

impl CredentialCache {
    /// Creates a cache from the outbound configuration.
    ///
    /// Requires `app_id` and `app_secret` to be configured.
    pub fn new(api: Arc<dyn MessagingApi>, config: &OutboundConfig) -> Result<Self, MynahError> {
        let app_id = config
            .app_id
            .clone()
            .ok_or_else(|| MynahError::Config("outbound.app_id is required".into()))?;
        let app_secret = config
            .app_secret
            .clone()
            .ok_or_else(|| MynahError::Config("outbound.app_secret is required".into()))?;

        Ok(Self {
            api,
            app_id,
            app_secret,
            safety_margin: Duration::from_secs(config.token_safety_margin_secs),
            state: Mutex::new(None),
        })
    }

    /// Returns a currently-valid bearer token, refreshing transparently.
    ///
    /// On refresh failure a [`MynahError::Credential`] is raised; a previous
    /// token is retained only while it has not hard-expired. No retry loop
    /// here — callers decide whether to try again.
    pub async fn get_token(&self) -> Result<String, MynahError> {
        let mut state = self.state.lock().await;

        if let Some(ref cached) = *state
            && Instant::now() < cached.refresh_after
        {
            return Ok(cached.token.clone());
        }

        debug!("credential stale or absent, refreshing");
        match self.api.authenticate(&self.app_id, &self.app_secret).await {
            Ok(creds) => {
                let now = Instant::now();
                let ttl = Duration::from_secs(creds.ttl_seconds);
                let cached = CachedToken {
                    token: creds.token,
                    refresh_after: now + ttl.saturating_sub(self.safety_margin),
                    hard_expiry: now + ttl,
                };
                let token = cached.token.clone();
                *state = Some(cached);
                debug!(ttl_seconds = creds.ttl_seconds, "credential refreshed");
                Ok(token)
            }
            Err(e) => {
                if let Some(ref cached) = *state
                    && Instant::now() >= cached.hard_expiry
                {
                    warn!("dropping hard-expired credential after failed refresh");
                    *state = None;
                }
                Err(e)
            }
        }
    }

    #[cfg(test)]
    async fn cached_token(&self) -> Option<String> {
        self.state.lock().await.as_ref().map(|c| c.token.clone())
    }
}

use std::sync::Arc;

use super::auth::{AuthProvider, DisabledAuthProvider};
use super::auth::jwt::JwtAuthProvider;
use crate::shared::config::AuthConfig;

/// Shared router state
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self { auth }
    }

    /// Builds the auth provider from the `[auth]` config section
    pub async fn from_auth_config(config: &AuthConfig) -> anyhow::Result<Self> {
        let auth: Arc<dyn AuthProvider> = if config.enabled {
            Arc::new(JwtAuthProvider::from_config(config).await?)
        } else {
            ::tracing::warn!("Authentication is DISABLED: all requests run as the local dev user");
            Arc::new(DisabledAuthProvider::new())
        };
        ::tracing::info!("Auth provider: {}", auth.provider_name());
        Ok(Self::new(auth))
    }
}

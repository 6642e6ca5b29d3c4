use async_trait::async_trait;
use contracts::system::auth::{AuthUser, ADMIN_ROLE};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("no signing key with kid '{0}'")]
    UnknownKey(String),

    #[error("auth configuration error: {0}")]
    Config(String),

    #[error("failed to fetch signing keys: {0}")]
    KeyFetch(String),
}

/// Resolves the caller of a request from its bearer token.
///
/// Held in the router state and handed to the auth middleware; handlers only
/// ever see the resulting [`AuthUser`].
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(&self, bearer_token: Option<&str>) -> Result<AuthUser, AuthError>;

    fn provider_name(&self) -> &str;
}

/// Local development: every request runs as the same administrator
pub struct DisabledAuthProvider {
    user: AuthUser,
}

impl DisabledAuthProvider {
    pub fn new() -> Self {
        Self {
            user: AuthUser {
                subject: "local-dev".to_string(),
                username: "dev".to_string(),
                email: None,
                full_name: Some("Local Developer".to_string()),
                roles: vec![ADMIN_ROLE.to_string()],
            },
        }
    }
}

impl Default for DisabledAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProvider for DisabledAuthProvider {
    async fn authenticate(&self, _bearer_token: Option<&str>) -> Result<AuthUser, AuthError> {
        Ok(self.user.clone())
    }

    fn provider_name(&self) -> &str {
        "disabled"
    }
}

use serde::{Deserialize, Serialize};

/// Realm role granting administrative rights
pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Claims of a Keycloak access token that the backend relies on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub realm_access: Option<RealmAccess>,
    pub exp: usize,
    #[serde(default)]
    pub iat: usize,
}

/// Caller identity attached to every authenticated request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Keycloak subject
    pub subject: String,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub roles: Vec<String>,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ADMIN_ROLE)
    }
}

impl From<TokenClaims> for AuthUser {
    fn from(claims: TokenClaims) -> Self {
        let username = claims
            .preferred_username
            .clone()
            .unwrap_or_else(|| claims.sub.clone());
        Self {
            subject: claims.sub,
            username,
            email: claims.email,
            full_name: claims.name,
            roles: claims.realm_access.map(|r| r.roles).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_to_user() {
        let json = r#"{
            "sub": "f3b1",
            "preferred_username": "jdoe",
            "email": "jdoe@example.org",
            "realm_access": {"roles": ["offline_access", "admin"]},
            "exp": 1900000000
        }"#;
        let claims: TokenClaims = serde_json::from_str(json).unwrap();
        let user = AuthUser::from(claims);
        assert_eq!(user.username, "jdoe");
        assert!(user.is_admin());
    }

    #[test]
    fn test_username_falls_back_to_subject() {
        let json = r#"{"sub": "f3b1", "exp": 1900000000}"#;
        let claims: TokenClaims = serde_json::from_str(json).unwrap();
        let user = AuthUser::from(claims);
        assert_eq!(user.username, "f3b1");
        assert!(!user.is_admin());
    }
}

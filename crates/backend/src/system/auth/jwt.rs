use async_trait::async_trait;
use contracts::system::auth::{AuthUser, TokenClaims};
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};

use super::provider::{AuthError, AuthProvider};
use crate::shared::config::AuthConfig;

enum KeySource {
    Static(DecodingKey, Algorithm),
    Jwks(JwkSet),
}

/// Validates Keycloak access tokens
pub struct JwtAuthProvider {
    keys: KeySource,
    issuer: Option<String>,
    audience: Option<String>,
}

impl JwtAuthProvider {
    pub fn from_secret(secret: &str, issuer: Option<String>, audience: Option<String>) -> Self {
        Self {
            keys: KeySource::Static(DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256),
            issuer,
            audience,
        }
    }

    pub fn from_rsa_pem(
        pem: &str,
        issuer: Option<String>,
        audience: Option<String>,
    ) -> Result<Self, AuthError> {
        let key = DecodingKey::from_rsa_pem(pem.as_bytes())
            .map_err(|e| AuthError::Config(format!("invalid RSA public key: {}", e)))?;
        Ok(Self {
            keys: KeySource::Static(key, Algorithm::RS256),
            issuer,
            audience,
        })
    }

    pub fn from_jwks(jwks: JwkSet, issuer: Option<String>, audience: Option<String>) -> Self {
        Self {
            keys: KeySource::Jwks(jwks),
            issuer,
            audience,
        }
    }

    /// Downloads the realm certificates (`.../protocol/openid-connect/certs`)
    pub async fn fetch_jwks(url: &str) -> Result<JwkSet, AuthError> {
        let response = reqwest::get(url)
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AuthError::KeyFetch(e.to_string()))?;
        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::KeyFetch(e.to_string()))
    }

    pub async fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let issuer = config.issuer.clone();
        let audience = config.audience.clone();

        if let Some(pem) = &config.public_key_pem {
            tracing::info!("Auth: validating RS256 tokens with configured public key");
            return Self::from_rsa_pem(pem, issuer, audience);
        }
        if let Some(secret) = &config.hs256_secret {
            tracing::info!("Auth: validating HS256 tokens with shared secret");
            return Ok(Self::from_secret(secret, issuer, audience));
        }
        if let Some(url) = &config.jwks_url {
            tracing::info!("Auth: fetching signing keys from {}", url);
            let jwks = Self::fetch_jwks(url).await?;
            tracing::info!("Auth: loaded {} signing key(s)", jwks.keys.len());
            return Ok(Self::from_jwks(jwks, issuer, audience));
        }
        Err(AuthError::Config(
            "auth is enabled but none of public_key_pem, hs256_secret, jwks_url is set".into(),
        ))
    }

    fn validation(&self, algorithm: Algorithm) -> Validation {
        let mut validation = Validation::new(algorithm);
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &self.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        validation
    }

    pub fn decode(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let invalid = |e: jsonwebtoken::errors::Error| AuthError::InvalidToken(e.to_string());

        let data = match &self.keys {
            KeySource::Static(key, algorithm) => {
                decode::<TokenClaims>(token, key, &self.validation(*algorithm)).map_err(invalid)?
            }
            KeySource::Jwks(jwks) => {
                let header = decode_header(token).map_err(invalid)?;
                let kid = header
                    .kid
                    .ok_or_else(|| AuthError::InvalidToken("token header has no kid".into()))?;
                let jwk = jwks
                    .find(&kid)
                    .ok_or_else(|| AuthError::UnknownKey(kid.clone()))?;
                let key = DecodingKey::from_jwk(jwk).map_err(invalid)?;
                decode::<TokenClaims>(token, &key, &self.validation(header.alg)).map_err(invalid)?
            }
        };
        Ok(data.claims)
    }
}

#[async_trait]
impl AuthProvider for JwtAuthProvider {
    async fn authenticate(&self, bearer_token: Option<&str>) -> Result<AuthUser, AuthError> {
        let token = bearer_token.ok_or(AuthError::MissingToken)?;
        let claims = self.decode(token)?;
        Ok(AuthUser::from(claims))
    }

    fn provider_name(&self) -> &str {
        match self.keys {
            KeySource::Static(_, _) => "jwt-static",
            KeySource::Jwks(_) => "keycloak-jwks",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::auth::RealmAccess;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const ISSUER: &str = "https://sso.example.org/realms/ospo";

    fn token(secret: &str, issuer: &str, exp_offset_secs: i64) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = TokenClaims {
            sub: "5c1d".into(),
            preferred_username: Some("jdoe".into()),
            email: Some("jdoe@example.org".into()),
            name: Some("Jane Doe".into()),
            realm_access: Some(RealmAccess {
                roles: vec!["admin".into()],
            }),
            exp: (now + exp_offset_secs) as usize,
            iat: now as usize,
        };
        #[derive(serde::Serialize)]
        struct WithIssuer<'a> {
            #[serde(flatten)]
            claims: &'a TokenClaims,
            iss: &'a str,
        }
        encode(
            &Header::default(),
            &WithIssuer {
                claims: &claims,
                iss: issuer,
            },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_valid_token_authenticates() {
        let provider = JwtAuthProvider::from_secret("s3cret", Some(ISSUER.into()), None);
        let user = provider
            .authenticate(Some(&token("s3cret", ISSUER, 3600)))
            .await
            .unwrap();
        assert_eq!(user.username, "jdoe");
        assert!(user.is_admin());
    }

    #[tokio::test]
    async fn test_rejects_bad_signature_issuer_and_expiry() {
        let provider = JwtAuthProvider::from_secret("s3cret", Some(ISSUER.into()), None);

        let wrong_key = provider
            .authenticate(Some(&token("other", ISSUER, 3600)))
            .await;
        assert!(matches!(wrong_key, Err(AuthError::InvalidToken(_))));

        let wrong_issuer = provider
            .authenticate(Some(&token("s3cret", "https://evil.example", 3600)))
            .await;
        assert!(matches!(wrong_issuer, Err(AuthError::InvalidToken(_))));

        let expired = provider
            .authenticate(Some(&token("s3cret", ISSUER, -3600)))
            .await;
        assert!(matches!(expired, Err(AuthError::InvalidToken(_))));

        let missing = provider.authenticate(None).await;
        assert!(matches!(missing, Err(AuthError::MissingToken)));
    }

    #[tokio::test]
    async fn test_config_without_key_source_fails() {
        let config = AuthConfig {
            enabled: true,
            ..Default::default()
        };
        let result = JwtAuthProvider::from_config(&config).await;
        assert!(matches!(result, Err(AuthError::Config(_))));
    }
}

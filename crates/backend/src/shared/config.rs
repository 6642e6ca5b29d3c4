use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed browser origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Keycloak token validation settings
///
/// Key source precedence: `public_key_pem`, `hs256_secret`, `jwks_url`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub enabled: bool,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub jwks_url: Option<String>,
    pub public_key_pem: Option<String>,
    pub hs256_secret: Option<String>,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/ospo_events.db"

[server]
host = "0.0.0.0"
port = 3000

[auth]
enabled = false
"#;

fn candidate_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            paths.push(exe_dir.join("config.toml"));
        }
    }
    paths.push(PathBuf::from("config.toml"));
    paths
}

/// Load configuration from config.toml
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Current working directory (development)
/// 3. Embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    for config_path in candidate_config_paths() {
        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            return parse_config(&contents);
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

/// Database file path from configuration.
/// Relative paths are resolved against the executable directory.
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    Ok(PathBuf::from(db_path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/ospo_events.db");
        assert_eq!(config.server.port, 3000);
        assert!(!config.auth.enabled);
    }

    #[test]
    fn test_sections_are_optional() {
        let config = parse_config(
            r#"
            [database]
            path = "/var/lib/ospo/events.db"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.server.cors_origins.is_empty());
        assert!(config.auth.jwks_url.is_none());
        assert_eq!(
            get_database_path(&config).unwrap(),
            PathBuf::from("/var/lib/ospo/events.db")
        );
    }

    #[test]
    fn test_auth_section() {
        let config = parse_config(
            r#"
            [database]
            path = "db.sqlite"

            [auth]
            enabled = true
            issuer = "https://sso.example.org/realms/ospo"
            hs256_secret = "s3cret"
            "#,
        )
        .unwrap();
        assert!(config.auth.enabled);
        assert_eq!(config.auth.hs256_secret.as_deref(), Some("s3cret"));
    }
}

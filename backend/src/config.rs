use anyhow::Context;
use std::{env, path::PathBuf};

use crate::services::progress_store::DEFAULT_MAX_USERS;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
    /// Used when a request carries no `X-User-Id` header.
    pub default_user_id: String,
    /// Upper bound on users with stored progress.
    pub max_tracked_users: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8001".into())
                .parse()
                .context("PORT must be a number")?,
            cors_origins: parse_origins(&env::var("CORS_ORIGINS").unwrap_or_default()),
            default_user_id: env::var("DEFAULT_USER_ID")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "default_user".into()),
            max_tracked_users: env::var("MAX_TRACKED_USERS")
                .unwrap_or_else(|_| DEFAULT_MAX_USERS.to_string())
                .parse()
                .context("MAX_TRACKED_USERS must be a number")?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8001,
            cors_origins: Vec::new(),
            default_user_id: "default_user".into(),
            max_tracked_users: DEFAULT_MAX_USERS,
        }
    }
}

/// Settings for the static asset server.
#[derive(Debug, Clone)]
pub struct StaticConfig {
    pub host: String,
    pub port: u16,
    pub dir: PathBuf,
}

impl StaticConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("STATIC_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("STATIC_PORT")
                .unwrap_or_else(|_| "3001".into())
                .parse()
                .context("STATIC_PORT must be a number")?,
            dir: env::var("STATIC_DIR")
                .unwrap_or_else(|_| "web".into())
                .into(),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect();

    if origins.iter().any(|o| o == "*") {
        Vec::new()
    } else {
        origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_wildcard_means_any() {
        assert!(parse_origins("*").is_empty());
        assert!(parse_origins("").is_empty());
        assert!(parse_origins("http://a.test, *").is_empty());
    }

    #[test]
    fn test_parse_origins_list() {
        assert_eq!(
            parse_origins(" http://a.test ,http://b.test,, "),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn test_listen_addr() {
        let config = Config {
            host: "0.0.0.0".into(),
            port: 9000,
            ..Config::default()
        };
        assert_eq!(config.listen_addr(), "0.0.0.0:9000");
    }
}

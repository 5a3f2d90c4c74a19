// src/common/config.rs
//! Environment-driven configuration for the api and crawler binaries

use std::env;
use tracing::warn;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://jobmatch.db";
const DEFAULT_JWT_SECRET: &str = "replace_with_strong_secret";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:3001,http://localhost:5173";

/// Settings of the AI gateway. A missing API key leaves the gateway unconfigured.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub response_language: String,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub reset_db: bool,
    pub jwt_secret: String,
    pub access_token_expire_minutes: i64,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub ai: AiConfig,
}

#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    pub database_url: String,
    pub reset_db: bool,
    pub start_url: String,
    pub allowed_domain: Option<String>,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None => {
                warn!("JWT_SECRET is not set, falling back to the insecure default secret");
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            reset_db: flag(lookup("RESET_DB")),
            jwt_secret,
            access_token_expire_minutes: parse_or(lookup("ACCESS_TOKEN_EXPIRE_MINUTES"), 30),
            port: parse_or(lookup("PORT"), 8080),
            cors_origins,
            ai: AiConfig {
                api_key: lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()),
                base_url: lookup("OPENAI_BASE_URL")
                    .unwrap_or_else(|| "https://api.openai.com".to_string()),
                model: lookup("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
                timeout_secs: parse_or(lookup("AI_TIMEOUT_SECS"), 120),
                response_language: lookup("AI_RESPONSE_LANGUAGE")
                    .unwrap_or_else(|| "Korean".to_string()),
            },
        }
    }
}

impl CrawlerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            reset_db: flag(lookup("RESET_DB")),
            start_url: lookup("CRAWL_START_URL")
                .unwrap_or_else(|| "https://www.python.org/jobs/".to_string()),
            allowed_domain: lookup("CRAWL_ALLOWED_DOMAIN").filter(|d| !d.trim().is_empty()),
            user_agent: lookup("CRAWL_USER_AGENT")
                .unwrap_or_else(|| format!("jobmatch-crawler/{}", env!("CARGO_PKG_VERSION"))),
            timeout_secs: parse_or(lookup("CRAWL_TIMEOUT_SECS"), 30),
        }
    }
}

fn flag(value: Option<String>) -> bool {
    value.map(|v| v.trim().eq_ignore_ascii_case("true")).unwrap_or(false)
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_api_config_defaults() {
        let config = ApiConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.access_token_expire_minutes, 30);
        assert_eq!(config.port, 8080);
        assert!(!config.reset_db);
        assert!(config.ai.api_key.is_none());
        assert_eq!(config.ai.response_language, "Korean");
        assert_eq!(config.cors_origins.len(), 3);
    }

    #[test]
    fn test_api_config_overrides() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "s3cr3t"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "5"),
            ("PORT", "not-a-port"),
            ("RESET_DB", "TRUE"),
            ("OPENAI_API_KEY", "sk-test"),
            ("CORS_ORIGINS", "https://a.example, ,https://b.example"),
        ]));
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.jwt_secret, "s3cr3t");
        assert_eq!(config.access_token_expire_minutes, 5);
        assert_eq!(config.port, 8080);
        assert!(config.reset_db);
        assert_eq!(config.ai.api_key.as_deref(), Some("sk-test"));
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn test_blank_api_key_means_unconfigured() {
        let config = ApiConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "  ")]));
        assert!(config.ai.api_key.is_none());
    }

    #[test]
    fn test_crawler_config_defaults() {
        let config = CrawlerConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.start_url, "https://www.python.org/jobs/");
        assert!(config.allowed_domain.is_none());
        assert!(config.user_agent.starts_with("jobmatch-crawler/"));
        assert_eq!(config.timeout_secs, 30);
    }
}

use serde::Deserialize;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_SUMMARIZER_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub summarizer_url: String,
    pub summarizer_api_key: Option<String>,
    pub smtp_host: String,
    pub smtp_port: Option<u16>,
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<String>,
    pub mail_from: Option<String>,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: u64,
    pub cors_origin: Option<String>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let smtp_user = var("SMTP_USER");

        Ok(Config {
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid port number")?,
            summarizer_url: var("SUMMARIZER_URL")
                .unwrap_or_else(|| DEFAULT_SUMMARIZER_URL.to_string()),
            summarizer_api_key: var("HUGGINGFACE_API_KEY"),
            smtp_host: var("SMTP_HOST")
                .unwrap_or_else(|| "smtp.gmail.com".to_string()),
            smtp_port: var("SMTP_PORT")
                .map(|p| p.parse())
                .transpose()
                .context("SMTP_PORT must be a valid port number")?,
            mail_from: var("MAIL_FROM").or_else(|| smtp_user.clone()),
            smtp_user,
            smtp_pass: var("SMTP_PASS"),
            upload_dir: var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("uploads")),
            max_upload_bytes: var("MAX_UPLOAD_BYTES")
                .map(|v| v.parse())
                .transpose()
                .context("MAX_UPLOAD_BYTES must be a byte count")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            cors_origin: var("CORS_ORIGIN")
                .map(|o| parse_origin(&o))
                .transpose()
                .context("CORS_ORIGIN must be scheme://host")?,
            log_level: var("LOG_LEVEL")
                .unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Accepts `scheme://host[:port]`, the only form the CORS filter can parse.
fn parse_origin(origin: &str) -> Result<String> {
    let origin = origin.trim();
    let (scheme, authority) = origin
        .split_once("://")
        .ok_or_else(|| anyhow::anyhow!("missing scheme in '{}'", origin))?;

    let scheme_ok = scheme
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    anyhow::ensure!(scheme_ok, "invalid scheme in '{}'", origin);

    let authority_ok = !authority.is_empty()
        && !authority
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '@'));
    anyhow::ensure!(authority_ok, "invalid host in '{}'", origin);

    Ok(origin.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.summarizer_url, DEFAULT_SUMMARIZER_URL);
        assert!(config.summarizer_api_key.is_none());
        assert_eq!(config.smtp_host, "smtp.gmail.com");
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn mail_from_falls_back_to_smtp_user() {
        let config = config_from(&[("SMTP_USER", "bot@example.com")]).unwrap();
        assert_eq!(config.mail_from.as_deref(), Some("bot@example.com"));

        let config = config_from(&[
            ("SMTP_USER", "bot@example.com"),
            ("MAIL_FROM", "Summaries <noreply@example.com>"),
        ])
        .unwrap();
        assert_eq!(config.mail_from.as_deref(), Some("Summaries <noreply@example.com>"));
    }

    #[test]
    fn blank_api_key_disables_remote() {
        let config = config_from(&[("HUGGINGFACE_API_KEY", "   ")]).unwrap();
        assert!(config.summarizer_api_key.is_none());
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("SMTP_PORT", "-1")]).is_err());
        assert!(config_from(&[("MAX_UPLOAD_BYTES", "lots")]).is_err());
    }

    #[test]
    fn cors_origin_needs_scheme_and_host() {
        for bad in ["example.com", "https://", "://example.com", "https://example.com/app", "1http://x"] {
            let err = config_from(&[("CORS_ORIGIN", bad)]).unwrap_err();
            assert!(
                format!("{err:#}").contains("CORS_ORIGIN must be scheme://host"),
                "origin {bad}: {err:#}"
            );
        }

        let config = config_from(&[("CORS_ORIGIN", " https://app.example.com:8443 ")]).unwrap();
        assert_eq!(config.cors_origin.as_deref(), Some("https://app.example.com:8443"));
        assert!(config_from(&[]).unwrap().cors_origin.is_none());
    }
}

use std::env;
use std::time::Duration;

/// Placeholder value shipped in sample configs; treated the same as no key.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_OPENAI_API_KEY";

const DEFAULT_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Runtime configuration, sourced from the environment rather than CLI
/// flags so the thin web handler can run the pipeline unchanged.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub request_timeout: Duration,
    pub max_retries: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_CHAT_URL.into()),
            request_timeout: Duration::from_secs(30),
            max_retries: 3,
        }
    }

    /// The remote tier is only attempted when the key looks real: present,
    /// not the shipped placeholder, and long enough to be an actual token.
    pub fn remote_configured(&self) -> bool {
        match &self.openai_api_key {
            Some(key) => key != PLACEHOLDER_API_KEY && key.len() > 20,
            None => false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: DEFAULT_MODEL.into(),
            openai_base_url: DEFAULT_CHAT_URL.into(),
            request_timeout: Duration::from_secs(30),
            max_retries: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_key_is_not_configured() {
        let cfg = AppConfig {
            openai_api_key: Some(PLACEHOLDER_API_KEY.into()),
            ..AppConfig::default()
        };
        assert!(!cfg.remote_configured());
    }

    #[test]
    fn short_key_is_not_configured() {
        let cfg = AppConfig {
            openai_api_key: Some("sk-short".into()),
            ..AppConfig::default()
        };
        assert!(!cfg.remote_configured());
    }

    #[test]
    fn realistic_key_is_configured() {
        let cfg = AppConfig {
            openai_api_key: Some("sk-0123456789abcdefghijklmn".into()),
            ..AppConfig::default()
        };
        assert!(cfg.remote_configured());
    }
}

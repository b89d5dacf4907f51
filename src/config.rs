use std::env;

pub const DEFAULT_BASE_URL: &str = "https://api-key.fusionbrain.ai/";

/// Credentials and endpoint for the FusionBrain generation service.
#[derive(Debug, Clone)]
pub struct FusionConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub secret_key: Option<String>,
}

impl Default for FusionConfig {
    fn default() -> Self {
        FusionConfig {
            base_url: None,
            api_key: None,
            secret_key: None,
        }
    }
}

impl FusionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let base_url = env::var("FUSIONBRAIN_URL").ok();
        let api_key = env::var("FUSIONBRAIN_API_KEY").ok();
        let secret_key = env::var("FUSIONBRAIN_SECRET_KEY").ok();

        FusionConfig {
            base_url,
            api_key,
            secret_key,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_credentials(
        mut self,
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.api_key = Some(api_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: Option<String>,
    pub fusion: Option<FusionConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bot_token: None,
            fusion: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let bot_token = env::var("TELEGRAM_BOT_TOKEN").ok();

        Config {
            bot_token,
            fusion: Some(FusionConfig::from_env()),
        }
    }

    pub fn with_bot_token(mut self, token: impl Into<String>) -> Self {
        self.bot_token = Some(token.into());
        self
    }

    pub fn with_fusion(mut self, config: FusionConfig) -> Self {
        self.fusion = Some(config);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fusion_config_builder() {
        let config = FusionConfig::new()
            .with_base_url("https://example.test/")
            .with_credentials("key", "secret");

        assert_eq!(config.base_url.as_deref(), Some("https://example.test/"));
        assert_eq!(config.api_key.as_deref(), Some("key"));
        assert_eq!(config.secret_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_config_defaults_empty() {
        let config = Config::new();
        assert!(config.bot_token.is_none());
        assert!(config.fusion.is_none());
    }
}

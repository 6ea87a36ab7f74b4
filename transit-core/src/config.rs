use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{collections::HashMap, env, fs, path::PathBuf};

use crate::provider::ProviderId;

/// Non-secret tuning for a single completion provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    pub model: String,
}

/// Top-level configuration.
///
/// Tuning lives in an optional on-disk `config.toml`; secrets are read from
/// the environment at load time and never touch the disk.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Completion provider id, e.g. "mistral" or "openai".
    pub default_provider: Option<String>,

    /// City whose weather drives route selection.
    pub home_city: String,

    /// Sampling temperature for completion requests.
    pub temperature: f32,

    /// Example TOML:
    /// [providers.mistral]
    /// model = "mistral-small-latest"
    pub providers: HashMap<String, ProviderSettings>,

    #[serde(skip)]
    api_keys: HashMap<String, String>,

    #[serde(skip)]
    weather_api_key: Option<String>,

    #[serde(skip)]
    bot_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_provider: None,
            home_city: "Helsinki".to_string(),
            temperature: 0.7,
            providers: HashMap::new(),
            api_keys: HashMap::new(),
            weather_api_key: None,
            bot_token: None,
        }
    }
}

impl Config {
    /// Return the configured provider as a strongly-typed ProviderId.
    /// Unconfigured installations default to Mistral.
    pub fn default_provider_id(&self) -> Result<ProviderId> {
        match self.default_provider.as_ref() {
            Some(s) => ProviderId::try_from(s.as_str()),
            None => Ok(ProviderId::Mistral),
        }
    }

    /// Model for a provider, falling back to the provider's default.
    pub fn model_for(&self, id: ProviderId) -> String {
        self.providers
            .get(id.as_str())
            .map(|settings| settings.model.clone())
            .unwrap_or_else(|| id.default_model().to_string())
    }

    /// Returns the API key for a provider, if present.
    pub fn provider_api_key(&self, id: ProviderId) -> Option<&str> {
        self.api_keys.get(id.as_str()).map(String::as_str)
    }

    pub fn set_provider_api_key(&mut self, id: ProviderId, api_key: String) {
        self.api_keys.insert(id.as_str().to_string(), api_key);
    }

    /// OpenWeather key; absence degrades weather to "moderate" instead of
    /// failing startup.
    pub fn weather_api_key(&self) -> Option<&str> {
        self.weather_api_key.as_deref()
    }

    /// Messaging gateway token. Required: startup must fail without it.
    pub fn bot_token(&self) -> Result<&str> {
        self.bot_token.as_deref().ok_or_else(|| {
            anyhow!(
                "BOT_TOKEN is not set.\n\
                 Hint: export BOT_TOKEN=<messaging gateway token> or add it to .env."
            )
        })
    }

    /// Load config from disk (if present) and overlay environment secrets.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;

        let mut cfg = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;

            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            // First run: no config file, use the built-in defaults.
            Self::default()
        };

        cfg.read_env();
        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "transit-bot", "transit-bot")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn read_env(&mut self) {
        if let Some(provider) = non_empty_var("COMPLETION_PROVIDER") {
            self.default_provider = Some(provider);
        }

        for id in ProviderId::all() {
            if let Some(key) = non_empty_var(id.key_var()) {
                self.api_keys.insert(id.as_str().to_string(), key);
            }
        }

        self.weather_api_key = non_empty_var("OPENWEATHER_API_KEY").or(self.weather_api_key.take());
        self.bot_token = non_empty_var("BOT_TOKEN").or(self.bot_token.take());
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_config_file() {
        let cfg = Config::default();

        assert_eq!(cfg.home_city, "Helsinki");
        assert_eq!(cfg.temperature, 0.7);
        assert_eq!(cfg.default_provider_id().unwrap(), ProviderId::Mistral);
        assert_eq!(cfg.model_for(ProviderId::Mistral), "mistral-small-latest");
    }

    #[test]
    fn toml_selects_provider_and_model() {
        let cfg: Config = toml::from_str(
            r#"
            default_provider = "openai"
            home_city = "Espoo"

            [providers.openai]
            model = "gpt-4o-mini"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.default_provider_id().unwrap(), ProviderId::OpenAi);
        assert_eq!(cfg.home_city, "Espoo");
        assert_eq!(cfg.model_for(ProviderId::OpenAi), "gpt-4o-mini");
        // Unlisted providers keep their defaults.
        assert_eq!(cfg.model_for(ProviderId::Mistral), "mistral-small-latest");
    }

    #[test]
    fn unknown_provider_name_errors() {
        let mut cfg = Config::default();
        cfg.default_provider = Some("doesnotexist".to_string());

        let err = cfg.default_provider_id().unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn api_keys_are_per_provider() {
        let mut cfg = Config::default();
        cfg.set_provider_api_key(ProviderId::Mistral, "MISTRAL_KEY".to_string());

        assert_eq!(cfg.provider_api_key(ProviderId::Mistral), Some("MISTRAL_KEY"));
        assert_eq!(cfg.provider_api_key(ProviderId::OpenAi), None);
    }

    #[test]
    fn missing_bot_token_is_an_error() {
        let cfg = Config::default();
        let err = cfg.bot_token().unwrap_err();
        assert!(err.to_string().contains("BOT_TOKEN"));
    }
}

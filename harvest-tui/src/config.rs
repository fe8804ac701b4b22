use anyhow::{bail, Context, Result};
use harvest::domain::DataSource;
use harvest::{TelegramSettings, DEFAULT_TELEGRAM_API};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "harvest-tui";
const ENV_PREFIX: &str = "HARVEST";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Sheets offered in the source picker. The first one is loaded on start.
    #[serde(default)]
    pub sources: Vec<DataSource>,
    #[serde(default)]
    pub telegram: Option<TelegramSettings>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Defaults to `harvest-tui.log` in the local data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            sources: vec![DataSource::new(
                "Inventaire",
                "https://script.google.com/macros/s/<deployment-id>/exec",
            )],
            telegram: Some(TelegramSettings {
                bot_token: String::new(),
                chat_id: String::new(),
                api_base: DEFAULT_TELEGRAM_API.to_string(),
            }),
            request_timeout_secs: default_request_timeout_secs(),
            log_file: None,
        }
    }
}

impl HarvestConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join(APP_DIR)
            .join("config.toml"))
    }

    pub fn default_log_path() -> Result<PathBuf> {
        Ok(dirs::data_local_dir()
            .context("Cannot determine data directory")?
            .join(APP_DIR)
            .join("harvest-tui.log"))
    }

    /// Load the config file, if any, then apply `HARVEST_*` environment
    /// overrides (`HARVEST_TELEGRAM__BOT_TOKEN`, ...).
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read config at {}", path.display()))?;

        settings
            .try_deserialize::<Self>()
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Write the default config unless a file already exists. Returns the
    /// path either way.
    pub fn ensure_default_file() -> Result<PathBuf> {
        let path = Self::config_path()?;
        if !path.exists() {
            Self::default().save_to(&path)?;
        }
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Self::default_log_path(),
        }
    }

    /// Bot settings, refusing to start without a token and a chat id.
    pub fn telegram_settings(&self) -> Result<TelegramSettings> {
        let hint = Self::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "the config file".to_string());

        let Some(settings) = &self.telegram else {
            bail!("Missing [telegram] section. Set bot_token and chat_id in {hint}");
        };
        if settings.bot_token.trim().is_empty() {
            bail!("telegram.bot_token is empty. Set it in {hint} or HARVEST_TELEGRAM__BOT_TOKEN");
        }
        if settings.chat_id.trim().is_empty() {
            bail!("telegram.chat_id is empty. Set it in {hint} or HARVEST_TELEGRAM__CHAT_ID");
        }
        Ok(settings.clone())
    }

    pub fn require_sources(&self) -> Result<()> {
        if self.sources.is_empty() {
            bail!("No sources configured. Add at least one [[sources]] entry");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg: HarvestConfig = toml::from_str(
            r#"
            [[sources]]
            name = "Inventaire"
            url = "https://sheet.example/exec"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.sources.len(), 1);
        assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
        assert!(cfg.telegram.is_none());
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn telegram_api_base_defaults() {
        let cfg: HarvestConfig = toml::from_str(
            r#"
            [telegram]
            bot_token = "123:abc"
            chat_id = "-100"
            "#,
        )
        .unwrap();
        let settings = cfg.telegram_settings().unwrap();
        assert_eq!(settings.api_base, DEFAULT_TELEGRAM_API);
    }

    #[test]
    fn default_file_has_no_secrets_and_is_rejected() {
        let cfg = HarvestConfig::default();
        let err = cfg.telegram_settings().unwrap_err();
        assert!(err.to_string().contains("bot_token"));
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let raw = toml::to_string_pretty(&HarvestConfig::default()).unwrap();
        let parsed: HarvestConfig = toml::from_str(&raw).unwrap();
        assert_eq!(parsed.sources, HarvestConfig::default().sources);
    }

    #[test]
    fn no_sources_is_an_error() {
        let cfg = HarvestConfig {
            sources: Vec::new(),
            ..HarvestConfig::default()
        };
        assert!(cfg.require_sources().is_err());
    }
}

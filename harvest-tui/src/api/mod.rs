mod dev_backend;

use anyhow::{Context, Result};
use harvest::{Notifier, SheetClient, SheetStore, TelegramNotifier};

use crate::config::HarvestConfig;

pub use dev_backend::dev_sources;
use dev_backend::{DevNotifier, DevSheet};

/// The two outbound collaborators the app talks to.
pub struct Services {
    pub store: Box<dyn SheetStore>,
    pub notifier: Box<dyn Notifier>,
}

impl Services {
    /// HTTP sheet client and Telegram bot built from `cfg`.
    pub fn live(cfg: &HarvestConfig) -> Result<Self> {
        let telegram = cfg.telegram_settings()?;
        let store = SheetClient::new(cfg.request_timeout()).context("Failed to build HTTP client")?;
        let notifier = TelegramNotifier::new(telegram, cfg.request_timeout())
            .context("Failed to build Telegram client")?;
        Ok(Self {
            store: Box::new(store),
            notifier: Box::new(notifier),
        })
    }

    /// In-memory sheets and a notifier that only logs.
    pub fn dev() -> Self {
        Self {
            store: Box::new(DevSheet::new()),
            notifier: Box::new(DevNotifier::new()),
        }
    }
}

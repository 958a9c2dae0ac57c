use serde::{Deserialize, Serialize};
use std::fs;

use crate::modules::types::SettingsDraft;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PanelConfig {
    pub api_url: String,
    pub poll_interval_secs: u64,
    pub fishing: SettingsDraft,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            // The bot's Flask control server listens on 5000.
            api_url: "http://127.0.0.1:5000".to_string(),
            poll_interval_secs: 2,
            fishing: SettingsDraft::default(),
        }
    }
}

pub fn load_panel_config(
    path: &str,
) -> Result<PanelConfig, Box<dyn std::error::Error + Send + Sync>> {
    let text = fs::read_to_string(path)?;
    let config: PanelConfig = toml::from_str(&text)?;
    Ok(config)
}

pub fn load_panel_config_or_default(
    path: &str,
) -> Result<PanelConfig, Box<dyn std::error::Error + Send + Sync>> {
    match load_panel_config(path) {
        Ok(config) => Ok(config),
        Err(err) if is_not_found(&err) => Ok(PanelConfig::default()),
        Err(err) => Err(err),
    }
}

fn is_not_found(err: &Box<dyn std::error::Error + Send + Sync>) -> bool {
    err.downcast_ref::<std::io::Error>()
        .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

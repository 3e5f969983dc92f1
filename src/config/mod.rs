use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::transfer::TransferOptions;

/// Tallest list a pane will ask the layout for
pub const MAX_LIST_HEIGHT: u16 = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Pane titles (available, chosen)
    pub titles: [String; 2],

    /// Show a search line above each list
    pub search_enabled: bool,

    /// Placeholder shown in an empty search line
    pub search_placeholder: String,

    /// Rows in each pane's list area
    pub list_height: u16,

    /// Text shown when a pane has nothing to display
    pub empty_text: String,

    /// Ask before throwing away unconfirmed moves
    pub confirm_discard: bool,

    /// Colour file (`key #rrggbb` lines, kitty.conf style)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let options = TransferOptions::default();
        Self {
            titles: options.titles,
            search_enabled: options.search_enabled,
            search_placeholder: options.search_placeholder,
            list_height: options.height,
            empty_text: options.empty_text,
            confirm_discard: true,
            theme_path: None,
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("ferry");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default location, creating it on first run
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_or_create(&path),
            Err(e) => {
                tracing::warn!("Using default config: {}", e);
                AppConfig::default()
            }
        }
    }

    fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            return Self::load_from(path);
        }

        let config = AppConfig::default();
        if let Err(e) = config.save_to(path) {
            tracing::warn!("Failed to write default config: {}", e);
        }
        config
    }

    /// Load config from an explicit file. Unreadable or invalid files
    /// fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Failed to parse config {}: {}", path.display(), e),
            },
            Err(e) => tracing::warn!("Failed to read config {}: {}", path.display(), e),
        }
        AppConfig::default()
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let mut clean_config = self.clone();

        // A zero-height list would hide every row
        clean_config.list_height = clean_config.list_height.max(1);

        if clean_config
            .theme_path
            .as_ref()
            .map(|p| p.as_os_str().is_empty())
            .unwrap_or(false)
        {
            clean_config.theme_path = None;
        }

        let content = toml::to_string_pretty(&clean_config)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn transfer_options(&self) -> TransferOptions {
        TransferOptions {
            titles: self.titles.clone(),
            search_enabled: self.search_enabled,
            search_placeholder: self.search_placeholder.clone(),
            height: self.list_height.clamp(1, MAX_LIST_HEIGHT),
            empty_text: self.empty_text.clone(),
        }
    }
}

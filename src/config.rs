//! File configuration for scrim.
//!
//! Holds the theme choice and the display defaults of the three overlay
//! widgets. Callbacks and lifecycle hooks are runtime-only and never part
//! of the file config.

use crate::overlay::{ModalConfig, SheetConfig, ToastConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub(crate) fn default_true() -> bool {
    true
}

fn default_theme() -> String {
    "dark".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme name: "dark", "light", or "no-color"
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Toast defaults
    #[serde(default)]
    pub toast: ToastConfig,
    /// Modal defaults
    #[serde(default)]
    pub modal: ModalConfig,
    /// Action sheet defaults
    #[serde(default)]
    pub sheet: SheetConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            toast: ToastConfig::default(),
            modal: ModalConfig::default(),
            sheet: SheetConfig::default(),
        }
    }
}

impl UiConfig {
    /// Load configuration from file, or create and persist the defaults
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let config: UiConfig =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }
        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{Animation, ToastIcon, ToastPlace};

    #[test]
    fn test_default_config() {
        let config = UiConfig::default();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.toast.duration_ms, 2000);
        assert_eq!(config.toast.icon, ToastIcon::None);
        assert!(config.modal.mask_can_close);
        assert_eq!(config.sheet.animation, Animation::SlideUp);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: UiConfig = toml::from_str(
            r#"
            theme = "light"

            [toast]
            place = "bottom"
            duration_ms = 1500
            "#,
        )
        .unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.toast.place, ToastPlace::Bottom);
        assert_eq!(config.toast.duration_ms, 1500);
        // Untouched sections keep their defaults.
        assert_eq!(config.modal.width, 44);
        assert!(config.sheet.safe_area);
    }
}

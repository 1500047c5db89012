//! Command-line interface for the demo binary.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "scrim-demo",
    version,
    about = "Interactive showcase for the scrim overlay widgets"
)]
pub struct Cli {
    /// Path to the config file (default: <config dir>/scrim/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Theme override: dark, light, or no-color
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Disable all UI colors (same as --theme no-color)
    #[arg(long)]
    pub no_colors: bool,

    /// Event poll interval in milliseconds
    #[arg(long, default_value_t = 33)]
    pub tick_rate: u64,
}

impl Cli {
    /// Resolve the config file path, falling back to the platform default
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("scrim")
                .join("config.toml")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tick_rate() {
        let cli = Cli::parse_from(["scrim-demo"]);
        assert_eq!(cli.tick_rate, 33);
        assert!(!cli.no_colors);
    }

    #[test]
    fn test_theme_flag() {
        let cli = Cli::parse_from(["scrim-demo", "--theme", "light"]);
        assert_eq!(cli.theme.as_deref(), Some("light"));
    }
}

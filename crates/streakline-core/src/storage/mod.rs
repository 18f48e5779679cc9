mod config;
pub mod database;
pub mod migrations;

pub use config::{ClockConfig, Config, OutputConfig};
pub use database::{CompletionSource, Database};

use std::path::PathBuf;

use crate::error::Result;

/// Returns the directory holding `streakline.db` and `config.toml`.
///
/// `STREAKLINE_DATA_DIR` wins when set. Otherwise this is
/// `~/.config/streakline[-dev]/`, with STREAKLINE_ENV=dev selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("STREAKLINE_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("STREAKLINE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("streakline-dev")
            } else {
                base_dir.join("streakline")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

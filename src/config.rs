// src/config.rs

use crate::error::{MoodlogError, Result};
use std::env;
use std::path::PathBuf;

/// Runtime settings resolved from flags and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub editor: String,
}

impl Config {
    /// `db_override` comes from `--db` / `MOODLOG_DB`; otherwise `~/.config/moodlog/moodlog.db`.
    pub fn load(db_override: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_override {
            Some(path) => path,
            None => default_db_path()?,
        };
        Ok(Config {
            db_path,
            editor: detect_editor(),
        })
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or(MoodlogError::HomeDirNotFound)?;
    Ok(home_dir.join(".config/moodlog/moodlog.db"))
}

fn detect_editor() -> String {
    ["MOODLOG_EDITOR", "EDITOR", "VISUAL"]
        .iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string())
}

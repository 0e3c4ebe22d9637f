//! Cross-Platform Path Utilities
//!
//! Functions for resolving the application's directories across platforms.

use std::path::PathBuf;

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the CodeSense directory (~/.codesense/)
pub fn codesense_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".codesense"))
}

/// Get the config file path (~/.codesense/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(codesense_dir()?.join("config.json"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &PathBuf) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the CodeSense directory, creating if it doesn't exist
pub fn ensure_codesense_dir() -> AppResult<PathBuf> {
    let path = codesense_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_dir() {
        let home = home_dir();
        assert!(home.is_ok());
    }

    #[test]
    fn test_config_path_under_codesense_dir() {
        let path = config_path().unwrap();
        assert!(path.ends_with(".codesense/config.json"));
    }
}

//! File System Utilities
//!
//! Configuration directory management.

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "bnei", "blog-lang").ok_or_else(|| Error::Invalid {
        message: "Could not determine project directories".to_string(),
    })
}

/// Get or create the application's configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/blog-lang/` or `$XDG_CONFIG_HOME/blog-lang/`
/// - **macOS**: `~/Library/Application Support/dev.bnei.blog-lang/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\bnei\blog-lang\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    let project_dirs = project_dirs()?;
    let config_dir = project_dirs.config_dir();

    if !config_dir.exists() {
        fs::create_dir_all(config_dir)?;
    }

    Ok(config_dir.to_path_buf())
}

/// Check if running in development mode
pub fn is_development() -> bool {
    cfg!(debug_assertions)
}

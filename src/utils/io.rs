// src/utils/io.rs
use std::path::PathBuf;

/// Get the application config directory, if the platform has one
pub fn get_app_config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "utilityhub", "utility-hub")
        .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

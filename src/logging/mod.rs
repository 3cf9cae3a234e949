// src/logging/mod.rs
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use env_logger::{Builder, Target};
use thiserror::Error;

use crate::core::config::Config;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Logger already initialized: {0}")]
    AlreadyInitialized(#[from] log::SetLoggerError),
}

pub type Result<T> = std::result::Result<T, LoggingError>;

// Configure the logger from config; RUST_LOG still wins when set
pub fn init(config: &Config) -> Result<()> {
    let mut builder = builder(config);

    if let Some(path) = &config.log_file {
        builder.target(Target::Pipe(Box::new(open_log_file(path)?)));
    }

    builder.try_init()?;
    log::debug!("Logging at {} level", config.log_level);
    Ok(())
}

fn builder(config: &Config) -> Builder {
    let mut builder = Builder::new();
    builder
        .filter_level(config.log_level)
        .format_timestamp_secs()
        .format_module_path(true)
        .format_target(false)
        .parse_default_env();
    builder
}

// Append to the log file, creating its directory when missing
fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("hub.log");

        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}

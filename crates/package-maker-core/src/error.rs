//! Error types shared across the package maker

use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a session before anything is written
#[derive(Debug, Error)]
pub enum MakeError {
    #[error("Invalid package name. Please make sure you choose a valid package name. eg. ambersive/demo.")]
    InvalidName(String),

    #[error("Package already exists!")]
    AlreadyExists(PathBuf),

    #[error("At least one framework version must be selected.")]
    NoVersions,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl MakeError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            MakeError::InvalidName(_) | MakeError::AlreadyExists(_) | MakeError::NoVersions => 1,
            MakeError::Config(_) => 2,
        }
    }
}

/// Errors raised while loading stubs
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Unknown stub: {0}")]
    Unknown(String),

    #[error("Failed to read stub {name} from {path}: {message}")]
    Read {
        name: String,
        path: PathBuf,
        message: String,
    },

    #[error("Invalid stub manifest: {0}")]
    Manifest(#[from] serde_yaml::Error),
}

/// Errors raised while resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("Config file already exists: {0}")]
    Exists(PathBuf),
}

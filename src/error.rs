use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TfError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Generation(#[from] GeneratorError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration key '{0}': segments must be non-empty")]
    InvalidKey(String),

    #[error("Missing value for '{0}' (usage: tf config set <KEY> <VALUE>)")]
    MissingValue(String),

    #[error("Failed to save config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown provider: {0} (expected one of: aws, vercel, gcp)")]
    UnknownProvider(String),
}

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Unsupported {provider} resource: {kind}. Supported: {supported}")]
    UnsupportedResource {
        provider: String,
        kind: String,
        supported: String,
    },

    #[error("Resource name is required (use -n or --name)")]
    MissingName,

    #[error("Invalid resource name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Output file creation failed: {path}: {source}")]
    OutputCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to render {template}: {message}")]
    Render { template: String, message: String },
}

pub type Result<T> = std::result::Result<T, TfError>;

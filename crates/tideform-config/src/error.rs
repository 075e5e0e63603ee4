use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config directory not found")]
    ConfigDirNotFound,

    #[error("config file not found: {}", .0.display())]
    ConfigFileNotFound(PathBuf),

    #[error(
        "no API token configured. Set one of:\n\
        - TIDEFORM_TOKEN or DIGITALOCEAN_TOKEN environment variable\n\
        - `token` in the config file"
    )]
    MissingToken,

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("YAML parse error in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

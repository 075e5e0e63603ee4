//! App Platform error types

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppsError {
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("error deploying app ({app_id}) (deployment ID: {deployment_id}):\n{progress}")]
    DeploymentFailed {
        app_id: String,
        deployment_id: String,
        progress: String,
    },

    #[error("timeout waiting for app ({app_id}) deployment")]
    DeploymentTimeout { app_id: String },

    #[error("no active deployment found for app {name} ({id})")]
    MissingActiveDeployment { name: String, id: String },

    #[error("invalid paging link: {0}")]
    InvalidPageLink(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Provider error: {0}")]
    Provider(#[from] tideform_provider::ProviderError),
}

impl AppsError {
    /// Whether the vendor answered 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppsError::Api { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

pub type Result<T> = std::result::Result<T, AppsError>;

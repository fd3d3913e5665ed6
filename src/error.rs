use std::path::PathBuf;

use thiserror::Error;

use crate::version::VersionError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidFormat(#[from] VersionError),

    #[error("unsupported Kubernetes version: {version}\nSupported versions: {}", .supported.join(", "))]
    UnsupportedVersion {
        version: String,
        supported: Vec<String>,
    },

    #[error("component '{component}' not found for Kubernetes {k8s_version}")]
    ComponentNotFound {
        component: String,
        k8s_version: String,
    },

    #[error("component '{0}' not found for any supported Kubernetes version")]
    UnknownComponent(String),

    #[error("invalid upgrade range {from} -> {to}: {reason}")]
    InvalidRange {
        from: String,
        to: String,
        reason: String,
    },

    #[error("{0}")]
    MissingArgument(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("table rendering error")]
    Table(#[from] std::fmt::Error),

    #[error("Failed to read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

impl Error {
    /// Whether this error means something was absent from the compatibility table
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedVersion { .. }
                | Error::ComponentNotFound { .. }
                | Error::UnknownComponent(_)
        )
    }
}

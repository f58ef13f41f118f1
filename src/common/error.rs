use std::path::PathBuf;
use thiserror::Error;

use crate::domain::value_objects::scm_type::ScmType;
use crate::infrastructure::scm::scm_gateway::ScmError;

#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Could not acquire {scm_type} gateway: {source}")]
    GatewayUnavailable {
        scm_type: ScmType,
        #[source]
        source: ScmError,
    },

    #[error("Failed to create tag at '{tag_url}': {source}")]
    TagCreationFailed {
        tag_url: String,
        #[source]
        source: ScmError,
    },

    #[error("Failed to commit working copy: {source}")]
    CommitFailed {
        #[source]
        source: ScmError,
    },

    #[error("Coordinator is not prepared, cannot {operation}")]
    NotPrepared { operation: String },

    #[error("Build step failed: {message}")]
    BuildStepFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {field} - {message}")]
    ValidationError {
        field: String,
        message: String,
        value: Option<String>,
    },

    #[error("File system operation failed: {message}")]
    FileSystemError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Serialization error: {message}")]
    SerializationError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl ReleaseError {
    pub fn gateway_unavailable(scm_type: ScmType, source: ScmError) -> Self {
        Self::GatewayUnavailable { scm_type, source }
    }

    pub fn tag_creation_failed(tag_url: impl Into<String>, source: ScmError) -> Self {
        Self::TagCreationFailed {
            tag_url: tag_url.into(),
            source,
        }
    }

    pub fn commit_failed(source: ScmError) -> Self {
        Self::CommitFailed { source }
    }

    pub fn not_prepared(operation: impl Into<String>) -> Self {
        Self::NotPrepared {
            operation: operation.into(),
        }
    }

    pub fn build_step_failed(message: impl Into<String>) -> Self {
        Self::BuildStepFailed {
            message: message.into(),
            source: None,
        }
    }

    pub fn build_step_failed_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::BuildStepFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn config_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::ConfigError {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn validation_error(
        field: impl Into<String>,
        message: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
            value,
        }
    }

    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    pub fn serialization_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::SerializationError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Whether this error came out of the version-control backend.
    pub fn is_scm_failure(&self) -> bool {
        matches!(
            self,
            Self::GatewayUnavailable { .. }
                | Self::TagCreationFailed { .. }
                | Self::CommitFailed { .. }
        )
    }
}

impl From<std::io::Error> for ReleaseError {
    fn from(error: std::io::Error) -> Self {
        Self::filesystem_error_with_source("File system operation failed", None, error)
    }
}

impl From<serde_yaml::Error> for ReleaseError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::serialization_error_with_source("YAML serialization failed", error)
    }
}

impl From<serde_json::Error> for ReleaseError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization_error_with_source("JSON serialization failed", error)
    }
}

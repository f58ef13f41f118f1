use crate::domain::value_objects::scm_type::ScmType;
use async_trait::async_trait;
use tracing::{error, info};

/// Version-control side effects a release build needs.
///
/// Implementations are acquired through an [`ScmConnector`] and owned by a
/// single coordinator for one build.
#[async_trait]
pub trait ScmGateway: Send + Sync {
    /// Create a tag (SVN: URL of the copy, Git: tag name) with the given comment
    async fn create_tag(&self, tag_url: &str, comment: &str) -> Result<(), ScmError>;

    /// Commit all pending changes of the working copy
    async fn commit_working_copy(&self, comment: &str) -> Result<(), ScmError>;

    /// Discard local modifications of the working copy
    async fn revert_working_copy(&self) -> Result<(), ScmError>;

    /// Remove a tag created earlier in this build
    async fn revert_tag(&self, tag_url: &str, comment: &str) -> Result<(), ScmError>;

    /// Remote repository URL of the working copy
    fn remote_url(&self) -> &str;

    /// Get the SCM type this implementation handles
    fn scm_type(&self) -> ScmType;

    /// Revert the working copy, reporting instead of returning any failure.
    ///
    /// Returns whether the revert went through.
    async fn safe_revert_working_copy(&self) -> bool {
        match self.revert_working_copy().await {
            Ok(()) => {
                info!(scm = %self.scm_type(), "Reverted working copy");
                true
            }
            Err(e) => {
                error!(
                    scm = %self.scm_type(),
                    error = %e,
                    "Failed to revert working copy, manual cleanup required"
                );
                false
            }
        }
    }

    /// Remove a tag, reporting instead of returning any failure.
    ///
    /// Returns whether the tag is gone.
    async fn safe_revert_tag(&self, tag_url: &str, comment: &str) -> bool {
        match self.revert_tag(tag_url, comment).await {
            Ok(()) => {
                info!(scm = %self.scm_type(), tag = tag_url, "Reverted release tag");
                true
            }
            Err(e) => {
                error!(
                    scm = %self.scm_type(),
                    tag = tag_url,
                    error = %e,
                    "Failed to revert release tag, manual cleanup required"
                );
                false
            }
        }
    }
}

/// Acquires a gateway handle for one build.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScmConnector: Send + Sync {
    /// Check the backend is usable and open the working copy
    async fn connect(&self) -> Result<Box<dyn ScmGateway>, ScmError>;

    /// Backend kind of the gateways this connector produces
    fn scm_type(&self) -> ScmType;
}

/// Errors that can occur during SCM operations
#[derive(Debug, thiserror::Error)]
pub enum ScmError {
    #[error("Not a {scm_type} working copy: {path}")]
    NotAWorkingCopy { scm_type: ScmType, path: String },

    #[error("SCM executable not found: {executable}")]
    ExecutableNotFound { executable: String },

    #[error("Command execution failed: {command}, exit code: {exit_code}, stderr: {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("SCM operation failed: {message}")]
    OperationFailed { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl ScmError {
    /// Create a not-a-working-copy error
    pub fn not_a_working_copy(scm_type: ScmType, path: impl Into<String>) -> Self {
        Self::NotAWorkingCopy {
            scm_type,
            path: path.into(),
        }
    }

    /// Create an executable not found error
    pub fn executable_not_found(executable: impl Into<String>) -> Self {
        Self::ExecutableNotFound {
            executable: executable.into(),
        }
    }

    /// Create a command failed error
    pub fn command_failed(
        command: impl Into<String>,
        exit_code: i32,
        stderr: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            command: command.into(),
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Create a generic operation failure
    pub fn operation_failed(message: impl Into<String>) -> Self {
        Self::OperationFailed {
            message: message.into(),
        }
    }
}

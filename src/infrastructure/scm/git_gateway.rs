use super::command;
use super::scm_gateway::{ScmConnector, ScmError, ScmGateway};
use crate::domain::value_objects::scm_type::ScmType;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, info, warn};

const DEFAULT_REMOTE: &str = "origin";

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Opens Git work trees
pub struct GitConnector {
    git_executable: String,
    working_dir: PathBuf,
    remote: String,
    push: bool,
}

impl GitConnector {
    /// Create a connector for the work tree at `working_dir`
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            git_executable: ScmType::Git.executable_name().to_string(),
            working_dir: working_dir.into(),
            remote: DEFAULT_REMOTE.to_string(),
            push: false,
        }
    }

    /// Use a custom executable path
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.git_executable = executable.into();
        self
    }

    /// Remote to read the URL from and push to
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Push tags and commits to the remote as they are made
    pub fn with_push(mut self, push: bool) -> Self {
        self.push = push;
        self
    }

    async fn git(&self, values: &[&str]) -> Result<String, ScmError> {
        command::run_checked(&self.git_executable, &args(values), Some(&self.working_dir)).await
    }
}

#[async_trait]
impl ScmConnector for GitConnector {
    async fn connect(&self) -> Result<Box<dyn ScmGateway>, ScmError> {
        command::check_availability(&self.git_executable).await?;

        let inside = self
            .git(&["rev-parse", "--is-inside-work-tree"])
            .await
            .unwrap_or_default();
        if inside != "true" {
            return Err(ScmError::not_a_working_copy(
                ScmType::Git,
                self.working_dir.display().to_string(),
            ));
        }

        let base_commit = self.git(&["rev-parse", "HEAD"]).await?;

        let remote_url = match self.git(&["remote", "get-url", self.remote.as_str()]).await {
            Ok(url) => url,
            Err(e) => {
                warn!(remote = %self.remote, error = %e, "Remote URL unavailable");
                String::new()
            }
        };

        info!(
            commit = %base_commit,
            remote = %self.remote,
            path = %self.working_dir.display(),
            "Opened Git work tree"
        );

        Ok(Box::new(GitGateway {
            git_executable: self.git_executable.clone(),
            working_dir: self.working_dir.clone(),
            remote: self.remote.clone(),
            push: self.push,
            base_commit,
            remote_url,
        }))
    }

    fn scm_type(&self) -> ScmType {
        ScmType::Git
    }
}

/// Git implementation of the release gateway
///
/// Rolls the work tree back to the commit recorded when it was opened.
pub struct GitGateway {
    git_executable: String,
    working_dir: PathBuf,
    remote: String,
    push: bool,
    base_commit: String,
    remote_url: String,
}

impl GitGateway {
    async fn git(&self, values: Vec<String>) -> Result<String, ScmError> {
        command::run_checked(&self.git_executable, &values, Some(&self.working_dir)).await
    }

    fn tag_args(&self, tag_name: &str, comment: &str) -> Vec<String> {
        args(&["tag", "--annotate", tag_name, "--message", comment])
    }

    fn push_tag_args(&self, tag_name: &str) -> Vec<String> {
        vec![
            "push".to_string(),
            self.remote.clone(),
            format!("refs/tags/{}", tag_name),
        ]
    }

    fn delete_remote_tag_args(&self, tag_name: &str) -> Vec<String> {
        vec![
            "push".to_string(),
            self.remote.clone(),
            format!(":refs/tags/{}", tag_name),
        ]
    }

    fn reset_args(&self) -> Vec<String> {
        args(&["reset", "--hard", self.base_commit.as_str()])
    }
}

#[async_trait]
impl ScmGateway for GitGateway {
    async fn create_tag(&self, tag_name: &str, comment: &str) -> Result<(), ScmError> {
        info!(tag = tag_name, "Creating Git tag");
        self.git(self.tag_args(tag_name, comment)).await?;

        if self.push {
            if let Err(e) = self.git(self.push_tag_args(tag_name)).await {
                // a tag that never reached the remote is not a created tag
                if let Err(cleanup) = self.git(args(&["tag", "--delete", tag_name])).await {
                    warn!(tag = tag_name, error = %cleanup, "Could not delete unpushed tag");
                }
                return Err(e);
            }
        }

        Ok(())
    }

    async fn commit_working_copy(&self, comment: &str) -> Result<(), ScmError> {
        info!(path = %self.working_dir.display(), "Committing Git work tree");
        self.git(args(&["commit", "--all", "--message", comment])).await?;

        if self.push {
            self.git(vec![
                "push".to_string(),
                self.remote.clone(),
                "HEAD".to_string(),
            ])
            .await?;
        }

        Ok(())
    }

    async fn revert_working_copy(&self) -> Result<(), ScmError> {
        self.git(self.reset_args()).await?;
        Ok(())
    }

    async fn revert_tag(&self, tag_name: &str, comment: &str) -> Result<(), ScmError> {
        debug!(tag = tag_name, comment, "Deleting Git tag");
        self.git(args(&["tag", "--delete", tag_name])).await?;

        if self.push {
            self.git(self.delete_remote_tag_args(tag_name)).await?;
        }

        Ok(())
    }

    fn remote_url(&self) -> &str {
        &self.remote_url
    }

    fn scm_type(&self) -> ScmType {
        ScmType::Git
    }
}

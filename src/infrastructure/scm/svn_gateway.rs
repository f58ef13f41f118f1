use super::command;
use super::scm_gateway::{ScmConnector, ScmError, ScmGateway};
use crate::domain::value_objects::scm_type::ScmType;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Optional credentials handed to every `svn` invocation
#[derive(Clone, Default)]
struct SvnAuth {
    username: Option<String>,
    password: Option<String>,
}

impl SvnAuth {
    /// Build authentication arguments if credentials are provided
    fn args(&self) -> Vec<String> {
        let mut args = vec!["--non-interactive".to_string()];

        if let Some(user) = &self.username {
            args.push("--username".to_string());
            args.push(user.clone());
        }

        if let Some(pass) = &self.password {
            args.push("--password".to_string());
            args.push(pass.clone());
            args.push("--no-auth-cache".to_string());
        }

        args
    }
}

/// Opens Subversion working copies
pub struct SvnConnector {
    svn_executable: String,
    working_copy: PathBuf,
    auth: SvnAuth,
}

impl SvnConnector {
    /// Create a connector for the working copy at `working_copy`
    pub fn new(working_copy: impl Into<PathBuf>) -> Self {
        Self {
            svn_executable: ScmType::Svn.executable_name().to_string(),
            working_copy: working_copy.into(),
            auth: SvnAuth::default(),
        }
    }

    /// Use a custom executable path
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.svn_executable = executable.into();
        self
    }

    /// Authenticate every command with these credentials
    pub fn with_credentials(mut self, username: Option<String>, password: Option<String>) -> Self {
        self.auth = SvnAuth { username, password };
        self
    }
}

#[async_trait]
impl ScmConnector for SvnConnector {
    async fn connect(&self) -> Result<Box<dyn ScmGateway>, ScmError> {
        command::check_availability(&self.svn_executable).await?;

        let mut args = vec![
            "info".to_string(),
            "--show-item".to_string(),
            "url".to_string(),
        ];
        args.extend(self.auth.args());

        let remote_url = command::run_checked(&self.svn_executable, &args, Some(&self.working_copy))
            .await
            .map_err(|e| match e {
                ScmError::CommandFailed { .. } => ScmError::not_a_working_copy(
                    ScmType::Svn,
                    self.working_copy.display().to_string(),
                ),
                other => other,
            })?;

        info!(url = %remote_url, path = %self.working_copy.display(), "Opened SVN working copy");

        Ok(Box::new(SvnGateway {
            svn_executable: self.svn_executable.clone(),
            working_copy: self.working_copy.clone(),
            remote_url,
            auth: self.auth.clone(),
        }))
    }

    fn scm_type(&self) -> ScmType {
        ScmType::Svn
    }
}

/// Subversion implementation of the release gateway
pub struct SvnGateway {
    svn_executable: String,
    working_copy: PathBuf,
    remote_url: String,
    auth: SvnAuth,
}

impl SvnGateway {
    fn working_copy(&self) -> &Path {
        &self.working_copy
    }

    /// Tagging copies the working copy state to the tag URL in one commit
    fn tag_args(&self, tag_url: &str, comment: &str) -> Vec<String> {
        let mut args = vec!["copy".to_string()];
        args.extend(self.auth.args());
        args.extend([
            "--message".to_string(),
            comment.to_string(),
            ".".to_string(),
            tag_url.to_string(),
        ]);
        args
    }

    fn commit_args(&self, comment: &str) -> Vec<String> {
        let mut args = vec!["commit".to_string()];
        args.extend(self.auth.args());
        args.extend(["--message".to_string(), comment.to_string()]);
        args
    }

    fn revert_args(&self) -> Vec<String> {
        vec![
            "revert".to_string(),
            "--recursive".to_string(),
            ".".to_string(),
        ]
    }

    fn delete_tag_args(&self, tag_url: &str, comment: &str) -> Vec<String> {
        let mut args = vec!["delete".to_string()];
        args.extend(self.auth.args());
        args.extend([
            "--message".to_string(),
            format!("Reverting tag of failed release: {}", comment),
            tag_url.to_string(),
        ]);
        args
    }
}

#[async_trait]
impl ScmGateway for SvnGateway {
    async fn create_tag(&self, tag_url: &str, comment: &str) -> Result<(), ScmError> {
        info!(tag = tag_url, "Creating SVN tag");
        command::run_checked(
            &self.svn_executable,
            &self.tag_args(tag_url, comment),
            Some(self.working_copy()),
        )
        .await?;
        Ok(())
    }

    async fn commit_working_copy(&self, comment: &str) -> Result<(), ScmError> {
        info!(path = %self.working_copy.display(), "Committing SVN working copy");
        let output = command::run_checked(
            &self.svn_executable,
            &self.commit_args(comment),
            Some(self.working_copy()),
        )
        .await?;
        debug!(output = %output, "svn commit finished");
        Ok(())
    }

    async fn revert_working_copy(&self) -> Result<(), ScmError> {
        command::run_checked(&self.svn_executable, &self.revert_args(), Some(self.working_copy()))
            .await?;
        Ok(())
    }

    async fn revert_tag(&self, tag_url: &str, comment: &str) -> Result<(), ScmError> {
        command::run_checked(
            &self.svn_executable,
            &self.delete_tag_args(tag_url, comment),
            Some(self.working_copy()),
        )
        .await?;
        Ok(())
    }

    fn remote_url(&self) -> &str {
        &self.remote_url
    }

    fn scm_type(&self) -> ScmType {
        ScmType::Svn
    }
}

//! Test fixtures for creating test data
//!
//! Release contexts, credential settings and configuration files used
//! across the integration tests.

use std::path::PathBuf;
use tempfile::TempDir;
use relmgr::domain::entities::{CredentialsConfig, ReleaseManagementContext, RoleCredentials};
use relmgr::domain::value_objects::CredentialOverrideChoice;

pub const SVN_TAG_URL: &str = "https://svn.example.com/repo/tags/app-1.0.0";
pub const TAG_COMMENT: &str = "[release] app 1.0.0";
pub const NEXT_DEV_COMMENT: &str = "[release] next development iteration";

/// Test fixture for release management contexts
pub struct ContextFixture;

impl ContextFixture {
    /// Release management on, tag creation requested
    pub fn tagging() -> ReleaseManagementContext {
        ReleaseManagementContext::default()
            .with_enabled(true)
            .with_tag(SVN_TAG_URL, TAG_COMMENT)
            .with_next_development_comment(NEXT_DEV_COMMENT)
    }

    /// Release management on, no tag
    pub fn without_tag() -> ReleaseManagementContext {
        ReleaseManagementContext::default()
            .with_enabled(true)
            .with_next_development_comment(NEXT_DEV_COMMENT)
    }

    /// Git flavour: the tag is a tag name
    pub fn git_tagging() -> ReleaseManagementContext {
        ReleaseManagementContext::default()
            .with_enabled(true)
            .with_tag("v1.0.0", TAG_COMMENT)
            .with_next_development_comment(NEXT_DEV_COMMENT)
    }
}

/// Test fixture for credential settings
pub struct CredentialsFixture;

impl CredentialsFixture {
    pub fn role(choice: CredentialOverrideChoice) -> RoleCredentials {
        RoleCredentials::new(choice)
    }

    pub fn config(resolver: RoleCredentials, deployer: RoleCredentials) -> CredentialsConfig {
        CredentialsConfig::new(resolver, deployer)
    }
}

/// A temporary working directory holding configuration files
pub struct ConfigFixture {
    pub temp_dir: TempDir,
}

impl ConfigFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write a file into the working directory and return its path
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    pub fn path(&self) -> &std::path::Path {
        self.temp_dir.path()
    }
}

/// A configuration file with both roles and a shared credentials table
pub const CREDENTIALS_YAML: &str = r#"
credentials:
  resolver:
    override: usernamePassword
    username: resolver-user
    password: resolver-pass
  deployer:
    override: sharedCredentials
    shared_credentials_id: deployer-creds
shared_credentials:
  deployer-creds:
    username: deploy-bot
    password: deploy-token
"#;

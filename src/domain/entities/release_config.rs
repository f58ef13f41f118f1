use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::credentials::{CredentialsConfig, UsernamePassword};
use super::release_context::ReleaseManagementContext;
use crate::common::error::ReleaseError;
use crate::common::result::ReleaseResult;
use crate::domain::value_objects::scm_type::ScmType;

/// How to reach the version-control backend
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScmSettings {
    /// Backend kind; detected from the working directory when omitted
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub scm_type: Option<ScmType>,

    /// Custom path to the `svn` / `git` executable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,

    /// Git remote to read the URL from and push to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,

    /// Push Git tags and commits as they are made
    pub push: bool,

    /// SVN username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// SVN password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl fmt::Debug for ScmSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScmSettings")
            .field("scm_type", &self.scm_type)
            .field("executable", &self.executable)
            .field("remote", &self.remote)
            .field("push", &self.push)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .finish()
    }
}

/// Contents of a `relmgr.yaml` file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Release management settings
    pub release: ReleaseManagementContext,

    /// Backend settings
    pub scm: ScmSettings,

    /// Per-role credential settings
    pub credentials: CredentialsConfig,

    /// Local table standing in for the build server's shared credentials
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub shared_credentials: BTreeMap<String, UsernamePassword>,
}

impl ReleaseConfig {
    /// Check the configuration is usable for the given backend.
    pub fn validate(&self, scm_type: ScmType) -> ReleaseResult<()> {
        self.release.validate(scm_type)?;

        if scm_type == ScmType::Git && (self.scm.username.is_some() || self.scm.password.is_some())
        {
            return Err(ReleaseError::validation_error(
                "scm.username",
                "git credentials come from the remote's own helper, not from relmgr",
                None,
            ));
        }

        for (id, credentials) in &self.shared_credentials {
            if credentials.username.trim().is_empty() {
                return Err(ReleaseError::validation_error(
                    format!("shared_credentials.{}.username", id),
                    "must not be blank",
                    None,
                ));
            }
        }

        Ok(())
    }
}

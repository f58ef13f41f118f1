use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::value_objects::credential_override::{CredentialOverrideChoice, CredentialRole};

const REDACTED: &str = "********";

/// A username/password pair.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UsernamePassword {
    pub username: String,
    pub password: String,
}

impl UsernamePassword {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for UsernamePassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsernamePassword")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Credential configuration of a single role.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleCredentials {
    /// Override policy for this role
    #[serde(rename = "override")]
    pub override_choice: CredentialOverrideChoice,

    /// Identifier of centrally stored credentials
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_credentials_id: Option<String>,

    /// Username configured on the job
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password configured on the job
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl RoleCredentials {
    pub fn new(override_choice: CredentialOverrideChoice) -> Self {
        Self {
            override_choice,
            ..Self::default()
        }
    }

    pub fn with_shared_credentials_id(mut self, id: impl Into<String>) -> Self {
        self.shared_credentials_id = Some(id.into());
        self
    }

    pub fn with_username_password(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }
}

impl fmt::Debug for RoleCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleCredentials")
            .field("override_choice", &self.override_choice)
            .field("shared_credentials_id", &self.shared_credentials_id)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .finish()
    }
}

/// Credential configuration for both roles. The roles never share settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub resolver: RoleCredentials,
    pub deployer: RoleCredentials,
}

impl CredentialsConfig {
    pub fn new(resolver: RoleCredentials, deployer: RoleCredentials) -> Self {
        Self { resolver, deployer }
    }

    pub fn for_role(&self, role: CredentialRole) -> &RoleCredentials {
        match role {
            CredentialRole::Resolver => &self.resolver,
            CredentialRole::Deployer => &self.deployer,
        }
    }
}

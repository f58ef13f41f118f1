use std::collections::HashMap;

use crate::common::error::ReleaseError;
use crate::common::result::ReleaseResult;
use crate::domain::entities::credentials::{CredentialsConfig, RoleCredentials};
use crate::domain::value_objects::credential_override::CredentialOverrideChoice;

pub const RESOLVER_OVERRIDE_CREDENTIALS_CHOICE: &str = "resolver.overrideCredentialsChoice";
pub const DEPLOYER_OVERRIDE_CREDENTIALS_CHOICE: &str = "deployer.overrideCredentialsChoice";
pub const RESOLVER_SHARED_CREDENTIALS: &str = "resolver.sharedCredentials";
pub const DEPLOYER_SHARED_CREDENTIALS: &str = "deployer.sharedCredentials";
pub const SERVER_ID_PARAM: &str = "serverId";
pub const USERNAME_PARAM: &str = "username";
pub const PASSWORD_PARAM: &str = "password";
pub const BUILD_NAME: &str = "relmgr.task.buildName";
pub const BUILD_NUMBER: &str = "relmgr.task.buildNumber";

/// Read-only view over a build task's flat configuration.
///
/// Server id, username and password live under a task-specific key prefix
/// (for example `builder.` or `deployer.`); every other key is global.
#[derive(Debug, Clone, Default)]
pub struct BuildTaskContext {
    env: HashMap<String, String>,
    prefix: String,
}

impl BuildTaskContext {
    pub fn new(env: HashMap<String, String>) -> Self {
        Self {
            env,
            prefix: String::new(),
        }
    }

    pub fn with_prefix(env: HashMap<String, String>, prefix: impl Into<String>) -> Self {
        Self {
            env,
            prefix: prefix.into(),
        }
    }

    /// The raw key/value map
    pub fn entries(&self) -> &HashMap<String, String> {
        &self.env
    }

    /// Whether any key starts with `prefix`
    pub fn has_key_with_prefix(&self, prefix: &str) -> bool {
        self.env.keys().any(|key| key.starts_with(prefix))
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    fn get_prefixed(&self, key: &str) -> Option<&str> {
        self.get(&format!("{}{}", self.prefix, key))
    }

    fn non_blank(value: Option<&str>) -> Option<&str> {
        value.filter(|v| !v.trim().is_empty())
    }

    /// Configured repository server id; `None` when not set.
    pub fn server_id(&self) -> ReleaseResult<Option<i64>> {
        match Self::non_blank(self.get_prefixed(SERVER_ID_PARAM)) {
            None => Ok(None),
            Some(raw) => raw.trim().parse::<i64>().map(Some).map_err(|_| {
                ReleaseError::validation_error(
                    SERVER_ID_PARAM,
                    "server id must be a number",
                    Some(raw.to_string()),
                )
            }),
        }
    }

    /// Build name, falling back to the plan name for tasks configured before
    /// build names could be customized.
    pub fn build_name(&self, plan_name: &str) -> String {
        Self::non_blank(self.get(BUILD_NAME))
            .unwrap_or(plan_name)
            .to_string()
    }

    /// Build number, falling back to the host's build number.
    pub fn build_number(&self, host_build_number: u64) -> String {
        Self::non_blank(self.get(BUILD_NUMBER))
            .map(str::to_string)
            .unwrap_or_else(|| host_build_number.to_string())
    }

    pub fn username(&self) -> Option<&str> {
        self.get_prefixed(USERNAME_PARAM)
    }

    pub fn password(&self) -> Option<&str> {
        self.get_prefixed(PASSWORD_PARAM)
    }

    /// Assemble the per-role credential settings. Both roles see the task's
    /// username/password; override choice and shared id are per role.
    pub fn credentials_config(&self) -> CredentialsConfig {
        let role = |choice_key: &str, shared_key: &str| RoleCredentials {
            override_choice: CredentialOverrideChoice::parse(self.get(choice_key)),
            shared_credentials_id: self.get(shared_key).map(str::to_string),
            username: self.username().map(str::to_string),
            password: self.password().map(str::to_string),
        };

        CredentialsConfig::new(
            role(RESOLVER_OVERRIDE_CREDENTIALS_CHOICE, RESOLVER_SHARED_CREDENTIALS),
            role(DEPLOYER_OVERRIDE_CREDENTIALS_CHOICE, DEPLOYER_SHARED_CREDENTIALS),
        )
    }
}

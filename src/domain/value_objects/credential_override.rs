use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire value selecting "do not override credentials".
pub const NO_OVERRIDE: &str = "noOverriding";
/// Wire value selecting credentials stored under a shared-credentials id.
pub const SHARED_CREDENTIALS: &str = "sharedCredentials";
/// Wire value selecting the username/password configured on the job.
pub const USERNAME_PASSWORD: &str = "usernamePassword";

/// How the credentials of one role are overridden.
///
/// Parsing never fails: a missing, blank or unknown value is mapped to
/// [`CredentialOverrideChoice::Unspecified`], which keeps the behavior of
/// tasks configured before override choices existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CredentialOverrideChoice {
    /// Leave credentials to the caller's own default
    NoOverride,
    /// Use credentials looked up by shared-credentials id
    SharedCredentials,
    /// Use the username/password configured on the job
    UsernamePassword,
    /// No explicit choice; use job credentials when present
    #[default]
    Unspecified,
}

impl CredentialOverrideChoice {
    /// Parse a raw configuration value, mapping anything unknown to `Unspecified`.
    ///
    /// Values must match exactly; surrounding whitespace makes them unknown.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(NO_OVERRIDE) => Self::NoOverride,
            Some(SHARED_CREDENTIALS) => Self::SharedCredentials,
            Some(USERNAME_PASSWORD) => Self::UsernamePassword,
            Some(_) | None => Self::Unspecified,
        }
    }

    /// The configuration value for this choice (empty for `Unspecified`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoOverride => NO_OVERRIDE,
            Self::SharedCredentials => SHARED_CREDENTIALS,
            Self::UsernamePassword => USERNAME_PASSWORD,
            Self::Unspecified => "",
        }
    }
}

impl From<&str> for CredentialOverrideChoice {
    fn from(value: &str) -> Self {
        Self::parse(Some(value))
    }
}

impl From<String> for CredentialOverrideChoice {
    fn from(value: String) -> Self {
        Self::parse(Some(&value))
    }
}

impl From<CredentialOverrideChoice> for String {
    fn from(choice: CredentialOverrideChoice) -> Self {
        choice.as_str().to_string()
    }
}

impl fmt::Display for CredentialOverrideChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unspecified => write!(f, "unspecified"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// Role a set of credentials is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialRole {
    /// Resolves (downloads) dependencies
    Resolver,
    /// Deploys (uploads) artifacts
    Deployer,
}

impl fmt::Display for CredentialRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolver => write!(f, "resolver"),
            Self::Deployer => write!(f, "deployer"),
        }
    }
}

use tracing::{info, warn};

use crate::domain::entities::credentials::{CredentialsConfig, RoleCredentials, UsernamePassword};
use crate::domain::value_objects::credential_override::{CredentialOverrideChoice, CredentialRole};
use crate::infrastructure::credentials::SharedCredentialsLookup;

/// Which half of a credential pair is being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Secret {
    Username,
    Password,
}

impl Secret {
    fn pick(self, credentials: &UsernamePassword) -> &str {
        match self {
            Self::Username => &credentials.username,
            Self::Password => &credentials.password,
        }
    }

    fn configured(self, role: &RoleCredentials) -> Option<&str> {
        match self {
            Self::Username => role.username.as_deref(),
            Self::Password => role.password.as_deref(),
        }
    }
}

/// Decides which username and password a resolver or deployer uses.
///
/// | Override choice      | Result                                              |
/// |----------------------|-----------------------------------------------------|
/// | `NoOverride`         | empty                                               |
/// | `SharedCredentials`  | the matching half of the shared credentials entry   |
/// | `UsernamePassword`   | the value configured on the job                     |
/// | `Unspecified`        | the value configured on the job if non-blank, else empty |
///
/// Usernames and passwords go through the same table independently, and the
/// two roles never influence each other. Apart from logging an audit note
/// the resolution has no side effects.
pub struct CredentialResolver<'a> {
    config: &'a CredentialsConfig,
    shared: &'a dyn SharedCredentialsLookup,
}

impl<'a> CredentialResolver<'a> {
    pub fn new(config: &'a CredentialsConfig, shared: &'a dyn SharedCredentialsLookup) -> Self {
        Self { config, shared }
    }

    /// Username the given role should authenticate with
    pub fn resolve_username(&self, role: CredentialRole) -> String {
        self.resolve_secret(role, Secret::Username)
    }

    /// Password the given role should authenticate with
    pub fn resolve_password(&self, role: CredentialRole) -> String {
        self.resolve_secret(role, Secret::Password)
    }

    /// Both halves at once
    pub fn resolve(&self, role: CredentialRole) -> UsernamePassword {
        UsernamePassword::new(self.resolve_username(role), self.resolve_password(role))
    }

    fn resolve_secret(&self, role: CredentialRole, secret: Secret) -> String {
        let role_config = self.config.for_role(role);

        match role_config.override_choice {
            CredentialOverrideChoice::NoOverride => String::new(),

            CredentialOverrideChoice::SharedCredentials => {
                let Some(credentials_id) = role_config
                    .shared_credentials_id
                    .as_deref()
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                else {
                    warn!(%role, "Shared credentials selected but no credentials ID is configured");
                    return String::new();
                };

                match self.shared.lookup(credentials_id) {
                    Some(credentials) => {
                        let value = secret.pick(&credentials).to_string();
                        audit(role, secret, &value, credentials_id);
                        value
                    }
                    None => {
                        warn!(%role, credentials_id, "Shared credentials not found");
                        String::new()
                    }
                }
            }

            CredentialOverrideChoice::UsernamePassword => {
                let value = secret.configured(role_config).unwrap_or_default().to_string();
                audit(role, secret, &value, "");
                value
            }

            CredentialOverrideChoice::Unspecified => match secret
                .configured(role_config)
                .filter(|value| !value.trim().is_empty())
            {
                Some(value) => {
                    audit(role, secret, value, "");
                    value.to_string()
                }
                None => String::new(),
            },
        }
    }
}

/// Record where a credential came from. Password values are never logged.
fn audit(role: CredentialRole, secret: Secret, value: &str, credentials_id: &str) {
    let source = if credentials_id.is_empty() {
        "job".to_string()
    } else {
        format!("credentials ID '{}'", credentials_id)
    };

    match secret {
        Secret::Username => {
            info!(%role, "Using username '{}' configured in {}", value, source)
        }
        Secret::Password => info!(%role, "Using password configured in {}", source),
    }
}

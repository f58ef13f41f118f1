//! Domain entities: configuration snapshots a release build works from.

pub mod credentials;
pub mod release_config;
pub mod release_context;
pub mod task_context;

pub use credentials::{CredentialsConfig, RoleCredentials, UsernamePassword};
pub use release_config::{ReleaseConfig, ScmSettings};
pub use release_context::ReleaseManagementContext;
pub use task_context::BuildTaskContext;

//! Small immutable domain types.

pub mod build_outcome;
pub mod credential_override;
pub mod scm_type;

pub use build_outcome::BuildOutcome;
pub use credential_override::{CredentialOverrideChoice, CredentialRole};
pub use scm_type::ScmType;

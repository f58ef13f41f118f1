/// Application layer
///
/// Use cases that sequence the release lifecycle, and services that make
/// per-build decisions such as which credentials to use.
pub mod services;
pub mod use_cases;

pub use services::CredentialResolver;
pub use use_cases::{
    ReleaseBuildReport, ReleaseBuildSteps, ReleaseBuildUseCase, ReleaseCoordinator, ScmCoordinator,
};

pub mod release_build;
pub mod release_coordinator;

pub use release_build::{ReleaseBuildReport, ReleaseBuildSteps, ReleaseBuildUseCase};
pub use release_coordinator::{ReleaseCoordinator, ScmCoordinator};

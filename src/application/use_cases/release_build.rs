use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::release_coordinator::ScmCoordinator;
use crate::common::error::ReleaseError;
use crate::common::result::ReleaseResult;
use crate::domain::value_objects::build_outcome::BuildOutcome;
use crate::domain::value_objects::scm_type::ScmType;

/// Host-side build steps the release lifecycle wraps
#[async_trait]
pub trait ReleaseBuildSteps: Send {
    /// Build the release version
    async fn build_release_version(&mut self) -> BuildOutcome;

    /// Move the working copy to the next development version.
    ///
    /// Returns whether any file was modified.
    async fn change_to_development_version(&mut self) -> ReleaseResult<bool>;
}

/// Summary of one release build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseBuildReport {
    pub outcome: BuildOutcome,
    pub scm: ScmType,
    pub tag_created: bool,
    pub development_version_committed: bool,
    pub remote_url: Option<String>,
}

/// Drives the coordinator lifecycle around the build steps
pub struct ReleaseBuildUseCase;

impl ReleaseBuildUseCase {
    /// Run a release build.
    ///
    /// `build_completed` is invoked exactly once, whatever happens. When a
    /// lifecycle step fails it is reported as [`BuildOutcome::Failed`] and the
    /// step's error is returned.
    pub async fn execute(
        coordinator: &mut dyn ScmCoordinator,
        steps: &mut dyn ReleaseBuildSteps,
    ) -> ReleaseResult<ReleaseBuildReport> {
        let mut committed = false;

        match Self::run_steps(coordinator, steps, &mut committed).await {
            Ok(outcome) => {
                coordinator.build_completed(outcome).await;
                info!(%outcome, tag_created = coordinator.tag_created(), "Release build finished");

                Ok(ReleaseBuildReport {
                    outcome,
                    scm: coordinator.backend_kind(),
                    tag_created: coordinator.tag_created(),
                    development_version_committed: committed,
                    remote_url: coordinator.remote_url().map(str::to_string),
                })
            }
            Err(e) => {
                error!(error = %e, scm_failure = e.is_scm_failure(), "Release build step failed");
                coordinator.build_completed(BuildOutcome::Failed).await;
                Err(e)
            }
        }
    }

    async fn run_steps(
        coordinator: &mut dyn ScmCoordinator,
        steps: &mut dyn ReleaseBuildSteps,
        committed: &mut bool,
    ) -> Result<BuildOutcome, ReleaseError> {
        coordinator.prepare().await?;
        coordinator.before_release_version_change().await?;

        let outcome = steps.build_release_version().await;
        if !outcome.is_success() {
            info!(%outcome, "Release version build did not succeed");
            return Ok(outcome);
        }

        coordinator.after_successful_release_version_build().await?;

        let modified = steps.change_to_development_version().await?;
        coordinator.after_development_version_change(modified).await?;
        *committed = modified;

        Ok(outcome)
    }
}

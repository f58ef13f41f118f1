use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::common::error::ReleaseError;
use crate::common::result::{OptionExt, ReleaseResult};
use crate::domain::entities::release_context::ReleaseManagementContext;
use crate::domain::value_objects::build_outcome::BuildOutcome;
use crate::domain::value_objects::scm_type::ScmType;
use crate::infrastructure::scm::scm_gateway::{ScmConnector, ScmGateway};

/// Release lifecycle hooks, invoked by the host in this order for one build:
///
/// 1. [`prepare`](Self::prepare)
/// 2. [`before_release_version_change`](Self::before_release_version_change)
/// 3. [`after_successful_release_version_build`](Self::after_successful_release_version_build)
/// 4. [`after_development_version_change`](Self::after_development_version_change)
/// 5. [`build_completed`](Self::build_completed), always last
///
/// Steps 1 to 4 propagate failures. Step 5 never fails.
#[async_trait]
pub trait ScmCoordinator: Send {
    async fn prepare(&mut self) -> ReleaseResult<()>;

    async fn before_release_version_change(&mut self) -> ReleaseResult<()>;

    async fn after_successful_release_version_build(&mut self) -> ReleaseResult<()>;

    async fn after_development_version_change(&mut self, modified: bool) -> ReleaseResult<()>;

    async fn build_completed(&mut self, outcome: BuildOutcome);

    /// Remote repository URL, once prepared
    fn remote_url(&self) -> Option<&str>;

    fn backend_kind(&self) -> ScmType;

    fn is_git(&self) -> bool {
        self.backend_kind() == ScmType::Git
    }

    /// Whether this build created a tag that still exists
    fn tag_created(&self) -> bool;
}

/// Coordinates tagging, committing and rollback of one release build
pub struct ReleaseCoordinator {
    context: ReleaseManagementContext,
    connector: Box<dyn ScmConnector>,
    gateway: Option<Box<dyn ScmGateway>>,
    tag_created: bool,
}

impl ReleaseCoordinator {
    pub fn new(context: ReleaseManagementContext, connector: Box<dyn ScmConnector>) -> Self {
        Self {
            context,
            connector,
            gateway: None,
            tag_created: false,
        }
    }

    pub fn context(&self) -> &ReleaseManagementContext {
        &self.context
    }

    fn gateway(&self, operation: &str) -> ReleaseResult<&dyn ScmGateway> {
        self.gateway.as_deref().ok_or_not_prepared(operation)
    }
}

#[async_trait]
impl ScmCoordinator for ReleaseCoordinator {
    async fn prepare(&mut self) -> ReleaseResult<()> {
        let scm_type = self.connector.scm_type();
        self.context.validate(scm_type)?;

        let gateway = self
            .connector
            .connect()
            .await
            .map_err(|e| ReleaseError::gateway_unavailable(scm_type, e))?;

        info!(scm = %scm_type, remote = gateway.remote_url(), "Release coordinator prepared");
        self.gateway = Some(gateway);
        Ok(())
    }

    async fn before_release_version_change(&mut self) -> ReleaseResult<()> {
        debug!("Before release version change");
        Ok(())
    }

    async fn after_successful_release_version_build(&mut self) -> ReleaseResult<()> {
        if !self.context.enabled {
            info!("Release management disabled, skipping tag creation");
            return Ok(());
        }

        if !self.context.create_vcs_tag {
            debug!("Tag creation not requested");
            return Ok(());
        }

        let tag_url = self.context.tag_url.clone();
        let gateway = self.gateway("create tag")?;

        info!(tag = %tag_url, "Creating release tag");
        gateway
            .create_tag(&tag_url, &self.context.tag_comment)
            .await
            .map_err(|e| ReleaseError::tag_creation_failed(&tag_url, e))?;

        self.tag_created = true;
        Ok(())
    }

    async fn after_development_version_change(&mut self, modified: bool) -> ReleaseResult<()> {
        if !modified {
            debug!("Working copy not modified, nothing to commit");
            return Ok(());
        }

        let gateway = self.gateway("commit working copy")?;

        info!("Committing next development version");
        gateway
            .commit_working_copy(&self.context.next_development_comment)
            .await
            .map_err(ReleaseError::commit_failed)?;

        Ok(())
    }

    async fn build_completed(&mut self, outcome: BuildOutcome) {
        if outcome.is_success() {
            info!(%outcome, "Release build completed");
            return;
        }

        let Some(gateway) = self.gateway.as_deref() else {
            warn!(%outcome, "Release build did not succeed but no SCM gateway was acquired, nothing to revert");
            return;
        };

        warn!(%outcome, tag_created = self.tag_created, "Release build did not succeed, reverting");
        gateway.safe_revert_working_copy().await;

        if self.tag_created
            && gateway
                .safe_revert_tag(&self.context.tag_url, &self.context.tag_comment)
                .await
        {
            self.tag_created = false;
        }
    }

    fn remote_url(&self) -> Option<&str> {
        self.gateway.as_deref().map(|gateway| gateway.remote_url())
    }

    fn backend_kind(&self) -> ScmType {
        self.connector.scm_type()
    }

    fn tag_created(&self) -> bool {
        self.tag_created
    }
}

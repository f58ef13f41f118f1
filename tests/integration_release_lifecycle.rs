//! Release lifecycle integration tests
//!
//! Drives ReleaseCoordinator through its fixed call sequence against a
//! recording gateway and checks which tag/commit/revert calls were issued.

mod common;

use common::mock_services::{GatewayOp, MockConnector, MockScmGateway, MOCK_REMOTE_URL};
use common::test_fixtures::{ContextFixture, NEXT_DEV_COMMENT, SVN_TAG_URL, TAG_COMMENT};
use pretty_assertions::assert_eq;
use relmgr::application::use_cases::{
    ReleaseBuildSteps, ReleaseBuildUseCase, ReleaseCoordinator, ScmCoordinator,
};
use relmgr::common::error::ReleaseError;
use relmgr::common::result::ReleaseResult;
use relmgr::domain::entities::ReleaseManagementContext;
use relmgr::domain::value_objects::{BuildOutcome, ScmType};
use relmgr::infrastructure::scm::ScmGateway;

fn coordinator(context: ReleaseManagementContext) -> (ReleaseCoordinator, MockScmGateway) {
    let gateway = MockScmGateway::new(ScmType::Svn);
    let connector = MockConnector::new(gateway.clone());
    (ReleaseCoordinator::new(context, Box::new(connector)), gateway)
}

async fn run_until_release_build(coordinator: &mut ReleaseCoordinator) {
    coordinator.prepare().await.unwrap();
    coordinator.before_release_version_change().await.unwrap();
}

#[tokio::test]
async fn test_successful_release_keeps_tag() {
    let (mut coordinator, gateway) = coordinator(ContextFixture::tagging());

    run_until_release_build(&mut coordinator).await;
    coordinator.after_successful_release_version_build().await.unwrap();
    coordinator.after_development_version_change(true).await.unwrap();
    coordinator.build_completed(BuildOutcome::Success).await;

    assert!(coordinator.tag_created());
    assert_eq!(
        gateway.get_call_history(),
        vec![
            format!("create_tag({})", SVN_TAG_URL),
            format!("commit_working_copy({})", NEXT_DEV_COMMENT),
        ]
    );
    assert_eq!(gateway.count_calls("revert_working_copy"), 0);
    assert_eq!(gateway.count_calls("revert_tag"), 0);
}

#[tokio::test]
async fn test_failed_build_after_tag_reverts_both_and_swallows_errors() {
    let (mut coordinator, gateway) = coordinator(ContextFixture::tagging());

    run_until_release_build(&mut coordinator).await;
    coordinator.after_successful_release_version_build().await.unwrap();
    assert!(coordinator.tag_created());

    gateway.fail_on(GatewayOp::RevertWorkingCopy);
    gateway.fail_on(GatewayOp::RevertTag);
    coordinator.build_completed(BuildOutcome::Failed).await;

    assert_eq!(gateway.count_calls("revert_working_copy"), 1);
    assert_eq!(gateway.count_calls("revert_tag"), 1);
    // the tag could not be removed, so it is still ours
    assert!(coordinator.tag_created());
}

#[tokio::test]
async fn test_no_tag_requested_reverts_working_copy_only() {
    let (mut coordinator, gateway) = coordinator(ContextFixture::without_tag());

    run_until_release_build(&mut coordinator).await;
    coordinator.after_successful_release_version_build().await.unwrap();
    assert_eq!(gateway.count_calls("create_tag"), 0);

    coordinator.build_completed(BuildOutcome::Failed).await;

    assert_eq!(gateway.count_calls("revert_working_copy"), 1);
    assert_eq!(gateway.count_calls("revert_tag"), 0);
    assert!(!coordinator.tag_created());
}

#[tokio::test]
async fn test_tag_failure_propagates_and_skips_tag_revert() {
    let (mut coordinator, gateway) = coordinator(ContextFixture::tagging());
    gateway.fail_on(GatewayOp::CreateTag);

    run_until_release_build(&mut coordinator).await;
    let result = coordinator.after_successful_release_version_build().await;

    match result {
        Err(ReleaseError::TagCreationFailed { tag_url, .. }) => assert_eq!(tag_url, SVN_TAG_URL),
        other => panic!("expected tag creation failure, got {:?}", other),
    }
    assert!(!coordinator.tag_created());

    coordinator.build_completed(BuildOutcome::Failed).await;

    assert_eq!(gateway.count_calls("revert_working_copy"), 1);
    assert_eq!(gateway.count_calls("revert_tag"), 0);
}

#[tokio::test]
async fn test_incomplete_build_counts_as_failure() {
    let (mut coordinator, gateway) = coordinator(ContextFixture::tagging());

    run_until_release_build(&mut coordinator).await;
    coordinator.after_successful_release_version_build().await.unwrap();
    coordinator.build_completed(BuildOutcome::Incomplete).await;

    assert_eq!(gateway.count_calls("revert_working_copy"), 1);
    assert_eq!(gateway.count_calls("revert_tag"), 1);
    assert!(!coordinator.tag_created());
}

#[tokio::test]
async fn test_commit_failure_propagates() {
    let (mut coordinator, gateway) = coordinator(ContextFixture::tagging());
    gateway.fail_on(GatewayOp::Commit);

    run_until_release_build(&mut coordinator).await;
    coordinator.after_successful_release_version_build().await.unwrap();
    let result = coordinator.after_development_version_change(true).await;

    assert!(matches!(result, Err(ReleaseError::CommitFailed { .. })));
    assert!(coordinator.tag_created());
}

#[tokio::test]
async fn test_prepare_fails_when_backend_unavailable() {
    let connector = MockConnector::unavailable(ScmType::Svn);
    let connects = connector.connect_count();
    let mut coordinator = ReleaseCoordinator::new(ContextFixture::tagging(), Box::new(connector));

    let result = coordinator.prepare().await;

    assert!(matches!(
        result,
        Err(ReleaseError::GatewayUnavailable {
            scm_type: ScmType::Svn,
            ..
        })
    ));
    assert_eq!(*connects.lock().unwrap(), 1);
    assert_eq!(coordinator.remote_url(), None);
}

#[tokio::test]
async fn test_prepare_validates_git_tag_name() {
    let gateway = MockScmGateway::new(ScmType::Git);
    let connector = MockConnector::new(gateway);
    let connects = connector.connect_count();

    // a URL is not a usable Git tag name
    let mut coordinator = ReleaseCoordinator::new(ContextFixture::tagging(), Box::new(connector));
    assert!(matches!(
        coordinator.prepare().await,
        Err(ReleaseError::ValidationError { .. })
    ));
    assert_eq!(*connects.lock().unwrap(), 0);

    let gateway = MockScmGateway::new(ScmType::Git);
    let mut coordinator = ReleaseCoordinator::new(
        ContextFixture::git_tagging(),
        Box::new(MockConnector::new(gateway)),
    );
    coordinator.prepare().await.unwrap();
    assert!(coordinator.is_git());
    assert_eq!(coordinator.remote_url(), Some(MOCK_REMOTE_URL));
}

#[tokio::test]
async fn test_safe_reverts_can_be_repeated() {
    let gateway = MockScmGateway::new(ScmType::Svn);
    gateway.fail_on(GatewayOp::RevertWorkingCopy);
    gateway.fail_on(GatewayOp::RevertTag);

    for _ in 0..2 {
        assert!(!gateway.safe_revert_working_copy().await);
        assert!(!gateway.safe_revert_tag(SVN_TAG_URL, TAG_COMMENT).await);
    }
    assert_eq!(gateway.count_calls("revert_working_copy"), 2);
    assert_eq!(gateway.count_calls("revert_tag"), 2);
}

struct ScriptedSteps {
    outcome: BuildOutcome,
    bump: ReleaseResult<bool>,
}

#[async_trait::async_trait]
impl ReleaseBuildSteps for ScriptedSteps {
    async fn build_release_version(&mut self) -> BuildOutcome {
        self.outcome
    }

    async fn change_to_development_version(&mut self) -> ReleaseResult<bool> {
        std::mem::replace(&mut self.bump, Ok(false))
    }
}

#[tokio::test]
async fn test_driver_full_release() {
    let (mut coordinator, gateway) = coordinator(ContextFixture::tagging());
    let mut steps = ScriptedSteps {
        outcome: BuildOutcome::Success,
        bump: Ok(true),
    };

    let report = ReleaseBuildUseCase::execute(&mut coordinator, &mut steps)
        .await
        .unwrap();

    assert_eq!(report.outcome, BuildOutcome::Success);
    assert!(report.tag_created);
    assert!(report.development_version_committed);
    assert_eq!(report.remote_url.as_deref(), Some(MOCK_REMOTE_URL));
    assert_eq!(gateway.count_calls("create_tag"), 1);
    assert_eq!(gateway.count_calls("commit_working_copy"), 1);
    assert_eq!(gateway.count_calls("revert_working_copy"), 0);
}

#[tokio::test]
async fn test_driver_failed_build_rolls_back_without_tagging() {
    let (mut coordinator, gateway) = coordinator(ContextFixture::tagging());
    let mut steps = ScriptedSteps {
        outcome: BuildOutcome::Failed,
        bump: Ok(true),
    };

    let report = ReleaseBuildUseCase::execute(&mut coordinator, &mut steps)
        .await
        .unwrap();

    assert_eq!(report.outcome, BuildOutcome::Failed);
    assert!(!report.tag_created);
    assert_eq!(
        gateway.get_call_history(),
        vec!["revert_working_copy()".to_string()]
    );
}

#[tokio::test]
async fn test_driver_bump_failure_removes_tag_and_returns_error() {
    let (mut coordinator, gateway) = coordinator(ContextFixture::tagging());
    let mut steps = ScriptedSteps {
        outcome: BuildOutcome::Success,
        bump: Err(ReleaseError::build_step_failed("version bump failed")),
    };

    let result = ReleaseBuildUseCase::execute(&mut coordinator, &mut steps).await;

    match result {
        Err(ReleaseError::BuildStepFailed { message, .. }) => {
            assert_eq!(message, "version bump failed")
        }
        other => panic!("expected the bump error, got {:?}", other),
    }
    assert_eq!(
        gateway.get_call_history(),
        vec![
            format!("create_tag({})", SVN_TAG_URL),
            "revert_working_copy()".to_string(),
            format!("revert_tag({})", SVN_TAG_URL),
        ]
    );
    assert!(!coordinator.tag_created());
}

//! # relmgr - release management for version-controlled builds
//!
//! `relmgr` sequences the version-control side effects of a release build
//! and makes sure a failed build never leaves an orphaned tag or a dirty
//! working copy behind. It also decides which credentials a dependency
//! resolver or an artifact deployer should use.
//!
//! ## Release lifecycle
//!
//! A [`ReleaseCoordinator`](application::use_cases::ReleaseCoordinator) is
//! driven through five calls in a fixed order:
//!
//! 1. `prepare`: open the working copy through an [`ScmConnector`](infrastructure::scm::ScmConnector)
//! 2. `before_release_version_change`
//! 3. `after_successful_release_version_build`: create the release tag
//! 4. `after_development_version_change`: commit the next development version
//! 5. `build_completed`: on anything but success, revert the working copy and
//!    delete the tag if this build created it
//!
//! [`ReleaseBuildUseCase`](application::use_cases::ReleaseBuildUseCase) runs
//! that sequence around host-supplied build steps.
//!
//! ```rust,no_run
//! use relmgr::application::use_cases::{
//!     ReleaseBuildSteps, ReleaseBuildUseCase, ReleaseCoordinator,
//! };
//! use relmgr::domain::entities::ReleaseManagementContext;
//! use relmgr::infrastructure::scm::SvnConnector;
//!
//! # async fn example(steps: &mut dyn ReleaseBuildSteps) -> relmgr::Result<()> {
//! let context = ReleaseManagementContext::default()
//!     .with_enabled(true)
//!     .with_tag("https://svn.example.com/repo/tags/1.0", "[release] 1.0")
//!     .with_next_development_comment("[release] next development iteration");
//!
//! let mut coordinator = ReleaseCoordinator::new(context, Box::new(SvnConnector::new(".")));
//! let report = ReleaseBuildUseCase::execute(&mut coordinator, steps).await?;
//! println!("tag created: {}", report.tag_created);
//! # Ok(())
//! # }
//! ```
//!
//! ## Credential resolution
//!
//! [`CredentialResolver`](application::services::CredentialResolver) applies
//! the per-role override policy (`noOverriding`, `sharedCredentials`,
//! `usernamePassword`) to the configured values and a
//! [`SharedCredentialsLookup`](infrastructure::credentials::SharedCredentialsLookup).
//!
//! ```rust
//! use relmgr::application::services::CredentialResolver;
//! use relmgr::domain::entities::{CredentialsConfig, RoleCredentials, UsernamePassword};
//! use relmgr::domain::value_objects::{CredentialOverrideChoice, CredentialRole};
//! use relmgr::infrastructure::credentials::InMemorySharedCredentials;
//!
//! let config = CredentialsConfig::new(
//!     RoleCredentials::new(CredentialOverrideChoice::NoOverride),
//!     RoleCredentials::new(CredentialOverrideChoice::SharedCredentials)
//!         .with_shared_credentials_id("deployer"),
//! );
//! let shared = InMemorySharedCredentials::new()
//!     .with_entry("deployer", UsernamePassword::new("deploy-bot", "token"));
//!
//! let resolver = CredentialResolver::new(&config, &shared);
//! assert_eq!(resolver.resolve_username(CredentialRole::Resolver), "");
//! assert_eq!(resolver.resolve_username(CredentialRole::Deployer), "deploy-bot");
//! ```
//!
//! ## Architecture
//!
//! - [`domain`]: configuration value objects and entities
//! - [`application`]: the release lifecycle and credential resolution
//! - [`infrastructure`]: SVN and Git backends, shared credentials, config files
//! - [`presentation`]: the `relmgr` command line
//! - [`common`]: error type and result helpers

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use crate::common::error::ReleaseError;
pub use crate::common::result::ReleaseResult as Result;

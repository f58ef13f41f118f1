use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;
use url::Url;

use crate::common::error::ReleaseError;
use crate::common::result::ReleaseResult;
use crate::domain::value_objects::scm_type::ScmType;

/// Common prefix of the release management task configuration keys
pub const KEY_PREFIX: &str = "releaseManagement.";
/// Task configuration key: release management switched on for the plan
pub const RELEASE_MGMT_ENABLED: &str = "releaseManagement.releaseMgmtEnabled";
/// Task configuration key: create a VCS tag after a successful release build
pub const CREATE_VCS_TAG: &str = "releaseManagement.createVcsTag";
/// Task configuration key: tag URL (SVN) or tag name (Git)
pub const TAG_URL: &str = "releaseManagement.tagUrl";
/// Task configuration key: message for the tag
pub const TAG_COMMENT: &str = "releaseManagement.tagComment";
/// Task configuration key: message for the next-development-version commit
pub const NEXT_DEVELOPMENT_COMMENT: &str = "releaseManagement.nextDevelopmentComment";

fn git_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._/+-]*$").expect("static tag pattern compiles")
    })
}

/// Release settings of one build, snapshotted when the coordinator is built.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseManagementContext {
    /// Release management is enabled for this plan
    #[serde(alias = "release_mgmt_enabled")]
    pub enabled: bool,

    /// Tag the released revision after a successful build
    pub create_vcs_tag: bool,

    /// Where the tag goes: a repository URL for SVN, a tag name for Git
    pub tag_url: String,

    /// Message recorded with the tag
    pub tag_comment: String,

    /// Message for the commit that moves to the next development version
    pub next_development_comment: String,
}

impl ReleaseManagementContext {
    /// Build the context from a flat task configuration map.
    ///
    /// Missing keys fall back to `false` / empty strings.
    pub fn from_config_map(config: &HashMap<String, String>) -> Self {
        let text = |key: &str| config.get(key).cloned().unwrap_or_default();
        let flag = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false)
        };

        Self {
            enabled: flag(RELEASE_MGMT_ENABLED),
            create_vcs_tag: flag(CREATE_VCS_TAG),
            tag_url: text(TAG_URL),
            tag_comment: text(TAG_COMMENT),
            next_development_comment: text(NEXT_DEVELOPMENT_COMMENT),
        }
    }

    /// Enable release management
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Request a tag at `tag_url` with `comment`
    pub fn with_tag(mut self, tag_url: impl Into<String>, comment: impl Into<String>) -> Self {
        self.create_vcs_tag = true;
        self.tag_url = tag_url.into();
        self.tag_comment = comment.into();
        self
    }

    /// Set the next-development-version commit message
    pub fn with_next_development_comment(mut self, comment: impl Into<String>) -> Self {
        self.next_development_comment = comment.into();
        self
    }

    /// Check the tag target makes sense for the given backend.
    ///
    /// Tag settings are only checked when they will be used, so a disabled
    /// context always validates.
    pub fn validate(&self, scm_type: ScmType) -> ReleaseResult<()> {
        if !self.enabled || !self.create_vcs_tag {
            return Ok(());
        }

        let tag_url = self.tag_url.as_str();
        if tag_url.trim().is_empty() {
            return Err(ReleaseError::validation_error(
                "tag_url",
                "a tag location is required when tag creation is enabled",
                None,
            ));
        }

        // the value is handed to the backend as is
        if tag_url.trim() != tag_url {
            return Err(ReleaseError::validation_error(
                "tag_url",
                "must not start or end with whitespace",
                Some(tag_url.to_string()),
            ));
        }

        if scm_type.tags_by_url() {
            let parsed = Url::parse(tag_url).map_err(|e| {
                ReleaseError::validation_error(
                    "tag_url",
                    format!("not a valid URL: {}", e),
                    Some(tag_url.to_string()),
                )
            })?;
            if !scm_type.is_valid_url_scheme(parsed.as_str()) {
                return Err(ReleaseError::validation_error(
                    "tag_url",
                    format!("scheme '{}' is not usable with {}", parsed.scheme(), scm_type),
                    Some(tag_url.to_string()),
                ));
            }
        } else if !git_tag_pattern().is_match(tag_url)
            || tag_url.contains("..")
            || tag_url.ends_with(".lock")
            || tag_url.ends_with('/')
        {
            return Err(ReleaseError::validation_error(
                "tag_url",
                "not a valid tag name",
                Some(tag_url.to_string()),
            ));
        }

        Ok(())
    }
}

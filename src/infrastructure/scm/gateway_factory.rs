use super::git_gateway::GitConnector;
use super::scm_gateway::ScmConnector;
use super::svn_gateway::SvnConnector;
use crate::common::result::{OptionExt, ReleaseResult};
use crate::domain::entities::release_config::ScmSettings;
use crate::domain::value_objects::scm_type::ScmType;
use std::path::Path;
use tracing::debug;

/// Factory for building backend connectors from settings
pub struct GatewayFactory;

impl GatewayFactory {
    /// Build a connector for `working_dir`.
    ///
    /// The backend comes from `settings.scm_type`, or is detected from the
    /// metadata directory when not configured.
    pub fn create_connector(
        settings: &ScmSettings,
        working_dir: &Path,
    ) -> ReleaseResult<Box<dyn ScmConnector>> {
        let scm_type = settings
            .scm_type
            .or_else(|| Self::detect_scm_type(working_dir))
            .ok_or_validation_error(
                "scm.type",
                format!(
                    "not set and no .svn or .git directory found in {}",
                    working_dir.display()
                ),
            )?;

        debug!(scm_type = %scm_type, path = %working_dir.display(), "Creating SCM connector");
        Ok(Self::create_connector_for(scm_type, settings, working_dir))
    }

    /// Build a connector for an explicit backend kind
    pub fn create_connector_for(
        scm_type: ScmType,
        settings: &ScmSettings,
        working_dir: &Path,
    ) -> Box<dyn ScmConnector> {
        match scm_type {
            ScmType::Svn => {
                let mut connector = SvnConnector::new(working_dir)
                    .with_credentials(settings.username.clone(), settings.password.clone());
                if let Some(executable) = &settings.executable {
                    connector = connector.with_executable(executable.clone());
                }
                Box::new(connector)
            }
            ScmType::Git => {
                let mut connector = GitConnector::new(working_dir).with_push(settings.push);
                if let Some(remote) = &settings.remote {
                    connector = connector.with_remote(remote.clone());
                }
                if let Some(executable) = &settings.executable {
                    connector = connector.with_executable(executable.clone());
                }
                Box::new(connector)
            }
        }
    }

    /// Detect the backend from a working directory
    pub fn detect_scm_type(path: &Path) -> Option<ScmType> {
        [ScmType::Svn, ScmType::Git]
            .into_iter()
            .find(|scm_type| path.join(scm_type.metadata_dir()).exists())
    }
}

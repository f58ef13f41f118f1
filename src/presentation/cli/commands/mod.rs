pub mod credentials;
pub mod release;

pub use credentials::*;
pub use release::*;

use anyhow::Result;
use std::path::Path;
use tracing::debug;

use crate::domain::entities::release_config::ReleaseConfig;
use crate::infrastructure::filesystem::ConfigStore;

/// Load the configuration file given on the command line, or `relmgr.yaml`
/// in the working directory if it exists. Without either, defaults apply.
pub(crate) async fn load_config(path: Option<&Path>, working_dir: &Path) -> Result<ReleaseConfig> {
    let store = ConfigStore::new();

    match path {
        Some(path) => Ok(store.load(working_dir.join(path)).await?),
        None => {
            let default_path = ConfigStore::default_path(working_dir);
            if default_path.exists() {
                Ok(store.load(default_path).await?)
            } else {
                debug!(path = %default_path.display(), "No configuration file, using defaults");
                Ok(ReleaseConfig::default())
            }
        }
    }
}

/// Infrastructure layer modules
///
/// Concrete implementations for external system interactions:
/// - SCM backends (Subversion, Git) behind the release gateway
/// - Shared credential storage
/// - Configuration files
pub mod credentials;
pub mod filesystem;
pub mod scm;

pub use credentials::{InMemorySharedCredentials, SharedCredentialsLookup};
pub use filesystem::ConfigStore;
pub use scm::{GatewayFactory, ScmConnector, ScmError, ScmGateway};

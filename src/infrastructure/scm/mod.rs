/// Version-control backends used by the release lifecycle
///
/// Each backend provides a connector that opens a working copy and hands
/// back a gateway for tagging, committing and rolling back.
pub(crate) mod command;
pub mod gateway_factory;
pub mod git_gateway;
pub mod scm_gateway;
pub mod svn_gateway;

pub use gateway_factory::GatewayFactory;
pub use git_gateway::{GitConnector, GitGateway};
pub use scm_gateway::{ScmConnector, ScmError, ScmGateway};
pub use svn_gateway::{SvnConnector, SvnGateway};

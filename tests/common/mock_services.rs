//! Mock services for testing
//!
//! Hand-written doubles for the SCM gateway, its connector and the shared
//! credentials store. Every double records its calls so tests can verify
//! exactly which side effects were issued.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use relmgr::domain::entities::UsernamePassword;
use relmgr::domain::value_objects::ScmType;
use relmgr::infrastructure::credentials::SharedCredentialsLookup;
use relmgr::infrastructure::scm::{ScmConnector, ScmError, ScmGateway};

pub const MOCK_REMOTE_URL: &str = "https://svn.example.com/repo/trunk";

/// Gateway operations that can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOp {
    CreateTag,
    Commit,
    RevertWorkingCopy,
    RevertTag,
}

/// Mock SCM gateway recording every call
///
/// Clones share their call history and failure settings.
#[derive(Clone)]
pub struct MockScmGateway {
    scm_type: ScmType,
    /// Call history for verification
    call_history: Arc<Mutex<Vec<String>>>,
    /// Operations that should fail
    failing: Arc<Mutex<Vec<GatewayOp>>>,
}

impl MockScmGateway {
    pub fn new(scm_type: ScmType) -> Self {
        Self {
            scm_type,
            call_history: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make an operation fail from now on
    pub fn fail_on(&self, op: GatewayOp) {
        self.failing.lock().unwrap().push(op);
    }

    /// Get call history for verification
    pub fn get_call_history(&self) -> Vec<String> {
        self.call_history.lock().unwrap().clone()
    }

    /// Number of recorded calls of one method
    pub fn count_calls(&self, method: &str) -> usize {
        self.get_call_history()
            .iter()
            .filter(|call| call.starts_with(&format!("{}(", method)))
            .count()
    }

    fn record_call(&self, method: &str, arg: &str) {
        self.call_history
            .lock()
            .unwrap()
            .push(format!("{}({})", method, arg));
    }

    fn outcome(&self, op: GatewayOp) -> Result<(), ScmError> {
        if self.failing.lock().unwrap().contains(&op) {
            return Err(ScmError::operation_failed(format!("mock {:?} failure", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl ScmGateway for MockScmGateway {
    async fn create_tag(&self, tag_url: &str, _comment: &str) -> Result<(), ScmError> {
        self.record_call("create_tag", tag_url);
        self.outcome(GatewayOp::CreateTag)
    }

    async fn commit_working_copy(&self, comment: &str) -> Result<(), ScmError> {
        self.record_call("commit_working_copy", comment);
        self.outcome(GatewayOp::Commit)
    }

    async fn revert_working_copy(&self) -> Result<(), ScmError> {
        self.record_call("revert_working_copy", "");
        self.outcome(GatewayOp::RevertWorkingCopy)
    }

    async fn revert_tag(&self, tag_url: &str, _comment: &str) -> Result<(), ScmError> {
        self.record_call("revert_tag", tag_url);
        self.outcome(GatewayOp::RevertTag)
    }

    fn remote_url(&self) -> &str {
        MOCK_REMOTE_URL
    }

    fn scm_type(&self) -> ScmType {
        self.scm_type
    }
}

/// Mock connector handing out a shared [`MockScmGateway`]
pub struct MockConnector {
    gateway: MockScmGateway,
    should_error: bool,
    connect_count: Arc<Mutex<usize>>,
}

impl MockConnector {
    pub fn new(gateway: MockScmGateway) -> Self {
        Self {
            gateway,
            should_error: false,
            connect_count: Arc::new(Mutex::new(0)),
        }
    }

    /// A connector whose backend cannot be reached
    pub fn unavailable(scm_type: ScmType) -> Self {
        Self {
            should_error: true,
            ..Self::new(MockScmGateway::new(scm_type))
        }
    }

    /// Shared handle on the number of `connect` calls
    pub fn connect_count(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.connect_count)
    }
}

#[async_trait]
impl ScmConnector for MockConnector {
    async fn connect(&self) -> Result<Box<dyn ScmGateway>, ScmError> {
        *self.connect_count.lock().unwrap() += 1;
        if self.should_error {
            return Err(ScmError::executable_not_found(self.gateway.scm_type.executable_name()));
        }
        Ok(Box::new(self.gateway.clone()))
    }

    fn scm_type(&self) -> ScmType {
        self.gateway.scm_type
    }
}

/// Mock shared credentials store recording lookups
#[derive(Default)]
pub struct MockSharedCredentials {
    entries: HashMap<String, UsernamePassword>,
    lookups: Mutex<Vec<String>>,
}

impl MockSharedCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, id: &str, username: &str, password: &str) -> Self {
        self.entries
            .insert(id.to_string(), UsernamePassword::new(username, password));
        self
    }

    /// Identifiers looked up so far
    pub fn get_lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

impl SharedCredentialsLookup for MockSharedCredentials {
    fn lookup(&self, credentials_id: &str) -> Option<UsernamePassword> {
        self.lookups.lock().unwrap().push(credentials_id.to_string());
        self.entries.get(credentials_id).cloned()
    }
}

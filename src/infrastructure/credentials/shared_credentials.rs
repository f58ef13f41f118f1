use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::domain::entities::credentials::UsernamePassword;

/// Lookup of centrally stored credentials by identifier.
///
/// Both a missing entry and an unreachable store are reported as `None`.
#[cfg_attr(test, mockall::automock)]
pub trait SharedCredentialsLookup: Send + Sync {
    fn lookup(&self, credentials_id: &str) -> Option<UsernamePassword>;
}

/// Shared credentials held in memory, typically loaded from the
/// `shared_credentials` section of the configuration file
#[derive(Debug, Clone, Default)]
pub struct InMemorySharedCredentials {
    entries: HashMap<String, UsernamePassword>,
}

impl InMemorySharedCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, credentials_id: impl Into<String>, credentials: UsernamePassword) -> Self {
        self.entries.insert(credentials_id.into(), credentials);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<&BTreeMap<String, UsernamePassword>> for InMemorySharedCredentials {
    fn from(table: &BTreeMap<String, UsernamePassword>) -> Self {
        Self {
            entries: table
                .iter()
                .map(|(id, credentials)| (id.clone(), credentials.clone()))
                .collect(),
        }
    }
}

impl SharedCredentialsLookup for InMemorySharedCredentials {
    fn lookup(&self, credentials_id: &str) -> Option<UsernamePassword> {
        let found = self.entries.get(credentials_id).cloned();
        debug!(credentials_id, found = found.is_some(), "Shared credentials lookup");
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_hit_and_miss() {
        let store = InMemorySharedCredentials::new()
            .with_entry("deployer", UsernamePassword::new("deploy-bot", "token"));

        assert_eq!(
            store.lookup("deployer"),
            Some(UsernamePassword::new("deploy-bot", "token"))
        );
        assert_eq!(store.lookup("resolver"), None);
    }

    #[test]
    fn test_from_config_table() {
        let mut table = BTreeMap::new();
        table.insert("a".to_string(), UsernamePassword::new("u1", "p1"));
        table.insert("b".to_string(), UsernamePassword::new("u2", "p2"));

        let store = InMemorySharedCredentials::from(&table);
        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup("b").map(|c| c.username), Some("u2".to_string()));
    }
}

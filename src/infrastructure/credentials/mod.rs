pub mod shared_credentials;

pub use shared_credentials::{InMemorySharedCredentials, SharedCredentialsLookup};

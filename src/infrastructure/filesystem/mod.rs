pub mod config_store;

pub use config_store::{ConfigStore, DEFAULT_CONFIG_FILE};

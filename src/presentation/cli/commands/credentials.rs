use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::load_config;
use crate::application::services::CredentialResolver;
use crate::domain::entities::credentials::CredentialsConfig;
use crate::domain::entities::task_context::BuildTaskContext;
use crate::domain::value_objects::credential_override::CredentialRole;
use crate::infrastructure::credentials::InMemorySharedCredentials;
use crate::infrastructure::filesystem::ConfigStore;

const MASK: &str = "********";

#[derive(Serialize)]
struct CredentialsOutput<'a> {
    role: CredentialRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    server_id: Option<i64>,
    username: &'a str,
    password: &'a str,
}

/// Handler for the credentials command
pub struct CredentialsCommand {
    pub config: Option<PathBuf>,
    pub task: Option<PathBuf>,
    pub prefix: String,
    pub role: CredentialRole,
    pub show_password: bool,
    pub json: bool,
}

impl CredentialsCommand {
    pub async fn execute(&self, working_dir: &Path) -> Result<()> {
        let config = load_config(self.config.as_deref(), working_dir).await?;
        let shared = InMemorySharedCredentials::from(&config.shared_credentials);

        let (credentials_config, server_id): (CredentialsConfig, Option<i64>) = match &self.task {
            Some(path) => {
                let task = BuildTaskContext::with_prefix(
                    ConfigStore::new().load_task_map(path).await?,
                    self.prefix.clone(),
                );
                (task.credentials_config(), task.server_id()?)
            }
            None => (config.credentials.clone(), None),
        };

        let resolved = CredentialResolver::new(&credentials_config, &shared).resolve(self.role);

        let password = if self.show_password || resolved.password.is_empty() {
            resolved.password.as_str()
        } else {
            MASK
        };

        if self.json {
            let output = CredentialsOutput {
                role: self.role,
                server_id,
                username: &resolved.username,
                password,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!("{} {} credentials", "::".blue().bold(), self.role.to_string().bold());
        if let Some(id) = server_id {
            println!("  Server ID: {}", id);
        }
        println!("  Username: {}", display_value(&resolved.username));
        println!("  Password: {}", display_value(password));
        Ok(())
    }
}

fn display_value(value: &str) -> colored::ColoredString {
    if value.is_empty() {
        "(none)".dimmed()
    } else {
        value.normal()
    }
}

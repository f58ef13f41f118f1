use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{error, info};

use super::load_config;
use crate::application::use_cases::{
    ReleaseBuildReport, ReleaseBuildSteps, ReleaseBuildUseCase, ReleaseCoordinator,
};
use crate::common::error::ReleaseError;
use crate::common::result::ReleaseResult;
use crate::domain::entities::release_context::{ReleaseManagementContext, KEY_PREFIX};
use crate::domain::entities::task_context::BuildTaskContext;
use crate::domain::value_objects::build_outcome::BuildOutcome;
use crate::infrastructure::filesystem::ConfigStore;
use crate::infrastructure::scm::GatewayFactory;

/// Build steps that run shell commands in the working directory
pub struct ShellBuildSteps {
    working_dir: PathBuf,
    build_command: Option<String>,
    bump_command: Option<String>,
}

impl ShellBuildSteps {
    pub fn new(
        working_dir: impl Into<PathBuf>,
        build_command: Option<String>,
        bump_command: Option<String>,
    ) -> Self {
        Self {
            working_dir: working_dir.into(),
            build_command,
            bump_command,
        }
    }

    async fn run_shell(&self, command: &str) -> std::io::Result<bool> {
        info!(command, "Running build step");
        let status = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .status()
            .await?;
        Ok(status.success())
    }
}

#[async_trait]
impl ReleaseBuildSteps for ShellBuildSteps {
    async fn build_release_version(&mut self) -> BuildOutcome {
        let Some(command) = self.build_command.as_deref() else {
            return BuildOutcome::Success;
        };

        match self.run_shell(command).await {
            Ok(succeeded) => BuildOutcome::from(succeeded),
            Err(e) => {
                error!(command, error = %e, "Could not start build command");
                BuildOutcome::Failed
            }
        }
    }

    async fn change_to_development_version(&mut self) -> ReleaseResult<bool> {
        let Some(command) = self.bump_command.as_deref() else {
            return Ok(false);
        };

        match self.run_shell(command).await {
            Ok(true) => Ok(true),
            Ok(false) => Err(ReleaseError::build_step_failed(format!(
                "development version command failed: {}",
                command
            ))),
            Err(e) => Err(ReleaseError::build_step_failed_with_source(
                format!("could not start development version command: {}", command),
                e,
            )),
        }
    }
}

#[derive(Serialize)]
struct ReleaseOutput<'a> {
    build_name: &'a str,
    build_number: &'a str,
    #[serde(flatten)]
    report: &'a ReleaseBuildReport,
}

/// Handler for the release command
pub struct ReleaseCommand {
    pub config: Option<PathBuf>,
    pub task: Option<PathBuf>,
    pub build_command: Option<String>,
    pub bump_command: Option<String>,
    pub plan_name: Option<String>,
    pub build_number: u64,
    pub json: bool,
}

impl ReleaseCommand {
    pub async fn execute(&self, working_dir: &Path) -> Result<()> {
        let mut config = load_config(self.config.as_deref(), working_dir).await?;

        let task = match &self.task {
            Some(path) => BuildTaskContext::new(ConfigStore::new().load_task_map(path).await?),
            None => BuildTaskContext::default(),
        };

        // flat task keys replace the file's release section
        if task.has_key_with_prefix(KEY_PREFIX) {
            config.release = ReleaseManagementContext::from_config_map(task.entries());
        }

        let connector = GatewayFactory::create_connector(&config.scm, working_dir)?;
        config
            .validate(connector.scm_type())
            .context("Invalid release configuration")?;

        let plan_name = self.plan_name.clone().unwrap_or_else(|| {
            working_dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "release".to_string())
        });
        let build_name = task.build_name(&plan_name);
        let build_number = task.build_number(self.build_number);

        if !self.json {
            println!(
                "{} Release build {} #{}",
                "::".blue().bold(),
                build_name.bold(),
                build_number
            );
        }

        let mut coordinator = ReleaseCoordinator::new(config.release, connector);
        let mut steps = ShellBuildSteps::new(
            working_dir,
            self.build_command.clone(),
            self.bump_command.clone(),
        );

        let report = ReleaseBuildUseCase::execute(&mut coordinator, &mut steps).await?;

        if self.json {
            let output = ReleaseOutput {
                build_name: &build_name,
                build_number: &build_number,
                report: &report,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            self.print_summary(&report);
        }

        if report.outcome.is_success() {
            Ok(())
        } else {
            Err(anyhow::anyhow!("Release build {}", report.outcome))
        }
    }

    fn print_summary(&self, report: &ReleaseBuildReport) {
        let outcome = match report.outcome {
            BuildOutcome::Success => "success".green(),
            BuildOutcome::Failed => "failed".red(),
            BuildOutcome::Incomplete => "incomplete".yellow(),
        };

        println!("  Outcome: {}", outcome);
        println!("  SCM: {}", report.scm);
        if let Some(url) = &report.remote_url {
            println!("  Remote: {}", url);
        }
        println!(
            "  Tag created: {}",
            if report.tag_created { "yes".green() } else { "no".normal() }
        );
        println!(
            "  Development version committed: {}",
            if report.development_version_committed {
                "yes".green()
            } else {
                "no".normal()
            }
        );
    }
}

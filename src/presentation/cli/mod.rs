pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::env;
use std::path::PathBuf;
use std::process::exit;

use crate::domain::value_objects::credential_override::CredentialRole;
use commands::{CredentialsCommand, ReleaseCommand};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("RELMGR_GIT_HASH"),
    " ",
    env!("RELMGR_BUILD_DATE"),
    ", ",
    env!("RELMGR_BUILD_TARGET"),
    ")"
);

/// Credential role selector
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    /// Dependency resolution
    Resolver,
    /// Artifact deployment
    Deployer,
}

impl From<RoleArg> for CredentialRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Resolver => CredentialRole::Resolver,
            RoleArg::Deployer => CredentialRole::Deployer,
        }
    }
}

/// relmgr - release management for SVN and Git working copies
#[derive(Parser)]
#[command(name = "relmgr")]
#[command(about = "Release management for SVN and Git working copies")]
#[command(version, long_version = LONG_VERSION)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Working directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a release build: tag on success, roll back on failure
    Release {
        /// Configuration file (defaults to relmgr.yaml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Flat task configuration file; its releaseManagement.* keys override the config
        #[arg(long)]
        task: Option<PathBuf>,

        /// Shell command that builds the release version
        #[arg(long)]
        build_command: Option<String>,

        /// Shell command that moves to the next development version
        #[arg(long)]
        bump_command: Option<String>,

        /// Plan name used when the task does not configure a build name
        #[arg(long)]
        plan_name: Option<String>,

        /// Build number used when the task does not configure one
        #[arg(long, default_value_t = 0)]
        build_number: u64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the credentials a resolver or deployer would use
    Credentials {
        /// Configuration file (defaults to relmgr.yaml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Flat task configuration file to take the credential settings from
        #[arg(long)]
        task: Option<PathBuf>,

        /// Key prefix of the task's server id, username and password
        #[arg(long, default_value = "")]
        prefix: String,

        /// Role to resolve credentials for
        #[arg(short, long, value_enum)]
        role: RoleArg,

        /// Print the password instead of a mask
        #[arg(long)]
        show_password: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn verbose(&self) -> bool {
        self.cli.verbose
    }

    pub async fn run(self) -> anyhow::Result<()> {
        if self.cli.no_color {
            colored::control::set_override(false);
        }

        if let Some(ref dir) = self.cli.directory {
            env::set_current_dir(dir)?;
        }

        match self.handle_command().await {
            Ok(_) => Ok(()),
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    async fn handle_command(&self) -> anyhow::Result<()> {
        let working_dir = env::current_dir()?;

        match &self.cli.command {
            Commands::Release {
                config,
                task,
                build_command,
                bump_command,
                plan_name,
                build_number,
                json,
            } => {
                ReleaseCommand {
                    config: config.clone(),
                    task: task.clone(),
                    build_command: build_command.clone(),
                    bump_command: bump_command.clone(),
                    plan_name: plan_name.clone(),
                    build_number: *build_number,
                    json: *json,
                }
                .execute(&working_dir)
                .await
            }
            Commands::Credentials {
                config,
                task,
                prefix,
                role,
                show_password,
                json,
            } => {
                CredentialsCommand {
                    config: config.clone(),
                    task: task.clone(),
                    prefix: prefix.clone(),
                    role: (*role).into(),
                    show_password: *show_password,
                    json: *json,
                }
                .execute(&working_dir)
                .await
            }
        }
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

//! Argument definitions and dispatch for the `cloudlaunch` binary.

mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// CloudLaunch - launch and manage cloud application deployments
#[derive(Parser, Debug)]
#[command(name = "cloudlaunch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log verbosity (default: $RUST_LOG or warn)
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Log verbosity
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Returns the filter directive for this level.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show or change the stored configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Launch and manage deployments
    Deployments {
        #[command(subcommand)]
        command: DeploymentCommand,
    },
    /// Register and list applications
    Applications {
        #[command(subcommand)]
        command: ApplicationCommand,
    },
    /// Browse clouds and their infrastructure
    Clouds {
        #[command(subcommand)]
        command: CloudCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value.
    ///
    /// Configuration names include:
    /// - url: the URL of the CloudLaunch server
    ///   (e.g., https://launch.usegalaxy.org/cloudlaunch/api/v1)
    /// - token: an auth token for the CloudLaunch API
    Set {
        /// Configuration name
        name: String,
        /// New value
        value: String,
    },
    /// Print the stored configuration
    Show,
}

#[derive(Subcommand, Debug)]
pub enum DeploymentCommand {
    /// Launch a new deployment
    Create {
        /// Deployment name
        name: String,
        /// Application slug
        application: String,
        /// Target cloud slug
        cloud: String,
        /// Version of application to launch
        #[arg(long)]
        application_version: Option<String>,
        /// JSON application config file
        #[arg(long)]
        config_app: Option<PathBuf>,
        /// JSON file with cloud credentials (default: read from the environment)
        #[arg(long)]
        credentials_file: Option<PathBuf>,
    },
    /// List deployments
    List {
        /// Show only archived deployments
        #[arg(long)]
        archived: bool,
    },
    /// Check the state of a deployment's instance
    HealthCheck {
        /// Deployment id
        id: i64,
    },
    /// Restart a deployment's instance
    Restart {
        /// Deployment id
        id: i64,
    },
    /// Delete a deployment's instance
    Delete {
        /// Deployment id
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum ApplicationCommand {
    /// Register a new application
    Create {
        /// Application name
        name: String,
        /// One-line summary
        #[arg(long)]
        summary: Option<String>,
        /// Maintainer name or email
        #[arg(long)]
        maintainer: Option<String>,
        /// Long description
        #[arg(long)]
        description: Option<String>,
        /// Information page URL
        #[arg(long)]
        info_url: Option<String>,
        /// Icon URL
        #[arg(long)]
        icon_url: Option<String>,
    },
    /// List applications
    List,
}

#[derive(Subcommand, Debug)]
pub enum CloudCommand {
    /// List clouds
    List,
    /// Regions of a cloud
    Regions {
        #[command(subcommand)]
        command: RegionCommand,
    },
    /// Zones of a region
    Zones {
        #[command(subcommand)]
        command: ZoneCommand,
    },
    /// VM types offered in a zone
    VmTypes {
        #[command(subcommand)]
        command: VmTypeCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum RegionCommand {
    /// List the regions of a cloud
    List {
        /// Cloud slug
        cloud: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ZoneCommand {
    /// List the zones of a region
    List {
        /// Cloud slug
        cloud: String,
        /// Region id
        region: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum VmTypeCommand {
    /// List the VM types of a zone
    List {
        /// Cloud slug
        cloud: String,
        /// Region id
        region: String,
        /// Zone id
        zone: String,
    },
}

impl Cli {
    /// Run the CLI command
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Config { command } => commands::config(command),
            Commands::Deployments { command } => commands::deployments(command).await,
            Commands::Applications { command } => commands::applications(command).await,
            Commands::Clouds { command } => commands::clouds(command).await,
        }
    }
}

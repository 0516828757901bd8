//! # CLI
//!
//! This module defines the command-line interface of `cirrus` using `clap`.
//!
//! Connection settings are global flags with environment fallbacks so they can be configured
//! once per shell (`CIRRUS_ENDPOINT`, `CIRRUS_TIMEOUT`).
use clap::{Args, Parser, Subcommand};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "cirrus", version, about = "Cloud control-plane CLI")]
pub struct Cli {
    /// The API endpoint to connect to
    #[arg(
        long,
        global = true,
        env = "CIRRUS_ENDPOINT",
        default_value = "http://localhost:50051"
    )]
    pub endpoint: String,

    /// Extra gRPC metadata sent with every call ('key:value')
    #[arg(short = 'H', long = "header", global = true, value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Deadline of each call, in seconds
    #[arg(long, global = true, env = "CIRRUS_TIMEOUT", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage compute instances
    Instances {
        #[command(subcommand)]
        sub: InstanceCommands,
    },
    /// Manage disks
    Disks {
        #[command(subcommand)]
        sub: DiskCommands,
    },
}

#[derive(Subcommand)]
pub enum InstanceCommands {
    /// List the instances of a folder
    ///
    /// ## Examples:
    ///
    /// ```bash
    /// cirrus instances list --folder-id my-folder --limit 20
    /// ```
    List(FolderListArgs),
    /// Show a single instance
    Get {
        /// Instance id
        id: String,
    },
    /// List the operations performed on an instance
    Operations {
        /// Instance id
        id: String,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand)]
pub enum DiskCommands {
    /// List the disks of a folder
    List(FolderListArgs),
    /// Show a single disk
    Get {
        /// Disk id
        id: String,
    },
}

#[derive(Args)]
pub struct FolderListArgs {
    /// Folder to list resources from
    #[arg(long)]
    pub folder_id: String,

    /// Server-side filter expression
    #[arg(long, default_value = "")]
    pub filter: String,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args)]
pub struct PageArgs {
    /// Items requested per page (0 uses the default of 1000)
    #[arg(long, default_value_t = 0)]
    pub page_size: i64,

    /// Maximum number of items to print (0 prints everything)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    s.split_once(':')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| "Format must be 'key:value'".to_string())
}

fn parse_timeout(value: &str) -> Result<Duration, String> {
    let secs: f64 = value
        .parse()
        .map_err(|e| format!("Invalid timeout '{value}': {e}"))?;

    Duration::try_from_secs_f64(secs).map_err(|e| format!("Invalid timeout '{value}': {e}"))
}

//! CLI argument parsing

mod common;
mod context;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::defaults;

pub use common::OutputFormat;
pub use context::{AddArgs, DeleteArgs, EnvArgs, ExportArgs, ListArgs};

/// Kubeconfig context manager
#[derive(Parser, Debug)]
#[command(name = "kconf")]
#[command(version)]
#[command(
    about = "A CLI tool to easily manage your Kubernetes kubeconfig file",
    long_about = None
)]
pub struct Cli {
    /// Path to the kubeconfig file to use. Overrides KUBECONFIG env var and default path.
    #[arg(short = 'k', long, global = true)]
    pub kubeconfig: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new context, cluster, and user to your kubeconfig
    Add(AddArgs),

    /// Delete one or more contexts (and clusters/users no longer used)
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),

    /// Export one or more contexts into a new, self-contained kubeconfig file
    Export(ExportArgs),

    /// List contexts in your kubeconfig
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Print the command that sets KUBECONFIG for your shell
    Env(EnvArgs),
}

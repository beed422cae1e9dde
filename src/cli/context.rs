//! Context command arguments (kubectl-style)

use std::path::PathBuf;

use clap::Parser;

use super::common::OutputFormat;
use crate::config::defaults;

/// Arguments for 'add'
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
        kconf add -f new-cluster.yaml\n  \
        kconf add -f new-cluster.yaml --yes   # override existing entries without asking")]
pub struct AddArgs {
    /// YAML file with the new cluster, user, and context (first entry of each list is used)
    #[arg(short, long)]
    pub file: PathBuf,

    /// Override existing entries without prompting
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}

/// Arguments for 'delete'
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Name of the context to delete. Can be specified multiple times.
    #[arg(short, long = "context", required = true)]
    pub contexts: Vec<String>,
}

/// Arguments for 'export'
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
        kconf export -c prod -c staging -o team.yaml\n  \
        kubectl --kubeconfig team.yaml get pods")]
pub struct ExportArgs {
    /// Name of the context to export. Can be specified multiple times.
    #[arg(short, long = "context", required = true)]
    pub contexts: Vec<String>,

    /// Path for the new exported kubeconfig file
    #[arg(short, long, default_value = defaults::EXPORT_OUTPUT)]
    pub output: PathBuf,
}

/// Arguments for 'list'
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Arguments for 'env'
#[derive(Parser, Debug)]
pub struct EnvArgs {
    /// Path to a kubeconfig file to include. Can be specified multiple times.
    #[arg(short, long = "file", required = true)]
    pub files: Vec<PathBuf>,
}

//! kconf - Manage contexts in a Kubernetes kubeconfig file
//!
//! Adds, deletes, and exports contexts while keeping the `clusters`, `users`,
//! and `contexts` collections consistent with each other.
//!
//! # Features
//!
//! - Add a cluster/user/context bundle, asking before overriding entries
//! - Delete contexts, cascading to clusters and users nobody uses anymore
//! - Export contexts into a new self-contained kubeconfig
//! - Single `.bak` backup of the previous kubeconfig on every save
//!
//! # Example
//!
//! ```bash
//! # Merge a new context into ~/.kube/config
//! kconf add -f new-cluster.yaml
//!
//! # Delete two contexts
//! kconf delete -c old-prod -c old-dev
//!
//! # Share a context with a teammate
//! kconf export -c staging -o staging.yaml
//!
//! # Work on another kubeconfig
//! kconf --kubeconfig ./team.yaml list
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod kubeconfig;
pub mod output;
pub mod shell;
pub mod ui;

pub use cli::{Cli, Command, OutputFormat};
pub use error::{KconfError, Result};
pub use kubeconfig::{
    run_command, Bundle, Cascade, Cluster, Context, ContextSpec, DeleteReport, Document,
    Entry, EntryChange, EntryKind, Export, KubeconfigStore, OverridePrompt, User,
};

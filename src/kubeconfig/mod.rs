//! Kubeconfig document store
//!
//! Loads, mutates, and saves the kubeconfig while keeping contexts, clusters,
//! and users consistent with each other.

mod commands;
mod lookup;
mod models;
mod operations;
mod resolve;
mod store;

pub use commands::run_command;
pub use lookup::{find_by_name, ChangeAction, EntryChange, Named, OverridePrompt};
pub use models::{Bundle, Cluster, Context, ContextSpec, Document, Entry, EntryKind, User};
pub use operations::{Cascade, DeleteReport, Export};
pub use resolve::resolve_kubeconfig_path;
pub use store::{load_bundle, write_document, KubeconfigStore};

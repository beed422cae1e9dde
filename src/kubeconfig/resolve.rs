//! Kubeconfig path resolution from multiple sources

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::kubeconfig as kube_config;

/// Resolve the kubeconfig path from multiple sources:
/// 1. --kubeconfig CLI flag
/// 2. First entry of the KUBECONFIG env var
/// 3. ~/.kube/config
pub fn resolve_kubeconfig_path(explicit: Option<&Path>) -> PathBuf {
    resolve_from_sources(
        explicit,
        std::env::var_os(kube_config::ENV_VAR),
        dirs::home_dir(),
    )
}

fn resolve_from_sources(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    home: Option<PathBuf>,
) -> PathBuf {
    // 1. CLI flag
    if let Some(path) = explicit {
        debug!("Using explicit kubeconfig path: {}", path.display());
        return path.to_path_buf();
    }

    // 2. Environment variable, which may hold a list; modifications go to the
    // first non-empty entry
    if let Some(value) = env_value {
        if let Some(first) = std::env::split_paths(&value).find(|p| !p.as_os_str().is_empty()) {
            debug!(
                "Using kubeconfig path from {} env var: {}",
                kube_config::ENV_VAR,
                first.display()
            );
            return first;
        }
    }

    // 3. Default under the home directory
    let path = home
        .unwrap_or_else(|| PathBuf::from("."))
        .join(kube_config::DIR_NAME)
        .join(kube_config::FILE_NAME);
    debug!("Using default kubeconfig path: {}", path.display());
    path
}

//! KUBECONFIG value construction for the user's shell
//!
//! Builds the variable value and the command that sets it. Shell startup
//! files are never edited.

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use log::debug;

use crate::config::kubeconfig as kube_config;
use crate::error::{KconfError, Result};

/// Shells we know how to print a set command for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    Bash,
    Zsh,
    Fish,
    /// Windows `setx`
    Cmd,
}

impl ShellKind {
    /// Detect the shell from the platform and `$SHELL`
    pub fn detect() -> Result<Self> {
        if cfg!(windows) {
            return Ok(ShellKind::Cmd);
        }
        let shell = std::env::var("SHELL").unwrap_or_default();
        Self::from_shell_path(&shell).ok_or_else(|| {
            KconfError::Config(format!(
                "Unsupported shell '{}'. Set {} manually.",
                shell,
                kube_config::ENV_VAR
            ))
        })
    }

    /// Map a `$SHELL` value such as `/usr/bin/zsh`
    pub fn from_shell_path(shell: &str) -> Option<Self> {
        match shell.rsplit('/').next().unwrap_or_default() {
            "bash" => Some(ShellKind::Bash),
            "zsh" => Some(ShellKind::Zsh),
            "fish" => Some(ShellKind::Fish),
            _ => None,
        }
    }

    /// Startup file (relative to HOME) where the command usually goes
    pub fn startup_file(&self) -> Option<&'static str> {
        match self {
            ShellKind::Bash => Some(".bashrc"),
            ShellKind::Zsh => Some(".zshrc"),
            ShellKind::Fish => Some(".config/fish/config.fish"),
            ShellKind::Cmd => None,
        }
    }

    /// Command that sets KUBECONFIG to `value`
    pub fn set_command(&self, value: &str) -> String {
        let var = kube_config::ENV_VAR;
        match self {
            ShellKind::Bash | ShellKind::Zsh => format!("export {}=\"{}\"", var, value),
            ShellKind::Fish => format!("set -x {} \"{}\"", var, value),
            ShellKind::Cmd => format!("setx {} \"{}\"", var, value),
        }
    }
}

/// Join the absolute forms of `paths` with the platform path-list separator
pub fn kubeconfig_value(paths: &[PathBuf]) -> Result<OsString> {
    let absolute = paths
        .iter()
        .map(|p| {
            fs::canonicalize(p).map_err(|e| {
                KconfError::Config(format!("Cannot resolve {}: {}", p.display(), e))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let value = std::env::join_paths(&absolute)?;
    debug!("Constructed {} value: {:?}", kube_config::ENV_VAR, value);
    Ok(value)
}

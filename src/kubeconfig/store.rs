//! Kubeconfig file I/O

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde_yml::{Mapping, Value};

use crate::config::{document, kubeconfig as kube_config};
use crate::error::{KconfError, Result};

use super::models::{Bundle, Document};
use super::resolve::resolve_kubeconfig_path;

/// Handles reading and writing the kubeconfig file
pub struct KubeconfigStore {
    path: PathBuf,
}

impl KubeconfigStore {
    /// Create a store for the resolved kubeconfig path
    /// (explicit path, then KUBECONFIG, then ~/.kube/config)
    pub fn new(explicit: Option<&Path>) -> Self {
        Self {
            path: resolve_kubeconfig_path(explicit),
        }
    }

    /// Create a store with a fixed path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling holding the previous version, `<file name>.bak`
    pub fn backup_path(&self) -> PathBuf {
        with_name_suffix(&self.path, kube_config::BACKUP_SUFFIX)
    }

    /// Load the kubeconfig from disk.
    /// Returns an empty document if the file doesn't exist, errors on YAML it
    /// cannot parse. Entries with an unexpected shape are kept as-is.
    pub fn load(&self) -> Result<Document> {
        if !self.path.exists() {
            debug!("{} does not exist, starting empty", self.path.display());
            return Ok(Document::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| KconfError::Read {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        parse_document(&content).map_err(|message| KconfError::MalformedDocument {
            path: self.path.clone(),
            message,
        })
    }

    /// Save the document, keeping the previous file as a `.bak` sibling.
    /// Uses atomic write (tmp file + rename) and creates parent dir if needed.
    /// Returns the backup path when a previous version existed.
    pub fn save(&self, doc: &Document) -> Result<Option<PathBuf>> {
        let backup = if self.path.exists() {
            let backup = self.backup_path();
            fs::copy(&self.path, &backup).map_err(|e| persist_error(&backup, e))?;
            debug!("Backed up {} to {}", self.path.display(), backup.display());
            Some(backup)
        } else {
            None
        };

        write_document(&self.path, doc)?;
        Ok(backup)
    }
}

/// Serialize `doc` to `path` without keeping a backup.
/// Uses atomic write (tmp file + rename) and creates parent dir if needed.
pub fn write_document(path: &Path, doc: &Document) -> Result<()> {
    // Create parent directory if missing
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| persist_error(parent, e))?;
    }

    let yaml = serde_yml::to_string(doc).map_err(|e| KconfError::Persist {
        path: path.to_path_buf(),
        message: format!("failed to serialize kubeconfig: {}", e),
    })?;

    let tmp_path = with_name_suffix(path, kube_config::TMP_SUFFIX);
    fs::write(&tmp_path, &yaml).map_err(|e| persist_error(&tmp_path, e))?;

    // Kubeconfigs carry credentials: 0600 on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = fs::Permissions::from_mode(0o600);
        fs::set_permissions(&tmp_path, permissions).map_err(|e| persist_error(&tmp_path, e))?;
    }

    fs::rename(&tmp_path, path).map_err(|e| persist_error(path, e))?;
    debug!("Wrote {} bytes to {}", yaml.len(), path.display());
    Ok(())
}

/// Read a bundle file for `add`
pub fn load_bundle(path: &Path) -> Result<Bundle> {
    let content = fs::read_to_string(path).map_err(|e| {
        KconfError::MalformedBundle(format!("failed to read {}: {}", path.display(), e))
    })?;

    let value: Value = serde_yml::from_str(&content).map_err(|e| {
        KconfError::MalformedBundle(format!("failed to parse {}: {}", path.display(), e))
    })?;

    Bundle::from_value(&value)
}

/// Parse and normalize kubeconfig YAML.
///
/// Empty input is an empty document. `clusters`, `users`, and `contexts` that
/// are missing or not sequences are replaced by empty sequences.
fn parse_document(content: &str) -> std::result::Result<Document, String> {
    let value: Value = if content.trim().is_empty() {
        Value::Null
    } else {
        serde_yml::from_str(content).map_err(|e| e.to_string())?
    };

    let mut root = match value {
        Value::Null => Mapping::new(),
        Value::Mapping(map) => map,
        _ => return Err("top-level value is not a mapping".to_string()),
    };

    for key in document::COLLECTIONS {
        if !matches!(root.get(key), Some(Value::Sequence(_))) {
            debug!("Normalizing '{}' to an empty list", key);
            root.insert(Value::String(key.to_string()), Value::Sequence(Vec::new()));
        }
    }

    serde_yml::from_value(Value::Mapping(root)).map_err(|e| e.to_string())
}

fn with_name_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(suffix);
    path.with_file_name(name)
}

fn persist_error(path: &Path, err: std::io::Error) -> KconfError {
    KconfError::Persist {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

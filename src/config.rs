/// Configuration constants for locating the kubeconfig file
pub mod kubeconfig {
    /// Environment variable holding a list of kubeconfig paths
    pub const ENV_VAR: &str = "KUBECONFIG";

    /// Directory under HOME holding the default kubeconfig
    pub const DIR_NAME: &str = ".kube";

    /// Default kubeconfig file name
    pub const FILE_NAME: &str = "config";

    /// Suffix appended to the file name for the single-generation backup
    pub const BACKUP_SUFFIX: &str = ".bak";

    /// Suffix appended to the file name for the temporary write target
    pub const TMP_SUFFIX: &str = ".tmp";
}

/// Fixed values of a kubeconfig document
pub mod document {
    /// Default `apiVersion`
    pub const API_VERSION: &str = "v1";

    /// Default `kind`
    pub const KIND: &str = "Config";

    /// Top-level keys of the three entry collections
    pub const COLLECTIONS: [&str; 3] = ["clusters", "users", "contexts"];
}

/// Default values for CLI
pub mod defaults {
    /// Default log level
    pub const LOG_LEVEL: &str = "warn";

    /// Default output path for `export`
    pub const EXPORT_OUTPUT: &str = "context";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_suffix_format() {
        assert!(kubeconfig::BACKUP_SUFFIX.starts_with('.'));
    }

    #[test]
    fn test_collections_order() {
        assert_eq!(document::COLLECTIONS, ["clusters", "users", "contexts"]);
    }

    #[test]
    fn test_default_log_level() {
        assert_eq!(defaults::LOG_LEVEL, "warn");
    }
}

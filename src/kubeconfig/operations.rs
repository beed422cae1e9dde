//! Add, delete, and export operations on a kubeconfig document

use std::collections::HashSet;

use log::{debug, info};
use serde_yml::{Mapping, Value};

use crate::config::document;
use crate::error::{KconfError, Result};

use super::lookup::{find_by_name, upsert, EntryChange, Named, OverridePrompt};
use super::models::{Bundle, Context, Document, Entry};

/// Outcome for a cluster or user referenced by a deleted context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cascade {
    /// No remaining context referenced it, so it was removed
    Removed(String),
    /// Still referenced by another context
    InUse(String),
    /// Unreferenced, but no entry with that name existed
    Dangling(String),
}

/// Summary of a `delete_context` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteReport {
    pub context: String,
    /// `None` when the deleted context named no cluster
    pub cluster: Option<Cascade>,
    /// `None` when the deleted context named no user
    pub user: Option<Cascade>,
    pub cleared_current: bool,
}

/// Result of `export_contexts`
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    /// Standalone document holding the exported contexts
    pub document: Document,
    /// Requested names that did not resolve, in request order
    pub missing: Vec<String>,
}

impl Document {
    /// Merge a cluster, user, and context into the document.
    ///
    /// Kinds are processed in the order cluster, user, context. A name
    /// collision asks `prompt`; a confirmed override replaces the entry at its
    /// current position. Writes are staged and only committed once all three
    /// succeed, so a declined override leaves the document untouched.
    pub fn add_context(
        &mut self,
        bundle: Bundle,
        prompt: &mut dyn OverridePrompt,
    ) -> Result<Vec<EntryChange>> {
        let Bundle {
            cluster,
            user,
            context,
        } = bundle;

        let mut clusters = self.clusters.clone();
        let mut users = self.users.clone();
        let mut contexts = self.contexts.clone();

        let cluster_change = upsert(&mut clusters, cluster, prompt)?;
        let user_change = upsert(&mut users, user, prompt)?;
        let context_change = upsert(&mut contexts, context, prompt)?;

        self.clusters = clusters;
        self.users = users;
        self.contexts = contexts;

        Ok(vec![cluster_change, user_change, context_change])
    }

    /// Delete a context and any cluster or user left unreferenced by it.
    ///
    /// Clears `current-context` when it names the deleted context.
    pub fn delete_context(&mut self, name: &str) -> Result<DeleteReport> {
        let index = find_by_name(&self.contexts, name)
            .map(|(index, _)| index)
            .ok_or_else(|| KconfError::NotFound(format!("Context '{}' not found", name)))?;

        info!("Deleting context '{}'", name);
        let removed = self.contexts.remove(index);

        // Usage is checked against the remaining contexts only
        let cluster = removed.cluster_ref().map(|cluster_name| {
            let in_use = self
                .contexts
                .iter()
                .any(|c| c.cluster_ref() == Some(cluster_name));
            cascade(&mut self.clusters, cluster_name, in_use)
        });
        let user = removed.user_ref().map(|user_name| {
            let in_use = self.contexts.iter().any(|c| c.user_ref() == Some(user_name));
            cascade(&mut self.users, user_name, in_use)
        });

        let cleared_current = self.current_context.as_deref() == Some(name);
        if cleared_current {
            debug!("Unsetting current-context '{}'", name);
            self.current_context = None;
        }

        Ok(DeleteReport {
            context: name.to_string(),
            cluster,
            user,
            cleared_current,
        })
    }

    /// Build a standalone document from the named contexts plus the clusters
    /// and users they reference. The source document is not modified.
    ///
    /// Unknown names are skipped and reported in [`Export::missing`]. Fails
    /// with `NotFound` when none of the names resolve.
    pub fn export_contexts<S: AsRef<str>>(&self, names: &[S]) -> Result<Export> {
        let mut contexts: Vec<Entry<Context>> = Vec::new();
        let mut current_context: Option<String> = None;
        let mut missing = Vec::new();
        let mut cluster_names: HashSet<&str> = HashSet::new();
        let mut user_names: HashSet<&str> = HashSet::new();

        for name in names {
            let name: &str = name.as_ref();
            match find_by_name(&self.contexts, name) {
                Some((_, ctx)) => {
                    cluster_names.extend(ctx.cluster_ref());
                    user_names.extend(ctx.user_ref());
                    current_context.get_or_insert_with(|| name.to_string());
                    contexts.push(ctx.clone());
                }
                None => {
                    debug!("Context '{}' not found, skipping", name);
                    missing.push(name.to_string());
                }
            }
        }

        let Some(current_context) = current_context else {
            return Err(KconfError::NotFound(
                "None of the specified contexts were found".to_string(),
            ));
        };

        let clusters = referenced(&self.clusters, &cluster_names);
        let users = referenced(&self.users, &user_names);

        debug!(
            "Exporting {} context(s), current-context '{}'",
            contexts.len(),
            current_context
        );

        Ok(Export {
            document: Document {
                api_version: document::API_VERSION.to_string(),
                kind: document::KIND.to_string(),
                preferences: Some(Value::Mapping(Mapping::new())),
                current_context: Some(current_context),
                clusters,
                users,
                contexts,
                extra: Mapping::new(),
            },
            missing,
        })
    }
}

/// Remove the entry called `name` unless another context still uses it
fn cascade<T: Named>(entries: &mut Vec<Entry<T>>, name: &str, in_use: bool) -> Cascade {
    if in_use {
        return Cascade::InUse(name.to_string());
    }
    match find_by_name(entries, name).map(|(index, _)| index) {
        Some(index) => {
            info!("Deleting unused {} '{}'", T::KIND, name);
            entries.remove(index);
            Cascade::Removed(name.to_string())
        }
        None => Cascade::Dangling(name.to_string()),
    }
}

/// Entries whose name is in `names`, in collection order
fn referenced<T: Named + Clone>(entries: &[Entry<T>], names: &HashSet<&str>) -> Vec<Entry<T>> {
    entries
        .iter()
        .filter(|entry| entry.name().is_some_and(|name| names.contains(name)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kubeconfig::lookup::ChangeAction;
    use crate::kubeconfig::models::EntryKind;
    use std::collections::VecDeque;

    /// Answers prompts from a script and records what was asked
    struct ScriptedPrompt {
        answers: VecDeque<bool>,
        asked: Vec<(EntryKind, String)>,
    }

    impl ScriptedPrompt {
        fn new(answers: &[bool]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                asked: Vec::new(),
            }
        }
    }

    impl OverridePrompt for ScriptedPrompt {
        fn confirm_override(&mut self, kind: EntryKind, name: &str) -> bool {
            self.asked.push((kind, name.to_string()));
            self.answers.pop_front().unwrap_or(false)
        }
    }

    fn doc(yaml: &str) -> Document {
        serde_yml::from_str(yaml).unwrap()
    }

    fn bundle(yaml: &str) -> Bundle {
        Bundle::from_value(&serde_yml::from_str(yaml).unwrap()).unwrap()
    }

    fn names<T: Named>(entries: &[Entry<T>]) -> Vec<&str> {
        entries.iter().map(|e| e.name().unwrap_or_default()).collect()
    }

    const SHARED: &str = r#"
current-context: a
clusters:
- name: x
  cluster: {server: "https://x"}
- name: y
  cluster: {server: "https://y"}
users:
- name: u1
  user: {token: one}
- name: u2
  user: {token: two}
contexts:
- name: a
  context: {cluster: x, user: u1}
- name: b
  context: {cluster: x, user: u2}
- name: c
  context: {cluster: y, user: u2, namespace: kube-system}
"#;

    const NEW_BUNDLE: &str = r#"
clusters:
- name: z
  cluster: {server: "https://z"}
users:
- name: u3
  user: {token: three}
contexts:
- name: d
  context: {cluster: z, user: u3}
"#;

    #[test]
    fn test_add_appends_all_three() {
        let mut d = doc(SHARED);
        let mut prompt = ScriptedPrompt::new(&[]);
        let changes = d.add_context(bundle(NEW_BUNDLE), &mut prompt).unwrap();

        assert_eq!(changes.len(), 3);
        assert!(changes.iter().all(|c| c.action == ChangeAction::Added));
        assert_eq!(names(&d.clusters), vec!["x", "y", "z"]);
        assert_eq!(names(&d.users), vec!["u1", "u2", "u3"]);
        assert_eq!(names(&d.contexts), vec!["a", "b", "c", "d"]);
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn test_add_twice_with_override_is_idempotent() {
        let mut d = doc(SHARED);
        d.add_context(bundle(NEW_BUNDLE), &mut ScriptedPrompt::new(&[]))
            .unwrap();
        let after_first = d.clone();

        let mut prompt = ScriptedPrompt::new(&[true, true, true]);
        let changes = d.add_context(bundle(NEW_BUNDLE), &mut prompt).unwrap();

        assert!(changes.iter().all(|c| c.action == ChangeAction::Replaced));
        assert_eq!(d, after_first);
        assert_eq!(
            prompt.asked,
            vec![
                (EntryKind::Cluster, "z".to_string()),
                (EntryKind::User, "u3".to_string()),
                (EntryKind::Context, "d".to_string()),
            ]
        );
    }

    #[test]
    fn test_add_override_keeps_position() {
        let mut d = doc(SHARED);
        let replacement = r#"
clusters:
- name: x
  cluster: {server: "https://x-new"}
users:
- name: u9
  user: {}
contexts:
- name: e
  context: {cluster: x, user: u9}
"#;
        d.add_context(bundle(replacement), &mut ScriptedPrompt::new(&[true]))
            .unwrap();

        assert_eq!(names(&d.clusters), vec!["x", "y"]);
        let server = d.clusters[0].parsed().unwrap().cluster.get("server").unwrap();
        assert_eq!(server.as_str(), Some("https://x-new"));
    }

    #[test]
    fn test_add_declined_cluster_override_leaves_document_unchanged() {
        let mut d = doc(
            r#"
clusters:
- name: c1
  cluster: {server: "https://old"}
users: []
contexts: []
"#,
        );
        let before = d.clone();
        let incoming = r#"
clusters:
- name: c1
  cluster: {server: "https://new"}
users:
- name: u1
  user: {}
contexts:
- name: ctx1
  context: {cluster: c1, user: u1}
"#;
        let err = d
            .add_context(bundle(incoming), &mut ScriptedPrompt::new(&[false]))
            .unwrap_err();

        assert!(matches!(err, KconfError::AbortedByUser { kind: EntryKind::Cluster, .. }));
        assert_eq!(d, before);
    }

    #[test]
    fn test_add_declined_context_rolls_back_earlier_kinds() {
        let mut d = doc(SHARED);
        let before = d.clone();
        let incoming = r#"
clusters:
- name: x
  cluster: {server: "https://replaced"}
users:
- name: brand-new
  user: {}
contexts:
- name: a
  context: {cluster: x, user: brand-new}
"#;
        // accept cluster override, decline context override
        let mut prompt = ScriptedPrompt::new(&[true, false]);
        let err = d.add_context(bundle(incoming), &mut prompt).unwrap_err();

        assert!(matches!(err, KconfError::AbortedByUser { kind: EntryKind::Context, .. }));
        assert_eq!(d, before);
        assert_eq!(prompt.asked.len(), 2);
    }

    #[test]
    fn test_delete_then_find_is_not_found() {
        let mut d = doc(SHARED);
        d.delete_context("b").unwrap();
        assert!(find_by_name(&d.contexts, "b").is_none());
    }

    #[test]
    fn test_delete_cascade_keeps_shared_cluster() {
        let mut d = doc(SHARED);
        let report = d.delete_context("a").unwrap();

        assert_eq!(report.cluster, Some(Cascade::InUse("x".to_string())));
        assert_eq!(report.user, Some(Cascade::Removed("u1".to_string())));
        assert_eq!(names(&d.clusters), vec!["x", "y"]);
        assert_eq!(names(&d.users), vec!["u2"]);
        assert_eq!(names(&d.contexts), vec!["b", "c"]);
    }

    #[test]
    fn test_delete_checks_usage_after_removal() {
        let mut d = doc(SHARED);
        d.delete_context("a").unwrap();
        let report = d.delete_context("b").unwrap();

        // b was the last user of x; u2 is still used by c
        assert_eq!(report.cluster, Some(Cascade::Removed("x".to_string())));
        assert_eq!(report.user, Some(Cascade::InUse("u2".to_string())));
        assert_eq!(names(&d.clusters), vec!["y"]);
        assert_eq!(names(&d.users), vec!["u2"]);
    }

    #[test]
    fn test_delete_clears_current_context_only_on_exact_match() {
        let mut d = doc(SHARED);
        let report = d.delete_context("b").unwrap();
        assert!(!report.cleared_current);
        assert_eq!(d.current_context.as_deref(), Some("a"));

        let report = d.delete_context("a").unwrap();
        assert!(report.cleared_current);
        assert!(d.current_context.is_none());
    }

    #[test]
    fn test_delete_single_context_empties_document() {
        let mut d = doc(
            r#"
current-context: ctx1
clusters:
- name: c1
users:
- name: u1
contexts:
- name: ctx1
  context: {cluster: c1, user: u1}
"#,
        );
        d.delete_context("ctx1").unwrap();

        assert!(d.clusters.is_empty());
        assert!(d.users.is_empty());
        assert!(d.contexts.is_empty());
        assert!(d.current_context.is_none());
    }

    #[test]
    fn test_delete_missing_context() {
        let mut d = doc(SHARED);
        let before = d.clone();
        let err = d.delete_context("nope").unwrap_err();
        assert!(matches!(err, KconfError::NotFound(_)));
        assert!(err.to_string().contains("nope"));
        assert_eq!(d, before);
    }

    #[test]
    fn test_delete_with_dangling_reference() {
        let mut d = doc(
            r#"
clusters: []
users:
- name: u1
contexts:
- name: ctx
  context: {cluster: ghost, user: u1}
"#,
        );
        let report = d.delete_context("ctx").unwrap();
        assert_eq!(report.cluster, Some(Cascade::Dangling("ghost".to_string())));
        assert_eq!(report.user, Some(Cascade::Removed("u1".to_string())));
    }

    const WITH_ODD_ENTRIES: &str = r#"
current-context: broken
clusters:
- name: x
  cluster: {server: "https://x"}
- cluster: {server: "https://nameless"}
users:
- name: 2024
  user: {}
- name: u1
  user: {token: one}
contexts:
- name: broken
  context: {cluster: x}
- name: ok
  context: {cluster: x, user: u1}
"#;

    #[test]
    fn test_delete_context_missing_user() {
        let mut d = doc(WITH_ODD_ENTRIES);
        let report = d.delete_context("broken").unwrap();

        assert_eq!(report.cluster, Some(Cascade::InUse("x".to_string())));
        assert_eq!(report.user, None);
        assert!(report.cleared_current);
        assert_eq!(names(&d.contexts), vec!["ok"]);
        // Entries that can't be addressed by name are left alone
        assert_eq!(d.clusters.len(), 2);
        assert_eq!(d.users.len(), 2);
    }

    #[test]
    fn test_raw_context_keeps_cluster_in_use() {
        let mut d = doc(WITH_ODD_ENTRIES);
        let report = d.delete_context("ok").unwrap();

        assert_eq!(report.cluster, Some(Cascade::InUse("x".to_string())));
        assert_eq!(report.user, Some(Cascade::Removed("u1".to_string())));
        assert_eq!(names(&d.contexts), vec!["broken"]);
    }

    #[test]
    fn test_export_includes_raw_context() {
        let d = doc(WITH_ODD_ENTRIES);
        let export = d.export_contexts(&["broken"]).unwrap();

        assert_eq!(names(&export.document.contexts), vec!["broken"]);
        assert_eq!(names(&export.document.clusters), vec!["x"]);
        assert!(export.document.users.is_empty());
        assert_eq!(export.document.current_context.as_deref(), Some("broken"));
    }

    #[test]
    fn test_export_collects_referenced_entries() {
        let d = doc(SHARED);
        let export = d.export_contexts(&["b", "a"]).unwrap();
        let out = &export.document;

        assert_eq!(names(&out.contexts), vec!["b", "a"]);
        assert_eq!(names(&out.clusters), vec!["x"]);
        assert_eq!(names(&out.users), vec!["u1", "u2"]);
        assert_eq!(out.current_context.as_deref(), Some("b"));
        assert_eq!(out.api_version, "v1");
        assert_eq!(out.kind, "Config");
        assert_eq!(out.preferences, Some(Value::Mapping(Mapping::new())));
        assert!(export.missing.is_empty());
    }

    #[test]
    fn test_export_skips_missing_names() {
        let d = doc(SHARED);
        let export = d.export_contexts(&["ghost", "c"]).unwrap();

        assert_eq!(names(&export.document.contexts), vec!["c"]);
        assert_eq!(names(&export.document.clusters), vec!["y"]);
        assert_eq!(names(&export.document.users), vec!["u2"]);
        assert_eq!(export.document.current_context.as_deref(), Some("c"));
        assert_eq!(export.missing, vec!["ghost".to_string()]);
    }

    #[test]
    fn test_export_all_missing_fails_and_leaves_source() {
        let d = doc(SHARED);
        let before = d.clone();
        let err = d.export_contexts(&["nope", "nada"]).unwrap_err();
        assert!(matches!(err, KconfError::NotFound(_)));
        assert_eq!(d, before);
    }

    #[test]
    fn test_export_keeps_duplicate_requests() {
        let d = doc(SHARED);
        let export = d.export_contexts(&["a", "a"]).unwrap();
        assert_eq!(names(&export.document.contexts), vec!["a", "a"]);
        assert_eq!(names(&export.document.clusters), vec!["x"]);
    }

    #[test]
    fn test_export_round_trip() {
        let d = doc(SHARED);
        let export = d.export_contexts(&["a", "b"]).unwrap();
        let yaml = serde_yml::to_string(&export.document).unwrap();
        let reloaded: Document = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(names(&reloaded.contexts), vec!["a", "b"]);
        assert_eq!(names(&reloaded.clusters), vec!["x"]);
        assert_eq!(names(&reloaded.users), vec!["u1", "u2"]);
        assert_eq!(reloaded.current_context.as_deref(), Some("a"));
    }
}

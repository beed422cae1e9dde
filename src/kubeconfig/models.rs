//! Kubeconfig document data models

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_yml::{Mapping, Value};

use crate::config::document;
use crate::error::{KconfError, Result};

/// The three kinds of named entries in a kubeconfig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Cluster,
    User,
    Context,
}

impl EntryKind {
    /// Top-level key of the collection holding this kind
    pub fn collection(&self) -> &'static str {
        match self {
            EntryKind::Cluster => "clusters",
            EntryKind::User => "users",
            EntryKind::Context => "contexts",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Cluster => write!(f, "cluster"),
            EntryKind::User => write!(f, "user"),
            EntryKind::Context => write!(f, "context"),
        }
    }
}

fn default_api_version() -> String {
    document::API_VERSION.to_string()
}

fn default_kind() -> String {
    document::KIND.to_string()
}

/// Top-level kubeconfig document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "apiVersion", default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Opaque client preferences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Value>,
    /// Name of the active context
    #[serde(
        rename = "current-context",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub current_context: Option<String>,
    #[serde(default)]
    pub clusters: Vec<Entry<Cluster>>,
    #[serde(default)]
    pub users: Vec<Entry<User>>,
    #[serde(default)]
    pub contexts: Vec<Entry<Context>>,
    /// Any other top-level keys, kept in file order
    #[serde(flatten)]
    pub extra: Mapping,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            preferences: None,
            current_context: None,
            clusters: Vec::new(),
            users: Vec::new(),
            contexts: Vec::new(),
            extra: Mapping::new(),
        }
    }
}

/// An item of `clusters`, `users`, or `contexts`.
///
/// Items without the expected shape (no `name`, a non-string name, a context
/// missing its `cluster` or `user`) are kept verbatim as `Raw` so a load and
/// save round trip never drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry<T> {
    Parsed(T),
    Raw(Value),
}

impl<T> Entry<T> {
    pub fn parsed(&self) -> Option<&T> {
        match self {
            Entry::Parsed(entry) => Some(entry),
            Entry::Raw(_) => None,
        }
    }
}

impl<T> From<T> for Entry<T> {
    fn from(entry: T) -> Self {
        Entry::Parsed(entry)
    }
}

impl Entry<Context> {
    /// Name of the referenced cluster, if the context has one
    pub fn cluster_ref(&self) -> Option<&str> {
        match self {
            Entry::Parsed(ctx) => Some(ctx.context.cluster.as_str()),
            Entry::Raw(value) => raw_context_field(value, "cluster"),
        }
    }

    /// Name of the referenced user, if the context has one
    pub fn user_ref(&self) -> Option<&str> {
        match self {
            Entry::Parsed(ctx) => Some(ctx.context.user.as_str()),
            Entry::Raw(value) => raw_context_field(value, "user"),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        match self {
            Entry::Parsed(ctx) => ctx.context.namespace.as_deref(),
            Entry::Raw(value) => raw_context_field(value, "namespace"),
        }
    }
}

fn raw_context_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get("context")?.get(key)?.as_str()
}

/// A named cluster with opaque connection details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub name: String,
    #[serde(default)]
    pub cluster: Value,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A named user with opaque credentials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(default)]
    pub user: Value,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A named context binding a cluster and a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub name: String,
    pub context: ContextSpec,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// References held by a context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSpec {
    pub cluster: String,
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// One cluster, user, and context to merge into a document
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    pub cluster: Cluster,
    pub user: User,
    pub context: Context,
}

impl Bundle {
    /// Build a bundle from a parsed kubeconfig-shaped value.
    /// Only the first entry of each collection is used.
    pub fn from_value(value: &Value) -> Result<Self> {
        let root = value.as_mapping().ok_or_else(|| {
            KconfError::MalformedBundle(
                "expected a mapping with 'clusters', 'users', and 'contexts' keys".to_string(),
            )
        })?;

        Ok(Self {
            cluster: first_entry(root, EntryKind::Cluster)?,
            user: first_entry(root, EntryKind::User)?,
            context: first_entry(root, EntryKind::Context)?,
        })
    }
}

fn first_entry<T>(root: &Mapping, kind: EntryKind) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let key = kind.collection();
    let first = root
        .get(key)
        .and_then(Value::as_sequence)
        .and_then(|entries| entries.first())
        .ok_or_else(|| {
            KconfError::MalformedBundle(format!("expected a non-empty '{}' list", key))
        })?;

    serde_yml::from_value(first.clone())
        .map_err(|e| KconfError::MalformedBundle(format!("invalid {} entry: {}", kind, e)))
}

//! Name lookup and override-on-conflict helpers

use log::{debug, info};
use serde_yml::Value;

use crate::error::{KconfError, Result};

use super::models::{Cluster, Context, Entry, EntryKind, User};

/// An entry addressed by its unique `name`
pub trait Named {
    const KIND: EntryKind;

    fn name(&self) -> &str;
}

impl Named for Cluster {
    const KIND: EntryKind = EntryKind::Cluster;

    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for User {
    const KIND: EntryKind = EntryKind::User;

    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Context {
    const KIND: EntryKind = EntryKind::Context;

    fn name(&self) -> &str {
        &self.name
    }
}

impl<T: Named> Entry<T> {
    /// Entry name; a raw entry only has one when `name` is a string
    pub fn name(&self) -> Option<&str> {
        match self {
            Entry::Parsed(entry) => Some(entry.name()),
            Entry::Raw(value) => value.get("name").and_then(Value::as_str),
        }
    }
}

/// Asks whether an existing entry may be replaced
pub trait OverridePrompt {
    /// Returns `true` only on an explicit confirmation
    fn confirm_override(&mut self, kind: EntryKind, name: &str) -> bool;
}

/// Find an entry and its position by name
pub fn find_by_name<'a, T: Named>(
    entries: &'a [Entry<T>],
    name: &str,
) -> Option<(usize, &'a Entry<T>)> {
    entries
        .iter()
        .enumerate()
        .find(|(_, entry)| entry.name() == Some(name))
}

/// What happened to a single entry during `add`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeAction {
    Added,
    Replaced,
}

/// A single applied entry write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryChange {
    pub kind: EntryKind,
    pub name: String,
    pub action: ChangeAction,
}

/// Append `entry`, or replace the same-named one in place if `prompt` agrees
pub(crate) fn upsert<T: Named>(
    entries: &mut Vec<Entry<T>>,
    entry: T,
    prompt: &mut dyn OverridePrompt,
) -> Result<EntryChange> {
    let name = entry.name().to_string();

    let action = match find_by_name(entries, &name).map(|(index, _)| index) {
        Some(index) => {
            debug!("{} '{}' already exists at position {}", T::KIND, name, index);
            if !prompt.confirm_override(T::KIND, &name) {
                return Err(KconfError::AbortedByUser {
                    kind: T::KIND,
                    name,
                });
            }
            info!("Updating existing {} '{}'", T::KIND, name);
            entries[index] = Entry::Parsed(entry);
            ChangeAction::Replaced
        }
        None => {
            info!("Adding new {} '{}'", T::KIND, name);
            entries.push(Entry::Parsed(entry));
            ChangeAction::Added
        }
    };

    Ok(EntryChange {
        kind: T::KIND,
        name,
        action,
    })
}

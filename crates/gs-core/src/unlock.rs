//! Flag tables and unlock condition evaluation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named boolean facts about the world.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flags(BTreeMap<String, bool>);

impl Flags {
    /// Create an empty flag table.
    pub fn new() -> Self {
        Self::default()
    }

    /// True only if the flag is present and set.
    pub fn is_set(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    /// Look up a flag, distinguishing absent from false.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    /// Return a table with `name` set to `value`, overwriting any previous value.
    pub fn with(mut self, name: impl Into<String>, value: bool) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    /// Return a table with `name` removed.
    pub fn without(mut self, name: &str) -> Self {
        self.0.remove(name);
        self
    }

    /// Iterate flags in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of flags in the table.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the table holds no flags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for Flags {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// The flags that must all be set before an entity becomes accessible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnlockConditions(pub Vec<String>);

impl UnlockConditions {
    /// Conditions that are always satisfied.
    pub fn none() -> Self {
        Self::default()
    }

    /// Evaluate against a flag table.
    pub fn is_satisfied(&self, flags: &Flags) -> bool {
        is_unlocked(&self.0, flags)
    }

    /// True if there are no conditions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for UnlockConditions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// True if every named flag is set. An empty condition list is always satisfied.
pub fn is_unlocked<S: AsRef<str>>(conditions: &[S], flags: &Flags) -> bool {
    conditions.iter().all(|c| flags.is_set(c.as_ref()))
}

/// Entities gated behind unlock conditions.
pub trait Unlockable {
    /// The entity's unlock conditions.
    fn unlock_conditions(&self) -> &UnlockConditions;

    /// Whether the entity is accessible under the given flags.
    fn is_unlocked(&self, flags: &Flags) -> bool {
        self.unlock_conditions().is_satisfied(flags)
    }
}

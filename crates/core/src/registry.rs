//! Ordered, inheritance-aware registries of declared elements

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Something that can be declared on a schema and ordered by declaration.
pub trait Element {
    /// Sequence number drawn at construction time
    fn sequence(&self) -> u64;

    /// Adopt an inherited sequence number when overriding an existing entry
    fn set_sequence(&mut self, sequence: u64);
}

/// Merged, ordered mapping of declaration name to element.
///
/// Entries are kept in ascending sequence order. An entry that overrides an
/// inherited one takes over the inherited sequence, so redeclaring a name
/// never moves it.
pub struct Registry<E> {
    entries: Vec<(String, Arc<E>)>,
}

impl<E: Element> Registry<E> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Merge the registries of every direct base (in base order) with the
    /// newly declared `locals`.
    ///
    /// A later base wins over an earlier one for the same name. A local that
    /// shadows an inherited name keeps the inherited sequence; other locals
    /// keep their own and therefore sort after everything inherited. Among
    /// duplicate local names the last one wins.
    pub fn merge<'a, I>(bases: I, locals: Vec<(String, E)>) -> Self
    where
        I: IntoIterator<Item = &'a Registry<E>>,
        E: 'a,
    {
        let mut merged: HashMap<String, Arc<E>> = HashMap::new();
        for base in bases {
            for (name, element) in &base.entries {
                merged.insert(name.clone(), Arc::clone(element));
            }
        }

        let mut inherited_sequence: HashMap<String, u64> = HashMap::new();
        for (name, _) in &locals {
            if let Some(stale) = merged.remove(name) {
                inherited_sequence.insert(name.clone(), stale.sequence());
            }
        }

        for (name, mut element) in locals {
            if let Some(&sequence) = inherited_sequence.get(&name) {
                tracing::trace!(field = %name, sequence, "override keeps inherited position");
                element.set_sequence(sequence);
            }
            merged.insert(name, Arc::new(element));
        }

        let mut entries: Vec<(String, Arc<E>)> = merged.into_iter().collect();
        entries.sort_by_key(|(_, element)| element.sequence());

        Self { entries }
    }

    /// Build a registry from local declarations alone
    pub fn from_locals(locals: Vec<(String, E)>) -> Self {
        Self::merge(std::iter::empty::<&Registry<E>>(), locals)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<E>> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, element)| element)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Zero-based position of `name` in iteration order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(entry, _)| entry == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, element)` pairs in sequence order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<E>)> {
        self.entries
            .iter()
            .map(|(name, element)| (name.as_str(), element))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Arc<E>> {
        self.entries.iter().map(|(_, element)| element)
    }
}

impl<E: Element> Default for Registry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Registry<E> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<E> fmt::Debug for Registry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(name, _)| name))
            .finish()
    }
}

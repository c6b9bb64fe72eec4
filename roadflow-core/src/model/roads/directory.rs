//! Name lookup over junctions

use std::collections::BTreeSet;

use super::components::Junction;
use crate::JunctionId;

/// Sorted index from junction name to id. Several junctions may share a
/// name, so entries are keyed by `(name, id)`.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    names: BTreeSet<(String, JunctionId)>,
}

impl Directory {
    pub fn new<'a>(junctions: impl IntoIterator<Item = &'a Junction>) -> Self {
        let names = junctions
            .into_iter()
            .map(|junction| (junction.name.clone(), junction.id))
            .collect();
        Self { names }
    }

    /// Exact, case-sensitive lookup. The lowest id wins when names repeat.
    pub fn by_name(&self, name: &str) -> Option<JunctionId> {
        self.names
            .range((name.to_owned(), JunctionId::MIN)..)
            .next()
            .filter(|(candidate, _)| candidate == name)
            .map(|(_, id)| *id)
    }

    /// Ids of all junctions whose name starts with `prefix`, by name then id.
    pub fn search_prefix(&self, prefix: &str) -> Vec<JunctionId> {
        self.names
            .range((prefix.to_owned(), JunctionId::MIN)..)
            .take_while(|(name, _)| name.starts_with(prefix))
            .map(|(_, id)| *id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

use std::collections::BTreeSet;

use serde::Serialize;

use super::{import_ident, Mapping};

/// All mappings of one link run, in discovery order.
#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct MappingSet {
    mappings: Vec<Mapping>,
}

impl MappingSet {
    pub fn new(mappings: Vec<Mapping>) -> Self {
        MappingSet { mappings }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mapping> {
        self.mappings.iter()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn as_slice(&self) -> &[Mapping] {
        &self.mappings
    }

    pub fn into_inner(self) -> Vec<Mapping> {
        self.mappings
    }

    /// `(identifier, path)` pairs of every Go import any mapping needs,
    /// sorted by path.
    pub fn imports(&self) -> Vec<(String, String)> {
        let paths: BTreeSet<&str> = self
            .mappings
            .iter()
            .flat_map(Mapping::go_import_paths)
            .collect();
        paths
            .into_iter()
            .map(|path| (import_ident(path), path.to_owned()))
            .collect()
    }

    /// Mappings grouped by Gno package, packages in first-seen order.
    pub fn by_package(&self) -> Vec<(&str, Vec<&Mapping>)> {
        let mut groups: Vec<(&str, Vec<&Mapping>)> = Vec::new();
        for mapping in &self.mappings {
            let package = mapping.gno_import_path.as_str();
            match groups.iter_mut().find(|(p, _)| *p == package) {
                Some((_, group)) => group.push(mapping),
                None => groups.push((package, vec![mapping])),
            }
        }
        groups
    }
}

impl From<Vec<Mapping>> for MappingSet {
    fn from(mappings: Vec<Mapping>) -> Self {
        MappingSet::new(mappings)
    }
}

impl<'a> IntoIterator for &'a MappingSet {
    type Item = &'a Mapping;
    type IntoIter = std::slice::Iter<'a, Mapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.mappings.iter()
    }
}

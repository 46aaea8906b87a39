use serde::Serialize;

use super::Equilibrium;

/// Equilibria sorted by support, without two equilibria on the same support.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EquilibriumStore {
    equilibria: Vec<Equilibrium>,
}

impl EquilibriumStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `eq` keeping the store sorted by support. Returns whether an equilibrium with the
    /// same support was already stored, in which case `eq` is dropped.
    pub fn insert(&mut self, eq: Equilibrium) -> bool {
        match self
            .equilibria
            .binary_search_by(|stored| stored.cmp_support(&eq))
        {
            Ok(_) => true,
            Err(i) => {
                self.equilibria.insert(i, eq);
                false
            }
        }
    }

    pub fn contains(&self, eq: &Equilibrium) -> bool {
        self.equilibria
            .binary_search_by(|stored| stored.cmp_support(eq))
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.equilibria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equilibria.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Equilibrium> {
        self.equilibria.iter()
    }
}

impl<'a> IntoIterator for &'a EquilibriumStore {
    type Item = &'a Equilibrium;
    type IntoIter = std::slice::Iter<'a, Equilibrium>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

use std::collections::HashSet;

/// A set of `(system_index, atom_index)` pairs restricting which atoms contribute.
///
/// A pair interaction is included if at least one of its two atoms is selected
/// in the system the pair belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomSelection {
    atoms: HashSet<(usize, usize)>,
}

impl AtomSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the given atoms of a single system.
    pub fn for_system(system: usize, atoms: impl IntoIterator<Item = usize>) -> Self {
        atoms.into_iter().map(|atom| (system, atom)).collect()
    }

    pub fn insert(&mut self, system: usize, atom: usize) -> bool {
        self.atoms.insert((system, atom))
    }

    #[inline]
    pub fn contains(&self, system: usize, atom: usize) -> bool {
        self.atoms.contains(&(system, atom))
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(usize, usize)> {
        self.atoms.iter()
    }

    /// Largest system index referenced by the selection, if any.
    pub fn max_system(&self) -> Option<usize> {
        self.atoms.iter().map(|&(system, _)| system).max()
    }
}

impl FromIterator<(usize, usize)> for AtomSelection {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Self {
            atoms: iter.into_iter().collect(),
        }
    }
}

impl Extend<(usize, usize)> for AtomSelection {
    fn extend<I: IntoIterator<Item = (usize, usize)>>(&mut self, iter: I) {
        self.atoms.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_system_tags_atoms_with_system_index() {
        let selection = AtomSelection::for_system(2, [0, 4]);
        assert!(selection.contains(2, 0));
        assert!(selection.contains(2, 4));
        assert!(!selection.contains(0, 0));
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn insert_reports_new_entries() {
        let mut selection = AtomSelection::new();
        assert!(selection.is_empty());
        assert!(selection.insert(0, 1));
        assert!(!selection.insert(0, 1));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn max_system_tracks_highest_index() {
        let mut selection = AtomSelection::for_system(1, [0]);
        selection.extend([(4, 2), (3, 7)]);
        assert_eq!(selection.max_system(), Some(4));
        assert_eq!(AtomSelection::new().max_system(), None);
    }
}

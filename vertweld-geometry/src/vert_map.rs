//! Mapping from original vertex indices to their final slots

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where every original vertex ended up after welding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertMap {
    lookup: Vec<usize>,
}

impl VertMap {
    /// Identity mapping over `vertex_count` vertices
    pub fn new(vertex_count: usize) -> Self {
        Self {
            lookup: (0..vertex_count).collect(),
        }
    }

    /// Compose one pass's slot remapping onto the current mapping.
    /// Slots missing from `remap` keep their position.
    pub fn apply_remapping(&mut self, remap: &HashMap<usize, usize>) {
        for target in &mut self.lookup {
            if let Some(&moved) = remap.get(target) {
                *target = moved;
            }
        }
    }

    /// Final index of original vertex `old_index`
    pub fn new_index(&self, old_index: usize) -> Option<usize> {
        self.lookup.get(old_index).copied()
    }

    /// Lowest original index that ended up at `new_index`
    pub fn first_old_index(&self, new_index: usize) -> Option<usize> {
        self.lookup.iter().position(|&i| i == new_index)
    }

    /// Number of original vertices covered
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.lookup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let map = VertMap::new(3);
        assert_eq!(map.as_slice(), &[0, 1, 2]);
        assert_eq!(map.new_index(3), None);
    }

    #[test]
    fn test_remappings_compose() {
        let mut map = VertMap::new(4);
        map.apply_remapping(&HashMap::from([(1, 0), (3, 1)]));
        assert_eq!(map.as_slice(), &[0, 0, 2, 1]);

        // second pass works on the compacted slots
        map.apply_remapping(&HashMap::from([(2, 1)]));
        assert_eq!(map.as_slice(), &[0, 0, 1, 1]);
    }

    #[test]
    fn test_first_old_index() {
        let mut map = VertMap::new(4);
        map.apply_remapping(&HashMap::from([(1, 0), (3, 1)]));
        assert_eq!(map.first_old_index(0), Some(0));
        assert_eq!(map.first_old_index(1), Some(3));
        assert_eq!(map.first_old_index(5), None);
    }
}

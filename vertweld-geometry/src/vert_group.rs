//! Vertex grouping and per-group match conditions

use crate::match_condition::MatchConditions;
use std::collections::HashMap;

/// Assigns vertices to groups and groups to match condition sets.
///
/// Vertices without an explicit group belong to [`VertGroupData::DEFAULT_GROUP`].
/// A group without registered conditions matches on position alone.
#[derive(Debug, Clone, Default)]
pub struct VertGroupData {
    vert_groups: Vec<i64>,
    group_conditions: HashMap<i64, MatchConditions>,
}

impl VertGroupData {
    pub const DEFAULT_GROUP: i64 = 0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Grouping that applies `conditions` to every vertex
    pub fn uniform(conditions: MatchConditions) -> Self {
        let mut data = Self::new();
        data.set_group_conditions(Self::DEFAULT_GROUP, conditions);
        data
    }

    /// Replace the group table; entry `i` is the group of vertex `i`
    pub fn set_vert_groups(&mut self, vert_groups: Vec<i64>) {
        self.vert_groups = vert_groups;
    }

    pub fn set_group_for_vertex(&mut self, vertex: usize, group: i64) {
        if vertex >= self.vert_groups.len() {
            self.vert_groups.resize(vertex + 1, Self::DEFAULT_GROUP);
        }
        self.vert_groups[vertex] = group;
    }

    pub fn group_for_vertex(&self, vertex: usize) -> i64 {
        self.vert_groups
            .get(vertex)
            .copied()
            .unwrap_or(Self::DEFAULT_GROUP)
    }

    pub fn set_group_conditions(&mut self, group: i64, conditions: MatchConditions) {
        self.group_conditions.insert(group, conditions);
    }

    pub fn group_conditions(&self, group: i64) -> MatchConditions {
        self.group_conditions
            .get(&group)
            .copied()
            .unwrap_or_else(MatchConditions::empty)
    }

    /// Whether any registered group matches on every flag in `conditions`
    pub fn uses_conditions(&self, conditions: MatchConditions) -> bool {
        self.group_conditions
            .values()
            .any(|group| group.contains(conditions))
    }
}

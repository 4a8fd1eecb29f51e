//! Conditions deciding whether two coincident vertices are duplicates

use bitflags::bitflags;

/// A single attribute that must match, in addition to position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchCondition {
    /// Vertices must have identical normals.
    Normal,
    /// Vertices must have identical texture coords on all channels.
    UVs,
    /// Vertices must have identical vertex coloring.
    Color,
    /// Vertices must be in the same group.
    Group,
}

bitflags! {
    /// A set of [`MatchCondition`]s.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MatchConditions: u8 {
        const NORMAL = 1 << 0;
        const UVS = 1 << 1;
        const COLOR = 1 << 2;
        const GROUP = 1 << 3;
    }
}

impl Default for MatchConditions {
    fn default() -> Self {
        Self::empty()
    }
}

impl MatchConditions {
    pub fn contains_condition(&self, condition: MatchCondition) -> bool {
        self.contains(condition.into())
    }
}

impl From<MatchCondition> for MatchConditions {
    fn from(condition: MatchCondition) -> Self {
        match condition {
            MatchCondition::Normal => MatchConditions::NORMAL,
            MatchCondition::UVs => MatchConditions::UVS,
            MatchCondition::Color => MatchConditions::COLOR,
            MatchCondition::Group => MatchConditions::GROUP,
        }
    }
}

impl FromIterator<MatchCondition> for MatchConditions {
    fn from_iter<I: IntoIterator<Item = MatchCondition>>(iter: I) -> Self {
        iter.into_iter()
            .fold(MatchConditions::empty(), |set, c| set | MatchConditions::from(c))
    }
}

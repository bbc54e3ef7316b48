//! Scene node identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node inside its owning `SceneGraph`.
///
/// Ids are only meaningful for the graph that issued them and are
/// invalidated when that scene is unloaded.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips() {
        let id = NodeId::from_index(7);
        assert_eq!(id.index(), 7);
        assert_eq!(format!("{:?}", id), "NodeId(7)");
    }
}

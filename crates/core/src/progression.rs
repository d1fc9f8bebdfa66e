use serde::Serialize;
use thiserror::Error;

use crate::model::{CurriculumId, CurriculumNode};
use crate::score::percentage;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CurriculumError {
    #[error("a curriculum needs at least one node")]
    Empty,

    #[error("node index {index} is out of range for {len} nodes")]
    OutOfRange { index: usize, len: usize },

    #[error("node {index} is locked")]
    Locked { index: usize },
}

/// Derived accessibility of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    Locked,
    Active,
    Completed,
}

/// Index of the first node reported completed while its predecessor is not.
#[must_use]
pub fn first_gap(nodes: &[CurriculumNode]) -> Option<usize> {
    nodes
        .windows(2)
        .position(|pair| !pair[0].is_completed() && pair[1].is_completed())
        .map(|i| i + 1)
}

/// Ordered lesson nodes whose lock state derives from predecessor completion.
///
/// Node 0 is always unlocked. Node `i > 0` is unlocked iff node `i - 1` is completed.
/// A gap in the input (node `i` completed, `i - 1` not) is kept as-is and simply
/// stalls progression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurriculumPath {
    id: CurriculumId,
    nodes: Vec<CurriculumNode>,
}

impl CurriculumPath {
    /// # Errors
    ///
    /// Returns `CurriculumError::Empty` for an empty node list.
    pub fn build(id: CurriculumId, nodes: Vec<CurriculumNode>) -> Result<Self, CurriculumError> {
        if nodes.is_empty() {
            return Err(CurriculumError::Empty);
        }
        Ok(Self { id, nodes })
    }

    #[must_use]
    pub fn id(&self) -> CurriculumId {
        self.id
    }

    #[must_use]
    pub fn nodes(&self) -> &[CurriculumNode] {
        &self.nodes
    }

    #[must_use]
    pub fn node(&self, index: usize) -> Option<&CurriculumNode> {
        self.nodes.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn is_unlocked(&self, index: usize) -> bool {
        match index {
            _ if index >= self.nodes.len() => false,
            0 => true,
            i => self.nodes[i - 1].is_completed(),
        }
    }

    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.is_unlocked(index) && !self.nodes[index].is_completed()
    }

    #[must_use]
    pub fn state(&self, index: usize) -> Option<NodeState> {
        let node = self.nodes.get(index)?;
        Some(if node.is_completed() {
            NodeState::Completed
        } else if self.is_unlocked(index) {
            NodeState::Active
        } else {
            NodeState::Locked
        })
    }

    #[must_use]
    pub fn states(&self) -> Vec<NodeState> {
        (0..self.nodes.len()).filter_map(|i| self.state(i)).collect()
    }

    /// Mark the node completed. Returns `false` if it already was.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError::OutOfRange` for a bad index and
    /// `CurriculumError::Locked` when the predecessor is not completed yet.
    pub fn mark_completed(&mut self, index: usize) -> Result<bool, CurriculumError> {
        let len = self.nodes.len();
        if index >= len {
            return Err(CurriculumError::OutOfRange { index, len });
        }
        if self.nodes[index].is_completed() {
            return Ok(false);
        }
        if !self.is_unlocked(index) {
            return Err(CurriculumError::Locked { index });
        }
        self.nodes[index].set_completed();
        Ok(true)
    }

    /// Lowest active index, or `None` when finished or stalled by a gap.
    #[must_use]
    pub fn next_actionable_index(&self) -> Option<usize> {
        (0..self.nodes.len()).find(|&i| self.is_active(i))
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_completed()).count()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.nodes.iter().all(CurriculumNode::is_completed)
    }

    /// Share of completed nodes, rounded like quiz percentages.
    #[must_use]
    pub fn completion_percentage(&self) -> u8 {
        let done = u32::try_from(self.completed_count()).unwrap_or(u32::MAX);
        let total = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
        percentage(done, total)
    }
}

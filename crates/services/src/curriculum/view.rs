use pathway_core::model::{Difficulty, NodeId};
use pathway_core::{CurriculumPath, NodeState};

/// One row of the curriculum path screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNodeView {
    pub index: usize,
    pub node_id: NodeId,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub key_topics: Vec<String>,
    pub state: NodeState,
    pub is_next: bool,
}

impl PathNodeView {
    #[must_use]
    pub fn list(path: &CurriculumPath) -> Vec<Self> {
        let next = path.next_actionable_index();
        path.nodes()
            .iter()
            .zip(path.states())
            .enumerate()
            .map(|(index, (node, state))| Self {
                index,
                node_id: node.id(),
                title: node.title().to_owned(),
                description: node.description().to_owned(),
                difficulty: node.difficulty(),
                key_topics: node.key_topics().to_vec(),
                state,
                is_next: next == Some(index),
            })
            .collect()
    }
}

/// Header numbers for the curriculum path screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSummary {
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
    pub next: Option<usize>,
    pub is_finished: bool,
}

impl PathSummary {
    #[must_use]
    pub fn from_path(path: &CurriculumPath) -> Self {
        Self {
            completed: path.completed_count(),
            total: path.len(),
            percentage: path.completion_percentage(),
            next: path.next_actionable_index(),
            is_finished: path.is_finished(),
        }
    }
}

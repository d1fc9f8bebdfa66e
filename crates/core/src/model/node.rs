use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::NodeId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NodeError {
    #[error("curriculum node title cannot be empty")]
    EmptyTitle,

    #[error("unknown difficulty label: {0:?}")]
    UnknownDifficulty(String),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty label attached to a curriculum node.
///
/// Serialized lowercase; deserialized through [`FromStr`], so any casing loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(NodeError::UnknownDifficulty(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = NodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

//
// ─── NODE ──────────────────────────────────────────────────────────────────────
//

/// Unvalidated curriculum node as delivered by a content source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDraft {
    pub id: NodeId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub key_topics: Vec<String>,
    #[serde(default)]
    pub completed: bool,
}

impl NodeDraft {
    /// # Errors
    ///
    /// Returns `NodeError::EmptyTitle` if the title is blank.
    pub fn validate(self) -> Result<CurriculumNode, NodeError> {
        if self.title.trim().is_empty() {
            return Err(NodeError::EmptyTitle);
        }
        Ok(CurriculumNode {
            id: self.id,
            title: self.title,
            description: self.description,
            difficulty: self.difficulty,
            key_topics: self.key_topics,
            completed: self.completed,
        })
    }
}

/// One lesson-sized unit in a curriculum path.
///
/// `completed` mirrors externally reported state; lock state is never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurriculumNode {
    id: NodeId,
    title: String,
    description: String,
    difficulty: Difficulty,
    key_topics: Vec<String>,
    completed: bool,
}

impl CurriculumNode {
    /// # Errors
    ///
    /// Returns `NodeError::EmptyTitle` if the title is blank.
    pub fn new(
        id: NodeId,
        title: impl Into<String>,
        description: impl Into<String>,
        difficulty: Difficulty,
        key_topics: Vec<String>,
    ) -> Result<Self, NodeError> {
        NodeDraft {
            id,
            title: title.into(),
            description: description.into(),
            difficulty,
            key_topics,
            completed: false,
        }
        .validate()
    }

    /// Returns the node with its completion flag set as reported upstream.
    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn key_topics(&self) -> &[String] {
        &self.key_topics
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn set_completed(&mut self) {
        self.completed = true;
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Advanced".parse::<Difficulty>().unwrap(), Difficulty::Advanced);
        assert_eq!(" beginner ".parse::<Difficulty>().unwrap(), Difficulty::Beginner);
        assert!(matches!(
            "expert".parse::<Difficulty>().unwrap_err(),
            NodeError::UnknownDifficulty(_)
        ));
    }

    #[test]
    fn difficulty_json_accepts_any_casing() {
        let draft: NodeDraft =
            serde_json::from_str(r#"{"id":1,"title":"Cells","difficulty":"Beginner"}"#).unwrap();
        assert_eq!(draft.difficulty, Difficulty::Beginner);

        let draft: NodeDraft =
            serde_json::from_str(r#"{"id":2,"title":"Genes","difficulty":"ADVANCED"}"#).unwrap();
        assert_eq!(draft.difficulty, Difficulty::Advanced);
        assert_eq!(
            serde_json::to_string(&draft.difficulty).unwrap(),
            r#""advanced""#
        );

        assert!(
            serde_json::from_str::<NodeDraft>(r#"{"id":3,"title":"X","difficulty":"expert"}"#)
                .is_err()
        );
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = CurriculumNode::new(NodeId::new(1), " ", "", Difficulty::Beginner, vec![])
            .unwrap_err();
        assert_eq!(err, NodeError::EmptyTitle);
    }

    #[test]
    fn new_nodes_start_incomplete() {
        let node = CurriculumNode::new(
            NodeId::new(1),
            "Intro",
            "Basics",
            Difficulty::Beginner,
            vec!["history".into()],
        )
        .unwrap();
        assert!(!node.is_completed());
        assert!(node.with_completed(true).is_completed());
    }
}

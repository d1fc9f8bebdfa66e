//! JSON content packs that stand in for the generation backend.

use pathway_core::model::{
    CurriculumId, CurriculumNode, FieldId, Lesson, LessonId, NodeDraft, Question, QuestionDraft,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::memory::InMemoryContent;
use crate::provider::{ContentError, CurriculumRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonFixture {
    pub id: LessonId,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub questions: Vec<QuestionDraft>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumFixture {
    pub id: CurriculumId,
    pub field_id: FieldId,
    pub nodes: Vec<NodeDraft>,
}

/// A self-contained set of lessons and curricula.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPack {
    #[serde(default)]
    pub lessons: Vec<LessonFixture>,
    #[serde(default)]
    pub curricula: Vec<CurriculumFixture>,
}

impl ContentPack {
    /// # Errors
    ///
    /// Returns `ContentError::Parse` if the document is not a valid pack.
    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// # Errors
    ///
    /// Returns `ContentError::Io` or `ContentError::Parse`.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        debug!(path = %path.display(), "reading content pack");
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Validate every draft and load the pack into an in-memory backend.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Invalid` naming the first draft that fails validation.
    pub fn into_memory(self) -> Result<InMemoryContent, ContentError> {
        let repo = InMemoryContent::new();
        let lesson_count = self.lessons.len();
        let curriculum_count = self.curricula.len();

        for fixture in self.lessons {
            let questions = fixture
                .questions
                .into_iter()
                .map(|draft| {
                    let question_id = draft.id;
                    draft.validate().map_err(|err| ContentError::Invalid {
                        location: format!("lesson {} question {question_id}", fixture.id),
                        source: err.into(),
                    })
                })
                .collect::<Result<Vec<Question>, _>>()?;
            repo.insert_lesson(
                Lesson::new(fixture.id, fixture.title, fixture.body),
                questions,
            )?;
        }

        for fixture in self.curricula {
            let nodes = fixture
                .nodes
                .into_iter()
                .map(|draft| {
                    let node_id = draft.id;
                    draft.validate().map_err(|err| ContentError::Invalid {
                        location: format!("curriculum {} node {node_id}", fixture.id),
                        source: err.into(),
                    })
                })
                .collect::<Result<Vec<CurriculumNode>, _>>()?;
            repo.insert_curriculum(CurriculumRecord {
                id: fixture.id,
                field_id: fixture.field_id,
                nodes,
            })?;
        }

        info!(lessons = lesson_count, curricula = curriculum_count, "content pack loaded");
        Ok(repo)
    }
}

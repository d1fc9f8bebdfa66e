use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pathway_core::ScoreResult;
use pathway_core::model::{CurriculumId, CurriculumNode, FieldId, Lesson, LessonId, Question};
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by content backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
    #[error("not found")]
    NotFound,

    #[error("content backend unavailable: {0}")]
    Unavailable(String),

    #[error("invalid content at {location}: {source}")]
    Invalid {
        location: String,
        #[source]
        source: pathway_core::Error,
    },

    #[error("content pack could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("content pack is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Curriculum as delivered by the backend, before lock states are derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurriculumRecord {
    pub id: CurriculumId,
    pub field_id: FieldId,
    pub nodes: Vec<CurriculumNode>,
}

/// Source of already-formed lesson, quiz and curriculum content.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Ordered questions for a lesson. An empty list means no quiz is available.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::NotFound` for an unknown lesson, or other backend errors.
    async fn get_questions(&self, lesson_id: LessonId) -> Result<Vec<Question>, ContentError>;

    /// Curriculum for a field, or `None` when none has been generated yet.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` on backend failures.
    async fn get_curriculum(
        &self,
        field_id: FieldId,
    ) -> Result<Option<CurriculumRecord>, ContentError>;

    /// # Errors
    ///
    /// Returns `ContentError::NotFound` for an unknown lesson, or other backend errors.
    async fn get_lesson(&self, lesson_id: LessonId) -> Result<Lesson, ContentError>;
}

/// Receiver of score and completion events.
///
/// Callers treat reports as fire-and-forget: local state is already consistent
/// before a report is sent, and a failed report never rolls it back.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// # Errors
    ///
    /// Returns `ContentError` if the report could not be delivered.
    async fn report_quiz_result(
        &self,
        lesson_id: LessonId,
        result: &ScoreResult,
        completed_at: DateTime<Utc>,
    ) -> Result<(), ContentError>;

    /// # Errors
    ///
    /// Returns `ContentError` if the report could not be delivered.
    async fn report_node_completion(
        &self,
        curriculum_id: CurriculumId,
        node_index: usize,
        completed_at: DateTime<Utc>,
    ) -> Result<(), ContentError>;
}

/// Aggregates the provider and sink behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Backend {
    pub content: Arc<dyn ContentProvider>,
    pub progress: Arc<dyn ProgressSink>,
}

impl Backend {
    #[must_use]
    pub fn in_memory(repo: crate::memory::InMemoryContent) -> Self {
        let content: Arc<dyn ContentProvider> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressSink> = Arc::new(repo);
        Self { content, progress }
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pathway_core::ScoreResult;
use pathway_core::model::{CurriculumId, FieldId, Lesson, LessonId, Question};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use crate::provider::{ContentError, ContentProvider, CurriculumRecord, ProgressSink};

/// Quiz result as received by the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizReport {
    pub lesson_id: LessonId,
    pub correct: u32,
    pub total: u32,
    pub percentage: u8,
    pub completed_at: DateTime<Utc>,
}

/// Node completion as received by the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeCompletionReport {
    pub curriculum_id: CurriculumId,
    pub node_index: usize,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct LessonEntry {
    lesson: Lesson,
    questions: Vec<Question>,
}

#[derive(Debug, Default)]
struct State {
    lessons: HashMap<LessonId, LessonEntry>,
    curricula: HashMap<FieldId, CurriculumRecord>,
    quiz_reports: Vec<QuizReport>,
    node_reports: Vec<NodeCompletionReport>,
}

/// In-memory content backend for tests, fixtures and the terminal app.
///
/// Acts as both provider and sink. Node completion reports are applied to the
/// stored curriculum so a later fetch reflects them, like the real backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContent {
    state: Arc<Mutex<State>>,
}

impl InMemoryContent {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, ContentError> {
        self.state
            .lock()
            .map_err(|e| ContentError::Unavailable(e.to_string()))
    }

    /// Register a lesson and its quiz questions, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Unavailable` if the store is poisoned.
    pub fn insert_lesson(&self, lesson: Lesson, questions: Vec<Question>) -> Result<(), ContentError> {
        let mut guard = self.lock()?;
        guard
            .lessons
            .insert(lesson.id, LessonEntry { lesson, questions });
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ContentError::Unavailable` if the store is poisoned.
    pub fn insert_curriculum(&self, record: CurriculumRecord) -> Result<(), ContentError> {
        let mut guard = self.lock()?;
        guard.curricula.insert(record.field_id, record);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ContentError::Unavailable` if the store is poisoned.
    pub fn quiz_reports(&self) -> Result<Vec<QuizReport>, ContentError> {
        Ok(self.lock()?.quiz_reports.clone())
    }

    /// # Errors
    ///
    /// Returns `ContentError::Unavailable` if the store is poisoned.
    pub fn node_reports(&self) -> Result<Vec<NodeCompletionReport>, ContentError> {
        Ok(self.lock()?.node_reports.clone())
    }
}

#[async_trait]
impl ContentProvider for InMemoryContent {
    async fn get_questions(&self, lesson_id: LessonId) -> Result<Vec<Question>, ContentError> {
        let guard = self.lock()?;
        guard
            .lessons
            .get(&lesson_id)
            .map(|entry| entry.questions.clone())
            .ok_or(ContentError::NotFound)
    }

    async fn get_curriculum(
        &self,
        field_id: FieldId,
    ) -> Result<Option<CurriculumRecord>, ContentError> {
        let guard = self.lock()?;
        Ok(guard.curricula.get(&field_id).cloned())
    }

    async fn get_lesson(&self, lesson_id: LessonId) -> Result<Lesson, ContentError> {
        let guard = self.lock()?;
        guard
            .lessons
            .get(&lesson_id)
            .map(|entry| entry.lesson.clone())
            .ok_or(ContentError::NotFound)
    }
}

#[async_trait]
impl ProgressSink for InMemoryContent {
    async fn report_quiz_result(
        &self,
        lesson_id: LessonId,
        result: &ScoreResult,
        completed_at: DateTime<Utc>,
    ) -> Result<(), ContentError> {
        let mut guard = self.lock()?;
        guard.quiz_reports.push(QuizReport {
            lesson_id,
            correct: result.correct(),
            total: result.total(),
            percentage: result.percentage(),
            completed_at,
        });
        debug!(%lesson_id, percentage = result.percentage(), "quiz result stored");
        Ok(())
    }

    async fn report_node_completion(
        &self,
        curriculum_id: CurriculumId,
        node_index: usize,
        completed_at: DateTime<Utc>,
    ) -> Result<(), ContentError> {
        let mut guard = self.lock()?;
        let record = guard
            .curricula
            .values_mut()
            .find(|record| record.id == curriculum_id)
            .ok_or(ContentError::NotFound)?;
        let node = record
            .nodes
            .get_mut(node_index)
            .ok_or(ContentError::NotFound)?;
        *node = node.clone().with_completed(true);

        guard.node_reports.push(NodeCompletionReport {
            curriculum_id,
            node_index,
            completed_at,
        });
        debug!(%curriculum_id, node_index, "node completion stored");
        Ok(())
    }
}

use std::sync::Arc;
use tracing::debug;

use content::{ContentError, ContentProvider};
use pathway_core::lesson_text::{LessonLine, render_lesson};
use pathway_core::model::LessonId;

/// Lesson body split into display lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLesson {
    pub id: LessonId,
    pub title: String,
    pub lines: Vec<LessonLine>,
}

/// Fetches lesson bodies and formats them for display.
#[derive(Clone)]
pub struct LessonService {
    content: Arc<dyn ContentProvider>,
}

impl LessonService {
    #[must_use]
    pub fn new(content: Arc<dyn ContentProvider>) -> Self {
        Self { content }
    }

    /// # Errors
    ///
    /// Returns `ContentError` when the lesson cannot be fetched.
    pub async fn load(&self, lesson_id: LessonId) -> Result<RenderedLesson, ContentError> {
        let lesson = self.content.get_lesson(lesson_id).await?;
        let lines = render_lesson(&lesson.body);
        debug!(%lesson_id, lines = lines.len(), "lesson rendered");
        Ok(RenderedLesson {
            id: lesson.id,
            title: lesson.title,
            lines,
        })
    }
}

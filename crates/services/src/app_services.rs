use std::sync::Arc;

use content::{Backend, ContentPack};
use pathway_core::Clock;

use crate::curriculum::CurriculumService;
use crate::lesson_service::LessonService;
use crate::quiz::QuizService;

/// Assembles the screen-facing services over one backend.
#[derive(Clone)]
pub struct AppServices {
    quiz: Arc<QuizService>,
    curriculum: Arc<CurriculumService>,
    lessons: Arc<LessonService>,
}

impl AppServices {
    #[must_use]
    pub fn new(clock: Clock, backend: &Backend, shuffle_questions: bool) -> Self {
        let quiz = QuizService::from_backend(clock, backend).with_shuffle_questions(shuffle_questions);
        Self {
            quiz: Arc::new(quiz),
            curriculum: Arc::new(CurriculumService::from_backend(clock, backend)),
            lessons: Arc::new(LessonService::new(Arc::clone(&backend.content))),
        }
    }

    /// Build services over an in-memory backend seeded from a content pack.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Invalid` if the pack contains invalid drafts.
    pub fn from_pack(
        clock: Clock,
        pack: ContentPack,
        shuffle_questions: bool,
    ) -> Result<Self, content::ContentError> {
        let backend = Backend::in_memory(pack.into_memory()?);
        Ok(Self::new(clock, &backend, shuffle_questions))
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn curriculum(&self) -> Arc<CurriculumService> {
        Arc::clone(&self.curriculum)
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<LessonService> {
        Arc::clone(&self.lessons)
    }
}

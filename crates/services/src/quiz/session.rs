use chrono::{DateTime, Utc};
use pathway_core::model::{LessonId, Question};
use pathway_core::{QuizEngine, QuizProgress, ScoreResult};

use crate::error::QuizServiceError;

/// Delivery state of a report handed to the progress sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStatus {
    NotSent,
    Delivered,
    Failed { reason: String },
}

impl ReportStatus {
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        matches!(self, ReportStatus::Delivered)
    }
}

/// One quiz screen's worth of state: the engine plus report bookkeeping.
///
/// Navigation that never touches the sink is exposed here directly; `next()`
/// goes through [`crate::QuizService::advance`] so the final score is reported.
#[derive(Debug)]
pub struct QuizSession {
    pub(crate) lesson_id: LessonId,
    pub(crate) engine: QuizEngine,
    pub(crate) started_at: DateTime<Utc>,
    pub(crate) completed_at: Option<DateTime<Utc>>,
    pub(crate) report: ReportStatus,
}

impl QuizSession {
    pub(crate) fn new(lesson_id: LessonId, engine: QuizEngine, started_at: DateTime<Utc>) -> Self {
        Self {
            lesson_id,
            engine,
            started_at,
            completed_at: None,
            report: ReportStatus::NotSent,
        }
    }

    #[must_use]
    pub fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    #[must_use]
    pub fn engine(&self) -> &QuizEngine {
        &self.engine
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn report_status(&self) -> &ReportStatus {
        &self.report
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        self.engine.current_question()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        self.engine.progress()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.engine.is_terminal()
    }

    /// # Errors
    ///
    /// See [`QuizEngine::select_answer`].
    pub fn select_answer(&mut self, answer: &str) -> Result<(), QuizServiceError> {
        Ok(self.engine.select_answer(answer)?)
    }

    /// # Errors
    ///
    /// See [`QuizEngine::previous`].
    pub fn previous(&mut self) -> Result<usize, QuizServiceError> {
        Ok(self.engine.previous()?)
    }

    /// # Errors
    ///
    /// Returns `QuizError::NotFinished` before the last question is submitted.
    pub fn score(&self) -> Result<&ScoreResult, QuizServiceError> {
        Ok(self.engine.score()?)
    }

    /// # Errors
    ///
    /// Returns `QuizError::NotFinished` before the last question is submitted.
    pub fn set_review_mode(&mut self, on: bool) -> Result<(), QuizServiceError> {
        Ok(self.engine.set_review_mode(on)?)
    }
}

use rand::rng;
use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::{debug, info, warn};

use content::{Backend, ContentProvider, ProgressSink};
use pathway_core::model::LessonId;
use pathway_core::{Clock, QuizEngine, QuizStep};

use super::session::{QuizSession, ReportStatus};
use crate::error::QuizServiceError;

/// Outcome of loading a quiz for a lesson.
#[derive(Debug)]
pub enum QuizLoad {
    Ready(QuizSession),
    /// The lesson has no questions; the screen shows an empty state instead.
    Unavailable,
}

/// Orchestrates quiz start, submission and score reporting.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    content: Arc<dyn ContentProvider>,
    progress: Arc<dyn ProgressSink>,
    shuffle_questions: bool,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        content: Arc<dyn ContentProvider>,
        progress: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            clock,
            content,
            progress,
            shuffle_questions: false,
        }
    }

    #[must_use]
    pub fn from_backend(clock: Clock, backend: &Backend) -> Self {
        Self::new(
            clock,
            Arc::clone(&backend.content),
            Arc::clone(&backend.progress),
        )
    }

    #[must_use]
    pub fn with_shuffle_questions(mut self, shuffle_questions: bool) -> Self {
        self.shuffle_questions = shuffle_questions;
        self
    }

    /// Fetch the lesson's questions and start an attempt.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Content` when the fetch fails; the screen
    /// offers a retry in that case.
    pub async fn load(&self, lesson_id: LessonId) -> Result<QuizLoad, QuizServiceError> {
        let mut questions = self.content.get_questions(lesson_id).await?;
        if questions.is_empty() {
            info!(%lesson_id, "lesson has no quiz");
            return Ok(QuizLoad::Unavailable);
        }
        if self.shuffle_questions {
            questions.shuffle(&mut rng());
        }

        debug!(%lesson_id, questions = questions.len(), "quiz started");
        let engine = QuizEngine::start(questions)?;
        Ok(QuizLoad::Ready(QuizSession::new(
            lesson_id,
            engine,
            self.clock.now(),
        )))
    }

    /// Submit the current question. Finishing the quiz reports the score.
    ///
    /// A failed report is logged and recorded on the session; the score itself
    /// stays valid. Use [`Self::finalize_report`] to try again.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` when the engine rejects the step.
    pub async fn advance(&self, session: &mut QuizSession) -> Result<QuizStep, QuizServiceError> {
        let step = session.engine.next()?;
        match step {
            QuizStep::Question(index) => {
                debug!(lesson_id = %session.lesson_id, index, "advanced");
            }
            QuizStep::Finished => {
                session.completed_at = Some(self.clock.now());
                if let Err(err) = self.deliver(session).await {
                    warn!(lesson_id = %session.lesson_id, error = %err, "quiz result not reported");
                }
            }
        }
        Ok(step)
    }

    /// Retry reporting the score of a finished quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotFinished` for an unfinished quiz, or
    /// `QuizServiceError::Content` if the sink rejects the report again.
    pub async fn finalize_report(&self, session: &mut QuizSession) -> Result<(), QuizServiceError> {
        if session.report.is_delivered() {
            return Ok(());
        }
        self.deliver(session).await
    }

    /// Start a fresh attempt over the same questions.
    pub fn retry(&self, session: &mut QuizSession) {
        session.engine.retry();
        session.started_at = self.clock.now();
        session.completed_at = None;
        session.report = ReportStatus::NotSent;
        debug!(lesson_id = %session.lesson_id, "quiz restarted");
    }

    async fn deliver(&self, session: &mut QuizSession) -> Result<(), QuizServiceError> {
        let completed_at = session.completed_at.unwrap_or_else(|| self.clock.now());
        let result = session.engine.score()?;
        let percentage = result.percentage();

        let outcome = self
            .progress
            .report_quiz_result(session.lesson_id, result, completed_at)
            .await;

        match outcome {
            Ok(()) => {
                info!(lesson_id = %session.lesson_id, percentage, "quiz result reported");
                session.report = ReportStatus::Delivered;
                Ok(())
            }
            Err(err) => {
                session.report = ReportStatus::Failed {
                    reason: err.to_string(),
                };
                Err(err.into())
            }
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use content::InMemoryContent;
    use pathway_core::model::{Lesson, Question, QuestionId};
    use pathway_core::time::fixed_now;
    use pathway_core::QuizError;

    fn questions(n: u64) -> Vec<Question> {
        (1..=n)
            .map(|id| {
                Question::new(
                    QuestionId::new(id),
                    format!("Q{id}"),
                    vec!["right".into(), "wrong".into()],
                    "right",
                    "",
                )
                .unwrap()
            })
            .collect()
    }

    fn service(repo: &InMemoryContent) -> QuizService {
        QuizService::from_backend(Clock::fixed(fixed_now()), &Backend::in_memory(repo.clone()))
    }

    #[tokio::test]
    async fn empty_lesson_is_unavailable() {
        let repo = InMemoryContent::new();
        repo.insert_lesson(Lesson::new(LessonId::new(1), "Empty", ""), Vec::new())
            .unwrap();
        let load = service(&repo).load(LessonId::new(1)).await.unwrap();
        assert!(matches!(load, QuizLoad::Unavailable));
    }

    #[tokio::test]
    async fn advance_without_answer_is_rejected() {
        let repo = InMemoryContent::new();
        repo.insert_lesson(Lesson::new(LessonId::new(1), "L", ""), questions(2))
            .unwrap();
        let svc = service(&repo);
        let QuizLoad::Ready(mut session) = svc.load(LessonId::new(1)).await.unwrap() else {
            panic!("quiz should load");
        };

        let err = svc.advance(&mut session).await.unwrap_err();
        assert!(matches!(
            err,
            QuizServiceError::Quiz(QuizError::Unanswered { index: 0 })
        ));
        assert_eq!(session.progress().current, 0);
    }

    #[tokio::test]
    async fn finishing_reports_once() {
        let repo = InMemoryContent::new();
        repo.insert_lesson(Lesson::new(LessonId::new(1), "L", ""), questions(2))
            .unwrap();
        let svc = service(&repo);
        let QuizLoad::Ready(mut session) = svc.load(LessonId::new(1)).await.unwrap() else {
            panic!("quiz should load");
        };

        session.select_answer("right").unwrap();
        assert_eq!(svc.advance(&mut session).await.unwrap(), QuizStep::Question(1));
        session.select_answer("wrong").unwrap();
        assert_eq!(svc.advance(&mut session).await.unwrap(), QuizStep::Finished);

        assert_eq!(session.report_status(), &ReportStatus::Delivered);
        assert_eq!(session.completed_at(), Some(fixed_now()));
        svc.finalize_report(&mut session).await.unwrap();

        let reports = repo.quiz_reports().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].percentage, 50);
    }

    #[tokio::test]
    async fn shuffled_quiz_keeps_every_question() {
        let repo = InMemoryContent::new();
        repo.insert_lesson(Lesson::new(LessonId::new(1), "L", ""), questions(6))
            .unwrap();
        let svc = service(&repo).with_shuffle_questions(true);
        let QuizLoad::Ready(session) = svc.load(LessonId::new(1)).await.unwrap() else {
            panic!("quiz should load");
        };

        let mut ids: Vec<u64> = session
            .engine()
            .questions()
            .iter()
            .map(|q| q.id().value())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn retry_resets_report_state() {
        let repo = InMemoryContent::new();
        repo.insert_lesson(Lesson::new(LessonId::new(1), "L", ""), questions(1))
            .unwrap();
        let svc = service(&repo);
        let QuizLoad::Ready(mut session) = svc.load(LessonId::new(1)).await.unwrap() else {
            panic!("quiz should load");
        };
        session.select_answer("right").unwrap();
        svc.advance(&mut session).await.unwrap();

        svc.retry(&mut session);
        assert!(!session.is_finished());
        assert_eq!(session.report_status(), &ReportStatus::NotSent);
        assert_eq!(session.completed_at(), None);
        assert_eq!(session.engine().current_answer(), None);
    }
}

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::model::Question;
use crate::score::ScoreResult;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Rejected quiz operations. The engine state is unchanged whenever one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("a quiz needs at least one question")]
    NoQuestions,

    #[error("quiz is already finished")]
    Finished,

    #[error("quiz is not finished yet")]
    NotFinished,

    #[error("question {index} has no answer selected")]
    Unanswered { index: usize },

    #[error("{answer:?} is not a candidate answer for question {index}")]
    UnknownAnswer { index: usize, answer: String },

    #[error("already at the first question")]
    AtFirstQuestion,
}

//
// ─── STEP / PROGRESS ───────────────────────────────────────────────────────────
//

/// Where the attempt stands after a successful `next()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    /// Moved on to the question at this index.
    Question(usize),
    /// The last question was submitted and the score is fixed.
    Finished,
}

/// Aggregated view of attempt progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub current: usize,
    pub total: usize,
    pub answered: usize,
    pub can_advance: bool,
    pub is_last: bool,
    pub is_finished: bool,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// In-memory attempt over a fixed, ordered question list.
///
/// Navigation is gated on the current question having an answer. Submitting the
/// last question freezes the position and captures a [`ScoreResult`] snapshot.
#[derive(Clone)]
pub struct QuizEngine {
    questions: Vec<Question>,
    answers: BTreeMap<usize, String>,
    current: usize,
    result: Option<ScoreResult>,
    reviewing: bool,
}

impl QuizEngine {
    /// Begin a fresh attempt.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` for an empty list. Callers are expected to
    /// show an empty state instead of starting a quiz.
    pub fn start(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        Ok(Self {
            questions,
            answers: BTreeMap::new(),
            current: 0,
            result: None,
            reviewing: false,
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    /// Answer recorded for `index`, if any.
    #[must_use]
    pub fn selected_answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<&str> {
        self.selected_answer(self.current)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.result.is_some()
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    /// True when `next()` would succeed.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        !self.is_terminal() && self.answers.contains_key(&self.current)
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            current: self.current,
            total: self.questions.len(),
            answered: self.answered_count(),
            can_advance: self.can_advance(),
            is_last: self.is_last_question(),
            is_finished: self.is_terminal(),
        }
    }

    /// Record `answer` for the current question, replacing any earlier choice.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Finished` once terminal and `QuizError::UnknownAnswer`
    /// if `answer` is not one of the current question's options.
    pub fn select_answer(&mut self, answer: &str) -> Result<(), QuizError> {
        if self.is_terminal() {
            return Err(QuizError::Finished);
        }
        if !self.current_question().has_option(answer) {
            return Err(QuizError::UnknownAnswer {
                index: self.current,
                answer: answer.to_owned(),
            });
        }
        self.answers.insert(self.current, answer.to_owned());
        Ok(())
    }

    /// Advance to the next question, or finish on the last one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Finished` once terminal and `QuizError::Unanswered` if
    /// the current question has no recorded answer.
    pub fn next(&mut self) -> Result<QuizStep, QuizError> {
        if self.is_terminal() {
            return Err(QuizError::Finished);
        }
        if !self.answers.contains_key(&self.current) {
            return Err(QuizError::Unanswered {
                index: self.current,
            });
        }

        if self.is_last_question() {
            self.result = Some(ScoreResult::compute(&self.questions, &self.answers));
            return Ok(QuizStep::Finished);
        }

        self.current += 1;
        Ok(QuizStep::Question(self.current))
    }

    /// Step back one question. The answer of the question being left is kept.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Finished` once terminal and
    /// `QuizError::AtFirstQuestion` at index 0.
    pub fn previous(&mut self) -> Result<usize, QuizError> {
        if self.is_terminal() {
            return Err(QuizError::Finished);
        }
        if self.current == 0 {
            return Err(QuizError::AtFirstQuestion);
        }
        self.current -= 1;
        Ok(self.current)
    }

    /// The score captured at the terminal transition.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotFinished` before the last question is submitted.
    pub fn score(&self) -> Result<&ScoreResult, QuizError> {
        self.result.as_ref().ok_or(QuizError::NotFinished)
    }

    /// Start over with the same questions.
    pub fn retry(&mut self) {
        self.answers.clear();
        self.current = 0;
        self.result = None;
        self.reviewing = false;
    }

    #[must_use]
    pub fn is_reviewing(&self) -> bool {
        self.reviewing
    }

    /// Toggle the answer review on the results screen. Never touches the score.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotFinished` before the attempt is terminal.
    pub fn set_review_mode(&mut self, on: bool) -> Result<(), QuizError> {
        if !self.is_terminal() {
            return Err(QuizError::NotFinished);
        }
        self.reviewing = on;
        Ok(())
    }
}

impl fmt::Debug for QuizEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizEngine")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answered", &self.answers.len())
            .field("terminal", &self.is_terminal())
            .field("reviewing", &self.reviewing)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

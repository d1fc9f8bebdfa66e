//! Shared error types for the services crate.

use thiserror::Error;

use content::ContentError;
use pathway_core::{CurriculumError, QuizError};

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Errors emitted by `CurriculumService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CurriculumServiceError {
    #[error("node {index} has not been completed")]
    NotCompleted { index: usize },
    #[error(transparent)]
    Curriculum(#[from] CurriculumError),
    #[error(transparent)]
    Content(#[from] ContentError),
}

use thiserror::Error;

use crate::model::{NodeError, QuestionError};
use crate::progression::CurriculumError;
use crate::quiz::QuizError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Node(#[from] NodeError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Curriculum(#[from] CurriculumError),
}

#![forbid(unsafe_code)]

pub mod error;
pub mod lesson_text;
pub mod model;
pub mod progression;
pub mod quiz;
pub mod score;
pub mod time;

pub use error::Error;
pub use progression::{CurriculumError, CurriculumPath, NodeState, first_gap};
pub use quiz::{QuizEngine, QuizError, QuizProgress, QuizStep};
pub use score::{PASS_THRESHOLD_PERCENT, QuestionReview, ScoreBand, ScoreResult};
pub use time::Clock;

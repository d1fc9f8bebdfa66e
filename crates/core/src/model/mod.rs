mod ids;
mod lesson;
mod node;
mod question;

pub use ids::{CurriculumId, FieldId, LessonId, NodeId, ParseIdError, QuestionId};
pub use lesson::Lesson;
pub use node::{CurriculumNode, Difficulty, NodeDraft, NodeError};
pub use question::{Question, QuestionDraft, QuestionError};

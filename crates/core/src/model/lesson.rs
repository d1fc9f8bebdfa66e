use serde::{Deserialize, Serialize};

use crate::model::ids::LessonId;

/// Short lesson body delivered by the content backend.
///
/// `body` uses the markdown-lite subset understood by [`crate::lesson_text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl Lesson {
    #[must_use]
    pub fn new(id: LessonId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
        }
    }
}

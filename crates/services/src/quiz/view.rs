use pathway_core::{QuestionReview, ScoreBand};

use super::session::QuizSession;

/// Presentation-agnostic results screen data.
///
/// `reviews` is populated only while review mode is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResultView {
    pub correct: u32,
    pub total: u32,
    pub percentage: u8,
    pub band: ScoreBand,
    pub reviews: Option<Vec<QuestionReview>>,
}

impl QuizResultView {
    /// Returns `None` until the quiz is finished.
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Option<Self> {
        let result = session.score().ok()?;
        let reviews = session
            .engine()
            .is_reviewing()
            .then(|| result.reviews().to_vec());
        Some(Self {
            correct: result.correct(),
            total: result.total(),
            percentage: result.percentage(),
            band: result.band(),
            reviews,
        })
    }
}

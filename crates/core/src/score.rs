use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{Question, QuestionId};

/// Minimum percentage treated as a pass in end-of-quiz messaging.
pub const PASS_THRESHOLD_PERCENT: u8 = 70;

/// Rounds `part / whole * 100` half-up, in integer arithmetic.
///
/// Returns 0 when `whole` is 0.
#[must_use]
pub fn percentage(part: u32, whole: u32) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = u64::from(part.min(whole));
    let whole = u64::from(whole);
    let rounded = (part * 200 + whole) / (whole * 2);
    u8::try_from(rounded).unwrap_or(100)
}

/// Coarse outcome used to pick the end-of-quiz message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Perfect,
    Passed,
    NeedsReview,
}

impl ScoreBand {
    #[must_use]
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= 100 {
            ScoreBand::Perfect
        } else if percentage >= PASS_THRESHOLD_PERCENT {
            ScoreBand::Passed
        } else {
            ScoreBand::NeedsReview
        }
    }
}

/// Per-question review entry shown after the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionReview {
    pub question_id: QuestionId,
    pub selected: Option<String>,
    pub correct_answer: String,
    pub explanation: String,
    pub is_correct: bool,
}

/// Snapshot of a finished attempt.
///
/// Built once when the attempt turns terminal and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    correct: u32,
    total: u32,
    percentage: u8,
    reviews: Vec<QuestionReview>,
}

impl ScoreResult {
    /// Grade every question against the sparse answer map.
    ///
    /// Unanswered questions count as incorrect and stay in the denominator.
    pub(crate) fn compute(questions: &[Question], answers: &BTreeMap<usize, String>) -> Self {
        let reviews: Vec<QuestionReview> = questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let selected = answers.get(&index).cloned();
                let is_correct = selected
                    .as_deref()
                    .is_some_and(|answer| question.is_correct(answer));
                QuestionReview {
                    question_id: question.id(),
                    selected,
                    correct_answer: question.correct_answer().to_owned(),
                    explanation: question.explanation().to_owned(),
                    is_correct,
                }
            })
            .collect();

        let total = u32::try_from(reviews.len()).unwrap_or(u32::MAX);
        let correct = reviews.iter().fold(0_u32, |acc, r| {
            if r.is_correct { acc.saturating_add(1) } else { acc }
        });

        Self {
            correct,
            total,
            percentage: percentage(correct, total),
            reviews,
        }
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    #[must_use]
    pub fn reviews(&self) -> &[QuestionReview] {
        &self.reviews
    }

    /// Correctness flag per question, in question order.
    #[must_use]
    pub fn correctness(&self) -> Vec<bool> {
        self.reviews.iter().map(|r| r.is_correct).collect()
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.percentage == 100
    }

    #[must_use]
    pub fn is_passing(&self) -> bool {
        self.percentage >= PASS_THRESHOLD_PERCENT
    }

    #[must_use]
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_percentage(self.percentage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(3, 3), 100);
        assert_eq!(percentage(0, 5), 0);
    }

    #[test]
    fn percentage_of_nothing_is_zero() {
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn bands_follow_threshold() {
        assert_eq!(ScoreBand::from_percentage(100), ScoreBand::Perfect);
        assert_eq!(ScoreBand::from_percentage(70), ScoreBand::Passed);
        assert_eq!(ScoreBand::from_percentage(69), ScoreBand::NeedsReview);
    }

    #[test]
    fn unanswered_questions_count_against_score() {
        let questions = vec![
            Question::new(QuestionId::new(1), "q1", vec!["A".into(), "B".into()], "A", "")
                .unwrap(),
            Question::new(QuestionId::new(2), "q2", vec!["A".into(), "B".into()], "B", "")
                .unwrap(),
        ];
        let mut answers = BTreeMap::new();
        answers.insert(0, "A".to_string());

        let result = ScoreResult::compute(&questions, &answers);
        assert_eq!(result.correct(), 1);
        assert_eq!(result.total(), 2);
        assert_eq!(result.percentage(), 50);
        assert_eq!(result.reviews()[1].selected, None);
        assert!(!result.is_passing());
    }
}

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use content::{Backend, ContentError, CurriculumRecord, InMemoryContent, ProgressSink};
use pathway_core::ScoreResult;
use pathway_core::model::{
    CurriculumId, CurriculumNode, Difficulty, FieldId, Lesson, LessonId, NodeId, Question,
    QuestionId,
};

pub const LESSON: u64 = 1;
pub const FIELD: u64 = 1;
pub const CURRICULUM: u64 = 30;

/// Sink that rejects reports until reconnected.
pub struct FlakySink {
    offline: AtomicBool,
    inner: InMemoryContent,
}

impl FlakySink {
    pub fn offline(inner: InMemoryContent) -> Self {
        Self {
            offline: AtomicBool::new(true),
            inner,
        }
    }

    pub fn reconnect(&self) {
        self.offline.store(false, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), ContentError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ContentError::Unavailable("offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProgressSink for FlakySink {
    async fn report_quiz_result(
        &self,
        lesson_id: LessonId,
        result: &ScoreResult,
        completed_at: DateTime<Utc>,
    ) -> Result<(), ContentError> {
        self.check()?;
        self.inner
            .report_quiz_result(lesson_id, result, completed_at)
            .await
    }

    async fn report_node_completion(
        &self,
        curriculum_id: CurriculumId,
        node_index: usize,
        completed_at: DateTime<Utc>,
    ) -> Result<(), ContentError> {
        self.check()?;
        self.inner
            .report_node_completion(curriculum_id, node_index, completed_at)
            .await
    }
}

/// Three questions whose correct answers are "A", "B" and "C".
pub fn abc_questions() -> Vec<Question> {
    ["A", "B", "C"]
        .into_iter()
        .zip(1_u64..)
        .map(|(correct, id)| {
            Question::new(
                QuestionId::new(id),
                format!("Question {id}"),
                vec!["A".into(), "B".into(), "C".into(), "X".into()],
                correct,
                format!("The answer is {correct}."),
            )
            .unwrap()
        })
        .collect()
}

pub fn seeded_repo(completed: &[bool]) -> InMemoryContent {
    let repo = InMemoryContent::new();
    repo.insert_lesson(
        Lesson::new(LessonId::new(LESSON), "Basics", "# Basics"),
        abc_questions(),
    )
    .unwrap();
    let nodes = completed
        .iter()
        .zip(1_u64..)
        .map(|(done, id)| {
            CurriculumNode::new(
                NodeId::new(id),
                format!("Step {id}"),
                "",
                Difficulty::Beginner,
                vec!["topic".into()],
            )
            .unwrap()
            .with_completed(*done)
        })
        .collect();
    repo.insert_curriculum(CurriculumRecord {
        id: CurriculumId::new(CURRICULUM),
        field_id: FieldId::new(FIELD),
        nodes,
    })
    .unwrap();
    repo
}

pub fn flaky_backend(repo: &InMemoryContent) -> (Backend, Arc<FlakySink>) {
    let sink = Arc::new(FlakySink::offline(repo.clone()));
    let progress: Arc<dyn ProgressSink> = sink.clone();
    let backend = Backend {
        content: Arc::new(repo.clone()),
        progress,
    };
    (backend, sink)
}

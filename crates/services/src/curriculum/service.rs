use std::sync::Arc;
use tracing::{debug, info, warn};

use content::{Backend, ContentProvider, ProgressSink};
use pathway_core::model::{CurriculumId, CurriculumNode, FieldId};
use pathway_core::{Clock, CurriculumPath, first_gap};

use super::view::PathNodeView;
use crate::error::CurriculumServiceError;
use crate::quiz::ReportStatus;

/// Outcome of loading a field's curriculum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurriculumLoad {
    /// Nothing generated yet; the screen invites the user to generate a path.
    NotGenerated,
    Ready(CurriculumPath),
}

/// Result of completing a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeCompletion {
    pub index: usize,
    pub newly_completed: bool,
    pub report: ReportStatus,
    pub next_actionable: Option<usize>,
}

/// Builds curriculum paths from backend data and reports node completion.
#[derive(Clone)]
pub struct CurriculumService {
    clock: Clock,
    content: Arc<dyn ContentProvider>,
    progress: Arc<dyn ProgressSink>,
}

impl CurriculumService {
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

    /// Fetch and build the curriculum for a field.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumServiceError::Content` when the fetch fails.
    pub async fn load(&self, field_id: FieldId) -> Result<CurriculumLoad, CurriculumServiceError> {
        let Some(record) = self.content.get_curriculum(field_id).await? else {
            info!(%field_id, "no curriculum generated yet");
            return Ok(CurriculumLoad::NotGenerated);
        };
        debug!(%field_id, curriculum_id = %record.id, nodes = record.nodes.len(), "curriculum fetched");
        self.rebuild(record.id, record.nodes)
    }

    /// Build a fresh path from upstream node data.
    ///
    /// Used whenever completion data changes, including un-completion, which is
    /// never patched in place. Completion flags after an out-of-order gap are
    /// cleared so progression stays strictly sequential.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumServiceError::Curriculum` if the path cannot be built.
    pub fn rebuild(
        &self,
        id: CurriculumId,
        nodes: Vec<CurriculumNode>,
    ) -> Result<CurriculumLoad, CurriculumServiceError> {
        if nodes.is_empty() {
            return Ok(CurriculumLoad::NotGenerated);
        }
        let nodes = clamp_sequential(id, nodes);
        Ok(CurriculumLoad::Ready(CurriculumPath::build(id, nodes)?))
    }

    /// Mark a node completed locally, then report it.
    ///
    /// Re-completing a node is a no-op and sends nothing. A failed report is
    /// logged and returned as `ReportStatus::Failed`; the local completion stands.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumServiceError::Curriculum` for out-of-range or locked nodes.
    pub async fn complete_node(
        &self,
        path: &mut CurriculumPath,
        index: usize,
    ) -> Result<NodeCompletion, CurriculumServiceError> {
        let newly_completed = path.mark_completed(index)?;
        let report = if newly_completed {
            self.report(path.id(), index).await
        } else {
            ReportStatus::NotSent
        };

        Ok(NodeCompletion {
            index,
            newly_completed,
            report,
            next_actionable: path.next_actionable_index(),
        })
    }

    /// Retry reporting a node that is already completed locally.
    ///
    /// # Errors
    ///
    /// Returns `NotCompleted` for nodes that are not completed and
    /// `CurriculumServiceError::Content` if the sink rejects the report again.
    pub async fn resend_completion(
        &self,
        path: &CurriculumPath,
        index: usize,
    ) -> Result<(), CurriculumServiceError> {
        if !path.node(index).is_some_and(CurriculumNode::is_completed) {
            return Err(CurriculumServiceError::NotCompleted { index });
        }
        self.progress
            .report_node_completion(path.id(), index, self.clock.now())
            .await?;
        info!(curriculum_id = %path.id(), index, "node completion re-sent");
        Ok(())
    }

    /// Rows for the path screen, in curriculum order.
    #[must_use]
    pub fn path_view(&self, path: &CurriculumPath) -> Vec<PathNodeView> {
        PathNodeView::list(path)
    }

    async fn report(&self, curriculum_id: CurriculumId, index: usize) -> ReportStatus {
        match self
            .progress
            .report_node_completion(curriculum_id, index, self.clock.now())
            .await
        {
            Ok(()) => {
                info!(%curriculum_id, index, "node completion reported");
                ReportStatus::Delivered
            }
            Err(err) => {
                warn!(%curriculum_id, index, error = %err, "node completion not reported");
                ReportStatus::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }
}

fn clamp_sequential(id: CurriculumId, mut nodes: Vec<CurriculumNode>) -> Vec<CurriculumNode> {
    if let Some(gap) = first_gap(&nodes) {
        warn!(curriculum_id = %id, gap, "out-of-order completion; clearing completion from gap onward");
        for node in nodes.iter_mut().skip(gap) {
            *node = node.clone().with_completed(false);
        }
    }
    nodes
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

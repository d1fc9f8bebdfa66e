mod common;

use content::Backend;
use pathway_core::model::{CurriculumId, CurriculumNode, Difficulty, FieldId, NodeId};
use pathway_core::time::fixed_now;
use pathway_core::{CurriculumError, CurriculumPath, NodeState};
use services::{
    Clock, CurriculumLoad, CurriculumService, CurriculumServiceError, PathNodeView, PathSummary,
    ReportStatus,
};

use common::{CURRICULUM, FIELD, flaky_backend, seeded_repo};

async fn load(svc: &CurriculumService) -> CurriculumPath {
    match svc.load(FieldId::new(FIELD)).await.unwrap() {
        CurriculumLoad::Ready(path) => path,
        CurriculumLoad::NotGenerated => panic!("curriculum should be generated"),
    }
}

#[tokio::test]
async fn three_node_path_unlocks_in_order() {
    let repo = seeded_repo(&[false, false, false]);
    let svc = CurriculumService::from_backend(Clock::fixed(fixed_now()), &Backend::in_memory(repo.clone()));
    let mut path = load(&svc).await;

    assert_eq!(
        path.states(),
        vec![NodeState::Active, NodeState::Locked, NodeState::Locked]
    );
    assert!(!path.is_unlocked(2));

    let first = svc.complete_node(&mut path, 0).await.unwrap();
    assert_eq!(first.next_actionable, Some(1));
    assert!(path.is_unlocked(1));
    assert!(!path.is_unlocked(2));

    let second = svc.complete_node(&mut path, 1).await.unwrap();
    assert_eq!(second.next_actionable, Some(2));

    let last = svc.complete_node(&mut path, 2).await.unwrap();
    assert_eq!(last.next_actionable, None);
    assert!(path.is_finished());
    assert_eq!(path.completion_percentage(), 100);

    let reports = repo.node_reports().unwrap();
    let indices: Vec<usize> = reports.iter().map(|r| r.node_index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert!(reports.iter().all(|r| r.curriculum_id == CurriculumId::new(CURRICULUM)));
}

#[tokio::test]
async fn skipping_ahead_is_refused() {
    let repo = seeded_repo(&[true, false, false]);
    let svc = CurriculumService::from_backend(Clock::fixed(fixed_now()), &Backend::in_memory(repo));
    let mut path = load(&svc).await;

    assert!(matches!(
        svc.complete_node(&mut path, 2).await.unwrap_err(),
        CurriculumServiceError::Curriculum(CurriculumError::Locked { index: 2 })
    ));
    assert!(matches!(
        svc.complete_node(&mut path, 3).await.unwrap_err(),
        CurriculumServiceError::Curriculum(CurriculumError::OutOfRange { index: 3, len: 3 })
    ));
    assert_eq!(path.next_actionable_index(), Some(1));
}

#[tokio::test]
async fn views_follow_the_path() {
    let repo = seeded_repo(&[true, false, false]);
    let svc = CurriculumService::from_backend(Clock::fixed(fixed_now()), &Backend::in_memory(repo));
    let path = load(&svc).await;

    let views = PathNodeView::list(&path);
    assert_eq!(views.len(), 3);
    assert_eq!(views[0].state, NodeState::Completed);
    assert!(views[1].is_next);
    assert_eq!(views[2].state, NodeState::Locked);
    assert_eq!(views[1].title, "Step 2");

    let summary = PathSummary::from_path(&path);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.percentage, 33);
    assert_eq!(summary.next, Some(1));
    assert!(!summary.is_finished);
}

#[tokio::test]
async fn failed_report_keeps_local_completion() {
    let repo = seeded_repo(&[false, false]);
    let (backend, sink) = flaky_backend(&repo);
    let svc = CurriculumService::from_backend(Clock::fixed(fixed_now()), &backend);
    let mut path = load(&svc).await;

    let done = svc.complete_node(&mut path, 0).await.unwrap();
    assert!(done.newly_completed);
    assert!(matches!(done.report, ReportStatus::Failed { .. }));
    assert_eq!(done.next_actionable, Some(1));
    assert!(path.is_unlocked(1));
    assert!(repo.node_reports().unwrap().is_empty());

    assert!(matches!(
        svc.resend_completion(&path, 0).await.unwrap_err(),
        CurriculumServiceError::Content(_)
    ));

    sink.reconnect();
    svc.resend_completion(&path, 0).await.unwrap();
    let reports = repo.node_reports().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].completed_at, fixed_now());
}

#[tokio::test]
async fn reload_after_report_reflects_upstream_state() {
    let repo = seeded_repo(&[false, false]);
    let svc = CurriculumService::from_backend(Clock::fixed(fixed_now()), &Backend::in_memory(repo));
    let mut path = load(&svc).await;
    svc.complete_node(&mut path, 0).await.unwrap();

    let reloaded = load(&svc).await;
    assert_eq!(reloaded, path);
    assert_eq!(reloaded.next_actionable_index(), Some(1));
}

fn nodes(completed: &[bool]) -> Vec<CurriculumNode> {
    completed
        .iter()
        .zip(1_u64..)
        .map(|(done, id)| {
            CurriculumNode::new(NodeId::new(id), format!("Step {id}"), "", Difficulty::Beginner, vec![])
                .unwrap()
                .with_completed(*done)
        })
        .collect()
}

#[tokio::test]
async fn uncompleted_upstream_node_rebuilds_the_path() {
    let repo = seeded_repo(&[false]);
    let svc = CurriculumService::from_backend(Clock::fixed(fixed_now()), &Backend::in_memory(repo));
    let id = CurriculumId::new(CURRICULUM);

    let CurriculumLoad::Ready(before) = svc.rebuild(id, nodes(&[true, true, false])).unwrap() else {
        panic!("path should build");
    };
    assert_eq!(
        before.states(),
        vec![NodeState::Completed, NodeState::Completed, NodeState::Active]
    );

    let CurriculumLoad::Ready(after) = svc.rebuild(id, nodes(&[false, true, false])).unwrap() else {
        panic!("path should build");
    };
    assert_eq!(
        after.states(),
        vec![NodeState::Active, NodeState::Locked, NodeState::Locked]
    );
    assert_eq!(after.next_actionable_index(), Some(0));
    assert!(!after.nodes()[1].is_completed());

    assert_eq!(svc.rebuild(id, Vec::new()).unwrap(), CurriculumLoad::NotGenerated);
}

#[tokio::test]
async fn unknown_field_is_not_generated() {
    let repo = seeded_repo(&[false]);
    let svc = CurriculumService::from_backend(Clock::fixed(fixed_now()), &Backend::in_memory(repo));
    assert_eq!(
        svc.load(FieldId::new(99)).await.unwrap(),
        CurriculumLoad::NotGenerated
    );
}

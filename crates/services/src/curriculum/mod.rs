mod service;
mod view;

pub use service::{CurriculumLoad, CurriculumService, NodeCompletion};
pub use view::{PathNodeView, PathSummary};

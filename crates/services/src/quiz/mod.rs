mod service;
mod session;
mod view;

pub use service::{QuizLoad, QuizService};
pub use session::{QuizSession, ReportStatus};
pub use view::QuizResultView;

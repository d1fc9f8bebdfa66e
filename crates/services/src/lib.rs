#![forbid(unsafe_code)]

pub mod app_services;
pub mod curriculum;
pub mod error;
pub mod lesson_service;
pub mod quiz;

pub use pathway_core::Clock;

pub use app_services::AppServices;
pub use curriculum::{CurriculumLoad, CurriculumService, NodeCompletion, PathNodeView, PathSummary};
pub use error::{CurriculumServiceError, QuizServiceError};
pub use lesson_service::{LessonService, RenderedLesson};
pub use quiz::{QuizLoad, QuizResultView, QuizService, QuizSession, ReportStatus};

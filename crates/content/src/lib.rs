#![forbid(unsafe_code)]

pub mod fixture;
pub mod memory;
pub mod provider;

pub use fixture::ContentPack;
pub use memory::{InMemoryContent, NodeCompletionReport, QuizReport};
pub use provider::{Backend, ContentError, ContentProvider, CurriculumRecord, ProgressSink};

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod feedback;
pub mod file_io;
pub mod layout;
pub mod logger;
pub mod models;
pub mod scroll;
pub mod selector;
pub mod session;
pub mod store;
pub mod ui;

// Re-exports for convenience
pub use config::Config;
pub use engine::{EngineState, PageLayout};
pub use error::QuizError;
pub use evaluator::{evaluate, submit};
pub use feedback::{Feedback, Transition};
pub use layout::{CellMeasure, FontAdjust, FontClass, LayoutMetrics, TextMeasure, Viewport};
pub use models::{Mode, Question, QuestionBank, Stats, Verdict};
pub use scroll::ScrollController;
pub use selector::{Selection, pick_next};
pub use session::{Control, handle_event};
pub use store::{Persisted, QuestionStore};
pub use ui::draw_quiz;

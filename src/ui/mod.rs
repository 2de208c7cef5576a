mod feedback;
pub mod layout;
mod quiz;

pub use layout::{Button, button_at, calculate_quiz_chunks};
pub use quiz::draw_quiz;

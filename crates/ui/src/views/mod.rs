mod questions;
mod state;

pub use questions::QuestionsView;
pub use state::{ViewError, ViewState, view_state_from_resource};

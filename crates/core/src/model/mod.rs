mod pool;
mod question;

pub use pool::{QuestionPool, Subset};
pub use question::{Question, QuestionError};

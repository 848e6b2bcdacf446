pub mod model;
pub mod sampling;

pub use model::{Question, QuestionError, QuestionPool, Subset};
pub use sampling::{DEFAULT_SUBSET_SIZE, sample_distinct};

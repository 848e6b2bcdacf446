#![forbid(unsafe_code)]

pub mod error;
pub mod question_bank;
pub mod source;

pub use error::{QuestionBankError, SourceError};
pub use question_bank::{LoadOutcome, QuestionBankService};
pub use source::{FileQuestionSource, HttpQuestionSource, QuestionSource};

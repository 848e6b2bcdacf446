use serde::{Deserialize, Serialize};

use super::question::Question;

/// The full set of candidate questions parsed from a source resource.
///
/// A pool is built once per load and replaced wholesale on reload; it is never
/// mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionPool {
    questions: Vec<Question>,
}

impl QuestionPool {
    /// Parse raw resource text: one question per line, blank and
    /// whitespace-only lines dropped.
    ///
    /// Parsing is total; an empty or all-blank input yields an empty pool.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let questions = text
            .lines()
            .filter_map(|line| Question::parse(line).ok())
            .collect();
        Self { questions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Project the pool at the given indices, in the given order.
    ///
    /// Out-of-range indices are skipped.
    #[must_use]
    pub fn project(&self, indices: &[usize]) -> Subset {
        let questions = indices
            .iter()
            .filter_map(|&index| self.questions.get(index).cloned())
            .collect();
        Subset { questions }
    }
}

/// The currently displayed random sample drawn from a pool.
///
/// Replaced, never mutated, each time a new selection is made.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subset {
    questions: Vec<Question>,
}

impl Subset {
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Text for the clipboard: questions joined by a blank line.
    ///
    /// An empty subset yields an empty string; callers decide whether that
    /// means "do nothing".
    #[must_use]
    pub fn clipboard_text(&self) -> String {
        self.questions
            .iter()
            .map(Question::as_str)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_drops_blank_lines_and_trims() {
        let pool = QuestionPool::parse("Q1\n\nQ2  \n   \nQ3");
        let texts: Vec<_> = pool.questions().iter().map(Question::as_str).collect();
        assert_eq!(texts, vec!["Q1", "Q2", "Q3"]);
    }

    #[test]
    fn parse_handles_crlf_line_endings() {
        let pool = QuestionPool::parse("Q1\r\nQ2\r\n\r\nQ3\r\n");
        let texts: Vec<_> = pool.questions().iter().map(Question::as_str).collect();
        assert_eq!(texts, vec!["Q1", "Q2", "Q3"]);
    }

    #[test]
    fn parse_is_idempotent_for_same_text() {
        let text = "First?\nSecond?\n\nThird?";
        assert_eq!(QuestionPool::parse(text), QuestionPool::parse(text));
    }

    #[test]
    fn parse_of_all_blank_text_yields_empty_pool() {
        assert!(QuestionPool::parse("").is_empty());
        assert!(QuestionPool::parse("  \n \n\t\n").is_empty());
    }

    #[test]
    fn project_keeps_index_order_and_skips_out_of_range() {
        let pool = QuestionPool::parse("A\nB\nC");
        let subset = pool.project(&[2, 0, 7]);
        let texts: Vec<_> = subset.questions().iter().map(Question::as_str).collect();
        assert_eq!(texts, vec!["C", "A"]);
    }

    #[test]
    fn clipboard_text_joins_with_blank_line() {
        let pool = QuestionPool::parse("A\nB");
        let subset = pool.project(&[0, 1]);
        assert_eq!(subset.clipboard_text(), "A\n\nB");
    }

    #[test]
    fn clipboard_text_of_empty_subset_is_empty() {
        assert_eq!(Subset::default().clipboard_text(), "");
    }
}

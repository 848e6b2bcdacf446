use dioxus::prelude::*;

/// User-facing failures for the questions view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// The resource could not be fetched at all.
    SourceUnavailable { source: String },
    /// The resource was fetched but held no usable questions.
    NoQuestions { source: String },
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ViewError::SourceUnavailable { source } => {
                format!("Error loading questions. Please check \"{source}\".")
            }
            ViewError::NoQuestions { source } => {
                format!("No questions available. Please check \"{source}\".")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Loading,
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_source() {
        let unavailable = ViewError::SourceUnavailable {
            source: "questions.txt".to_string(),
        };
        assert_eq!(
            unavailable.message(),
            "Error loading questions. Please check \"questions.txt\"."
        );

        let empty = ViewError::NoQuestions {
            source: "https://example.org/q.txt".to_string(),
        };
        assert_eq!(
            empty.message(),
            "No questions available. Please check \"https://example.org/q.txt\"."
        );
    }
}

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Utc};
use dioxus::prelude::*;
use tracing::warn;

use prompter_core::model::Subset;
use services::QuestionBankError;

use crate::clipboard;
use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};

const LOADING_MESSAGE: &str = "Loading questions...";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum CopyState {
    #[default]
    Idle,
    Copied,
    Failed,
}

impl CopyState {
    const fn label(self) -> &'static str {
        match self {
            CopyState::Idle => "Copy Questions",
            CopyState::Copied => "Copied!",
            CopyState::Failed => "Copy failed",
        }
    }
}

/// Copy acknowledgement with a generation counter, so a revert timer only
/// clears the label of the copy that started it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct CopyFeedback {
    state: CopyState,
    epoch: u32,
}

impl CopyFeedback {
    const fn label(self) -> &'static str {
        self.state.label()
    }

    /// Record a finished copy attempt; returns the epoch its revert timer
    /// must present to clear the label.
    fn record(&mut self, success: bool) -> u32 {
        self.epoch = self.epoch.wrapping_add(1);
        self.state = if success {
            CopyState::Copied
        } else {
            CopyState::Failed
        };
        self.epoch
    }

    /// Revert to the idle label, unless a newer copy has happened since.
    fn revert(&mut self, epoch: u32) {
        if self.epoch == epoch {
            self.state = CopyState::Idle;
        }
    }
}

/// Status line shown in place of the list; `None` means the list renders.
/// The paused/stopped resource states have no message of their own and read
/// as still loading.
fn status_message(state: &ViewState<()>) -> Option<(bool, String)> {
    match state {
        ViewState::Idle | ViewState::Loading => Some((false, LOADING_MESSAGE.to_string())),
        ViewState::Ready(()) => None,
        ViewState::Error(err) => Some((true, err.message())),
    }
}

#[component]
pub fn QuestionsView() -> Element {
    let ctx = use_context::<AppContext>();
    let bank = ctx.question_bank();

    let subset = use_signal(Subset::default);
    let feedback = use_signal(CopyFeedback::default);

    let bank_for_load = Arc::clone(&bank);
    let resource = use_resource(move || {
        let bank = Arc::clone(&bank_for_load);
        let mut subset = subset;

        async move {
            match bank.load().await {
                Ok(_) => {
                    subset.set(bank.subset());
                    Ok(())
                }
                Err(QuestionBankError::EmptyPool) => Err(ViewError::NoQuestions {
                    source: bank.source_description(),
                }),
                Err(QuestionBankError::Source(_)) => Err(ViewError::SourceUnavailable {
                    source: bank.source_description(),
                }),
            }
        }
    });

    let state = view_state_from_resource(&resource);

    let bank_for_refresh = Arc::clone(&bank);
    let on_refresh = use_callback(move |()| {
        let mut subset = subset;
        // No-op before the first successful load and while a load is in flight.
        if let Some(fresh) = bank_for_refresh.refresh_subset() {
            subset.set(fresh);
        }
    });

    let bank_for_copy = Arc::clone(&bank);
    let on_copy = use_callback(move |()| {
        let bank = Arc::clone(&bank_for_copy);
        let mut feedback = feedback;

        spawn(async move {
            let text = bank.clipboard_text();
            if text.is_empty() {
                return;
            }
            let success = clipboard::copy_text(&text).await;
            if !success {
                // Best effort: report and move on, the app stays interactive.
                warn!("copying questions failed in both clipboard mechanisms");
            }
            let epoch = feedback.write().record(success);
            let mut feedback = feedback;
            spawn(async move {
                tokio::time::sleep(Duration::from_secs(2)).await;
                feedback.write().revert(epoch);
            });
        });
    });

    let questions: Vec<String> = subset
        .read()
        .questions()
        .iter()
        .map(ToString::to_string)
        .collect();
    let year = Utc::now().year();

    rsx! {
        div { class: "page",
            h1 { "Prompter" }
            p { class: "tagline", "A few questions to get a conversation going." }

            div { id: "questions-list", class: "questions",
                match status_message(&state) {
                    Some((is_error, message)) => rsx! {
                        p { class: if is_error { "error" } else { "status" }, "{message}" }
                    },
                    None => rsx! {
                        ul {
                            for question in questions {
                                li { class: "question", "{question}" }
                            }
                        }
                    },
                }
            }

            div { class: "actions",
                button {
                    id: "fetch-button",
                    r#type: "button",
                    onclick: move |_| on_refresh.call(()),
                    "New Questions"
                }
                button {
                    id: "copy-button",
                    r#type: "button",
                    onclick: move |_| on_copy.call(()),
                    "{feedback().label()}"
                }
            }

            footer {
                p { "© {year}" }
            }
        }
    }
}

use std::sync::Arc;

use services::QuestionBankService;

/// What the composition root must provide to the UI.
pub trait UiApp: Send + Sync {
    fn question_bank(&self) -> Arc<QuestionBankService>;
}

#[derive(Clone)]
pub struct AppContext {
    question_bank: Arc<QuestionBankService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            question_bank: app.question_bank(),
        }
    }

    #[must_use]
    pub fn question_bank(&self) -> Arc<QuestionBankService> {
        Arc::clone(&self.question_bank)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

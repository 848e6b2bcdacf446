use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use prompter_core::model::{QuestionPool, Subset};
use prompter_core::sampling::{DEFAULT_SUBSET_SIZE, sample_distinct};

use crate::error::QuestionBankError;
use crate::source::QuestionSource;

/// Outcome of a `load` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The pool was replaced and a fresh subset drawn.
    Loaded { pool_len: usize, subset_len: usize },
    /// Another load was already in flight; this call did nothing.
    AlreadyLoading,
}

#[derive(Debug, Default)]
struct BankState {
    pool: QuestionPool,
    subset: Subset,
}

/// Loads a question pool from its source and serves random subsets of it.
///
/// The service is cheap to clone and safe to share; clones operate on the same
/// pool and subset. The in-flight flag serializes repeated load requests and
/// nothing else: an in-flight load cannot be cancelled, only ignored.
#[derive(Clone)]
pub struct QuestionBankService {
    source: Arc<dyn QuestionSource>,
    subset_size: usize,
    state: Arc<Mutex<BankState>>,
    loading: Arc<AtomicBool>,
}

impl QuestionBankService {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self {
            source,
            subset_size: DEFAULT_SUBSET_SIZE,
            state: Arc::new(Mutex::new(BankState::default())),
            loading: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set how many questions each drawn subset holds (minimum 1).
    #[must_use]
    pub fn with_subset_size(mut self, subset_size: usize) -> Self {
        self.subset_size = subset_size.max(1);
        self
    }

    /// Fetch the resource, replace the pool, and draw a fresh subset.
    ///
    /// A call made while another load is in flight is an idempotent skip: it
    /// returns `LoadOutcome::AlreadyLoading` without fetching or touching any
    /// state. The in-flight flag is reset on every exit path.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::Source` when the resource cannot be
    /// fetched, and `QuestionBankError::EmptyPool` when it parses to zero
    /// usable questions (the subset is left empty in that case).
    pub async fn load(&self) -> Result<LoadOutcome, QuestionBankError> {
        if self.loading.swap(true, Ordering::AcqRel) {
            debug!("load skipped, another load is in flight");
            return Ok(LoadOutcome::AlreadyLoading);
        }
        let result = self.load_inner().await;
        self.loading.store(false, Ordering::Release);
        result
    }

    async fn load_inner(&self) -> Result<LoadOutcome, QuestionBankError> {
        let text = self.source.fetch_text().await.map_err(|err| {
            warn!(source = %self.source.describe(), error = %err, "failed to fetch questions");
            err
        })?;

        let pool = QuestionPool::parse(&text);
        if pool.is_empty() {
            warn!(source = %self.source.describe(), "resource contained no usable questions");
            let mut state = self.state();
            state.pool = pool;
            state.subset = Subset::default();
            return Err(QuestionBankError::EmptyPool);
        }

        let indices = sample_distinct(&mut rand::rng(), pool.len(), self.subset_size);
        let subset = pool.project(&indices);
        let (pool_len, subset_len) = (pool.len(), subset.len());

        let mut state = self.state();
        state.pool = pool;
        state.subset = subset;
        drop(state);

        info!(pool_len, subset_len, "loaded question pool");
        Ok(LoadOutcome::Loaded {
            pool_len,
            subset_len,
        })
    }

    /// Draw a fresh random subset from the already-loaded pool.
    ///
    /// Returns `None`, leaving the current subset untouched, while a load is
    /// in flight or before any pool has been loaded.
    pub fn refresh_subset(&self) -> Option<Subset> {
        if self.loading.load(Ordering::Acquire) {
            debug!("refresh skipped, load in flight");
            return None;
        }
        let mut state = self.state();
        if state.pool.is_empty() {
            return None;
        }
        let indices = sample_distinct(&mut rand::rng(), state.pool.len(), self.subset_size);
        state.subset = state.pool.project(&indices);
        Some(state.subset.clone())
    }

    /// The currently displayed subset.
    #[must_use]
    pub fn subset(&self) -> Subset {
        self.state().subset.clone()
    }

    #[must_use]
    pub fn pool_len(&self) -> usize {
        self.state().pool.len()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Text for the clipboard: the subset joined by blank lines, empty when
    /// nothing is displayed.
    #[must_use]
    pub fn clipboard_text(&self) -> String {
        self.state().subset.clipboard_text()
    }

    /// Human-readable source location for status and error messages.
    #[must_use]
    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    fn state(&self) -> MutexGuard<'_, BankState> {
        // The lock is only held for short synchronous sections, never across
        // an await, so a poisoned lock can only mean a panic mid-assignment;
        // the state is still a coherent pool/subset pair.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    use async_trait::async_trait;

    use crate::error::SourceError;

    struct StaticSource {
        text: &'static str,
        fetches: AtomicUsize,
    }

    impl StaticSource {
        fn new(text: &'static str) -> Arc<Self> {
            Arc::new(Self {
                text,
                fetches: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl QuestionSource for StaticSource {
        async fn fetch_text(&self) -> Result<String, SourceError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.text.to_string())
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    struct FailingSource;

    #[async_trait]
    impl QuestionSource for FailingSource {
        async fn fetch_text(&self) -> Result<String, SourceError> {
            Err(SourceError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such resource",
            )))
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    /// Source that blocks inside `fetch_text` until released, so tests can
    /// observe the service mid-load.
    #[derive(Default)]
    struct GatedSource {
        entered: Notify,
        release: Notify,
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl QuestionSource for GatedSource {
        async fn fetch_text(&self) -> Result<String, SourceError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.entered.notify_one();
            self.release.notified().await;
            Ok("Q1\nQ2\nQ3\nQ4".to_string())
        }

        fn describe(&self) -> String {
            "gated".to_string()
        }
    }

    #[tokio::test]
    async fn load_replaces_pool_and_draws_subset() {
        let bank = QuestionBankService::new(StaticSource::new("Q1\n\nQ2  \n   \nQ3\nQ4\nQ5"));
        let outcome = bank.load().await.unwrap();

        assert_eq!(
            outcome,
            LoadOutcome::Loaded {
                pool_len: 5,
                subset_len: 3
            }
        );
        assert_eq!(bank.pool_len(), 5);
        assert_eq!(bank.subset().len(), 3);
        assert!(!bank.is_loading());
    }

    #[tokio::test]
    async fn subset_is_capped_by_pool_size() {
        let bank = QuestionBankService::new(StaticSource::new("Q1\nQ2"));
        bank.load().await.unwrap();
        assert_eq!(bank.subset().len(), 2);
    }

    #[tokio::test]
    async fn subset_questions_are_distinct_and_come_from_the_pool() {
        let bank = QuestionBankService::new(StaticSource::new("A\nB\nC\nD\nE\nF"));
        bank.load().await.unwrap();

        for _ in 0..20 {
            let subset = bank.refresh_subset().unwrap();
            assert_eq!(subset.len(), 3);
            let texts: HashSet<_> = subset
                .questions()
                .iter()
                .map(|question| question.as_str().to_string())
                .collect();
            assert_eq!(texts.len(), 3);
            assert!(
                texts
                    .iter()
                    .all(|text| ["A", "B", "C", "D", "E", "F"].contains(&text.as_str()))
            );
        }
    }

    #[tokio::test]
    async fn empty_resource_reports_empty_pool_and_clears_subset() {
        let bank = QuestionBankService::new(StaticSource::new("Q1\nQ2\nQ3\nQ4"));
        bank.load().await.unwrap();
        assert!(!bank.subset().is_empty());

        let empty = QuestionBankService::new(StaticSource::new("  \n \n"));
        let err = empty.load().await.unwrap_err();
        assert!(matches!(err, QuestionBankError::EmptyPool));
        assert!(empty.subset().is_empty());
        assert_eq!(empty.clipboard_text(), "");
        assert!(!empty.is_loading());
    }

    #[tokio::test]
    async fn fetch_failure_surfaces_source_error_and_resets_flag() {
        let bank = QuestionBankService::new(Arc::new(FailingSource));
        let err = bank.load().await.unwrap_err();
        assert!(matches!(err, QuestionBankError::Source(_)));
        assert!(!bank.is_loading());
        assert!(bank.subset().is_empty());

        // Still terminal per call, but the service stays usable.
        assert!(bank.load().await.is_err());
    }

    #[tokio::test]
    async fn load_mid_load_is_a_skip_with_no_second_fetch() {
        let source = Arc::new(GatedSource::default());
        let bank = QuestionBankService::new(Arc::clone(&source) as Arc<dyn QuestionSource>);

        let first = {
            let bank = bank.clone();
            tokio::spawn(async move { bank.load().await })
        };
        source.entered.notified().await;
        assert!(bank.is_loading());

        let skipped = bank.load().await.unwrap();
        assert_eq!(skipped, LoadOutcome::AlreadyLoading);
        assert!(bank.refresh_subset().is_none());
        assert!(bank.subset().is_empty());

        source.release.notify_one();
        let outcome = first.await.unwrap().unwrap();
        assert!(matches!(outcome, LoadOutcome::Loaded { pool_len: 4, .. }));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
        assert!(!bank.is_loading());
    }

    #[tokio::test]
    async fn refresh_before_any_load_is_a_no_op() {
        let bank = QuestionBankService::new(StaticSource::new("Q1"));
        assert!(bank.refresh_subset().is_none());
        assert_eq!(bank.clipboard_text(), "");
    }

    #[tokio::test]
    async fn clipboard_text_joins_subset_with_blank_lines() {
        let bank = QuestionBankService::new(StaticSource::new("A\nB")).with_subset_size(2);
        bank.load().await.unwrap();
        let text = bank.clipboard_text();
        assert!(text == "A\n\nB" || text == "B\n\nA");
    }

    #[tokio::test]
    async fn reload_replaces_pool_wholesale() {
        let source = StaticSource::new("Q1\nQ2\nQ3");
        let bank = QuestionBankService::new(Arc::clone(&source) as Arc<dyn QuestionSource>);
        bank.load().await.unwrap();
        bank.load().await.unwrap();
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
        assert_eq!(bank.pool_len(), 3);
    }
}

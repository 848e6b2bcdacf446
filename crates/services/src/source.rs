use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::SourceError;

/// Where raw question text comes from.
///
/// The service only ever needs the whole document at once; a single fetch per
/// load, no streaming, no retries.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch the full text of the resource.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the resource cannot be read, whether at the
    /// transport level or as a non-success HTTP status.
    async fn fetch_text(&self) -> Result<String, SourceError>;

    /// Human-readable location, used in user-facing error messages.
    fn describe(&self) -> String;
}

/// Questions served over HTTP(S).
pub struct HttpQuestionSource {
    client: Client,
    url: String,
}

impl HttpQuestionSource {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    async fn fetch_text(&self) -> Result<String, SourceError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::HttpStatus(response.status()));
        }
        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Questions read from a local text file.
pub struct FileQuestionSource {
    path: PathBuf,
}

impl FileQuestionSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl QuestionSource for FileQuestionSource {
    async fn fetch_text(&self) -> Result<String, SourceError> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

//! crates/annotation_study_core/src/flow.rs
//!
//! The reading-flow controller: serves the next unread paragraph and
//! advances position on confirmation.
//!
//! Position is derived state. It is recomputed as the store's row count on
//! every call rather than kept as a stored cursor, so a confirmation
//! "advances" simply by appending one row. Serializing concurrent
//! confirmations for the same user is the caller's responsibility.

use std::sync::Arc;

use crate::domain::{Identity, NewEntry, ReaderPayload, ReaderView};
use crate::ports::{ParagraphSource, PortResult, ProgressStore, SentenceSplitter};

/// Drives one user's linear pass through their dataset.
pub struct ReadingFlow {
    paragraphs: Arc<dyn ParagraphSource>,
    progress: Arc<dyn ProgressStore>,
    splitter: Arc<dyn SentenceSplitter>,
}

impl ReadingFlow {
    pub fn new(
        paragraphs: Arc<dyn ParagraphSource>,
        progress: Arc<dyn ProgressStore>,
        splitter: Arc<dyn SentenceSplitter>,
    ) -> Self {
        Self {
            paragraphs,
            progress,
            splitter,
        }
    }

    /// Computes the current view for `identity`: the paragraph at the
    /// derived position, split into sentences, or `Complete` once the
    /// dataset is exhausted.
    pub async fn render(&self, identity: &Identity) -> PortResult<ReaderView> {
        let index = self.progress.current_position(identity).await?;
        let paragraphs = self.paragraphs.load_paragraphs(identity).await?;
        let total = paragraphs.len();

        if index >= total {
            return Ok(ReaderView::Complete);
        }

        let paragraph = paragraphs[index].clone();
        let sentences = self.splitter.split(&paragraph.text);
        let percent = ((index + 1) as f64 / total as f64 * 100.0).round() as u32;

        Ok(ReaderView::InProgress(ReaderPayload {
            paragraph,
            sentences,
            percent,
            index,
            total,
        }))
    }

    /// Records one confirmation for `identity`.
    ///
    /// Appends a row keyed by the dataset's own paragraph id (falling back
    /// to the positional index when the record has no id), with the
    /// submitted selection and duration plus a snapshot of the paragraph
    /// text. Confirming past the end writes nothing and is not an error.
    pub async fn confirm(
        &self,
        identity: &Identity,
        selections: Option<String>,
        duration: Option<f64>,
    ) -> PortResult<()> {
        let index = self.progress.current_position(identity).await?;
        let paragraphs = self.paragraphs.load_paragraphs(identity).await?;

        let Some(paragraph) = paragraphs.get(index) else {
            return Ok(());
        };

        let entry = NewEntry {
            paragraph_id: paragraph.id.unwrap_or(index as i64),
            selections,
            paragraph: Some(paragraph.text.clone()),
            duration,
        };
        self.progress.append_entry(identity, entry).await
    }
}

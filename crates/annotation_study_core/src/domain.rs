//! crates/annotation_study_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or web framework; the only
//! serialization concern is the dataset record shape, which mirrors the
//! on-disk JSON.

use serde::Deserialize;
use std::collections::BTreeMap;

/// A validated username representing one study participant.
///
/// Constructed only by the auth layer after a credential check, so holding
/// an `Identity` is proof the username exists in the static registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identity(pub String);

impl Identity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One paragraph record from a per-user dataset file.
///
/// `id` is the dataset's own stable id; older dataset files omit it, in
/// which case the positional index stands in at confirmation time.
/// `sentence_labels` maps sentence text to the label values assigned by
/// annotators and is consulted only by the justification view.
#[derive(Debug, Clone, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub id: Option<i64>,
    pub text: String,
    #[serde(default)]
    pub sentence_labels: Option<BTreeMap<String, Vec<String>>>,
}

/// A progress row about to be appended for one confirmation.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub paragraph_id: i64,
    pub selections: Option<String>,
    pub paragraph: Option<String>,
    pub duration: Option<f64>,
}

/// The render payload for an in-progress reader view.
#[derive(Debug, Clone)]
pub struct ReaderPayload {
    pub paragraph: Paragraph,
    pub sentences: Vec<String>,
    pub percent: u32,
    pub index: usize,
    pub total: usize,
}

/// What the reader should show for a given user right now.
#[derive(Debug, Clone)]
pub enum ReaderView {
    InProgress(ReaderPayload),
    Complete,
}

/// A stage offered on the stage-select screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageEntry {
    pub label: &'static str,
    pub number: u32,
}

/// Where entering a numbered stage sends the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageDestination {
    Reader,
    Justification,
    NotYetOpen,
}

/// A sentence whose annotators disagree, surfaced by the justification view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceConflict {
    pub paragraph_index: usize,
    pub sentence: String,
    pub labels: Vec<String>,
}

/// One row of the admin completion dashboard.
#[derive(Debug, Clone)]
pub struct CompletionRow {
    pub user: String,
    pub completed: usize,
    /// `None` when the dataset for this user cannot be resolved or loaded.
    pub total: Option<usize>,
    pub done: bool,
}

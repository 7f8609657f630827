//! services/api/src/adapters/datasets.rs
//!
//! This module contains the dataset adapter, the concrete implementation of
//! the `ParagraphSource` port from the `core` crate. It resolves identities
//! through the static identity-to-filename tables and reads the backing
//! JSON files fresh on every call, so dataset edits take effect on the next
//! request without a restart.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use annotation_study_core::domain::{Identity, Paragraph};
use annotation_study_core::ports::{ParagraphSource, PortError, PortResult};

/// A paragraph source backed by static per-user JSON files.
#[derive(Clone)]
pub struct FileParagraphSource {
    data_dir: PathBuf,
    datasets: BTreeMap<String, String>,
    justification_datasets: BTreeMap<String, String>,
}

impl FileParagraphSource {
    pub fn new(
        data_dir: PathBuf,
        datasets: BTreeMap<String, String>,
        justification_datasets: BTreeMap<String, String>,
    ) -> Self {
        Self {
            data_dir,
            datasets,
            justification_datasets,
        }
    }

    async fn read_file(&self, identity: &Identity, path: &Path) -> PortResult<Vec<Paragraph>> {
        let raw = tokio::fs::read(path).await.map_err(|e| {
            PortError::DatasetUnavailable(identity.to_string(), e.to_string())
        })?;
        serde_json::from_slice(&raw)
            .map_err(|e| PortError::DatasetUnavailable(identity.to_string(), e.to_string()))
    }

    async fn load_from(
        &self,
        table: &BTreeMap<String, String>,
        identity: &Identity,
    ) -> PortResult<Vec<Paragraph>> {
        let filename = table
            .get(identity.as_str())
            .ok_or_else(|| PortError::UnknownUser(identity.to_string()))?;
        self.read_file(identity, &self.data_dir.join(filename)).await
    }
}

#[async_trait]
impl ParagraphSource for FileParagraphSource {
    async fn load_paragraphs(&self, identity: &Identity) -> PortResult<Vec<Paragraph>> {
        self.load_from(&self.datasets, identity).await
    }

    async fn load_justification(&self, identity: &Identity) -> PortResult<Vec<Paragraph>> {
        self.load_from(&self.justification_datasets, identity).await
    }

    fn has_justification(&self, identity: &Identity) -> bool {
        self.justification_datasets.contains_key(identity.as_str())
    }
}

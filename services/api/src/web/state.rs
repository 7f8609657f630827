//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use annotation_study_core::domain::Identity;
use annotation_study_core::flow::ReadingFlow;
use annotation_study_core::ports::{ParagraphSource, ProgressStore, SentenceSplitter};
use annotation_study_core::stages::StageRouter;

use crate::adapters::{FileParagraphSource, RuleSplitter, SqliteProgressStore};
use crate::config::Config;
use crate::web::session::SessionLayer;

/// The shared application state, created once at startup and passed to all
/// handlers.
pub struct AppState {
    pub config: Arc<Config>,
    pub paragraphs: Arc<dyn ParagraphSource>,
    pub progress: Arc<dyn ProgressStore>,
    pub flow: ReadingFlow,
    pub stages: StageRouter,
    pub sessions: SessionLayer,
    /// Per-identity guards serializing `/confirm`'s count-then-insert so a
    /// double-submit cannot append the same index twice.
    confirm_locks: Mutex<HashMap<Identity, Arc<Mutex<()>>>>,
}

impl AppState {
    /// Wires the concrete adapters to the core ports.
    pub fn new(config: Arc<Config>) -> Self {
        let paragraphs: Arc<dyn ParagraphSource> = Arc::new(FileParagraphSource::new(
            config.data_dir.clone(),
            config.users.datasets.clone(),
            config.users.justification_datasets.clone(),
        ));
        let progress: Arc<dyn ProgressStore> =
            Arc::new(SqliteProgressStore::new(config.store_dir.clone()));
        let splitter: Arc<dyn SentenceSplitter> = Arc::new(RuleSplitter::new());
        let flow = ReadingFlow::new(paragraphs.clone(), progress.clone(), splitter);
        let stages = StageRouter::new(config.users.experts.clone());

        Self {
            config,
            paragraphs,
            progress,
            flow,
            stages,
            sessions: SessionLayer::new(),
            confirm_locks: Mutex::new(HashMap::new()),
        }
    }

    /// The confirm guard for one identity, created on first use.
    pub async fn confirm_lock(&self, identity: &Identity) -> Arc<Mutex<()>> {
        let mut locks = self.confirm_locks.lock().await;
        locks
            .entry(identity.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

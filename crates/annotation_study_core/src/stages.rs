//! crates/annotation_study_core/src/stages.rs
//!
//! Routes users to the task stages their role allows. The partition is
//! static: one expert set drives both the stage listing and stage entry.

use std::collections::BTreeSet;

use crate::domain::{Identity, StageDestination, StageEntry};

pub const STAGE_ANNOTATION: u32 = 1;
pub const STAGE_JUSTIFICATION: u32 = 2;
pub const STAGE_DISCUSSION: u32 = 3;
pub const STAGE_ARBITRATION: u32 = 4;

/// Static role partition over the configured identities.
pub struct StageRouter {
    experts: BTreeSet<String>,
}

impl StageRouter {
    pub fn new(experts: BTreeSet<String>) -> Self {
        Self { experts }
    }

    pub fn is_expert(&self, identity: &Identity) -> bool {
        self.experts.contains(identity.as_str())
    }

    /// The ordered stage list shown on the stage-select screen.
    /// Experts get a single arbitration stage; everyone else gets the
    /// annotation, justification, discussion sequence.
    pub fn available_stages(&self, identity: &Identity) -> Vec<StageEntry> {
        if self.is_expert(identity) {
            vec![StageEntry {
                label: "Arbitration",
                number: STAGE_ARBITRATION,
            }]
        } else {
            vec![
                StageEntry {
                    label: "Annotation",
                    number: STAGE_ANNOTATION,
                },
                StageEntry {
                    label: "Justification",
                    number: STAGE_JUSTIFICATION,
                },
                StageEntry {
                    label: "Discussion",
                    number: STAGE_DISCUSSION,
                },
            ]
        }
    }

    /// Resolves a stage number to a destination. Stage 2 requires a
    /// justification dataset for this identity; `has_justification` carries
    /// that fact in so routing stays pure. Every combination without an
    /// open destination, including experts entering any numbered stage,
    /// lands on the placeholder page.
    pub fn enter(
        &self,
        identity: &Identity,
        stage: u32,
        has_justification: bool,
    ) -> StageDestination {
        if self.is_expert(identity) {
            return StageDestination::NotYetOpen;
        }
        match stage {
            STAGE_ANNOTATION => StageDestination::Reader,
            STAGE_JUSTIFICATION if has_justification => StageDestination::Justification,
            _ => StageDestination::NotYetOpen,
        }
    }
}

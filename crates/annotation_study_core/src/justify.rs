//! crates/annotation_study_core/src/justify.rs
//!
//! Label-conflict computation for the justification view.

use crate::domain::{Paragraph, SentenceConflict};

/// Collects every sentence whose annotators assigned more than one
/// distinct label. Conflicts come out in paragraph order; within a
/// paragraph they follow the label map's sentence-text ordering.
/// Sentences with a single (possibly repeated) label agree and are
/// skipped, as are paragraphs without `sentence_labels`.
pub fn label_conflicts(paragraphs: &[Paragraph]) -> Vec<SentenceConflict> {
    let mut conflicts = Vec::new();
    for (paragraph_index, paragraph) in paragraphs.iter().enumerate() {
        let Some(labels_by_sentence) = &paragraph.sentence_labels else {
            continue;
        };
        for (sentence, labels) in labels_by_sentence {
            let mut distinct: Vec<String> = labels.clone();
            distinct.sort();
            distinct.dedup();
            if distinct.len() > 1 {
                conflicts.push(SentenceConflict {
                    paragraph_index,
                    sentence: sentence.clone(),
                    labels: distinct,
                });
            }
        }
    }
    conflicts
}

//! services/api/src/adapters/splitter.rs
//!
//! A rule-based sentence splitter implementing the `SentenceSplitter` port.
//! Sentences end at a run of `.`, `!` or `?`; a trailing fragment without a
//! terminator still counts as a sentence.

use regex::Regex;

use annotation_study_core::ports::SentenceSplitter;

pub struct RuleSplitter {
    boundary: Regex,
}

impl RuleSplitter {
    pub fn new() -> Self {
        Self {
            boundary: Regex::new(r"[^.!?\s][^.!?]*[.!?]+")
                .expect("sentence boundary pattern is valid"),
        }
    }
}

impl Default for RuleSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceSplitter for RuleSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut tail = 0;
        for found in self.boundary.find_iter(text) {
            sentences.push(found.as_str().trim().to_string());
            tail = found.end();
        }
        let rest = text[tail..].trim();
        if !rest.is_empty() {
            sentences.push(rest.to_string());
        }
        sentences
    }
}

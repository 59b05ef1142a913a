use std::time::{Duration, Instant};

use crate::classifier::Classification;

/// Running counters of a cleanup session.
///
/// `to_delete + kept == processed` holds after every `record`.
#[derive(Debug, Clone)]
pub struct SessionStats {
    processed: usize,
    to_delete: usize,
    kept: usize,
    excluded: usize,
    started: Instant,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            processed: 0,
            to_delete: 0,
            kept: 0,
            excluded: 0,
            started: Instant::now(),
        }
    }

    pub fn record(&mut self, classification: &Classification) {
        self.processed += 1;
        if classification.is_delete() {
            self.to_delete += 1;
        } else {
            self.kept += 1;
        }
    }

    /// A message the server returned that is undated or not older than the cutoff
    pub fn exclude(&mut self) {
        self.excluded += 1;
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn to_delete(&self) -> usize {
        self.to_delete
    }

    pub fn kept(&self) -> usize {
        self.kept
    }

    pub fn excluded(&self) -> usize {
        self.excluded
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

//! # Navigator
//!
//! Capability the submission controller redirects through.

use std::sync::RwLock;

/// Navigation capability injected into the form
///
/// Called with the destination path at most once per accepted submission.
/// Implementations must not call back into the form that owns the call:
/// `redirect` runs while the form state is locked.
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

/// Navigator that only records the requested paths, for testing
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: RwLock<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths requested so far, oldest first
    pub fn visited(&self) -> Vec<String> {
        self.visited.read().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn redirect_count(&self) -> usize {
        self.visited.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn last(&self) -> Option<String> {
        self.visited.read().ok().and_then(|v| v.last().cloned())
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        if let Ok(mut visited) = self.visited.write() {
            visited.push(path.to_string());
        }
    }
}

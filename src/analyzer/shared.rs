use std::sync::{Arc, RwLock};

use super::engine::ScreenshotAnalyzer;
use crate::catalog::Song;

/// Analyzer snapshot shared between the caller and worker threads.
///
/// A refresh swaps in a fully rebuilt analyzer. Work that already took a
/// snapshot keeps using the old catalog until it finishes.
pub struct SharedAnalyzer {
    inner: RwLock<Arc<ScreenshotAnalyzer>>,
}

impl SharedAnalyzer {
    pub fn new(analyzer: ScreenshotAnalyzer) -> Self {
        Self {
            inner: RwLock::new(Arc::new(analyzer)),
        }
    }

    pub fn current(&self) -> Arc<ScreenshotAnalyzer> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    pub fn replace(&self, analyzer: ScreenshotAnalyzer) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(analyzer);
    }

    /// Rebuilds the current analyzer over a new catalog and swaps it in.
    pub fn refresh(&self, songs: Vec<Song>) {
        let rebuilt = self.current().rebuild(songs);
        crate::log(&format!("Catalog refreshed: {} songs", rebuilt.songs().len()));
        self.replace(rebuilt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::engine::tests::ScriptedRecognizer;
    use crate::catalog::models::tests::make_song;
    use crate::config::AnalyzerConfig;
    use crate::jacket::DctHasher;

    fn empty_analyzer() -> ScreenshotAnalyzer {
        ScreenshotAnalyzer::new(
            Vec::new(),
            Arc::new(ScriptedRecognizer::new("6", &[])),
            Arc::new(DctHasher),
            AnalyzerConfig::default(),
        )
    }

    #[test]
    fn test_refresh_keeps_old_snapshot_alive() {
        let shared = SharedAnalyzer::new(empty_analyzer());
        let before = shared.current();

        shared.refresh(vec![make_song(1, None, None), make_song(2, None, None)]);

        assert!(before.songs().is_empty());
        assert_eq!(shared.current().songs().len(), 2);
    }

    #[test]
    fn test_replace_swaps_wholesale() {
        let shared = SharedAnalyzer::new(empty_analyzer());
        let rebuilt = shared.current().rebuild(vec![make_song(5, None, None)]);

        shared.replace(rebuilt);

        assert_eq!(shared.current().songs()[0].id, 5);
    }
}

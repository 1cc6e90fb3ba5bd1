// file: src/search/cache.rs
// description: process-wide lazily built search index
// reference: https://docs.rs/tokio/latest/tokio/sync/struct.Notify.html

use super::engine::EngineKind;
use super::field::TextField;
use super::index::SearchIndex;
use crate::archive::ArchiveExtractor;
use crate::config::{ArchiveConfig, Config};
use crate::error::{Result, SearchError};
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};
use tracing::{info, warn};

#[derive(Debug)]
enum CacheState {
    Absent,
    Building,
    Ready(Arc<SearchIndex>),
}

/// Where the cached index comes from.
#[derive(Debug, Clone)]
pub struct IndexSource {
    pub archive: ArchiveConfig,
    pub fields: Vec<TextField>,
    pub engine: EngineKind,
}

impl IndexSource {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            archive: config.archive.clone(),
            fields: config.text_fields()?,
            engine: config.search.engine,
        })
    }

    fn build(&self) -> Result<SearchIndex> {
        let extractor = ArchiveExtractor::new(self.archive.clone());
        let engine = self.engine.engine();
        let (index, _stats) = SearchIndex::from_archive(
            &extractor,
            &self.archive.path,
            self.fields.clone(),
            engine.as_ref(),
        )?;
        Ok(index)
    }
}

/// Single-assignment slot for the documentation index.
///
/// The first caller moves the slot from `Absent` to `Building` and runs the
/// build on the blocking pool; callers arriving meanwhile wait for it. A
/// failed build puts the slot back to `Absent` so the next call retries. A
/// `Ready` index is never replaced.
pub struct IndexCache {
    source: IndexSource,
    state: Arc<Mutex<CacheState>>,
    built: Arc<Notify>,
}

impl IndexCache {
    pub fn new(source: IndexSource) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(CacheState::Absent)),
            built: Arc::new(Notify::new()),
        }
    }

    /// The cached index if a build has already succeeded.
    pub async fn get(&self) -> Option<Arc<SearchIndex>> {
        match &*self.state.lock().await {
            CacheState::Ready(index) => Some(Arc::clone(index)),
            _ => None,
        }
    }

    pub async fn get_or_build(&self) -> Result<Arc<SearchIndex>> {
        loop {
            let mut state = self.state.lock().await;
            if let CacheState::Ready(index) = &*state {
                return Ok(Arc::clone(index));
            }

            if matches!(*state, CacheState::Building) {
                // registered before the lock drops, so the builder's notify cannot be missed
                let notified = self.built.notified();
                drop(state);
                notified.await;
                continue;
            }

            *state = CacheState::Building;
            drop(state);
            return self.run_build().await;
        }
    }

    async fn run_build(&self) -> Result<Arc<SearchIndex>> {
        info!(
            "Building documentation index from {}",
            self.source.archive.path.display()
        );

        // detached so a cancelled caller cannot leave the slot stuck in `Building`
        let source = self.source.clone();
        let state = Arc::clone(&self.state);
        let built = Arc::clone(&self.built);
        let task = tokio::spawn(async move {
            let outcome = tokio::task::spawn_blocking(move || source.build())
                .await
                .map_err(|e| SearchError::Task(e.to_string()))
                .and_then(|result| result);

            let mut state = state.lock().await;
            let result = match outcome {
                Ok(index) => {
                    let index = Arc::new(index);
                    info!("Documentation index ready ({} documents)", index.len());
                    *state = CacheState::Ready(Arc::clone(&index));
                    Ok(index)
                }
                Err(e) => {
                    warn!("Documentation index build failed: {}", e);
                    *state = CacheState::Absent;
                    Err(e)
                }
            };
            built.notify_waiters();
            result
        });

        task.await.map_err(|e| SearchError::Task(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::extractor::tests::write_archive;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn source(path: PathBuf) -> IndexSource {
        IndexSource {
            archive: ArchiveConfig {
                path,
                extensions: vec![".md".to_string(), ".mdx".to_string()],
            },
            fields: vec![TextField::Content, TextField::Filename],
            engine: EngineKind::Overlap,
        }
    }

    #[tokio::test]
    async fn test_builds_once_and_reuses() {
        let temp = TempDir::new().unwrap();
        let path = write_archive(temp.path(), &[("repo/a.md", b"hello world")]);
        let cache = IndexCache::new(source(path.clone()));

        assert!(cache.get().await.is_none());
        let first = cache.get_or_build().await.unwrap();

        // the archive disappearing does not matter once the index is ready
        std::fs::remove_file(&path).unwrap();
        let second = cache.get_or_build().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.query("hello", 5).unwrap()[0].filename, "a.md");
    }

    #[tokio::test]
    async fn test_failed_build_is_retried() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("main.zip");
        let cache = IndexCache::new(source(path));

        let err = cache.get_or_build().await.unwrap_err();
        assert!(matches!(err, SearchError::NotFound { .. }));
        assert!(cache.get().await.is_none());

        write_archive(temp.path(), &[("repo/b.md", b"later")]);
        let index = cache.get_or_build().await.unwrap();
        assert_eq!(index.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_calls_share_one_index() {
        let temp = TempDir::new().unwrap();
        let path = write_archive(
            temp.path(),
            &[("repo/a.md", b"alpha"), ("repo/b.md", b"beta")],
        );
        let cache = Arc::new(IndexCache::new(source(path)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.get_or_build().await.unwrap() })
            })
            .collect();

        let mut indexes = Vec::new();
        for handle in handles {
            indexes.push(handle.await.unwrap());
        }

        for index in &indexes[1..] {
            assert!(Arc::ptr_eq(&indexes[0], index));
        }
    }
}

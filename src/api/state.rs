use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::error::{AppError, AppResult};
use crate::services::sources::RatingSource;
use crate::services::Recommender;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state shared by every request
struct AppStateInner {
    /// Current snapshot; replaced whole on reload, never mutated in place
    snapshot: RwLock<Arc<Recommender>>,
    /// Serializes reloads so two rebuilds never race to swap
    reload_lock: Mutex<()>,
    source: Arc<dyn RatingSource>,
    default_top_n: usize,
}

impl AppState {
    /// Creates state around an already built snapshot
    pub fn new(
        recommender: Recommender,
        source: Arc<dyn RatingSource>,
        default_top_n: usize,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                snapshot: RwLock::new(Arc::new(recommender)),
                reload_lock: Mutex::new(()),
                source,
                default_top_n,
            }),
        }
    }

    /// Loads the corpus from `source` and builds the first snapshot
    pub async fn initialize(source: Arc<dyn RatingSource>, default_top_n: usize) -> AppResult<Self> {
        let recommender = build_snapshot(source.as_ref()).await?;
        Ok(Self::new(recommender, source, default_top_n))
    }

    /// Current snapshot; stays valid for the caller even if a reload swaps it out
    pub async fn snapshot(&self) -> Arc<Recommender> {
        self.inner.snapshot.read().await.clone()
    }

    pub fn default_top_n(&self) -> usize {
        self.inner.default_top_n
    }

    /// Rebuilds the snapshot from the source and swaps it in
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn reload(&self) -> AppResult<Arc<Recommender>> {
        let _guard = self.inner.reload_lock.lock().await;
        let source = self.inner.source.as_ref();

        tracing::info!(source = source.name(), "Reloading ratings corpus");

        let recommender = match build_snapshot(source).await {
            Ok(recommender) => Arc::new(recommender),
            Err(e) => {
                tracing::error!(error = %e, source = source.name(), "Reload failed, keeping current snapshot");
                return Err(e);
            }
        };

        *self.inner.snapshot.write().await = recommender.clone();

        tracing::info!(source = source.name(), "Snapshot swapped");
        Ok(recommender)
    }
}

/// Loads the corpus and builds a snapshot on the blocking pool
async fn build_snapshot(source: &dyn RatingSource) -> AppResult<Recommender> {
    let records = source.load().await?;

    tokio::task::spawn_blocking(move || Recommender::build(&records))
        .await
        .map_err(|e| AppError::Internal(format!("Snapshot build task failed: {}", e)))
}

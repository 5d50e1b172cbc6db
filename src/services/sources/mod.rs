//! Ratings corpus sources
//!
//! A source yields the denormalized corpus the recommendation snapshot is
//! built from: one record per rating, already joined with the movie's title
//! and genre flags.

use crate::{error::AppResult, models::RatingRecord};

pub mod memory;
pub mod movielens;

pub use memory::StaticSource;
pub use movielens::MovieLensSource;

/// Trait for ratings corpus sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RatingSource: Send + Sync {
    /// Loads the full corpus
    ///
    /// Every call reads the underlying data again, so a reload picks up changes.
    async fn load(&self) -> AppResult<Vec<RatingRecord>>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}

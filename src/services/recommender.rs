use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;

use crate::models::{RatingRecord, UserId};

use super::collaborative::CollaborativeRecommender;
use super::content::ContentRecommender;
use super::genre_profile::GenreProfile;
use super::user_item::UserItemMatrix;

/// Summary of a built snapshot
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SnapshotStats {
    pub users: usize,
    pub titles: usize,
    pub ratings: usize,
    pub built_at: DateTime<Utc>,
}

/// Immutable snapshot of every structure derived from one ratings corpus
///
/// Built once per corpus and shared read-only between requests. Rebuilding on
/// new data produces a new snapshot instead of mutating this one.
#[derive(Debug, Clone)]
pub struct Recommender {
    content: ContentRecommender,
    collaborative: CollaborativeRecommender,
    rating_count: usize,
    built_at: DateTime<Utc>,
}

impl Recommender {
    /// Builds the genre profile, the user-item matrix and the user similarity matrix
    pub fn build(records: &[RatingRecord]) -> Self {
        let start = Instant::now();

        let content = ContentRecommender::new(GenreProfile::build(records));
        let collaborative = CollaborativeRecommender::new(UserItemMatrix::build(records));

        let recommender = Self {
            content,
            collaborative,
            rating_count: records.len(),
            built_at: Utc::now(),
        };

        tracing::info!(
            users = recommender.users().len(),
            titles = recommender.content.profile().len(),
            ratings = recommender.rating_count,
            elapsed_ms = start.elapsed().as_millis(),
            "Recommendation snapshot built"
        );

        recommender
    }

    /// Titles similar in genre to `title`; empty for unknown titles
    pub fn recommend_by_genre(&self, title: &str, top_n: usize) -> Vec<String> {
        self.content.recommend_by_genre(title, top_n)
    }

    /// Unseen titles liked by similar users; empty for unknown users
    pub fn recommend_for_user(&self, user_id: UserId, top_n: usize) -> Vec<String> {
        self.collaborative.recommend_for_user(user_id, top_n)
    }

    /// Every title with a genre profile, ascending
    pub fn titles(&self) -> Vec<String> {
        self.content.profile().titles().map(str::to_string).collect()
    }

    /// Every user id with at least one rating, ascending
    pub fn users(&self) -> &[UserId] {
        self.collaborative.matrix().users()
    }

    pub fn stats(&self) -> SnapshotStats {
        SnapshotStats {
            users: self.users().len(),
            titles: self.content.profile().len(),
            ratings: self.rating_count,
            built_at: self.built_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Genre, GenreFlags};

    fn corpus() -> Vec<RatingRecord> {
        let animation = GenreFlags::from_genres(&[Genre::Animation, Genre::Childrens]);
        let action = GenreFlags::from_genres(&[Genre::Action, Genre::SciFi]);
        vec![
            RatingRecord::new(1, "Toy Story", 5.0, animation),
            RatingRecord::new(1, "Aladdin", 4.0, animation),
            RatingRecord::new(2, "Toy Story", 5.0, animation),
            RatingRecord::new(2, "Aladdin", 4.0, animation),
            RatingRecord::new(2, "Aliens", 4.0, action),
            RatingRecord::new(3, "Aliens", 5.0, action),
            RatingRecord::new(3, "Star Wars", 5.0, action),
        ]
    }

    #[test]
    fn test_build_exposes_indices() {
        let recommender = Recommender::build(&corpus());

        assert_eq!(recommender.users(), &[1, 2, 3]);
        assert_eq!(
            recommender.titles(),
            vec!["Aladdin", "Aliens", "Star Wars", "Toy Story"]
        );

        let stats = recommender.stats();
        assert_eq!(stats.users, 3);
        assert_eq!(stats.titles, 4);
        assert_eq!(stats.ratings, 7);
    }

    #[test]
    fn test_both_strategies() {
        let recommender = Recommender::build(&corpus());

        assert_eq!(
            recommender.recommend_by_genre("Toy Story", 2),
            vec!["Aladdin", "Aliens"]
        );
        assert_eq!(recommender.recommend_for_user(1, 5), vec!["Aliens", "Star Wars"]);
    }

    #[test]
    fn test_empty_corpus() {
        let recommender = Recommender::build(&[]);

        assert!(recommender.titles().is_empty());
        assert!(recommender.users().is_empty());
        assert!(recommender.recommend_by_genre("Toy Story", 5).is_empty());
        assert!(recommender.recommend_for_user(1, 5).is_empty());
    }
}

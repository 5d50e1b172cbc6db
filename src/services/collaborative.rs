use super::similarity::SimilarityMatrix;
use super::user_item::UserItemMatrix;
use crate::models::UserId;

/// Number of most similar users whose ratings are aggregated
pub const NEIGHBOR_COUNT: usize = 5;

/// Collaborative recommender built on user-user rating similarity
#[derive(Debug, Clone)]
pub struct CollaborativeRecommender {
    matrix: UserItemMatrix,
    similarity: SimilarityMatrix,
}

impl CollaborativeRecommender {
    /// Precomputes the user-user similarity matrix for `matrix`
    pub fn new(matrix: UserItemMatrix) -> Self {
        let similarity = SimilarityMatrix::from_ratings(&matrix.ratings());
        Self { matrix, similarity }
    }

    pub fn matrix(&self) -> &UserItemMatrix {
        &self.matrix
    }

    /// Row positions of the users most similar to the user at `position`
    ///
    /// Ties keep ascending user id order.
    fn neighbors(&self, position: usize, count: usize) -> Vec<usize> {
        let mut candidates: Vec<(usize, f64)> = self
            .similarity
            .row(position)
            .iter()
            .copied()
            .enumerate()
            .filter(|(other, _)| *other != position)
            .collect();

        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
        candidates.truncate(count);
        candidates.into_iter().map(|(other, _)| other).collect()
    }

    /// Returns up to `top_n` titles the user has not rated, ranked by the mean
    /// rating of the user's nearest neighbors
    ///
    /// Unknown users, and users with no other user to compare against, yield an
    /// empty list. Equal means keep ascending title order.
    pub fn recommend_for_user(&self, user_id: UserId, top_n: usize) -> Vec<String> {
        if top_n == 0 {
            return Vec::new();
        }

        let Some(position) = self.matrix.position(user_id) else {
            return Vec::new();
        };

        let neighbors = self.neighbors(position, NEIGHBOR_COUNT);
        if neighbors.is_empty() {
            return Vec::new();
        }

        let neighbor_count = neighbors.len() as f64;
        let mut scored: Vec<(usize, f64)> = (0..self.matrix.titles().len())
            .filter(|column| !self.matrix.is_rated(position, *column))
            .map(|column| {
                let total: f64 = neighbors
                    .iter()
                    .map(|neighbor| self.matrix.value(*neighbor, column))
                    .sum();
                (column, total / neighbor_count)
            })
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let titles = self.matrix.titles();
        scored
            .into_iter()
            .take(top_n)
            .map(|(column, _)| titles[column].clone())
            .collect()
    }
}

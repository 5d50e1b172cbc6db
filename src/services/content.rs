use ndarray::aview1;

use super::genre_profile::GenreProfile;
use super::similarity::cosine_similarity;

/// Content-based recommender ranking titles by genre similarity
#[derive(Debug, Clone, Default)]
pub struct ContentRecommender {
    profile: GenreProfile,
}

impl ContentRecommender {
    pub fn new(profile: GenreProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &GenreProfile {
        &self.profile
    }

    /// Returns up to `top_n` titles whose genre profile is closest to `title`
    ///
    /// Unknown titles yield an empty list. The query title is never part of
    /// the result. Equal similarities keep ascending title order.
    pub fn recommend_by_genre(&self, title: &str, top_n: usize) -> Vec<String> {
        if top_n == 0 {
            return Vec::new();
        }

        let Some(target) = self.profile.get(title) else {
            return Vec::new();
        };

        let mut scored: Vec<(&str, f64)> = self
            .profile
            .iter()
            .filter(|(candidate, _)| *candidate != title)
            .map(|(candidate, vector)| {
                (candidate, cosine_similarity(aview1(target), aview1(vector)))
            })
            .collect();

        // Stable sort keeps the ascending title order among ties
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        scored
            .into_iter()
            .take(top_n)
            .map(|(candidate, _)| candidate.to_string())
            .collect()
    }
}

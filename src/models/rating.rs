use super::GenreFlags;

/// Identifier of a user in the ratings corpus (always >= 1)
pub type UserId = u32;

/// One observed rating event, denormalized with the movie's title and genres
#[derive(Debug, Clone, PartialEq)]
pub struct RatingRecord {
    pub user_id: UserId,
    pub title: String,
    pub rating: f64,
    pub genres: GenreFlags,
}

impl RatingRecord {
    pub fn new(user_id: UserId, title: impl Into<String>, rating: f64, genres: GenreFlags) -> Self {
        Self {
            user_id,
            title: title.into(),
            rating,
            genres,
        }
    }
}

mod genre;
mod rating;

pub use genre::{Genre, GenreFlags, GENRE_COUNT};
pub use rating::{RatingRecord, UserId};

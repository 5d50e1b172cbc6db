pub mod collaborative;
pub mod content;
pub mod genre_profile;
pub mod recommender;
pub mod similarity;
pub mod sources;
pub mod user_item;

pub use collaborative::{CollaborativeRecommender, NEIGHBOR_COUNT};
pub use content::ContentRecommender;
pub use genre_profile::{GenreProfile, GenreVector};
pub use recommender::{Recommender, SnapshotStats};
pub use similarity::{cosine_similarity, SimilarityMatrix};
pub use user_item::UserItemMatrix;

use csv::{ByteRecord, ReaderBuilder};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::{
    error::{AppError, AppResult},
    models::{Genre, GenreFlags, RatingRecord, UserId, GENRE_COUNT},
};

use super::RatingSource;

/// Lowest and highest rating on the MovieLens scale
const RATING_SCALE: (f64, f64) = (1.0, 5.0);

/// Columns of an item row before the genre flags
const ITEM_TITLE_COLUMN: usize = 1;
const ITEM_UNKNOWN_GENRE_COLUMN: usize = 5;
const ITEM_FIELD_COUNT: usize = ITEM_UNKNOWN_GENRE_COLUMN + 1 + GENRE_COUNT;

/// One line of `u.data`
#[derive(Debug, Deserialize)]
struct RawRating {
    user_id: UserId,
    item_id: u32,
    rating: f64,
    _timestamp: i64,
}

/// Title and genres of one line of `u.item`
#[derive(Debug, Clone, PartialEq)]
struct Item {
    title: String,
    genres: GenreFlags,
}

/// MovieLens 100K dataset on disk
///
/// Joins the tab-separated ratings file (`u.data`) with the pipe-separated,
/// Latin-1 encoded item file (`u.item`) on the item id.
#[derive(Debug, Clone)]
pub struct MovieLensSource {
    ratings_path: PathBuf,
    items_path: PathBuf,
}

impl MovieLensSource {
    pub fn new(ratings_path: impl AsRef<Path>, items_path: impl AsRef<Path>) -> Self {
        Self {
            ratings_path: ratings_path.as_ref().to_path_buf(),
            items_path: items_path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl RatingSource for MovieLensSource {
    async fn load(&self) -> AppResult<Vec<RatingRecord>> {
        let item_bytes = tokio::fs::read(&self.items_path).await?;
        let rating_bytes = tokio::fs::read(&self.ratings_path).await?;

        let items = parse_items(&item_bytes)?;
        let ratings = parse_ratings(&rating_bytes)?;
        let rating_count = ratings.len();
        let records = join(ratings, &items);

        let dropped = rating_count - records.len();
        if dropped > 0 {
            tracing::warn!(dropped, "Ratings reference unknown items and were skipped");
        }

        tracing::info!(
            items = items.len(),
            records = records.len(),
            ratings_path = %self.ratings_path.display(),
            items_path = %self.items_path.display(),
            source = self.name(),
            "Ratings corpus loaded"
        );

        Ok(records)
    }

    fn name(&self) -> &'static str {
        "movielens"
    }
}

/// Decodes a Latin-1 field; every byte maps to the code point of the same value
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn parse_field<T: FromStr>(record: &ByteRecord, column: usize, line: u64) -> AppResult<T> {
    record
        .get(column)
        .and_then(|field| std::str::from_utf8(field).ok())
        .and_then(|field| field.trim().parse().ok())
        .ok_or_else(|| AppError::InvalidData(format!("line {}: bad value in column {}", line, column)))
}

/// Parses `u.item` into items keyed by item id
fn parse_items(bytes: &[u8]) -> AppResult<HashMap<u32, Item>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'|')
        .quoting(false)
        .flexible(true)
        .from_reader(bytes);

    let mut items = HashMap::new();
    let mut record = ByteRecord::new();

    while reader.read_byte_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        if record.len() < ITEM_FIELD_COUNT {
            return Err(AppError::InvalidData(format!(
                "line {}: expected {} fields, found {}",
                line,
                ITEM_FIELD_COUNT,
                record.len()
            )));
        }

        let item_id: u32 = parse_field(&record, 0, line)?;
        let title = decode_latin1(&record[ITEM_TITLE_COLUMN]);

        let mut genres = GenreFlags::default();
        for genre in Genre::ALL {
            let column = ITEM_UNKNOWN_GENRE_COLUMN + 1 + genre.index();
            match parse_field::<u8>(&record, column, line)? {
                0 => {}
                1 => genres.set(genre, true),
                flag => {
                    return Err(AppError::InvalidData(format!(
                        "line {}: genre flag {} for {} is not 0 or 1",
                        line, flag, genre
                    )))
                }
            }
        }

        items.insert(item_id, Item { title, genres });
    }

    Ok(items)
}

/// Parses and validates `u.data`
fn parse_ratings(bytes: &[u8]) -> AppResult<Vec<RawRating>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .from_reader(bytes);

    let mut ratings = Vec::new();
    for (index, result) in reader.deserialize::<RawRating>().enumerate() {
        let rating = result?;
        let line = index + 1;

        if rating.user_id == 0 {
            return Err(AppError::InvalidData(format!("line {}: user id must be at least 1", line)));
        }

        let (lowest, highest) = RATING_SCALE;
        if !rating.rating.is_finite() || rating.rating < lowest || rating.rating > highest {
            return Err(AppError::InvalidData(format!(
                "line {}: rating {} outside {}-{}",
                line, rating.rating, lowest, highest
            )));
        }

        ratings.push(rating);
    }

    Ok(ratings)
}

/// Inner join of ratings with items; ratings of unknown items are dropped
fn join(ratings: Vec<RawRating>, items: &HashMap<u32, Item>) -> Vec<RatingRecord> {
    ratings
        .into_iter()
        .filter_map(|rating| {
            items.get(&rating.item_id).map(|item| {
                RatingRecord::new(rating.user_id, item.title.clone(), rating.rating, item.genres)
            })
        })
        .collect()
}

use ndarray::{Array2, ArrayView1};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::{RatingRecord, UserId};

/// Dense user x title rating matrix
///
/// Rows are the distinct user ids in ascending order, columns the distinct
/// titles in ascending order. A cell is `None` when the user never rated the
/// title; numeric consumers read such cells as the sentinel 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserItemMatrix {
    users: Vec<UserId>,
    titles: Vec<String>,
    positions: HashMap<UserId, usize>,
    cells: Array2<Option<f64>>,
}

/// Sum and count of the ratings one user gave one title
#[derive(Default)]
struct RatingAccumulator {
    sum: f64,
    count: u32,
}

impl RatingAccumulator {
    fn mean(&self) -> f64 {
        self.sum / f64::from(self.count)
    }
}

impl UserItemMatrix {
    /// Pivots the corpus into a user x title matrix
    ///
    /// Repeated ratings of the same title by the same user collapse to their mean.
    pub fn build(records: &[RatingRecord]) -> Self {
        let mut ratings: BTreeMap<(UserId, &str), RatingAccumulator> = BTreeMap::new();
        let mut titles: BTreeSet<&str> = BTreeSet::new();

        for record in records {
            let accumulator = ratings
                .entry((record.user_id, record.title.as_str()))
                .or_default();
            accumulator.sum += record.rating;
            accumulator.count += 1;
            titles.insert(record.title.as_str());
        }

        let users: Vec<UserId> = ratings
            .keys()
            .map(|(user_id, _)| *user_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let positions: HashMap<UserId, usize> = users
            .iter()
            .enumerate()
            .map(|(position, user_id)| (*user_id, position))
            .collect();
        let columns: HashMap<&str, usize> = titles
            .iter()
            .enumerate()
            .map(|(column, title)| (*title, column))
            .collect();

        let mut cells = Array2::from_elem((users.len(), titles.len()), None);
        for ((user_id, title), accumulator) in &ratings {
            cells[[positions[user_id], columns[title]]] = Some(accumulator.mean());
        }

        Self {
            users,
            titles: titles.into_iter().map(str::to_string).collect(),
            positions,
            cells,
        }
    }

    /// Row index: user ids in ascending order
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// Column index: titles in ascending order
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Row position of a user, if the user rated anything
    pub fn position(&self, user_id: UserId) -> Option<usize> {
        self.positions.get(&user_id).copied()
    }

    /// Ratings of the user at `position`, one cell per title
    pub fn row(&self, position: usize) -> ArrayView1<Option<f64>> {
        self.cells.row(position)
    }

    /// Cell value with absent ratings read as 0
    pub fn value(&self, position: usize, column: usize) -> f64 {
        self.cells[[position, column]].unwrap_or(0.0)
    }

    pub fn is_rated(&self, position: usize, column: usize) -> bool {
        self.cells[[position, column]].is_some()
    }

    /// Numeric rating matrix with absent ratings set to 0
    pub fn ratings(&self) -> Array2<f64> {
        self.cells.map(|cell| cell.unwrap_or(0.0))
    }
}

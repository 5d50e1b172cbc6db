use std::collections::BTreeMap;

use crate::models::{RatingRecord, GENRE_COUNT};

/// Mean genre-flag values of one title
pub type GenreVector = [f64; GENRE_COUNT];

/// Genre profile of every title in the corpus, keyed by title in ascending order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenreProfile {
    profiles: BTreeMap<String, GenreVector>,
}

/// Running per-title sums of genre flags
#[derive(Default)]
struct GenreAccumulator {
    sums: GenreVector,
    count: u32,
}

impl GenreProfile {
    /// Builds the profile by averaging each genre flag over all ratings of a title
    pub fn build(records: &[RatingRecord]) -> Self {
        let mut accumulators: BTreeMap<&str, GenreAccumulator> = BTreeMap::new();

        for record in records {
            let accumulator = accumulators.entry(record.title.as_str()).or_default();
            for (sum, flag) in accumulator.sums.iter_mut().zip(record.genres.to_vector()) {
                *sum += flag;
            }
            accumulator.count += 1;
        }

        let profiles = accumulators
            .into_iter()
            .map(|(title, accumulator)| {
                let count = f64::from(accumulator.count);
                (title.to_string(), accumulator.sums.map(|sum| sum / count))
            })
            .collect();

        Self { profiles }
    }

    pub fn get(&self, title: &str) -> Option<&GenreVector> {
        self.profiles.get(title)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Titles in ascending order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// Profiles in ascending title order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GenreVector)> {
        self.profiles.iter().map(|(title, vector)| (title.as_str(), vector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Genre, GenreFlags};

    #[test]
    fn test_empty_corpus_gives_empty_profile() {
        let profile = GenreProfile::build(&[]);
        assert!(profile.is_empty());
    }

    #[test]
    fn test_one_profile_per_title() {
        let comedy = GenreFlags::from_genres(&[Genre::Comedy]);
        let records = vec![
            RatingRecord::new(1, "Clerks", 4.0, comedy),
            RatingRecord::new(2, "Clerks", 5.0, comedy),
            RatingRecord::new(1, "Heat", 3.0, GenreFlags::from_genres(&[Genre::Crime])),
        ];

        let profile = GenreProfile::build(&records);

        assert_eq!(profile.len(), 2);
        assert_eq!(profile.titles().collect::<Vec<_>>(), vec!["Clerks", "Heat"]);
        assert_eq!(profile.get("Clerks").unwrap()[Genre::Comedy.index()], 1.0);
        assert!(profile.get("Missing").is_none());
    }

    #[test]
    fn test_components_are_means_of_flags() {
        let records = vec![
            RatingRecord::new(1, "Hybrid", 4.0, GenreFlags::from_genres(&[Genre::Drama])),
            RatingRecord::new(
                2,
                "Hybrid",
                2.0,
                GenreFlags::from_genres(&[Genre::Drama, Genre::War]),
            ),
        ];

        let profile = GenreProfile::build(&records);
        let vector = profile.get("Hybrid").unwrap();

        assert_eq!(vector[Genre::Drama.index()], 1.0);
        assert_eq!(vector[Genre::War.index()], 0.5);
        assert_eq!(vector[Genre::Action.index()], 0.0);
        assert!(vector.iter().all(|component| (0.0..=1.0).contains(component)));
    }
}

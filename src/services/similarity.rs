use ndarray::{Array2, ArrayView1, Axis};

/// Cosine similarity of two equal-length vectors.
///
/// A zero vector has no direction, so its similarity with anything is 0.
pub fn cosine_similarity(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    cosine_with_norms(a, b, norm(a), norm(b))
}

fn norm(v: ArrayView1<f64>) -> f64 {
    v.dot(&v).sqrt()
}

fn cosine_with_norms(a: ArrayView1<f64>, b: ArrayView1<f64>, norm_a: f64, norm_b: f64) -> f64 {
    debug_assert_eq!(a.len(), b.len());

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    a.dot(&b) / (norm_a * norm_b)
}

/// Square user-user similarity matrix over the rows of a rating matrix
///
/// Entry (i, j) is the cosine similarity of rows i and j. The matrix is
/// symmetric and its diagonal is 1.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    values: Array2<f64>,
}

impl SimilarityMatrix {
    /// Computes pairwise similarities of the rows of `ratings`
    pub fn from_ratings(ratings: &Array2<f64>) -> Self {
        let size = ratings.nrows();
        let norms = ratings.map_axis(Axis(1), norm);
        let mut values = Array2::zeros((size, size));

        for i in 0..size {
            values[[i, i]] = 1.0;
            for j in (i + 1)..size {
                let similarity =
                    cosine_with_norms(ratings.row(i), ratings.row(j), norms[i], norms[j]);
                values[[i, j]] = similarity;
                values[[j, i]] = similarity;
            }
        }

        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[[i, j]]
    }

    /// Similarities of row `i` against every row, including itself
    pub fn row(&self, i: usize) -> ArrayView1<f64> {
        self.values.row(i)
    }
}

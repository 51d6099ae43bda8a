use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::Rng;

pub const DEFAULT_MAX_ITER: usize = 100;
pub const DEFAULT_EPSILON: f64 = 0.2;
pub const DEFAULT_ATTEMPTS: usize = 10;

/// Lloyd's k-means over the rows of a matrix.
///
/// Each attempt starts from centers drawn uniformly inside the bounding box of
/// the data and iterates until the largest squared center shift drops to
/// `epsilon²` or `max_iter` passes have run. The attempt with the lowest
/// compactness is kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeans {
    pub k: usize,
    pub max_iter: usize,
    pub epsilon: f64,
    pub attempts: usize,
}

#[derive(Debug, Clone)]
pub struct Clustering {
    /// One row per cluster.
    pub centers: Array2<f64>,
    /// Cluster index for every input row.
    pub labels: Vec<usize>,
    /// Sum of squared distances from each row to its center.
    pub compactness: f64,
}

impl Default for KMeans {
    fn default() -> Self {
        KMeans::new(1)
    }
}

impl KMeans {
    pub fn new(k: usize) -> Self {
        KMeans {
            k,
            max_iter: DEFAULT_MAX_ITER,
            epsilon: DEFAULT_EPSILON,
            attempts: DEFAULT_ATTEMPTS,
        }
    }

    /// Cluster the rows of `data`. Returns `None` when there is nothing to
    /// cluster (no rows, or `k == 0`).
    pub fn fit<R: Rng + ?Sized>(&self, data: ArrayView2<f64>, rng: &mut R) -> Option<Clustering> {
        if data.nrows() == 0 || self.k == 0 {
            return None;
        }

        let lower = data.fold_axis(Axis(0), f64::INFINITY, |&acc, &x| acc.min(x));
        let upper = data.fold_axis(Axis(0), f64::NEG_INFINITY, |&acc, &x| acc.max(x));

        let mut best: Option<Clustering> = None;
        for attempt in 0..self.attempts.max(1) {
            let candidate = self.run_attempt(data, &lower, &upper, rng);
            log::trace!(
                "k-means attempt {} compactness {:.3}",
                attempt,
                candidate.compactness
            );
            if best
                .as_ref()
                .map_or(true, |b| candidate.compactness < b.compactness)
            {
                best = Some(candidate);
            }
        }
        best
    }

    fn run_attempt<R: Rng + ?Sized>(
        &self,
        data: ArrayView2<f64>,
        lower: &Array1<f64>,
        upper: &Array1<f64>,
        rng: &mut R,
    ) -> Clustering {
        let dims = data.ncols();
        // Random starting centers inside the data's bounding box
        let mut centers = Array2::from_shape_fn((self.k, dims), |(_, d)| {
            rng.random_range(lower[d]..=upper[d])
        });
        let mut labels = vec![0; data.nrows()];
        let epsilon_sq = self.epsilon * self.epsilon;

        for _ in 0..self.max_iter.max(1) {
            // Assign rows, then move each center to the mean of its rows
            assign_labels(data, &centers, &mut labels);
            let updated = recompute_centers(data, &labels, &centers);
            let shift = centers
                .outer_iter()
                .zip(updated.outer_iter())
                .map(|(old, new)| squared_distance(old, new))
                .fold(0.0, f64::max);
            centers = updated;
            if shift <= epsilon_sq {
                break;
            }
        }

        // Labels and compactness must describe the final centers
        let compactness = assign_labels(data, &centers, &mut labels);
        Clustering {
            centers,
            labels,
            compactness,
        }
    }
}

impl Clustering {
    /// Number of rows assigned to each cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centers.nrows()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }

    /// Index of the most populated cluster; the lowest index wins ties.
    pub fn largest_cluster(&self) -> usize {
        let sizes = self.cluster_sizes();
        let mut largest = 0;
        for (index, &size) in sizes.iter().enumerate() {
            if size > sizes[largest] {
                largest = index;
            }
        }
        largest
    }
}

fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

// Returns the compactness of the assignment.
fn assign_labels(data: ArrayView2<f64>, centers: &Array2<f64>, labels: &mut [usize]) -> f64 {
    let mut compactness = 0.0;
    for (row, label) in data.outer_iter().zip(labels.iter_mut()) {
        let mut nearest = 0;
        let mut nearest_distance = f64::INFINITY;
        for (index, center) in centers.outer_iter().enumerate() {
            let distance = squared_distance(row, center);
            if distance < nearest_distance {
                nearest = index;
                nearest_distance = distance;
            }
        }
        *label = nearest;
        compactness += nearest_distance;
    }
    compactness
}

// Empty clusters keep their previous center.
fn recompute_centers(data: ArrayView2<f64>, labels: &[usize], previous: &Array2<f64>) -> Array2<f64> {
    let mut sums = Array2::<f64>::zeros(previous.raw_dim());
    let mut counts = vec![0usize; previous.nrows()];

    for (row, &label) in data.outer_iter().zip(labels) {
        let mut sum = sums.row_mut(label);
        sum += &row;
        counts[label] += 1;
    }

    for (index, mut center) in sums.outer_iter_mut().enumerate() {
        if counts[index] == 0 {
            center.assign(&previous.row(index));
        } else {
            center /= counts[index] as f64;
        }
    }
    sums
}

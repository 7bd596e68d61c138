//! Dataset provider: synthetic cluster generator and CSV persistence.

pub mod csv;

use num_traits::Float;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;

use crate::common_types::{DataPoint, Sample};

pub use csv::{generate_csv_file, load_csv_file, read_csv, write_csv};

/// Coordinate range of the label-0 cluster.
pub const NEGATIVE_CLUSTER: (f64, f64) = (-0.9, -0.1);
/// Coordinate range of the label-1 cluster.
pub const POSITIVE_CLUSTER: (f64, f64) = (0.1, 0.9);

/// Two linearly separable 2-D clusters.
///
/// The first `n_samples / 2` points have both coordinates drawn from
/// [`NEGATIVE_CLUSTER`] with label 0, the next `n_samples / 2` from
/// [`POSITIVE_CLUSTER`] with label 1. An odd remainder is dropped.
pub fn generate_clusters<F, R>(n_samples: usize, rng: &mut R) -> Vec<Sample<F>>
where
    F: Float + SampleUniform,
    R: Rng + ?Sized,
{
    let half = n_samples / 2;
    let mut samples = Vec::with_capacity(half * 2);
    for (range, label) in [(NEGATIVE_CLUSTER, 0_u8), (POSITIVE_CLUSTER, 1_u8)] {
        let (low, high) = cast_range::<F>(range);
        for _ in 0..half {
            let x = rng.gen_range(low..high);
            let y = rng.gen_range(low..high);
            samples.push(DataPoint::new(vec![x, y], label));
        }
    }
    samples
}

fn cast_range<F: Float>((low, high): (f64, f64)) -> (F, F) {
    // both bounds are small constants, representable in any float type
    (
        F::from(low).unwrap_or_else(F::zero),
        F::from(high).unwrap_or_else(F::zero),
    )
}

//! Single-layer perceptron: weight vector, bias and step activation.

pub mod trainer;

use num_traits::Float;
use rand::distributions::uniform::SampleUniform;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub use trainer::{EpochStats, Trainer, TrainingHistory};

// --- Helper for dot product ---
fn dot_product_generic<F: Float>(a: &[F], b: &[F]) -> F {
    a.iter()
        .zip(b.iter())
        .fold(F::zero(), |acc, (&x, &y)| acc + x * y)
}

/// Step activation: maps a net input to class `1` when it is `>= 0`, else `0`.
pub fn step<F: Float>(net_input: F) -> u8 {
    if net_input >= F::zero() { 1 } else { 0 }
}

/// A binary linear classifier `classify(x) = step(w · x + b)`.
///
/// The number of weights is fixed when the perceptron is built; nothing in the
/// public API can change it afterwards. Parameters are only mutated by
/// [`Trainer::update`].
#[derive(Debug, Clone, PartialEq)]
pub struct Perceptron<F: Float> {
    weights: Vec<F>,
    bias: F,
}

impl<F: Float> Perceptron<F> {
    /// Builds a perceptron from explicit parameters.
    ///
    /// # Panics
    /// Panics if `weights` is empty.
    pub fn new(weights: Vec<F>, bias: F) -> Self {
        if weights.is_empty() {
            panic!("A perceptron needs at least one weight.");
        }
        Perceptron { weights, bias }
    }

    /// All-zero weights and bias.
    pub fn zeros(n_features: usize) -> Self {
        Self::new(vec![F::zero(); n_features], F::zero())
    }

    pub fn weights(&self) -> &[F] {
        &self.weights
    }

    pub fn bias(&self) -> F {
        self.bias
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    /// Weighted sum of `features` plus the bias.
    ///
    /// `features.len()` must equal [`n_features`](Self::n_features); this is
    /// checked in debug builds only; `Trainer` validates whole datasets up front.
    pub fn net_input(&self, features: &[F]) -> F {
        debug_assert_eq!(
            features.len(),
            self.weights.len(),
            "feature vector length must match the weight count"
        );
        dot_product_generic(&self.weights, features) + self.bias
    }

    /// Predicted class (`0` or `1`) for `features`.
    pub fn classify(&self, features: &[F]) -> u8 {
        step(self.net_input(features))
    }

    /// Moves every weight by `delta * features[i]` and the bias by `delta`.
    pub(crate) fn nudge(&mut self, features: &[F], delta: F) {
        for (w, &x) in self.weights.iter_mut().zip(features.iter()) {
            *w = *w + delta * x;
        }
        self.bias = self.bias + delta;
    }
}

impl<F: Float + SampleUniform> Perceptron<F> {
    /// Draws each weight, then the bias, independently from `Uniform[-1, 1)`.
    ///
    /// The caller owns the random source; seed it once per process (or per
    /// test) and pass it to every initialization.
    ///
    /// # Panics
    /// Panics if `n_features` is 0.
    pub fn random<R: Rng + ?Sized>(n_features: usize, rng: &mut R) -> Self {
        let uniform = Uniform::new(-F::one(), F::one());
        let weights = (0..n_features).map(|_| uniform.sample(rng)).collect();
        let bias = uniform.sample(rng);
        Self::new(weights, bias)
    }

    /// Reproducible random initialization from a fixed seed.
    pub fn seeded(n_features: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::random(n_features, &mut rng)
    }
}

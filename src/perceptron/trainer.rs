//! Online perceptron training: per-sample update rule and the epoch loop.

use std::fmt::{self, Display};

use log::debug;
use num_traits::Float;

use super::Perceptron;
use crate::common_types::Sample;
use crate::error::PerceptronError;

/// Counters for one pass over the dataset.
///
/// `misclassified` counts samples whose prediction was wrong *before* their
/// own update, so accuracy reflects the model as it evolved during the epoch,
/// not the model at the end of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub misclassified: usize,
    pub samples: usize,
}

impl EpochStats {
    /// `1 - misclassified / samples`.
    pub fn accuracy(&self) -> f64 {
        1.0 - self.misclassified as f64 / self.samples as f64
    }
}

impl Display for EpochStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Epoch: {} | Accuracy: {:.2}% | Misclassified: {}",
            self.epoch,
            self.accuracy() * 100.0,
            self.misclassified
        )
    }
}

/// Per-epoch statistics of a training run, in epoch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainingHistory {
    epochs: Vec<EpochStats>,
}

impl TrainingHistory {
    pub fn record(&mut self, stats: EpochStats) {
        self.epochs.push(stats);
    }

    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EpochStats> {
        self.epochs.iter()
    }

    pub fn last(&self) -> Option<&EpochStats> {
        self.epochs.last()
    }

    /// First epoch that finished without a single misclassification.
    pub fn first_perfect_epoch(&self) -> Option<usize> {
        self.epochs
            .iter()
            .find(|s| s.misclassified == 0)
            .map(|s| s.epoch)
    }
}

/// Applies the perceptron learning rule with a fixed learning rate.
#[derive(Debug, Clone, Copy)]
pub struct Trainer<F: Float> {
    learning_rate: F,
}

impl<F: Float> Trainer<F> {
    /// # Panics
    /// Panics if `learning_rate` is negative, NaN or infinite.
    pub fn new(learning_rate: F) -> Self {
        if !learning_rate.is_finite() || learning_rate < F::zero() {
            panic!("Learning rate must be finite and non-negative.");
        }
        Trainer { learning_rate }
    }

    pub fn learning_rate(&self) -> F {
        self.learning_rate
    }

    /// Applies the learning rule for one sample and returns the error
    /// `target - prediction` (`-1`, `0` or `1`).
    ///
    /// A correct prediction (error 0) never touches the model. Otherwise
    /// `w[i] += lr * error * x[i]` and `b += lr * error`.
    pub fn update(&self, perceptron: &mut Perceptron<F>, features: &[F], target: u8) -> i8 {
        let prediction = perceptron.classify(features);
        let error = target as i8 - prediction as i8;
        if error != 0 {
            let delta = if error > 0 {
                self.learning_rate
            } else {
                -self.learning_rate
            };
            perceptron.nudge(features, delta);
        }
        error
    }

    /// One left-to-right pass over `dataset`, updating after every sample.
    ///
    /// # Errors
    /// Returns a [`PerceptronError`] if the dataset is empty, or if a sample
    /// has the wrong feature count or a label outside `{0, 1}`.
    pub fn run_epoch(
        &self,
        perceptron: Perceptron<F>,
        dataset: &[Sample<F>],
    ) -> Result<(Perceptron<F>, EpochStats), PerceptronError> {
        validate_dataset(&perceptron, dataset)?;
        Ok(self.epoch_unchecked(perceptron, dataset, 1))
    }

    /// Runs exactly `max_epochs` epochs. There is no early stopping: a run
    /// that reaches zero misclassifications keeps going (and stays at zero).
    ///
    /// # Errors
    /// Same preconditions as [`run_epoch`](Self::run_epoch), checked once
    /// before the first epoch.
    pub fn train(
        &self,
        perceptron: Perceptron<F>,
        dataset: &[Sample<F>],
        max_epochs: usize,
    ) -> Result<(Perceptron<F>, TrainingHistory), PerceptronError> {
        self.train_with_observer(perceptron, dataset, max_epochs, |_, _| {})
    }

    /// Like [`train`](Self::train), handing the current model and the epoch's
    /// statistics to `observer` after every epoch.
    pub fn train_with_observer<O>(
        &self,
        mut perceptron: Perceptron<F>,
        dataset: &[Sample<F>],
        max_epochs: usize,
        mut observer: O,
    ) -> Result<(Perceptron<F>, TrainingHistory), PerceptronError>
    where
        O: FnMut(&Perceptron<F>, &EpochStats),
    {
        validate_dataset(&perceptron, dataset)?;

        let mut history = TrainingHistory::default();
        for epoch in 1..=max_epochs {
            let (next, stats) = self.epoch_unchecked(perceptron, dataset, epoch);
            perceptron = next;
            debug!(
                "epoch {epoch}: misclassified={} accuracy={:.4}",
                stats.misclassified,
                stats.accuracy()
            );
            observer(&perceptron, &stats);
            history.record(stats);
        }
        Ok((perceptron, history))
    }

    fn epoch_unchecked(
        &self,
        mut perceptron: Perceptron<F>,
        dataset: &[Sample<F>],
        epoch: usize,
    ) -> (Perceptron<F>, EpochStats) {
        let misclassified = dataset
            .iter()
            .filter(|s| self.update(&mut perceptron, &s.features, s.label) != 0)
            .count();
        let stats = EpochStats {
            epoch,
            misclassified,
            samples: dataset.len(),
        };
        (perceptron, stats)
    }
}

/// Checks that `dataset` can be fed to `perceptron`.
pub fn validate_dataset<F: Float>(
    perceptron: &Perceptron<F>,
    dataset: &[Sample<F>],
) -> Result<(), PerceptronError> {
    if dataset.is_empty() {
        return Err(PerceptronError::EmptyDataset);
    }
    let expected = perceptron.n_features();
    for (index, sample) in dataset.iter().enumerate() {
        if sample.features.len() != expected {
            return Err(PerceptronError::FeatureCountMismatch {
                index,
                expected,
                got: sample.features.len(),
            });
        }
        if sample.label > 1 {
            return Err(PerceptronError::InvalidLabel {
                index,
                label: sample.label,
            });
        }
    }
    Ok(())
}

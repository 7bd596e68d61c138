//! Binary linear classification with the perceptron learning rule.
//!
//! The core is [`Perceptron`] (weights, bias, step activation) and
//! [`Trainer`] (online update rule and epoch loop). Dataset generation/CSV
//! I/O ([`data`]) and boundary rendering ([`render`]) sit around it and are
//! never called from the training loop.

pub mod common_types;
pub mod config;
pub mod data;
pub mod error;
pub mod perceptron;
pub mod render;

#[cfg(feature = "python")]
mod python;

pub use common_types::{DataPoint, Sample};
pub use error::{DatasetError, PerceptronError};
pub use perceptron::{EpochStats, Perceptron, Trainer, TrainingHistory};

//! Python bindings, built with the `python` feature.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::common_types::DataPoint;
use crate::perceptron::{Perceptron, Trainer};

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyErr::new::<PyValueError, _>(e.to_string())
}

/// Python-facing wrapper around `Perceptron<f64>`.
#[pyclass(name = "Perceptron")]
struct PyPerceptron {
    inner: Perceptron<f64>,
}

#[pymethods]
impl PyPerceptron {
    #[new]
    #[pyo3(signature = (n_features, seed = None))]
    fn new(n_features: usize, seed: Option<u64>) -> PyResult<Self> {
        if n_features == 0 {
            return Err(value_error("n_features must be greater than 0."));
        }
        let inner = match seed {
            Some(seed) => Perceptron::seeded(n_features, seed),
            None => Perceptron::random(n_features, &mut rand::thread_rng()),
        };
        Ok(PyPerceptron { inner })
    }

    #[getter]
    fn weights(&self) -> Vec<f64> {
        self.inner.weights().to_vec()
    }

    #[getter]
    fn bias(&self) -> f64 {
        self.inner.bias()
    }

    fn net_input(&self, features: Vec<f64>) -> PyResult<f64> {
        self.check_len(&features)?;
        Ok(self.inner.net_input(&features))
    }

    fn classify(&self, features: Vec<f64>) -> PyResult<u8> {
        self.check_len(&features)?;
        Ok(self.inner.classify(&features))
    }

    /// Trains in place and returns `[(epoch, misclassified, accuracy), ...]`.
    fn train(
        &mut self,
        features: Vec<Vec<f64>>,
        labels: Vec<u8>,
        learning_rate: f64,
        max_epochs: usize,
    ) -> PyResult<Vec<(usize, usize, f64)>> {
        if features.len() != labels.len() {
            return Err(value_error(format!(
                "got {} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }
        if !learning_rate.is_finite() || learning_rate < 0.0 {
            return Err(value_error("learning_rate must be finite and non-negative."));
        }
        let dataset: Vec<_> = features
            .into_iter()
            .zip(labels)
            .map(|(f, l)| DataPoint::new(f, l))
            .collect();

        let trainer = Trainer::new(learning_rate);
        let (trained, history) = trainer
            .train(self.inner.clone(), &dataset, max_epochs)
            .map_err(value_error)?;
        self.inner = trained;
        Ok(history
            .iter()
            .map(|s| (s.epoch, s.misclassified, s.accuracy()))
            .collect())
    }

    fn __repr__(&self) -> String {
        format!(
            "Perceptron(weights={:?}, bias={})",
            self.inner.weights(),
            self.inner.bias()
        )
    }
}

impl PyPerceptron {
    fn check_len(&self, features: &[f64]) -> PyResult<()> {
        if features.len() != self.inner.n_features() {
            return Err(value_error(format!(
                "expected {} features, got {}",
                self.inner.n_features(),
                features.len()
            )));
        }
        Ok(())
    }
}

/// The name of this function must match the `lib.name` in `Cargo.toml`.
#[pymodule]
fn linear_perceptron(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPerceptron>()?;
    Ok(())
}

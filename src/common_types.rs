//! Sample types shared by the model, the trainer and the dataset shims.

/// A single labeled sample: a feature vector plus its class label.
///
/// - `F`: The type of the features (e.g., `f64`, `f32`).
/// - `L`: The type of the label. The perceptron trainer uses `u8` restricted to `{0, 1}`.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint<F, L> {
    pub features: Vec<F>,
    pub label: L,
}

impl<F, L> DataPoint<F, L> {
    pub fn new(features: Vec<F>, label: L) -> Self {
        DataPoint { features, label }
    }

    /// Number of features (dimensionality) of this sample.
    pub fn n_features(&self) -> usize {
        self.features.len()
    }
}

/// A binary-labeled sample as consumed by the perceptron trainer.
pub type Sample<F> = DataPoint<F, u8>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_point_new() {
        let dp = DataPoint::new(vec![0.25_f64, -0.5], 1_u8);
        assert_eq!(dp.features, vec![0.25, -0.5]);
        assert_eq!(dp.label, 1);
        assert_eq!(dp.n_features(), 2);
    }

    #[test]
    fn test_sample_alias_is_binary_data_point() {
        let s: Sample<f32> = DataPoint { features: vec![1.0], label: 0 };
        assert_eq!(s.n_features(), 1);
        assert_eq!(s.label, 0_u8);
    }
}

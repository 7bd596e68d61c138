//! Error types for training preconditions and dataset I/O.

use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// Precondition violations detected at the trainer boundary.
///
/// These are caller bugs: the dataset handed to `run_epoch`/`train` does not
/// match the model it is meant to train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PerceptronError {
    /// The dataset contains no samples, so accuracy is undefined.
    EmptyDataset,

    /// A sample's feature vector length differs from the model's weight count.
    FeatureCountMismatch {
        /// Position of the offending sample in the dataset.
        index: usize,
        /// The model's weight count.
        expected: usize,
        /// The sample's feature count.
        got: usize,
    },

    /// A sample's label is not 0 or 1.
    InvalidLabel { index: usize, label: u8 },
}

impl Display for PerceptronError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerceptronError::EmptyDataset => write!(f, "dataset is empty"),
            PerceptronError::FeatureCountMismatch {
                index,
                expected,
                got,
            } => write!(
                f,
                "sample {index} has {got} features, the perceptron expects {expected}"
            ),
            PerceptronError::InvalidLabel { index, label } => {
                write!(f, "sample {index} has label {label}, expected 0 or 1")
            }
        }
    }
}

impl Error for PerceptronError {}

/// Errors produced while generating, writing or loading a dataset file.
#[derive(Debug)]
pub enum DatasetError {
    /// The underlying reader or writer failed.
    Io(io::Error),

    /// A row could not be parsed into features and a label.
    MalformedRow {
        /// 1-based line number in the file, header included.
        line: usize,
        reason: String,
    },

    /// A row parsed but its label is not 0 or 1.
    InvalidLabel { line: usize, label: i64 },
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(e) => write!(f, "dataset i/o error: {e}"),
            DatasetError::MalformedRow { line, reason } => {
                write!(f, "malformed row at line {line}: {reason}")
            }
            DatasetError::InvalidLabel { line, label } => {
                write!(f, "invalid label {label} at line {line}, expected 0 or 1")
            }
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DatasetError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DatasetError {
    fn from(e: io::Error) -> Self {
        DatasetError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perceptron_error_display() {
        let e = PerceptronError::FeatureCountMismatch {
            index: 3,
            expected: 2,
            got: 5,
        };
        assert_eq!(
            e.to_string(),
            "sample 3 has 5 features, the perceptron expects 2"
        );
        assert_eq!(PerceptronError::EmptyDataset.to_string(), "dataset is empty");
    }

    #[test]
    fn test_dataset_error_from_io_keeps_source() {
        let e: DatasetError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(e, DatasetError::Io(_)));
        assert!(e.source().is_some());
    }
}

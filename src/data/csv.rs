//! `x,y,label` CSV format: a header row followed by one sample per line.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::info;
use rand::Rng;

use super::generate_clusters;
use crate::common_types::{DataPoint, Sample};
use crate::error::DatasetError;

fn header(n_features: usize) -> String {
    let mut columns: Vec<String> = if n_features == 2 {
        vec!["x".into(), "y".into()]
    } else {
        (0..n_features).map(|i| format!("x{i}")).collect()
    };
    columns.push("label".into());
    columns.join(",")
}

/// Writes `samples` as CSV. The header is taken from the first sample's
/// dimensionality (`x,y,label` for 2-D data).
pub fn write_csv<W: Write>(mut writer: W, samples: &[Sample<f64>]) -> Result<(), DatasetError> {
    let n_features = samples.first().map_or(2, |s| s.n_features());
    writeln!(writer, "{}", header(n_features))?;
    for s in samples {
        for v in &s.features {
            write!(writer, "{v:.6},")?;
        }
        writeln!(writer, "{}", s.label)?;
    }
    writer.flush()?;
    Ok(())
}

/// Parses samples with `n_features` features each, skipping the header row and
/// blank lines. Reading stops after `max_samples` rows when given.
pub fn read_csv<R: BufRead>(
    reader: R,
    n_features: usize,
    max_samples: Option<usize>,
) -> Result<Vec<Sample<f64>>, DatasetError> {
    let limit = max_samples.unwrap_or(usize::MAX);
    let mut samples = Vec::new();

    for (idx, line) in reader.lines().enumerate().skip(1) {
        if samples.len() >= limit {
            break;
        }
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        samples.push(parse_row(trimmed, idx + 1, n_features)?);
    }
    Ok(samples)
}

fn parse_row(row: &str, line: usize, n_features: usize) -> Result<Sample<f64>, DatasetError> {
    let fields: Vec<&str> = row.split(',').map(str::trim).collect();
    if fields.len() != n_features + 1 {
        return Err(DatasetError::MalformedRow {
            line,
            reason: format!("expected {} columns, found {}", n_features + 1, fields.len()),
        });
    }

    let features = fields[..n_features]
        .iter()
        .map(|f| {
            f.parse::<f64>().map_err(|e| DatasetError::MalformedRow {
                line,
                reason: format!("feature {f:?}: {e}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let raw_label = fields[n_features];
    let label = raw_label
        .parse::<i64>()
        .map_err(|e| DatasetError::MalformedRow {
            line,
            reason: format!("label {raw_label:?}: {e}"),
        })?;
    match label {
        0 | 1 => Ok(DataPoint::new(features, label as u8)),
        _ => Err(DatasetError::InvalidLabel { line, label }),
    }
}

/// Generates `n_samples` clustered points and writes them to `path`.
pub fn generate_csv_file<P, R>(
    path: P,
    n_samples: usize,
    rng: &mut R,
) -> Result<Vec<Sample<f64>>, DatasetError>
where
    P: AsRef<Path>,
    R: Rng + ?Sized,
{
    let samples = generate_clusters(n_samples, rng);
    let file = File::create(&path)?;
    write_csv(BufWriter::new(file), &samples)?;
    info!("dataset generated: {}", path.as_ref().display());
    Ok(samples)
}

/// Loads a CSV dataset from `path`. See [`read_csv`].
pub fn load_csv_file<P: AsRef<Path>>(
    path: P,
    n_features: usize,
    max_samples: Option<usize>,
) -> Result<Vec<Sample<f64>>, DatasetError> {
    let file = File::open(&path)?;
    let samples = read_csv(BufReader::new(file), n_features, max_samples)?;
    info!(
        "loaded {} samples from {}",
        samples.len(),
        path.as_ref().display()
    );
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_write_csv_format() {
        let samples = vec![
            DataPoint::new(vec![-0.5, -0.25], 0),
            DataPoint::new(vec![0.125, 0.75], 1),
        ];
        let mut out = Vec::new();
        write_csv(&mut out, &samples).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "x,y,label\n-0.500000,-0.250000,0\n0.125000,0.750000,1\n"
        );
    }

    #[test]
    fn test_header_for_other_dimensions() {
        assert_eq!(header(3), "x0,x1,x2,label");
        assert_eq!(header(2), "x,y,label");
    }

    #[test]
    fn test_read_csv_skips_header_and_blank_lines() {
        let input = "x,y,label\n0.1,0.2,1\n\n-0.3, -0.4 ,0\n";
        let samples = read_csv(Cursor::new(input), 2, None).unwrap();
        assert_eq!(
            samples,
            vec![
                DataPoint::new(vec![0.1, 0.2], 1),
                DataPoint::new(vec![-0.3, -0.4], 0),
            ]
        );
    }

    #[test]
    fn test_read_csv_respects_max_samples() {
        let input = "x,y,label\n0.1,0.1,1\n0.2,0.2,1\n0.3,0.3,1\n";
        let samples = read_csv(Cursor::new(input), 2, Some(2)).unwrap();
        assert_eq!(samples.len(), 2);
    }

    #[test]
    fn test_read_csv_empty_input() {
        assert!(read_csv(Cursor::new(""), 2, None).unwrap().is_empty());
    }

    #[test]
    fn test_read_csv_wrong_column_count() {
        let err = read_csv(Cursor::new("x,y,label\n0.1,1\n"), 2, None).unwrap_err();
        assert!(matches!(err, DatasetError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn test_read_csv_bad_number() {
        let err = read_csv(Cursor::new("x,y,label\n0.1,abc,1\n"), 2, None).unwrap_err();
        match err {
            DatasetError::MalformedRow { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("abc"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_csv_rejects_non_binary_label() {
        let err = read_csv(Cursor::new("x,y,label\n0.1,0.2,1\n0.1,0.2,3\n"), 2, None).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidLabel { line: 3, label: 3 }));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_csv_file("/nonexistent/dir/perceptron.csv", 2, None).unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }
}

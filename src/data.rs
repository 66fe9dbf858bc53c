//! Observation ingestion
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use twill_utils::{parse_result, Matrix};

use crate::error::DataError;

/// Build an observation matrix from row vectors, checking that the rows are
/// rectangular
pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Matrix<f64>, DataError> {
    if rows.is_empty() || rows[0].is_empty() {
        return Err(DataError::Empty);
    }

    let n_cols = rows[0].len();
    for (ix, row) in rows.iter().enumerate() {
        if row.len() != n_cols {
            return Err(DataError::RaggedRow {
                row: ix,
                expected: n_cols,
                found: row.len(),
            });
        }
    }

    Ok(Matrix::from_vecs(rows))
}

/// Read an N×D observation matrix from a csv file.
///
/// When `header` is set the first line is skipped. Cells are parsed as
/// `f64`; empty or unparseable cells are ingestion errors, since the sampler has
/// no notion of missing data.
pub fn read_csv<P: AsRef<Path>>(
    path: P,
    header: bool,
) -> Result<Matrix<f64>, DataError> {
    let reader = BufReader::new(File::open(path)?);
    read_csv_from(reader, header)
}

fn read_csv_from<R: BufRead>(
    reader: R,
    header: bool,
) -> Result<Matrix<f64>, DataError> {
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (ix, line) in reader.lines().enumerate().skip(usize::from(header)) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let row: Vec<f64> = line
            .split(',')
            .enumerate()
            .map(|(col, cell)| {
                let cell = cell.trim();
                parse_result::<f64>(cell)
                    .ok()
                    .flatten()
                    .ok_or_else(|| DataError::InvalidCell {
                        row: ix,
                        col,
                        value: cell.to_string(),
                    })
            })
            .collect::<Result<_, _>>()?;

        rows.push(row);
    }

    from_rows(rows)
}

//! Dense distance matrix (comma-separated).
//!
//! Layout: a header row with a blank corner cell followed by sample ids, then
//! one row per sample: its id followed by one distance per column.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use super::na::is_na;
use super::staged::{write_staged, StagedFile};
use crate::error::{ClusterError, ClusterResult};
use crate::matrix::DistanceMatrix;

/// Read a dense matrix from a CSV file. Missing cells are kept as NaN.
pub fn read_dense_matrix(path: &Path) -> ClusterResult<DistanceMatrix> {
    log::info!("Reading distance matrix from {}", path.display());
    let file = File::open(path).map_err(|e| ClusterError::io(path, e))?;
    read_matrix(file, &path.display().to_string(), Some(path))
}

/// Read a dense matrix from any CSV source.
pub fn read_dense_matrix_from<R: Read>(reader: R) -> ClusterResult<DistanceMatrix> {
    read_matrix(reader, "distance matrix input", None)
}

fn read_matrix<R: Read>(
    reader: R,
    context: &str,
    path: Option<&Path>,
) -> ClusterResult<DistanceMatrix> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| ClusterError::csv(context, path, e))?
        .clone();
    let columns: Vec<&str> = headers.iter().skip(1).collect();
    let n = columns.len();

    let mut samples = Vec::with_capacity(n);
    let mut values = Vec::with_capacity(n * n);

    for record in reader.records() {
        let record = record.map_err(|e| ClusterError::csv(context, path, e))?;
        let line = record.position().map_or(0, |p| p.line());
        if record.len() != n + 1 {
            return Err(ClusterError::malformed(
                context,
                format!(
                    "line {line}: expected {} fields (sample id + {n} distances), got {}",
                    n + 1,
                    record.len()
                ),
            ));
        }

        let sample = &record[0];
        for (col, cell) in record.iter().skip(1).enumerate() {
            let value = if is_na(cell) {
                f64::NAN
            } else {
                cell.trim().parse::<f64>().map_err(|_| {
                    ClusterError::malformed(
                        context,
                        format!(
                            "line {line}: could not convert value '{cell}' for ('{sample}', '{}') to a number",
                            columns[col]
                        ),
                    )
                })?
            };
            values.push(value);
        }
        samples.push(sample.to_string());
    }

    if samples.len() != n {
        return Err(ClusterError::malformed(
            context,
            format!(
                "matrix must be square: {n} column(s) but {} row(s)",
                samples.len()
            ),
        ));
    }
    if samples.iter().zip(&columns).any(|(row, col)| row != col) {
        log::warn!("Row and column sample ids differ in {context}; using row ids");
    }

    log::info!("Read {n}x{n} distance matrix");
    DistanceMatrix::from_square(samples, values)
}

/// Write a dense matrix to a CSV file.
pub fn write_dense_matrix(path: &Path, matrix: &DistanceMatrix) -> ClusterResult<()> {
    let mut buf = Vec::new();
    write_dense_matrix_to(&mut buf, matrix)?;
    write_staged(&[StagedFile::new(path, buf)])?;
    log::info!("Wrote distance matrix to {}", path.display());
    Ok(())
}

/// Write a dense matrix as CSV to any sink.
pub fn write_dense_matrix_to<W: Write>(writer: W, matrix: &DistanceMatrix) -> ClusterResult<()> {
    let context = "distance matrix output";
    let mut writer = WriterBuilder::new().from_writer(writer);

    let header = std::iter::once("").chain(matrix.samples().iter().map(String::as_str));
    writer
        .write_record(header)
        .map_err(|e| ClusterError::output(context, e))?;

    let n = matrix.len();
    for (i, sample) in matrix.samples().iter().enumerate() {
        let row = std::iter::once(sample.clone())
            .chain((0..n).map(|j| format_distance(matrix.get(i, j))));
        writer
            .write_record(row)
            .map_err(|e| ClusterError::output(context, e))?;
    }

    writer
        .flush()
        .map_err(|e| ClusterError::output(context, e))?;
    Ok(())
}

/// Integral values keep one decimal ("5.0"); NaN is written as an empty cell.
fn format_distance(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else if v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}

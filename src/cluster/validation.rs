//! Validation helpers for clustering algorithms.

use numr::dtype::DType;
use numr::error::{Error, Result};

/// Validate distance dtype (linkage runs in F64).
pub fn validate_distance_dtype(dtype: DType, op: &'static str) -> Result<()> {
    match dtype {
        DType::F64 => Ok(()),
        _ => Err(Error::UnsupportedDType { dtype, op }),
    }
}

/// Validate that a condensed distance vector matches `n` observations.
pub fn validate_condensed(shape: &[usize], n: usize, op: &'static str) -> Result<()> {
    if n < 2 {
        return Err(Error::InvalidArgument {
            arg: "n",
            reason: format!("{op} requires at least 2 observations, got {n}"),
        });
    }
    let expected = n * (n - 1) / 2;
    if shape.len() != 1 || shape[0] != expected {
        return Err(Error::InvalidArgument {
            arg: "distances",
            reason: format!(
                "{op} requires a condensed vector of length {expected} for n={n}, got shape {shape:?}"
            ),
        });
    }
    Ok(())
}

/// Validate that every distance is finite.
pub fn validate_finite(values: &[f64], op: &'static str) -> Result<()> {
    if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
        return Err(Error::InvalidArgument {
            arg: "distances",
            reason: format!(
                "{op} requires finite distances, got {} at position {pos}",
                values[pos]
            ),
        });
    }
    Ok(())
}

/// Validate a linkage matrix shape [n-1, 4].
pub fn validate_linkage(shape: &[usize], op: &'static str) -> Result<()> {
    if shape.len() != 2 || shape[1] != 4 {
        return Err(Error::InvalidArgument {
            arg: "z",
            reason: format!("{op} requires a linkage matrix [n-1, 4], got {shape:?}"),
        });
    }
    Ok(())
}

/// Validate a distance cut threshold (finite, >= 0).
pub fn validate_threshold(t: f64, op: &'static str) -> Result<()> {
    if !t.is_finite() || t < 0.0 {
        return Err(Error::InvalidArgument {
            arg: "threshold",
            reason: format!("{op} requires a finite threshold >= 0, got {t}"),
        });
    }
    Ok(())
}

//! Cluster assignment output (comma-separated).

use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use super::staged::{write_staged, StagedFile};
use crate::error::{ClusterError, ClusterResult};
use crate::extract::ClusterAssignment;

const HEADER: [&str; 2] = ["Sample", "Cluster"];

/// Write assignments to a CSV file, replacing it only once fully written.
///
/// The header is written even when there are no assignments.
pub fn write_assignments(path: &Path, assignments: &[ClusterAssignment]) -> ClusterResult<()> {
    let mut buf = Vec::new();
    write_assignments_to(&mut buf, assignments)?;
    write_staged(&[StagedFile::new(path, buf)])?;
    log::debug!(
        "Wrote {} assignment(s) to {}",
        assignments.len(),
        path.display()
    );
    Ok(())
}

/// Write assignments as CSV to any sink.
pub fn write_assignments_to<W: Write>(
    writer: W,
    assignments: &[ClusterAssignment],
) -> ClusterResult<()> {
    let context = "cluster output";
    // Header is written by hand so an empty result still gets one.
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer
        .write_record(HEADER)
        .map_err(|e| ClusterError::output(context, e))?;
    for assignment in assignments {
        writer
            .serialize(assignment)
            .map_err(|e| ClusterError::output(context, e))?;
    }
    writer
        .flush()
        .map_err(|e| ClusterError::output(context, e))?;
    Ok(())
}

//! All-or-nothing writes of several output files.
//!
//! Every file is first written to a temporary sibling in its target
//! directory. Targets are only replaced once every temporary file has been
//! written, so a failure while staging leaves the targets untouched.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{ClusterError, ClusterResult};

/// One rendered output file waiting to be written.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

impl StagedFile {
    pub fn new(path: impl Into<PathBuf>, contents: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            contents,
        }
    }
}

/// Write every file or none of them.
///
/// If replacing a target fails after earlier targets were already moved
/// into place, those earlier targets are removed again.
pub fn write_staged(files: &[StagedFile]) -> ClusterResult<()> {
    let mut temps = Vec::with_capacity(files.len());
    for file in files {
        temps.push(stage(file)?);
    }

    let mut committed: Vec<&Path> = Vec::with_capacity(files.len());
    for (file, temp) in files.iter().zip(temps) {
        if let Err(e) = temp.persist(&file.path) {
            for path in committed {
                if let Err(cleanup) = std::fs::remove_file(path) {
                    log::warn!("Could not remove {}: {}", path.display(), cleanup);
                }
            }
            return Err(ClusterError::io(&file.path, e.error));
        }
        committed.push(&file.path);
    }
    Ok(())
}

fn stage(file: &StagedFile) -> ClusterResult<NamedTempFile> {
    let dir = match file.path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir).map_err(|e| ClusterError::io(&file.path, e))?;
    temp.write_all(&file.contents)
        .and_then(|()| temp.flush())
        .map_err(|e| ClusterError::io(&file.path, e))?;
    Ok(temp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_staged_writes_every_file() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        write_staged(&[
            StagedFile::new(&a, b"one\n".to_vec()),
            StagedFile::new(&b, b"two\n".to_vec()),
        ])
        .unwrap();
        assert_eq!(std::fs::read_to_string(&a).unwrap(), "one\n");
        assert_eq!(std::fs::read_to_string(&b).unwrap(), "two\n");
    }

    #[test]
    fn test_write_staged_leaves_nothing_when_one_target_is_unwritable() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("missing").join("b.csv");
        let err = write_staged(&[
            StagedFile::new(&a, b"one\n".to_vec()),
            StagedFile::new(&b, b"two\n".to_vec()),
        ])
        .unwrap_err();

        assert!(matches!(err, ClusterError::Io { ref path, .. } if path == &b));
        assert!(!a.exists());
        // no stray temporaries either
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_write_staged_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.csv");
        std::fs::write(&a, "old").unwrap();
        write_staged(&[StagedFile::new(&a, b"new".to_vec())]).unwrap();
        assert_eq!(std::fs::read_to_string(&a).unwrap(), "new");
    }
}

//! Atomic file output: write to a tempfile, rename into place on success.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// A staged output file. Nothing appears at the target path until
/// [`AtomicFile::commit`]; an abandoned sink leaves no partial file behind.
pub(crate) struct AtomicFile {
    target: PathBuf,
    tmp: NamedTempFile,
}

impl AtomicFile {
    /// Stage a write to `target`, creating parent directories as needed.
    /// Any existing file at `target` is replaced on commit.
    pub(crate) fn create(target: &Path) -> Result<Self> {
        if let Some(parent) = parent_dir(target) {
            fs::create_dir_all(parent)
                .with_context(|| format!("[io] create dir {}", parent.display()))?;
        }
        let tmp = NamedTempFile::new_in(parent_dir(target).unwrap_or(Path::new(".")))
            .context("[io] create temp file")?;

        Ok(Self { target: target.to_path_buf(), tmp })
    }

    /// Rename the staged file into place.
    pub(crate) fn commit(self) -> Result<()> {
        let Self { target, tmp } = self;
        tmp.as_file().sync_all().ok(); // best-effort fsync
        tmp.persist(&target)
            .with_context(|| format!("[io] rename to {}", target.display()))?;
        if let Some(dir) = parent_dir(&target) {
            let _ = File::open(dir).and_then(|f| f.sync_all());
        }
        Ok(())
    }
}

impl Write for AtomicFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.tmp.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.tmp.flush()
    }
}

fn parent_dir(target: &Path) -> Option<&Path> {
    target.parent().filter(|parent| !parent.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_renames_into_place() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.csv");

        let mut sink = AtomicFile::create(&target).unwrap();
        sink.write_all(b"a,b\n1,2\n").unwrap();
        assert!(!target.exists());

        sink.commit().unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"a,b\n1,2\n");
    }

    #[test]
    fn abandoned_sink_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.csv");

        let mut sink = AtomicFile::create(&target).unwrap();
        sink.write_all(b"partial").unwrap();
        drop(sink);

        assert!(!target.exists());
    }

    #[test]
    fn commit_replaces_an_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.csv");
        fs::write(&target, b"old").unwrap();

        let mut sink = AtomicFile::create(&target).unwrap();
        sink.write_all(b"new").unwrap();
        sink.commit().unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"new");
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/deep/out.csv");

        let mut sink = AtomicFile::create(&target).unwrap();
        sink.write_all(b"x").unwrap();
        sink.commit().unwrap();

        assert!(target.exists());
    }
}

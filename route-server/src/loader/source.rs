//! Memory-mapped route data files.

use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use memmap2::Mmap;

/// Read-only view of a route data file.
///
/// The mapping is released when the value is dropped, so the loader holds it
/// only for the duration of the parse, on success and failure alike.
pub(crate) enum MappedSource {
    Mapped(Mmap),
    /// Zero-length files are not mapped.
    Empty,
}

impl MappedSource {
    /// Open and map the file at `path`.
    pub(crate) fn open(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Ok(MappedSource::Empty);
        }

        // SAFETY: the mapping is read-only and lives only while the file is
        // parsed; route data files are not modified while being loaded.
        let mmap = unsafe { Mmap::map(&file)? };
        #[cfg(unix)]
        mmap.advise(memmap2::Advice::Sequential)?;
        Ok(MappedSource::Mapped(mmap))
    }
}

impl Deref for MappedSource {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            MappedSource::Mapped(mmap) => &mmap[..],
            MappedSource::Empty => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn maps_file_contents() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"1\n0 1 2\n").unwrap();

        let source = MappedSource::open(file.path()).unwrap();
        assert_eq!(&*source, b"1\n0 1 2\n");
    }

    #[test]
    fn empty_file_is_not_mapped() {
        let file = NamedTempFile::new().unwrap();

        let source = MappedSource::open(file.path()).unwrap();
        assert!(matches!(source, MappedSource::Empty));
        assert!(source.is_empty());
    }

    #[test]
    fn missing_file_fails() {
        assert!(MappedSource::open(Path::new("/nonexistent/routes.txt")).is_err());
    }
}

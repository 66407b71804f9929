use crate::error::{Error, Result};
use memmap::Mmap;
use std::fs::File;
use std::path::Path;

/// A read-only text buffer holding one input file.
///
/// Files are memory mapped; the `Mem` variant keeps inputs that are already in memory.
pub enum Source {
    /// A memory buffer.
    Mem(Vec<u8>),
    /// A read-only memory mapped file.
    Mmap(Mmap),
}

impl Source {
    /// Maps the file at `path`.
    ///
    /// Failing to open the file is fatal for every caller, so the error carries the path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let open_error = |source| Error::Open {
            path: path.display().to_string(),
            source,
        };
        let file = File::open(path).map_err(open_error)?;
        let len = file.metadata().map_err(open_error)?.len();
        if len == 0 {
            // Zero-length maps are rejected by the OS.
            Ok(Source::Mem(vec![]))
        } else {
            Ok(Source::Mmap(
                unsafe { Mmap::map(&file) }.map_err(open_error)?,
            ))
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Source::Mem(vec) => vec.as_slice(),
            Source::Mmap(mmap) => &mmap[..],
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        std::str::from_utf8(self.as_bytes())
            .map_err(|e| Error::Format(format!("input is not valid UTF-8: {}", e)))
    }
}

impl From<String> for Source {
    fn from(s: String) -> Self {
        Source::Mem(s.into_bytes())
    }
}

impl From<&str> for Source {
    fn from(s: &str) -> Self {
        Source::Mem(s.as_bytes().to_vec())
    }
}

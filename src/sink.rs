use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

/// Append-only destinations for flushed log bytes.
///
/// The logger owns a [`FileSink`] for its whole life but only holds an open
/// [`AppendHandle`] for the duration of a single flush or size query. The
/// handle is closed by dropping it, so every exit path releases it.

/// An open, append-positioned view of the backing file.
pub trait AppendHandle {
    /// Current length of the file in bytes.
    fn len(&mut self) -> io::Result<u64>;

    /// Appends `bytes` and returns how many were accepted.
    ///
    /// A count smaller than `bytes.len()` is a short write; the caller treats
    /// it as a file error.
    fn append(&mut self, bytes: &[u8]) -> io::Result<usize>;
}

/// Something that can be (re)opened for appending.
pub trait FileSink {
    type Handle: AppendHandle;

    fn open_append(&mut self) -> io::Result<Self::Handle>;
}

/// A file on the local file system, created on first open.
#[derive(Debug, Clone)]
pub struct PathSink {
    path: PathBuf,
}

impl PathSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileSink for PathSink {
    type Handle = File;

    fn open_append(&mut self) -> io::Result<File> {
        OpenOptions::new().create(true).append(true).open(&self.path)
    }
}

impl AppendHandle for File {
    fn len(&mut self) -> io::Result<u64> {
        self.seek(SeekFrom::End(0))
    }

    fn append(&mut self, bytes: &[u8]) -> io::Result<usize> {
        let mut written = 0;
        while written < bytes.len() {
            match self.write(&bytes[written..]) {
                Ok(0) => break,
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(written)
    }
}

/// An in-memory "file" shared between the logger and its observers.
///
/// Clones share the same contents, so a test or an embedded host can keep a
/// clone and read back what the logger flushed.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    data: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from existing file contents.
    pub fn with_contents(initial: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Arc::new(Mutex::new(initial.into())),
        }
    }

    /// A copy of everything appended so far.
    pub fn contents(&self) -> Vec<u8> {
        self.data.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.data.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.lock().is_empty()
    }
}

/// Open handle onto a [`MemorySink`].
#[derive(Debug)]
pub struct MemoryHandle {
    data: Arc<Mutex<Vec<u8>>>,
}

impl FileSink for MemorySink {
    type Handle = MemoryHandle;

    fn open_append(&mut self) -> io::Result<MemoryHandle> {
        Ok(MemoryHandle {
            data: Arc::clone(&self.data),
        })
    }
}

impl AppendHandle for MemoryHandle {
    fn len(&mut self) -> io::Result<u64> {
        Ok(self.data.lock().len() as u64)
    }

    fn append(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.data.lock().extend_from_slice(bytes);
        Ok(bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_path_sink_appends_and_measures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sink.log");
        let mut sink = PathSink::new(&path);

        {
            let mut handle = sink.open_append().unwrap();
            assert_eq!(handle.len().unwrap(), 0);
            assert_eq!(handle.append(b"first ").unwrap(), 6);
        }
        {
            let mut handle = sink.open_append().unwrap();
            assert_eq!(handle.len().unwrap(), 6);
            assert_eq!(handle.append(b"second").unwrap(), 6);
            assert_eq!(handle.len().unwrap(), 12);
        }

        assert_eq!(fs::read(&path).unwrap(), b"first second");
    }

    #[test]
    fn test_path_sink_open_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PathSink::new(dir.path().join("missing").join("sink.log"));
        assert!(sink.open_append().is_err());
    }

    #[test]
    fn test_memory_sink_clones_share_contents() {
        let observer = MemorySink::with_contents(b"old".to_vec());
        let mut sink = observer.clone();

        let mut handle = sink.open_append().unwrap();
        assert_eq!(handle.len().unwrap(), 3);
        handle.append(b"+new").unwrap();
        drop(handle);

        assert_eq!(observer.contents(), b"old+new");
        assert_eq!(observer.len(), 7);
        assert!(!observer.is_empty());
    }
}

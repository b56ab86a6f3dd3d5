//! Size-rotated log file.
//!
//! When the active file grows past its limit it is shifted to `<name>.1`,
//! older backups move up by one (`.1` to `.2`, ...) and the oldest beyond the
//! retention count is removed.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Default size limit of the active file (10 MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of rotated backups kept next to the active file.
pub const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// The file is opened lazily on first write, so construction never fails.
/// `&FileWriter` implements [`Write`], which lets an `Arc<FileWriter>` serve
/// as a `tracing_subscriber` writer directly.
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            max_bytes: MAX_FILE_SIZE_BYTES,
            writer: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn write_chunk(&self, buf: &[u8]) -> io::Result<usize> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        if self.needs_rotation() {
            *writer = None;
            self.rotate_files()?;
        }

        let file = match writer.as_mut() {
            Some(file) => file,
            None => writer.insert(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.file_path)?,
            ),
        };

        file.write_all(buf)?;
        file.flush()?;
        Ok(buf.len())
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|metadata| metadata.len() > self.max_bytes)
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.file_path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate_files(&self) -> io::Result<()> {
        let oldest = self.backup_path(MAX_BACKUP_FILES);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..MAX_BACKUP_FILES).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        if self.file_path.exists() {
            fs::rename(&self.file_path, self.backup_path(1))?;
        }
        Ok(())
    }
}

impl Write for &FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_chunk(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn appends_lines() {
        let dir = TempDir::new().unwrap();
        let writer = FileWriter::new(dir.path().join("app.log"));
        writeln!(&writer, "first").unwrap();
        writeln!(&writer, "second").unwrap();
        assert_eq!(fs::read_to_string(writer.path()).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn rotates_and_keeps_bounded_backups() {
        let dir = TempDir::new().unwrap();
        let writer = FileWriter::new(dir.path().join("app.log")).with_max_bytes(4);

        for line in ["aaaaa\n", "bbbbb\n", "ccccc\n", "ddddd\n", "eeeee\n"] {
            (&writer).write_all(line.as_bytes()).unwrap();
        }

        assert_eq!(fs::read_to_string(writer.path()).unwrap(), "eeeee\n");
        assert_eq!(fs::read_to_string(writer.backup_path(1)).unwrap(), "ddddd\n");
        assert_eq!(fs::read_to_string(writer.backup_path(3)).unwrap(), "bbbbb\n");
        assert!(!writer.backup_path(4).exists());
    }
}

// src/file_manager.rs - G-code program output
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to write file '{}', file already exists", .0.display())]
    AlreadyExists(PathBuf),
    #[error("IO error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct FileManager {
    overwrite: bool,
}

impl FileManager {
    pub fn new(overwrite: bool) -> Self {
        Self { overwrite }
    }

    /// Write the program and return the number of bytes on disk.
    ///
    /// Without `overwrite` an existing file is left untouched and the write
    /// fails; `create_new` makes that check atomic with the open.
    pub fn write_gcode_file(&self, path: &Path, content: &str) -> Result<u64, FileError> {
        tracing::info!("Writing G-code file: {}", path.display());
        let io_err = |source| FileError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut options = fs::OpenOptions::new();
        options.write(true);
        if self.overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let mut file = options.open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                FileError::AlreadyExists(path.to_path_buf())
            } else {
                io_err(e)
            }
        })?;
        file.write_all(content.as_bytes()).map_err(io_err)?;
        file.flush().map_err(io_err)?;

        let size = fs::metadata(path).map_err(io_err)?.len();
        tracing::debug!("Wrote {} bytes to {}", size, path.display());
        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_new_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.g");
        let size = FileManager::new(false).write_gcode_file(&path, "G90\nM2\n").unwrap();
        assert_eq!(size, 8);
        assert_eq!(fs::read_to_string(&path).unwrap(), "G90\nM2\n");
    }

    #[test]
    fn test_existing_file_kept_without_force() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.g");
        fs::write(&path, "keep me").unwrap();
        let result = FileManager::new(false).write_gcode_file(&path, "G90\n");
        assert!(matches!(result, Err(FileError::AlreadyExists(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn test_existing_file_replaced_with_force() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.g");
        fs::write(&path, "a much longer previous program").unwrap();
        let size = FileManager::new(true).write_gcode_file(&path, "M2\n").unwrap();
        assert_eq!(size, 3);
        assert_eq!(fs::read_to_string(&path).unwrap(), "M2\n");
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.g");
        let result = FileManager::new(true).write_gcode_file(&path, "M2\n");
        assert!(matches!(result, Err(FileError::Io { .. })));
    }
}

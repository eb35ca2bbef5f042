use std::path::Path;

use crate::error::{Error, Result};

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    std::fs::create_dir_all(dest_path.as_ref()).map_err(Error::IoError)
}

/// Writes `content` to `dest_path`, creating parent directories as needed.
pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    std::fs::write(dest_path, content).map_err(Error::IoError)
}

/// Reads a file to a string; a missing file is `None`, not an error.
pub fn read_if_exists<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    match std::fs::read_to_string(path.as_ref()) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::IoError(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/file.txt");
        write_file("content", &nested).unwrap();
        assert_eq!(std::fs::read_to_string(nested).unwrap(), "content");
    }

    #[test]
    fn read_if_exists_distinguishes_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert_eq!(read_if_exists(&path).unwrap(), None);

        std::fs::write(&path, "x = 1").unwrap();
        assert_eq!(read_if_exists(&path).unwrap(), Some("x = 1".to_string()));
    }
}

//! Append-only list of dropped headwords.
//!
//! One headword per line, UTF-8. Lines are never deduplicated or rewritten.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Handle to the ignore file.
#[derive(Debug, Clone)]
pub struct IgnoreLog {
    filepath: PathBuf,
}

impl IgnoreLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            filepath: path.into(),
        }
    }

    pub fn filepath(&self) -> &Path {
        &self.filepath
    }

    /// Appends `headword` as a new line, creating the file if needed.
    pub fn append(&self, headword: &str) -> io::Result<()> {
        if let Some(parent) = self.filepath.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.filepath)?;
        // Single write so concurrent appends stay line-aligned
        file.write_all(format!("{headword}\n").as_bytes())
    }

    /// Reads every ignored headword. A missing file is an empty list.
    pub fn load(&self) -> io::Result<HashSet<String>> {
        match std::fs::read_to_string(&self.filepath) {
            Ok(content) => Ok(content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HashSet::new()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let log = IgnoreLog::new(temp_dir.path().join("var").join("ignore.txt"));

        log.append("foo").unwrap();
        assert_eq!(std::fs::read_to_string(log.filepath()).unwrap(), "foo\n");
    }

    #[test]
    fn test_append_keeps_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let log = IgnoreLog::new(temp_dir.path().join("ignore.txt"));

        log.append("foo").unwrap();
        log.append("bar").unwrap();
        log.append("foo").unwrap();
        assert_eq!(
            std::fs::read_to_string(log.filepath()).unwrap(),
            "foo\nbar\nfoo\n"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let log = IgnoreLog::new(temp_dir.path().join("absent.txt"));
        assert!(log.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_skips_blank_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ignore.txt");
        std::fs::write(&path, "foo\n\n  bar \r\nfoo\n").unwrap();

        let ignored = IgnoreLog::new(&path).load().unwrap();
        assert_eq!(ignored.len(), 2);
        assert!(ignored.contains("foo"));
        assert!(ignored.contains("bar"));
    }

    #[test]
    fn test_append_to_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let log = IgnoreLog::new(temp_dir.path());
        assert!(log.append("foo").is_err());
    }
}

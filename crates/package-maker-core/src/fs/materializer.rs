//! Writes rendered artifacts to disk

use super::filesystem::FileSystem;
use std::path::Path;

/// Result of one write attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// The file exists after the attempt
    pub present: bool,
    /// I/O error reported while creating directories or writing, if any
    pub error: Option<String>,
}

/// Creates parent directories and writes files through a [`FileSystem`]
pub struct Materializer<'a, F: FileSystem> {
    fs: &'a F,
}

impl<'a, F: FileSystem> Materializer<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Write `content` to `path` and report whether the file exists afterwards
    ///
    /// The return value is the post-condition, not the absence of I/O errors:
    /// a failed write that leaves an older or partial file behind still counts.
    pub fn write(&self, path: &Path, content: &str) -> bool {
        self.write_detailed(path, content).present
    }

    /// Same as [`Materializer::write`] but keeps the I/O error text
    pub fn write_detailed(&self, path: &Path, content: &str) -> WriteOutcome {
        let mut error = None;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = self.fs.create_dir_all(parent) {
                tracing::debug!(path = %parent.display(), error = %e, "create_dir_all failed");
                error = Some(e.to_string());
            }
        }

        if error.is_none() {
            if let Err(e) = self.fs.write_file(path, content.as_bytes()) {
                tracing::debug!(path = %path.display(), error = %e, "write failed");
                error = Some(e.to_string());
            }
        }

        let present = self.fs.exists(path);
        tracing::trace!(path = %path.display(), present, "materialized");

        WriteOutcome { present, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;

    #[test]
    fn test_write_creates_ancestors() {
        let fs = MemoryFs::new();
        let materializer = Materializer::new(&fs);

        assert!(materializer.write(Path::new("packages/a/b/src/.gitignore"), "*"));
        assert!(fs.exists(Path::new("packages/a/b/src")));
        assert_eq!(fs.contents("packages/a/b/src/.gitignore").as_deref(), Some("*"));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let fs = MemoryFs::new().with_file("pkg/README.md", "old");
        let materializer = Materializer::new(&fs);

        assert!(materializer.write(Path::new("pkg/README.md"), "new"));
        assert_eq!(fs.contents("pkg/README.md").as_deref(), Some("new"));
    }

    #[test]
    fn test_failed_write_reports_missing_file() {
        let fs = MemoryFs::new();
        fs.fail_writes_to("pkg/README.md");
        let outcome = Materializer::new(&fs).write_detailed(Path::new("pkg/README.md"), "x");

        assert!(!outcome.present);
        assert!(outcome.error.unwrap().contains("denied"));
    }

    #[test]
    fn test_failed_overwrite_still_reads_as_present() {
        let fs = MemoryFs::new().with_file("pkg/README.md", "old");
        fs.fail_writes_to("pkg/README.md");
        let outcome = Materializer::new(&fs).write_detailed(Path::new("pkg/README.md"), "new");

        assert!(outcome.present);
        assert!(outcome.error.is_some());
        assert_eq!(fs.contents("pkg/README.md").as_deref(), Some("old"));
    }

    #[test]
    fn test_parent_is_a_file() {
        let fs = MemoryFs::new().with_file("pkg/src", "not a dir");
        let outcome = Materializer::new(&fs).write_detailed(Path::new("pkg/src/a.php"), "x");

        assert!(!outcome.present);
        assert!(outcome.error.is_some());
    }
}

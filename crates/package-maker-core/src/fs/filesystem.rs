//! Filesystem abstraction

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// The filesystem operations the generator needs
pub trait FileSystem {
    /// Whether a file or directory exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and all missing ancestors
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Write `content` to `path`, replacing any existing file
    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    /// Read a UTF-8 file
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(Vec<u8>),
}

/// In-memory filesystem for tests and dry runs
///
/// Writes fail when the parent directory was never created, like on disk.
/// Individual paths can be marked as failing with [`MemoryFs::fail_writes_to`].
#[derive(Debug, Default)]
pub struct MemoryFs {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
    failing: RefCell<BTreeSet<PathBuf>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its ancestors
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dirs(parent);
        }
        self.nodes
            .borrow_mut()
            .insert(path.to_path_buf(), Node::File(content.into()));
        self
    }

    /// Seed an empty directory
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.add_dirs(path.as_ref());
        self
    }

    /// Make every later write to `path` fail with `PermissionDenied`
    pub fn fail_writes_to(&self, path: impl AsRef<Path>) {
        self.failing.borrow_mut().insert(path.as_ref().to_path_buf());
    }

    /// Content of a file, if it exists
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.nodes.borrow().get(path.as_ref()) {
            Some(Node::File(bytes)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }

    /// All file paths, sorted
    pub fn files(&self) -> Vec<PathBuf> {
        self.nodes
            .borrow()
            .iter()
            .filter(|(_, node)| matches!(node, Node::File(_)))
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Number of files and directories
    pub fn entry_count(&self) -> usize {
        self.nodes.borrow().len()
    }

    fn add_dirs(&self, path: &Path) {
        let mut nodes = self.nodes.borrow_mut();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.as_os_str().is_empty() || matches!(self.nodes.borrow().get(path), Some(Node::Dir))
    }
}

impl FileSystem for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.nodes.borrow().contains_key(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        if matches!(self.nodes.borrow().get(path), Some(Node::File(_))) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} is a file", path.display()),
            ));
        }
        self.add_dirs(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        if self.failing.borrow().contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("write to {} denied", path.display()),
            ));
        }

        let parent = path.parent().unwrap_or(Path::new(""));
        if !self.is_dir(parent) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory {} does not exist", parent.display()),
            ));
        }

        self.nodes
            .borrow_mut()
            .insert(path.to_path_buf(), Node::File(content.to_vec()));
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        match self.nodes.borrow().get(path) {
            Some(Node::File(bytes)) => String::from_utf8(bytes.clone())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Some(Node::Dir) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is a directory", path.display()),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_write_requires_parent() {
        let fs = MemoryFs::new();
        let err = fs
            .write_file(Path::new("packages/a/README.md"), b"x")
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_memory_create_dir_all_adds_ancestors() {
        let fs = MemoryFs::new();
        fs.create_dir_all(Path::new("packages/a/b")).unwrap();
        assert!(fs.exists(Path::new("packages")));
        assert!(fs.exists(Path::new("packages/a")));
        assert!(fs.exists(Path::new("packages/a/b")));
        assert!(fs.files().is_empty());
    }

    #[test]
    fn test_memory_round_trip() {
        let fs = MemoryFs::new().with_dir("docs");
        fs.write_file(Path::new("docs/a.md"), b"hello").unwrap();
        assert_eq!(fs.read_to_string(Path::new("docs/a.md")).unwrap(), "hello");
        assert_eq!(fs.files(), vec![PathBuf::from("docs/a.md")]);
    }

    #[test]
    fn test_memory_failing_path() {
        let fs = MemoryFs::new().with_dir("docs");
        fs.fail_writes_to("docs/a.md");
        let err = fs.write_file(Path::new("docs/a.md"), b"x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(!fs.exists(Path::new("docs/a.md")));
    }

    #[test]
    fn test_memory_relative_file_in_cwd() {
        let fs = MemoryFs::new();
        fs.write_file(Path::new("composer.json"), b"{}").unwrap();
        assert_eq!(fs.contents("composer.json").as_deref(), Some("{}"));
    }

    #[test]
    fn test_local_fs_writes_nested_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a/b/c.txt");
        LocalFs.create_dir_all(target.parent().unwrap()).unwrap();
        LocalFs.write_file(&target, b"content").unwrap();
        assert!(LocalFs.exists(&target));
        assert_eq!(LocalFs.read_to_string(&target).unwrap(), "content");
    }
}

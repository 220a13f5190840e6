//! Stub lookup from the embedded set or a local directory
//!
//! The embedded stubs are compiled into the binary so `make-package` works from
//! any directory. A local stub directory replaces the whole set; it is read
//! through the [`FileSystem`] seam like every other file.

use super::manifest::StubManifest;
use crate::error::TemplateError;
use crate::fs::FileSystem;
use std::path::PathBuf;

/// Name of the manifest inside a stub directory
pub const MANIFEST_FILE: &str = "template.yaml";

const EMBEDDED_MANIFEST: &str = include_str!("../../stubs/template.yaml");

const EMBEDDED_STUBS: &[(&str, &str)] = &[
    ("README", include_str!("../../stubs/README.stub")),
    ("CHANGELOG", include_str!("../../stubs/CHANGELOG.stub")),
    ("composer", include_str!("../../stubs/composer.stub")),
    ("phpunit", include_str!("../../stubs/phpunit.stub")),
    ("gitignore", include_str!("../../stubs/gitignore.stub")),
    ("ServiceProvider", include_str!("../../stubs/ServiceProvider.stub")),
    ("TestCase", include_str!("../../stubs/TestCase.stub")),
];

/// Where stubs come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubSource {
    Embedded,
    Local(PathBuf),
}

/// A logical stub name and where it lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    pub name: String,
    /// `None` for embedded stubs
    pub path: Option<PathBuf>,
}

/// Returns raw stub text by logical name
#[derive(Debug, Clone)]
pub struct TemplateStore {
    source: StubSource,
}

impl TemplateStore {
    pub fn new(source: StubSource) -> Self {
        Self { source }
    }

    pub fn embedded() -> Self {
        Self::new(StubSource::Embedded)
    }

    pub fn local(dir: impl Into<PathBuf>) -> Self {
        Self::new(StubSource::Local(dir.into()))
    }

    pub fn source(&self) -> &StubSource {
        &self.source
    }

    /// Names of the stubs compiled into the binary
    pub fn embedded_names() -> impl Iterator<Item = &'static str> {
        EMBEDDED_STUBS.iter().map(|(name, _)| *name)
    }

    /// Resolve a logical name to its descriptor
    pub fn descriptor(&self, name: &str) -> Result<TemplateDescriptor, TemplateError> {
        if !Self::embedded_names().any(|n| n == name) {
            return Err(TemplateError::Unknown(name.to_string()));
        }

        let path = match &self.source {
            StubSource::Embedded => None,
            StubSource::Local(dir) => Some(dir.join(format!("{}.stub", name))),
        };

        Ok(TemplateDescriptor {
            name: name.to_string(),
            path,
        })
    }

    /// Raw stub text for a logical name
    pub fn load<F: FileSystem>(&self, fs: &F, name: &str) -> Result<String, TemplateError> {
        let descriptor = self.descriptor(name)?;

        match descriptor.path {
            None => EMBEDDED_STUBS
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, text)| text.to_string())
                .ok_or_else(|| TemplateError::Unknown(name.to_string())),
            Some(path) => fs.read_to_string(&path).map_err(|e| TemplateError::Read {
                name: name.to_string(),
                path: path.clone(),
                message: e.to_string(),
            }),
        }
    }

    /// The stub manifest; a local directory without one uses the embedded manifest
    pub fn manifest<F: FileSystem>(&self, fs: &F) -> Result<StubManifest, TemplateError> {
        let text = match &self.source {
            StubSource::Local(dir) if fs.exists(&dir.join(MANIFEST_FILE)) => {
                let path = dir.join(MANIFEST_FILE);
                fs.read_to_string(&path).map_err(|e| TemplateError::Read {
                    name: MANIFEST_FILE.to_string(),
                    path: path.clone(),
                    message: e.to_string(),
                })?
            }
            _ => EMBEDDED_MANIFEST.to_string(),
        };

        Ok(serde_yaml::from_str(&text)?)
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::embedded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;
    use std::path::Path;

    #[test]
    fn test_embedded_stubs_load() {
        let fs = MemoryFs::new();
        let store = TemplateStore::embedded();

        for name in TemplateStore::embedded_names() {
            assert!(store.load(&fs, name).is_ok(), "stub {} missing", name);
        }
        assert!(store
            .load(&fs, "ServiceProvider")
            .unwrap()
            .contains("class {CLASS} extends ServiceProvider"));
    }

    #[test]
    fn test_unknown_stub() {
        let err = TemplateStore::embedded()
            .load(&MemoryFs::new(), "Nope")
            .unwrap_err();
        assert!(matches!(err, TemplateError::Unknown(ref n) if n == "Nope"));
    }

    #[test]
    fn test_embedded_manifest_lists_every_stub() {
        let manifest = TemplateStore::embedded().manifest(&MemoryFs::new()).unwrap();
        for name in TemplateStore::embedded_names() {
            assert!(manifest.has_stub(name), "{} not listed", name);
        }
        assert_eq!(manifest.framework_versions, vec!["7.*", "dev-master"]);
        assert_eq!(manifest.default_version.as_deref(), Some("7.*"));
    }

    #[test]
    fn test_local_stub_overrides_embedded() {
        let fs = MemoryFs::new().with_file("my-stubs/README.stub", "# {PACKAGE_NAME}!");
        let store = TemplateStore::local("my-stubs");

        assert_eq!(store.load(&fs, "README").unwrap(), "# {PACKAGE_NAME}!");
        assert_eq!(
            store.descriptor("README").unwrap().path.as_deref(),
            Some(Path::new("my-stubs/README.stub"))
        );
    }

    #[test]
    fn test_local_missing_stub_is_read_error() {
        let fs = MemoryFs::new().with_dir("my-stubs");
        let err = TemplateStore::local("my-stubs")
            .load(&fs, "CHANGELOG")
            .unwrap_err();
        assert!(matches!(err, TemplateError::Read { ref name, .. } if name == "CHANGELOG"));
    }

    #[test]
    fn test_local_manifest_falls_back_to_embedded() {
        let fs = MemoryFs::new().with_dir("my-stubs");
        let manifest = TemplateStore::local("my-stubs").manifest(&fs).unwrap();
        assert_eq!(manifest.default_version.as_deref(), Some("7.*"));
    }

    #[test]
    fn test_local_manifest_is_used() {
        let fs = MemoryFs::new().with_file(
            "my-stubs/template.yaml",
            "framework_versions: [\"8.*\"]\ndefault_version: \"8.*\"\n",
        );
        let manifest = TemplateStore::local("my-stubs").manifest(&fs).unwrap();
        assert_eq!(manifest.framework_versions, vec!["8.*"]);
    }
}

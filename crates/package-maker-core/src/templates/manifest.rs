//! Stub manifest (stubs/template.yaml)

use serde::{Deserialize, Serialize};

/// Lists the stubs in a stub directory and the framework versions they target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StubManifest {
    /// Logical stub names, each stored as `<name>.stub`
    #[serde(default)]
    pub stubs: Vec<String>,

    /// Framework version constraints offered in the version prompt
    #[serde(default)]
    pub framework_versions: Vec<String>,

    /// Constraint selected by default in the version prompt
    #[serde(default)]
    pub default_version: Option<String>,
}

impl StubManifest {
    /// Check if a stub is listed in this manifest
    pub fn has_stub(&self, name: &str) -> bool {
        self.stubs.iter().any(|s| s == name)
    }
}

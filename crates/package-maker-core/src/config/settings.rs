use crate::error::ConfigError;
use crate::fs::FileSystem;
use crate::templates::StubManifest;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "package-maker.yaml";

/// License pre-selected in the license prompt
pub const DEFAULT_LICENSE: &str = "MIT";

pub const ENV_PATH: &str = "PACKAGE_MAKER_PATH";
pub const ENV_CREATOR_NAME: &str = "PACKAGE_MAKER_CREATOR_NAME";
pub const ENV_CREATOR_EMAIL: &str = "PACKAGE_MAKER_CREATOR_EMAIL";
pub const ENV_STUBS: &str = "PACKAGE_MAKER_STUBS";

/// Everything the session needs that is not asked interactively
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MakerConfig {
    /// Base output directory; packages land in `<path>/<group>/<package>`
    pub path: PathBuf,

    /// Default answer for the creator name prompt
    pub creator_name: Option<String>,

    /// Default answer for the creator e-mail prompt
    pub creator_email: Option<String>,

    /// Framework version constraints offered; empty means "use the stub manifest"
    pub framework_versions: Vec<String>,

    /// Constraint pre-selected in the version prompt
    pub default_version: Option<String>,

    /// Licenses offered; `MIT` is pre-selected when listed
    pub licenses: Vec<String>,

    /// Host project's composer.json, used by `--register`
    pub host_manifest: PathBuf,

    /// Composer executable
    pub composer_bin: String,

    /// Constraint written to the host's `require` section
    pub dev_constraint: String,

    /// Local stub directory replacing the embedded stubs
    pub stub_dir: Option<PathBuf>,
}

impl Default for MakerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("packages"),
            creator_name: None,
            creator_email: None,
            framework_versions: Vec::new(),
            default_version: None,
            licenses: vec![
                "MIT".to_string(),
                "Apache-2.0".to_string(),
                "GPL-3.0-or-later".to_string(),
                "proprietary".to_string(),
            ],
            host_manifest: PathBuf::from("composer.json"),
            composer_bin: "composer".to_string(),
            dev_constraint: "dev-master".to_string(),
            stub_dir: None,
        }
    }
}

impl MakerConfig {
    /// Load defaults, then `file` (or `package-maker.yaml` if present), then env overrides
    ///
    /// An explicitly given file must exist; the implicit one is optional.
    pub fn load<F, E>(fs: &F, file: Option<&Path>, env: E) -> Result<Self, ConfigError>
    where
        F: FileSystem,
        E: Fn(&str) -> Option<String>,
    {
        let implicit = PathBuf::from(CONFIG_FILE);
        let path = match file {
            Some(path) => Some(path.to_path_buf()),
            None if fs.exists(&implicit) => Some(implicit),
            None => None,
        };

        let mut config = match path {
            Some(path) => Self::read(fs, &path)?,
            None => Self::default(),
        };

        config.apply_env(env);
        Ok(config)
    }

    fn read<F: FileSystem>(fs: &F, path: &Path) -> Result<Self, ConfigError> {
        let text = fs.read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        tracing::debug!(path = %path.display(), "loading config file");
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env<E: Fn(&str) -> Option<String>>(&mut self, env: E) {
        let value = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = value(ENV_PATH) {
            self.path = PathBuf::from(path);
        }
        if let Some(name) = value(ENV_CREATOR_NAME) {
            self.creator_name = Some(name);
        }
        if let Some(email) = value(ENV_CREATOR_EMAIL) {
            self.creator_email = Some(email);
        }
        if let Some(stubs) = value(ENV_STUBS) {
            self.stub_dir = Some(PathBuf::from(stubs));
        }
    }

    /// Fill framework versions and the default version from the stub manifest when unset
    pub fn with_stub_defaults(mut self, manifest: &StubManifest) -> Self {
        if self.framework_versions.is_empty() {
            self.framework_versions = manifest.framework_versions.clone();
        }
        if self.default_version.is_none() {
            self.default_version = manifest.default_version.clone();
        }
        self
    }

    /// Index pre-selected in the version prompt
    ///
    /// Looked up by value so reordering the list keeps the same default;
    /// falls back to the first entry.
    pub fn default_version_index(&self) -> usize {
        self.default_version
            .as_deref()
            .and_then(|wanted| self.framework_versions.iter().position(|v| v == wanted))
            .unwrap_or(0)
    }

    /// Index pre-selected in the license prompt, found by value like the version default
    pub fn default_license_index(&self) -> usize {
        self.licenses
            .iter()
            .position(|l| l == DEFAULT_LICENSE)
            .unwrap_or(0)
    }

    /// Default license answer
    pub fn default_license(&self) -> &str {
        self.licenses
            .get(self.default_license_index())
            .map(String::as_str)
            .unwrap_or(DEFAULT_LICENSE)
    }

    /// Write this configuration as YAML to `path`
    pub fn publish<F: FileSystem>(&self, fs: &F, path: &Path, force: bool) -> Result<(), ConfigError> {
        if fs.exists(path) && !force {
            return Err(ConfigError::Exists(path.to_path_buf()));
        }

        let yaml = serde_yaml::to_string(self).map_err(ConfigError::Serialize)?;
        fs.write_file(path, yaml.as_bytes())
            .map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}

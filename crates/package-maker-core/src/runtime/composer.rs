//! Registers a generated package with the host project's composer.json
//!
//! The host manifest gets a `path` repository pointing at the package and a
//! `require` entry for it, then composer is run once in the host project and
//! once in the package directory. Every failure is reported, none is fatal.

use super::process::{CommandSpec, ProcessRunner};
use crate::fs::FileSystem;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::path::{Component, Path, PathBuf};

/// What the registrar needs to know about the new package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Host project's composer.json
    pub manifest: PathBuf,
    /// `group/package`
    pub package: String,
    /// Generated package directory
    pub package_dir: PathBuf,
}

/// Result of one composer invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReport {
    pub command: String,
    pub exit_code: Option<i32>,
    /// Set when the process could not be started
    pub error: Option<String>,
}

impl CommandReport {
    pub fn succeeded(&self) -> bool {
        self.error.is_none() && self.exit_code == Some(0)
    }
}

/// Result of a registration attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationReport {
    /// Set when the host manifest could not be updated; no command runs then
    pub manifest_error: Option<String>,
    pub commands: Vec<CommandReport>,
}

impl RegistrationReport {
    pub fn succeeded(&self) -> bool {
        self.manifest_error.is_none() && self.commands.iter().all(CommandReport::succeeded)
    }
}

/// Updates the host manifest and runs composer
pub struct Registrar<'a, F: FileSystem, R: ProcessRunner> {
    fs: &'a F,
    runner: &'a R,
    composer_bin: String,
    dev_constraint: String,
    /// Directory relative paths are resolved against
    cwd: PathBuf,
}

impl<'a, F: FileSystem, R: ProcessRunner> Registrar<'a, F, R> {
    pub fn new(
        fs: &'a F,
        runner: &'a R,
        composer_bin: impl Into<String>,
        dev_constraint: impl Into<String>,
    ) -> Self {
        Self {
            fs,
            runner,
            composer_bin: composer_bin.into(),
            dev_constraint: dev_constraint.into(),
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Resolve relative manifest and package paths against `cwd` instead of the process directory
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub async fn register(&self, registration: &Registration) -> RegistrationReport {
        let mut report = RegistrationReport::default();

        if let Err(e) = self.update_manifest(registration) {
            tracing::warn!(manifest = %registration.manifest.display(), error = %e, "manifest not updated");
            report.manifest_error = Some(format!("{:#}", e));
            return report;
        }

        let host_dir = parent_dir(&registration.manifest);
        let commands = [
            CommandSpec::new(&self.composer_bin, host_dir)
                .arg("update")
                .arg(&registration.package),
            CommandSpec::new(&self.composer_bin, &registration.package_dir).arg("install"),
        ];

        for command in &commands {
            let entry = match self.runner.run(command).await {
                Ok(outcome) => CommandReport {
                    command: command.to_string(),
                    exit_code: outcome.code,
                    error: None,
                },
                Err(e) => CommandReport {
                    command: command.to_string(),
                    exit_code: None,
                    error: Some(format!("{:#}", e)),
                },
            };
            report.commands.push(entry);
        }

        report
    }

    fn update_manifest(&self, registration: &Registration) -> Result<()> {
        let path = &registration.manifest;
        let text = self
            .fs
            .read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut manifest: Value = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let url = repository_url(&self.cwd, path, &registration.package_dir);
        add_path_repository(&mut manifest, &registration.package, &url)?;
        add_requirement(&mut manifest, &registration.package, &self.dev_constraint)?;

        self.fs
            .write_file(path, to_composer_json(&manifest)?.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!(manifest = %path.display(), package = %registration.package, "manifest updated");
        Ok(())
    }
}

/// Ensure a `path` repository for `url` exists
pub fn add_path_repository(manifest: &mut Value, package: &str, url: &str) -> Result<()> {
    let root = manifest
        .as_object_mut()
        .context("composer.json root is not an object")?;

    let entry = json!({
        "type": "path",
        "url": url,
        "options": { "symlink": true }
    });

    let repositories = root
        .entry("repositories")
        .or_insert_with(|| Value::Array(Vec::new()));

    match repositories {
        Value::Array(list) => {
            if !list.iter().any(|repo| is_path_repository(repo, url)) {
                list.push(entry);
            }
        }
        Value::Object(map) => {
            if !map.values().any(|repo| is_path_repository(repo, url)) {
                map.insert(package.to_string(), entry);
            }
        }
        _ => anyhow::bail!("composer.json \"repositories\" is neither a list nor an object"),
    }

    Ok(())
}

/// Set `require[package] = constraint`
pub fn add_requirement(manifest: &mut Value, package: &str, constraint: &str) -> Result<()> {
    let root = manifest
        .as_object_mut()
        .context("composer.json root is not an object")?;

    let require = root
        .entry("require")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .context("composer.json \"require\" is not an object")?;

    require.insert(package.to_string(), Value::String(constraint.to_string()));
    Ok(())
}

fn is_path_repository(repo: &Value, url: &str) -> bool {
    repo.get("type").and_then(Value::as_str) == Some("path")
        && repo.get("url").and_then(Value::as_str) == Some(url)
}

/// Package path as seen from the host manifest's directory
///
/// Both paths are made absolute against `cwd` first. When they share no root
/// (different drives) the absolute package path is used.
fn repository_url(cwd: &Path, manifest: &Path, package_dir: &Path) -> String {
    let host_dir = normalize(&cwd.join(parent_dir(manifest)));
    let package_dir = normalize(&cwd.join(package_dir));

    let url = relative_to(&package_dir, &host_dir).unwrap_or(package_dir);
    url.to_string_lossy().replace('\\', "/")
}

/// Lexically resolve `.` and `..`; the package may not exist yet
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// `target` relative to `base`, or `None` when they have different roots
fn relative_to(target: &Path, base: &Path) -> Option<PathBuf> {
    let target: Vec<Component> = target.components().collect();
    let base: Vec<Component> = base.components().collect();

    let common = target
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let rooted = |c: &&Component| matches!(c, Component::Prefix(_) | Component::RootDir);
    if target
        .iter()
        .take_while(rooted)
        .ne(base.iter().take_while(rooted))
    {
        return None;
    }

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &target[common..] {
        relative.push(component.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Some(relative)
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Pretty JSON with composer's 4-space indentation and a trailing newline
fn to_composer_json(manifest: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    manifest.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(String::from_utf8(buf)?)
}

//! Package name parsing and the answered session request

use crate::error::MakeError;
use crate::naming;
use std::fmt;
use std::path::{Path, PathBuf};

/// A validated `group/package` name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageName {
    group: String,
    package: String,
}

impl PackageName {
    /// Parse a `group/package` name
    ///
    /// Exactly one `/` is accepted, and each side must be usable both as a
    /// directory name below the base directory and as a namespace segment.
    pub fn parse(raw: &str) -> Result<Self, MakeError> {
        let raw = raw.trim();
        let mut parts = raw.split('/');

        match (parts.next(), parts.next(), parts.next()) {
            (Some(group), Some(package), None) if is_segment(group) && is_segment(package) => {
                Ok(Self {
                    group: group.to_string(),
                    package: package.to_string(),
                })
            }
            _ => Err(MakeError::InvalidName(raw.to_string())),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Directory of this package under the base output directory
    pub fn target_dir(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.group).join(&self.package)
    }
}

/// Not `.`/`..`, no path separators, and something left after studly casing
fn is_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['\\', '/'])
        && !naming::studly(segment).is_empty()
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.package)
    }
}

/// Everything the user answered for one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    pub name: PackageName,
    pub description: String,
    pub creator_name: String,
    pub creator_email: String,
    /// Never empty
    pub framework_versions: Vec<String>,
    pub license: String,
}

impl PackageRequest {
    /// Version constraint as written to `composer.json` (`7.*|dev-master`)
    pub fn version_constraint(&self) -> String {
        self.framework_versions.join("|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_name() {
        let name = PackageName::parse("ambersive/demo").unwrap();
        assert_eq!(name.group(), "ambersive");
        assert_eq!(name.package(), "demo");
        assert_eq!(name.to_string(), "ambersive/demo");
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        let err = PackageName::parse("demo").unwrap_err();
        assert!(matches!(err, MakeError::InvalidName(ref n) if n == "demo"));
    }

    #[test]
    fn test_parse_rejects_extra_separator() {
        assert!(PackageName::parse("a/b/c").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!(PackageName::parse("/demo").is_err());
        assert!(PackageName::parse("ambersive/").is_err());
        assert!(PackageName::parse("/").is_err());
    }

    #[test]
    fn test_parse_rejects_relative_segments() {
        for raw in ["../evil", "./demo", "ambersive/..", "ambersive/.", "../.."] {
            let err = PackageName::parse(raw).unwrap_err();
            assert!(matches!(err, MakeError::InvalidName(_)), "{} accepted", raw);
        }
    }

    #[test]
    fn test_parse_rejects_backslashes() {
        assert!(PackageName::parse("ambersive/..\\evil").is_err());
        assert!(PackageName::parse("ambersive\\x/demo").is_err());
    }

    #[test]
    fn test_parse_rejects_segments_without_letters() {
        for raw in ["--/demo", "ambersive/__", "ambersive/- .", "ambersive/ "] {
            assert!(PackageName::parse(raw).is_err(), "{} accepted", raw);
        }
    }

    #[test]
    fn test_parse_accepts_dotted_names() {
        let name = PackageName::parse("ambersive/demo.tools").unwrap();
        assert_eq!(name.package(), "demo.tools");
    }

    #[test]
    fn test_target_dir() {
        let name = PackageName::parse("ambersive/demo").unwrap();
        assert_eq!(
            name.target_dir(Path::new("packages")),
            PathBuf::from("packages/ambersive/demo")
        );
    }

    #[test]
    fn test_version_constraint_joins_with_pipe() {
        let request = PackageRequest {
            name: PackageName::parse("ambersive/demo").unwrap(),
            description: String::new(),
            creator_name: String::new(),
            creator_email: String::new(),
            framework_versions: vec!["7.*".to_string(), "dev-master".to_string()],
            license: "MIT".to_string(),
        };
        assert_eq!(request.version_constraint(), "7.*|dev-master");
    }
}

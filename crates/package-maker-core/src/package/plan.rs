//! The fixed list of artifacts generated for every package

use super::request::PackageRequest;
use crate::naming::DerivedNames;
use crate::templates::Tokens;
use chrono::Datelike;
use std::path::PathBuf;

/// What kind of output an artifact is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// A rendered file
    File,
    /// An otherwise empty folder kept alive by a `.gitignore`
    Folder,
}

/// One generation step: which stub to render and where to put it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Shown in step lines, e.g. `README file`
    pub label: String,
    pub kind: ArtifactKind,
    /// Logical stub name in the template store
    pub stub: &'static str,
    /// Path relative to the package directory
    pub target: PathBuf,
}

impl Artifact {
    fn file(label: impl Into<String>, stub: &'static str, target: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            kind: ArtifactKind::File,
            stub,
            target: target.into(),
        }
    }

    fn folder(folder: &str) -> Self {
        Self {
            label: format!("{} folder", folder),
            kind: ArtifactKind::Folder,
            stub: "gitignore",
            target: PathBuf::from(folder).join(".gitignore"),
        }
    }
}

/// Artifacts in generation order
pub fn artifact_plan(names: &DerivedNames) -> Vec<Artifact> {
    vec![
        Artifact::file("README file", "README", "README.md"),
        Artifact::file("CHANGELOG file", "CHANGELOG", "CHANGELOG.md"),
        Artifact::file("composer.json file", "composer", "composer.json"),
        Artifact::file("phpunit.xml file", "phpunit", "phpunit.xml"),
        Artifact::folder("tests"),
        Artifact::folder("docs"),
        Artifact::folder("src"),
        Artifact::file(
            "service provider",
            "ServiceProvider",
            PathBuf::from("src").join(format!("{}.php", names.class_name)),
        ),
        Artifact::file("test case", "TestCase", PathBuf::from("tests").join("TestCase.php")),
    ]
}

/// Placeholder values shared by every stub
pub fn package_tokens(request: &PackageRequest, names: &DerivedNames) -> Tokens {
    Tokens::new()
        .with("{PACKAGE_NAME}", request.name.to_string())
        .with("{PACKAGE_DESCRIPTION}", request.description.as_str())
        .with("{EMAIL}", request.creator_email.as_str())
        .with("{NAME}", request.creator_name.as_str())
        .with("{LARAVEL_VERSION}", request.version_constraint())
        .with("{LICENSE}", request.license.as_str())
        .with("{NAMESPACE_JSON}", names.namespace_json())
        .with("{NAMESPACE}", names.namespace.as_str())
        .with("{TEST_NAMESPACE_JSON}", names.test_namespace_json())
        .with("{TEST_NAMESPACE}", names.test_namespace.as_str())
        .with("{TEST_CLASS}", names.test_class_name.as_str())
        .with("{CLASS}", names.class_name.as_str())
        .with("{YEAR}", chrono::Local::now().year().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::derive;
    use crate::package::PackageName;
    use crate::templates::{render, TemplateStore};

    fn request() -> PackageRequest {
        PackageRequest {
            name: PackageName::parse("ambersive/demo").unwrap(),
            description: "Demo Package".to_string(),
            creator_name: "Manuel".to_string(),
            creator_email: "manuel@example.com".to_string(),
            framework_versions: vec!["dev-master".to_string()],
            license: "MIT".to_string(),
        }
    }

    #[test]
    fn test_plan_order_and_targets() {
        let names = derive(&request().name);
        let targets: Vec<PathBuf> = artifact_plan(&names)
            .into_iter()
            .map(|a| a.target)
            .collect();

        assert_eq!(
            targets,
            vec![
                PathBuf::from("README.md"),
                PathBuf::from("CHANGELOG.md"),
                PathBuf::from("composer.json"),
                PathBuf::from("phpunit.xml"),
                PathBuf::from("tests/.gitignore"),
                PathBuf::from("docs/.gitignore"),
                PathBuf::from("src/.gitignore"),
                PathBuf::from("src/DemoServiceProvider.php"),
                PathBuf::from("tests/TestCase.php"),
            ]
        );
    }

    #[test]
    fn test_every_planned_stub_exists() {
        let names = derive(&request().name);
        for artifact in artifact_plan(&names) {
            assert!(
                TemplateStore::embedded_names().any(|n| n == artifact.stub),
                "{} has no stub",
                artifact.label
            );
        }
    }

    #[test]
    fn test_rendered_composer_is_valid_json() {
        let request = request();
        let names = derive(&request.name);
        let store = TemplateStore::embedded();
        let stub = store.load(&crate::fs::MemoryFs::new(), "composer").unwrap();

        let rendered = render(&stub, &package_tokens(&request, &names));
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(json["name"], "ambersive/demo");
        assert_eq!(json["require-dev"]["laravel/framework"], "dev-master");
        assert_eq!(json["autoload"]["psr-4"]["Ambersive\\Demo\\"], "src/");
        assert_eq!(
            json["extra"]["laravel"]["providers"][0],
            "Ambersive\\Demo\\DemoServiceProvider"
        );
    }

    #[test]
    fn test_year_placeholder_is_current_year() {
        let request = request();
        let names = derive(&request.name);
        let year = chrono::Local::now().year().to_string();

        let rendered = render(
            "Copyright (c) {YEAR} {NAME}",
            &package_tokens(&request, &names),
        );
        assert_eq!(rendered, format!("Copyright (c) {} Manuel", year));
    }

    #[test]
    fn test_rendered_readme_has_no_leftover_placeholders() {
        let request = request();
        let names = derive(&request.name);
        let stub = TemplateStore::embedded()
            .load(&crate::fs::MemoryFs::new(), "README")
            .unwrap();

        let rendered = render(&stub, &package_tokens(&request, &names));
        assert!(!rendered.contains("{YEAR}"));
        assert!(rendered.contains(&format!("MIT, {} Manuel", chrono::Local::now().year())));
    }

    #[test]
    fn test_rendered_test_case_uses_namespaces() {
        let request = request();
        let names = derive(&request.name);
        let stub = TemplateStore::embedded()
            .load(&crate::fs::MemoryFs::new(), "TestCase")
            .unwrap();

        let rendered = render(&stub, &package_tokens(&request, &names));
        assert!(rendered.contains("namespace Ambersive\\Demo\\Tests;"));
        assert!(rendered.contains("use Ambersive\\Demo\\DemoServiceProvider;"));
        assert!(rendered.contains("'Ambersive\\Demo\\Tests\\DemoTestCase'"));
        assert!(!rendered.contains("{CLASS}"));
    }
}

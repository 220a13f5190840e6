//! Class and namespace names derived from a `group/package` name

use crate::package::PackageName;

/// Identifiers used by every generated source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedNames {
    /// e.g. `DemoServiceProvider`
    pub class_name: String,
    /// e.g. `DemoTestCase`
    pub test_class_name: String,
    /// e.g. `Ambersive\Demo`
    pub namespace: String,
    /// e.g. `Ambersive\Demo\Tests`
    pub test_namespace: String,
}

impl DerivedNames {
    /// Namespace escaped for a JSON string (`Ambersive\\Demo\\`), as PSR-4 keys want it
    pub fn namespace_json(&self) -> String {
        psr4_key(&self.namespace)
    }

    pub fn test_namespace_json(&self) -> String {
        psr4_key(&self.test_namespace)
    }
}

/// Derive class names and namespaces for a package
pub fn derive(name: &PackageName) -> DerivedNames {
    let group = studly(name.group());
    let short = studly(name.package());

    let namespace = format!("{}\\{}", group, short);
    let test_namespace = format!("{}\\Tests", namespace);

    DerivedNames {
        class_name: format!("{}ServiceProvider", short),
        test_class_name: format!("{}TestCase", short),
        namespace,
        test_namespace,
    }
}

/// Studly case: `laravel-demo_pkg` -> `LaravelDemoPkg`
///
/// Only the first character of each part is upper-cased; the rest is kept as typed.
pub fn studly(value: &str) -> String {
    value
        .split(['-', '_', ' ', '.'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

fn psr4_key(namespace: &str) -> String {
    format!("{}\\\\", namespace.replace('\\', "\\\\"))
}

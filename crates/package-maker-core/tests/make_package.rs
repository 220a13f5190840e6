//! End-to-end generation on a real directory

use package_maker_core::fs::LocalFs;
use package_maker_core::prompt::{Answer, ScriptedPrompter, Tone};
use package_maker_core::runtime::RecordingRunner;
use package_maker_core::session::{
    CREATOR_EMAIL_QUESTION, CREATOR_NAME_QUESTION, DESCRIPTION_QUESTION, LICENSE_QUESTION,
    VERSIONS_QUESTION,
};
use package_maker_core::{MakeError, MakerConfig, Session, SessionArgs};
use std::fs;
use std::path::Path;

fn config(root: &Path) -> MakerConfig {
    MakerConfig {
        path: root.join("packages"),
        ..MakerConfig::default()
    }
}

fn demo_answers() -> ScriptedPrompter {
    ScriptedPrompter::new()
        .expect(DESCRIPTION_QUESTION, Answer::Text("Demo Package".to_string()))
        .expect(CREATOR_NAME_QUESTION, Answer::Text("Manuel".to_string()))
        .expect(
            CREATOR_EMAIL_QUESTION,
            Answer::Text("manuel@example.com".to_string()),
        )
        .expect(
            VERSIONS_QUESTION,
            Answer::Choices(vec!["dev-master".to_string()]),
        )
        .expect(LICENSE_QUESTION, Answer::Default)
}

fn entries(dir: &Path) -> usize {
    fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

#[tokio::test]
async fn creates_demo_package_on_disk() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());
    let runner = RecordingRunner::new();
    let mut prompter = demo_answers();

    let report = Session::new(&config, &mut prompter, &LocalFs, &runner)
        .run(&SessionArgs::new("ambersive/demo"))
        .await
        .unwrap();

    assert!(report.is_complete());

    let package = root.path().join("packages/ambersive/demo");
    for file in [
        "README.md",
        "CHANGELOG.md",
        "composer.json",
        "phpunit.xml",
        "tests/.gitignore",
        "tests/TestCase.php",
        "docs/.gitignore",
        "src/.gitignore",
        "src/DemoServiceProvider.php",
    ] {
        assert!(package.join(file).is_file(), "{} missing", file);
    }

    let provider = fs::read_to_string(package.join("src/DemoServiceProvider.php")).unwrap();
    assert!(provider.contains("class DemoServiceProvider"));
    assert!(provider.contains("namespace Ambersive\\Demo;"));

    assert_eq!(
        prompter.said().last().map(|(_, line)| line.as_str()),
        Some("The package ambersive/demo has been created.")
    );
}

#[tokio::test]
async fn rejects_name_without_separator() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());
    let runner = RecordingRunner::new();
    let mut prompter = ScriptedPrompter::new();

    let err = Session::new(&config, &mut prompter, &LocalFs, &runner)
        .run(&SessionArgs::new("demo"))
        .await
        .unwrap_err();

    let make_error = err.downcast_ref::<MakeError>().unwrap();
    assert_eq!(make_error.exit_code(), 1);
    assert_eq!(
        prompter.said_with(Tone::Error),
        vec!["Invalid package name. Please make sure you choose a valid package name. eg. ambersive/demo."]
    );
    assert_eq!(entries(root.path()), 0);
}

#[tokio::test]
async fn leaves_existing_package_untouched() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());
    let package = root.path().join("packages/ambersive/demo");
    fs::create_dir_all(&package).unwrap();
    fs::write(package.join("README.md"), "hand written").unwrap();

    let runner = RecordingRunner::new();
    let mut prompter = ScriptedPrompter::new();

    let err = Session::new(&config, &mut prompter, &LocalFs, &runner)
        .run(&SessionArgs::new("ambersive/demo"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<MakeError>(),
        Some(MakeError::AlreadyExists(_))
    ));
    assert_eq!(entries(&package), 1);
    assert_eq!(
        fs::read_to_string(package.join("README.md")).unwrap(),
        "hand written"
    );
}

//! The `make-package` session: validate, ask, generate, register

use crate::config::MakerConfig;
use crate::error::MakeError;
use crate::fs::{FileSystem, Materializer};
use crate::naming::{self, DerivedNames};
use crate::package::plan::package_tokens;
use crate::package::{
    artifact_plan, Artifact, GenerationReport, PackageName, PackageRequest, StepOutcome,
    StepStatus,
};
use crate::prompt::{Prompter, Tone};
use crate::runtime::{ProcessRunner, Registrar, Registration};
use crate::templates::{render, TemplateStore, Tokens};
use anyhow::Result;
use std::path::Path;

pub const DESCRIPTION_QUESTION: &str = "What's the purpose of this package?";
pub const CREATOR_NAME_QUESTION: &str = "What's your name?";
pub const CREATOR_EMAIL_QUESTION: &str = "What's your e-mail address?";
pub const VERSIONS_QUESTION: &str = "For which Laravel versions do you want to create this package?";
pub const LICENSE_QUESTION: &str = "Which license should the package use?";

pub const DEFAULT_DESCRIPTION: &str = "New package";

/// Arguments of one `make-package` invocation
///
/// Every `Some` answer skips the matching prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionArgs {
    pub name: String,
    pub force: bool,
    pub register: bool,
    pub description: Option<String>,
    pub creator_name: Option<String>,
    pub creator_email: Option<String>,
    pub versions: Option<Vec<String>>,
    pub license: Option<String>,
}

impl SessionArgs {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Drives one package generation
pub struct Session<'a, P, F, R>
where
    P: Prompter,
    F: FileSystem,
    R: ProcessRunner,
{
    config: &'a MakerConfig,
    store: TemplateStore,
    prompter: &'a mut P,
    fs: &'a F,
    runner: &'a R,
}

impl<'a, P, F, R> Session<'a, P, F, R>
where
    P: Prompter,
    F: FileSystem,
    R: ProcessRunner,
{
    /// Stubs come from `config.stub_dir` when set, the embedded set otherwise
    pub fn new(config: &'a MakerConfig, prompter: &'a mut P, fs: &'a F, runner: &'a R) -> Self {
        let store = match &config.stub_dir {
            Some(dir) => TemplateStore::local(dir.clone()),
            None => TemplateStore::embedded(),
        };

        Self {
            config,
            store,
            prompter,
            fs,
            runner,
        }
    }

    /// Run the session
    ///
    /// Returns `Err` only for problems found before anything is written:
    /// a malformed name, an existing package without `force`, an unreadable
    /// stub manifest, or a failed prompt. Artifact and registration failures
    /// are reported in the returned [`GenerationReport`].
    pub async fn run(&mut self, args: &SessionArgs) -> Result<GenerationReport> {
        let name = match PackageName::parse(&args.name) {
            Ok(name) => name,
            Err(e) => return Err(self.reject(e)),
        };

        let target_dir = name.target_dir(&self.config.path);
        if self.fs.exists(&target_dir) && !args.force {
            return Err(self.reject(MakeError::AlreadyExists(target_dir)));
        }

        let manifest = self.store.manifest(self.fs)?;
        let config = self.config.clone().with_stub_defaults(&manifest);

        let request = match self.gather(&config, name, args)? {
            Ok(request) => request,
            Err(e) => return Err(self.reject(e)),
        };
        tracing::debug!(?request, "package request complete");

        let names = naming::derive(&request.name);
        let mut report = self.generate(&request, &names, &target_dir)?;

        if args.register {
            report.registration = Some(self.register(&config, &request, &target_dir).await?);
        }

        Ok(report)
    }

    fn reject(&mut self, error: MakeError) -> anyhow::Error {
        tracing::debug!(error = ?error, "session rejected");
        if let Err(e) = self.prompter.say(Tone::Error, &error.to_string()) {
            tracing::warn!(error = %e, "failed to show error");
        }
        error.into()
    }

    /// Ask for every answer not given on the command line
    ///
    /// The outer `Result` carries prompt failures, the inner one validation.
    fn gather(
        &mut self,
        config: &MakerConfig,
        name: PackageName,
        args: &SessionArgs,
    ) -> Result<Result<PackageRequest, MakeError>> {
        let description = match &args.description {
            Some(description) => description.clone(),
            None => self.prompter.ask(DESCRIPTION_QUESTION, DEFAULT_DESCRIPTION)?,
        };

        let creator_name = match &args.creator_name {
            Some(creator_name) => creator_name.clone(),
            None => self.prompter.ask(
                CREATOR_NAME_QUESTION,
                config.creator_name.as_deref().unwrap_or(""),
            )?,
        };

        let creator_email = match &args.creator_email {
            Some(creator_email) => creator_email.clone(),
            None => self.prompter.ask(
                CREATOR_EMAIL_QUESTION,
                config.creator_email.as_deref().unwrap_or(""),
            )?,
        };

        let framework_versions = match &args.versions {
            Some(versions) => versions.clone(),
            None if config.framework_versions.is_empty() => Vec::new(),
            None => self.prompter.choose_many(
                VERSIONS_QUESTION,
                &config.framework_versions,
                config.default_version_index(),
            )?,
        };
        let framework_versions: Vec<String> = framework_versions
            .into_iter()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        if framework_versions.is_empty() {
            return Ok(Err(MakeError::NoVersions));
        }

        let license = match &args.license {
            Some(license) => license.clone(),
            None if config.licenses.is_empty() => config.default_license().to_string(),
            None => self.prompter.choose_one(
                LICENSE_QUESTION,
                &config.licenses,
                config.default_license_index(),
            )?,
        };

        Ok(Ok(PackageRequest {
            name,
            description,
            creator_name,
            creator_email,
            framework_versions,
            license,
        }))
    }

    /// Materialize every artifact; a failed step never stops the next one
    fn generate(
        &mut self,
        request: &PackageRequest,
        names: &DerivedNames,
        target_dir: &Path,
    ) -> Result<GenerationReport> {
        let package = request.name.to_string();
        let tokens = package_tokens(request, names);
        let mut report = GenerationReport::new(&package, target_dir);

        for artifact in artifact_plan(names) {
            let outcome = self.materialize(&artifact, &tokens, target_dir);

            match &outcome.status {
                StepStatus::Created { warning } => {
                    self.prompter.say(Tone::Success, &outcome.line(&package))?;
                    if let Some(warning) = warning {
                        self.prompter.say(
                            Tone::Warning,
                            &format!("{} reported an error: {}", outcome.path.display(), warning),
                        )?;
                    }
                }
                StepStatus::Failed { reason } => {
                    tracing::warn!(artifact = %artifact.label, %reason, "artifact failed");
                    self.prompter.say(Tone::Error, &outcome.line(&package))?;
                }
            }

            report.steps.push(outcome);
        }

        self.prompter.say(Tone::Info, &report.summary())?;
        Ok(report)
    }

    fn materialize(&self, artifact: &Artifact, tokens: &Tokens, target_dir: &Path) -> StepOutcome {
        let path = target_dir.join(&artifact.target);

        let status = match self.store.load(self.fs, artifact.stub) {
            Ok(stub) => {
                let content = render(&stub, tokens);
                let written = Materializer::new(self.fs).write_detailed(&path, &content);
                match (written.present, written.error) {
                    (true, warning) => StepStatus::Created { warning },
                    (false, Some(reason)) => StepStatus::Failed { reason },
                    (false, None) => StepStatus::Failed {
                        reason: format!("{} is missing after write", path.display()),
                    },
                }
            }
            Err(e) => StepStatus::Failed {
                reason: e.to_string(),
            },
        };

        StepOutcome {
            label: artifact.label.clone(),
            path,
            status,
        }
    }

    async fn register(
        &mut self,
        config: &MakerConfig,
        request: &PackageRequest,
        target_dir: &Path,
    ) -> Result<crate::runtime::RegistrationReport> {
        let registration = Registration {
            manifest: config.host_manifest.clone(),
            package: request.name.to_string(),
            package_dir: target_dir.to_path_buf(),
        };

        self.prompter.say(
            Tone::Info,
            &format!(
                "Registering {} in {}",
                registration.package,
                registration.manifest.display()
            ),
        )?;

        let registrar = Registrar::new(
            self.fs,
            self.runner,
            config.composer_bin.as_str(),
            config.dev_constraint.as_str(),
        );
        let outcome = registrar.register(&registration).await;

        if let Some(error) = &outcome.manifest_error {
            self.prompter.say(
                Tone::Info,
                &format!("The package could not be registered: {}", error),
            )?;
        }
        for command in &outcome.commands {
            let line = match (&command.error, command.exit_code) {
                (Some(error), _) => format!("{} could not be run: {}", command.command, error),
                (None, Some(0)) => format!("{} finished.", command.command),
                (None, Some(code)) => format!("{} exited with code {}.", command.command, code),
                (None, None) => format!("{} was terminated.", command.command),
            };
            self.prompter.say(Tone::Info, &line)?;
        }

        Ok(outcome)
    }
}

//! Charm-style CLI prompts using cliclack

use crate::config::MakerConfig;
use crate::fs::LocalFs;
use crate::package::GenerationReport;
use crate::prompt::{Prompter, Tone};
use crate::runtime::TokioProcessRunner;
use crate::session::{Session, SessionArgs};
use anyhow::Result;

/// Prompter backed by cliclack
#[derive(Debug, Clone, Copy, Default)]
pub struct CliclackPrompter;

impl Prompter for CliclackPrompter {
    fn ask(&mut self, question: &str, default: &str) -> Result<String> {
        let mut input = cliclack::input(question).required(false);
        if !default.is_empty() {
            input = input.placeholder(default).default_input(default);
        }

        let answer: String = input.interact()?;
        if answer.trim().is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    fn choose_one(&mut self, question: &str, options: &[String], default: usize) -> Result<String> {
        let mut select = cliclack::select(question);
        for option in options {
            select = select.item(option.clone(), option, "");
        }
        if let Some(initial) = options.get(default) {
            select = select.initial_value(initial.clone());
        }

        Ok(select.interact()?)
    }

    fn choose_many(
        &mut self,
        question: &str,
        options: &[String],
        default: usize,
    ) -> Result<Vec<String>> {
        let mut multi = cliclack::multiselect(question);
        for option in options {
            multi = multi.item(option.clone(), option, "");
        }
        if let Some(initial) = options.get(default) {
            multi = multi.initial_values(vec![initial.clone()]);
        }

        Ok(multi.required(true).interact()?)
    }

    fn say(&mut self, tone: Tone, message: &str) -> Result<()> {
        match tone {
            Tone::Info => cliclack::log::info(message)?,
            Tone::Success => cliclack::log::success(message)?,
            Tone::Warning => cliclack::log::warning(message)?,
            Tone::Error => cliclack::log::error(message)?,
        }
        Ok(())
    }
}

/// Run a session with interactive prompts on the real filesystem
pub async fn run(config: &MakerConfig, args: SessionArgs) -> Result<GenerationReport> {
    cliclack::intro("make-package")?;

    if let Some(dir) = &config.stub_dir {
        cliclack::log::info(format!("Using local stubs from {}", dir.display()))?;
    }

    let mut prompter = CliclackPrompter;
    let fs = LocalFs;
    let runner = TokioProcessRunner;

    let result = Session::new(config, &mut prompter, &fs, &runner)
        .run(&args)
        .await;

    match &result {
        Ok(report) if report.is_complete() => {
            cliclack::outro(format!("Created {}", report.target_dir.display()))?
        }
        Ok(report) => cliclack::outro(format!(
            "Created {} with {} failed step(s)",
            report.target_dir.display(),
            report.failures().count()
        ))?,
        Err(_) => cliclack::outro_cancel("Nothing was created.")?,
    }

    result
}

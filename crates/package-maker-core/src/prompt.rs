//! The interactive seam between the session and the terminal

use anyhow::{bail, Result};
use colored::Colorize;
use std::collections::VecDeque;

/// Severity of a message shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

/// Asks questions and shows messages
pub trait Prompter {
    /// Free-text question; an empty answer means `default`
    fn ask(&mut self, question: &str, default: &str) -> Result<String>;

    /// Pick exactly one of `options`; `default` is an index into it
    fn choose_one(&mut self, question: &str, options: &[String], default: usize) -> Result<String>;

    /// Pick one or more of `options`; `default` is pre-selected
    fn choose_many(
        &mut self,
        question: &str,
        options: &[String],
        default: usize,
    ) -> Result<Vec<String>>;

    /// Show a line of output
    fn say(&mut self, tone: Tone, message: &str) -> Result<()>;
}

/// Answers every question with its default (`--yes`)
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptDefaults;

impl Prompter for AcceptDefaults {
    fn ask(&mut self, question: &str, default: &str) -> Result<String> {
        println!("{} {} {}", "?".cyan(), question, default.dimmed());
        Ok(default.to_string())
    }

    fn choose_one(&mut self, question: &str, options: &[String], default: usize) -> Result<String> {
        let Some(choice) = options.get(default).or_else(|| options.first()) else {
            bail!("No options for: {}", question);
        };
        println!("{} {} {}", "?".cyan(), question, choice.dimmed());
        Ok(choice.clone())
    }

    fn choose_many(
        &mut self,
        question: &str,
        options: &[String],
        default: usize,
    ) -> Result<Vec<String>> {
        self.choose_one(question, options, default).map(|choice| vec![choice])
    }

    fn say(&mut self, tone: Tone, message: &str) -> Result<()> {
        match tone {
            Tone::Info => println!("{}", message),
            Tone::Success => println!("{}", message.green()),
            Tone::Warning => eprintln!("{}", message.yellow()),
            Tone::Error => eprintln!("{}", message.red()),
        }
        Ok(())
    }
}

/// A scripted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Choices(Vec<String>),
    /// Accept whatever default the question offers
    Default,
}

/// Replays prepared answers and records everything said
///
/// Questions must arrive in the scripted order; an unexpected question is an error.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    script: VecDeque<(String, Answer)>,
    asked: Vec<String>,
    said: Vec<(Tone, String)>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect `question` next and answer it with `answer`
    pub fn expect(mut self, question: impl Into<String>, answer: Answer) -> Self {
        self.script.push_back((question.into(), answer));
        self
    }

    /// Questions asked so far
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Messages shown so far
    pub fn said(&self) -> &[(Tone, String)] {
        &self.said
    }

    /// Messages shown with the given tone
    pub fn said_with(&self, tone: Tone) -> Vec<&str> {
        self.said
            .iter()
            .filter(|(t, _)| *t == tone)
            .map(|(_, m)| m.as_str())
            .collect()
    }

    /// Scripted questions never asked
    pub fn unanswered(&self) -> usize {
        self.script.len()
    }

    fn next(&mut self, question: &str) -> Result<Answer> {
        self.asked.push(question.to_string());
        match self.script.pop_front() {
            Some((expected, answer)) if expected == question => Ok(answer),
            Some((expected, _)) => bail!("Expected question {:?}, got {:?}", expected, question),
            None => bail!("Unexpected question {:?}", question),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str, default: &str) -> Result<String> {
        match self.next(question)? {
            Answer::Text(text) if text.is_empty() => Ok(default.to_string()),
            Answer::Text(text) => Ok(text),
            Answer::Default => Ok(default.to_string()),
            Answer::Choices(_) => bail!("{:?} expects text", question),
        }
    }

    fn choose_one(&mut self, question: &str, options: &[String], default: usize) -> Result<String> {
        match self.next(question)? {
            Answer::Text(text) if options.contains(&text) => Ok(text),
            Answer::Text(text) => bail!("{:?} is not an option of {:?}", text, question),
            Answer::Default => options
                .get(default)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("No default for {:?}", question)),
            Answer::Choices(_) => bail!("{:?} expects a single choice", question),
        }
    }

    fn choose_many(
        &mut self,
        question: &str,
        options: &[String],
        default: usize,
    ) -> Result<Vec<String>> {
        match self.next(question)? {
            Answer::Choices(choices) => {
                if let Some(bad) = choices.iter().find(|c| !options.contains(c)) {
                    bail!("{:?} is not an option of {:?}", bad, question);
                }
                Ok(choices)
            }
            Answer::Default => options
                .get(default)
                .map(|choice| vec![choice.clone()])
                .ok_or_else(|| anyhow::anyhow!("No default for {:?}", question)),
            Answer::Text(_) => bail!("{:?} expects choices", question),
        }
    }

    fn say(&mut self, tone: Tone, message: &str) -> Result<()> {
        self.said.push((tone, message.to_string()));
        Ok(())
    }
}

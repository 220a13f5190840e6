//! Package Maker Core - scaffolding for Laravel packages
//!
//! This library generates the skeleton of a new framework package from a
//! `group/package` name: README, changelog, composer manifest, phpunit config,
//! a service provider and a test bootstrap. It is used by the `make-package`
//! binary but has no terminal dependency outside the optional `tui` module.
//!
//! # Architecture
//!
//! - **Leaves** - `naming` (class/namespace derivation), `templates` (stub
//!   store and placeholder rendering), `fs` (filesystem seam and materializer)
//! - **Collaborators** - `runtime` (process runner, composer registration)
//! - **Session** - `session::Session` drives prompts, the artifact plan and
//!   registration through the `Prompter`, `FileSystem` and `ProcessRunner` seams
//! - **CLI/TUI Interface** - optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompter
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use package_maker_core::{MakerConfig, Session, SessionArgs};
//! use package_maker_core::fs::LocalFs;
//! use package_maker_core::prompt::AcceptDefaults;
//! use package_maker_core::runtime::TokioProcessRunner;
//!
//! let config = MakerConfig::default();
//! let mut prompter = AcceptDefaults;
//! let report = Session::new(&config, &mut prompter, &LocalFs, &TokioProcessRunner)
//!     .run(&SessionArgs::new("ambersive/demo"))
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod fs;
pub mod naming;
pub mod package;
pub mod prompt;
pub mod runtime;
pub mod session;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::MakerConfig;
pub use error::{ConfigError, MakeError, TemplateError};
pub use naming::DerivedNames;
pub use package::{GenerationReport, PackageName, PackageRequest};
pub use session::{Session, SessionArgs};
pub use templates::{render, TemplateStore, Tokens};

#[cfg(feature = "tui")]
pub use tui::run;

//! External collaborators
//!
//! This module provides:
//! - Process execution behind the `ProcessRunner` seam
//! - Composer registration of a generated package

pub mod composer;
pub mod process;

pub use composer::{Registrar, Registration, RegistrationReport};
pub use process::{CommandSpec, ProcessOutcome, ProcessRunner, RecordingRunner, TokioProcessRunner};

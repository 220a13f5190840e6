//! Stubs and placeholder rendering
//!
//! This module provides:
//! - The stub manifest type (StubManifest)
//! - Stub lookup from the embedded set or a local directory (TemplateStore)
//! - Literal placeholder substitution (Tokens, render)

pub mod manifest;
pub mod render;
pub mod store;

pub use manifest::StubManifest;
pub use render::{render, Tokens};
pub use store::{StubSource, TemplateDescriptor, TemplateStore};

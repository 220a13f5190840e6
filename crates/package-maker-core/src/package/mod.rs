//! Package request, artifact plan and generation report

pub mod plan;
pub mod report;
pub mod request;

pub use plan::{artifact_plan, package_tokens, Artifact, ArtifactKind};
pub use report::{GenerationReport, StepOutcome, StepStatus};
pub use request::{PackageName, PackageRequest};

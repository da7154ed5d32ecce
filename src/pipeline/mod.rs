//! Asset pipeline.
//!
//! Plays the role of the surrounding build system: discovers diagram
//! source files by rule, invokes the transformer per artifact, and
//! persists the rendered output under derived names.

pub mod naming;
pub mod runner;

pub use naming::artifact_name;
pub use runner::{BuildReport, Pipeline, RenderedArtifact};

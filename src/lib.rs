//! `plantpress` - build-time PlantUML diagram rendering pipeline.
//!
//! Converts textual diagram source into rendered image bytes by piping
//! it through an external renderer process, and wraps that transformer
//! in a small rule-driven asset pipeline.

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod pipeline;
pub mod transform;

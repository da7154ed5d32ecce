//! Diagram transformation.
//!
//! Bridges the asset pipeline to the external renderer: builds the
//! pipe-mode invocation and runs it as a child process with fully
//! asynchronous stream plumbing.

pub mod command;
pub mod process;

pub use command::RendererCommand;
pub use process::{AssetTransformer, ProcessTransformer};

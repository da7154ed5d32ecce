//! Renderer command construction.
//!
//! The renderer is always invoked in pipe mode: `-p` makes it read the
//! diagram from stdin and write the image to stdout, `-charset utf8`
//! fixes the input encoding, and `-t<format>` selects the output
//! encoding. A configured `renderer` command line replaces the program
//! (and any leading arguments, e.g. `java -jar plantuml.jar`); the pipe
//! flags are appended either way.

use crate::config::ResolvedOptions;
use crate::error::ConfigError;

/// An external renderer invocation: program plus argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererCommand {
    /// Program name or path.
    pub program: String,

    /// Arguments, in order.
    pub args: Vec<String>,
}

impl RendererCommand {
    /// Creates a command from explicit parts. Primarily useful for
    /// driving the transformer with a stub program in tests.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Builds the pipe-mode renderer invocation for resolved options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the `renderer` command
    /// line does not lex or is empty.
    pub fn for_options(options: &ResolvedOptions) -> Result<Self, ConfigError> {
        let mut tokens = shlex::split(&options.renderer)
            .filter(|tokens| !tokens.is_empty())
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "renderer".to_string(),
                value: options.renderer.clone(),
                expected: "a non-empty command line".to_string(),
            })?;

        let program = tokens.remove(0);
        let mut args = tokens;
        args.push("-p".to_string());
        args.push("-charset".to_string());
        args.push("utf8".to_string());
        args.push(format!("-t{}", options.format));

        Ok(Self { program, args })
    }
}

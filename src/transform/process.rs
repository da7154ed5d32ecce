//! Subprocess pipe transformer.
//!
//! Runs the external renderer as a child process, streams the source
//! into its stdin, and concurrently drains stdout and stderr until the
//! process exits. Writing and draining are joined futures on the
//! calling task, so a source larger than the OS pipe buffer cannot
//! deadlock against a full output pipe.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tracing::debug;

use crate::config::ResolvedOptions;
use crate::error::{ConfigError, TransformError};
use crate::transform::command::RendererCommand;

/// Read granularity for draining the child's output pipes.
const CHUNK_CAPACITY: usize = 8 * 1024;

/// A source-to-bytes transformation step.
///
/// The pipeline depends on this seam rather than on the process-backed
/// implementation directly.
#[async_trait]
pub trait AssetTransformer: Send + Sync {
    /// Transforms source bytes into rendered bytes.
    async fn transform(&self, source: Bytes) -> Result<Bytes, TransformError>;
}

/// Renders diagram source by piping it through an external renderer
/// process.
///
/// Each invocation owns an independent child process and independent
/// buffers; concurrent invocations do not share state.
#[derive(Debug, Clone)]
pub struct ProcessTransformer {
    command: RendererCommand,
    timeout: Option<Duration>,
}

impl ProcessTransformer {
    /// Creates a transformer that runs `command` with no deadline.
    #[must_use]
    pub const fn new(command: RendererCommand) -> Self {
        Self {
            command,
            timeout: None,
        }
    }

    /// Bounds each invocation by `timeout`. The child is reaped when the
    /// deadline fires.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds a transformer for resolved options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the renderer command
    /// line does not lex.
    pub fn from_options(options: &ResolvedOptions) -> Result<Self, ConfigError> {
        let command = RendererCommand::for_options(options)?;
        let mut transformer = Self::new(command);
        transformer.timeout = options.timeout;
        Ok(transformer)
    }

    /// The command this transformer runs.
    #[must_use]
    pub const fn command(&self) -> &RendererCommand {
        &self.command
    }

    async fn run(&self, source: Bytes) -> Result<Bytes, TransformError> {
        debug!(
            program = %self.command.program,
            args = ?self.command.args,
            source_len = source.len(),
            "spawning renderer"
        );

        let mut child = Command::new(&self.command.program)
            .args(&self.command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| TransformError::Spawn {
                program: self.command.program.clone(),
                source,
            })?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let feed = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            stdin.write_all(&source).await?;
            // Shutdown closes the pipe so the renderer sees end-of-input.
            stdin.shutdown().await?;
            Ok::<_, std::io::Error>(())
        };

        let io = async {
            let (fed, out, err) = tokio::join!(feed, drain(stdout), drain(stderr));
            let status = child.wait().await;
            (fed, out, err, status)
        };

        let (fed, out, err, status) = match self.timeout {
            None => io.await,
            Some(timeout) => tokio::time::timeout(timeout, io)
                .await
                .map_err(|_| TransformError::Timeout { timeout })?,
        };

        let stream_err = |source| TransformError::Stream { source };

        // Any error-stream content fails the call outright, even when
        // stdout also produced bytes; renderer diagnostics take
        // precedence over stream-plumbing errors.
        let err_chunks = err.map_err(stream_err)?;
        if !err_chunks.is_empty() {
            let message = err_chunks
                .iter()
                .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(TransformError::Render { message });
        }

        fed.map_err(stream_err)?;
        let out_chunks = out.map_err(stream_err)?;
        // The exit status is awaited but not consulted: only
        // error-stream content signals failure.
        let _status = status.map_err(stream_err)?;

        let total = out_chunks.iter().map(Bytes::len).sum();
        let mut rendered = BytesMut::with_capacity(total);
        for chunk in &out_chunks {
            rendered.extend_from_slice(chunk);
        }

        debug!(rendered_len = rendered.len(), "renderer exited cleanly");
        Ok(rendered.freeze())
    }
}

#[async_trait]
impl AssetTransformer for ProcessTransformer {
    async fn transform(&self, source: Bytes) -> Result<Bytes, TransformError> {
        self.run(source).await
    }
}

/// Drains a pipe to EOF, preserving chunk boundaries in arrival order.
async fn drain<R: AsyncRead + Unpin>(reader: Option<R>) -> std::io::Result<Vec<Bytes>> {
    let mut chunks = Vec::new();
    let Some(mut reader) = reader else {
        return Ok(chunks);
    };
    loop {
        let mut buf = BytesMut::with_capacity(CHUNK_CAPACITY);
        let n = reader.read_buf(&mut buf).await?;
        if n == 0 {
            return Ok(chunks);
        }
        chunks.push(buf.freeze());
    }
}

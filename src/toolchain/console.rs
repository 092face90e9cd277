//! The interactive `clarinet console` process.
//!
//! Stdin stays open for [`ConsoleSession::send`]; stdout and stderr are read line by line on background tasks and
//! handed to the caller's callback as they arrive.

use std::process::Stdio;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin};
use tokio::task::JoinHandle;

use super::{Toolchain, ToolchainCommand, ToolchainError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleLine {
    Stdout(String),
    Stderr(String),
}

impl ConsoleLine {
    pub fn text(&self) -> &str {
        match self {
            ConsoleLine::Stdout(s) | ConsoleLine::Stderr(s) => s,
        }
    }
}

pub type LineCallback = Arc<dyn Fn(ConsoleLine) + Send + Sync>;

pub struct ConsoleSession {
    child: Child,
    stdin: ChildStdin,
    readers: Vec<JoinHandle<()>>,
    command: String,
}

impl ConsoleSession {
    /// Start `<executable> console` in the project directory.
    pub fn spawn(toolchain: &Toolchain, on_line: LineCallback) -> Result<Self, ToolchainError> {
        let cmd = ToolchainCommand::Console;
        let command = toolchain.command_line(&cmd);
        let mut child = toolchain
            .command(&cmd)?
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| toolchain.spawn_error(&command, e))?;

        let io_error = |what: &str| ToolchainError::Io {
            command: command.clone(),
            source: std::io::Error::other(format!("console {what} was not captured")),
        };
        let stdin = child.stdin.take().ok_or_else(|| io_error("stdin"))?;
        let stdout = child.stdout.take().ok_or_else(|| io_error("stdout"))?;
        let stderr = child.stderr.take().ok_or_else(|| io_error("stderr"))?;

        let readers = vec![
            forward_lines(stdout, on_line.clone(), ConsoleLine::Stdout),
            forward_lines(stderr, on_line, ConsoleLine::Stderr),
        ];
        tracing::info!(command = %command, "console started");
        Ok(Self {
            child,
            stdin,
            readers,
            command,
        })
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Write one line (a newline is appended) to the console.
    pub async fn send(&mut self, line: &str) -> Result<(), ToolchainError> {
        tracing::debug!(line, "console input");
        let payload = format!("{}\n", line.trim_end_matches(['\r', '\n']));
        let io = |source| ToolchainError::Io {
            command: self.command.clone(),
            source,
        };
        self.stdin.write_all(payload.as_bytes()).await.map_err(io)?;
        self.stdin.flush().await.map_err(io)
    }

    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Kill the process and stop the output readers.
    pub async fn shutdown(mut self) {
        if let Err(err) = self.child.kill().await {
            tracing::debug!(error = %err, "console already exited");
        }
        for reader in self.readers.drain(..) {
            reader.abort();
        }
        tracing::info!("console stopped");
    }
}

fn forward_lines<R>(stream: R, on_line: LineCallback, wrap: fn(String) -> ConsoleLine) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => on_line(wrap(line)),
                Ok(None) => break,
                Err(err) => {
                    tracing::warn!(error = %err, "console output stopped");
                    break;
                }
            }
        }
    })
}

//! Bridge to the external `clarinet` toolchain.
//!
//! Every command runs in the project directory with the configured executable. Failures (no workspace, missing
//! executable, non-zero exit) surface as one [`ToolchainError`]; nothing is retried.
//!
//! ## Module Structure
//!
//! - `mod.rs` - one-shot commands (`new`, `deployments generate`, `--version`)
//! - `console` - the long-running interactive `console` process

pub mod console;

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::process::Command;

pub use console::ConsoleSession;

pub const DEFAULT_PROJECT_PATH: &str = "./smart-contract";

// ============================================================================
// Commands
// ============================================================================

/// Target network for deployment plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
    Local,
}

impl Network {
    pub const ALL: [Network; 4] = [Network::Mainnet, Network::Testnet, Network::Devnet, Network::Local];

    pub fn as_str(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
            Network::Local => "local",
        }
    }

    /// Human label shown in pickers.
    pub fn label(self) -> &'static str {
        match self {
            Network::Mainnet => "Mainnet",
            Network::Testnet => "Testnet",
            Network::Devnet => "Devnet",
            Network::Local => "Local",
        }
    }

    /// The command-line flag, e.g. `--testnet`.
    pub fn flag(self) -> String {
        format!("--{}", self.as_str())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .into_iter()
            .find(|n| n.as_str().eq_ignore_ascii_case(s) || n.label() == s)
            .ok_or_else(|| format!("Unknown network: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolchainCommand {
    NewProject { path: String },
    Console,
    GenerateDeployment { network: Network },
    Version,
}

impl ToolchainCommand {
    /// `new ./smart-contract`
    pub fn new_project() -> Self {
        ToolchainCommand::NewProject {
            path: DEFAULT_PROJECT_PATH.to_string(),
        }
    }

    pub fn args(&self) -> Vec<String> {
        match self {
            ToolchainCommand::NewProject { path } => vec!["new".into(), path.clone()],
            ToolchainCommand::Console => vec!["console".into()],
            ToolchainCommand::GenerateDeployment { network } => {
                vec!["deployments".into(), "generate".into(), network.flag()]
            }
            ToolchainCommand::Version => vec!["--version".into()],
        }
    }
}

// ============================================================================
// Errors and output
// ============================================================================

#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("Open a Clarity project folder first.")]
    NoWorkspace,

    #[error("'{executable}' was not found. Install Clarinet or set clarinetPath.")]
    NotFound { executable: String },

    #[error("'{command}' failed ({status}): {detail}")]
    Failed {
        command: String,
        status: String,
        detail: String,
    },

    #[error("'{command}': {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainOutput {
    pub command: String,
    pub stdout: String,
    pub stderr: String,
}

// ============================================================================
// Toolchain
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub executable: String,
    /// Workspace root; commands refuse to run without one.
    pub project_dir: Option<PathBuf>,
}

impl Toolchain {
    pub fn new(executable: impl Into<String>, project_dir: Option<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            project_dir,
        }
    }

    /// The shell text for `cmd`, with the configured executable in place of `clarinet`.
    pub fn command_line(&self, cmd: &ToolchainCommand) -> String {
        std::iter::once(self.executable.clone())
            .chain(cmd.args())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn project_dir(&self) -> Result<&Path, ToolchainError> {
        self.project_dir.as_deref().ok_or(ToolchainError::NoWorkspace)
    }

    pub(crate) fn command(&self, cmd: &ToolchainCommand) -> Result<Command, ToolchainError> {
        let dir = self.project_dir()?;
        let mut command = Command::new(&self.executable);
        command.args(cmd.args()).current_dir(dir).kill_on_drop(true);
        Ok(command)
    }

    /// Run `cmd` to completion, capturing its output.
    #[tracing::instrument(skip(self), fields(executable = %self.executable))]
    pub async fn run(&self, cmd: &ToolchainCommand) -> Result<ToolchainOutput, ToolchainError> {
        let line = self.command_line(cmd);
        let output = self
            .command(cmd)?
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(&line, e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        check_status(&line, output.status, &stderr)?;
        tracing::debug!(command = %line, "toolchain command finished");
        Ok(ToolchainOutput {
            command: line,
            stdout,
            stderr,
        })
    }

    /// Run `cmd` with the terminal's stdio attached, for interactive CLI use.
    pub async fn run_inherited(&self, cmd: &ToolchainCommand) -> Result<(), ToolchainError> {
        let line = self.command_line(cmd);
        let status = self
            .command(cmd)?
            .status()
            .await
            .map_err(|e| self.spawn_error(&line, e))?;
        check_status(&line, status, "")
    }

    /// Whether `<executable> --version` runs successfully. Does not need a workspace.
    pub async fn is_available(&self) -> bool {
        Command::new(&self.executable)
            .args(ToolchainCommand::Version.args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok_and(|s| s.success())
    }

    pub(crate) fn spawn_error(&self, command: &str, err: std::io::Error) -> ToolchainError {
        if err.kind() == std::io::ErrorKind::NotFound {
            ToolchainError::NotFound {
                executable: self.executable.clone(),
            }
        } else {
            ToolchainError::Io {
                command: command.to_string(),
                source: err,
            }
        }
    }
}

fn check_status(command: &str, status: ExitStatus, stderr: &str) -> Result<(), ToolchainError> {
    if status.success() {
        return Ok(());
    }
    let detail = stderr
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("no output")
        .to_string();
    Err(ToolchainError::Failed {
        command: command.to_string(),
        status: status.to_string(),
        detail,
    })
}

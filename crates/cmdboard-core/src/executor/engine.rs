//! The execution engine and its result type.

use std::io;
use std::process::Stdio;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::mode::ExecutionMode;
use super::platform;
use crate::model::SlotRef;

/// Output reported for commands that run in their own console.
pub const EXTERNAL_WINDOW_MESSAGE: &str = "Command executed in external window.";

/// Program used to open a visible console on hosts without `cmd.exe`.
pub const DEFAULT_TERMINAL: &str = "x-terminal-emulator";

/// A resolved command bound to the slot that launched it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub slot: SlotRef,
    pub command: String,
}

impl ExecutionRequest {
    pub fn new(slot: SlotRef, command: impl Into<String>) -> Self {
        Self { slot, command: command.into() }
    }
}

/// Outcome of one execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Slot that launched the command.
    pub slot: SlotRef,
    /// Captured stdout, `"Error: " + stderr`, the external-window notice,
    /// or `"Error: " + reason` when the process could not be started.
    pub output: String,
    /// False only when the process could not be started.
    pub success: bool,
    pub mode: ExecutionMode,
}

impl ExecutionResult {
    /// Index of the slot within its page.
    pub fn index(&self) -> usize {
        self.slot.index
    }

    /// Heading for the result: the slot's ordinal, or `Error` for a failed start.
    pub fn title(&self) -> String {
        if self.success { format!("Output of Command {}", self.slot.ordinal()) } else { "Error".to_string() }
    }

    /// Whether the result carries something worth showing the user.
    ///
    /// Visible-mode launches and empty captured output are not shown;
    /// failures always are.
    pub fn should_display(&self) -> bool {
        if !self.success {
            return true;
        }
        !self.mode.is_visible() && !self.output.is_empty()
    }
}

/// Something that runs resolved commands to completion.
///
/// The controller talks to this seam so tests can substitute a runner that
/// records requests instead of spawning processes.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs one request. Never fails: start-up failures come back as an
    /// unsuccessful [`ExecutionResult`].
    async fn run(&self, request: ExecutionRequest) -> ExecutionResult;
}

/// Spawns and supervises one child process per request.
#[derive(Debug, Clone)]
pub struct ExecutionEngine {
    terminal: String,
}

impl ExecutionEngine {
    pub fn new() -> Self {
        Self { terminal: DEFAULT_TERMINAL.to_string() }
    }

    /// Sets the terminal program used for visible consoles on non-Windows hosts.
    #[must_use]
    pub fn with_terminal(mut self, terminal: impl Into<String>) -> Self {
        self.terminal = terminal.into();
        self
    }

    /// Starts `command` on its own task and returns immediately.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn execute(&self, command: String, slot: SlotRef) -> JoinHandle<ExecutionResult> {
        let engine = self.clone();
        tokio::spawn(async move { engine.run(ExecutionRequest::new(slot, command)).await })
    }

    async fn run_request(&self, request: ExecutionRequest) -> ExecutionResult {
        let mode = ExecutionMode::select(&request.command);
        info!(slot = request.slot.ordinal(), command = %request.command, ?mode, "Executing command");

        let outcome = match mode {
            ExecutionMode::Captured => self.run_captured(&request.command).await,
            ExecutionMode::Visible { elevated, script } => self
                .launch_visible(&request.command, elevated, script)
                .await
                .map(|()| EXTERNAL_WINDOW_MESSAGE.to_string()),
        };

        match outcome {
            Ok(output) => {
                debug!(slot = request.slot.ordinal(), bytes = output.len(), "Command finished");
                ExecutionResult { slot: request.slot, output, success: true, mode }
            }
            Err(e) => {
                warn!(slot = request.slot.ordinal(), error = %e, "Failed to start command");
                ExecutionResult {
                    slot: request.slot,
                    output: format!("Error: {}", e),
                    success: false,
                    mode,
                }
            }
        }
    }

    /// Runs through the shell with redirected streams.
    ///
    /// Both pipes are drained while waiting for exit, so a chatty child can
    /// never block on a full pipe buffer.
    async fn run_captured(&self, command: &str) -> io::Result<String> {
        let output = platform::captured_command(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(status = ?output.status, "Captured command exited");

        if stderr.is_empty() { Ok(stdout) } else { Ok(format!("Error: {}", stderr)) }
    }

    /// Opens a persistent console. The child is reaped in the background so
    /// its handles are released once the user closes the console.
    async fn launch_visible(&self, command: &str, elevated: bool, script: bool) -> io::Result<()> {
        #[cfg(windows)]
        {
            if elevated {
                let command = command.to_string();
                return tokio::task::spawn_blocking(move || platform::launch_elevated(&command, script))
                    .await
                    .map_err(io::Error::other)?;
            }
        }

        let mut child = platform::visible_command(command, elevated, script, &self.terminal)
            .stdin(Stdio::null())
            .spawn()?;

        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => debug!(?status, "Console closed"),
                Err(e) => warn!(error = %e, "Failed to wait for console"),
            }
        });
        Ok(())
    }
}

impl Default for ExecutionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for ExecutionEngine {
    async fn run(&self, request: ExecutionRequest) -> ExecutionResult {
        self.run_request(request).await
    }
}

//! External copy process.
//!
//! Builds `<tool> <args...> <source> <destination>`, spawns it with piped
//! output and exposes stdout as an `OutputLines` stream. Stderr is drained by
//! a background task so the child never blocks on a full pipe.

use crate::config::LibrarySettings;
use crate::platform::PlatformCommands;
use crate::transfer::output::OutputLines;
use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStderr, ChildStdout, Command};
use tokio::task::JoinHandle;
use tracing::debug;

/// A fully built copy command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyCommand {
    program: String,
    args: Vec<String>,
}

impl CopyCommand {
    pub fn new(settings: &LibrarySettings, source: &str, destination: &Path) -> Self {
        let platform = PlatformCommands::instance();
        let program = platform.get_command(&settings.transfer_tool).to_string();

        let mut args = settings.transfer_args.clone();
        args.push(source.to_string());
        args.push(destination.to_string_lossy().to_string());

        Self { program, args }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Launch the tool
    pub fn spawn(&self) -> Result<RunningCopy> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to launch `{self}`"))?;

        let stdout = child
            .stdout
            .take()
            .with_context(|| format!("Failed to capture {} output", self.program))?;

        let stderr_task = child.stderr.take().map(|stderr| tokio::spawn(collect_stderr(stderr)));

        Ok(RunningCopy {
            program: self.program.clone(),
            child,
            lines: OutputLines::new(BufReader::new(stdout)),
            stderr_task,
        })
    }
}

impl fmt::Display for CopyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// How the copy process ended
#[derive(Debug, Clone)]
pub struct CopyExit {
    pub success: bool,
    /// `None` when killed by a signal
    pub code: Option<i32>,
    pub stderr: String,
}

/// A spawned copy process whose stdout is being consumed
pub struct RunningCopy {
    program: String,
    child: Child,
    lines: OutputLines<BufReader<ChildStdout>>,
    stderr_task: Option<JoinHandle<String>>,
}

impl RunningCopy {
    /// Next output record, `None` once the tool closes stdout
    pub async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.lines.next_line().await
    }

    /// Wait for the process to exit
    pub async fn wait(mut self) -> Result<CopyExit> {
        let status = self
            .child
            .wait()
            .await
            .with_context(|| format!("Failed to wait for {}", self.program))?;

        let stderr = match self.stderr_task.take() {
            Some(task) => task.await.unwrap_or_default(),
            None => String::new(),
        };

        Ok(CopyExit {
            success: status.success(),
            code: status.code(),
            stderr,
        })
    }
}

async fn collect_stderr(stderr: ChildStderr) -> String {
    let mut reader = BufReader::new(stderr);
    let mut collected = String::new();
    let mut buf = Vec::new();

    // Non UTF-8 lines (raw file names) must not stop the drain: a closed
    // pipe would kill the tool on its next write.
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&buf);
                let line = text.trim_end_matches(&['\r', '\n'][..]);
                debug!("Process error output: {}", line);
                collected.push_str(line);
                collected.push('\n');
            }
            Err(e) => {
                debug!("Failed to read process error output: {}", e);
                break;
            }
        }
    }

    collected
}

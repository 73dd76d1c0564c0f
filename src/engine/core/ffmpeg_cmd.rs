use super::cancel::CancelToken;
use super::types::{FileTask, Job};
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

/// How often a running encoder is checked for exit or cancellation
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Program used to run the encoder, plus any arguments that precede the
/// per-file ones (a wrapper script, for instance).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderCommand {
    pub program: PathBuf,
    pub leading_args: Vec<OsString>,
}

impl EncoderCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args);
        cmd
    }
}

impl Default for EncoderCommand {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

/// Build the encoder invocation for one file.
/// The encoder writes to the task's partial path.
/// Returns the command but does not execute it.
pub fn build_encoder_cmd(encoder: &EncoderCommand, job: &Job, task: &FileTask) -> Command {
    let mut cmd = encoder.command();

    cmd.arg("-hide_banner")
        .arg("-loglevel")
        .arg("error")
        .arg("-nostdin");

    // Never prompt: stdin is closed, so decide up front
    cmd.arg(if job.overwrite { "-y" } else { "-n" });

    cmd.arg("-i").arg(&task.input_path);
    cmd.args(job.preset.codec_args());

    if let Some(limit) = job.size_cap.ffmpeg_limit() {
        cmd.arg("-fs").arg(limit);
    }

    cmd.arg(&task.partial_path);
    cmd
}

/// Format a command as a shell-safe string for display
pub fn format_cmd(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().into_owned()));

    shlex::try_join(parts.iter().map(String::as_str)).unwrap_or_else(|_| parts.join(" "))
}

/// Result of one encoder run
#[derive(Debug)]
pub enum EncodeOutcome {
    Success,
    Failed { status: ExitStatus, stderr: String },
    /// The run was killed because the batch was stopped
    Cancelled,
}

/// Run the encoder to completion, capturing stderr.
///
/// The child is polled until it exits. It is killed once the token asks for
/// it: always after `kill`, and after `cancel` only with `interrupt_on_stop`.
pub fn run_encoder(
    mut cmd: Command,
    token: &CancelToken,
    interrupt_on_stop: bool,
) -> Result<EncodeOutcome> {
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn().with_context(|| {
        format!(
            "Failed to spawn encoder {}",
            cmd.get_program().to_string_lossy()
        )
    })?;

    let mut stderr = child.stderr.take().context("Failed to capture stderr")?;
    let stderr_thread = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stderr.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    });

    let (status, interrupted) = loop {
        if let Some(status) = child.try_wait().context("Failed to poll encoder")? {
            break (status, false);
        }
        if token.should_interrupt(interrupt_on_stop) {
            // Fails harmlessly if the child exited since the last poll
            let _ = child.kill();
            let status = child.wait().context("Failed to wait for encoder")?;
            break (status, true);
        }
        thread::sleep(POLL_INTERVAL);
    };

    let stderr_output = stderr_thread
        .join()
        .unwrap_or_else(|_| "Failed to capture stderr".to_string());

    Ok(classify_exit(status, interrupted, stderr_output))
}

/// A child that exited cleanly before the kill landed still counts as done
fn classify_exit(status: ExitStatus, interrupted: bool, stderr: String) -> EncodeOutcome {
    if status.success() {
        EncodeOutcome::Success
    } else if interrupted {
        EncodeOutcome::Cancelled
    } else {
        EncodeOutcome::Failed { status, stderr }
    }
}

//! Subject invocation
//!
//! Runs `<subject> [args...] <mode> <fixture>` as a child process, one fixture at a time, and buffers its
//! standard output and standard error in memory so the reporter can show them only when a case fails.
//!
//! ## Waiting
//!
//! Without a timeout the invoker blocks until the child exits. With a timeout, both pipes are drained on
//! reader threads (so a chatty child cannot fill a pipe and stall) while the calling thread polls the child.
//! On deadline the child is killed and reaped, and the result is marked as timed out.
//!
//! Killing only reaches the direct child. Helpers it forked may keep the pipes open after it is gone, so
//! output is collected for a short grace period only; whatever arrives later is dropped and the run moves on.

use std::borrow::Cow;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use harness_core::FixtureId;

use super::interfaces::{HarnessError, SubjectInvoker};
use crate::config::{DEFAULT_MODE_ARG, HarnessConfig};

/// How often a child is polled while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How long output is still collected after the subject has been reaped.
const OUTPUT_GRACE: Duration = Duration::from_millis(100);

/// What one invocation of the subject produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResult {
    /// Exit code, or `None` if the child was terminated by a signal
    pub exit_code: Option<i32>,
    /// Terminating signal (Unix only)
    pub signal: Option<i32>,
    /// Captured standard output
    pub stdout: Vec<u8>,
    /// Captured standard error
    pub stderr: Vec<u8>,
    /// The child was killed because the timeout elapsed
    pub timed_out: bool,
    /// Wall-clock time from spawn to exit
    pub duration: Duration,
}

impl InvocationResult {
    /// Build a result from an exit status and captured output.
    pub fn from_status(status: ExitStatus, stdout: Vec<u8>, stderr: Vec<u8>, duration: Duration) -> Self {
        Self {
            exit_code: status.code(),
            signal: exit_signal(&status),
            stdout,
            stderr,
            timed_out: false,
            duration,
        }
    }

    /// Build a result for a child that exited with `code`.
    ///
    /// Mostly useful for fake invokers in tests.
    pub fn exited(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            signal: None,
            stdout: Vec::new(),
            stderr: Vec::new(),
            timed_out: false,
            duration: Duration::ZERO,
        }
    }

    /// Attach captured output.
    pub fn with_output(mut self, stdout: impl Into<Vec<u8>>, stderr: impl Into<Vec<u8>>) -> Self {
        self.stdout = stdout.into();
        self.stderr = stderr.into();
        self
    }

    pub fn stdout_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    pub fn stderr_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }

    /// Describe how the child ended (`exit 0`, `signal 9`, `timed out after 5.00s`).
    pub fn status_label(&self) -> String {
        if self.timed_out {
            return format!("timed out after {:.2}s", self.duration.as_secs_f64());
        }
        match (self.exit_code, self.signal) {
            (Some(code), _) => format!("exit {}", code),
            (None, Some(signal)) => format!("signal {}", signal),
            (None, None) => "terminated".to_string(),
        }
    }
}

#[cfg(unix)]
fn exit_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

/// Invoke the subject as a child process.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    subject: PathBuf,
    subject_args: Vec<String>,
    mode_arg: String,
    timeout: Option<Duration>,
}

impl ProcessInvoker {
    pub fn new(subject: impl Into<PathBuf>) -> Self {
        Self {
            subject: subject.into(),
            subject_args: Vec::new(),
            mode_arg: DEFAULT_MODE_ARG.to_string(),
            timeout: None,
        }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self {
            subject: config.subject.clone(),
            subject_args: config.subject_args.clone(),
            mode_arg: config.mode_arg.clone(),
            timeout: config.timeout,
        }
    }

    /// Place `args` between the subject and the mode argument.
    pub fn with_subject_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.subject_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_mode_arg(mut self, mode: impl Into<String>) -> Self {
        self.mode_arg = mode.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self, fixture: &FixtureId) -> Command {
        let mut command = Command::new(&self.subject);
        command
            .args(&self.subject_args)
            .arg(&self.mode_arg)
            .arg(fixture.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    fn spawn_error(&self, source: io::Error) -> HarnessError {
        if source.kind() == io::ErrorKind::NotFound {
            HarnessError::SubjectNotFound {
                subject: self.subject.clone(),
            }
        } else {
            HarnessError::Spawn {
                subject: self.subject.clone(),
                source,
            }
        }
    }
}

impl SubjectInvoker for ProcessInvoker {
    #[tracing::instrument(skip(self), fields(fixture = %fixture))]
    fn invoke(&self, fixture: &FixtureId) -> Result<InvocationResult, HarnessError> {
        let started_at = Instant::now();
        let child = self.command(fixture).spawn().map_err(|e| self.spawn_error(e))?;

        let result = match self.timeout {
            None => {
                let output = child.wait_with_output().map_err(|source| HarnessError::Wait {
                    fixture: fixture.clone(),
                    source,
                })?;
                InvocationResult::from_status(output.status, output.stdout, output.stderr, started_at.elapsed())
            }
            Some(timeout) => wait_with_timeout(child, timeout, fixture, started_at)?,
        };

        tracing::debug!(
            exit_code = ?result.exit_code,
            timed_out = result.timed_out,
            duration_ms = result.duration.as_millis() as u64,
            "subject finished"
        );
        Ok(result)
    }
}

fn wait_with_timeout(
    mut child: Child,
    timeout: Duration,
    fixture: &FixtureId,
    started_at: Instant,
) -> Result<InvocationResult, HarnessError> {
    let stdout_reader = child.stdout.take().map(spawn_reader);
    let stderr_reader = child.stderr.take().map(spawn_reader);
    let deadline = started_at + timeout;

    let (status, timed_out) = loop {
        match child.try_wait() {
            Ok(Some(status)) => break (status, false),
            Ok(None) => {
                if Instant::now() >= deadline {
                    tracing::warn!("fixture {} exceeded {:.2}s; killing subject", fixture, timeout.as_secs_f64());
                    let killed = child.kill();
                    let status = child.wait().map_err(|source| HarnessError::Wait {
                        fixture: fixture.clone(),
                        source,
                    })?;
                    let timed_out = killed_by_timeout(killed, &status);
                    break (status, timed_out);
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(HarnessError::Wait {
                    fixture: fixture.clone(),
                    source,
                });
            }
        }
    };

    // Descendants of the subject may still hold the pipes open; stop collecting once the grace period ends
    let drain_deadline = deadline.max(Instant::now()) + OUTPUT_GRACE;
    let stdout = collect_output(stdout_reader, drain_deadline);
    let stderr = collect_output(stderr_reader, drain_deadline);

    let mut result = InvocationResult::from_status(status, stdout, stderr, started_at.elapsed());
    result.timed_out = timed_out;
    Ok(result)
}

/// Decide whether the kill sent at the deadline is what ended the child.
///
/// The child can exit on its own between the last poll and the kill. In that case the kill fails with
/// `InvalidInput`, or (on Unix) the reaped status carries a normal exit code instead of a signal.
fn killed_by_timeout(kill: io::Result<()>, status: &ExitStatus) -> bool {
    match kill {
        Err(e) if e.kind() == io::ErrorKind::InvalidInput => false,
        _ if cfg!(unix) => status.code().is_none(),
        _ => true,
    }
}

/// Forward everything read from `pipe` to the returned channel, chunk by chunk.
///
/// The thread ends when every writer has closed the pipe. Nothing joins it, so a descendant that keeps the
/// pipe open cannot hold up the run.
fn spawn_reader<R>(mut pipe: R) -> Receiver<Vec<u8>>
where
    R: Read + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = [0u8; 8192];
        loop {
            match pipe.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    if sender.send(buf[..n].to_vec()).is_err() {
                        break;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
    });
    receiver
}

/// Gather the chunks a reader forwarded until it finishes or `deadline` passes.
fn collect_output(reader: Option<Receiver<Vec<u8>>>, deadline: Instant) -> Vec<u8> {
    let mut output = Vec::new();
    let Some(reader) = reader else {
        return output;
    };

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match reader.recv_timeout(remaining) {
            Ok(chunk) => output.extend_from_slice(&chunk),
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                tracing::debug!("output pipe still open after the subject ended; keeping partial output");
                break;
            }
        }
    }
    output
}

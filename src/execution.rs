//! Bounded-time execution of one example under the interpreter.
//!
//! Each invocation moves through
//!
//! ```text
//! Spawned -> Running -> Completed(status)
//!                    -> TimedOut      (child killed and reaped)
//!                    -> Interrupted   (child killed and reaped)
//! ```
//!
//! The only way out of `Running` into `TimedOut` or `Interrupted` is through
//! [`terminate`], so no child outlives its own classification.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tracing::{debug, trace, warn};

use crate::discovery::Candidate;
use crate::errors::HarnessError;
use crate::outcome::Outcome;

/// Interpreter location relative to the repository root.
pub const DEFAULT_INTERPRETER: &str = "./franz";

/// Enough for the slowest known-good example.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The external interpreter and the wall-clock budget for each example.
#[derive(Debug, Clone)]
pub struct Interpreter {
    program: PathBuf,
    timeout: Duration,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(DEFAULT_INTERPRETER, DEFAULT_TIMEOUT)
    }
}

impl Interpreter {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Checks what can be checked before anything runs.
    ///
    /// A bare command name is left to `PATH` lookup at spawn time; anything
    /// with a directory part must name an existing file.
    pub fn verify(&self) -> Result<(), HarnessError> {
        if self.timeout.is_zero() {
            return Err(HarnessError::InvalidTimeout);
        }
        if self.program.components().count() > 1 && !self.program.is_file() {
            return Err(HarnessError::InterpreterNotFound {
                path: self.program.clone(),
            });
        }
        Ok(())
    }

    /// Runs one candidate to a verdict. Exactly one attempt, no retries.
    ///
    /// Nonzero exits and timeouts are outcomes; only a failure to start or
    /// track the child, or an operator interrupt, is an error.
    pub async fn execute(&self, candidate: &Candidate, interrupt: &mut Interrupt) -> Result<Outcome, HarnessError> {
        let mut state = Execution::Spawned(self.spawn(candidate)?);
        loop {
            state = match state {
                Execution::Spawned(child) => {
                    debug!(pid = child.id(), path = %candidate.path().display(), "interpreter started");
                    Execution::Running(child)
                }
                Execution::Running(child) => self.supervise(child, candidate, interrupt).await?,
                Execution::Completed(status) => return Ok(classify(status)),
                Execution::TimedOut => return Ok(Outcome::TimedOut),
                Execution::Interrupted => return Err(HarnessError::Interrupted),
            };
        }
    }

    fn spawn(&self, candidate: &Candidate) -> Result<Child, HarnessError> {
        Command::new(&self.program)
            .arg(candidate.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| HarnessError::Spawn {
                interpreter: self.program.clone(),
                source,
            })
    }

    /// Waits for the child while draining its output, bounded by the timeout.
    async fn supervise(
        &self,
        mut child: Child,
        candidate: &Candidate,
        interrupt: &mut Interrupt,
    ) -> Result<Execution, HarnessError> {
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let wake = {
            let finished = async {
                let (status, out, err) = tokio::join!(child.wait(), drain(stdout), drain(stderr));
                trace!(stdout_bytes = out, stderr_bytes = err, "discarding captured output");
                status
            };
            tokio::select! {
                waited = tokio::time::timeout(self.timeout, finished) => match waited {
                    Ok(status) => Wake::Exited(status),
                    Err(_) => Wake::Elapsed,
                },
                () = interrupt.received() => Wake::Interrupt,
            }
        };

        let lost = |source: io::Error| HarnessError::Wait {
            path: candidate.path().to_path_buf(),
            source,
        };

        match wake {
            Wake::Exited(status) => status.map(Execution::Completed).map_err(lost),
            Wake::Elapsed => {
                warn!(
                    path = %candidate.path().display(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "example exceeded its time budget, killing interpreter"
                );
                terminate(&mut child).await.map_err(lost)?;
                Ok(Execution::TimedOut)
            }
            Wake::Interrupt => {
                warn!(path = %candidate.path().display(), "interrupted, killing interpreter");
                terminate(&mut child).await.map_err(lost)?;
                Ok(Execution::Interrupted)
            }
        }
    }
}

enum Execution {
    Spawned(Child),
    Running(Child),
    Completed(ExitStatus),
    TimedOut,
    Interrupted,
}

enum Wake {
    Exited(io::Result<ExitStatus>),
    Elapsed,
    Interrupt,
}

/// Kills and reaps the child.
async fn terminate(child: &mut Child) -> io::Result<()> {
    match child.kill().await {
        Ok(()) => Ok(()),
        // The child may have exited on its own while its pipes were still open.
        Err(e) => match child.try_wait() {
            Ok(Some(_)) => Ok(()),
            _ => Err(e),
        },
    }
}

async fn drain<R: AsyncRead + Unpin>(pipe: Option<R>) -> usize {
    let Some(mut pipe) = pipe else {
        return 0;
    };
    let mut captured = Vec::new();
    let _ = pipe.read_to_end(&mut captured).await;
    captured.len()
}

#[cfg(unix)]
type Listener = tokio::signal::unix::Signal;

#[cfg(windows)]
type Listener = tokio::signal::windows::CtrlC;

#[cfg(unix)]
fn listen() -> io::Result<Listener> {
    use tokio::signal::unix::{signal, SignalKind};
    signal(SignalKind::interrupt())
}

#[cfg(windows)]
fn listen() -> io::Result<Listener> {
    tokio::signal::windows::ctrl_c()
}

/// Operator interrupt (Ctrl-C) listener, installed once per run.
///
/// An interrupt that arrives while no child is running stays queued until
/// the next [`Interrupt::check`] or execution picks it up.
pub struct Interrupt {
    listener: Option<Listener>,
}

impl Interrupt {
    /// Must be called from inside a runtime with signal support enabled.
    pub fn install() -> Self {
        match listen() {
            Ok(listener) => Self {
                listener: Some(listener),
            },
            Err(e) => {
                warn!("cannot listen for Ctrl-C, interrupts will not stop the run cleanly: {}", e);
                Self { listener: None }
            }
        }
    }

    /// Fails with [`HarnessError::Interrupted`] if an interrupt is pending.
    /// Never waits for one.
    pub async fn check(&mut self) -> Result<(), HarnessError> {
        // Lets the driver deliver a signal that has already arrived.
        tokio::task::yield_now().await;
        tokio::select! {
            biased;
            () = self.received() => Err(HarnessError::Interrupted),
            () = std::future::ready(()) => Ok(()),
        }
    }

    /// Resolves on the next interrupt; never resolves without a listener.
    async fn received(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            if listener.recv().await.is_some() {
                return;
            }
        }
        std::future::pending::<()>().await
    }
}

fn classify(status: ExitStatus) -> Outcome {
    if status.success() {
        Outcome::Passed
    } else {
        Outcome::Failed(exit_code(status))
    }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|signal| -signal))
        .unwrap_or(-1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

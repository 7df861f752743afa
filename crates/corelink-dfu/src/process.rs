//! Child-process execution with an optional completion deadline
//!
//! Every programmer invocation in this crate goes through [`run`] so that
//! output capture and timeout behavior are uniform.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Poll interval while waiting for the child to exit
const WAIT_POLL: Duration = Duration::from_millis(50);

/// Captured result of a completed child process
#[derive(Debug)]
pub struct Captured {
    /// Exit status of the process
    pub status: ExitStatus,
    /// Everything the process wrote to stdout
    pub stdout: String,
    /// Everything the process wrote to stderr
    pub stderr: String,
}

/// Run `cmd` to completion, capturing stdout and stderr.
///
/// With a deadline set, completion races against the timer and only the
/// first outcome is honored: a child that outlives the window is killed
/// and reaped, so it cannot surface a late result.
pub fn run(mut cmd: Command, timeout: Option<Duration>) -> Result<Captured> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|source| Error::Spawn {
        program: program.clone(),
        source,
    })?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    match wait_with_deadline(&mut child, &program, timeout) {
        Ok(status) => Ok(Captured {
            status,
            stdout: collect(stdout),
            stderr: collect(stderr),
        }),
        Err(e) => {
            // A killed child may leave grandchildren holding the pipe
            // write ends open; do not block on the drain threads here.
            drop(stdout);
            drop(stderr);
            Err(e)
        }
    }
}

/// Wait for the child, honoring whichever of exit and deadline comes first
fn wait_with_deadline(
    child: &mut Child,
    program: &str,
    timeout: Option<Duration>,
) -> Result<ExitStatus> {
    let deadline = timeout.map(|t| Instant::now() + t);

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }

        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                child.kill().ok();
                child.wait().ok();
                return Err(Error::Timeout {
                    program: program.to_string(),
                    // timeout is always Some when deadline is
                    after: timeout.unwrap_or_default(),
                });
            }
        }

        thread::sleep(WAIT_POLL);
    }
}

fn drain(pipe: Option<impl Read + Send + 'static>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf).ok();
        }
        buf
    })
}

fn collect(handle: JoinHandle<Vec<u8>>) -> String {
    String::from_utf8_lossy(&handle.join().unwrap_or_default()).into_owned()
}

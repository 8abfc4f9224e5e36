// Process collaborator: run an argument vector, hand back raw output

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;
use log::{debug, warn};
use wait_timeout::ChildExt;
use crate::error::{BridgeError, BridgeResult};

/// Raw result of one external invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// Exit code, `None` when the process was killed by a signal
    pub status: Option<i32>,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    /// Turn a non-zero exit into an error
    pub fn check(self, program: &str) -> BridgeResult<ExecOutput> {
        if self.success() {
            Ok(self)
        } else {
            Err(BridgeError::ExternalFailure {
                program: program.to_string(),
                status: self
                    .status
                    .map(|code| code.to_string())
                    .unwrap_or_else(|| "signal".to_string()),
                stderr: self.stderr_text().trim().to_string(),
            })
        }
    }
}

/// Anything that can run an argument vector. `argv[0]` is the program.
pub trait Executor {
    fn execute(&self, argv: &[String]) -> BridgeResult<ExecOutput>;

    /// Execute and fail on a non-zero exit status
    fn run_checked(&self, argv: &[String]) -> BridgeResult<ExecOutput> {
        let program = argv.first().map(String::as_str).unwrap_or("");
        self.execute(argv)?.check(program)
    }
}

/// Runs real processes with a bounded wait
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    timeout: Duration,
}

impl ProcessExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

fn drain<R: Read + Send + 'static>(source: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut source) = source {
            let _ = source.read_to_end(&mut buf);
        }
        buf
    })
}

impl Executor for ProcessExecutor {
    fn execute(&self, argv: &[String]) -> BridgeResult<ExecOutput> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| BridgeError::invalid("Empty command line"))?;
        debug!("cli: {:?}", argv);

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| BridgeError::Spawn { program: program.clone(), source })?;

        // Pipes are drained concurrently so a chatty child cannot block on a full buffer
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                warn!("{} timed out after {}s", program, self.timeout.as_secs());
                return Err(BridgeError::Timeout {
                    program: program.clone(),
                    secs: self.timeout.as_secs(),
                });
            }
            Err(source) => {
                let _ = child.kill();
                return Err(BridgeError::Spawn { program: program.clone(), source });
            }
        };

        let output = ExecOutput {
            stdout: stdout.join().unwrap_or_default(),
            stderr: stderr.join().unwrap_or_default(),
            status: status.code(),
        };
        debug!("stdout: {}", output.stdout_text());
        debug!("stderr: {}", output.stderr_text());
        if !output.success() {
            warn!("{} exited with {:?}", program, output.status);
        }
        Ok(output)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_check_maps_failure() {
        let output = ExecOutput { stdout: Vec::new(), stderr: b"nope\n".to_vec(), status: Some(2) };
        match output.check("timew") {
            Err(BridgeError::ExternalFailure { program, status, stderr }) => {
                assert_eq!(program, "timew");
                assert_eq!(status, "2");
                assert_eq!(stderr, "nope");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty_argv_rejected() {
        let exec = ProcessExecutor::new(Duration::from_secs(5));
        assert!(matches!(exec.execute(&[]), Err(BridgeError::InvalidInput(_))));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let exec = ProcessExecutor::new(Duration::from_secs(5));
        let result = exec.execute(&argv(&["/nonexistent/definitely-not-here"]));
        assert!(matches!(result, Err(BridgeError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout_and_status() {
        let exec = ProcessExecutor::new(Duration::from_secs(5));
        let output = exec.execute(&argv(&["sh", "-c", "echo hello; echo oops >&2; exit 3"])).unwrap();
        assert_eq!(output.stdout_text(), "hello\n");
        assert_eq!(output.stderr_text(), "oops\n");
        assert_eq!(output.status, Some(3));
        assert!(!output.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_child() {
        let exec = ProcessExecutor::new(Duration::from_millis(200));
        let result = exec.execute(&argv(&["sleep", "5"]));
        assert!(matches!(result, Err(BridgeError::Timeout { .. })));
    }
}

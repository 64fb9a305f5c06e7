use std::io::{self, Read};
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::BehaviorConfig;
use crate::error::{CiVersionError, Result};

const FETCH_ARGS: &[&str] = &["fetch", "--prune", "--unshallow"];
// --abbrev=1 keeps the object id at the minimum unambiguous width
const DESCRIBE_ARGS: &[&str] = &["describe", "--tags", "--abbrev=1", "--long"];

/// Real implementation that shells out to the git CLI.
pub struct GitCli {
    fetch_unshallow: bool,
    timeout: Option<Duration>,
}

impl GitCli {
    pub fn new(behavior: &BehaviorConfig) -> Self {
        GitCli {
            fetch_unshallow: behavior.fetch_unshallow,
            timeout: behavior.timeout_secs.map(Duration::from_secs),
        }
    }

    fn run_git(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("git");
        cmd.args(args);

        let output = run_command(cmd, self.timeout)
            .map_err(|e| CiVersionError::git(format!("failed to run git {}: {}", args[0], e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CiVersionError::git(format!(
                "git {} exited with {}: {}",
                args[0],
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl super::GitQuery for GitCli {
    fn describe(&self) -> Result<String> {
        // actions/checkout performs a shallow checkout; without the full
        // history git describe cannot see earlier tags.
        if self.fetch_unshallow {
            self.run_git(FETCH_ARGS)?;
        }

        let output = self.run_git(DESCRIBE_ARGS).map_err(|e| match e {
            CiVersionError::Git(detail) => {
                CiVersionError::git(format!("unable to find an earlier tag: {}", detail))
            }
            other => other,
        })?;

        Ok(output.trim().to_string())
    }

    fn command_line(&self) -> String {
        let describe = format!("git {}", DESCRIBE_ARGS.join(" "));
        if self.fetch_unshallow {
            format!("git {} && {}", FETCH_ARGS.join(" "), describe)
        } else {
            describe
        }
    }
}

/// Run a command to completion, enforcing the optional timeout.
///
/// Without a timeout this defers to `Command::output`. With one, the child
/// is polled while reader threads drain its pipes; on expiry it is killed
/// and the call fails with `ErrorKind::TimedOut`.
fn run_command(mut cmd: Command, timeout: Option<Duration>) -> io::Result<Output> {
    let Some(limit) = timeout else {
        return cmd.output();
    };

    let mut child = cmd.stdout(Stdio::piped()).stderr(Stdio::piped()).spawn()?;

    let stdout_reader = child.stdout.take().map(spawn_pipe_reader);
    let stderr_reader = child.stderr.take().map(spawn_pipe_reader);

    let started = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if started.elapsed() >= limit {
            child.kill().ok();
            child.wait().ok();
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("command did not finish within {:?}", limit),
            ));
        }
        thread::sleep(Duration::from_millis(25));
    };

    Ok(Output {
        status,
        stdout: join_pipe_reader(stdout_reader)?,
        stderr: join_pipe_reader(stderr_reader)?,
    })
}

fn spawn_pipe_reader<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        // A broken pipe after kill just truncates the capture
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn join_pipe_reader(handle: Option<thread::JoinHandle<Vec<u8>>>) -> io::Result<Vec<u8>> {
    match handle {
        Some(handle) => handle.join().map_err(|_| {
            io::Error::new(io::ErrorKind::Other, "pipe reader thread panicked")
        }),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::GitQuery;

    #[test]
    fn test_command_line_includes_unshallow_fetch() {
        let git = GitCli::new(&BehaviorConfig::default());
        assert_eq!(
            git.command_line(),
            "git fetch --prune --unshallow && git describe --tags --abbrev=1 --long"
        );
    }

    #[test]
    fn test_command_line_without_fetch() {
        let behavior = BehaviorConfig {
            fetch_unshallow: false,
            timeout_secs: None,
        };
        let git = GitCli::new(&behavior);
        assert_eq!(git.command_line(), "git describe --tags --abbrev=1 --long");
    }

    #[test]
    fn test_run_command_captures_output() {
        let mut cmd = Command::new("echo");
        cmd.arg("hello");
        let output = run_command(cmd, Some(Duration::from_secs(5))).unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
    }

    #[test]
    fn test_run_command_times_out() {
        let mut cmd = Command::new("sleep");
        cmd.arg("5");
        let err = run_command(cmd, Some(Duration::from_millis(100))).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }
}

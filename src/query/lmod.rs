use super::{parse_path_prepends, ModuleQuery};
use crate::config::Config;
use crate::error::{InventoryError, Result};
use crate::model::ModuleId;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};
use wait_timeout::ChildExt;

/// Queries Lmod by running `<command> <shell> show <module>`.
///
/// Lmod prints `show` output on stderr, so both streams are scanned for
/// PATH prepends.
#[derive(Debug, Clone)]
pub struct LmodQuery {
    command: String,
    shell: String,
    timeout: Option<Duration>,
}

impl LmodQuery {
    pub fn new(command: impl Into<String>, shell: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            command: command.into(),
            shell: shell.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.module_command.clone(),
            config.query_shell.clone(),
            config.query_timeout(),
        )
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Runs the show command and returns stdout followed by stderr.
    ///
    /// The timeout covers both the child's exit and the draining of its
    /// output, since processes the driver leaves behind can hold the pipes
    /// open after it exits.
    fn show(&self, module: &ModuleId) -> Result<String> {
        let io_err = |source: io::Error| InventoryError::QueryIo {
            module: module.to_string(),
            source,
        };
        let timed_out = |timeout: Duration| InventoryError::QueryTimeout {
            module: module.to_string(),
            timeout,
        };

        let deadline = self.timeout.map(|t| Instant::now() + t);

        let mut child = Command::new(&self.command)
            .args([self.shell.as_str(), "show", module.as_str()])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| InventoryError::QuerySpawn {
                command: self.command.clone(),
                source,
            })?;

        // Drain both pipes concurrently so a chatty module cannot fill one
        // pipe and stall the child while we wait on it. Readers are detached
        // and finish on EOF; a receiver gone away just drops their buffer.
        let (tx, rx) = mpsc::channel();
        drain(Stream::Stdout, child.stdout.take(), tx.clone());
        drain(Stream::Stderr, child.stderr.take(), tx);

        let waited = match deadline {
            Some(at) => child.wait_timeout(at.saturating_duration_since(Instant::now())),
            None => child.wait().map(Some),
        };

        let status = match waited {
            Ok(Some(status)) => status,
            Ok(None) => {
                kill_and_reap(&mut child);
                return Err(timed_out(self.timeout.unwrap_or_default()));
            }
            Err(e) => {
                kill_and_reap(&mut child);
                return Err(io_err(e));
            }
        };

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        for _ in 0..2 {
            let received = match deadline {
                Some(at) => rx.recv_timeout(at.saturating_duration_since(Instant::now())),
                None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };

            match received {
                Ok((Stream::Stdout, buf)) => stdout = buf.map_err(io_err)?,
                Ok((Stream::Stderr, buf)) => stderr = buf.map_err(io_err)?,
                Err(RecvTimeoutError::Timeout) => {
                    return Err(timed_out(self.timeout.unwrap_or_default()));
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(io_err(io::Error::other("output reader exited early")));
                }
            }
        }

        if !status.success() {
            return Err(InventoryError::QueryExit {
                module: module.to_string(),
                status: status.to_string(),
            });
        }

        let mut text = String::from_utf8_lossy(&stdout).into_owned();
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&String::from_utf8_lossy(&stderr));
        Ok(text)
    }
}

impl ModuleQuery for LmodQuery {
    fn name(&self) -> &'static str {
        "lmod"
    }

    fn exported_path_dirs(&self, module: &ModuleId) -> Result<Vec<PathBuf>> {
        let output = self.show(module)?;
        Ok(parse_path_prepends(&output))
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

fn drain<R: Read + Send + 'static>(
    stream: Stream,
    pipe: Option<R>,
    tx: Sender<(Stream, io::Result<Vec<u8>>)>,
) {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let result = match pipe {
            Some(mut pipe) => pipe.read_to_end(&mut buf).map(|_| buf),
            None => Ok(buf),
        };
        let _ = tx.send((stream, result));
    });
}

fn kill_and_reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

//! Process Compiler
//!
//! Implements the Compiler port by running an external program, e.g.
//! `sass --style=compressed styles/main.scss generated/main.css`.
//!
//! Arguments are a template; `{style}`, `{input}` and `{output}` are
//! substituted per job. Legacy compilers that print CSS to stdout are
//! supported with `stdout_to_output`, in which case stdout is written to the
//! output path atomically and only stderr is treated as diagnostics.
//!
//! Diagnostics are the compiler's stdout followed by its stderr, each decoded
//! as UTF-8 with invalid sequences replaced by U+FFFD. Valid text is passed on
//! byte for byte.
//!
//! With a deadline set, the compiler is started in its own process group and
//! the whole group is killed on expiry, so wrapper scripts that fork the real
//! compiler cannot outlive it.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::domain::ports::{CompileOutput, Compiler};
use crate::domain::value_objects::Style;
use crate::error::JobError;

/// Argument template used when none is configured (dart-sass syntax)
pub const DEFAULT_ARGS: [&str; 3] = ["--style={style}", "{input}", "{output}"];

/// How often a child is polled while a deadline is pending
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// How long pipes are drained after a killed compiler before giving up on them
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Runs an external compiler program
#[derive(Debug, Clone)]
pub struct ProcessCompiler {
    program: String,
    args: Vec<String>,
    stdout_to_output: bool,
    timeout: Option<Duration>,
}

impl ProcessCompiler {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: DEFAULT_ARGS.iter().map(|a| a.to_string()).collect(),
            stdout_to_output: false,
            timeout: None,
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Treat the compiler's stdout as the generated stylesheet
    pub fn with_stdout_to_output(mut self, enabled: bool) -> Self {
        self.stdout_to_output = enabled;
        self
    }

    /// Kill the compiler if it runs longer than this
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Argument list for one invocation
    pub fn render_args(&self, input: &Path, output: &Path, style: Style) -> Vec<String> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{style}", style.as_str())
                    .replace("{input}", &input)
                    .replace("{output}", &output)
            })
            .collect()
    }

    fn ensure_output_dir(output: &Path) -> Result<(), JobError> {
        let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };
        if parent.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(parent).map_err(|source| JobError::OutputPath {
            path: parent.to_path_buf(),
            source,
        })
    }

    fn write_stdout_to_output(output: &Path, content: &[u8]) -> Result<(), JobError> {
        let dir = output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| JobError::io(output, e))?;
        tmp.write_all(content).map_err(|e| JobError::io(output, e))?;
        tmp.persist(output)
            .map_err(|e| JobError::io(output, e.error))?;
        Ok(())
    }

    /// Wait for the child, honouring the deadline. `None` means it was killed.
    fn wait(&self, child: &mut Child) -> std::io::Result<Option<ExitStatus>> {
        let Some(timeout) = self.timeout else {
            return child.wait().map(Some);
        };

        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Some(status));
            }
            if Instant::now() >= deadline {
                warn!(program = %self.program, ?timeout, "compiler exceeded deadline, killing");
                kill_tree(child);
                child.wait()?;
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Read a pipe to completion on a helper thread so the child never blocks on a full pipe
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

/// Collect a drained pipe. With a deadline, a pipe still held open by an
/// escaped descendant is abandoned instead of waited on.
fn join(handle: JoinHandle<Vec<u8>>, deadline: Option<Instant>) -> Vec<u8> {
    if let Some(deadline) = deadline {
        while !handle.is_finished() {
            if Instant::now() >= deadline {
                debug!("abandoning compiler pipe still open after kill");
                return Vec::new();
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
    handle.join().unwrap_or_default()
}

/// Decode captured bytes for reporting
fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(unix)]
fn own_process_group(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(not(unix))]
fn own_process_group(_command: &mut Command) {}

/// Kill the compiler and everything it started.
///
/// The child leads its own process group (see `compile`), so the group id is
/// its pid. Errors are ignored: the group may already be gone.
#[cfg(unix)]
fn kill_tree(child: &mut Child) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    match i32::try_from(child.id()) {
        Ok(pid) => {
            let _ = killpg(Pid::from_raw(pid), Signal::SIGKILL);
        }
        Err(_) => {
            let _ = child.kill();
        }
    }
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) {
    let _ = child.kill();
}

impl Compiler for ProcessCompiler {
    fn compile(&self, input: &Path, output: &Path, style: Style) -> Result<CompileOutput, JobError> {
        Self::ensure_output_dir(output)?;

        let args = self.render_args(input, output, style);
        debug!(program = %self.program, ?args, "spawning compiler");

        let mut command = Command::new(&self.program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if self.timeout.is_some() {
            own_process_group(&mut command);
        }
        let mut child = command
            .spawn()
            .map_err(|e| JobError::io(&self.program, e))?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());
        let status = self
            .wait(&mut child)
            .map_err(|e| JobError::io(&self.program, e))?;
        let drain_deadline = status.is_none().then(|| Instant::now() + DRAIN_GRACE);
        let stdout = join(stdout, drain_deadline);
        let stderr = join(stderr, drain_deadline);

        let diagnostics = if self.stdout_to_output {
            decode(&stderr)
        } else {
            let mut text = decode(&stdout);
            text.push_str(&decode(&stderr));
            text
        };

        let Some(status) = status else {
            return Err(JobError::TimedOut {
                program: self.program.clone(),
                timeout: self.timeout.unwrap_or_default(),
                output: diagnostics,
            });
        };
        if !status.success() {
            return Err(JobError::Compilation {
                program: self.program.clone(),
                status: status.to_string(),
                output: diagnostics,
            });
        }

        if self.stdout_to_output {
            Self::write_stdout_to_output(output, &stdout)?;
        } else if !output.is_file() {
            return Err(JobError::Compilation {
                program: self.program.clone(),
                status: format!("{}, but {} was not produced", status, output.display()),
                output: diagnostics,
            });
        }

        Ok(CompileOutput {
            output: diagnostics,
        })
    }
}

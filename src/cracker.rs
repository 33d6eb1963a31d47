//! John the Ripper integration.
//!
//! The generated wordlist can be handed straight to `john`. Commands come
//! from a fixed catalog of templates; placeholders are substituted and the
//! result runs through `sh -c` with a hard timeout. A timed-out run is killed
//! and reported, never retried.

use crate::error::{Error, Result};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Command templates by name.
///
/// Placeholders: `{wordlist}`, `{target}` (all targets, space-separated),
/// `{target1}`..`{target3}`, `{format}`.
pub const COMMANDS: [(&str, &str); 8] = [
    ("basic_crack", "john --wordlist={wordlist} {target}"),
    ("incremental", "john --incremental {target}"),
    ("single_crack", "john --single {target}"),
    ("with_rules", "john --wordlist={wordlist} --rules {target}"),
    ("show_cracked", "john --show {target}"),
    ("restore_session", "john --restore"),
    ("specific_format", "john --format={format} --wordlist={wordlist} {target}"),
    ("multi_crack", "john --wordlist={wordlist} {target1} {target2} {target3}"),
];

pub const DEFAULT_FORMAT: &str = "raw-md5";

/// Upper bound on a single cracking run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60 * 60);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What a finished run printed.
#[derive(Debug, Clone)]
pub struct CrackOutput {
    /// The shell command line that ran.
    pub command: String,
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// One cracking invocation.
#[derive(Debug, Clone, Default)]
pub struct CrackRequest<'a> {
    pub command: &'a str,
    pub wordlist: Option<&'a Path>,
    pub targets: &'a [String],
    pub format: Option<&'a str>,
    pub rules: bool,
}

#[derive(Debug, Clone)]
pub struct CrackerRunner {
    timeout: Duration,
}

impl Default for CrackerRunner {
    fn default() -> Self {
        Self { timeout: DEFAULT_TIMEOUT }
    }
}

pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|(name, _)| *name)
}

impl CrackerRunner {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Expand the named template into a shell command line.
    pub fn build_command(&self, request: &CrackRequest<'_>) -> Result<String> {
        let template = COMMANDS
            .iter()
            .find(|(name, _)| *name == request.command)
            .map(|(_, template)| *template)
            .ok_or_else(|| Error::UnknownCommand {
                name: request.command.to_string(),
                available: command_names().collect::<Vec<_>>().join(", "),
            })?;

        let wordlist = request.wordlist.map(|p| p.display().to_string()).unwrap_or_default();
        let target_at = |i: usize| request.targets.get(i).map(String::as_str).unwrap_or("");

        let mut command = template
            .replace("{wordlist}", &wordlist)
            .replace("{target}", &request.targets.join(" "))
            .replace("{target1}", target_at(0))
            .replace("{target2}", target_at(1))
            .replace("{target3}", target_at(2))
            .replace("{format}", request.format.unwrap_or(DEFAULT_FORMAT));

        let trimmed_len = command.trim_end().len();
        command.truncate(trimmed_len);
        if request.rules && !command.contains("--rules") {
            command.push_str(" --rules");
        }
        Ok(command)
    }

    /// Build and execute a catalog command.
    pub fn run(&self, request: &CrackRequest<'_>) -> Result<CrackOutput> {
        self.execute(&self.build_command(request)?)
    }

    /// Run a raw shell command line under the configured timeout.
    pub fn execute(&self, command: &str) -> Result<CrackOutput> {
        info!(%command, "executing");
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| Error::Spawn { command: command.to_string(), source })?;

        // Pipes are drained on their own threads so a chatty child can't
        // block on a full pipe while we wait for it.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match wait_with_deadline(&mut child, self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                warn!(%command, timeout = ?self.timeout, "command timed out; killing it");
                let _ = child.kill();
                let _ = child.wait();
                return Err(Error::Timeout(self.timeout));
            }
            Err(source) => return Err(Error::Spawn { command: command.to_string(), source }),
        };

        Ok(CrackOutput {
            command: command.to_string(),
            status,
            stdout: stdout.join().unwrap_or_default(),
            stderr: stderr.join().unwrap_or_default(),
        })
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buffer);
        }
        String::from_utf8_lossy(&buffer).into_owned()
    })
}

fn wait_with_deadline(child: &mut Child, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

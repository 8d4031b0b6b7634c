//! Out-of-process launching: tool programs in a new terminal, URLs in the browser.
//!
//! Both are fire-and-forget. The child is started and its PID returned;
//! nothing reads its output. A detached thread reaps it on exit.

pub mod platform;

pub use platform::Platform;

use crate::config::ToolkitConfig;
use crate::error::{Result, ToolkitError};
use crate::types::ToolDescriptor;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::debug;

/// A program plus its arguments, ready to hand to the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Starts processes. The seam tests stub out.
pub trait Spawner: Send + Sync {
    /// Start the command detached and return its PID.
    fn spawn(&self, cmd: &CommandLine) -> std::io::Result<u32>;
}

/// Spawns real OS processes with stdio detached.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSpawner;

impl SystemSpawner {
    /// Start the command and hand its `Child` to a reaper thread.
    ///
    /// The join handle yields the exit status once the child is gone.
    pub fn start(
        &self,
        cmd: &CommandLine,
    ) -> std::io::Result<(u32, JoinHandle<std::io::Result<ExitStatus>>)> {
        debug!("Spawning: {} {:?}", cmd.program, cmd.args);
        let mut child = Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        let pid = child.id();
        let reaper = thread::Builder::new()
            .name(format!("reap-{}", pid))
            .spawn(move || {
                let status = child.wait();
                debug!("pid {} exited: {:?}", pid, status);
                status
            })?;
        Ok((pid, reaper))
    }
}

impl Spawner for SystemSpawner {
    fn spawn(&self, cmd: &CommandLine) -> std::io::Result<u32> {
        self.start(cmd).map(|(pid, _)| pid)
    }
}

/// Returned by a successful launch.
#[derive(Debug, Clone)]
pub struct LaunchHandle {
    pub pid: u32,
    pub program: PathBuf,
    pub launched_at: DateTime<Local>,
}

/// Launches tool programs in a new terminal window.
pub struct Launcher {
    programs_dir: PathBuf,
    extension: String,
    interpreter: Option<String>,
    terminal: Vec<String>,
    platform: Platform,
    spawner: Arc<dyn Spawner>,
}

impl Launcher {
    pub fn new(config: &ToolkitConfig, platform: Platform, spawner: Arc<dyn Spawner>) -> Self {
        let interpreter = Some(config.interpreter.trim().to_string()).filter(|s| !s.is_empty());
        Self {
            programs_dir: PathBuf::from(config.resolved_programs_dir()),
            extension: config.program_extension.clone(),
            interpreter,
            terminal: config.terminal_command.clone(),
            platform,
            spawner,
        }
    }

    /// Launcher for the host platform backed by real processes.
    pub fn system(config: &ToolkitConfig) -> Self {
        Self::new(config, Platform::current(), Arc::new(SystemSpawner))
    }

    /// Where the program for a descriptor is expected on disk.
    pub fn program_path(&self, tool: &ToolDescriptor) -> PathBuf {
        self.programs_dir
            .join(format!("{}{}", tool.entrypoint, self.extension))
    }

    pub fn program_exists(&self, tool: &ToolDescriptor) -> bool {
        self.program_path(tool).exists()
    }

    /// Check the program file and start it in a new terminal.
    pub fn launch(&self, tool: &ToolDescriptor) -> Result<LaunchHandle> {
        let program = self.program_path(tool);
        if !program.exists() {
            return Err(ToolkitError::MissingFile(program));
        }

        let cmd = self.terminal_command(&program);
        let pid = self
            .spawner
            .spawn(&cmd)
            .map_err(|source| ToolkitError::Spawn {
                program: program.display().to_string(),
                source,
            })?;

        Ok(LaunchHandle {
            pid,
            program,
            launched_at: Local::now(),
        })
    }

    /// The command that opens a terminal running `program`.
    pub fn terminal_command(&self, program: &Path) -> CommandLine {
        let program = program.display().to_string();
        let invocation = match &self.interpreter {
            Some(interp) => vec![interp.clone(), program],
            None => vec![program],
        };

        match self.platform {
            Platform::Windows => {
                let mut args = vec!["/c", "start", "cmd", "/k"]
                    .into_iter()
                    .map(String::from)
                    .collect::<Vec<_>>();
                args.push(invocation.join(" "));
                CommandLine {
                    program: "cmd".into(),
                    args,
                }
            }
            Platform::MacOs => {
                let script = format!(
                    "tell app \"Terminal\" to do script \"{}\"",
                    invocation.join(" ").replace('"', "\\\"")
                );
                CommandLine {
                    program: "osascript".into(),
                    args: vec!["-e".into(), script],
                }
            }
            Platform::Linux => {
                let mut parts = self.terminal.iter().cloned();
                let program = parts.next().unwrap_or_else(|| "gnome-terminal".into());
                let mut args: Vec<String> = parts.collect();
                args.extend(invocation);
                CommandLine { program, args }
            }
        }
    }
}

/// Opens URLs in the default browser.
#[derive(Clone)]
pub struct UrlOpener {
    platform: Platform,
    spawner: Arc<dyn Spawner>,
}

impl UrlOpener {
    pub fn new(platform: Platform, spawner: Arc<dyn Spawner>) -> Self {
        Self { platform, spawner }
    }

    pub fn system() -> Self {
        Self::new(Platform::current(), Arc::new(SystemSpawner))
    }

    pub fn open(&self, url: &str) -> std::io::Result<u32> {
        let cmd = match self.platform {
            Platform::Windows => CommandLine::new("cmd", &["/c", "start", "", url]),
            Platform::MacOs => CommandLine::new("open", &[url]),
            Platform::Linux => CommandLine::new("xdg-open", &[url]),
        };
        self.spawner.spawn(&cmd)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Records every command instead of running it.
    #[derive(Default)]
    pub struct RecordingSpawner {
        pub calls: Mutex<Vec<CommandLine>>,
        pub fail: bool,
    }

    impl RecordingSpawner {
        pub fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        pub fn calls(&self) -> Vec<CommandLine> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Spawner for RecordingSpawner {
        fn spawn(&self, cmd: &CommandLine) -> std::io::Result<u32> {
            self.calls.lock().unwrap().push(cmd.clone());
            if self.fail {
                Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "terminal not installed",
                ))
            } else {
                Ok(4242)
            }
        }
    }
}

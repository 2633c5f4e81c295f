use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use thiserror::Error;

/// A launcher invocation under test, built up like a `std::process::Command`
#[derive(Clone, Debug)]
pub struct ProcessBuilder {
    program: OsString,
    args: Vec<OsString>,
    /// `None` removes the variable from the inherited environment
    env: Vec<(String, Option<OsString>)>,
    cwd: Option<PathBuf>,
    /// Written to stdin, which is then closed; without it stdin is `/dev/null`
    stdin: Option<Vec<u8>>,
}

#[derive(Debug, Error)]
#[error("could not execute {program}")]
pub struct ProcessError {
    program: String,
    #[source]
    source: io::Error,
}

impl fmt::Display for ProcessBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        write!(f, "`")
    }
}

impl ProcessBuilder {
    pub fn arg<T: AsRef<OsStr>>(&mut self, arg: T) -> &mut ProcessBuilder {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn cwd<T: AsRef<Path>>(&mut self, dir: T) -> &mut ProcessBuilder {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn env<T: AsRef<OsStr>>(&mut self, key: &str, val: T) -> &mut ProcessBuilder {
        self.set_env(key, Some(val.as_ref().to_os_string()))
    }

    pub fn env_remove(&mut self, key: &str) -> &mut ProcessBuilder {
        self.set_env(key, None)
    }

    /// Feed the given bytes to the process on stdin
    pub fn stdin<T: AsRef<[u8]>>(&mut self, input: T) -> &mut ProcessBuilder {
        self.stdin = Some(input.as_ref().to_vec());
        self
    }

    fn set_env(&mut self, key: &str, val: Option<OsString>) -> &mut ProcessBuilder {
        self.env.retain(|(existing, _)| existing != key);
        self.env.push((key.to_string(), val));
        self
    }

    /// Run the process to completion and capture its output, whatever its exit status
    pub fn output(&self) -> Result<Output, ProcessError> {
        self.run().map_err(|source| ProcessError {
            program: self.to_string(),
            source,
        })
    }

    fn run(&self) -> io::Result<Output> {
        let mut command = self.build_command();
        command
            .stdin(if self.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn()?;
        if let (Some(input), Some(mut stdin)) = (&self.stdin, child.stdin.take()) {
            stdin.write_all(input)?;
        }

        child.wait_with_output()
    }

    /// The equivalent `std::process::Command`, for tests that need to drive the process directly
    pub fn build_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);

        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        for (key, val) in &self.env {
            match val {
                Some(val) => command.env(key, val),
                None => command.env_remove(key),
            };
        }

        command
    }
}

pub fn process<T: AsRef<OsStr>>(program: T) -> ProcessBuilder {
    ProcessBuilder {
        program: program.as_ref().to_os_string(),
        args: Vec::new(),
        env: Vec::new(),
        cwd: None,
        stdin: None,
    }
}

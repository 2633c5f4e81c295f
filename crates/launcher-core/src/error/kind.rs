use std::fmt;
use std::path::PathBuf;

use super::ExitCode;
use crate::style::text_width;
use textwrap::{fill, Options};

const REPORT_BUG_CTA: &str =
    "Please rerun the command that triggered this error with the environment
variable `LAUNCHER_LOGLEVEL` set to `debug` to see what the launcher attempted.";

const PATH_CTA: &str = "Please ensure a Python interpreter is installed and on your PATH.";

#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub enum ErrorKind {
    /// Thrown when no interpreter candidate could be found on the PATH
    InterpreterNotFound { candidates: Vec<&'static str> },

    /// Thrown when the directory containing the launcher could not be determined
    NoInstallDir,

    /// Thrown when a signal arrived before the server could be started
    Interrupted,

    /// Thrown when the server process could not be started
    ServerExecError { interpreter: PathBuf, script: PathBuf },

    /// Thrown when waiting on the running server fails
    ServerWaitError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::InterpreterNotFound { candidates } => write!(
                f,
                "Could not find a Python interpreter (tried {}).

{}",
                candidates.join(", "),
                PATH_CTA
            ),
            ErrorKind::Interrupted => write!(f, "Interrupted before the server started."),
            ErrorKind::NoInstallDir => write!(
                f,
                "Could not determine the directory containing the launcher.

{}",
                REPORT_BUG_CTA
            ),
            ErrorKind::ServerExecError {
                interpreter,
                script,
            } => {
                let call = format!(
                    "Could not start the server: {} {}",
                    interpreter.display(),
                    script.display()
                );
                let wrapped = match text_width() {
                    Some(width) => fill(&call, Options::new(width).break_words(false)),
                    None => call,
                };
                write!(
                    f,
                    "{}

Please ensure the interpreter is executable by the current user.",
                    wrapped
                )
            }
            ErrorKind::ServerWaitError => write!(
                f,
                "Lost track of the running server.

{}",
                REPORT_BUG_CTA
            ),
        }
    }
}

impl ErrorKind {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ErrorKind::InterpreterNotFound { .. } => ExitCode::ExecutableNotFound,
            ErrorKind::Interrupted => ExitCode::Interrupted,
            ErrorKind::NoInstallDir => ExitCode::EnvironmentError,
            ErrorKind::ServerExecError { .. } => ExitCode::ExecutionFailure,
            ErrorKind::ServerWaitError => ExitCode::UnknownError,
        }
    }
}

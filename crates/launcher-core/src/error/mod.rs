use std::error::Error;
use std::fmt;
use std::process::exit;

mod kind;
mod reporter;

pub use kind::ErrorKind;
pub use reporter::report_error;

pub type Fallible<T> = Result<T, LauncherError>;

/// Error type for the launcher
#[derive(Debug)]
pub struct LauncherError {
    inner: Box<Inner>,
}

#[derive(Debug)]
struct Inner {
    kind: ErrorKind,
    source: Option<Box<dyn Error>>,
}

impl LauncherError {
    /// The exit code the launcher should use when this error stops execution
    pub fn exit_code(&self) -> ExitCode {
        self.inner.kind.exit_code()
    }

    /// Create a new LauncherError instance including a source error
    pub fn from_source<E>(source: E, kind: ErrorKind) -> Self
    where
        E: Into<Box<dyn Error>>,
    {
        LauncherError {
            inner: Box::new(Inner {
                kind,
                source: Some(source.into()),
            }),
        }
    }

    /// Get a reference to the ErrorKind for this error
    pub fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

impl fmt::Display for LauncherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.kind.fmt(f)
    }
}

impl Error for LauncherError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source.as_ref().map(|b| b.as_ref())
    }
}

impl From<ErrorKind> for LauncherError {
    fn from(kind: ErrorKind) -> Self {
        LauncherError {
            inner: Box::new(Inner { kind, source: None }),
        }
    }
}

/// Trait providing the with_context method to easily convert any Result error into a LauncherError
pub trait Context<T> {
    fn with_context<F>(self, f: F) -> Fallible<T>
    where
        F: FnOnce() -> ErrorKind;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: Error + 'static,
{
    fn with_context<F>(self, f: F) -> Fallible<T>
    where
        F: FnOnce() -> ErrorKind,
    {
        self.map_err(|e| LauncherError::from_source(e, f()))
    }
}

/// Exit codes used when the launcher itself fails, as opposed to forwarding the server's code
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitCode {
    /// No error occurred.
    Success = 0,

    /// An unknown error occurred.
    UnknownError = 1,

    /// The launcher's own location could not be determined.
    EnvironmentError = 6,

    /// The server could not be started.
    ExecutionFailure = 126,

    /// No interpreter could be found to run the server.
    ExecutableNotFound = 127,

    /// The launcher was interrupted before the server started.
    Interrupted = 130,
}

impl ExitCode {
    pub fn exit(self) -> ! {
        exit(self as i32);
    }
}

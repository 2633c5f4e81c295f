use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{ErrorKind, Fallible};
use log::debug;

/// Interpreter names tried, in order, when looking for Python on the PATH
pub const INTERPRETER_CANDIDATES: [&str; 2] = ["python", "python3"];

/// Find the interpreter on the PATH of the invoking environment
///
/// The interpreter is not pinned: whatever `python` the caller's PATH points at is used, falling
/// back to `python3` where only the versioned name exists. The resolved path is logged at debug
/// level.
pub fn find_interpreter() -> Fallible<PathBuf> {
    let cwd = env::current_dir().unwrap_or_default();
    find_interpreter_in(env::var_os("PATH"), &cwd)
}

/// Find the interpreter using an explicit search path
pub fn find_interpreter_in<S: AsRef<OsStr>>(path: Option<S>, cwd: &Path) -> Fallible<PathBuf> {
    for candidate in INTERPRETER_CANDIDATES {
        match which::which_in(candidate, path.as_ref(), cwd) {
            Ok(found) => {
                debug!("Using interpreter: {}", found.display());
                return Ok(found);
            }
            Err(_) => debug!("No '{}' found on the PATH", candidate),
        }
    }

    Err(ErrorKind::InterpreterNotFound {
        candidates: INTERPRETER_CANDIDATES.to_vec(),
    }
    .into())
}

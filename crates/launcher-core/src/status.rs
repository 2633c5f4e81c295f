//! Translation of the server's termination status into the launcher's own exit code.

use std::process::ExitStatus;

use cfg_if::cfg_if;

use crate::error::ExitCode;

/// Offset added to a signal number when a process dies from that signal, as shells report it
#[cfg(unix)]
const SIGNAL_EXIT_BASE: i32 = 128;

/// The code the launcher should exit with, given how the server terminated
///
/// A normal exit forwards the server's code unchanged. A server killed by a signal is reported
/// as `128 + signal`, so a signal death is never mistaken for success.
pub fn forwarded_code(status: ExitStatus) -> i32 {
    status
        .code()
        .or_else(|| signal_code(&status))
        .unwrap_or(ExitCode::UnknownError as i32)
}

cfg_if! {
    if #[cfg(unix)] {
        fn signal_code(status: &ExitStatus) -> Option<i32> {
            use std::os::unix::process::ExitStatusExt;

            status.signal().map(|signal| SIGNAL_EXIT_BASE + signal)
        }
    } else {
        fn signal_code(_status: &ExitStatus) -> Option<i32> {
            None
        }
    }
}

use std::process::exit;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::{ErrorKind, ExitCode, Fallible};
use log::debug;

const NO_SERVER: u32 = 0;
const INTERRUPTED: u32 = u32::MAX - 3;
const SPAWNING: u32 = u32::MAX - 2;
const SPAWN_INTERRUPTED: u32 = u32::MAX - 1;
const SERVER_EXITED: u32 = u32::MAX;

static SERVER_CONTROL: ServerControl = ServerControl::new();

/// Who is responsible for interrupt and termination signals
///
/// Holds the PID of the running server, or one of the sentinels above. Real PIDs stay far below
/// the sentinel range.
pub(crate) struct ServerControl {
    state: AtomicU32,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SignalAction {
    Exit,
    Defer,
    Relay(u32),
    Ignore,
}

impl ServerControl {
    pub(crate) const fn new() -> Self {
        ServerControl {
            state: AtomicU32::new(NO_SERVER),
        }
    }

    /// Record an incoming signal and decide how the handler responds to it
    pub(crate) fn on_signal(&self) -> SignalAction {
        let mut state = self.state.load(Ordering::SeqCst);
        loop {
            let (next, action) = match state {
                NO_SERVER | INTERRUPTED => (INTERRUPTED, SignalAction::Exit),
                SPAWNING | SPAWN_INTERRUPTED => (SPAWN_INTERRUPTED, SignalAction::Defer),
                SERVER_EXITED => return SignalAction::Ignore,
                pid => return SignalAction::Relay(pid),
            };

            match self
                .state
                .compare_exchange(state, next, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return action,
                Err(current) => state = current,
            }
        }
    }

    /// Claim signal handling for a server that is about to be spawned
    ///
    /// Fails if a signal already stopped the launcher.
    pub(crate) fn begin_spawn(&self) -> Fallible<()> {
        let mut state = self.state.load(Ordering::SeqCst);
        loop {
            if state == INTERRUPTED {
                return Err(ErrorKind::Interrupted.into());
            }

            match self
                .state
                .compare_exchange(state, SPAWNING, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return Ok(()),
                Err(current) => state = current,
            }
        }
    }

    /// Give up on a spawn that failed
    ///
    /// Fails if a signal arrived while the spawn was in progress.
    pub(crate) fn abandon_spawn(&self) -> Fallible<()> {
        match self.state.swap(NO_SERVER, Ordering::SeqCst) {
            SPAWN_INTERRUPTED => Err(ErrorKind::Interrupted.into()),
            _ => Ok(()),
        }
    }

    /// Record that the server with the given PID is running and now owns interrupt handling
    ///
    /// A signal that arrived while the server was being spawned is relayed now.
    pub(crate) fn pass_control_to_server(&self, pid: u32) {
        if self.state.swap(pid, Ordering::SeqCst) == SPAWN_INTERRUPTED {
            relay_to_server(pid);
        }
    }

    /// Record that the server has been reaped, so its PID must no longer be signalled
    pub(crate) fn release_control(&self) {
        self.state.store(SERVER_EXITED, Ordering::SeqCst);
    }
}

/// The control shared with the process-wide signal handler
pub(crate) fn server_control() -> &'static ServerControl {
    &SERVER_CONTROL
}

/// Install the handler for interrupt and termination signals
///
/// Before the server starts, a signal stops the launcher with the conventional interrupted code.
/// Once the server is running, the launcher stays alive, relays the signal, and forwards whatever
/// status the server ends with.
pub fn setup_signal_handler() {
    let result = ctrlc::set_handler(|| match SERVER_CONTROL.on_signal() {
        SignalAction::Exit => exit(ExitCode::Interrupted as i32),
        SignalAction::Defer => debug!("Signal received while the server is starting"),
        SignalAction::Relay(pid) => relay_to_server(pid),
        SignalAction::Ignore => {}
    });

    if result.is_err() {
        debug!("Unable to set signal handler, signals will not be relayed to the server");
    }
}

#[cfg(unix)]
fn relay_to_server(pid: u32) {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    debug!("Relaying SIGTERM to server (pid {})", pid);
    if let Err(err) = kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
        debug!("Unable to signal server (pid {}): {}", pid, err);
    }
}

// Console control events already reach every process attached to the console.
#[cfg(windows)]
fn relay_to_server(pid: u32) {
    debug!("Leaving console event to server (pid {})", pid);
}

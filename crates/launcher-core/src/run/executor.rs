use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use crate::error::{Context, ErrorKind, Fallible};
use crate::signal::{server_control, ServerControl};
use log::debug;

/// Process builder for launching the server
///
/// Runs `<interpreter> <script>` with all three standard streams shared with the
/// launcher, so the server talks to the launcher's caller directly.
pub struct ServerCommand {
    command: Command,
    interpreter: PathBuf,
    script: PathBuf,
}

impl ServerCommand {
    pub fn new(interpreter: PathBuf, script: PathBuf) -> Self {
        let mut command = Command::new(&interpreter);
        command
            .arg(&script)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        ServerCommand {
            command,
            interpreter,
            script,
        }
    }

    /// Runs the server to completion, returning its `ExitStatus` if it successfully launches
    pub fn execute(self) -> Fallible<ExitStatus> {
        self.execute_with(server_control())
    }

    fn execute_with(self, control: &ServerControl) -> Fallible<ExitStatus> {
        let ServerCommand {
            mut command,
            interpreter,
            script,
        } = self;

        control.begin_spawn()?;
        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(err) => {
                control.abandon_spawn()?;
                return Err(err).with_context(|| ErrorKind::ServerExecError {
                    interpreter,
                    script,
                });
            }
        };

        control.pass_control_to_server(child.id());
        debug!("Server started (pid {})", child.id());

        let status = child.wait().with_context(|| ErrorKind::ServerWaitError);
        control.release_control();

        if let Ok(status) = &status {
            debug!("Server finished: {}", status);
        }
        status
    }
}

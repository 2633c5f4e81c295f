use std::process::ExitStatus;

use crate::command::find_interpreter;
use crate::error::Fallible;
use crate::layout::launcher_install;
use log::debug;

mod executor;

pub use executor::ServerCommand;

/// Run the server that sits next to the launcher
///
/// The launcher takes no arguments of its own, and none are handed on: the server is always
/// started as `<interpreter> <script>`.
pub fn execute_server() -> Fallible<ExitStatus> {
    get_server_command()?.execute()
}

/// Build the command for the server, resolving the script and the interpreter
fn get_server_command() -> Fallible<ServerCommand> {
    let script = launcher_install()?.server_script();
    debug!("Server script: {}", script.display());

    let interpreter = find_interpreter()?;

    Ok(ServerCommand::new(interpreter, script))
}

mod common;

use std::process::exit;

use common::{Error, IntoResult};
use launcher_core::error::{report_error, ExitCode};
use launcher_core::log::Logger;
use launcher_core::run::execute_server;
use launcher_core::signal::setup_signal_handler;
use log::debug;

pub fn main() {
    Logger::init().expect("Only a single Logger should be initialized");
    setup_signal_handler();

    match execute_server().into_result() {
        Ok(()) => ExitCode::Success.exit(),
        Err(Error::Server(code)) => {
            debug!("Forwarding server exit code {}", code);
            exit(code);
        }
        Err(Error::Launcher(err)) => {
            report_error(env!("CARGO_PKG_VERSION"), &err);
            err.exit_code().exit();
        }
    }
}

use std::env;
use std::error::Error;

use super::LauncherError;
use crate::style::format_error_cause;
use log::{debug, error, Level};

const LAUNCHER_DEV: &str = "LAUNCHER_DEV";

/// Report an error to the terminal
///
/// The launcher shares stdout with the server, so everything is reported through the logger,
/// which writes to stderr. The cause chain is only shown when requested.
pub fn report_error(launcher_version: &str, err: &LauncherError) {
    error!("{}", err);

    if let Some(details) = compose_error_details(err) {
        if env::var_os(LAUNCHER_DEV).is_some() || log::max_level() >= Level::Debug {
            eprintln!();
            eprintln!("{}", details);
        }
    }

    debug!("launcher v{}", launcher_version);
}

fn compose_error_details(err: &LauncherError) -> Option<String> {
    // Only compose details if there is an underlying cause for the error
    let mut current = err.source()?;
    let mut details = String::new();

    // Walk up the tree of causes and include all of them
    loop {
        details.push_str(&format_error_cause(current));

        match current.source() {
            Some(cause) => {
                details.push_str("\n\n");
                current = cause;
            }
            None => {
                break;
            }
        };
    }

    Some(details)
}

//! The implementation crate for the launcher: finds the server next to the running executable,
//! starts it under a Python interpreter, and reports back how it ended.

mod command;
pub mod error;
pub mod layout;
pub mod log;
pub mod run;
pub mod signal;
pub mod status;
mod style;

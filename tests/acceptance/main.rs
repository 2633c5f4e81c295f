// The stub interpreters in the sandbox are shell scripts.
#![cfg(unix)]


// test files

mod exit_codes;
mod interpreter;

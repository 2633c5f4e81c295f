use crate::support::sandbox::sandbox;
use hamcrest2::assert_that;
use hamcrest2::prelude::*;
use test_support::matchers::execs;

#[test]
fn reports_missing_interpreter() {
    let s = sandbox().server("exit 0\n").build();

    assert_that!(
        s.launch(""),
        execs()
            .with_status(127)
            .with_stdout("")
            .with_stderr_contains("[ERROR] Could not find a Python interpreter (tried python, python3).")
    );
}

#[test]
fn falls_back_to_python3() {
    let s = sandbox()
        .interpreter("python3")
        .server("echo via python3\n")
        .build();

    assert_that!(s.launch(""), execs().with_stdout("via python3"));
}

#[test]
fn uses_the_interpreter_found_on_the_path() {
    let s = sandbox()
        .interpreter("python")
        .server("echo ok\n")
        .env("LAUNCHER_LOGLEVEL", "debug")
        .build();
    let expected = format!(
        "[verbose] Using interpreter: {}",
        s.root().join("bin").join("python").display()
    );

    assert_that!(
        s.launch(""),
        execs().with_stdout("ok").with_stderr_contains(expected)
    );
}

#[test]
fn reports_interpreter_that_cannot_start() {
    let s = sandbox().interpreter("python").server("exit 0\n").build();
    // Executable, but not something the OS knows how to run
    std::fs::write(s.root().join("bin").join("python"), "\x7fELF garbage").unwrap();

    assert_that!(
        s.launch(""),
        execs()
            .with_status(126)
            .with_stdout("")
            .with_stderr_contains("[ERROR] Could not start the server: [..]")
    );
}

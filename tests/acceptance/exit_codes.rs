use crate::support::sandbox::sandbox;
use hamcrest2::assert_that;
use hamcrest2::prelude::*;
use test_support::matchers::execs;

#[test]
fn forwards_success() {
    let s = sandbox().interpreter("python").server("exit 0\n").build();

    assert_that!(s.launch(""), execs().with_status(0));
}

#[test]
fn forwards_failure_code() {
    let s = sandbox().interpreter("python").server("exit 7\n").build();

    assert_that!(s.launch(""), execs().with_status(7));
}

#[test]
fn forwards_high_exit_codes() {
    let s = sandbox().interpreter("python").server("exit 254\n").build();

    assert_that!(s.launch(""), execs().with_status(254));
}

#[test]
fn missing_server_fails() {
    let s = sandbox().interpreter("python").build();

    assert_that!(s.launch(""), execs().with_failure().with_stdout(""));
}

#[test]
fn server_deleted_before_launch_fails() {
    let s = sandbox().interpreter("python").server("exit 0\n").build();
    std::fs::remove_file(s.server_script()).unwrap();

    assert_that!(s.launch(""), execs().with_failure());
}

#[test]
fn server_killed_by_signal_is_reported_as_failure() {
    let s = sandbox()
        .interpreter("python")
        .server("kill -TERM $$\n")
        .build();

    assert_that!(s.launch(""), execs().with_status(128 + 15));
}

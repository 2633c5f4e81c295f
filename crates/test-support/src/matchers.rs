use std::fmt;
use std::process::Output;

use crate::process::ProcessBuilder;

use hamcrest2::core::{MatchResult, Matcher};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExpectStatus {
    Code(i32),
    Failure,
}

/// Expectations about one run of a process, checked with `assert_that!`
///
/// Text expectations are compared line by line using `lines_match`.
#[derive(Clone)]
pub struct Execs {
    status: Option<ExpectStatus>,
    stdout: Option<String>,
    stdout_data: Option<Vec<u8>>,
    stderr: Option<String>,
    stderr_contains: Vec<String>,
}

impl Execs {
    /// Verify the exit code from the process
    pub fn with_status(mut self, expected: i32) -> Execs {
        self.status = Some(ExpectStatus::Code(expected));
        self
    }

    /// Verify that the process did not exit successfully, whatever the code
    pub fn with_failure(mut self) -> Execs {
        self.status = Some(ExpectStatus::Failure);
        self
    }

    /// Verify that stdout consists of exactly the given lines
    pub fn with_stdout<S: ToString>(mut self, expected: S) -> Execs {
        self.stdout = Some(expected.to_string());
        self
    }

    /// Verify that stdout is exactly the given bytes, with no normalization
    pub fn with_stdout_data<B: AsRef<[u8]>>(mut self, expected: B) -> Execs {
        self.stdout_data = Some(expected.as_ref().to_vec());
        self
    }

    /// Verify that stderr consists of exactly the given lines
    pub fn with_stderr<S: ToString>(mut self, expected: S) -> Execs {
        self.stderr = Some(expected.to_string());
        self
    }

    /// Verify that the given lines appear together somewhere in stderr
    pub fn with_stderr_contains<S: ToString>(mut self, expected: S) -> Execs {
        self.stderr_contains.push(expected.to_string());
        self
    }

    fn match_output(&self, actual: &Output) -> MatchResult {
        self.match_status(actual)?;

        if let Some(expected) = &self.stdout_data {
            if &actual.stdout != expected {
                return Err(format!(
                    "stdout differs byte-for-byte\nexpected: {:?}\nactual:   {:?}",
                    String::from_utf8_lossy(expected),
                    String::from_utf8_lossy(&actual.stdout)
                ));
            }
        }

        let stdout = normalize(&actual.stdout, "stdout")?;
        let stderr = normalize(&actual.stderr, "stderr")?;

        if let Some(expected) = &self.stdout {
            match_exact(expected, &stdout, "stdout", &stderr)?;
        }
        if let Some(expected) = &self.stderr {
            match_exact(expected, &stderr, "stderr", &stdout)?;
        }
        for expected in &self.stderr_contains {
            match_contains(expected, &stderr, "stderr")?;
        }

        Ok(())
    }

    fn match_status(&self, actual: &Output) -> MatchResult {
        let matched = match self.status {
            None => true,
            Some(ExpectStatus::Code(code)) => actual.status.code() == Some(code),
            Some(ExpectStatus::Failure) => !actual.status.success(),
        };

        if matched {
            Ok(())
        } else {
            Err(format!(
                "exited with {}\n--- stdout\n{}\n--- stderr\n{}",
                actual.status,
                String::from_utf8_lossy(&actual.stdout),
                String::from_utf8_lossy(&actual.stderr)
            ))
        }
    }
}

fn normalize(output: &[u8], stream: &str) -> Result<String, String> {
    std::str::from_utf8(output)
        .map(|text| text.replace('\r', ""))
        .map_err(|_| format!("{} was not utf8 encoded", stream))
}

fn match_exact(expected: &str, actual: &str, stream: &str, other: &str) -> MatchResult {
    let expected: Vec<&str> = expected.lines().collect();
    let actual: Vec<&str> = actual.lines().collect();
    let lines = expected.len().max(actual.len());

    let diffs: Vec<String> = (0..lines)
        .filter_map(|i| match (expected.get(i), actual.get(i)) {
            (Some(e), Some(a)) if lines_match(e, a) => None,
            (e, a) => Some(format!(
                "{:3} - |{}|\n    + |{}|",
                i,
                e.unwrap_or(&""),
                a.unwrap_or(&"")
            )),
        })
        .collect();

    if diffs.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "{} differences:\n{}\n\nother output:\n`{}`",
            stream,
            diffs.join("\n"),
            other
        ))
    }
}

fn match_contains(expected: &str, actual: &str, stream: &str) -> MatchResult {
    let expected: Vec<&str> = expected.lines().collect();
    let actual: Vec<&str> = actual.lines().collect();

    let found = expected.is_empty()
        || actual.windows(expected.len()).any(|window| {
            window
                .iter()
                .zip(&expected)
                .all(|(a, e)| lines_match(e, a))
        });

    if found {
        Ok(())
    } else {
        Err(format!(
            "expected to find in {}:\n{}\n\nactual output:\n{}",
            stream,
            expected.join("\n"),
            actual.join("\n")
        ))
    }
}

/// Compare a line with an expected pattern
///
/// `[..]` matches any run of characters on the line, and `[ERROR]` / `[WARNING]` stand for the
/// launcher's message prefixes.
pub fn lines_match(expected: &str, actual: &str) -> bool {
    let expected = expected
        .replace("[ERROR]", "Launcher error:")
        .replace("[WARNING]", "Launcher warning:");
    let parts: Vec<&str> = expected.split("[..]").collect();

    let mut rest = match actual.strip_prefix(parts[0]) {
        Some(rest) => rest,
        None => return false,
    };
    let (last, middle) = match parts[1..].split_last() {
        Some(split) => split,
        None => return rest.is_empty(),
    };

    for part in middle {
        match rest.find(part) {
            Some(i) => rest = &rest[i + part.len()..],
            None => return false,
        }
    }

    rest.ends_with(last)
}

impl fmt::Display for Execs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "execs")
    }
}

impl fmt::Debug for Execs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "execs")
    }
}

impl Matcher<ProcessBuilder> for Execs {
    fn matches(&self, mut process: ProcessBuilder) -> MatchResult {
        self.matches(&mut process)
    }
}

impl<'a> Matcher<&'a mut ProcessBuilder> for Execs {
    fn matches(&self, process: &'a mut ProcessBuilder) -> MatchResult {
        println!("running {}", process);
        let output = process.output().map_err(|err| {
            let cause = std::error::Error::source(&err)
                .map(|source| source.to_string())
                .unwrap_or_default();
            format!("{}: {}", err, cause)
        })?;
        self.match_output(&output)
    }
}

/// Expect a successful exit unless told otherwise
pub fn execs() -> Execs {
    Execs {
        status: Some(ExpectStatus::Code(0)),
        stdout: None,
        stdout_data: None,
        stderr: None,
        stderr_contains: Vec::new(),
    }
}

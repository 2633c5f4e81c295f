//! This module provides a custom Logger implementation for use with the `log` crate
use console::style;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::env;
use std::fmt::Display;
use std::io::IsTerminal;
use textwrap::{fill, Options, WordSplitter};

use crate::style::text_width;

const ERROR_PREFIX: &str = "Launcher error:";
const WARNING_PREFIX: &str = "Launcher warning:";
const LAUNCHER_LOGLEVEL: &str = "LAUNCHER_LOGLEVEL";
const ALLOWED_PREFIX: &str = "launcher";
const WRAP_INDENT: &str = "    ";

/// Logger that writes every record to stderr
///
/// Stdout is connected straight through to the server, so nothing the launcher says may end
/// up there.
pub struct Logger {
    level: LevelFilter,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) && record.target().starts_with(ALLOWED_PREFIX) {
            match record.level() {
                Level::Error => self.log_error(record.args()),
                Level::Warn => self.log_warning(record.args()),
                Level::Debug | Level::Trace => eprintln!("[verbose] {}", record.args()),
                Level::Info => eprintln!("{}", record.args()),
            }
        }
    }

    fn flush(&self) {}
}

impl Logger {
    /// Initialize the global logger, using the environment to determine the level of verbosity
    pub fn init() -> Result<(), SetLoggerError> {
        let logger = Logger {
            level: level_from_env(),
        };
        log::set_max_level(logger.level);
        log::set_boxed_logger(Box::new(logger))?;
        Ok(())
    }

    fn log_error<D>(&self, message: &D)
    where
        D: Display,
    {
        eprintln!("{} {}", style(ERROR_PREFIX).for_stderr().red().bold(), message);
    }

    fn log_warning<D>(&self, message: &D)
    where
        D: Display,
    {
        eprintln!(
            "{} {}",
            style(WARNING_PREFIX).for_stderr().yellow().bold(),
            wrap_content(WARNING_PREFIX, message)
        );
    }
}

/// Wraps the supplied content to the terminal width, if we are in a terminal.
/// If not, returns the content as a String
///
/// Note: Uses the supplied prefix to calculate the terminal width, but then removes
/// it so that it can be styled (style characters are counted against the wrapped width)
fn wrap_content<D>(prefix: &str, content: &D) -> String
where
    D: Display,
{
    match text_width() {
        Some(width) => {
            let options = Options::new(width)
                .word_splitter(WordSplitter::NoHyphenation)
                .subsequent_indent(WRAP_INDENT)
                .break_words(false);

            fill(&format!("{} {}", prefix, content), options).replace(prefix, "")
        }
        None => format!(" {}", content),
    }
}

/// Determines the correct logging level based on the environment
/// If LAUNCHER_LOGLEVEL is set to a valid level, we use that
/// If not, we check whether stderr is a TTY
///     If it is a TTY, we use Info
///     If it is NOT a TTY, we use Error so that a supervising client only sees failures
fn level_from_env() -> LevelFilter {
    parse_level(env::var(LAUNCHER_LOGLEVEL).ok()).unwrap_or_else(|| {
        if std::io::stderr().is_terminal() {
            LevelFilter::Info
        } else {
            LevelFilter::Error
        }
    })
}

fn parse_level(level: Option<String>) -> Option<LevelFilter> {
    level.and_then(|level| level.to_uppercase().parse().ok())
}

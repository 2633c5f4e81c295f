//! Utilities for styling the launcher's own (stderr) output.
use std::error::Error;

use console::style;

const MAX_WIDTH: usize = 100;

/// Format the underlying cause of an error
pub(crate) fn format_error_cause(inner: &dyn Error) -> String {
    format!(
        "{}{} {}",
        style("cause").for_stderr().underlined().bold(),
        style(":").for_stderr().bold(),
        inner,
    )
}

/// Get the width of the terminal, limited to a maximum of MAX_WIDTH
///
/// Measured against stderr, since that is the only stream the launcher writes to.
pub fn text_width() -> Option<usize> {
    term_size::dimensions_stderr().map(|(w, _)| w.min(MAX_WIDTH))
}

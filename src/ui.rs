//! Human-facing terminal output, separate from the CI log stream.

/// Format and print an error message in red to stderr.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

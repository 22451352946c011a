//! Output formatting for the CLI.
//!
//! Progress lines go to stderr so that stdout stays free for scripting;
//! write failures are deliberately ignored.

use camino::Utf8Path;
use std::io::Write;

/// Write a single line to the given stderr writer, ignoring failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Format a success message after all shims were written.
#[must_use]
pub fn success_message(count: usize, base_dir: &Utf8Path) -> String {
    let plural = if count == 1 { "shim" } else { "shims" };
    format!("Wrote {count} provider {plural} under {base_dir}")
}

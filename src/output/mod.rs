//! Output dispatch for the reflow CLI application
//!
//! The reformatters themselves never perform I/O; this module picks the
//! mode, runs the appropriate one, and hands the resulting block to a
//! console or to the log.

use std::io::Write;
use tracing::info;

use crate::formatting;

/// Which reformatter a dump is routed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Break at whitespace nearest the width bound.
    Simple,
    /// Derive indentation from the embedded marker characters.
    Pretty,
}

/// Run the selected reformatter over the dump text.
pub fn format(dump: &str, mode: Mode) -> String {
    match mode {
        Mode::Simple => formatting::wrap(dump, formatting::MAX_LINE_WIDTH),
        Mode::Pretty => formatting::pretty(dump),
    }
}

/// Reformat a dump and write it to stdout, appending the final line
/// break and flushing so the block is visible immediately.
pub fn write_console(dump: &str, mode: Mode) {
    let formatted = format(dump, mode);

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(formatted.as_bytes())
        .expect("Write formatted dump to console");
    handle
        .write_all(b"\n")
        .expect("Write final line break to console");
    handle
        .flush()
        .expect("Flush console output");
}

/// Reformat a dump and send it to the log under the given title.
pub fn write_log(title: &str, dump: &str, mode: Mode) {
    let formatted = format(dump, mode);
    info!("{}:\n{}", title, formatted.trim_end_matches('\n'));
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn mode_selects_reformatter() {
        // marker characters mean nothing to the simple wrapper
        let dump = "{a :b 1}";
        assert_eq!(format(dump, Mode::Simple), "{a :b 1}\n");
        assert_eq!(format(dump, Mode::Pretty), "   {a \n   :b 1\n   }\n");
    }
}

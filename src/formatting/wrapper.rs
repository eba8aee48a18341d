//! Width-bounded line wrapping for serialized dumps

use crate::formatting::LineBuffer;

/// Reflow a dump for display on a terminal, breaking at whitespace
/// nearest the width bound. No structural awareness; every line is at
/// most `max_width` characters except when a single token is itself
/// longer than `max_width`, in which case it is split as-is.
pub fn wrap(dump: &str, max_width: usize) -> String {
    debug_assert!(max_width > 0);

    let chars: Vec<char> = dump.chars()
        .collect();
    let mut output = String::new();
    let mut line = LineBuffer::new(max_width);

    // The read cursor into the dump. On a backtracked break it rewinds
    // so the deferred token is re-copied at the start of the next line.
    let mut i = 0;

    loop {
        line.clear();
        while !line.is_full() && i < chars.len() {
            line.push(chars[i]);
            i += 1;
        }
        if i == chars.len() {
            break;
        }
        if chars[i] == ' ' {
            // ok to break at the adjacent space; consume it
            i += 1;
        } else if let Some(k) = line.rfind_space() {
            // back up to the last space in the line; everything after
            // it will be re-copied on the next line
            i -= line.len() - k - 1;
            line.truncate(k);
        }
        // no space found at all: the token is wider than the bound, so
        // the full buffer goes out and the token is hard split
        line.emit_into(&mut output);
    }
    if !line.is_empty() {
        line.emit_into(&mut output);
    }

    output
}

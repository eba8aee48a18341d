//! Reformatters for flat serializations of tree-structured values

mod pretty;
mod wrapper;

// Re-export all public symbols
pub use pretty::*;
pub use wrapper::*;

/// Widest line either reformatter will produce.
pub const MAX_LINE_WIDTH: usize = 78;

/// Columns added per nesting level by the pretty printer.
pub const INDENT_STEP: usize = 3;

/// Cap on physical indentation, so pathological nesting stays readable.
pub const MAX_INDENT: usize = 60;

/// Layout bounds for the pretty printer. The defaults are the canonical
/// values used for terminal output; tests substitute smaller ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub max_width: usize,
    pub indent_step: usize,
    pub max_indent: usize,
}

impl Default for Layout {
    fn default() -> Layout {
        Layout {
            max_width: MAX_LINE_WIDTH,
            indent_step: INDENT_STEP,
            max_indent: MAX_INDENT,
        }
    }
}

/// The output line currently under construction. Grows on demand but is
/// bounded: a line never holds more than `limit` characters, and a full
/// buffer must be emitted before anything further is pushed.
pub(crate) struct LineBuffer {
    chars: Vec<char>,
    limit: usize,
}

impl LineBuffer {
    pub(crate) fn new(limit: usize) -> LineBuffer {
        LineBuffer {
            chars: Vec::with_capacity(limit),
            limit,
        }
    }

    /// A fresh line pre-filled with `distance` spaces of indentation.
    pub(crate) fn at_indent(distance: usize, limit: usize) -> LineBuffer {
        let mut line = LineBuffer::new(limit);
        for _ in 0..distance {
            line.push(' ');
        }
        line
    }

    pub(crate) fn push(&mut self, c: char) {
        debug_assert!(
            self.chars
                .len()
                < self.limit
        );
        self.chars
            .push(c);
    }

    pub(crate) fn len(&self) -> usize {
        self.chars
            .len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.chars
            .is_empty()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.chars
            .len()
            == self.limit
    }

    pub(crate) fn clear(&mut self) {
        self.chars
            .clear();
    }

    pub(crate) fn truncate(&mut self, length: usize) {
        self.chars
            .truncate(length);
    }

    /// Position of the last space in the line, ignoring position 0; a
    /// break there would leave nothing on the current line.
    pub(crate) fn rfind_space(&self) -> Option<usize> {
        self.chars
            .iter()
            .rposition(|&c| c == ' ')
            .filter(|&k| k > 0)
    }

    /// Append the line's content and a line break to the output block.
    pub(crate) fn emit_into(&self, output: &mut String) {
        output.extend(
            self.chars
                .iter(),
        );
        output.push('\n');
    }
}

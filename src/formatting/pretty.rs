//! Structure-aware pretty printing for serialized dumps
//!
//! The dump text carries five marker characters left behind by the
//! serializer. They are enough to recover the nesting of the original
//! value without parsing it: blocks open and close indentation, fields
//! and group closers force line breaks. Markers are never required to
//! balance; a malformed dump still reflows, it just stops outdenting at
//! column zero.

use crate::formatting::{Layout, LineBuffer};

/// The marker characters recognized in a dump, classified per input
/// character. Anything else is copied through verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    OpenGroup,
    CloseGroup,
    OpenBlock,
    CloseBlock,
    FieldSeparator,
}

impl Trigger {
    pub fn classify(c: char) -> Option<Trigger> {
        match c {
            '(' => Some(Trigger::OpenGroup),
            ')' => Some(Trigger::CloseGroup),
            '{' => Some(Trigger::OpenBlock),
            '}' => Some(Trigger::CloseBlock),
            ':' => Some(Trigger::FieldSeparator),
            _ => None,
        }
    }
}

/// Nesting state for one pretty-printing pass. The physical distance is
/// derived from the logical level on every use so the two can never
/// disagree.
struct Indent {
    level: usize,
    step: usize,
    max: usize,
}

impl Indent {
    fn new(layout: &Layout) -> Indent {
        Indent {
            level: 0,
            step: layout.indent_step,
            max: layout.max_indent,
        }
    }

    fn distance(&self) -> usize {
        (self.level * self.step).min(self.max)
    }

    fn open(&mut self) {
        self.level += 1;
    }

    /// Unmatched closers are tolerated; the level floors at zero.
    fn close(&mut self) {
        self.level = self
            .level
            .saturating_sub(1);
    }
}

/// Reflow a dump for display on a terminal, using the embedded marker
/// characters to indent intelligently.
pub fn pretty(dump: &str) -> String {
    pretty_with(dump, &Layout::default())
}

/// As [`pretty`], with explicit layout bounds. Requires
/// `max_indent < max_width` so an indented line always has room left
/// for content (the canonical 60 < 78 satisfies this).
pub fn pretty_with(dump: &str, layout: &Layout) -> String {
    debug_assert!(layout.max_indent < layout.max_width);

    let chars: Vec<char> = dump.chars()
        .collect();
    let mut output = String::new();
    let mut indent = Indent::new(layout);
    let mut line = LineBuffer::at_indent(indent.distance(), layout.max_width);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match Trigger::classify(c) {
            Some(Trigger::CloseBlock) => {
                // any content pending on the line goes out first,
                // without the closer
                if line.len() > indent.distance() {
                    line.emit_into(&mut output);
                }
                // the closer stands alone at the old indent column
                let mut closer = LineBuffer::at_indent(indent.distance(), layout.max_width);
                closer.push(c);
                closer.emit_into(&mut output);
                indent.close();
                line = LineBuffer::at_indent(indent.distance(), layout.max_width);
                // suppress whitespace just after the closer
                i = skip_spaces(&chars, i + 1);
                continue;
            }
            Some(Trigger::CloseGroup) => {
                line.push(c);
                // force a line break after the closer, unless another
                // one follows: runs of closers stay together
                if chars.get(i + 1) != Some(&')') {
                    line.emit_into(&mut output);
                    line = LineBuffer::at_indent(indent.distance(), layout.max_width);
                    i = skip_spaces(&chars, i + 1);
                    continue;
                }
            }
            Some(Trigger::OpenBlock) => {
                // force a line break before the opener, then indent and
                // leave the new line open with the opener on it
                if line.len() > indent.distance() {
                    line.emit_into(&mut output);
                }
                indent.open();
                line = LineBuffer::at_indent(indent.distance(), layout.max_width);
                line.push(c);
            }
            Some(Trigger::FieldSeparator) => {
                // each field starts its own line
                if line.len() > indent.distance() {
                    line.emit_into(&mut output);
                    line = LineBuffer::at_indent(indent.distance(), layout.max_width);
                }
                line.push(c);
            }
            Some(Trigger::OpenGroup) | None => {
                line.push(c);
            }
        }
        i += 1;
        if line.is_full() {
            // the width bound forces a flush regardless of markers
            line.emit_into(&mut output);
            line = LineBuffer::at_indent(indent.distance(), layout.max_width);
        }
    }
    if !line.is_empty() {
        line.emit_into(&mut output);
    }

    output
}

fn skip_spaces(chars: &[char], mut i: usize) -> usize {
    while chars.get(i) == Some(&' ') {
        i += 1;
    }
    i
}

#[cfg(test)]
mod check {
    use super::*;

    fn small() -> Layout {
        Layout {
            max_width: 20,
            indent_step: 3,
            max_indent: 12,
        }
    }

    #[test]
    fn classification() {
        assert_eq!(Trigger::classify('{'), Some(Trigger::OpenBlock));
        assert_eq!(Trigger::classify('}'), Some(Trigger::CloseBlock));
        assert_eq!(Trigger::classify('('), Some(Trigger::OpenGroup));
        assert_eq!(Trigger::classify(')'), Some(Trigger::CloseGroup));
        assert_eq!(Trigger::classify(':'), Some(Trigger::FieldSeparator));
        assert_eq!(Trigger::classify('a'), None);
        assert_eq!(Trigger::classify(' '), None);
    }

    #[test]
    fn indent_distance_is_derived_and_capped() {
        let layout = Layout::default();
        let mut indent = Indent::new(&layout);
        assert_eq!(indent.distance(), 0);

        for _ in 0..10 {
            indent.open();
        }
        assert_eq!(indent.level, 10);
        assert_eq!(indent.distance(), 30);

        for _ in 0..15 {
            indent.open();
        }
        // 25 levels would be 75 columns; capped at 60
        assert_eq!(indent.distance(), 60);
    }

    #[test]
    fn indent_level_floors_at_zero() {
        let layout = Layout::default();
        let mut indent = Indent::new(&layout);
        indent.close();
        indent.close();
        assert_eq!(indent.level, 0);
        assert_eq!(indent.distance(), 0);
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(pretty_with("abc def", &small()), "abc def\n");
    }

    #[test]
    fn empty_input_produces_nothing() {
        assert_eq!(pretty_with("", &small()), "");
    }

    #[test]
    fn block_opens_and_closes_with_indent() {
        let result = pretty_with("{a}", &small());
        assert_eq!(result, "   {a\n   }\n");
    }

    #[test]
    fn unmatched_closer_is_tolerated() {
        let result = pretty_with("}a", &small());
        // the closer still gets its own line, at column zero
        assert_eq!(result, "}\na\n");
    }

    #[test]
    fn spaces_after_closers_are_swallowed() {
        let result = pretty_with("{a}   b", &small());
        assert_eq!(result, "   {a\n   }\nb\n");
    }

    #[test]
    fn field_separator_starts_a_line() {
        let result = pretty_with(":a 1 :b 2", &small());
        assert_eq!(result, ":a 1 \n:b 2\n");
    }

    #[test]
    fn consecutive_close_groups_share_a_line() {
        let result = pretty_with("((a) (b))", &small());
        assert_eq!(result, "((a)\n(b))\n");
    }

    #[test]
    fn width_bound_forces_flush() {
        let layout = Layout {
            max_width: 5,
            indent_step: 3,
            max_indent: 3,
        };
        let result = pretty_with("abcdefghij", &layout);
        assert_eq!(result, "abcde\nfghij\n");
    }

    #[test]
    fn width_continuation_keeps_indent() {
        let layout = Layout {
            max_width: 8,
            indent_step: 3,
            max_indent: 3,
        };
        let result = pretty_with("{abcdefghij}", &layout);
        assert_eq!(result, "   {abcd\n   efghi\n   j\n   }\n");
    }
}

//! # quill-rope — Rope storage backend for quill
//!
//! The reference implementation of the `quill-buffer` backend contract,
//! built on [`ropey::Rope`]. Registered under the name `"rope"`; embedders
//! list [`ROPE`] in their `Registry`.
//!
//! # Design choices
//!
//! - **ropey** provides O(log n) edits, efficient line indexing, and
//!   battle-tested Unicode handling. The store is a thin adapter from the
//!   backend contract onto the rope; no text data structure is reimplemented
//!   here.
//!
//! - **Units are chars.** Lengths, offsets, and counts are Unicode scalar
//!   values, matching the contract. Byte offsets never appear.
//!
//! - **Line semantics**: a line is a maximal `\n`-terminated run with the
//!   terminator (and a preceding `\r`) stripped from the extracted text.
//!   Text after the final newline is a line only when non-empty — so
//!   `"a\nb\n"` has two lines, `"a\nb"` has two, `""` has zero, and `"\n"`
//!   has one empty line.
//!
//! - **No close hook.** The store owns nothing beyond in-process memory, so
//!   `CLOSE` is not advertised and dropping the store is the release — the
//!   degenerate close path of the facade.

use quill_buffer::backend::{Backend, TextStore};
use quill_buffer::capability::Capabilities;
use ropey::Rope;

/// The descriptor for the rope backend. List it in a `Registry`:
///
/// ```text
/// static BACKENDS: Registry = Registry::new(&[&quill_rope::ROPE]);
/// ```
pub static ROPE: RopeBackend = RopeBackend;

/// The rope storage algorithm, registered as `"rope"`.
pub struct RopeBackend;

impl Backend for RopeBackend {
    fn name(&self) -> &'static str {
        "rope"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::OPEN_EMPTY
            | Capabilities::OPEN_TEXT
            | Capabilities::LEN
            | Capabilities::READ_STR
            | Capabilities::READ_LINES
    }

    fn open_empty(&self) -> Option<Box<dyn TextStore>> {
        Some(Box::new(RopeStore { rope: Rope::new() }))
    }

    fn open_text(&self, text: &str) -> Option<Box<dyn TextStore>> {
        Some(Box::new(RopeStore {
            rope: Rope::from_str(text),
        }))
    }
}

// ---------------------------------------------------------------------------
// RopeStore
// ---------------------------------------------------------------------------

/// Document state: the rope itself. Opaque outside this crate — only the
/// facade drives it, through the handle that owns it.
struct RopeStore {
    rope: Rope,
}

impl RopeStore {
    /// Number of addressable lines under this backend's line semantics.
    ///
    /// `ropey` counts the empty segment after a trailing newline as a line;
    /// this backend does not, so that count is adjusted down by one when the
    /// final rope line is empty. An empty rope has zero lines.
    fn line_count(&self) -> usize {
        let lines = self.rope.len_lines();
        if self.rope.line(lines - 1).len_chars() == 0 {
            lines - 1
        } else {
            lines
        }
    }
}

impl TextStore for RopeStore {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn read_str(&self, offset: usize, count: usize, out: &mut String) -> usize {
        let total = self.rope.len_chars();
        if count == 0 || offset >= total {
            return 0;
        }
        let end = total.min(offset.saturating_add(count));
        out.clear();
        out.extend(self.rope.slice(offset..end).chars());
        end - offset
    }

    fn read_lines(&self, first_line: usize, max_lines: usize, out: &mut Vec<String>) -> usize {
        let total = self.line_count();
        if max_lines == 0 || first_line >= total {
            return 0;
        }
        let end = total.min(first_line.saturating_add(max_lines));
        out.clear();
        for idx in first_line..end {
            let mut text: String = self.rope.line(idx).chars().collect();
            if text.ends_with('\n') {
                text.pop();
                if text.ends_with('\r') {
                    text.pop();
                }
            }
            out.push(text);
        }
        end - first_line
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

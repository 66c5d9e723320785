//! Capability flags — which operations a backend implements.
//!
//! Every dispatchable operation has a bit in [`Capabilities`]. A backend
//! advertises its set once, at registration, and the facade consults the set
//! before every dispatch: construction paths report an unsupported operation
//! as an error, read paths degrade to "produce nothing". The set is part of
//! the descriptor and never changes after registration.
//!
//! [`Capability`] names a single operation. It exists for diagnostics — the
//! facade's "not implemented" error says *which* operation was missing — and
//! for point queries via [`BufferHandle::supports`].
//!
//! [`BufferHandle::supports`]: crate::handle::BufferHandle::supports

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// The set of operations a backend advertises.
    ///
    /// Each flag is independently optional; a backend may implement any
    /// subset. An empty set is legal (such a backend can be registered and
    /// resolved, but every open attempt reports unsupported).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Capabilities: u8 {
        /// Construct an empty buffer.
        const OPEN_EMPTY = 1 << 0;
        /// Construct a buffer from string content.
        const OPEN_TEXT  = 1 << 1;
        /// Report content length in chars.
        const LEN        = 1 << 2;
        /// Extract a substring by char offset.
        const READ_STR   = 1 << 3;
        /// Extract whole lines by line index.
        const READ_LINES = 1 << 4;
        /// Release internal state through the backend's close hook.
        const CLOSE      = 1 << 5;
    }
}

/// One dispatchable operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Construct an empty buffer.
    OpenEmpty,
    /// Construct a buffer from string content.
    OpenText,
    /// Report content length.
    Len,
    /// Extract a substring.
    ReadStr,
    /// Extract whole lines.
    ReadLines,
    /// Release internal state on close.
    Close,
}

impl Capability {
    /// The flag bit for this operation.
    #[inline]
    #[must_use]
    pub const fn flag(self) -> Capabilities {
        match self {
            Self::OpenEmpty => Capabilities::OPEN_EMPTY,
            Self::OpenText => Capabilities::OPEN_TEXT,
            Self::Len => Capabilities::LEN,
            Self::ReadStr => Capabilities::READ_STR,
            Self::ReadLines => Capabilities::READ_LINES,
            Self::Close => Capabilities::CLOSE,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenEmpty => f.write_str("opening an empty buffer"),
            Self::OpenText => f.write_str("opening a buffer from a string"),
            Self::Len => f.write_str("measuring content length"),
            Self::ReadStr => f.write_str("extracting a substring"),
            Self::ReadLines => f.write_str("extracting lines"),
            Self::Close => f.write_str("closing a buffer"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Capability; 6] = [
        Capability::OpenEmpty,
        Capability::OpenText,
        Capability::Len,
        Capability::ReadStr,
        Capability::ReadLines,
        Capability::Close,
    ];

    #[test]
    fn every_capability_has_a_distinct_flag() {
        for (i, a) in ALL.iter().enumerate() {
            assert_eq!(a.flag().bits().count_ones(), 1);
            for b in &ALL[i + 1..] {
                assert!((a.flag() & b.flag()).is_empty(), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn flags_cover_the_full_set() {
        let mut union = Capabilities::empty();
        for cap in ALL {
            union |= cap.flag();
        }
        assert_eq!(union, Capabilities::all());
    }

    #[test]
    fn default_is_empty() {
        assert!(Capabilities::default().is_empty());
    }

    #[test]
    fn display_names_are_distinct() {
        for (i, a) in ALL.iter().enumerate() {
            for b in &ALL[i + 1..] {
                assert_ne!(a.to_string(), b.to_string());
            }
        }
    }
}

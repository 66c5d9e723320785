//! Backend registry — the fixed name → descriptor lookup table.
//!
//! The registry is process-wide immutable state: the embedding program lists
//! every backend it links as a `static` slice of descriptors, builds one
//! `Registry` from it at startup, and only reads it afterwards. Because
//! descriptors are `Sync` statics and the table is never mutated, the
//! registry is safely shared without synchronization.
//!
//! ```text
//! static BACKENDS: Registry = Registry::new(&[&quill_rope::ROPE]);
//! ```
//!
//! Lookup is a linear scan returning the first exact, case-sensitive match.
//! The set is expected to stay small (a handful of algorithms), so no map
//! structure is warranted. Names must be non-empty and unique; with a
//! duplicate name the earlier registration wins on every lookup.

use crate::backend::Backend;

/// A fixed collection of backend descriptors, searchable by name.
#[derive(Clone, Copy)]
pub struct Registry {
    backends: &'static [&'static dyn Backend],
}

impl Registry {
    /// Build a registry over a fixed descriptor list. Happens once, at
    /// process start; the list is never modified afterwards.
    #[must_use]
    pub const fn new(backends: &'static [&'static dyn Backend]) -> Self {
        Self { backends }
    }

    /// Look up a backend by exact, case-sensitive name.
    ///
    /// Any string is a safe input: an empty or otherwise unregistered name
    /// simply misses. No side effects.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&'static dyn Backend> {
        self.backends
            .iter()
            .find(|backend| backend.name() == name)
            .copied()
    }

    /// The registered backend names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.backends.iter().map(|backend| backend.name())
    }

    /// Number of registered backends.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.backends.len()
    }

    /// True when no backend is registered.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Buffer handle — one open document, tagged with its backend.
//!
//! A `BufferHandle` pairs the backend-owned [`TextStore`] with a reference
//! to the [`Backend`] descriptor that created it. The pairing is permanent:
//! a handle never migrates between backends, and every operation on it
//! dispatches to the same backend for its entire lifetime.
//!
//! The caller exclusively owns the handle; the facade keeps no references
//! across calls. Release happens exactly once — through
//! [`facade::close`](crate::facade::close) or plain ownership drop, which
//! are the same thing: `Drop` runs the backend's close hook when the
//! backend advertises [`Capabilities::CLOSE`], and otherwise dropping the
//! boxed store is the release.

use std::fmt;

use crate::backend::{Backend, TextStore};
use crate::capability::{Capabilities, Capability};

/// An open document: backend-owned state plus the backend that owns it.
pub struct BufferHandle {
    backend: &'static dyn Backend,
    store: Box<dyn TextStore>,
}

impl BufferHandle {
    /// Pair a freshly constructed store with its creating backend. Only the
    /// facade's open functions call this — a handle cannot be forged with a
    /// store from a different backend.
    pub(crate) fn new(backend: &'static dyn Backend, store: Box<dyn TextStore>) -> Self {
        Self { backend, store }
    }

    /// Name of the backend this handle was created through.
    #[inline]
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// The operations this handle's backend advertises.
    ///
    /// Read accessors degrade to "produce nothing" on unadvertised
    /// operations; this query lets a caller distinguish "no line-read
    /// support" from "the buffer truly has zero lines" without relying on
    /// that coincidence.
    #[inline]
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.backend.capabilities()
    }

    /// True when this handle's backend advertises `capability`.
    #[inline]
    #[must_use]
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(capability.flag())
    }

    /// The backend-owned state, for facade dispatch.
    pub(crate) fn store(&self) -> &dyn TextStore {
        self.store.as_ref()
    }
}

impl fmt::Debug for BufferHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferHandle")
            .field("backend", &self.backend_name())
            .field("capabilities", &self.capabilities())
            .finish_non_exhaustive()
    }
}

impl Drop for BufferHandle {
    fn drop(&mut self) {
        // The close hook runs only for backends that advertise it; for the
        // rest, dropping the boxed store is the generic release.
        if self.supports(Capability::Close) {
            self.store.close();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

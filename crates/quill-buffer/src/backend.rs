//! Backend contract — the two traits a storage algorithm implements.
//!
//! A backend splits into a **descriptor** and a **store**:
//!
//! - [`Backend`] is the descriptor: a named, immutable declaration of one
//!   storage algorithm, registered as a `static` and shared for the life of
//!   the process. It advertises its [`Capabilities`] and constructs stores.
//! - [`TextStore`] is the per-document state a constructor produces. The
//!   facade owns it as a boxed trait object inside a
//!   [`BufferHandle`](crate::handle::BufferHandle) and routes every read
//!   back through it.
//!
//! # Capability discipline
//!
//! The advertised set is the source of truth. The facade checks it *before*
//! invoking any backend function, so a backend that doesn't advertise an
//! operation is never asked to perform it. Constructors additionally return
//! `Option` — the default implementations decline — which keeps an
//! unimplemented constructor from needing a panicking body.
//!
//! # Units
//!
//! All lengths, offsets, and counts are Unicode scalar values (chars), never
//! bytes. Byte offsets must not leak through this contract.

use crate::capability::Capabilities;

/// A named, immutable description of one storage algorithm.
///
/// Implementations are registered as `static` values in a
/// [`Registry`](crate::registry::Registry) at process start and never change
/// afterwards. `Sync` is required so descriptor statics are shareable.
pub trait Backend: Sync {
    /// Unique, non-empty lookup name (e.g. `"rope"`). Resolution is exact
    /// and case-sensitive.
    fn name(&self) -> &'static str;

    /// The operations this backend implements. Fixed for the life of the
    /// descriptor.
    fn capabilities(&self) -> Capabilities;

    /// Construct an empty store.
    ///
    /// Backends that do not advertise [`Capabilities::OPEN_EMPTY`] keep the
    /// default, which declines. Advertising the flag and returning `None`
    /// anyway is a contract violation; the facade reports it as unsupported.
    fn open_empty(&self) -> Option<Box<dyn TextStore>> {
        None
    }

    /// Construct a store holding `text`.
    ///
    /// An empty `text` is valid content and must produce an empty store,
    /// never be treated as an absent argument. Backends that do not
    /// advertise [`Capabilities::OPEN_TEXT`] keep the default.
    fn open_text(&self, text: &str) -> Option<Box<dyn TextStore>> {
        let _ = text;
        None
    }
}

/// Backend-owned document state.
///
/// Opaque to the facade beyond these operations. A store belongs to exactly
/// one backend and is only ever driven through the handle that owns it.
pub trait TextStore {
    /// Total content length in chars.
    fn len_chars(&self) -> usize;

    /// Copy up to `count` chars starting at char `offset` into `out`,
    /// replacing its previous contents. Returns the number of chars written.
    ///
    /// Must clamp rather than error: when `offset + count` runs past the end
    /// of the content, fewer than `count` chars are written, and an `offset`
    /// at or past the end writes nothing and returns 0 with `out` untouched.
    /// Returning more than `count` is a contract violation.
    fn read_str(&self, offset: usize, count: usize, out: &mut String) -> usize;

    /// Produce up to `max_lines` lines starting at the 0-indexed
    /// `first_line`, replacing `out`'s previous contents. Returns the number
    /// of lines produced (fewer than `max_lines` near end of buffer; 0 with
    /// `out` untouched when `first_line` is past the last line).
    ///
    /// What counts as a line terminator is backend-defined but must be
    /// consistent across calls.
    fn read_lines(&self, first_line: usize, max_lines: usize, out: &mut Vec<String>) -> usize;

    /// Release hook, run exactly once when the owning handle closes — and
    /// only for backends that advertise [`Capabilities::CLOSE`]. Backends
    /// whose state is plain owned memory keep the default no-op; dropping
    /// the store is their release.
    fn close(&mut self) {}
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

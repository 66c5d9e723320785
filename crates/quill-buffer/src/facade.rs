//! Buffer facade — the single entry point for lifecycle and reads.
//!
//! Every buffer operation flows through this module: it resolves the backend
//! by name, validates that the requested operation is advertised, delegates,
//! and normalizes failure into a uniform shape. Callers never touch a
//! backend directly.
//!
//! # Failure policy
//!
//! The two construction paths are strict: an empty name, an unresolved name,
//! and an unadvertised constructor are three distinguishable [`OpenError`]s,
//! each terminal for the call — no retry, and never a partial handle.
//!
//! The read accessors are lenient: an absent handle, an unadvertised
//! operation, or a zero-length request all **degrade to empty** — they
//! return 0 and leave the destination untouched instead of raising anything.
//! A pure read has nothing useful to say about *why* there is no content;
//! callers that need to distinguish can query
//! [`BufferHandle::supports`](crate::handle::BufferHandle::supports).
//!
//! [`close`] never fails, even on an absent handle, so cleanup paths can
//! call it unconditionally.

use std::error::Error;
use std::fmt;

use crate::backend::Backend;
use crate::capability::Capability;
use crate::handle::BufferHandle;
use crate::registry::Registry;

/// Where to report a backend that doesn't implement an operation yet.
const ISSUE_URL: &str = "https://github.com/quill-editor/quill/issues";

// ---------------------------------------------------------------------------
// OpenError
// ---------------------------------------------------------------------------

/// Why a buffer could not be opened.
///
/// The `Display` text is the operator-facing diagnostic; the three variants
/// stay distinguishable so a misspelled backend name reads differently from
/// a genuinely unsupported operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenError {
    /// The backend name argument was empty.
    EmptyName,

    /// No registered backend matches the requested name.
    UnknownBackend(String),

    /// The backend exists but does not advertise the requested operation.
    Unsupported {
        /// Name of the resolved backend.
        backend: &'static str,
        /// The operation it is missing.
        capability: Capability,
    },
}

impl fmt::Display for OpenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => f.write_str("invalid backend name: (empty)"),
            Self::UnknownBackend(name) => {
                write!(f, "could not resolve backend: '{name}'")
            }
            Self::Unsupported { backend, capability } => {
                write!(
                    f,
                    "{capability} is not yet implemented for backend '{backend}'; \
                     please file an issue at {ISSUE_URL}"
                )
            }
        }
    }
}

impl Error for OpenError {}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Resolve `name` and require that the resolved backend advertises
/// `capability`. The gate runs before any backend function is invoked.
fn resolve_for(
    registry: &Registry,
    name: &str,
    capability: Capability,
) -> Result<&'static dyn Backend, OpenError> {
    if name.is_empty() {
        return Err(OpenError::EmptyName);
    }
    let backend = registry
        .resolve(name)
        .ok_or_else(|| OpenError::UnknownBackend(name.to_string()))?;
    if !backend.capabilities().contains(capability.flag()) {
        return Err(OpenError::Unsupported {
            backend: backend.name(),
            capability,
        });
    }
    Ok(backend)
}

/// Open a new empty buffer through the named backend.
///
/// # Errors
///
/// [`OpenError::EmptyName`] for an empty name, [`OpenError::UnknownBackend`]
/// when no registered backend matches, and [`OpenError::Unsupported`] when
/// the backend does not implement empty construction (reported without
/// invoking any backend function).
pub fn open(registry: &Registry, name: &str) -> Result<BufferHandle, OpenError> {
    let backend = resolve_for(registry, name, Capability::OpenEmpty)?;
    let store = backend.open_empty().ok_or(OpenError::Unsupported {
        backend: backend.name(),
        capability: Capability::OpenEmpty,
    })?;
    Ok(BufferHandle::new(backend, store))
}

/// Open a buffer holding `content` through the named backend.
///
/// An empty `content` string is valid content — it opens an empty buffer,
/// it is not an input error.
///
/// # Errors
///
/// Same taxonomy as [`open`], checked against the construct-from-string
/// capability.
pub fn open_text(
    registry: &Registry,
    name: &str,
    content: &str,
) -> Result<BufferHandle, OpenError> {
    let backend = resolve_for(registry, name, Capability::OpenText)?;
    let store = backend.open_text(content).ok_or(OpenError::Unsupported {
        backend: backend.name(),
        capability: Capability::OpenText,
    })?;
    Ok(BufferHandle::new(backend, store))
}

// ---------------------------------------------------------------------------
// Read accessors (degrade to empty)
// ---------------------------------------------------------------------------

/// Content length in chars.
///
/// Degrades to 0 on an absent handle or a backend without the length
/// operation — "empty" and "unknown" are deliberately indistinct here.
#[must_use]
pub fn len(buf: Option<&BufferHandle>) -> usize {
    match buf {
        Some(buf) if buf.supports(Capability::Len) => buf.store().len_chars(),
        _ => 0,
    }
}

/// Copy up to `count` chars starting at char `offset` into `out`, replacing
/// its previous contents. Returns the number of chars written — fewer than
/// `count` when the range runs past the end of the buffer.
///
/// Degrades to 0 with `out` untouched on an absent handle, an unadvertised
/// operation, or `count == 0`.
pub fn read_str(
    buf: Option<&BufferHandle>,
    offset: usize,
    count: usize,
    out: &mut String,
) -> usize {
    match buf {
        Some(buf) if count > 0 && buf.supports(Capability::ReadStr) => {
            let written = buf.store().read_str(offset, count, out);
            debug_assert!(written <= count, "backend wrote more than requested");
            written
        }
        _ => 0,
    }
}

/// Produce up to `max_lines` lines starting at the 0-indexed `first_line`
/// into `out`, replacing its previous contents. Returns the number of lines
/// produced — fewer than `max_lines` near the end of the buffer.
///
/// Degrades to 0 with `out` untouched on an absent handle, an unadvertised
/// operation, or `max_lines == 0`. Line terminator semantics are
/// backend-defined but consistent across calls.
pub fn read_lines(
    buf: Option<&BufferHandle>,
    first_line: usize,
    max_lines: usize,
    out: &mut Vec<String>,
) -> usize {
    match buf {
        Some(buf) if max_lines > 0 && buf.supports(Capability::ReadLines) => {
            let produced = buf.store().read_lines(first_line, max_lines, out);
            debug_assert!(produced <= max_lines, "backend produced more than requested");
            produced
        }
        _ => 0,
    }
}

// ---------------------------------------------------------------------------
// Destruction
// ---------------------------------------------------------------------------

/// Close a buffer. `None` is a no-op, never an error, so cleanup code can
/// call this unconditionally and repeatedly.
///
/// Consuming the handle runs the backend's close hook when advertised
/// (see [`BufferHandle`]'s drop behavior); otherwise releasing the owned
/// store is the whole operation.
pub fn close(buf: Option<BufferHandle>) {
    drop(buf);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Backend, TextStore};
    use crate::capability::Capabilities;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ── Test backends ───────────────────────────────────────────────────
    //
    // `vec` — a full read backend over a char vector, no close hook.
    // `hooked` — construct-from-string plus a counting close hook.
    // `sealed` — advertises nothing; its constructors count invocations so
    //            tests can prove the capability gate short-circuits.
    // `hollow` — advertises construction but declines it (a lying backend).
    // `opaque` — construct-from-string only; every read degrades.

    struct VecStore {
        chars: Vec<char>,
    }

    impl VecStore {
        fn text(text: &str) -> Box<dyn TextStore> {
            Box::new(Self {
                chars: text.chars().collect(),
            })
        }

        fn line_starts(&self) -> Vec<usize> {
            if self.chars.is_empty() {
                return Vec::new();
            }
            let mut starts = vec![0];
            for (i, &ch) in self.chars.iter().enumerate() {
                if ch == '\n' {
                    starts.push(i + 1);
                }
            }
            // Text after the final newline is a line only when non-empty.
            if starts.last() == Some(&self.chars.len()) {
                starts.pop();
            }
            starts
        }
    }

    impl TextStore for VecStore {
        fn len_chars(&self) -> usize {
            self.chars.len()
        }

        fn read_str(&self, offset: usize, count: usize, out: &mut String) -> usize {
            if count == 0 || offset >= self.chars.len() {
                return 0;
            }
            let end = self.chars.len().min(offset.saturating_add(count));
            out.clear();
            out.extend(&self.chars[offset..end]);
            end - offset
        }

        fn read_lines(&self, first: usize, max: usize, out: &mut Vec<String>) -> usize {
            let starts = self.line_starts();
            if max == 0 || first >= starts.len() {
                return 0;
            }
            let end = starts.len().min(first.saturating_add(max));
            out.clear();
            for idx in first..end {
                let from = starts[idx];
                let to = self.chars[from..]
                    .iter()
                    .position(|&ch| ch == '\n')
                    .map_or(self.chars.len(), |n| from + n);
                out.push(self.chars[from..to].iter().collect());
            }
            end - first
        }
    }

    struct VecBackend;

    impl Backend for VecBackend {
        fn name(&self) -> &'static str {
            "vec"
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities::OPEN_EMPTY
                | Capabilities::OPEN_TEXT
                | Capabilities::LEN
                | Capabilities::READ_STR
                | Capabilities::READ_LINES
        }

        fn open_empty(&self) -> Option<Box<dyn TextStore>> {
            Some(VecStore::text(""))
        }

        fn open_text(&self, text: &str) -> Option<Box<dyn TextStore>> {
            Some(VecStore::text(text))
        }
    }

    static HOOKED_CLOSES: AtomicUsize = AtomicUsize::new(0);

    struct HookedStore;

    impl TextStore for HookedStore {
        fn len_chars(&self) -> usize {
            0
        }

        fn read_str(&self, _offset: usize, _count: usize, _out: &mut String) -> usize {
            0
        }

        fn read_lines(&self, _first: usize, _max: usize, _out: &mut Vec<String>) -> usize {
            0
        }

        fn close(&mut self) {
            HOOKED_CLOSES.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct HookedBackend;

    impl Backend for HookedBackend {
        fn name(&self) -> &'static str {
            "hooked"
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities::OPEN_TEXT | Capabilities::CLOSE
        }

        fn open_text(&self, _text: &str) -> Option<Box<dyn TextStore>> {
            Some(Box::new(HookedStore))
        }
    }

    static SEALED_CALLS: AtomicUsize = AtomicUsize::new(0);

    struct SealedBackend;

    impl Backend for SealedBackend {
        fn name(&self) -> &'static str {
            "sealed"
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities::empty()
        }

        fn open_empty(&self) -> Option<Box<dyn TextStore>> {
            SEALED_CALLS.fetch_add(1, Ordering::SeqCst);
            None
        }

        fn open_text(&self, _text: &str) -> Option<Box<dyn TextStore>> {
            SEALED_CALLS.fetch_add(1, Ordering::SeqCst);
            None
        }
    }

    struct HollowBackend;

    impl Backend for HollowBackend {
        fn name(&self) -> &'static str {
            "hollow"
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities::OPEN_EMPTY
        }

        // Keeps the default open_empty, which declines despite the flag.
    }

    struct OpaqueBackend;

    impl Backend for OpaqueBackend {
        fn name(&self) -> &'static str {
            "opaque"
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities::OPEN_TEXT
        }

        fn open_text(&self, text: &str) -> Option<Box<dyn TextStore>> {
            Some(VecStore::text(text))
        }
    }

    static VEC: VecBackend = VecBackend;
    static HOOKED: HookedBackend = HookedBackend;
    static SEALED: SealedBackend = SealedBackend;
    static HOLLOW: HollowBackend = HollowBackend;
    static OPAQUE: OpaqueBackend = OpaqueBackend;
    static REGISTRY: Registry = Registry::new(&[&VEC, &HOOKED, &SEALED, &HOLLOW, &OPAQUE]);

    // ── Construction: error taxonomy ────────────────────────────────────

    #[test]
    fn open_empty_name_is_invalid() {
        assert_eq!(open(&REGISTRY, "").unwrap_err(), OpenError::EmptyName);
        assert_eq!(
            open_text(&REGISTRY, "", "hello").unwrap_err(),
            OpenError::EmptyName
        );
    }

    #[test]
    fn open_unknown_backend() {
        let err = open(&REGISTRY, "gap-table").unwrap_err();
        assert_eq!(err, OpenError::UnknownBackend("gap-table".to_string()));
    }

    #[test]
    fn open_unsupported_never_invokes_backend_functions() {
        let before = SEALED_CALLS.load(Ordering::SeqCst);
        let err = open(&REGISTRY, "sealed").unwrap_err();
        assert_eq!(
            err,
            OpenError::Unsupported {
                backend: "sealed",
                capability: Capability::OpenEmpty,
            }
        );
        let err = open_text(&REGISTRY, "sealed", "hello").unwrap_err();
        assert_eq!(
            err,
            OpenError::Unsupported {
                backend: "sealed",
                capability: Capability::OpenText,
            }
        );
        assert_eq!(SEALED_CALLS.load(Ordering::SeqCst), before);
    }

    #[test]
    fn open_reports_a_lying_backend_as_unsupported() {
        // `hollow` advertises OPEN_EMPTY but its constructor declines.
        let err = open(&REGISTRY, "hollow").unwrap_err();
        assert_eq!(
            err,
            OpenError::Unsupported {
                backend: "hollow",
                capability: Capability::OpenEmpty,
            }
        );
    }

    #[test]
    fn error_messages_stay_distinguishable() {
        let empty = OpenError::EmptyName.to_string();
        let unknown = OpenError::UnknownBackend("rope".to_string()).to_string();
        let unsupported = OpenError::Unsupported {
            backend: "rope",
            capability: Capability::OpenEmpty,
        }
        .to_string();

        assert!(empty.contains("(empty)"));
        assert!(unknown.contains("'rope'"));
        assert!(unsupported.contains("'rope'"));
        assert!(unsupported.contains("file an issue"));
        assert_ne!(empty, unknown);
        assert_ne!(unknown, unsupported);
    }

    // ── Construction: success paths ─────────────────────────────────────

    #[test]
    fn open_tags_the_handle_with_its_backend() {
        let buf = open(&REGISTRY, "vec").unwrap();
        assert_eq!(buf.backend_name(), "vec");
        assert_eq!(len(Some(&buf)), 0);
    }

    #[test]
    fn open_text_holds_the_content() {
        let buf = open_text(&REGISTRY, "vec", "hello").unwrap();
        assert_eq!(len(Some(&buf)), 5);
    }

    #[test]
    fn open_text_empty_content_is_valid() {
        let buf = open_text(&REGISTRY, "vec", "").unwrap();
        assert_eq!(len(Some(&buf)), 0);
    }

    // ── Reads: degrade to empty ─────────────────────────────────────────

    #[test]
    fn len_absent_handle_is_zero() {
        assert_eq!(len(None), 0);
    }

    #[test]
    fn reads_degrade_without_the_capability() {
        let buf = open_text(&REGISTRY, "opaque", "hello\nworld").unwrap();

        assert_eq!(len(Some(&buf)), 0);

        let mut out = String::from("stale");
        assert_eq!(read_str(Some(&buf), 0, 5, &mut out), 0);
        assert_eq!(out, "stale");

        let mut lines = vec![String::from("stale")];
        assert_eq!(read_lines(Some(&buf), 0, 5, &mut lines), 0);
        assert_eq!(lines, vec!["stale".to_string()]);
    }

    #[test]
    fn read_str_zero_count_is_zero_regardless_of_handle() {
        let buf = open_text(&REGISTRY, "vec", "hello").unwrap();
        let mut out = String::new();
        assert_eq!(read_str(Some(&buf), 0, 0, &mut out), 0);
        assert_eq!(read_str(None, 0, 0, &mut out), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn read_str_absent_handle_is_zero() {
        let mut out = String::new();
        assert_eq!(read_str(None, 0, 100, &mut out), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn read_lines_zero_max_is_zero() {
        let buf = open_text(&REGISTRY, "vec", "a\nb").unwrap();
        let mut lines = Vec::new();
        assert_eq!(read_lines(Some(&buf), 0, 0, &mut lines), 0);
        assert!(lines.is_empty());
    }

    #[test]
    fn read_lines_absent_handle_is_zero() {
        let mut lines = Vec::new();
        assert_eq!(read_lines(None, 0, 5, &mut lines), 0);
        assert!(lines.is_empty());
    }

    // ── Reads: delegation ───────────────────────────────────────────────

    #[test]
    fn read_str_clamps_at_end_of_buffer() {
        let buf = open_text(&REGISTRY, "vec", "hello").unwrap();
        let mut out = String::new();
        assert_eq!(read_str(Some(&buf), 3, 100, &mut out), 2);
        assert_eq!(out, "lo");
    }

    #[test]
    fn read_lines_clamps_at_end_of_buffer() {
        let buf = open_text(&REGISTRY, "vec", "line1\nline2\nline3").unwrap();
        let mut lines = Vec::new();
        assert_eq!(read_lines(Some(&buf), 1, 5, &mut lines), 2);
        assert_eq!(lines, vec!["line2".to_string(), "line3".to_string()]);
    }

    // ── Close ───────────────────────────────────────────────────────────

    #[test]
    fn close_absent_handle_is_a_noop_twice() {
        close(None);
        close(None);
    }

    #[test]
    fn close_after_close_is_safe() {
        let buf = open(&REGISTRY, "vec").ok();
        close(buf);
        // The handle is gone; the caller's slot is now absent.
        close(None);
    }

    #[test]
    fn close_runs_the_advertised_close_hook() {
        let buf = open_text(&REGISTRY, "hooked", "hello").unwrap();
        close(Some(buf));
        assert_eq!(HOOKED_CLOSES.load(Ordering::SeqCst), 1);
    }

    // ── End-to-end ──────────────────────────────────────────────────────

    #[test]
    fn open_read_close_round_trip() {
        let buf = open(&REGISTRY, "vec").ok();
        assert_eq!(len(buf.as_ref()), 0);
        close(buf);
    }

    #[test]
    fn failed_open_leaves_caller_with_absent_handle() {
        let buf = open(&REGISTRY, "gap-table").ok();
        assert!(buf.is_none());
        assert_eq!(len(buf.as_ref()), 0);
        let mut out = String::new();
        assert_eq!(read_str(buf.as_ref(), 0, 10, &mut out), 0);
        close(buf);
    }
}

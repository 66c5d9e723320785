//! # quill-buffer — Buffer dispatch core for quill
//!
//! This crate is the seam between an editor front-end and whatever text
//! storage algorithm holds a document's content. It contains:
//!
//! - **[`capability`]** — `Capabilities` flags declaring which operations a
//!   backend implements, and `Capability` for naming one in diagnostics
//! - **[`backend`]** — the `Backend` descriptor trait and the `TextStore`
//!   trait for backend-owned document state
//! - **[`registry`]** — `Registry`, the fixed name → backend lookup table
//!   built once at process start
//! - **[`handle`]** — `BufferHandle`, an open document tagged with the
//!   backend that created it
//! - **[`facade`]** — the public operations (`open`, `open_text`, `len`,
//!   `read_str`, `read_lines`, `close`) that resolve, validate, and dispatch
//!
//! Backends live in their own crates (see `quill-rope`) and plug in by
//! implementing the two traits and appearing in the embedder's `Registry`.

pub mod backend;
pub mod capability;
pub mod facade;
pub mod handle;
pub mod registry;

//! Lua bindings for the vellum object model.
//!
//! This crate is the marshaling boundary between a single `mlua` runtime
//! and the native toolkit. Its pieces, leaves first:
//!
//! - [`handle`] — script-visible handles over the native ownership
//!   disciplines (shared / weak / atomic-shared), with per-access liveness
//!   checks. Invalid handles surface as `nil`, never as a crash.
//! - [`callback`] — Lua functions wrapped as native callbacks under one
//!   system-wide failure policy: catch, report one tagged diagnostic,
//!   return a default.
//! - [`expr`] — "constant or computed" value expressions (used for
//!   colors).
//! - [`resolve`] — dynamic Lua value → base element handle, over a closed
//!   set of concrete element classes.
//! - [`registry`] — the type registration contract and the dependency-
//!   ordered registration list.
//! - [`bindings`] — the per-type enumeration of constructors, fields,
//!   methods, operators, and enums.
//! - [`state`] — the embedding API hosts consume.
//!
//! # Error tiers
//!
//! Script errors inside native-driven callbacks are logged and absorbed
//! ([`diag`]); conversion errors on script-supplied arguments raise inside
//! the script; whole-script failures return [`ScriptError`] to the host.
//! Native panics never cross into Lua, Lua errors never unwind native
//! frames.
//!
//! # Threading
//!
//! One runtime, one thread. The host serializes every call-in onto the
//! thread that owns the [`LuaState`]; this crate adds no locking of its
//! own. The only cross-thread pieces are timer handles (atomic refcounts)
//! and the diagnostics sink.

pub mod bindings;
pub mod callback;
pub mod diag;
pub mod error;
pub mod expr;
pub mod handle;
pub mod registry;
pub mod resolve;
pub mod state;

pub use diag::{DiagnosticSink, MemorySink};
pub use error::{BindError, ScriptError};
pub use handle::{Handle, Strong};
pub use registry::{Binding, Registry, register_all};
pub use resolve::{AsElement, resolve_element};
pub use state::{Facilities, LuaState, create_bound_state};

//! Error types for the Lua embedding layer.
//!
//! Three distinct failure tiers exist and must not be mixed up:
//!
//! - Errors raised by script code while a native callback runs are *never*
//!   surfaced as `Err` anywhere; they are routed to the diagnostics sink by
//!   the callback layer (see [`crate::callback`]).
//! - Conversion failures on arguments the script passed in are raised as
//!   `mlua::Error`, visible and catchable inside the script.
//! - The errors below cover the remaining, host-facing tier: running whole
//!   scripts and assembling the bindings at startup.

use std::path::PathBuf;

/// Top-level script execution failures, returned to the embedding host.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("script execution failed: {0}")]
    Exec(#[from] mlua::Error),
}

/// Startup failures while building the bound runtime. These are programming
/// errors in the registration list, not script-triggerable conditions.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    #[error("lua state init failed: {0}")]
    Init(#[from] mlua::Error),

    #[error("type {ty} declares base {base}, which is not registered yet")]
    BaseNotRegistered { ty: &'static str, base: &'static str },

    #[error("type {ty} is registered twice")]
    Duplicate { ty: &'static str },

    #[error("registering {ty} failed: {source}")]
    Install {
        ty: &'static str,
        #[source]
        source: mlua::Error,
    },
}


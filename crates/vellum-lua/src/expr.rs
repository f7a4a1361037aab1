//! Value expressions: one callable abstraction over "constant value" and
//! "script-computed value".
//!
//! Used wherever an attribute may be static or dynamic (computed colors).
//! A constant is converted once at build time and captured by value, so it
//! keeps working after the originating Lua value is gone. A Lua function is
//! re-invoked on every read; a failing read reports one diagnostic and
//! yields the fallback. A value of any other type (including nil) yields
//! the fallback silently — "unset" is legitimate, not a failure.

use mlua::{FromLua, Lua, Value};

use crate::diag;

/// Build a `Fn() -> T` from a Lua value per the rules above.
pub fn expression<T>(
    subsystem: &'static str,
    lua: &Lua,
    value: Value,
    fallback: T,
) -> Box<dyn Fn() -> T>
where
    T: FromLua + Clone + 'static,
{
    match value {
        Value::Function(func) => Box::new(move || match func.call::<T>(()) {
            Ok(computed) => computed,
            Err(err) => {
                diag::report(subsystem, &err.to_string());
                fallback.clone()
            }
        }),
        other => match T::from_lua(other, lua) {
            Ok(constant) => Box::new(move || constant.clone()),
            Err(_) => Box::new(move || fallback.clone()),
        },
    }
}

/// Like [`expression`], but absence is meaningful: nil yields `None` so the
/// caller can distinguish "no override" from "override equal to fallback".
pub fn expression_opt<T>(
    subsystem: &'static str,
    lua: &Lua,
    value: Value,
    fallback: T,
) -> Option<Box<dyn Fn() -> T>>
where
    T: FromLua + Clone + 'static,
{
    if value.is_nil() {
        None
    } else {
        Some(expression(subsystem, lua, value, fallback))
    }
}

//! Wrapping Lua functions as native callbacks.
//!
//! Every native call-in site uses the same failure policy: a script error
//! is caught here, reported once to the diagnostics sink under the site's
//! subsystem tag, and replaced by a default-constructed return value. It is
//! never re-raised into native control flow, and a failure does not latch —
//! the next invocation runs the Lua function again.

use mlua::{Function, FromLuaMulti, IntoLua, IntoLuaMulti};

use crate::diag;

/// Wrap a Lua function as `Fn(Args) -> Ret`.
///
/// On success the Lua return value is converted to `R`; on script error the
/// error text is reported under `subsystem` and `R::default()` is returned.
pub fn wrap<A, R>(subsystem: &'static str, func: Function) -> impl Fn(A) -> R
where
    A: IntoLuaMulti,
    R: FromLuaMulti + Default,
{
    move |args: A| match func.call::<R>(args) {
        Ok(ret) => ret,
        Err(err) => {
            diag::report(subsystem, &err.to_string());
            R::default()
        }
    }
}

/// A void callback taking no arguments.
pub fn nullary(subsystem: &'static str, func: Function) -> impl Fn() {
    let wrapped = wrap::<(), ()>(subsystem, func);
    move || wrapped(())
}

/// A void callback taking one argument.
pub fn unary<A: IntoLua>(subsystem: &'static str, func: Function) -> impl Fn(A) {
    let wrapped = wrap::<(A,), ()>(subsystem, func);
    move |a| wrapped((a,))
}

/// A void callback taking two arguments.
pub fn binary<A: IntoLua, B: IntoLua>(subsystem: &'static str, func: Function) -> impl Fn(A, B) {
    let wrapped = wrap::<(A, B), ()>(subsystem, func);
    move |a, b| wrapped((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::MemorySink;
    use mlua::Lua;

    fn lua_fn(lua: &Lua, src: &str) -> Function {
        lua.load(src).eval().unwrap()
    }

    #[test]
    fn success_converts_the_result() {
        let lua = Lua::new();
        let func = lua_fn(&lua, "return function(a, b) return a + b end");
        let add = wrap::<(f64, f64), f64>("Test add", func);
        assert_eq!(add((2.0, 3.0)), 5.0);
    }

    #[test]
    fn failure_reports_once_and_returns_default() {
        let lua = Lua::new();
        let func = lua_fn(&lua, "return function() error('kaput') end");
        let callback = wrap::<(), f64>("Test subsystem", func);

        let sink = MemorySink::new();
        let result = diag::with_sink(sink.clone(), || callback(()));
        assert_eq!(result, 0.0);
        assert_eq!(sink.count_for("Test subsystem"), 1);
        assert!(sink.records()[0].1.contains("kaput"));
    }

    #[test]
    fn failure_does_not_latch() {
        let lua = Lua::new();
        let func = lua_fn(
            &lua,
            "count = 0; return function() count = count + 1; if count == 1 then error('first') end; return count end",
        );
        let callback = wrap::<(), i64>("Test flaky", func);

        let sink = MemorySink::new();
        diag::with_sink(sink.clone(), || {
            assert_eq!(callback(()), 0); // failed, default
            assert_eq!(callback(()), 2); // recovered
            assert_eq!(callback(()), 3);
        });
        assert_eq!(sink.count_for("Test flaky"), 1);
    }

    #[test]
    fn void_callbacks_swallow_results_and_errors() {
        let lua = Lua::new();
        let ok = nullary("Test void", lua_fn(&lua, "return function() return 123 end"));
        ok();

        let bad = unary::<f64>("Test void", lua_fn(&lua, "return function(x) error(x) end"));
        let sink = MemorySink::new();
        diag::with_sink(sink.clone(), || {
            bad(9.0);
            bad(9.0);
        });
        assert_eq!(sink.count_for("Test void"), 2);
    }
}

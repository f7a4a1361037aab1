//! The embedding API: a Lua state with configurable standard library
//! facilities, script execution, and typed global access.

use std::path::Path;

use bitflags::bitflags;
use mlua::{FromLua, IntoLua, Lua, LuaOptions, StdLib, Value};

use crate::error::{BindError, ScriptError};
use crate::registry;

bitflags! {
    /// Standard library facilities a host may open. The base library is
    /// always available; its flag exists so hosts can express the full set
    /// explicitly.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Facilities: u16 {
        const BASE      = 1 << 0;
        const PACKAGE   = 1 << 1;
        const COROUTINE = 1 << 2;
        const STRING    = 1 << 3;
        const OS        = 1 << 4;
        const MATH      = 1 << 5;
        const TABLE     = 1 << 6;
        const IO        = 1 << 7;
    }
}

impl Facilities {
    fn to_std_lib(self) -> StdLib {
        let mut libs = StdLib::NONE;
        if self.contains(Facilities::PACKAGE) {
            libs |= StdLib::PACKAGE;
        }
        if self.contains(Facilities::COROUTINE) {
            libs |= StdLib::COROUTINE;
        }
        if self.contains(Facilities::STRING) {
            libs |= StdLib::STRING;
        }
        if self.contains(Facilities::OS) {
            libs |= StdLib::OS;
        }
        if self.contains(Facilities::MATH) {
            libs |= StdLib::MATH;
        }
        if self.contains(Facilities::TABLE) {
            libs |= StdLib::TABLE;
        }
        if self.contains(Facilities::IO) {
            libs |= StdLib::IO;
        }
        libs
    }
}

/// An embedded Lua runtime.
///
/// Single-threaded and cooperative: the host drives every call-in from one
/// thread, and script code runs to completion per call-in. No locking
/// happens here.
pub struct LuaState {
    lua: Lua,
}

impl LuaState {
    /// A state with every facility open.
    pub fn new() -> mlua::Result<Self> {
        Ok(Self { lua: Lua::new() })
    }

    /// A state with exactly the requested facilities.
    pub fn with_facilities(facilities: Facilities) -> mlua::Result<Self> {
        if facilities == Facilities::all() {
            return Self::new();
        }
        let lua = Lua::new_with(facilities.to_std_lib(), LuaOptions::default())?;
        Ok(Self { lua })
    }

    /// The underlying interpreter, for registration and advanced use.
    pub fn lua(&self) -> &Lua {
        &self.lua
    }

    /// Run a script file. The result is the chunk's return value; callers
    /// must check for `Err` before using it.
    pub fn exec_file(&self, path: &Path) -> Result<Value, ScriptError> {
        let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let name = format!("@{}", path.display());
        Ok(self.lua.load(source.as_str()).set_name(name).eval::<Value>()?)
    }

    /// Run inline source.
    pub fn exec(&self, source: &str) -> Result<Value, ScriptError> {
        Ok(self.lua.load(source).set_name("=<inline>").eval::<Value>()?)
    }

    /// Read a global by name and type.
    pub fn get<T: FromLua>(&self, name: &str) -> mlua::Result<T> {
        self.lua.globals().get(name)
    }

    /// Write a global.
    pub fn set(&self, name: &str, value: impl IntoLua) -> mlua::Result<()> {
        self.lua.globals().set(name, value)
    }

    /// Whether a global with this name exists.
    pub fn has(&self, name: &str) -> bool {
        self.lua.globals().contains_key(name).unwrap_or(false)
    }
}

/// A state with every facility open and all toolkit bindings registered —
/// the usual entry point for hosts.
pub fn create_bound_state() -> Result<LuaState, BindError> {
    let state = LuaState::new()?;
    registry::register_all(state.lua())?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exec_returns_chunk_value() {
        let state = LuaState::new().unwrap();
        let value = state.exec("return 1 + 1").unwrap();
        assert_eq!(value.as_i64(), Some(2));
    }

    #[test]
    fn exec_failure_is_an_error_value() {
        let state = LuaState::new().unwrap();
        let err = state.exec("call_to_nowhere()").unwrap_err();
        let text = err.to_string();
        assert!(text.contains("call_to_nowhere") || text.contains("nil"), "{text}");
    }

    #[test]
    fn globals_round_trip() {
        let state = LuaState::new().unwrap();
        state.set("answer", 42).unwrap();
        assert!(state.has("answer"));
        assert!(!state.has("question"));
        assert_eq!(state.get::<i64>("answer").unwrap(), 42);

        state.exec("answer = answer + 1").unwrap();
        assert_eq!(state.get::<i64>("answer").unwrap(), 43);
    }

    #[test]
    fn restricted_facilities_hide_libraries() {
        let state = LuaState::with_facilities(Facilities::BASE | Facilities::MATH).unwrap();
        state.exec("x = math.floor(2.7)").unwrap();
        assert_eq!(state.get::<i64>("x").unwrap(), 2);
        assert!(!state.has("os"));
        assert!(!state.has("io"));
    }

    #[test]
    fn missing_file_reports_read_error() {
        let state = LuaState::new().unwrap();
        let err = state
            .exec_file(Path::new("/no/such/script.lua"))
            .unwrap_err();
        assert!(matches!(err, ScriptError::Read { .. }));
    }
}

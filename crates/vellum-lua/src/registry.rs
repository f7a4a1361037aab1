//! Type registration: the contract binding native types into the Lua
//! namespace.
//!
//! Each bound type provides a [`Binding`]: a name, an optional base type,
//! and an install function that writes its constructors, constants, and
//! enum namespaces into the Lua globals (instance fields and methods live
//! on the userdata wrappers themselves). The [`Registry`] enforces the one
//! structural rule: a base type must be installed before any type that
//! declares it. Violations are startup programming errors, surfaced as
//! fatal [`BindError`]s rather than script-visible failures.

use mlua::Lua;

use crate::bindings;
use crate::error::BindError;

/// One bound native type.
pub trait Binding {
    /// Script-visible type name; also the key for base-ordering checks.
    const NAME: &'static str;

    /// The single base type, if any. Must be installed first.
    const BASE: Option<&'static str> = None;

    /// Write constructors, constants, and enums into the globals.
    fn install(lua: &Lua) -> mlua::Result<()>;
}

/// Tracks installed bindings and enforces base-before-derived ordering.
#[derive(Default)]
pub struct Registry {
    installed: Vec<&'static str>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn installed(&self) -> &[&'static str] {
        &self.installed
    }

    pub fn install<B: Binding>(&mut self, lua: &Lua) -> Result<(), BindError> {
        if self.installed.contains(&B::NAME) {
            return Err(BindError::Duplicate { ty: B::NAME });
        }
        if let Some(base) = B::BASE {
            if !self.installed.contains(&base) {
                return Err(BindError::BaseNotRegistered { ty: B::NAME, base });
            }
        }
        B::install(lua).map_err(|source| BindError::Install { ty: B::NAME, source })?;
        self.installed.push(B::NAME);
        Ok(())
    }
}

/// Install a named-integer enum namespace, e.g. `MouseButton.LEFT`.
pub fn register_enum(lua: &Lua, name: &str, entries: &[(&str, u32)]) -> mlua::Result<()> {
    let table = lua.create_table()?;
    for (key, value) in entries {
        table.set(*key, *value)?;
    }
    lua.globals().set(name, table)
}

/// Install every binding, in dependency order. The list is the single
/// source of registration order: value types first, then core runtime
/// types, the element base, the element kinds, and finally windows.
pub fn register_all(lua: &Lua) -> Result<(), BindError> {
    let mut registry = Registry::new();

    registry.install::<bindings::types::Vec2Binding>(lua)?;
    registry.install::<bindings::types::RectBinding>(lua)?;
    registry.install::<bindings::types::ColorBinding>(lua)?;
    registry.install::<bindings::types::SizeBinding>(lua)?;
    registry.install::<bindings::types::FontBinding>(lua)?;
    registry.install::<bindings::types::InputBinding>(lua)?;
    registry.install::<bindings::types::PaletteBinding>(lua)?;

    registry.install::<bindings::core::TimerBinding>(lua)?;
    registry.install::<bindings::core::OutputBinding>(lua)?;
    registry.install::<bindings::core::IconsBinding>(lua)?;
    registry.install::<bindings::core::BackendBinding>(lua)?;

    registry.install::<bindings::element::ElementBinding>(lua)?;

    registry.install::<bindings::builders::TextBinding>(lua)?;
    registry.install::<bindings::builders::ButtonBinding>(lua)?;
    registry.install::<bindings::builders::TextboxBinding>(lua)?;
    registry.install::<bindings::builders::CheckboxBinding>(lua)?;
    registry.install::<bindings::builders::SliderBinding>(lua)?;
    registry.install::<bindings::builders::ComboboxBinding>(lua)?;
    registry.install::<bindings::builders::SpinboxBinding>(lua)?;
    registry.install::<bindings::builders::RectangleBinding>(lua)?;
    registry.install::<bindings::builders::ColumnLayoutBinding>(lua)?;
    registry.install::<bindings::builders::RowLayoutBinding>(lua)?;
    registry.install::<bindings::builders::ScrollAreaBinding>(lua)?;
    registry.install::<bindings::builders::ImageBinding>(lua)?;
    registry.install::<bindings::builders::NullBinding>(lua)?;
    registry.install::<bindings::builders::LineBinding>(lua)?;

    registry.install::<bindings::window::WindowBinding>(lua)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_before_base_is_a_startup_error() {
        let lua = Lua::new();
        let mut registry = Registry::new();
        let result = registry.install::<bindings::builders::TextBinding>(&lua);
        match result {
            Err(BindError::BaseNotRegistered { ty, base }) => {
                assert_eq!(ty, "Text");
                assert_eq!(base, "Element");
            }
            other => panic!("expected BaseNotRegistered, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let lua = Lua::new();
        let mut registry = Registry::new();
        registry.install::<bindings::types::Vec2Binding>(&lua).unwrap();
        assert!(matches!(
            registry.install::<bindings::types::Vec2Binding>(&lua),
            Err(BindError::Duplicate { ty: "Vec2" })
        ));
    }

    #[test]
    fn full_registration_succeeds() {
        let lua = Lua::new();
        register_all(&lua).unwrap();
        let globals = lua.globals();
        for name in ["Vec2", "Color", "Backend", "Text", "Window", "MouseButton"] {
            assert!(
                globals.contains_key(name).unwrap(),
                "missing global {name}"
            );
        }
    }
}

//! Value types: vectors, rectangles, colors, sizes, fonts, input, palette.

use std::rc::Rc;

use mlua::{
    FromLua, Lua, MetaMethod, UserData, UserDataFields, UserDataMethods, UserDataRef, Value,
};
use vellum::input::{KeyEvent, Modifiers};
use vellum::palette::Palette;
use vellum::types::{FontBase, FontSize, SizeSpec, SizeUnit};
use vellum::{Color, ColorFn, Rect, Vec2};

use crate::expr;
use crate::handle::Handle;
use crate::registry::{Binding, register_enum};

fn bad_unit(value: u8) -> mlua::Error {
    mlua::Error::RuntimeError(format!("invalid SizeUnit value {value}"))
}

// ---------------------------------------------------------------------------
// Vec2

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuaVec2(pub Vec2);

impl FromLua for LuaVec2 {
    fn from_lua(value: Value, _: &Lua) -> mlua::Result<Self> {
        match value {
            Value::UserData(ud) => Ok(*ud.borrow::<LuaVec2>()?),
            other => Err(mlua::Error::RuntimeError(format!(
                "expected Vec2, got {}",
                other.type_name()
            ))),
        }
    }
}

impl UserData for LuaVec2 {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get("x", |_, this| Ok(this.0.x));
        fields.add_field_method_set("x", |_, this, x: f64| {
            this.0.x = x;
            Ok(())
        });
        fields.add_field_method_get("y", |_, this| Ok(this.0.y));
        fields.add_field_method_set("y", |_, this, y: f64| {
            this.0.y = y;
            Ok(())
        });
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("floor", |_, this, ()| Ok(LuaVec2(this.0.floor())));
        methods.add_method("round", |_, this, ()| Ok(LuaVec2(this.0.round())));
        methods.add_method("clamp", |_, this, (min, max): (LuaVec2, LuaVec2)| {
            Ok(LuaVec2(this.0.clamp(min.0, max.0)))
        });
        methods.add_method("distance", |_, this, other: LuaVec2| {
            Ok(this.0.distance(other.0))
        });

        methods.add_meta_method(MetaMethod::Add, |_, this, other: LuaVec2| {
            Ok(LuaVec2(this.0 + other.0))
        });
        methods.add_meta_method(MetaMethod::Sub, |_, this, other: LuaVec2| {
            Ok(LuaVec2(this.0 - other.0))
        });
        methods.add_meta_method(MetaMethod::Mul, |lua, this, rhs: Value| match rhs {
            Value::Integer(n) => Ok(LuaVec2(this.0 * n as f64)),
            Value::Number(n) => Ok(LuaVec2(this.0 * n)),
            other => {
                let v = LuaVec2::from_lua(other, lua)?;
                Ok(LuaVec2(this.0 * v.0))
            }
        });
        methods.add_meta_method(MetaMethod::Div, |_, this, divisor: f64| {
            Ok(LuaVec2(this.0 / divisor))
        });
        methods.add_meta_method(MetaMethod::Eq, |_, this, other: LuaVec2| {
            Ok(this.0 == other.0)
        });
        methods.add_meta_method(MetaMethod::ToString, |_, this, ()| Ok(this.0.to_string()));
    }
}

pub struct Vec2Binding;

impl Binding for Vec2Binding {
    const NAME: &'static str = "Vec2";

    fn install(lua: &Lua) -> mlua::Result<()> {
        let table = lua.create_table()?;
        table.set(
            "new",
            lua.create_function(|_, (x, y): (f64, f64)| Ok(LuaVec2(Vec2::new(x, y))))?,
        )?;
        lua.globals().set("Vec2", table)
    }
}

// ---------------------------------------------------------------------------
// Rect

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuaRect(pub Rect);

impl FromLua for LuaRect {
    fn from_lua(value: Value, _: &Lua) -> mlua::Result<Self> {
        match value {
            Value::UserData(ud) => Ok(*ud.borrow::<LuaRect>()?),
            other => Err(mlua::Error::RuntimeError(format!(
                "expected Rect, got {}",
                other.type_name()
            ))),
        }
    }
}

impl UserData for LuaRect {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get("x", |_, this| Ok(this.0.x));
        fields.add_field_method_set("x", |_, this, v: f64| {
            this.0.x = v;
            Ok(())
        });
        fields.add_field_method_get("y", |_, this| Ok(this.0.y));
        fields.add_field_method_set("y", |_, this, v: f64| {
            this.0.y = v;
            Ok(())
        });
        fields.add_field_method_get("w", |_, this| Ok(this.0.w));
        fields.add_field_method_set("w", |_, this, v: f64| {
            this.0.w = v;
            Ok(())
        });
        fields.add_field_method_get("h", |_, this| Ok(this.0.h));
        fields.add_field_method_set("h", |_, this, v: f64| {
            this.0.h = v;
            Ok(())
        });
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("pos", |_, this, ()| Ok(LuaVec2(this.0.pos())));
        methods.add_method("size", |_, this, ()| Ok(LuaVec2(this.0.size())));
        methods.add_method("middle", |_, this, ()| Ok(LuaVec2(this.0.middle())));
        methods.add_method("containsPoint", |_, this, p: LuaVec2| {
            Ok(this.0.contains_point(p.0))
        });
        methods.add_method("empty", |_, this, ()| Ok(this.0.is_empty()));
        methods.add_method("intersection", |_, this, other: LuaRect| {
            Ok(LuaRect(this.0.intersection(other.0)))
        });
        methods.add_method("expand", |_, this, d: f64| Ok(LuaRect(this.0.expand(d))));
        methods.add_method("round", |_, this, ()| Ok(LuaRect(this.0.round())));
        methods.add_method("translate", |_, this, by: LuaVec2| {
            Ok(LuaRect(this.0.translate(by.0)))
        });
        methods.add_method("scale", |lua, this, factor: Value| match factor {
            Value::Integer(n) => Ok(LuaRect(this.0.scale(n as f64))),
            Value::Number(n) => Ok(LuaRect(this.0.scale(n))),
            other => {
                let v = LuaVec2::from_lua(other, lua)?;
                Ok(LuaRect(this.0.scale_vec(v.0)))
            }
        });
        methods.add_meta_method(MetaMethod::ToString, |_, this, ()| Ok(this.0.to_string()));
    }
}

pub struct RectBinding;

impl Binding for RectBinding {
    const NAME: &'static str = "Rect";

    fn install(lua: &Lua) -> mlua::Result<()> {
        let table = lua.create_table()?;
        table.set(
            "new",
            lua.create_function(|_, (x, y, w, h): (f64, f64, f64, f64)| {
                Ok(LuaRect(Rect::new(x, y, w, h)))
            })?,
        )?;
        table.set(
            "fromPoints",
            lua.create_function(|_, (pos, size): (LuaVec2, LuaVec2)| {
                Ok(LuaRect(Rect::from_points(pos.0, size.0)))
            })?,
        )?;
        lua.globals().set("Rect", table)
    }
}

// ---------------------------------------------------------------------------
// Color

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuaColor(pub Color);

impl FromLua for LuaColor {
    fn from_lua(value: Value, _: &Lua) -> mlua::Result<Self> {
        match value {
            Value::UserData(ud) => Ok(*ud.borrow::<LuaColor>()?),
            other => Err(mlua::Error::RuntimeError(format!(
                "expected Color, got {}",
                other.type_name()
            ))),
        }
    }
}

impl UserData for LuaColor {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get("r", |_, this| Ok(this.0.r));
        fields.add_field_method_set("r", |_, this, v: f32| {
            this.0.r = v;
            Ok(())
        });
        fields.add_field_method_get("g", |_, this| Ok(this.0.g));
        fields.add_field_method_set("g", |_, this, v: f32| {
            this.0.g = v;
            Ok(())
        });
        fields.add_field_method_get("b", |_, this| Ok(this.0.b));
        fields.add_field_method_set("b", |_, this, v: f32| {
            this.0.b = v;
            Ok(())
        });
        fields.add_field_method_get("a", |_, this| Ok(this.0.a));
        fields.add_field_method_set("a", |_, this, v: f32| {
            this.0.a = v;
            Ok(())
        });
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("asHex", |_, this, ()| Ok(this.0.as_hex()));
        methods.add_method("brighten", |_, this, amount: f32| {
            Ok(LuaColor(this.0.brighten(amount)))
        });
        methods.add_method("darken", |_, this, amount: f32| {
            Ok(LuaColor(this.0.darken(amount)))
        });
        methods.add_method("mix", |_, this, (other, t): (LuaColor, f32)| {
            Ok(LuaColor(this.0.mix(other.0, t)))
        });
        methods.add_method("stripAlpha", |_, this, ()| Ok(LuaColor(this.0.strip_alpha())));
        methods.add_meta_method(MetaMethod::Eq, |_, this, other: LuaColor| {
            Ok(this.0 == other.0)
        });
        methods.add_meta_method(MetaMethod::ToString, |_, this, ()| Ok(this.0.to_string()));
    }
}

pub struct ColorBinding;

impl Binding for ColorBinding {
    const NAME: &'static str = "Color";

    fn install(lua: &Lua) -> mlua::Result<()> {
        let table = lua.create_table()?;
        table.set(
            "new",
            lua.create_function(|_, (r, g, b, a): (f32, f32, f32, Option<f32>)| {
                Ok(LuaColor(Color::new(r, g, b, a.unwrap_or(1.0))))
            })?,
        )?;
        table.set(
            "fromHex",
            lua.create_function(|_, hex: u32| Ok(LuaColor(Color::from_hex(hex))))?,
        )?;
        lua.globals().set("Color", table)
    }
}

/// A color attribute: constant color, Lua function, or unset. Falls back
/// to opaque black.
pub fn color_fn(subsystem: &'static str, lua: &Lua, value: Value) -> ColorFn {
    let expression = expr::expression::<LuaColor>(subsystem, lua, value, LuaColor(Color::BLACK));
    Rc::new(move || expression().0)
}

/// Optional variant: nil means "no override" rather than black.
pub fn color_fn_opt(subsystem: &'static str, lua: &Lua, value: Value) -> Option<ColorFn> {
    if value.is_nil() {
        None
    } else {
        Some(color_fn(subsystem, lua, value))
    }
}

// ---------------------------------------------------------------------------
// Size

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuaSize(pub SizeSpec);

impl FromLua for LuaSize {
    fn from_lua(value: Value, _: &Lua) -> mlua::Result<Self> {
        match value {
            Value::UserData(ud) => Ok(*ud.borrow::<LuaSize>()?),
            other => Err(mlua::Error::RuntimeError(format!(
                "expected Size, got {}",
                other.type_name()
            ))),
        }
    }
}

impl UserData for LuaSize {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("calculate", |_, this, parent: LuaVec2| {
            Ok(LuaVec2(this.0.calculate(parent.0)))
        });
    }
}

pub struct SizeBinding;

impl Binding for SizeBinding {
    const NAME: &'static str = "Size";

    fn install(lua: &Lua) -> mlua::Result<()> {
        register_enum(
            lua,
            "SizeUnit",
            &[
                ("ABSOLUTE", SizeUnit::Absolute as u32),
                ("PERCENT", SizeUnit::Percent as u32),
                ("AUTO", SizeUnit::Auto as u32),
            ],
        )?;

        let table = lua.create_table()?;
        table.set(
            "absolute",
            lua.create_function(|_, (w, h): (f64, f64)| Ok(LuaSize(SizeSpec::absolute(w, h))))?,
        )?;
        table.set(
            "percent",
            lua.create_function(|_, (w, h): (f64, f64)| Ok(LuaSize(SizeSpec::percent(w, h))))?,
        )?;
        table.set("auto", lua.create_function(|_, ()| Ok(LuaSize(SizeSpec::auto())))?)?;
        table.set(
            "mixed",
            lua.create_function(|_, (ux, uy, w, h): (u8, u8, f64, f64)| {
                let unit_x = SizeUnit::try_from(ux).map_err(|_| bad_unit(ux))?;
                let unit_y = SizeUnit::try_from(uy).map_err(|_| bad_unit(uy))?;
                Ok(LuaSize(SizeSpec::new(unit_x, unit_y, Vec2::new(w, h))))
            })?,
        )?;
        lua.globals().set("Size", table)
    }
}

// ---------------------------------------------------------------------------
// Fonts

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuaFontSize(pub FontSize);

impl FromLua for LuaFontSize {
    fn from_lua(value: Value, _: &Lua) -> mlua::Result<Self> {
        match value {
            Value::UserData(ud) => Ok(*ud.borrow::<LuaFontSize>()?),
            other => Err(mlua::Error::RuntimeError(format!(
                "expected FontSize, got {}",
                other.type_name()
            ))),
        }
    }
}

impl UserData for LuaFontSize {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("ptSize", |_, this, palette: Option<UserDataRef<LuaPalette>>| {
            let pt = match palette.and_then(|p| p.0.resolve_local()) {
                Some(palette) => this.0.pt_size(&palette),
                None => this.0.pt_size(&Palette::current()),
            };
            Ok(pt)
        });
    }
}

pub struct FontBinding;

impl Binding for FontBinding {
    const NAME: &'static str = "FontSize";

    fn install(lua: &Lua) -> mlua::Result<()> {
        register_enum(
            lua,
            "FontBase",
            &[
                ("H1", FontBase::H1 as u32),
                ("H2", FontBase::H2 as u32),
                ("H3", FontBase::H3 as u32),
                ("TEXT", FontBase::Text as u32),
                ("SMALL", FontBase::Small as u32),
                ("ABSOLUTE", FontBase::Absolute as u32),
            ],
        )?;
        register_enum(
            lua,
            "FontAlign",
            &[("LEFT", 0), ("CENTER", 1), ("RIGHT", 2)],
        )?;

        let table = lua.create_table()?;
        let scaled = |base: FontBase| {
            move |_: &Lua, scale: f32| Ok(LuaFontSize(FontSize::new(base, scale)))
        };
        table.set("h1", lua.create_function(scaled(FontBase::H1))?)?;
        table.set("h2", lua.create_function(scaled(FontBase::H2))?)?;
        table.set("h3", lua.create_function(scaled(FontBase::H3))?)?;
        table.set("text", lua.create_function(scaled(FontBase::Text))?)?;
        table.set("small", lua.create_function(scaled(FontBase::Small))?)?;
        table.set("absolute", lua.create_function(scaled(FontBase::Absolute))?)?;

        // unscaled defaults
        table.set("H1", LuaFontSize(FontSize::new(FontBase::H1, 1.0)))?;
        table.set("H2", LuaFontSize(FontSize::new(FontBase::H2, 1.0)))?;
        table.set("H3", LuaFontSize(FontSize::new(FontBase::H3, 1.0)))?;
        table.set("TEXT", LuaFontSize(FontSize::new(FontBase::Text, 1.0)))?;
        table.set("SMALL", LuaFontSize(FontSize::new(FontBase::Small, 1.0)))?;

        lua.globals().set("FontSize", table)
    }
}

// ---------------------------------------------------------------------------
// Input

#[derive(Debug, Clone)]
pub struct LuaKeyEvent(pub KeyEvent);

impl UserData for LuaKeyEvent {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get("keysym", |_, this| Ok(this.0.keysym));
        fields.add_field_method_get("down", |_, this| Ok(this.0.down));
        fields.add_field_method_get("repeated", |_, this| Ok(this.0.repeated));
        fields.add_field_method_get("utf8", |_, this| Ok(this.0.utf8.clone()));
        fields.add_field_method_get("mods", |_, this| Ok(this.0.mods.bits()));
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("hasModifier", |_, this, mask: u32| {
            Ok(this.0.has_modifier(Modifiers::from_bits_truncate(mask)))
        });
    }
}

pub struct InputBinding;

impl Binding for InputBinding {
    const NAME: &'static str = "Input";

    fn install(lua: &Lua) -> mlua::Result<()> {
        register_enum(
            lua,
            "MouseButton",
            &[("UNKNOWN", 0), ("LEFT", 1), ("RIGHT", 2), ("MIDDLE", 3)],
        )?;
        register_enum(lua, "ScrollAxis", &[("HORIZONTAL", 0), ("VERTICAL", 1)])?;
        register_enum(
            lua,
            "KeyboardModifier",
            &[
                ("SHIFT", Modifiers::SHIFT.bits()),
                ("CAPS", Modifiers::CAPS.bits()),
                ("CTRL", Modifiers::CTRL.bits()),
                ("ALT", Modifiers::ALT.bits()),
                ("MOD2", Modifiers::MOD2.bits()),
                ("MOD3", Modifiers::MOD3.bits()),
                ("META", Modifiers::META.bits()),
                ("MOD5", Modifiers::MOD5.bits()),
            ],
        )
    }
}

// ---------------------------------------------------------------------------
// Palette

#[derive(Clone)]
pub struct LuaPalette(pub Handle<Palette>);

impl UserData for LuaPalette {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        macro_rules! color_field {
            ($name:literal, $field:ident) => {
                fields.add_field_method_get($name, |_, this| {
                    Ok(this.0.resolve().map(|p| LuaColor(p.colors.$field)))
                });
            };
        }
        color_field!("background", background);
        color_field!("text", text);
        color_field!("base", base);
        color_field!("alternateBase", alternate_base);
        color_field!("brightText", bright_text);
        color_field!("accent", accent);
        color_field!("accentSecondary", accent_secondary);

        macro_rules! var_field {
            ($name:literal, $field:ident) => {
                fields.add_field_method_get($name, |_, this| {
                    Ok(this.0.resolve().map(|p| p.vars.$field.clone()))
                });
            };
        }
        var_field!("h1Size", h1_size);
        var_field!("h2Size", h2_size);
        var_field!("h3Size", h3_size);
        var_field!("fontSize", font_size);
        var_field!("smallFontSize", small_font_size);
        var_field!("iconTheme", icon_theme);
        var_field!("bigRounding", big_rounding);
        var_field!("smallRounding", small_rounding);
        var_field!("fontFamily", font_family);
        var_field!("fontFamilyMonospace", font_family_monospace);
    }
}

pub struct PaletteBinding;

impl Binding for PaletteBinding {
    const NAME: &'static str = "Palette";

    fn install(lua: &Lua) -> mlua::Result<()> {
        let table = lua.create_table()?;
        table.set(
            "current",
            lua.create_function(|_, ()| Ok(LuaPalette(Handle::shared(Palette::current()))))?,
        )?;
        lua.globals().set("Palette", table)
    }
}

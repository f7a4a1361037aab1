//! The element base surface: shared methods mixed into every concrete
//! element wrapper, plus the generic base-typed handle.

use std::rc::Rc;

use mlua::{Function, Lua, UserData, UserDataMethods, Value};
use vellum::element::{self, PositionFlags, PositionMode};
use vellum::{DynElement, Element};

use crate::bindings::types::LuaVec2;
use crate::callback;
use crate::handle::Handle;
use crate::registry::{Binding, register_enum};
use crate::resolve::{AsElement, resolve_element};

/// A base-typed element handle, e.g. a window's root element. Accepts the
/// shared element surface and nothing else.
#[derive(Clone)]
pub struct LuaElement(pub Handle<dyn Element>);

impl LuaElement {
    pub fn new(element: DynElement) -> Self {
        Self(Handle::shared(element))
    }
}

impl AsElement for LuaElement {
    fn as_element(&self) -> Option<DynElement> {
        self.0.resolve_local()
    }
}

impl UserData for LuaElement {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        add_base_methods(methods);
    }
}

/// Install the shared element methods onto a wrapper's method table.
///
/// Every method resolves the handle per access: a dead handle makes
/// getters return nil and actions no-ops, never an error. Argument
/// conversion failures (a non-element child, an unknown enum value) are
/// script-visible errors and happen before any mutation.
pub(crate) fn add_base_methods<W, M>(methods: &mut M)
where
    W: AsElement + UserData + 'static,
    M: UserDataMethods<W>,
{
    methods.add_method("type", |_, this, ()| {
        Ok(this.as_element().map(|el| el.type_name()))
    });

    methods.add_method("size", |_, this, ()| {
        Ok(this.as_element().map(|el| LuaVec2(el.base().size())))
    });

    methods.add_method("posFromParent", |_, this, ()| {
        Ok(this.as_element().map(|el| LuaVec2(el.base().pos_from_parent())))
    });

    methods.add_method("reposition", |_, this, ()| {
        if let Some(el) = this.as_element() {
            el.base().reposition();
        }
        Ok(())
    });

    methods.add_method("setPositionMode", |_, this, mode: u8| {
        let mode = PositionMode::try_from(mode).map_err(|_| {
            mlua::Error::RuntimeError(format!("invalid PositionMode value {mode}"))
        })?;
        if let Some(el) = this.as_element() {
            el.base().set_position_mode(mode);
        }
        Ok(())
    });

    methods.add_method("setPositionFlag", |_, this, (flag, enabled): (u32, bool)| {
        if let Some(el) = this.as_element() {
            let flag = PositionFlags::from_bits_truncate(flag);
            let mut flags = el.base().position_flags();
            flags.set(flag, enabled);
            el.base().set_position_flags(flags);
        }
        Ok(())
    });

    methods.add_method("setAbsolutePosition", |_, this, pos: LuaVec2| {
        if let Some(el) = this.as_element() {
            el.base().set_absolute_position(pos.0);
        }
        Ok(())
    });

    methods.add_method("addChild", |_, this, child: Value| {
        let child = resolve_element("addChild", &child)?;
        if let Some(parent) = this.as_element() {
            element::add_child(&parent, child);
        }
        Ok(())
    });

    methods.add_method("removeChild", |_, this, child: Value| {
        let child = resolve_element("removeChild", &child)?;
        if let Some(parent) = this.as_element() {
            element::remove_child(&parent, &child);
        }
        Ok(())
    });

    methods.add_method("clearChildren", |_, this, ()| {
        if let Some(el) = this.as_element() {
            el.base().clear_children();
        }
        Ok(())
    });

    methods.add_method("childCount", |_, this, ()| {
        Ok(this.as_element().map(|el| el.base().child_count()))
    });

    methods.add_method("setMargin", |_, this, margin: f64| {
        if let Some(el) = this.as_element() {
            el.base().set_margin(margin);
        }
        Ok(())
    });

    methods.add_method("setGrouped", |_, this, grouped: bool| {
        if let Some(el) = this.as_element() {
            el.base().set_grouped(grouped);
        }
        Ok(())
    });

    methods.add_method("setTooltip", |_, this, tooltip: String| {
        if let Some(el) = this.as_element() {
            el.base().set_tooltip(tooltip);
        }
        Ok(())
    });

    methods.add_method("setGrow", |_, this, (horizontal, vertical): (bool, Option<bool>)| {
        if let Some(el) = this.as_element() {
            el.base().set_grow(horizontal, vertical.unwrap_or(horizontal));
        }
        Ok(())
    });

    methods.add_method("setReceivesMouse", |_, this, receives: bool| {
        if let Some(el) = this.as_element() {
            el.base().set_receives_mouse(receives);
        }
        Ok(())
    });

    methods.add_method("setMouseEnter", |_, this, func: Function| {
        if let Some(el) = this.as_element() {
            let cb = callback::unary::<LuaVec2>("Element mouseEnter", func);
            el.base().set_on_mouse_enter(Some(Rc::new(move |pos| cb(LuaVec2(pos)))));
        }
        Ok(())
    });

    methods.add_method("setMouseLeave", |_, this, func: Function| {
        if let Some(el) = this.as_element() {
            let cb = callback::nullary("Element mouseLeave", func);
            el.base().set_on_mouse_leave(Some(Rc::new(cb)));
        }
        Ok(())
    });

    methods.add_method("setMouseMove", |_, this, func: Function| {
        if let Some(el) = this.as_element() {
            let cb = callback::unary::<LuaVec2>("Element mouseMove", func);
            el.base().set_on_mouse_move(Some(Rc::new(move |pos| cb(LuaVec2(pos)))));
        }
        Ok(())
    });

    methods.add_method("setMouseButton", |_, this, func: Function| {
        if let Some(el) = this.as_element() {
            let cb = callback::binary::<u32, bool>("Element mouseButton", func);
            el.base().set_on_mouse_button(Some(Rc::new(move |button, pressed| {
                cb(u32::from(button), pressed)
            })));
        }
        Ok(())
    });

    methods.add_method("setMouseAxis", |_, this, func: Function| {
        if let Some(el) = this.as_element() {
            let cb = callback::binary::<u32, f64>("Element mouseAxis", func);
            el.base().set_on_mouse_axis(Some(Rc::new(move |axis, delta| {
                cb(u32::from(axis), delta)
            })));
        }
        Ok(())
    });

    methods.add_method("setRepositioned", |_, this, func: Function| {
        if let Some(el) = this.as_element() {
            let cb = callback::nullary("Element repositioned", func);
            el.base().set_on_repositioned(Some(Rc::new(cb)));
        }
        Ok(())
    });
}

pub struct ElementBinding;

impl Binding for ElementBinding {
    const NAME: &'static str = "Element";

    fn install(lua: &Lua) -> mlua::Result<()> {
        register_enum(
            lua,
            "PositionMode",
            &[
                ("AUTO", PositionMode::Auto as u32),
                ("ABSOLUTE", PositionMode::Absolute as u32),
            ],
        )?;
        register_enum(
            lua,
            "PositionFlag",
            &[
                ("HCENTER", PositionFlags::HCENTER.bits()),
                ("VCENTER", PositionFlags::VCENTER.bits()),
                ("CENTER", PositionFlags::CENTER.bits()),
                ("LEFT", PositionFlags::LEFT.bits()),
                ("RIGHT", PositionFlags::RIGHT.bits()),
                ("TOP", PositionFlags::TOP.bits()),
                ("BOTTOM", PositionFlags::BOTTOM.bits()),
                ("ALL", PositionFlags::ALL.bits()),
            ],
        )
    }
}

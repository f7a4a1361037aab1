//! Window builder, window instances, and their lifecycle events.

use std::cell::RefCell;
use std::rc::Rc;

use mlua::{AnyUserData, Function, Lua, UserData, UserDataMethods, UserDataRef};
use vellum::window::{Edges, Window, WindowBuilder, WindowKind};

use crate::bindings::core::LuaBackend;
use crate::bindings::element::LuaElement;
use crate::bindings::types::{LuaKeyEvent, LuaVec2};
use crate::callback;
use crate::handle::Handle;
use crate::registry::{Binding, register_enum};

fn consumed() -> mlua::Error {
    mlua::Error::RuntimeError("window builder already commenced".into())
}

pub struct LuaWindowBuilder(RefCell<Option<WindowBuilder>>);

impl LuaWindowBuilder {
    fn apply(
        ud: &AnyUserData,
        f: impl FnOnce(WindowBuilder) -> WindowBuilder,
    ) -> mlua::Result<()> {
        let wrapper = ud.borrow::<LuaWindowBuilder>()?;
        let builder = wrapper.0.borrow_mut().take().ok_or_else(consumed)?;
        *wrapper.0.borrow_mut() = Some(f(builder));
        Ok(())
    }
}

macro_rules! window_chain {
    ($methods:expr, $name:literal, $ty:ty, |$b:ident, $v:ident| $body:expr) => {
        $methods.add_function($name, |_, (ud, $v): (AnyUserData, $ty)| {
            LuaWindowBuilder::apply(&ud, |$b| $body)?;
            Ok(ud)
        });
    };
}

impl UserData for LuaWindowBuilder {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_function("type", |_, (ud, kind): (AnyUserData, u8)| {
            let kind = WindowKind::try_from(kind).map_err(|_| {
                mlua::Error::RuntimeError(format!("invalid WindowType value {kind}"))
            })?;
            LuaWindowBuilder::apply(&ud, |b| b.kind(kind))?;
            Ok(ud)
        });
        window_chain!(methods, "appTitle", String, |b, v| b.app_title(v));
        window_chain!(methods, "appClass", String, |b, v| b.app_class(v));
        window_chain!(methods, "preferredSize", LuaVec2, |b, v| b.preferred_size(v.0));
        window_chain!(methods, "minSize", LuaVec2, |b, v| b.min_size(v.0));
        window_chain!(methods, "maxSize", LuaVec2, |b, v| b.max_size(v.0));
        window_chain!(methods, "preferredOutput", String, |b, v| b.preferred_output(v));
        window_chain!(methods, "marginTopLeft", LuaVec2, |b, v| b.margin_top_left(v.0));
        window_chain!(methods, "marginBottomRight", LuaVec2, |b, v| {
            b.margin_bottom_right(v.0)
        });
        window_chain!(methods, "layer", i32, |b, v| b.layer(v));
        window_chain!(methods, "anchor", u32, |b, v| {
            b.anchor(Edges::from_bits_truncate(v))
        });
        window_chain!(methods, "exclusiveEdge", u32, |b, v| {
            b.exclusive_edge(Edges::from_bits_truncate(v))
        });
        window_chain!(methods, "exclusiveZone", i32, |b, v| b.exclusive_zone(v));
        window_chain!(methods, "kbInteractive", bool, |b, v| b.kb_interactive(v));
        methods.add_function(
            "parent",
            |_, (ud, parent): (AnyUserData, UserDataRef<LuaWindow>)| {
                let Some(window) = parent.0.resolve_local() else {
                    return Err(mlua::Error::RuntimeError(
                        "parent: window is no longer alive".into(),
                    ));
                };
                LuaWindowBuilder::apply(&ud, |b| b.parent(window))?;
                Ok(ud)
            },
        );
        window_chain!(methods, "pos", LuaVec2, |b, v| b.pos(v.0));

        methods.add_function("commence", |_, ud: AnyUserData| {
            let wrapper = ud.borrow::<LuaWindowBuilder>()?;
            let builder = wrapper.0.borrow_mut().take().ok_or_else(consumed)?;
            Ok(LuaWindow(Handle::shared(builder.commence())))
        });
    }
}

#[derive(Clone)]
pub struct LuaWindow(pub Handle<Window>);

impl UserData for LuaWindow {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("open", |_, this, ()| {
            if let Some(window) = this.0.resolve() {
                window.open();
            }
            Ok(())
        });
        methods.add_method("close", |_, this, ()| {
            if let Some(window) = this.0.resolve() {
                window.close();
            }
            Ok(())
        });
        methods.add_method("isOpen", |_, this, ()| {
            Ok(this.0.resolve().map(|w| w.is_open()))
        });
        methods.add_method("pixelSize", |_, this, ()| {
            Ok(this.0.resolve().map(|w| LuaVec2(w.pixel_size())))
        });
        methods.add_method("scale", |_, this, ()| Ok(this.0.resolve().map(|w| w.scale())));
        methods.add_method("cursorPos", |_, this, ()| {
            Ok(this.0.resolve().map(|w| LuaVec2(w.cursor_pos())))
        });
        methods.add_method("rootElement", |_, this, ()| {
            Ok(this.0.resolve().map(|w| LuaElement::new(w.root_element())))
        });

        methods.add_method("onResized", |_, this, func: Function| {
            if let Some(window) = this.0.resolve() {
                let cb = callback::unary::<LuaVec2>("Window resized", func);
                window.on_resized(Rc::new(move |size| cb(LuaVec2(size))));
            }
            Ok(())
        });
        methods.add_method("onCloseRequest", |_, this, func: Function| {
            if let Some(window) = this.0.resolve() {
                window.on_close_request(Rc::new(callback::nullary("Window closeRequest", func)));
            }
            Ok(())
        });
        methods.add_method("onPopupClosed", |_, this, func: Function| {
            if let Some(window) = this.0.resolve() {
                window.on_popup_closed(Rc::new(callback::nullary("Window popupClosed", func)));
            }
            Ok(())
        });
        methods.add_method("onLayerClosed", |_, this, func: Function| {
            if let Some(window) = this.0.resolve() {
                window.on_layer_closed(Rc::new(callback::nullary("Window layerClosed", func)));
            }
            Ok(())
        });
        methods.add_method("onKeyboardKey", |_, this, func: Function| {
            if let Some(window) = this.0.resolve() {
                let cb = callback::unary::<LuaKeyEvent>("Window keyboardKey", func);
                window.on_keyboard_key(Rc::new(move |event| cb(LuaKeyEvent(event))));
            }
            Ok(())
        });
    }
}

pub struct WindowBinding;

impl Binding for WindowBinding {
    const NAME: &'static str = "Window";

    fn install(lua: &Lua) -> mlua::Result<()> {
        register_enum(
            lua,
            "WindowType",
            &[
                ("TOPLEVEL", WindowKind::Toplevel as u32),
                ("POPUP", WindowKind::Popup as u32),
                ("LAYER", WindowKind::Layer as u32),
                ("LOCK_SURFACE", WindowKind::LockSurface as u32),
            ],
        )?;
        register_enum(
            lua,
            "Edge",
            &[
                ("TOP", Edges::TOP.bits()),
                ("BOTTOM", Edges::BOTTOM.bits()),
                ("LEFT", Edges::LEFT.bits()),
                ("RIGHT", Edges::RIGHT.bits()),
            ],
        )?;

        let table = lua.create_table()?;
        table.set(
            "begin",
            lua.create_function(|_, backend: UserDataRef<LuaBackend>| {
                let Some(backend) = backend.0.resolve_local() else {
                    return Err(mlua::Error::RuntimeError(
                        "begin: backend is no longer alive".into(),
                    ));
                };
                Ok(LuaWindowBuilder(RefCell::new(Some(WindowBuilder::new(backend)))))
            })?,
        )?;
        lua.globals().set("Window", table)
    }
}

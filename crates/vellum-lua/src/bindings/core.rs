//! Core runtime types: backend, timers, outputs, system icons.

use std::rc::Rc;
use std::time::Duration;

use mlua::{Function, Lua, UserData, UserDataFields, UserDataMethods};
use vellum::output::{IconDescription, Output, SystemIcons};
use vellum::timer::Timer;
use vellum::Backend;

use crate::bindings::types::LuaPalette;
use crate::callback;
use crate::handle::Handle;
use crate::registry::Binding;

// ---------------------------------------------------------------------------
// Timer

/// Timers cross threads at the refcount level, so their handles are
/// atomic-shared rather than shared.
#[derive(Clone)]
pub struct LuaTimer(pub Handle<Timer>);

impl UserData for LuaTimer {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("cancel", |_, this, ()| {
            if let Some(timer) = this.0.resolve() {
                timer.cancel();
            }
            Ok(())
        });
        methods.add_method("cancelled", |_, this, ()| {
            Ok(this.0.resolve().map(|t| t.cancelled()))
        });
        methods.add_method("passed", |_, this, ()| {
            Ok(this.0.resolve().map(|t| t.passed()))
        });
        methods.add_method("leftMs", |_, this, ()| {
            Ok(this.0.resolve().map(|t| t.left_ms()))
        });
        methods.add_method("updateTimeout", |_, this, timeout_ms: f64| {
            if let Some(timer) = this.0.resolve() {
                timer.update_timeout(Duration::from_secs_f64(timeout_ms.max(0.0) / 1000.0));
            }
            Ok(())
        });
    }
}

/// Instance-only type: the metatable attaches on first wrap, there is
/// nothing global to install.
pub struct TimerBinding;

impl Binding for TimerBinding {
    const NAME: &'static str = "Timer";

    fn install(_lua: &Lua) -> mlua::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Output

#[derive(Clone)]
pub struct LuaOutput(pub Handle<Output>);

impl UserData for LuaOutput {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get("name", |_, this| {
            Ok(this.0.resolve().map(|o| o.name.clone()))
        });
        fields.add_field_method_get("port", |_, this| {
            Ok(this.0.resolve().map(|o| o.port.clone()))
        });
        fields.add_field_method_get("description", |_, this| {
            Ok(this.0.resolve().map(|o| o.description.clone()))
        });
        fields.add_field_method_get("fps", |_, this| Ok(this.0.resolve().map(|o| o.fps)));
    }
}

pub struct OutputBinding;

impl Binding for OutputBinding {
    const NAME: &'static str = "Output";

    fn install(_lua: &Lua) -> mlua::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// System icons

pub struct LuaIconDescription(pub IconDescription);

impl UserData for LuaIconDescription {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get("name", |_, this| Ok(this.0.name.clone()));
        fields.add_field_method_get("exists", |_, this| Ok(this.0.exists));
        fields.add_field_method_get("scalable", |_, this| Ok(this.0.scalable));
    }
}

#[derive(Clone)]
pub struct LuaSystemIcons(pub Handle<SystemIcons>);

impl UserData for LuaSystemIcons {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("lookupIcon", |_, this, name: String| {
            Ok(this.0.resolve().map(|icons| LuaIconDescription(icons.lookup(&name))))
        });
    }
}

pub struct IconsBinding;

impl Binding for IconsBinding {
    const NAME: &'static str = "SystemIcons";

    fn install(_lua: &Lua) -> mlua::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Backend

#[derive(Clone)]
pub struct LuaBackend(pub Handle<Backend>);

impl UserData for LuaBackend {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("addTimer", |_, this, (timeout_ms, func): (f64, Function)| {
            let Some(backend) = this.0.resolve_local() else {
                return Ok(None);
            };
            let cb = callback::unary::<LuaTimer>("Timer callback", func);
            let timer = backend.add_timer(
                Duration::from_secs_f64(timeout_ms.max(0.0) / 1000.0),
                move |timer| cb(LuaTimer(Handle::atomic(timer))),
            );
            Ok(Some(LuaTimer(Handle::atomic(timer))))
        });

        methods.add_method("addIdle", |_, this, func: Function| {
            if let Some(backend) = this.0.resolve_local() {
                let cb = callback::nullary("Idle callback", func);
                backend.add_idle(cb);
            }
            Ok(())
        });

        methods.add_method("addFd", |_, this, (fd, func): (i32, Function)| {
            if let Some(backend) = this.0.resolve_local() {
                let cb = callback::nullary("Fd callback", func);
                backend.add_fd(fd, cb);
            }
            Ok(())
        });

        methods.add_method("removeFd", |_, this, fd: i32| {
            if let Some(backend) = this.0.resolve_local() {
                backend.remove_fd(fd);
            }
            Ok(())
        });

        methods.add_method("enterLoop", |_, this, ()| {
            if let Some(backend) = this.0.resolve_local() {
                backend.enter_loop();
            }
            Ok(())
        });

        methods.add_method("destroy", |_, this, ()| {
            if let Some(backend) = this.0.resolve_local() {
                backend.destroy();
            }
            Ok(())
        });

        methods.add_method("getPalette", |_, this, ()| {
            Ok(this
                .0
                .resolve_local()
                .map(|backend| LuaPalette(Handle::shared(backend.palette()))))
        });

        methods.add_method("systemIcons", |_, this, ()| {
            Ok(this.0.resolve_local().map(|backend| {
                LuaSystemIcons(Handle::shared(Rc::new(backend.system_icons().clone())))
            }))
        });

        methods.add_method("getOutputs", |_, this, ()| {
            Ok(this.0.resolve_local().map(|backend| {
                backend
                    .outputs()
                    .into_iter()
                    .map(|output| LuaOutput(Handle::shared(output)))
                    .collect::<Vec<_>>()
            }))
        });
    }
}

pub struct BackendBinding;

impl Binding for BackendBinding {
    const NAME: &'static str = "Backend";

    fn install(lua: &Lua) -> mlua::Result<()> {
        let table = lua.create_table()?;
        table.set(
            "create",
            lua.create_function(|_, ()| Ok(LuaBackend(Handle::shared(Backend::create()))))?,
        )?;
        lua.globals().set("Backend", table)
    }
}

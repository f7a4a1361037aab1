//! Windows and the window builder.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::backend::Backend;
use crate::element::{DynElement, NullBuilder};
use crate::input::KeyEvent;
use crate::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum WindowKind {
    #[default]
    Toplevel = 0,
    Popup = 1,
    Layer = 2,
    LockSurface = 3,
}

bitflags! {
    /// Screen edges, used for layer-surface anchoring.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Edges: u32 {
        const TOP    = 1 << 0;
        const BOTTOM = 1 << 1;
        const LEFT   = 1 << 2;
        const RIGHT  = 1 << 3;
    }
}

#[derive(Clone, Default)]
pub struct WindowParams {
    pub kind: WindowKind,
    pub app_title: String,
    pub app_class: String,
    pub preferred_size: Option<Vec2>,
    pub min_size: Option<Vec2>,
    pub max_size: Option<Vec2>,
    pub preferred_output: Option<String>,
    pub margin_top_left: Vec2,
    pub margin_bottom_right: Vec2,
    pub layer: i32,
    pub anchor: Edges,
    pub exclusive_edge: Edges,
    pub exclusive_zone: i32,
    pub kb_interactive: bool,
    pub parent: Option<Rc<Window>>,
    pub pos: Vec2,
}

/// Accumulates window parameters; `commence` registers the window with the
/// backend it was started from.
pub struct WindowBuilder {
    backend: Rc<Backend>,
    params: WindowParams,
}

impl WindowBuilder {
    pub fn new(backend: Rc<Backend>) -> Self {
        Self { backend, params: WindowParams::default() }
    }

    pub fn kind(mut self, kind: WindowKind) -> Self {
        self.params.kind = kind;
        self
    }

    pub fn app_title(mut self, title: impl Into<String>) -> Self {
        self.params.app_title = title.into();
        self
    }

    pub fn app_class(mut self, class: impl Into<String>) -> Self {
        self.params.app_class = class.into();
        self
    }

    pub fn preferred_size(mut self, size: Vec2) -> Self {
        self.params.preferred_size = Some(size);
        self
    }

    pub fn min_size(mut self, size: Vec2) -> Self {
        self.params.min_size = Some(size);
        self
    }

    pub fn max_size(mut self, size: Vec2) -> Self {
        self.params.max_size = Some(size);
        self
    }

    pub fn preferred_output(mut self, output: impl Into<String>) -> Self {
        self.params.preferred_output = Some(output.into());
        self
    }

    pub fn margin_top_left(mut self, margin: Vec2) -> Self {
        self.params.margin_top_left = margin;
        self
    }

    pub fn margin_bottom_right(mut self, margin: Vec2) -> Self {
        self.params.margin_bottom_right = margin;
        self
    }

    pub fn layer(mut self, layer: i32) -> Self {
        self.params.layer = layer;
        self
    }

    pub fn anchor(mut self, anchor: Edges) -> Self {
        self.params.anchor = anchor;
        self
    }

    pub fn exclusive_edge(mut self, edge: Edges) -> Self {
        self.params.exclusive_edge = edge;
        self
    }

    pub fn exclusive_zone(mut self, zone: i32) -> Self {
        self.params.exclusive_zone = zone;
        self
    }

    pub fn kb_interactive(mut self, interactive: bool) -> Self {
        self.params.kb_interactive = interactive;
        self
    }

    pub fn parent(mut self, parent: Rc<Window>) -> Self {
        self.params.parent = Some(parent);
        self
    }

    pub fn pos(mut self, pos: Vec2) -> Self {
        self.params.pos = pos;
        self
    }

    pub fn commence(self) -> Rc<Window> {
        let pixel_size = self.params.preferred_size.unwrap_or(Vec2::ZERO);
        let window = Rc::new(Window {
            params: self.params,
            open: Cell::new(false),
            pixel_size: Cell::new(pixel_size),
            scale: Cell::new(1.0),
            cursor: Cell::new(Vec2::ZERO),
            root: NullBuilder::new().commence(),
            listeners: Listeners::default(),
        });
        self.backend.register_window(Rc::clone(&window));
        window
    }
}

#[derive(Default)]
struct Listeners {
    resized: RefCell<Vec<Rc<dyn Fn(Vec2)>>>,
    close_request: RefCell<Vec<Rc<dyn Fn()>>>,
    popup_closed: RefCell<Vec<Rc<dyn Fn()>>>,
    layer_closed: RefCell<Vec<Rc<dyn Fn()>>>,
    keyboard_key: RefCell<Vec<Rc<dyn Fn(KeyEvent)>>>,
}

pub struct Window {
    params: WindowParams,
    open: Cell<bool>,
    pixel_size: Cell<Vec2>,
    scale: Cell<f64>,
    cursor: Cell<Vec2>,
    root: Rc<crate::element::NullElement>,
    listeners: Listeners,
}

impl Window {
    pub fn params(&self) -> &WindowParams {
        &self.params
    }

    pub fn open(&self) {
        self.open.set(true);
    }

    pub fn close(&self) {
        self.open.set(false);
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn pixel_size(&self) -> Vec2 {
        self.pixel_size.get()
    }

    pub fn scale(&self) -> f64 {
        self.scale.get()
    }

    pub fn cursor_pos(&self) -> Vec2 {
        self.cursor.get()
    }

    pub fn set_cursor_pos(&self, pos: Vec2) {
        self.cursor.set(pos);
    }

    /// The root of the window's element tree.
    pub fn root_element(&self) -> DynElement {
        Rc::clone(&self.root) as DynElement
    }

    pub fn on_resized(&self, listener: Rc<dyn Fn(Vec2)>) {
        self.listeners.resized.borrow_mut().push(listener);
    }

    pub fn on_close_request(&self, listener: Rc<dyn Fn()>) {
        self.listeners.close_request.borrow_mut().push(listener);
    }

    pub fn on_popup_closed(&self, listener: Rc<dyn Fn()>) {
        self.listeners.popup_closed.borrow_mut().push(listener);
    }

    pub fn on_layer_closed(&self, listener: Rc<dyn Fn()>) {
        self.listeners.layer_closed.borrow_mut().push(listener);
    }

    pub fn on_keyboard_key(&self, listener: Rc<dyn Fn(KeyEvent)>) {
        self.listeners.keyboard_key.borrow_mut().push(listener);
    }

    pub fn emit_resized(&self, size: Vec2) {
        self.pixel_size.set(size);
        let listeners = self.listeners.resized.borrow().clone();
        for listener in listeners {
            listener(size);
        }
    }

    pub fn emit_close_request(&self) {
        let listeners = self.listeners.close_request.borrow().clone();
        for listener in listeners {
            listener();
        }
    }

    pub fn emit_popup_closed(&self) {
        let listeners = self.listeners.popup_closed.borrow().clone();
        for listener in listeners {
            listener();
        }
    }

    pub fn emit_layer_closed(&self) {
        let listeners = self.listeners.layer_closed.borrow().clone();
        for listener in listeners {
            listener();
        }
    }

    pub fn emit_keyboard_key(&self, event: KeyEvent) {
        let listeners = self.listeners.keyboard_key.borrow().clone();
        for listener in listeners {
            listener(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn builder_registers_with_backend() {
        let backend = Backend::create();
        let window = WindowBuilder::new(Rc::clone(&backend))
            .kind(WindowKind::Toplevel)
            .app_title("demo")
            .preferred_size(Vec2::new(640.0, 480.0))
            .commence();
        assert_eq!(window.params().app_title, "demo");
        assert_eq!(window.pixel_size(), Vec2::new(640.0, 480.0));
        assert_eq!(backend.windows().len(), 1);
    }

    #[test]
    fn listeners_fire_in_registration_order() {
        let backend = Backend::create();
        let window = WindowBuilder::new(backend).commence();
        let log = Rc::new(RefCell::new(Vec::new()));
        let log1 = Rc::clone(&log);
        let log2 = Rc::clone(&log);
        window.on_resized(Rc::new(move |s| log1.borrow_mut().push(format!("a{}", s.x))));
        window.on_resized(Rc::new(move |s| log2.borrow_mut().push(format!("b{}", s.x))));
        window.emit_resized(Vec2::new(3.0, 4.0));
        assert_eq!(*log.borrow(), vec!["a3".to_string(), "b3".to_string()]);
        assert_eq!(window.pixel_size(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn keyboard_events_carry_modifiers() {
        use crate::input::Modifiers;
        let backend = Backend::create();
        let window = WindowBuilder::new(backend).commence();
        let seen = Rc::new(RefCell::new(None));
        let seen2 = Rc::clone(&seen);
        window.on_keyboard_key(Rc::new(move |ev| {
            *seen2.borrow_mut() = Some(ev);
        }));
        window.emit_keyboard_key(KeyEvent {
            keysym: 65,
            down: true,
            mods: Modifiers::CTRL,
            ..Default::default()
        });
        let ev = seen.borrow().clone().unwrap();
        assert!(ev.has_modifier(Modifiers::CTRL));
        assert_eq!(ev.keysym, 65);
    }
}

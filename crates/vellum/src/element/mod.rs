//! The element tree: shared base state, the `Element` trait, and the
//! concrete element kinds.
//!
//! Every concrete element is built by a builder with chained setters and a
//! terminal `commence()`. `rebuild()` on an element returns a builder that
//! shares the element's parameters, so a second `commence()` updates the
//! element in place.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::input::{MouseButton, ScrollAxis};
use crate::math::Vec2;

mod button;
mod containers;
mod controls;
mod shapes;
mod text;

pub use button::{ButtonBuilder, ButtonElement, ButtonParams};
pub use containers::{
    ColumnLayoutBuilder, ColumnLayoutElement, ColumnLayoutParams, RowLayoutBuilder,
    RowLayoutElement, RowLayoutParams, ScrollAreaBuilder, ScrollAreaElement, ScrollAreaParams,
};
pub use controls::{
    CheckboxBuilder, CheckboxElement, CheckboxParams, ComboboxBuilder, ComboboxElement,
    ComboboxParams, SliderBuilder, SliderElement, SliderParams, SpinboxBuilder, SpinboxElement,
    SpinboxParams, TextboxBuilder, TextboxElement, TextboxParams,
};
pub use shapes::{
    ImageBuilder, ImageElement, ImageParams, LineBuilder, LineElement, LineParams, NullBuilder,
    NullElement, NullParams, RectangleBuilder, RectangleElement, RectangleParams,
};
pub use text::{TextBuilder, TextElement, TextParams};

pub type DynElement = Rc<dyn Element>;
pub type WeakElement = Weak<dyn Element>;

/// How an element is positioned inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum PositionMode {
    #[default]
    Auto = 0,
    Absolute = 1,
}

bitflags! {
    /// Alignment hints for auto-positioned elements.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PositionFlags: u32 {
        const HCENTER = 1 << 0;
        const VCENTER = 1 << 1;
        const LEFT    = 1 << 2;
        const RIGHT   = 1 << 3;
        const TOP     = 1 << 4;
        const BOTTOM  = 1 << 5;
        const CENTER  = Self::HCENTER.bits() | Self::VCENTER.bits();
        const ALL     = Self::CENTER.bits()
            | Self::LEFT.bits()
            | Self::RIGHT.bits()
            | Self::TOP.bits()
            | Self::BOTTOM.bits();
    }
}

/// Common interface of every concrete element kind.
pub trait Element {
    fn base(&self) -> &ElementBase;
    fn type_name(&self) -> &'static str;
}

#[derive(Default)]
struct Handlers {
    mouse_enter: RefCell<Option<Rc<dyn Fn(Vec2)>>>,
    mouse_leave: RefCell<Option<Rc<dyn Fn()>>>,
    mouse_move: RefCell<Option<Rc<dyn Fn(Vec2)>>>,
    mouse_button: RefCell<Option<Rc<dyn Fn(MouseButton, bool)>>>,
    mouse_axis: RefCell<Option<Rc<dyn Fn(ScrollAxis, f64)>>>,
    repositioned: RefCell<Option<Rc<dyn Fn()>>>,
}

/// State shared by every element kind: tree links, geometry, input wiring.
#[derive(Default)]
pub struct ElementBase {
    children: RefCell<Vec<DynElement>>,
    parent: RefCell<Option<WeakElement>>,
    position_mode: Cell<PositionMode>,
    position_flags: Cell<PositionFlags>,
    absolute_position: Cell<Vec2>,
    position: Cell<Vec2>,
    size: Cell<Vec2>,
    margin: Cell<f64>,
    grouped: Cell<bool>,
    grow_h: Cell<bool>,
    grow_v: Cell<bool>,
    receives_mouse: Cell<bool>,
    tooltip: RefCell<String>,
    handlers: Handlers,
}

impl ElementBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> Vec<DynElement> {
        self.children.borrow().clone()
    }

    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn clear_children(&self) {
        for child in self.children.borrow_mut().drain(..) {
            *child.base().parent.borrow_mut() = None;
        }
    }

    pub fn parent(&self) -> Option<DynElement> {
        self.parent.borrow().as_ref().and_then(Weak::upgrade)
    }

    pub fn position_mode(&self) -> PositionMode {
        self.position_mode.get()
    }

    pub fn set_position_mode(&self, mode: PositionMode) {
        self.position_mode.set(mode);
    }

    pub fn position_flags(&self) -> PositionFlags {
        self.position_flags.get()
    }

    pub fn set_position_flags(&self, flags: PositionFlags) {
        self.position_flags.set(flags);
    }

    pub fn set_absolute_position(&self, pos: Vec2) {
        self.absolute_position.set(pos);
    }

    pub fn pos_from_parent(&self) -> Vec2 {
        self.position.get()
    }

    pub fn size(&self) -> Vec2 {
        self.size.get()
    }

    pub fn set_size(&self, size: Vec2) {
        self.size.set(size);
    }

    pub fn margin(&self) -> f64 {
        self.margin.get()
    }

    pub fn set_margin(&self, margin: f64) {
        self.margin.set(margin);
    }

    pub fn grouped(&self) -> bool {
        self.grouped.get()
    }

    pub fn set_grouped(&self, grouped: bool) {
        self.grouped.set(grouped);
    }

    pub fn grow(&self) -> (bool, bool) {
        (self.grow_h.get(), self.grow_v.get())
    }

    pub fn set_grow(&self, horizontal: bool, vertical: bool) {
        self.grow_h.set(horizontal);
        self.grow_v.set(vertical);
    }

    pub fn receives_mouse(&self) -> bool {
        self.receives_mouse.get()
    }

    pub fn set_receives_mouse(&self, receives: bool) {
        self.receives_mouse.set(receives);
    }

    pub fn tooltip(&self) -> String {
        self.tooltip.borrow().clone()
    }

    pub fn set_tooltip(&self, tooltip: impl Into<String>) {
        *self.tooltip.borrow_mut() = tooltip.into();
    }

    /// Recompute the parent-relative position. Headless, this applies the
    /// absolute position for absolutely-positioned elements and notifies
    /// the repositioned handler.
    pub fn reposition(&self) {
        if self.position_mode.get() == PositionMode::Absolute {
            self.position.set(self.absolute_position.get());
        }
        self.emit_repositioned();
    }

    pub fn set_on_mouse_enter(&self, handler: Option<Rc<dyn Fn(Vec2)>>) {
        *self.handlers.mouse_enter.borrow_mut() = handler;
    }

    pub fn set_on_mouse_leave(&self, handler: Option<Rc<dyn Fn()>>) {
        *self.handlers.mouse_leave.borrow_mut() = handler;
    }

    pub fn set_on_mouse_move(&self, handler: Option<Rc<dyn Fn(Vec2)>>) {
        *self.handlers.mouse_move.borrow_mut() = handler;
    }

    pub fn set_on_mouse_button(&self, handler: Option<Rc<dyn Fn(MouseButton, bool)>>) {
        *self.handlers.mouse_button.borrow_mut() = handler;
    }

    pub fn set_on_mouse_axis(&self, handler: Option<Rc<dyn Fn(ScrollAxis, f64)>>) {
        *self.handlers.mouse_axis.borrow_mut() = handler;
    }

    pub fn set_on_repositioned(&self, handler: Option<Rc<dyn Fn()>>) {
        *self.handlers.repositioned.borrow_mut() = handler;
    }

    pub fn emit_mouse_enter(&self, pos: Vec2) {
        let handler = self.handlers.mouse_enter.borrow().clone();
        if let Some(h) = handler {
            h(pos);
        }
    }

    pub fn emit_mouse_leave(&self) {
        let handler = self.handlers.mouse_leave.borrow().clone();
        if let Some(h) = handler {
            h();
        }
    }

    pub fn emit_mouse_move(&self, pos: Vec2) {
        let handler = self.handlers.mouse_move.borrow().clone();
        if let Some(h) = handler {
            h(pos);
        }
    }

    pub fn emit_mouse_button(&self, button: MouseButton, pressed: bool) {
        let handler = self.handlers.mouse_button.borrow().clone();
        if let Some(h) = handler {
            h(button, pressed);
        }
    }

    pub fn emit_mouse_axis(&self, axis: ScrollAxis, delta: f64) {
        let handler = self.handlers.mouse_axis.borrow().clone();
        if let Some(h) = handler {
            h(axis, delta);
        }
    }

    pub fn emit_repositioned(&self) {
        let handler = self.handlers.repositioned.borrow().clone();
        if let Some(h) = handler {
            h();
        }
    }
}

/// Attach `child` under `parent`, replacing any previous parent link.
pub fn add_child(parent: &DynElement, child: DynElement) {
    *child.base().parent.borrow_mut() = Some(Rc::downgrade(parent));
    parent.base().children.borrow_mut().push(child);
}

/// Detach `child` from `parent`; a no-op when it is not a child.
pub fn remove_child(parent: &DynElement, child: &DynElement) {
    let mut children = parent.base().children.borrow_mut();
    let before = children.len();
    children.retain(|c| !Rc::ptr_eq(c, child));
    if children.len() != before {
        *child.base().parent.borrow_mut() = None;
    }
}

/// Defines an element struct, its `Element` impl, `rebuild()`, and the
/// builder's `commence()`. The params struct must carry a `size: SizeSpec`
/// field; setter methods live next to the params definition.
macro_rules! define_element {
    ($element:ident, $builder:ident, $params:ident, $name:literal) => {
        pub struct $element {
            base: crate::element::ElementBase,
            params: std::rc::Rc<std::cell::RefCell<$params>>,
        }

        impl $element {
            pub fn params(&self) -> std::cell::Ref<'_, $params> {
                self.params.borrow()
            }

            /// A builder sharing this element's parameters; `commence()`
            /// applies edits to the element in place.
            pub fn rebuild(self: &std::rc::Rc<Self>) -> $builder {
                $builder {
                    params: std::rc::Rc::clone(&self.params),
                    target: Some(std::rc::Rc::clone(self)),
                }
            }
        }

        impl crate::element::Element for $element {
            fn base(&self) -> &crate::element::ElementBase {
                &self.base
            }

            fn type_name(&self) -> &'static str {
                $name
            }
        }

        pub struct $builder {
            params: std::rc::Rc<std::cell::RefCell<$params>>,
            target: Option<std::rc::Rc<$element>>,
        }

        impl $builder {
            pub fn new() -> Self {
                Self {
                    params: std::rc::Rc::new(std::cell::RefCell::new($params::default())),
                    target: None,
                }
            }

            pub fn commence(self) -> std::rc::Rc<$element> {
                let element = match self.target {
                    Some(element) => element,
                    None => std::rc::Rc::new($element {
                        base: crate::element::ElementBase::new(),
                        params: self.params,
                    }),
                };
                let spec = element.params.borrow().size;
                element.base.set_size(spec.calculate(crate::math::Vec2::ZERO));
                element.base.reposition();
                element
            }
        }

        impl Default for $builder {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

pub(crate) use define_element;

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf() -> DynElement {
        NullBuilder::new().commence()
    }

    #[test]
    fn child_links() {
        let parent = leaf();
        let child = leaf();
        add_child(&parent, child.clone());
        assert_eq!(parent.base().child_count(), 1);
        assert!(Rc::ptr_eq(&child.base().parent().unwrap(), &parent));

        remove_child(&parent, &child);
        assert_eq!(parent.base().child_count(), 0);
        assert!(child.base().parent().is_none());
    }

    #[test]
    fn parent_link_is_weak() {
        let child = leaf();
        {
            let parent = leaf();
            add_child(&parent, child.clone());
            assert!(child.base().parent().is_some());
        }
        // parent dropped; the weak link must expire rather than dangle
        assert!(child.base().parent().is_none());
    }

    #[test]
    fn clear_children_resets_links() {
        let parent = leaf();
        let a = leaf();
        let b = leaf();
        add_child(&parent, a.clone());
        add_child(&parent, b.clone());
        parent.base().clear_children();
        assert_eq!(parent.base().child_count(), 0);
        assert!(a.base().parent().is_none());
        assert!(b.base().parent().is_none());
    }

    #[test]
    fn mouse_handlers_fire() {
        use std::cell::Cell;
        let el = leaf();
        let hits = Rc::new(Cell::new(0));
        let hits2 = Rc::clone(&hits);
        el.base()
            .set_on_mouse_button(Some(Rc::new(move |_, pressed| {
                if pressed {
                    hits2.set(hits2.get() + 1);
                }
            })));
        el.base().emit_mouse_button(MouseButton::Left, true);
        el.base().emit_mouse_button(MouseButton::Left, false);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn absolute_positioning() {
        let el = leaf();
        el.base().set_position_mode(PositionMode::Absolute);
        el.base().set_absolute_position(Vec2::new(4.0, 5.0));
        el.base().reposition();
        assert_eq!(el.base().pos_from_parent(), Vec2::new(4.0, 5.0));
    }
}

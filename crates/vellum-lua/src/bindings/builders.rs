//! Builders and instances for every concrete element kind.
//!
//! Builder wrappers hold their toolkit builder in a slot that is consumed
//! by `commence`; chained setters mutate the slot and return the same
//! userdata, so Lua code reads like the native builder API:
//!
//! ```lua
//! local label = Text.begin():text("hi"):size(Size.absolute(40, 12)):commence()
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use mlua::{AnyUserData, Function, Lua, UserData, UserDataMethods};
use vellum::element::{
    ButtonBuilder, ButtonElement, CheckboxBuilder, CheckboxElement, ColumnLayoutBuilder,
    ColumnLayoutElement, ComboboxBuilder, ComboboxElement, ImageBuilder, ImageElement,
    LineBuilder, LineElement, NullBuilder, NullElement, RectangleBuilder, RectangleElement,
    RowLayoutBuilder, RowLayoutElement, ScrollAreaBuilder, ScrollAreaElement, SliderBuilder,
    SliderElement, SpinboxBuilder, SpinboxElement, TextBuilder, TextElement, TextboxBuilder,
    TextboxElement,
};
use vellum::types::{FontAlign, ImageFit};
use vellum::DynElement;

use crate::bindings::element::add_base_methods;
use crate::bindings::types::{LuaColor, LuaFontSize, LuaSize, LuaVec2, color_fn, color_fn_opt};
use crate::callback;
use crate::handle::Handle;
use crate::registry::{Binding, register_enum};
use crate::resolve::AsElement;

fn consumed() -> mlua::Error {
    mlua::Error::RuntimeError("builder already commenced".into())
}

fn bad_enum(what: &str, value: u8) -> mlua::Error {
    mlua::Error::RuntimeError(format!("invalid {what} value {value}"))
}

/// A userdata wrapper holding a consumable toolkit builder.
pub(crate) trait BuilderSlot: 'static {
    type Builder;
    fn slot(&self) -> &RefCell<Option<Self::Builder>>;
}

/// Run one chained setter against the wrapped builder.
fn apply<W>(ud: &AnyUserData, f: impl FnOnce(W::Builder) -> W::Builder) -> mlua::Result<()>
where
    W: BuilderSlot + UserData,
{
    let wrapper = ud.borrow::<W>()?;
    let builder = wrapper.slot().borrow_mut().take().ok_or_else(consumed)?;
    *wrapper.slot().borrow_mut() = Some(f(builder));
    Ok(())
}

/// Consume the wrapped builder for `commence`.
fn take<W>(ud: &AnyUserData) -> mlua::Result<W::Builder>
where
    W: BuilderSlot + UserData,
{
    let wrapper = ud.borrow::<W>()?;
    wrapper.slot().borrow_mut().take().ok_or_else(consumed)
}

/// Install a `<Name>.begin()` constructor table.
fn install_begin<W>(lua: &Lua, name: &str, make: fn() -> W) -> mlua::Result<()>
where
    W: UserData + 'static,
{
    let table = lua.create_table()?;
    table.set("begin", lua.create_function(move |_, ()| Ok(make()))?)?;
    lua.globals().set(name, table)
}

/// Element handle wrapper + builder slot wrapper for one element kind.
macro_rules! bind_element {
    ($elem_wrapper:ident, $elem:ty, $builder_wrapper:ident, $builder:ty) => {
        #[derive(Clone)]
        pub struct $elem_wrapper(pub Handle<$elem>);

        impl $elem_wrapper {
            pub fn new(element: Rc<$elem>) -> Self {
                Self(Handle::shared(element))
            }

            pub fn get(&self) -> Option<Rc<$elem>> {
                self.0.resolve_local()
            }
        }

        impl AsElement for $elem_wrapper {
            fn as_element(&self) -> Option<DynElement> {
                self.get().map(|el| el as DynElement)
            }
        }

        pub struct $builder_wrapper(RefCell<Option<$builder>>);

        impl $builder_wrapper {
            pub fn new() -> Self {
                Self(RefCell::new(Some(<$builder>::new())))
            }

            pub fn from_builder(builder: $builder) -> Self {
                Self(RefCell::new(Some(builder)))
            }
        }

        impl BuilderSlot for $builder_wrapper {
            type Builder = $builder;
            fn slot(&self) -> &RefCell<Option<$builder>> {
                &self.0
            }
        }
    };
}

/// One chained setter: `name(args) -> same userdata`.
macro_rules! chain {
    ($methods:expr, $wrapper:ty, $name:literal, $ty:ty, |$b:ident, $v:ident| $body:expr) => {
        $methods.add_function($name, |_, (ud, $v): (AnyUserData, $ty)| {
            apply::<$wrapper>(&ud, |$b| $body)?;
            Ok(ud)
        });
    };
    // variant with access to the Lua handle (color expressions)
    ($methods:expr, $wrapper:ty, $name:literal, $ty:ty, |$lua:ident, $b:ident, $v:ident| $body:expr) => {
        $methods.add_function($name, |$lua, (ud, $v): (AnyUserData, $ty)| {
            apply::<$wrapper>(&ud, |$b| $body)?;
            Ok(ud)
        });
    };
}

macro_rules! commence {
    ($methods:expr, $builder_wrapper:ty, $elem_wrapper:ident) => {
        $methods.add_function("commence", |_, ud: AnyUserData| {
            let builder = take::<$builder_wrapper>(&ud)?;
            Ok($elem_wrapper::new(builder.commence()))
        });
    };
}

macro_rules! rebuild {
    ($methods:expr, $elem_wrapper:ty, $builder_wrapper:ident) => {
        $methods.add_method("rebuild", |_, this, ()| {
            Ok(this.get().map(|el| $builder_wrapper::from_builder(el.rebuild())))
        });
    };
}

// ---------------------------------------------------------------------------
// Text

bind_element!(LuaText, TextElement, LuaTextBuilder, TextBuilder);

impl UserData for LuaTextBuilder {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        chain!(methods, LuaTextBuilder, "text", String, |b, v| b.text(v));
        chain!(methods, LuaTextBuilder, "color", mlua::Value, |lua, b, v| {
            b.color(color_fn("Text color", lua, v))
        });
        chain!(methods, LuaTextBuilder, "alpha", f32, |b, v| b.alpha(v));
        chain!(methods, LuaTextBuilder, "fontSize", LuaFontSize, |b, v| b.font_size(v.0));
        methods.add_function("align", |_, (ud, align): (AnyUserData, u8)| {
            let align = FontAlign::try_from(align).map_err(|_| bad_enum("FontAlign", align))?;
            apply::<LuaTextBuilder>(&ud, |b| b.align(align))?;
            Ok(ud)
        });
        chain!(methods, LuaTextBuilder, "fontFamily", String, |b, v| b.font_family(v));
        methods.add_function("clampSize", |_, (ud, x, y): (AnyUserData, f64, f64)| {
            apply::<LuaTextBuilder>(&ud, |b| b.clamp_size(vellum::Vec2::new(x, y)))?;
            Ok(ud)
        });
        chain!(methods, LuaTextBuilder, "callback", Function, |b, v| {
            b.on_changed(Rc::new(callback::nullary("Text callback", v)))
        });
        chain!(methods, LuaTextBuilder, "noEllipsize", bool, |b, v| b.no_ellipsize(v));
        chain!(methods, LuaTextBuilder, "renderAsync", bool, |b, v| b.render_async(v));
        chain!(methods, LuaTextBuilder, "size", LuaSize, |b, v| b.size(v.0));
        commence!(methods, LuaTextBuilder, LuaText);
    }
}

impl UserData for LuaText {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        add_base_methods(methods);
        rebuild!(methods, LuaText, LuaTextBuilder);
        methods.add_method("text", |_, this, ()| Ok(this.get().map(|el| el.text())));
        methods.add_method("currentColor", |_, this, ()| {
            Ok(this.get().map(|el| LuaColor(el.current_color())))
        });
    }
}

pub struct TextBinding;

impl Binding for TextBinding {
    const NAME: &'static str = "Text";
    const BASE: Option<&'static str> = Some("Element");

    fn install(lua: &Lua) -> mlua::Result<()> {
        install_begin(lua, "Text", LuaTextBuilder::new)
    }
}

// ---------------------------------------------------------------------------
// Button

bind_element!(LuaButton, ButtonElement, LuaButtonBuilder, ButtonBuilder);

impl UserData for LuaButtonBuilder {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        chain!(methods, LuaButtonBuilder, "label", String, |b, v| b.label(v));
        chain!(methods, LuaButtonBuilder, "noBorder", bool, |b, v| b.no_border(v));
        chain!(methods, LuaButtonBuilder, "noBg", bool, |b, v| b.no_bg(v));
        methods.add_function("alignText", |_, (ud, align): (AnyUserData, u8)| {
            let align = FontAlign::try_from(align).map_err(|_| bad_enum("FontAlign", align))?;
            apply::<LuaButtonBuilder>(&ud, |b| b.align_text(align))?;
            Ok(ud)
        });
        chain!(methods, LuaButtonBuilder, "fontFamily", String, |b, v| b.font_family(v));
        chain!(methods, LuaButtonBuilder, "fontSize", LuaFontSize, |b, v| b.font_size(v.0));
        chain!(methods, LuaButtonBuilder, "onMainClick", Function, |b, v| {
            let cb = callback::unary::<LuaButton>("Button onMainClick", v);
            b.on_main_click(Rc::new(move |el| cb(LuaButton::new(el))))
        });
        chain!(methods, LuaButtonBuilder, "onRightClick", Function, |b, v| {
            let cb = callback::unary::<LuaButton>("Button onRightClick", v);
            b.on_right_click(Rc::new(move |el| cb(LuaButton::new(el))))
        });
        chain!(methods, LuaButtonBuilder, "size", LuaSize, |b, v| b.size(v.0));
        commence!(methods, LuaButtonBuilder, LuaButton);
    }
}

impl UserData for LuaButton {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        add_base_methods(methods);
        rebuild!(methods, LuaButton, LuaButtonBuilder);
        methods.add_method("label", |_, this, ()| Ok(this.get().map(|el| el.label())));
    }
}

pub struct ButtonBinding;

impl Binding for ButtonBinding {
    const NAME: &'static str = "Button";
    const BASE: Option<&'static str> = Some("Element");

    fn install(lua: &Lua) -> mlua::Result<()> {
        install_begin(lua, "Button", LuaButtonBuilder::new)
    }
}

// ---------------------------------------------------------------------------
// Textbox

bind_element!(LuaTextbox, TextboxElement, LuaTextboxBuilder, TextboxBuilder);

impl UserData for LuaTextboxBuilder {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        chain!(methods, LuaTextboxBuilder, "placeholder", String, |b, v| b.placeholder(v));
        chain!(methods, LuaTextboxBuilder, "defaultText", String, |b, v| b.default_text(v));
        chain!(methods, LuaTextboxBuilder, "multiline", bool, |b, v| b.multiline(v));
        chain!(methods, LuaTextboxBuilder, "onTextEdited", Function, |b, v| {
            let cb = callback::binary::<LuaTextbox, String>("Textbox onTextEdited", v);
            b.on_text_edited(Rc::new(move |el, text| cb(LuaTextbox::new(el), text)))
        });
        chain!(methods, LuaTextboxBuilder, "size", LuaSize, |b, v| b.size(v.0));
        commence!(methods, LuaTextboxBuilder, LuaTextbox);
    }
}

impl UserData for LuaTextbox {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        add_base_methods(methods);
        rebuild!(methods, LuaTextbox, LuaTextboxBuilder);
        methods.add_method("focus", |_, this, ()| {
            if let Some(el) = this.get() {
                el.focus();
            }
            Ok(())
        });
        methods.add_method("currentText", |_, this, ()| {
            Ok(this.get().map(|el| el.current_text()))
        });
    }
}

pub struct TextboxBinding;

impl Binding for TextboxBinding {
    const NAME: &'static str = "Textbox";
    const BASE: Option<&'static str> = Some("Element");

    fn install(lua: &Lua) -> mlua::Result<()> {
        install_begin(lua, "Textbox", LuaTextboxBuilder::new)
    }
}

// ---------------------------------------------------------------------------
// Checkbox

bind_element!(LuaCheckbox, CheckboxElement, LuaCheckboxBuilder, CheckboxBuilder);

impl UserData for LuaCheckboxBuilder {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        chain!(methods, LuaCheckboxBuilder, "toggled", bool, |b, v| b.toggled(v));
        chain!(methods, LuaCheckboxBuilder, "onToggled", Function, |b, v| {
            let cb = callback::binary::<LuaCheckbox, bool>("Checkbox onToggled", v);
            b.on_toggled(Rc::new(move |el, state| cb(LuaCheckbox::new(el), state)))
        });
        chain!(methods, LuaCheckboxBuilder, "size", LuaSize, |b, v| b.size(v.0));
        commence!(methods, LuaCheckboxBuilder, LuaCheckbox);
    }
}

impl UserData for LuaCheckbox {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        add_base_methods(methods);
        rebuild!(methods, LuaCheckbox, LuaCheckboxBuilder);
        methods.add_method("toggled", |_, this, ()| Ok(this.get().map(|el| el.toggled())));
    }
}

pub struct CheckboxBinding;

impl Binding for CheckboxBinding {
    const NAME: &'static str = "Checkbox";
    const BASE: Option<&'static str> = Some("Element");

    fn install(lua: &Lua) -> mlua::Result<()> {
        install_begin(lua, "Checkbox", LuaCheckboxBuilder::new)
    }
}

// ---------------------------------------------------------------------------
// Slider

bind_element!(LuaSlider, SliderElement, LuaSliderBuilder, SliderBuilder);

impl UserData for LuaSliderBuilder {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        chain!(methods, LuaSliderBuilder, "min", f32, |b, v| b.min(v));
        chain!(methods, LuaSliderBuilder, "max", f32, |b, v| b.max(v));
        chain!(methods, LuaSliderBuilder, "val", f32, |b, v| b.val(v));
        chain!(methods, LuaSliderBuilder, "snapInt", bool, |b, v| b.snap_int(v));
        chain!(methods, LuaSliderBuilder, "onChanged", Function, |b, v| {
            let cb = callback::binary::<LuaSlider, f32>("Slider onChanged", v);
            b.on_changed(Rc::new(move |el, value| cb(LuaSlider::new(el), value)))
        });
        chain!(methods, LuaSliderBuilder, "size", LuaSize, |b, v| b.size(v.0));
        commence!(methods, LuaSliderBuilder, LuaSlider);
    }
}

impl UserData for LuaSlider {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        add_base_methods(methods);
        rebuild!(methods, LuaSlider, LuaSliderBuilder);
        methods.add_method("sliding", |_, this, ()| Ok(this.get().map(|el| el.sliding())));
        methods.add_method("value", |_, this, ()| Ok(this.get().map(|el| el.value())));
    }
}

pub struct SliderBinding;

impl Binding for SliderBinding {
    const NAME: &'static str = "Slider";
    const BASE: Option<&'static str> = Some("Element");

    fn install(lua: &Lua) -> mlua::Result<()> {
        install_begin(lua, "Slider", LuaSliderBuilder::new)
    }
}

// ---------------------------------------------------------------------------
// Combobox

bind_element!(LuaCombobox, ComboboxElement, LuaComboboxBuilder, ComboboxBuilder);

impl UserData for LuaComboboxBuilder {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        chain!(methods, LuaComboboxBuilder, "items", Vec<String>, |b, v| b.items(v));
        chain!(methods, LuaComboboxBuilder, "currentItem", usize, |b, v| b.current_item(v));
        chain!(methods, LuaComboboxBuilder, "onChanged", Function, |b, v| {
            let cb = callback::binary::<LuaCombobox, usize>("Combobox onChanged", v);
            b.on_changed(Rc::new(move |el, index| cb(LuaCombobox::new(el), index)))
        });
        chain!(methods, LuaComboboxBuilder, "size", LuaSize, |b, v| b.size(v.0));
        commence!(methods, LuaComboboxBuilder, LuaCombobox);
    }
}

impl UserData for LuaCombobox {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        add_base_methods(methods);
        rebuild!(methods, LuaCombobox, LuaComboboxBuilder);
        methods.add_method("current", |_, this, ()| Ok(this.get().map(|el| el.current())));
        methods.add_method("setCurrent", |_, this, index: usize| {
            if let Some(el) = this.get() {
                el.set_current(index);
            }
            Ok(())
        });
    }
}

pub struct ComboboxBinding;

impl Binding for ComboboxBinding {
    const NAME: &'static str = "Combobox";
    const BASE: Option<&'static str> = Some("Element");

    fn install(lua: &Lua) -> mlua::Result<()> {
        install_begin(lua, "Combobox", LuaComboboxBuilder::new)
    }
}

// ---------------------------------------------------------------------------
// Spinbox

bind_element!(LuaSpinbox, SpinboxElement, LuaSpinboxBuilder, SpinboxBuilder);

impl UserData for LuaSpinboxBuilder {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        chain!(methods, LuaSpinboxBuilder, "label", String, |b, v| b.label(v));
        chain!(methods, LuaSpinboxBuilder, "items", Vec<String>, |b, v| b.items(v));
        chain!(methods, LuaSpinboxBuilder, "currentItem", usize, |b, v| b.current_item(v));
        chain!(methods, LuaSpinboxBuilder, "fill", bool, |b, v| b.fill(v));
        chain!(methods, LuaSpinboxBuilder, "onChanged", Function, |b, v| {
            let cb = callback::binary::<LuaSpinbox, usize>("Spinbox onChanged", v);
            b.on_changed(Rc::new(move |el, index| cb(LuaSpinbox::new(el), index)))
        });
        chain!(methods, LuaSpinboxBuilder, "size", LuaSize, |b, v| b.size(v.0));
        commence!(methods, LuaSpinboxBuilder, LuaSpinbox);
    }
}

impl UserData for LuaSpinbox {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        add_base_methods(methods);
        rebuild!(methods, LuaSpinbox, LuaSpinboxBuilder);
        methods.add_method("current", |_, this, ()| Ok(this.get().map(|el| el.current())));
        methods.add_method("setCurrent", |_, this, index: usize| {
            if let Some(el) = this.get() {
                el.set_current(index);
            }
            Ok(())
        });
    }
}

pub struct SpinboxBinding;

impl Binding for SpinboxBinding {
    const NAME: &'static str = "Spinbox";
    const BASE: Option<&'static str> = Some("Element");

    fn install(lua: &Lua) -> mlua::Result<()> {
        install_begin(lua, "Spinbox", LuaSpinboxBuilder::new)
    }
}

// ---------------------------------------------------------------------------
// Rectangle

bind_element!(LuaRectangle, RectangleElement, LuaRectangleBuilder, RectangleBuilder);

impl UserData for LuaRectangleBuilder {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        chain!(methods, LuaRectangleBuilder, "color", mlua::Value, |lua, b, v| {
            b.color(color_fn("Rectangle color", lua, v))
        });
        chain!(methods, LuaRectangleBuilder, "borderColor", mlua::Value, |lua, b, v| {
            // nil means "no border", not a black border
            match color_fn_opt("Rectangle borderColor", lua, v) {
                Some(color) => b.border_color(color),
                None => b,
            }
        });
        chain!(methods, LuaRectangleBuilder, "rounding", i32, |b, v| b.rounding(v));
        chain!(methods, LuaRectangleBuilder, "borderThickness", f64, |b, v| {
            b.border_thickness(v)
        });
        chain!(methods, LuaRectangleBuilder, "size", LuaSize, |b, v| b.size(v.0));
        commence!(methods, LuaRectangleBuilder, LuaRectangle);
    }
}

impl UserData for LuaRectangle {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        add_base_methods(methods);
        rebuild!(methods, LuaRectangle, LuaRectangleBuilder);
        methods.add_method("currentColor", |_, this, ()| {
            Ok(this.get().map(|el| LuaColor(el.current_color())))
        });
        methods.add_method("currentBorderColor", |_, this, ()| {
            Ok(this.get().and_then(|el| el.current_border_color().map(LuaColor)))
        });
    }
}

pub struct RectangleBinding;

impl Binding for RectangleBinding {
    const NAME: &'static str = "Rectangle";
    const BASE: Option<&'static str> = Some("Element");

    fn install(lua: &Lua) -> mlua::Result<()> {
        install_begin(lua, "Rectangle", LuaRectangleBuilder::new)
    }
}

// ---------------------------------------------------------------------------
// Column / Row layouts

bind_element!(LuaColumnLayout, ColumnLayoutElement, LuaColumnLayoutBuilder, ColumnLayoutBuilder);

impl UserData for LuaColumnLayoutBuilder {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        chain!(methods, LuaColumnLayoutBuilder, "gap", f64, |b, v| b.gap(v));
        chain!(methods, LuaColumnLayoutBuilder, "size", LuaSize, |b, v| b.size(v.0));
        commence!(methods, LuaColumnLayoutBuilder, LuaColumnLayout);
    }
}

impl UserData for LuaColumnLayout {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        add_base_methods(methods);
        rebuild!(methods, LuaColumnLayout, LuaColumnLayoutBuilder);
    }
}

pub struct ColumnLayoutBinding;

impl Binding for ColumnLayoutBinding {
    const NAME: &'static str = "ColumnLayout";
    const BASE: Option<&'static str> = Some("Element");

    fn install(lua: &Lua) -> mlua::Result<()> {
        install_begin(lua, "ColumnLayout", LuaColumnLayoutBuilder::new)
    }
}

bind_element!(LuaRowLayout, RowLayoutElement, LuaRowLayoutBuilder, RowLayoutBuilder);

impl UserData for LuaRowLayoutBuilder {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        chain!(methods, LuaRowLayoutBuilder, "gap", f64, |b, v| b.gap(v));
        chain!(methods, LuaRowLayoutBuilder, "size", LuaSize, |b, v| b.size(v.0));
        commence!(methods, LuaRowLayoutBuilder, LuaRowLayout);
    }
}

impl UserData for LuaRowLayout {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        add_base_methods(methods);
        rebuild!(methods, LuaRowLayout, LuaRowLayoutBuilder);
    }
}

pub struct RowLayoutBinding;

impl Binding for RowLayoutBinding {
    const NAME: &'static str = "RowLayout";
    const BASE: Option<&'static str> = Some("Element");

    fn install(lua: &Lua) -> mlua::Result<()> {
        install_begin(lua, "RowLayout", LuaRowLayoutBuilder::new)
    }
}

// ---------------------------------------------------------------------------
// Scroll area

bind_element!(LuaScrollArea, ScrollAreaElement, LuaScrollAreaBuilder, ScrollAreaBuilder);

impl UserData for LuaScrollAreaBuilder {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        chain!(methods, LuaScrollAreaBuilder, "scrollX", bool, |b, v| b.scroll_x(v));
        chain!(methods, LuaScrollAreaBuilder, "scrollY", bool, |b, v| b.scroll_y(v));
        chain!(methods, LuaScrollAreaBuilder, "blockUserScroll", bool, |b, v| {
            b.block_user_scroll(v)
        });
        chain!(methods, LuaScrollAreaBuilder, "size", LuaSize, |b, v| b.size(v.0));
        commence!(methods, LuaScrollAreaBuilder, LuaScrollArea);
    }
}

impl UserData for LuaScrollArea {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        add_base_methods(methods);
        methods.add_method("getCurrentScroll", |_, this, ()| {
            Ok(this.get().map(|el| LuaVec2(el.scroll())))
        });
        methods.add_method("setScroll", |_, this, scroll: LuaVec2| {
            if let Some(el) = this.get() {
                el.set_scroll(scroll.0);
            }
            Ok(())
        });
    }
}

pub struct ScrollAreaBinding;

impl Binding for ScrollAreaBinding {
    const NAME: &'static str = "ScrollArea";
    const BASE: Option<&'static str> = Some("Element");

    fn install(lua: &Lua) -> mlua::Result<()> {
        install_begin(lua, "ScrollArea", LuaScrollAreaBuilder::new)
    }
}

// ---------------------------------------------------------------------------
// Image

bind_element!(LuaImage, ImageElement, LuaImageBuilder, ImageBuilder);

impl UserData for LuaImageBuilder {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        chain!(methods, LuaImageBuilder, "path", String, |b, v| b.path(v));
        chain!(methods, LuaImageBuilder, "icon", String, |b, v| b.icon(v));
        chain!(methods, LuaImageBuilder, "alpha", f32, |b, v| b.alpha(v));
        methods.add_function("fitMode", |_, (ud, fit): (AnyUserData, u8)| {
            let fit = ImageFit::try_from(fit).map_err(|_| bad_enum("ImageFit", fit))?;
            apply::<LuaImageBuilder>(&ud, |b| b.fit(fit))?;
            Ok(ud)
        });
        chain!(methods, LuaImageBuilder, "sync", bool, |b, v| b.sync_load(v));
        chain!(methods, LuaImageBuilder, "rounding", i32, |b, v| b.rounding(v));
        chain!(methods, LuaImageBuilder, "size", LuaSize, |b, v| b.size(v.0));
        commence!(methods, LuaImageBuilder, LuaImage);
    }
}

impl UserData for LuaImage {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        add_base_methods(methods);
        rebuild!(methods, LuaImage, LuaImageBuilder);
    }
}

pub struct ImageBinding;

impl Binding for ImageBinding {
    const NAME: &'static str = "Image";
    const BASE: Option<&'static str> = Some("Element");

    fn install(lua: &Lua) -> mlua::Result<()> {
        register_enum(
            lua,
            "ImageFit",
            &[
                ("STRETCH", ImageFit::Stretch as u32),
                ("COVER", ImageFit::Cover as u32),
                ("CONTAIN", ImageFit::Contain as u32),
                ("TILE", ImageFit::Tile as u32),
            ],
        )?;
        install_begin(lua, "Image", LuaImageBuilder::new)
    }
}

// ---------------------------------------------------------------------------
// Null (spacer)

bind_element!(LuaNull, NullElement, LuaNullBuilder, NullBuilder);

impl UserData for LuaNullBuilder {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        chain!(methods, LuaNullBuilder, "size", LuaSize, |b, v| b.size(v.0));
        commence!(methods, LuaNullBuilder, LuaNull);
    }
}

impl UserData for LuaNull {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        add_base_methods(methods);
        rebuild!(methods, LuaNull, LuaNullBuilder);
    }
}

pub struct NullBinding;

impl Binding for NullBinding {
    const NAME: &'static str = "Null";
    const BASE: Option<&'static str> = Some("Element");

    fn install(lua: &Lua) -> mlua::Result<()> {
        install_begin(lua, "Null", LuaNullBuilder::new)
    }
}

// ---------------------------------------------------------------------------
// Line

bind_element!(LuaLine, LineElement, LuaLineBuilder, LineBuilder);

impl UserData for LuaLineBuilder {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        chain!(methods, LuaLineBuilder, "color", mlua::Value, |lua, b, v| {
            b.color(color_fn("Line color", lua, v))
        });
        chain!(methods, LuaLineBuilder, "thick", f64, |b, v| b.thick(v));
        chain!(methods, LuaLineBuilder, "points", Vec<LuaVec2>, |b, v| {
            b.points(v.into_iter().map(|p| p.0).collect())
        });
        chain!(methods, LuaLineBuilder, "size", LuaSize, |b, v| b.size(v.0));
        commence!(methods, LuaLineBuilder, LuaLine);
    }
}

impl UserData for LuaLine {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        add_base_methods(methods);
        rebuild!(methods, LuaLine, LuaLineBuilder);
        methods.add_method("currentColor", |_, this, ()| {
            Ok(this.get().map(|el| LuaColor(el.current_color())))
        });
    }
}

pub struct LineBinding;

impl Binding for LineBinding {
    const NAME: &'static str = "Line";
    const BASE: Option<&'static str> = Some("Element");

    fn install(lua: &Lua) -> mlua::Result<()> {
        install_begin(lua, "Line", LuaLineBuilder::new)
    }
}

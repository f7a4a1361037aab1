//! Interactive form controls: textbox, checkbox, slider, combobox, spinbox.

use std::rc::Rc;

use crate::element::define_element;
use crate::types::SizeSpec;

// ---------------------------------------------------------------------------
// Textbox

pub type TextEdited = Rc<dyn Fn(Rc<TextboxElement>, String)>;

pub struct TextboxParams {
    pub placeholder: String,
    pub default_text: String,
    pub multiline: bool,
    pub on_text_edited: Option<TextEdited>,
    pub size: SizeSpec,
    /// Live state, not a builder input.
    pub current: String,
    pub focused: bool,
}

impl Default for TextboxParams {
    fn default() -> Self {
        Self {
            placeholder: String::new(),
            default_text: String::new(),
            multiline: false,
            on_text_edited: None,
            size: SizeSpec::auto(),
            current: String::new(),
            focused: false,
        }
    }
}

define_element!(TextboxElement, TextboxBuilder, TextboxParams, "Textbox");

impl TextboxBuilder {
    pub fn placeholder(self, placeholder: impl Into<String>) -> Self {
        self.params.borrow_mut().placeholder = placeholder.into();
        self
    }

    pub fn default_text(self, text: impl Into<String>) -> Self {
        let text = text.into();
        let mut params = self.params.borrow_mut();
        params.default_text = text.clone();
        params.current = text;
        drop(params);
        self
    }

    pub fn multiline(self, multiline: bool) -> Self {
        self.params.borrow_mut().multiline = multiline;
        self
    }

    pub fn on_text_edited(self, callback: TextEdited) -> Self {
        self.params.borrow_mut().on_text_edited = Some(callback);
        self
    }

    pub fn size(self, size: SizeSpec) -> Self {
        self.params.borrow_mut().size = size;
        self
    }
}

impl TextboxElement {
    pub fn current_text(&self) -> String {
        self.params.borrow().current.clone()
    }

    pub fn focus(&self) {
        self.params.borrow_mut().focused = true;
    }

    pub fn focused(&self) -> bool {
        self.params.borrow().focused
    }

    /// Apply an edit as if typed by the user and notify the handler.
    pub fn set_text_from_user(self: &Rc<Self>, text: impl Into<String>) {
        let text = text.into();
        self.params.borrow_mut().current = text.clone();
        let callback = self.params.borrow().on_text_edited.clone();
        if let Some(cb) = callback {
            cb(Rc::clone(self), text);
        }
    }
}

// ---------------------------------------------------------------------------
// Checkbox

pub type Toggled = Rc<dyn Fn(Rc<CheckboxElement>, bool)>;

pub struct CheckboxParams {
    pub toggled: bool,
    pub on_toggled: Option<Toggled>,
    pub size: SizeSpec,
}

impl Default for CheckboxParams {
    fn default() -> Self {
        Self { toggled: false, on_toggled: None, size: SizeSpec::auto() }
    }
}

define_element!(CheckboxElement, CheckboxBuilder, CheckboxParams, "Checkbox");

impl CheckboxBuilder {
    pub fn toggled(self, toggled: bool) -> Self {
        self.params.borrow_mut().toggled = toggled;
        self
    }

    pub fn on_toggled(self, callback: Toggled) -> Self {
        self.params.borrow_mut().on_toggled = Some(callback);
        self
    }

    pub fn size(self, size: SizeSpec) -> Self {
        self.params.borrow_mut().size = size;
        self
    }
}

impl CheckboxElement {
    pub fn toggled(&self) -> bool {
        self.params.borrow().toggled
    }

    /// Flip the state as if clicked and notify the handler.
    pub fn toggle_from_user(self: &Rc<Self>) {
        let state = {
            let mut params = self.params.borrow_mut();
            params.toggled = !params.toggled;
            params.toggled
        };
        let callback = self.params.borrow().on_toggled.clone();
        if let Some(cb) = callback {
            cb(Rc::clone(self), state);
        }
    }
}

// ---------------------------------------------------------------------------
// Slider

pub type SliderChanged = Rc<dyn Fn(Rc<SliderElement>, f32)>;

pub struct SliderParams {
    pub min: f32,
    pub max: f32,
    pub val: f32,
    pub snap_int: bool,
    pub on_changed: Option<SliderChanged>,
    pub size: SizeSpec,
    pub sliding: bool,
}

impl Default for SliderParams {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            val: 0.0,
            snap_int: false,
            on_changed: None,
            size: SizeSpec::auto(),
            sliding: false,
        }
    }
}

define_element!(SliderElement, SliderBuilder, SliderParams, "Slider");

impl SliderBuilder {
    pub fn min(self, min: f32) -> Self {
        self.params.borrow_mut().min = min;
        self
    }

    pub fn max(self, max: f32) -> Self {
        self.params.borrow_mut().max = max;
        self
    }

    pub fn val(self, val: f32) -> Self {
        self.params.borrow_mut().val = val;
        self
    }

    pub fn snap_int(self, snap: bool) -> Self {
        self.params.borrow_mut().snap_int = snap;
        self
    }

    pub fn on_changed(self, callback: SliderChanged) -> Self {
        self.params.borrow_mut().on_changed = Some(callback);
        self
    }

    pub fn size(self, size: SizeSpec) -> Self {
        self.params.borrow_mut().size = size;
        self
    }
}

impl SliderElement {
    pub fn value(&self) -> f32 {
        self.params.borrow().val
    }

    pub fn sliding(&self) -> bool {
        self.params.borrow().sliding
    }

    /// Move the knob as if dragged: clamp, snap, notify.
    pub fn set_value_from_user(self: &Rc<Self>, value: f32) {
        let value = {
            let mut params = self.params.borrow_mut();
            let mut v = value.clamp(params.min, params.max);
            if params.snap_int {
                v = v.round();
            }
            params.val = v;
            v
        };
        let callback = self.params.borrow().on_changed.clone();
        if let Some(cb) = callback {
            cb(Rc::clone(self), value);
        }
    }
}

// ---------------------------------------------------------------------------
// Combobox

pub type SelectionChanged<E> = Rc<dyn Fn(Rc<E>, usize)>;

pub struct ComboboxParams {
    pub items: Vec<String>,
    pub current: usize,
    pub on_changed: Option<SelectionChanged<ComboboxElement>>,
    pub size: SizeSpec,
}

impl Default for ComboboxParams {
    fn default() -> Self {
        Self { items: Vec::new(), current: 0, on_changed: None, size: SizeSpec::auto() }
    }
}

define_element!(ComboboxElement, ComboboxBuilder, ComboboxParams, "Combobox");

impl ComboboxBuilder {
    pub fn items(self, items: Vec<String>) -> Self {
        self.params.borrow_mut().items = items;
        self
    }

    pub fn current_item(self, index: usize) -> Self {
        self.params.borrow_mut().current = index;
        self
    }

    pub fn on_changed(self, callback: SelectionChanged<ComboboxElement>) -> Self {
        self.params.borrow_mut().on_changed = Some(callback);
        self
    }

    pub fn size(self, size: SizeSpec) -> Self {
        self.params.borrow_mut().size = size;
        self
    }
}

impl ComboboxElement {
    pub fn current(&self) -> usize {
        self.params.borrow().current
    }

    pub fn items(&self) -> Vec<String> {
        self.params.borrow().items.clone()
    }

    /// Select an entry and notify; out-of-range indices are clamped.
    pub fn set_current(self: &Rc<Self>, index: usize) {
        let index = {
            let mut params = self.params.borrow_mut();
            let clamped = index.min(params.items.len().saturating_sub(1));
            params.current = clamped;
            clamped
        };
        let callback = self.params.borrow().on_changed.clone();
        if let Some(cb) = callback {
            cb(Rc::clone(self), index);
        }
    }
}

// ---------------------------------------------------------------------------
// Spinbox

pub struct SpinboxParams {
    pub label: String,
    pub items: Vec<String>,
    pub current: usize,
    pub fill: bool,
    pub on_changed: Option<SelectionChanged<SpinboxElement>>,
    pub size: SizeSpec,
}

impl Default for SpinboxParams {
    fn default() -> Self {
        Self {
            label: String::new(),
            items: Vec::new(),
            current: 0,
            fill: false,
            on_changed: None,
            size: SizeSpec::auto(),
        }
    }
}

define_element!(SpinboxElement, SpinboxBuilder, SpinboxParams, "Spinbox");

impl SpinboxBuilder {
    pub fn label(self, label: impl Into<String>) -> Self {
        self.params.borrow_mut().label = label.into();
        self
    }

    pub fn items(self, items: Vec<String>) -> Self {
        self.params.borrow_mut().items = items;
        self
    }

    pub fn current_item(self, index: usize) -> Self {
        self.params.borrow_mut().current = index;
        self
    }

    pub fn fill(self, fill: bool) -> Self {
        self.params.borrow_mut().fill = fill;
        self
    }

    pub fn on_changed(self, callback: SelectionChanged<SpinboxElement>) -> Self {
        self.params.borrow_mut().on_changed = Some(callback);
        self
    }

    pub fn size(self, size: SizeSpec) -> Self {
        self.params.borrow_mut().size = size;
        self
    }
}

impl SpinboxElement {
    pub fn current(&self) -> usize {
        self.params.borrow().current
    }

    pub fn set_current(self: &Rc<Self>, index: usize) {
        let index = {
            let mut params = self.params.borrow_mut();
            let clamped = index.min(params.items.len().saturating_sub(1));
            params.current = clamped;
            clamped
        };
        let callback = self.params.borrow().on_changed.clone();
        if let Some(cb) = callback {
            cb(Rc::clone(self), index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn textbox_edit_notifies() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen2 = Rc::clone(&seen);
        let textbox = TextboxBuilder::new()
            .default_text("start")
            .on_text_edited(Rc::new(move |_, text| seen2.borrow_mut().push(text)))
            .commence();
        assert_eq!(textbox.current_text(), "start");
        textbox.set_text_from_user("edited");
        assert_eq!(textbox.current_text(), "edited");
        assert_eq!(*seen.borrow(), vec!["edited".to_string()]);
    }

    #[test]
    fn slider_clamps_and_snaps() {
        let slider = SliderBuilder::new().min(0.0).max(10.0).snap_int(true).commence();
        slider.set_value_from_user(3.4);
        assert_eq!(slider.value(), 3.0);
        slider.set_value_from_user(99.0);
        assert_eq!(slider.value(), 10.0);
    }

    #[test]
    fn checkbox_toggles() {
        let states = Rc::new(RefCell::new(Vec::new()));
        let states2 = Rc::clone(&states);
        let checkbox = CheckboxBuilder::new()
            .on_toggled(Rc::new(move |_, s| states2.borrow_mut().push(s)))
            .commence();
        checkbox.toggle_from_user();
        checkbox.toggle_from_user();
        assert_eq!(*states.borrow(), vec![true, false]);
    }

    #[test]
    fn combobox_selection_clamped() {
        let combobox = ComboboxBuilder::new()
            .items(vec!["a".into(), "b".into()])
            .commence();
        combobox.set_current(5);
        assert_eq!(combobox.current(), 1);
    }
}

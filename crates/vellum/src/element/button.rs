//! Push buttons.

use std::rc::Rc;

use crate::element::define_element;
use crate::types::{FontAlign, FontSize, SizeSpec};

pub type ButtonClick = Rc<dyn Fn(Rc<ButtonElement>)>;

pub struct ButtonParams {
    pub label: String,
    pub no_border: bool,
    pub no_bg: bool,
    pub align_text: FontAlign,
    pub font_family: Option<String>,
    pub font_size: FontSize,
    pub on_main_click: Option<ButtonClick>,
    pub on_right_click: Option<ButtonClick>,
    pub size: SizeSpec,
}

impl Default for ButtonParams {
    fn default() -> Self {
        Self {
            label: String::new(),
            no_border: false,
            no_bg: false,
            align_text: FontAlign::default(),
            font_family: None,
            font_size: FontSize::default(),
            on_main_click: None,
            on_right_click: None,
            size: SizeSpec::auto(),
        }
    }
}

define_element!(ButtonElement, ButtonBuilder, ButtonParams, "Button");

impl ButtonBuilder {
    pub fn label(self, label: impl Into<String>) -> Self {
        self.params.borrow_mut().label = label.into();
        self
    }

    pub fn no_border(self, no_border: bool) -> Self {
        self.params.borrow_mut().no_border = no_border;
        self
    }

    pub fn no_bg(self, no_bg: bool) -> Self {
        self.params.borrow_mut().no_bg = no_bg;
        self
    }

    pub fn align_text(self, align: FontAlign) -> Self {
        self.params.borrow_mut().align_text = align;
        self
    }

    pub fn font_family(self, family: impl Into<String>) -> Self {
        self.params.borrow_mut().font_family = Some(family.into());
        self
    }

    pub fn font_size(self, size: FontSize) -> Self {
        self.params.borrow_mut().font_size = size;
        self
    }

    pub fn on_main_click(self, callback: ButtonClick) -> Self {
        self.params.borrow_mut().on_main_click = Some(callback);
        self
    }

    pub fn on_right_click(self, callback: ButtonClick) -> Self {
        self.params.borrow_mut().on_right_click = Some(callback);
        self
    }

    pub fn size(self, size: SizeSpec) -> Self {
        self.params.borrow_mut().size = size;
        self
    }
}

impl ButtonElement {
    pub fn label(&self) -> String {
        self.params.borrow().label.clone()
    }

    /// Deliver a primary-button activation.
    pub fn press_main(self: &Rc<Self>) {
        let callback = self.params.borrow().on_main_click.clone();
        if let Some(cb) = callback {
            cb(Rc::clone(self));
        }
    }

    /// Deliver a secondary-button activation.
    pub fn press_right(self: &Rc<Self>) {
        let callback = self.params.borrow().on_right_click.clone();
        if let Some(cb) = callback {
            cb(Rc::clone(self));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn click_callbacks_receive_the_element() {
        let clicks = Rc::new(Cell::new(0));
        let clicks2 = Rc::clone(&clicks);
        let button = ButtonBuilder::new()
            .label("ok")
            .on_main_click(Rc::new(move |el| {
                assert_eq!(el.label(), "ok");
                clicks2.set(clicks2.get() + 1);
            }))
            .commence();
        button.press_main();
        button.press_main();
        assert_eq!(clicks.get(), 2);
        // no right-click handler: must be a silent no-op
        button.press_right();
    }
}

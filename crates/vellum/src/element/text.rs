//! Text labels.

use std::rc::Rc;

use crate::color::{Color, ColorFn, solid};
use crate::element::define_element;
use crate::math::Vec2;
use crate::palette::Palette;
use crate::types::{FontAlign, FontSize, SizeSpec};

pub struct TextParams {
    pub text: String,
    pub color: ColorFn,
    pub alpha: f32,
    pub font_size: FontSize,
    pub align: FontAlign,
    pub font_family: Option<String>,
    pub clamp_size: Option<Vec2>,
    pub on_changed: Option<Rc<dyn Fn()>>,
    pub no_ellipsize: bool,
    pub render_async: bool,
    pub size: SizeSpec,
}

impl Default for TextParams {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: solid(Palette::current().colors.text),
            alpha: 1.0,
            font_size: FontSize::default(),
            align: FontAlign::default(),
            font_family: None,
            clamp_size: None,
            on_changed: None,
            no_ellipsize: false,
            render_async: false,
            size: SizeSpec::auto(),
        }
    }
}

define_element!(TextElement, TextBuilder, TextParams, "Text");

impl TextBuilder {
    pub fn text(self, text: impl Into<String>) -> Self {
        self.params.borrow_mut().text = text.into();
        self
    }

    pub fn color(self, color: ColorFn) -> Self {
        self.params.borrow_mut().color = color;
        self
    }

    pub fn alpha(self, alpha: f32) -> Self {
        self.params.borrow_mut().alpha = alpha;
        self
    }

    pub fn font_size(self, size: FontSize) -> Self {
        self.params.borrow_mut().font_size = size;
        self
    }

    pub fn align(self, align: FontAlign) -> Self {
        self.params.borrow_mut().align = align;
        self
    }

    pub fn font_family(self, family: impl Into<String>) -> Self {
        self.params.borrow_mut().font_family = Some(family.into());
        self
    }

    pub fn clamp_size(self, max: Vec2) -> Self {
        self.params.borrow_mut().clamp_size = Some(max);
        self
    }

    /// Invoked after the text finished (re)rendering.
    pub fn on_changed(self, callback: Rc<dyn Fn()>) -> Self {
        self.params.borrow_mut().on_changed = Some(callback);
        self
    }

    pub fn no_ellipsize(self, no_ellipsize: bool) -> Self {
        self.params.borrow_mut().no_ellipsize = no_ellipsize;
        self
    }

    pub fn render_async(self, render_async: bool) -> Self {
        self.params.borrow_mut().render_async = render_async;
        self
    }

    pub fn size(self, size: SizeSpec) -> Self {
        self.params.borrow_mut().size = size;
        self
    }
}

impl TextElement {
    pub fn text(&self) -> String {
        self.params.borrow().text.clone()
    }

    /// Evaluate the color attribute now.
    pub fn current_color(&self) -> Color {
        let color = self.params.borrow().color.clone();
        color()
    }

    /// Fire the rendered-text-changed callback. Driven by the backend once
    /// a real renderer is attached; exposed for hosts that re-render.
    pub fn notify_changed(&self) {
        let callback = self.params.borrow().on_changed.clone();
        if let Some(cb) = callback {
            cb();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn build_and_rebuild_share_state() {
        let text = TextBuilder::new().text("hello").commence();
        assert_eq!(text.text(), "hello");

        let same = text.rebuild().text("world").commence();
        assert!(Rc::ptr_eq(&text, &same));
        assert_eq!(text.text(), "world");
    }

    #[test]
    fn changed_callback() {
        let fired = Rc::new(Cell::new(0));
        let fired2 = Rc::clone(&fired);
        let text = TextBuilder::new()
            .text("x")
            .on_changed(Rc::new(move || fired2.set(fired2.get() + 1)))
            .commence();
        text.notify_changed();
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn color_attribute_is_callable() {
        let text = TextBuilder::new().color(solid(Color::WHITE)).commence();
        assert_eq!(text.current_color(), Color::WHITE);
    }
}

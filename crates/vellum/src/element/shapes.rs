//! Non-interactive visuals: rectangle, image, spacer, line.

use std::path::PathBuf;

use crate::color::{Color, ColorFn, solid};
use crate::element::define_element;
use crate::math::Vec2;
use crate::palette::Palette;
use crate::types::{ImageFit, SizeSpec};

pub struct RectangleParams {
    pub color: ColorFn,
    /// `None` means "no border", which is distinct from a black border.
    pub border_color: Option<ColorFn>,
    pub rounding: i32,
    pub border_thickness: f64,
    pub size: SizeSpec,
}

impl Default for RectangleParams {
    fn default() -> Self {
        Self {
            color: solid(Palette::current().colors.base),
            border_color: None,
            rounding: 0,
            border_thickness: 0.0,
            size: SizeSpec::auto(),
        }
    }
}

define_element!(RectangleElement, RectangleBuilder, RectangleParams, "Rectangle");

impl RectangleBuilder {
    pub fn color(self, color: ColorFn) -> Self {
        self.params.borrow_mut().color = color;
        self
    }

    pub fn border_color(self, color: ColorFn) -> Self {
        self.params.borrow_mut().border_color = Some(color);
        self
    }

    pub fn rounding(self, rounding: i32) -> Self {
        self.params.borrow_mut().rounding = rounding;
        self
    }

    pub fn border_thickness(self, thickness: f64) -> Self {
        self.params.borrow_mut().border_thickness = thickness;
        self
    }

    pub fn size(self, size: SizeSpec) -> Self {
        self.params.borrow_mut().size = size;
        self
    }
}

impl RectangleElement {
    /// Evaluate the fill color attribute now.
    pub fn current_color(&self) -> Color {
        let color = self.params.borrow().color.clone();
        color()
    }

    /// Evaluate the border color attribute now; `None` when borderless.
    pub fn current_border_color(&self) -> Option<Color> {
        let color = self.params.borrow().border_color.clone();
        color.map(|f| f())
    }
}

pub struct ImageParams {
    pub path: Option<PathBuf>,
    pub icon: Option<String>,
    pub alpha: f32,
    pub fit: ImageFit,
    pub sync_load: bool,
    pub rounding: i32,
    pub size: SizeSpec,
}

impl Default for ImageParams {
    fn default() -> Self {
        Self {
            path: None,
            icon: None,
            alpha: 1.0,
            fit: ImageFit::default(),
            sync_load: false,
            rounding: 0,
            size: SizeSpec::auto(),
        }
    }
}

define_element!(ImageElement, ImageBuilder, ImageParams, "Image");

impl ImageBuilder {
    pub fn path(self, path: impl Into<PathBuf>) -> Self {
        self.params.borrow_mut().path = Some(path.into());
        self
    }

    pub fn icon(self, icon: impl Into<String>) -> Self {
        self.params.borrow_mut().icon = Some(icon.into());
        self
    }

    pub fn alpha(self, alpha: f32) -> Self {
        self.params.borrow_mut().alpha = alpha;
        self
    }

    pub fn fit(self, fit: ImageFit) -> Self {
        self.params.borrow_mut().fit = fit;
        self
    }

    pub fn sync_load(self, sync: bool) -> Self {
        self.params.borrow_mut().sync_load = sync;
        self
    }

    pub fn rounding(self, rounding: i32) -> Self {
        self.params.borrow_mut().rounding = rounding;
        self
    }

    pub fn size(self, size: SizeSpec) -> Self {
        self.params.borrow_mut().size = size;
        self
    }
}

/// An empty spacer element.
pub struct NullParams {
    pub size: SizeSpec,
}

impl Default for NullParams {
    fn default() -> Self {
        Self { size: SizeSpec::auto() }
    }
}

define_element!(NullElement, NullBuilder, NullParams, "Null");

impl NullBuilder {
    pub fn size(self, size: SizeSpec) -> Self {
        self.params.borrow_mut().size = size;
        self
    }
}

pub struct LineParams {
    pub color: ColorFn,
    pub thick: f64,
    pub points: Vec<Vec2>,
    pub size: SizeSpec,
}

impl Default for LineParams {
    fn default() -> Self {
        Self {
            color: solid(Palette::current().colors.text),
            thick: 1.0,
            points: Vec::new(),
            size: SizeSpec::auto(),
        }
    }
}

define_element!(LineElement, LineBuilder, LineParams, "Line");

impl LineBuilder {
    pub fn color(self, color: ColorFn) -> Self {
        self.params.borrow_mut().color = color;
        self
    }

    pub fn thick(self, thick: f64) -> Self {
        self.params.borrow_mut().thick = thick;
        self
    }

    pub fn points(self, points: Vec<Vec2>) -> Self {
        self.params.borrow_mut().points = points;
        self
    }

    pub fn size(self, size: SizeSpec) -> Self {
        self.params.borrow_mut().size = size;
        self
    }
}

impl LineElement {
    pub fn points(&self) -> Vec<Vec2> {
        self.params.borrow().points.clone()
    }

    /// Evaluate the color attribute now.
    pub fn current_color(&self) -> Color {
        let color = self.params.borrow().color.clone();
        color()
    }
}

//! Sizing and font types shared by builders and the palette.

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::math::Vec2;
use crate::palette::Palette;

/// How one axis of a size request is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum SizeUnit {
    Absolute = 0,
    Percent = 1,
    Auto = 2,
}

/// A per-axis size request resolved against a parent extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeSpec {
    pub unit_x: SizeUnit,
    pub unit_y: SizeUnit,
    pub value: Vec2,
}

impl SizeSpec {
    pub fn new(unit_x: SizeUnit, unit_y: SizeUnit, value: Vec2) -> Self {
        Self { unit_x, unit_y, value }
    }

    pub fn absolute(w: f64, h: f64) -> Self {
        Self::new(SizeUnit::Absolute, SizeUnit::Absolute, Vec2::new(w, h))
    }

    pub fn percent(w: f64, h: f64) -> Self {
        Self::new(SizeUnit::Percent, SizeUnit::Percent, Vec2::new(w, h))
    }

    pub fn auto() -> Self {
        Self::new(SizeUnit::Auto, SizeUnit::Auto, Vec2::ZERO)
    }

    /// Resolve against the parent's extent. `Auto` resolves to zero here;
    /// a real layout pass would substitute content size.
    pub fn calculate(&self, parent: Vec2) -> Vec2 {
        let axis = |unit: SizeUnit, v: f64, p: f64| match unit {
            SizeUnit::Absolute => v,
            SizeUnit::Percent => p * v / 100.0,
            SizeUnit::Auto => 0.0,
        };
        Vec2::new(
            axis(self.unit_x, self.value.x, parent.x),
            axis(self.unit_y, self.value.y, parent.y),
        )
    }
}

impl Default for SizeSpec {
    fn default() -> Self {
        Self::auto()
    }
}

/// The base a font size scales from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum FontBase {
    H1 = 0,
    H2 = 1,
    H3 = 2,
    Text = 3,
    Small = 4,
    Absolute = 5,
}

/// A font size: a palette base times a multiplier, or an absolute point size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSize {
    pub base: FontBase,
    pub scale: f32,
}

impl FontSize {
    pub fn new(base: FontBase, scale: f32) -> Self {
        Self { base, scale }
    }

    pub fn pt_size(&self, palette: &Palette) -> f32 {
        let base = match self.base {
            FontBase::H1 => palette.vars.h1_size,
            FontBase::H2 => palette.vars.h2_size,
            FontBase::H3 => palette.vars.h3_size,
            FontBase::Text => palette.vars.font_size,
            FontBase::Small => palette.vars.small_font_size,
            FontBase::Absolute => 1.0,
        };
        base * self.scale
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self::new(FontBase::Text, 1.0)
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum FontAlign {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// How an image is fit into its element box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ImageFit {
    #[default]
    Stretch = 0,
    Cover = 1,
    Contain = 2,
    Tile = 3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_calculate() {
        let parent = Vec2::new(200.0, 100.0);
        assert_eq!(SizeSpec::absolute(50.0, 40.0).calculate(parent), Vec2::new(50.0, 40.0));
        assert_eq!(SizeSpec::percent(50.0, 10.0).calculate(parent), Vec2::new(100.0, 10.0));
        assert_eq!(SizeSpec::auto().calculate(parent), Vec2::ZERO);
        let mixed = SizeSpec::new(SizeUnit::Absolute, SizeUnit::Percent, Vec2::new(30.0, 100.0));
        assert_eq!(mixed.calculate(parent), Vec2::new(30.0, 100.0));
    }

    #[test]
    fn font_pt_size_uses_palette() {
        let palette = Palette::empty();
        let size = FontSize::new(FontBase::Text, 2.0);
        assert_eq!(size.pt_size(&palette), palette.vars.font_size * 2.0);
        let abs = FontSize::new(FontBase::Absolute, 17.0);
        assert_eq!(abs.pt_size(&palette), 17.0);
    }
}

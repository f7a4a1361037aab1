//! Layout containers: column, row, scroll area.

use crate::element::define_element;
use crate::math::Vec2;
use crate::types::SizeSpec;

pub struct ColumnLayoutParams {
    pub gap: f64,
    pub size: SizeSpec,
}

impl Default for ColumnLayoutParams {
    fn default() -> Self {
        Self { gap: 0.0, size: SizeSpec::auto() }
    }
}

define_element!(ColumnLayoutElement, ColumnLayoutBuilder, ColumnLayoutParams, "ColumnLayout");

impl ColumnLayoutBuilder {
    pub fn gap(self, gap: f64) -> Self {
        self.params.borrow_mut().gap = gap;
        self
    }

    pub fn size(self, size: SizeSpec) -> Self {
        self.params.borrow_mut().size = size;
        self
    }
}

impl ColumnLayoutElement {
    pub fn gap(&self) -> f64 {
        self.params.borrow().gap
    }
}

pub struct RowLayoutParams {
    pub gap: f64,
    pub size: SizeSpec,
}

impl Default for RowLayoutParams {
    fn default() -> Self {
        Self { gap: 0.0, size: SizeSpec::auto() }
    }
}

define_element!(RowLayoutElement, RowLayoutBuilder, RowLayoutParams, "RowLayout");

impl RowLayoutBuilder {
    pub fn gap(self, gap: f64) -> Self {
        self.params.borrow_mut().gap = gap;
        self
    }

    pub fn size(self, size: SizeSpec) -> Self {
        self.params.borrow_mut().size = size;
        self
    }
}

impl RowLayoutElement {
    pub fn gap(&self) -> f64 {
        self.params.borrow().gap
    }
}

pub struct ScrollAreaParams {
    pub scroll_x: bool,
    pub scroll_y: bool,
    pub block_user_scroll: bool,
    pub size: SizeSpec,
    /// Live scroll offset.
    pub scroll: Vec2,
}

impl Default for ScrollAreaParams {
    fn default() -> Self {
        Self {
            scroll_x: false,
            scroll_y: true,
            block_user_scroll: false,
            size: SizeSpec::auto(),
            scroll: Vec2::ZERO,
        }
    }
}

define_element!(ScrollAreaElement, ScrollAreaBuilder, ScrollAreaParams, "ScrollArea");

impl ScrollAreaBuilder {
    pub fn scroll_x(self, enabled: bool) -> Self {
        self.params.borrow_mut().scroll_x = enabled;
        self
    }

    pub fn scroll_y(self, enabled: bool) -> Self {
        self.params.borrow_mut().scroll_y = enabled;
        self
    }

    pub fn block_user_scroll(self, block: bool) -> Self {
        self.params.borrow_mut().block_user_scroll = block;
        self
    }

    pub fn size(self, size: SizeSpec) -> Self {
        self.params.borrow_mut().size = size;
        self
    }
}

impl ScrollAreaElement {
    pub fn scroll(&self) -> Vec2 {
        self.params.borrow().scroll
    }

    pub fn set_scroll(&self, scroll: Vec2) {
        self.params.borrow_mut().scroll = scroll;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, add_child};
    use std::rc::Rc;

    #[test]
    fn layouts_hold_children() {
        let column: Rc<dyn Element> = ColumnLayoutBuilder::new().gap(4.0).commence();
        let row: Rc<dyn Element> = RowLayoutBuilder::new().commence();
        add_child(&column, row.clone());
        assert_eq!(column.base().child_count(), 1);
        assert_eq!(row.base().parent().map(|p| p.type_name()), Some("ColumnLayout"));
    }

    #[test]
    fn scroll_offset_round_trip() {
        let area = ScrollAreaBuilder::new().scroll_x(true).commence();
        area.set_scroll(Vec2::new(0.0, 42.0));
        assert_eq!(area.scroll(), Vec2::new(0.0, 42.0));
    }
}

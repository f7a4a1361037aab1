//! Resolution of a dynamic Lua value into a base element handle.
//!
//! Lua sees one userdata class per concrete element kind and cannot upcast
//! between them, so every operation accepting "any element" funnels through
//! [`resolve_element`]. The acceptable concrete classes form a closed set,
//! declared once below; adding an element kind means adding one line here.
//! The classes are disjoint — a value matches at most one — so probe order
//! only affects the speed of the common case, never the outcome.

use mlua::{AnyUserData, UserData, Value};
use vellum::DynElement;

use crate::bindings::builders::{
    LuaButton, LuaCheckbox, LuaColumnLayout, LuaCombobox, LuaImage, LuaLine, LuaNull,
    LuaRectangle, LuaRowLayout, LuaScrollArea, LuaSlider, LuaSpinbox, LuaText, LuaTextbox,
};
use crate::bindings::element::LuaElement;

/// Implemented by every userdata wrapper that can stand in for a base
/// element handle.
pub trait AsElement {
    /// The wrapped element, if the handle is still live.
    fn as_element(&self) -> Option<DynElement>;
}

/// One member of the closed element class set.
pub struct ElementClass {
    pub name: &'static str,
    probe: fn(&AnyUserData) -> Option<DynElement>,
}

fn probe<W>(ud: &AnyUserData) -> Option<DynElement>
where
    W: AsElement + UserData + 'static,
{
    ud.borrow::<W>().ok().and_then(|wrapper| wrapper.as_element())
}

/// The closed, build-time-fixed set of classes convertible to a base
/// element handle. Base-typed wrappers first: they are what other bindings
/// hand out, so they are the common case.
static ELEMENT_CLASSES: [ElementClass; 15] = [
    ElementClass { name: "Element", probe: probe::<LuaElement> },
    ElementClass { name: "Text", probe: probe::<LuaText> },
    ElementClass { name: "Button", probe: probe::<LuaButton> },
    ElementClass { name: "Textbox", probe: probe::<LuaTextbox> },
    ElementClass { name: "Checkbox", probe: probe::<LuaCheckbox> },
    ElementClass { name: "Slider", probe: probe::<LuaSlider> },
    ElementClass { name: "Combobox", probe: probe::<LuaCombobox> },
    ElementClass { name: "Spinbox", probe: probe::<LuaSpinbox> },
    ElementClass { name: "Rectangle", probe: probe::<LuaRectangle> },
    ElementClass { name: "ColumnLayout", probe: probe::<LuaColumnLayout> },
    ElementClass { name: "RowLayout", probe: probe::<LuaRowLayout> },
    ElementClass { name: "ScrollArea", probe: probe::<LuaScrollArea> },
    ElementClass { name: "Image", probe: probe::<LuaImage> },
    ElementClass { name: "Null", probe: probe::<LuaNull> },
    ElementClass { name: "Line", probe: probe::<LuaLine> },
];

pub fn element_classes() -> &'static [ElementClass] {
    &ELEMENT_CLASSES
}

/// Convert a Lua value to a base element handle.
///
/// Fails with a script-visible error naming `operation` when the value is
/// not (or no longer) a live element of a known class. The caller must not
/// have mutated anything before calling this, so a failed resolution leaves
/// every collection untouched.
pub fn resolve_element(operation: &'static str, value: &Value) -> mlua::Result<DynElement> {
    if let Value::UserData(ud) = value {
        for class in element_classes() {
            if let Some(element) = (class.probe)(ud) {
                return Ok(element);
            }
        }
    }
    Err(mlua::Error::RuntimeError(format!(
        "{operation}: argument is not a valid element type"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlua::Lua;
    use vellum::Element;
    use vellum::element::{NullBuilder, TextBuilder};

    #[test]
    fn resolves_each_concrete_class() {
        let lua = Lua::new();
        let text = lua.create_userdata(LuaText::new(TextBuilder::new().commence())).unwrap();
        let resolved = resolve_element("addChild", &Value::UserData(text)).unwrap();
        assert_eq!(resolved.type_name(), "Text");

        let null = lua.create_userdata(LuaNull::new(NullBuilder::new().commence())).unwrap();
        let resolved = resolve_element("addChild", &Value::UserData(null)).unwrap();
        assert_eq!(resolved.type_name(), "Null");
    }

    #[test]
    fn rejects_foreign_values_with_the_operation_name() {
        let err = resolve_element("addChild", &Value::Integer(5)).err().unwrap();
        assert!(err.to_string().contains("addChild: argument is not a valid element type"));

        struct Foreign;
        impl UserData for Foreign {}
        let lua = Lua::new();
        let foreign = lua.create_userdata(Foreign).unwrap();
        let err = resolve_element("removeChild", &Value::UserData(foreign)).err().unwrap();
        assert!(err.to_string().contains("removeChild"));
    }

    #[test]
    fn classes_are_disjoint() {
        let lua = Lua::new();
        let text = lua.create_userdata(LuaText::new(TextBuilder::new().commence())).unwrap();
        let matches = element_classes()
            .iter()
            .filter(|c| (c.probe)(&text).is_some())
            .count();
        assert_eq!(matches, 1);
    }
}

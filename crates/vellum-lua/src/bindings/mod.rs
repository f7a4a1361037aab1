//! Per-type Lua bindings: the enumeration of constructors, fields,
//! methods, operators, and enum namespaces for every bound native type.
//!
//! The marshaling rules live one level up (`handle`, `callback`, `expr`,
//! `resolve`); these modules apply them, type by type.

pub mod builders;
pub mod core;
pub mod element;
pub mod types;
pub mod window;

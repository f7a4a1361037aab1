//! Vellum — a headless, reference-counted GUI object model.
//!
//! This crate holds the native side of the embedding: value types, the
//! element tree, builders, windows, timers, and a single-threaded event
//! loop. It deliberately does no rendering, layout solving, or text
//! shaping — it is the object graph a scripting layer binds against.
//!
//! # Ownership
//!
//! Elements, windows, and the backend are single-thread reference counted
//! (`Rc`). Timers are handed out as `Arc` because their refcount may be
//! released from a thread other than the loop thread. Parent links inside
//! the element tree are weak.

pub mod backend;
pub mod color;
pub mod element;
pub mod error;
pub mod input;
pub mod math;
pub mod output;
pub mod palette;
pub mod timer;
pub mod types;
pub mod window;

pub use backend::Backend;
pub use color::{Color, ColorFn};
pub use element::{DynElement, Element, ElementBase, PositionFlags, PositionMode, WeakElement};
pub use error::BackendError;
pub use input::{KeyEvent, Modifiers, MouseButton, ScrollAxis};
pub use math::{Rect, Vec2};
pub use output::{IconDescription, Output, SystemIcons};
pub use palette::Palette;
pub use timer::Timer;
pub use types::{FontAlign, FontBase, FontSize, ImageFit, SizeSpec, SizeUnit};
pub use window::{Window, WindowBuilder, WindowKind};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

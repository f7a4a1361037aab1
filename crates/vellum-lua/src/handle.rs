//! Script-visible handles over the three native ownership disciplines.
//!
//! Every access from a binding goes through [`Handle::resolve`]; an empty
//! or expired handle yields `None`, which bindings present to Lua as `nil`.
//! Resolution never panics and never hands out a pointer that can outlive
//! its refcount: the returned [`Strong`] guard owns a strong reference for
//! the duration of the access.

use std::ops::Deref;
use std::rc::{Rc, Weak};
use std::sync::Arc;

/// A native reference under one of three ownership disciplines.
///
/// - `Shared`: strong, single-thread refcounted. Empty only if constructed
///   empty (the native side cleared it before wrapping).
/// - `Weak`: non-owning observer of a `Shared` object; expires when the
///   last strong owner releases.
/// - `Atomic`: strong with a thread-safe refcount, for objects whose last
///   reference may drop on another thread (timers).
pub enum Handle<T: ?Sized> {
    Shared(Option<Rc<T>>),
    Weak(Weak<T>),
    Atomic(Option<Arc<T>>),
}

impl<T: ?Sized> Handle<T> {
    pub fn shared(value: Rc<T>) -> Self {
        Handle::Shared(Some(value))
    }

    pub fn weak(value: &Rc<T>) -> Self {
        Handle::Weak(Rc::downgrade(value))
    }

    pub fn atomic(value: Arc<T>) -> Self {
        Handle::Atomic(Some(value))
    }

    /// Whether resolving would currently succeed.
    pub fn is_live(&self) -> bool {
        match self {
            Handle::Shared(inner) => inner.is_some(),
            Handle::Weak(weak) => weak.strong_count() > 0,
            Handle::Atomic(inner) => inner.is_some(),
        }
    }

    /// Promote to a strong guard for one access. Weak handles are promoted
    /// to a temporary strong reference that is dropped with the guard, never
    /// retained. For atomic handles the promotion is a refcount increment,
    /// so a concurrent release on another thread cannot free the object
    /// while the guard lives.
    pub fn resolve(&self) -> Option<Strong<T>> {
        match self {
            Handle::Shared(inner) => inner.clone().map(Strong::Local),
            Handle::Weak(weak) => weak.upgrade().map(Strong::Local),
            Handle::Atomic(inner) => inner.clone().map(Strong::Atomic),
        }
    }

    /// Resolve to an `Rc` for the single-thread disciplines. Atomic handles
    /// return `None`: nothing `Rc`-owned is ever wrapped atomically.
    pub fn resolve_local(&self) -> Option<Rc<T>> {
        match self {
            Handle::Shared(inner) => inner.clone(),
            Handle::Weak(weak) => weak.upgrade(),
            Handle::Atomic(_) => None,
        }
    }
}

impl<T: ?Sized> Clone for Handle<T> {
    fn clone(&self) -> Self {
        match self {
            Handle::Shared(inner) => Handle::Shared(inner.clone()),
            Handle::Weak(weak) => Handle::Weak(weak.clone()),
            Handle::Atomic(inner) => Handle::Atomic(inner.clone()),
        }
    }
}

/// A strong reference held for the duration of one access.
pub enum Strong<T: ?Sized> {
    Local(Rc<T>),
    Atomic(Arc<T>),
}

impl<T: ?Sized> Deref for Strong<T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self {
            Strong::Local(rc) => rc,
            Strong::Atomic(arc) => arc,
        }
    }
}

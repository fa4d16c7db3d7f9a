use alloc::boxed::Box;
use core::fmt;

use crate::{Size, Vec2};

/// A reusable view node managed by the engine.
///
/// The engine never inspects the node beyond these two hooks: it toggles activation when the
/// node moves between the pool and the visible window, and it places the node's top-left corner
/// in content coordinates.
pub trait ItemView {
    fn set_active(&mut self, active: bool);
    fn set_position(&mut self, position: Vec2);
}

/// Callback used to populate a freshly bound (or refreshed) instance with the data at `index`.
pub type ItemUpdateCallback<T> = Box<dyn FnMut(&mut T, usize)>;

/// Prototype for pooled instances: the uniform item size plus a factory.
pub struct ItemTemplate<T> {
    size: Size,
    factory: Box<dyn FnMut() -> T>,
}

impl<T> ItemTemplate<T> {
    pub fn new(size: Size, factory: impl FnMut() -> T + 'static) -> Self {
        Self {
            size,
            factory: Box::new(factory),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn instantiate(&mut self) -> T {
        (self.factory)()
    }
}

impl<T> fmt::Debug for ItemTemplate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemTemplate")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

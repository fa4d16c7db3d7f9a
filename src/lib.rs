//! A headless, pooled loop-scroll engine.
//!
//! Given an arbitrarily large item count, [`LoopScroll`] keeps only the items intersecting the
//! viewport bound to view instances, and recycles those instances through a small FIFO pool as
//! the viewport moves. Three layouts are supported: vertical lists, horizontal lists and grids
//! with a fixed column (or row) count.
//!
//! It is UI-agnostic. A GUI layer is expected to provide:
//! - an item template (uniform item size + a factory for view instances)
//! - viewport size and scroll offset changes
//! - layout passes, an end-of-pass notification and per-frame time ticks
//!
//! In return the engine positions instances, binds them through the item-update callback, and
//! reports the content size and (for animated jumps) the scroll offset to apply.
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

mod anchor;
mod error;
mod item;
mod layout;
mod loop_scroll;
mod options;
mod pool;
mod tween;
mod types;


pub use error::ConfigError;
pub use item::{ItemTemplate, ItemUpdateCallback, ItemView};
pub use layout::{
    Constraint, GridLayout, Layout, LayoutContext, LayoutStrategy, LinearLayout,
};
pub use loop_scroll::LoopScroll;
pub use options::{DEFAULT_SCROLL_TO_DURATION, LoopScrollOptions};
pub use tween::{Easing, ScrollTween};
pub use types::{Align, Axis, IndexRange, Padding, Phase, PoolStats, Size, Vec2};

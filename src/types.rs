//! Plain geometry and configuration values shared by the engine and the layouts.
//!
//! Content coordinates have their origin at the content's top-left corner, with `x` growing to
//! the right and `y` growing downwards. Scroll offsets use the same space: an offset of
//! `(0, 250)` means the viewport's top edge sits 250 units below the content's top edge.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Placement of an item (or a block of items) inside the space available on one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

impl Align {
    /// Fraction of the surplus space placed before the aligned content.
    pub fn factor(self) -> f32 {
        match self {
            Self::Start => 0.0,
            Self::Center => 0.5,
            Self::End => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    pub fn set_along(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Horizontal => self.x = value,
            Axis::Vertical => self.y = value,
        }
    }

    /// Builds a vector from its main-axis and cross-axis components.
    pub fn from_axes(main_axis: Axis, main: f32, cross: f32) -> Self {
        match main_axis {
            Axis::Horizontal => Self { x: main, y: cross },
            Axis::Vertical => Self { x: cross, y: main },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn from_axes(main_axis: Axis, main: f32, cross: f32) -> Self {
        match main_axis {
            Axis::Horizontal => Self {
                width: main,
                height: cross,
            },
            Axis::Vertical => Self {
                width: cross,
                height: main,
            },
        }
    }

    pub(crate) fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

/// Per-edge insets between the content bounds and the laid-out items.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Padding {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// The inset on the near edge (left or top) of `axis`.
    pub fn near(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Sum of both insets on `axis`.
    pub fn total(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.left + self.right,
            Axis::Vertical => self.top + self.bottom,
        }
    }

    pub(crate) fn is_valid(self) -> bool {
        [self.left, self.right, self.top, self.bottom]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// An inclusive range of logical item indexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexRange {
    pub start: usize,
    pub end: usize, // inclusive
}

impl IndexRange {
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }

    pub fn iter(&self) -> core::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Snapshot of the instance bookkeeping.
///
/// `active + pooled + staged == created` holds after every public call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolStats {
    pub active: usize,
    pub pooled: usize,
    pub staged: usize,
    pub created: usize,
}

/// Observable lifecycle phase of the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// No data has been provided yet.
    #[default]
    Idle,
    /// Data changed; the next layout pass builds the new visible window.
    LayoutPending,
    /// A layout pass ran after a data change and the anchor restore runs at the end of the pass.
    RestoringPosition,
    /// The visible window matches the current data and scroll offset.
    RangeComputed,
    /// The scroll offset moved (by the container or an animation) since the last layout pass.
    Scrolling,
}

//! Axis-specific layout math.
//!
//! Every layout arranges items in *lines* along its scroll axis. A linear list has one item per
//! line; a grid packs `constraint.count()` items per line. The helpers in this module implement
//! the line math shared by both.

mod grid;
mod linear;

pub use grid::{Constraint, GridLayout};
pub use linear::LinearLayout;

use crate::{Align, Axis, ConfigError, IndexRange, Padding, Size, Vec2};

/// Geometry snapshot handed to a layout strategy for one pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutContext {
    pub total_count: usize,
    pub item_size: Size,
    pub spacing: f32,
    pub padding: Padding,
    pub viewport: Size,
    /// Final content size: at least the viewport on every axis.
    pub content_size: Size,
    pub scroll_offset: Vec2,
    pub align_horizontal: Align,
    pub align_vertical: Align,
}

impl LayoutContext {
    pub fn align(&self, axis: Axis) -> Align {
        match axis {
            Axis::Horizontal => self.align_horizontal,
            Axis::Vertical => self.align_vertical,
        }
    }

    /// Distance between the starts of two consecutive lines on `axis`.
    pub fn stride(&self, axis: Axis) -> f32 {
        self.item_size.along(axis) + self.spacing
    }
}

/// The capability set every layout variant provides to the engine.
pub trait LayoutStrategy {
    /// The axis along which the content scrolls.
    fn scroll_axis(&self) -> Axis;

    /// Number of logical items sharing one line across the scroll axis.
    fn items_per_line(&self) -> usize;

    /// Total content size along the scroll axis, padding included.
    fn content_extent(&self, cx: &LayoutContext) -> f32 {
        let lines = line_count(cx.total_count, self.items_per_line());
        lines_extent(cx, self.scroll_axis(), lines)
    }

    /// Indexes intersecting the viewport, or `None` when nothing is visible.
    fn visible_range(&self, cx: &LayoutContext) -> Option<IndexRange>;

    /// Top-left corner of the item at `index` in content coordinates.
    fn item_position(&self, cx: &LayoutContext, index: usize) -> Vec2;

    /// Scroll offset (along the scroll axis) that puts the line holding `index` at the
    /// viewport's near edge.
    fn index_offset(&self, cx: &LayoutContext, index: usize) -> f32 {
        let axis = self.scroll_axis();
        let line = index / self.items_per_line().max(1);
        cx.padding.near(axis) + line as f32 * cx.stride(axis)
    }

    /// First logical index of the line at the viewport's near edge.
    fn first_visible_index(&self, cx: &LayoutContext) -> usize {
        let axis = self.scroll_axis();
        let stride = cx.stride(axis);
        if !(stride > 0.0) {
            return 0;
        }
        let extent = self.content_extent(cx);
        let line = floor_line(line_distance(cx, axis, extent) / stride);
        line.saturating_mul(self.items_per_line())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// The closed set of layouts the engine can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layout {
    Linear(LinearLayout),
    Grid(GridLayout),
}

impl Layout {
    pub fn vertical() -> Self {
        Self::Linear(LinearLayout::new(Axis::Vertical))
    }

    pub fn horizontal() -> Self {
        Self::Linear(LinearLayout::new(Axis::Horizontal))
    }

    pub fn grid(constraint: Constraint) -> Self {
        Self::Grid(GridLayout::new(constraint))
    }

    pub fn strategy(&self) -> &dyn LayoutStrategy {
        match self {
            Self::Linear(l) => l,
            Self::Grid(g) => g,
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::vertical()
    }
}

pub(crate) fn line_count(total_count: usize, per_line: usize) -> usize {
    if per_line == 0 {
        return 0;
    }
    total_count.div_ceil(per_line)
}

pub(crate) fn lines_extent(cx: &LayoutContext, axis: Axis, lines: usize) -> f32 {
    let gaps = lines.saturating_sub(1) as f32;
    cx.item_size.along(axis) * lines as f32 + cx.spacing * gaps + cx.padding.total(axis)
}

/// Offset of the item block when the content is larger than what the items need.
pub(crate) fn block_lead(cx: &LayoutContext, axis: Axis, extent: f32) -> f32 {
    let surplus = (cx.content_size.along(axis) - extent).max(0.0);
    surplus * cx.align(axis).factor()
}

/// Distance from the first line's start to the viewport's near edge.
pub(crate) fn line_distance(cx: &LayoutContext, axis: Axis, extent: f32) -> f32 {
    cx.scroll_offset.along(axis) - cx.padding.near(axis) - block_lead(cx, axis, extent)
}

/// Lines touched by the viewport as `(floor(near), ceil(far))`, unclamped above.
pub(crate) fn line_window(cx: &LayoutContext, axis: Axis, extent: f32) -> Option<(usize, usize)> {
    let stride = cx.stride(axis);
    if !(stride > 0.0) || !stride.is_finite() {
        return None;
    }
    let near = line_distance(cx, axis, extent);
    let far = near + cx.viewport.along(axis);
    let start = floor_line(near / stride);
    let end = ceil_line(far / stride);
    Some((start, end))
}

/// Cross-axis coordinate of a block of `slots` items aligned in the available cross space.
pub(crate) fn cross_block_start(cx: &LayoutContext, cross: Axis, slots: usize) -> f32 {
    let item = cx.item_size.along(cross);
    let block = item * slots as f32 + cx.spacing * slots.saturating_sub(1) as f32;
    let available = cx.content_size.along(cross) - cx.padding.total(cross);
    cx.padding.near(cross) + (available - block) * cx.align(cross).factor()
}

fn floor_line(v: f32) -> usize {
    // Negative and NaN distances saturate to line 0.
    v.floor().max(0.0) as usize
}

fn ceil_line(v: f32) -> usize {
    v.ceil().max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cx(total_count: usize, offset: f32) -> LayoutContext {
        LayoutContext {
            total_count,
            item_size: Size::new(100.0, 50.0),
            spacing: 0.0,
            padding: Padding::default(),
            viewport: Size::new(100.0, 500.0),
            content_size: Size::new(100.0, 500.0_f32.max(50.0 * total_count as f32)),
            scroll_offset: Vec2::new(0.0, offset),
            align_horizontal: Align::Start,
            align_vertical: Align::Start,
        }
    }

    #[test]
    fn line_count_rounds_up() {
        assert_eq!(line_count(0, 4), 0);
        assert_eq!(line_count(1, 4), 1);
        assert_eq!(line_count(8, 4), 2);
        assert_eq!(line_count(9, 4), 3);
        assert_eq!(line_count(9, 0), 0);
    }

    #[test]
    fn line_window_floors_near_and_ceils_far_edge() {
        let c = cx(1000, 125.0);
        let extent = lines_extent(&c, Axis::Vertical, 1000);
        assert_eq!(line_window(&c, Axis::Vertical, extent), Some((2, 13)));
    }

    #[test]
    fn zero_stride_has_no_window() {
        let mut c = cx(10, 0.0);
        c.item_size = Size::ZERO;
        assert_eq!(line_window(&c, Axis::Vertical, 0.0), None);
    }

    #[test]
    fn block_lead_follows_alignment_when_content_is_short() {
        let mut c = cx(4, 0.0);
        c.align_vertical = Align::Center;
        let extent = lines_extent(&c, Axis::Vertical, 4);
        assert_eq!(extent, 200.0);
        assert_eq!(block_lead(&c, Axis::Vertical, extent), 150.0);
    }
}

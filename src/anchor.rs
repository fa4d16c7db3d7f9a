use crate::layout::{LayoutContext, LayoutStrategy};

/// A position restore scheduled by a data-count change.
///
/// The restore must not run before a layout pass has settled the new geometry; `settled` flips
/// when that pass completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PendingRestore {
    pub(crate) index: usize,
    pub(crate) settled: bool,
}

impl PendingRestore {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            settled: false,
        }
    }
}

/// Captures the first visible index of the current data set.
///
/// Returns `None` when there is no data or the viewport already sits on index 0, since restoring
/// the top of the list is what a fresh layout does anyway.
pub(crate) fn capture_first_visible_anchor(
    layout: &dyn LayoutStrategy,
    cx: &LayoutContext,
) -> Option<usize> {
    if cx.total_count == 0 {
        return None;
    }
    let index = layout.first_visible_index(cx);
    (index > 0).then_some(index)
}

/// Scroll offset along the layout's scroll axis that brings `index` back to the near edge.
///
/// The index is clamped to the current data set and the offset to the scrollable range.
pub(crate) fn anchor_offset(
    layout: &dyn LayoutStrategy,
    cx: &LayoutContext,
    index: usize,
) -> Option<f32> {
    if cx.total_count == 0 {
        return None;
    }
    let index = index.min(cx.total_count - 1);
    let axis = layout.scroll_axis();
    let max = (layout.content_extent(cx) - cx.viewport.along(axis)).max(0.0);
    Some(layout.index_offset(cx, index).clamp(0.0, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Align, Axis, LinearLayout, Padding, Size, Vec2};

    fn cx(total_count: usize, offset: f32) -> LayoutContext {
        LayoutContext {
            total_count,
            item_size: Size::new(10.0, 20.0),
            spacing: 0.0,
            padding: Padding::default(),
            viewport: Size::new(10.0, 100.0),
            content_size: Size::new(10.0, (20.0 * total_count as f32).max(100.0)),
            scroll_offset: Vec2::new(0.0, offset),
            align_horizontal: Align::Start,
            align_vertical: Align::Start,
        }
    }

    #[test]
    fn top_of_list_needs_no_anchor() {
        let l = LinearLayout::new(Axis::Vertical);
        assert_eq!(capture_first_visible_anchor(&l, &cx(50, 0.0)), None);
        assert_eq!(capture_first_visible_anchor(&l, &cx(0, 300.0)), None);
        assert_eq!(capture_first_visible_anchor(&l, &cx(50, 300.0)), Some(15));
    }

    #[test]
    fn anchor_offset_clamps_index_and_scroll_range() {
        let l = LinearLayout::new(Axis::Vertical);
        assert_eq!(anchor_offset(&l, &cx(50, 0.0), 15), Some(300.0));
        // index 40 of 10 items clamps to 9; offset 180 clamps to 200 - 100
        assert_eq!(anchor_offset(&l, &cx(10, 0.0), 40), Some(100.0));
        assert_eq!(anchor_offset(&l, &cx(0, 0.0), 3), None);
    }
}

use super::{
    LayoutContext, LayoutStrategy, block_lead, cross_block_start, line_window, lines_extent,
};
use crate::{Axis, IndexRange, Vec2};

/// A single-axis list: one item per line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearLayout {
    pub axis: Axis,
}

impl LinearLayout {
    pub fn new(axis: Axis) -> Self {
        Self { axis }
    }
}

impl LayoutStrategy for LinearLayout {
    fn scroll_axis(&self) -> Axis {
        self.axis
    }

    fn items_per_line(&self) -> usize {
        1
    }

    fn visible_range(&self, cx: &LayoutContext) -> Option<IndexRange> {
        let count = cx.total_count;
        if count == 0 {
            return None;
        }
        let extent = lines_extent(cx, self.axis, count);
        let (start, end) = line_window(cx, self.axis, extent)?;
        let end = end.min(count - 1);
        (start <= end).then_some(IndexRange { start, end })
    }

    fn item_position(&self, cx: &LayoutContext, index: usize) -> Vec2 {
        let axis = self.axis;
        let extent = lines_extent(cx, axis, cx.total_count);
        let main =
            cx.padding.near(axis) + block_lead(cx, axis, extent) + index as f32 * cx.stride(axis);
        let cross = cross_block_start(cx, axis.cross(), 1);
        Vec2::from_axes(axis, main, cross)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Align, Padding, Size};

    fn horizontal_cx(offset: f32) -> LayoutContext {
        LayoutContext {
            total_count: 20,
            item_size: Size::new(40.0, 30.0),
            spacing: 10.0,
            padding: Padding::new(5.0, 5.0, 2.0, 2.0),
            viewport: Size::new(200.0, 100.0),
            content_size: Size::new(1000.0, 100.0),
            scroll_offset: Vec2::new(offset, 0.0),
            align_horizontal: Align::Start,
            align_vertical: Align::Center,
        }
    }

    #[test]
    fn horizontal_extent_counts_spacing_between_items_only() {
        let l = LinearLayout::new(Axis::Horizontal);
        // 20 * 40 + 19 * 10 + 10
        assert_eq!(l.content_extent(&horizontal_cx(0.0)), 1000.0);
    }

    #[test]
    fn horizontal_range_accounts_for_padding() {
        let l = LinearLayout::new(Axis::Horizontal);
        // distance = 105 - 5 = 100 => floor(100 / 50) = 2, ceil(300 / 50) = 6
        let r = l.visible_range(&horizontal_cx(105.0)).unwrap();
        assert_eq!((r.start, r.end), (2, 6));
    }

    #[test]
    fn horizontal_items_center_on_cross_axis() {
        let l = LinearLayout::new(Axis::Horizontal);
        let p = l.item_position(&horizontal_cx(0.0), 3);
        assert_eq!(p.x, 5.0 + 3.0 * 50.0);
        // available = 100 - 4 = 96, (96 - 30) * 0.5 = 33, plus top padding
        assert_eq!(p.y, 2.0 + 33.0);
    }

    #[test]
    fn index_offset_matches_item_start_without_lead() {
        let l = LinearLayout::new(Axis::Horizontal);
        let c = horizontal_cx(0.0);
        assert_eq!(l.index_offset(&c, 7), l.item_position(&c, 7).x);
    }

    #[test]
    fn range_is_empty_past_the_last_item() {
        let l = LinearLayout::new(Axis::Horizontal);
        assert_eq!(l.visible_range(&horizontal_cx(5000.0)), None);
    }
}

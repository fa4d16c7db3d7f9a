use super::{
    LayoutContext, LayoutStrategy, block_lead, cross_block_start, line_count, line_window,
    lines_extent,
};
use crate::{Axis, ConfigError, IndexRange, Vec2};

/// Which grid axis has a fixed item count. The other axis grows to fit the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constraint {
    /// `n` columns per row; the grid scrolls vertically.
    FixedColumnCount(usize),
    /// `n` rows per column; the grid scrolls horizontally.
    FixedRowCount(usize),
}

impl Constraint {
    pub fn count(self) -> usize {
        match self {
            Self::FixedColumnCount(n) | Self::FixedRowCount(n) => n,
        }
    }

    pub fn scroll_axis(self) -> Axis {
        match self {
            Self::FixedColumnCount(_) => Axis::Vertical,
            Self::FixedRowCount(_) => Axis::Horizontal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    pub constraint: Constraint,
}

impl GridLayout {
    pub fn new(constraint: Constraint) -> Self {
        Self { constraint }
    }

    /// Splits `index` into `(row, column)`.
    pub fn cell(&self, index: usize) -> (usize, usize) {
        let n = self.constraint.count().max(1);
        match self.constraint {
            Constraint::FixedColumnCount(_) => (index / n, index % n),
            Constraint::FixedRowCount(_) => (index % n, index / n),
        }
    }
}

impl LayoutStrategy for GridLayout {
    fn scroll_axis(&self) -> Axis {
        self.constraint.scroll_axis()
    }

    fn items_per_line(&self) -> usize {
        self.constraint.count()
    }

    fn visible_range(&self, cx: &LayoutContext) -> Option<IndexRange> {
        let count = cx.total_count;
        let per_line = self.constraint.count();
        if count == 0 || per_line == 0 {
            return None;
        }
        let axis = self.scroll_axis();
        let extent = lines_extent(cx, axis, line_count(count, per_line));
        let (start_line, end_line) = line_window(cx, axis, extent)?;

        let start = start_line.saturating_mul(per_line);
        let end = end_line
            .saturating_add(1)
            .saturating_mul(per_line)
            .saturating_sub(1)
            .min(count - 1);
        (start <= end).then_some(IndexRange { start, end })
    }

    fn item_position(&self, cx: &LayoutContext, index: usize) -> Vec2 {
        let axis = self.scroll_axis();
        let per_line = self.constraint.count().max(1);
        let line = index / per_line;
        let slot = index % per_line;

        let extent = lines_extent(cx, axis, line_count(cx.total_count, per_line));
        let main =
            cx.padding.near(axis) + block_lead(cx, axis, extent) + line as f32 * cx.stride(axis);

        let cross_axis = axis.cross();
        let cross = cross_block_start(cx, cross_axis, per_line)
            + slot as f32 * cx.stride(cross_axis);
        Vec2::from_axes(axis, main, cross)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.constraint.count() == 0 {
            return Err(ConfigError::InvalidConstraintCount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Align, Padding, Size};

    fn columns_cx(total_count: usize, offset: f32) -> LayoutContext {
        LayoutContext {
            total_count,
            item_size: Size::new(50.0, 50.0),
            spacing: 0.0,
            padding: Padding::default(),
            viewport: Size::new(200.0, 500.0),
            content_size: Size::new(200.0, 12_500.0),
            scroll_offset: Vec2::new(0.0, offset),
            align_horizontal: Align::Start,
            align_vertical: Align::Start,
        }
    }

    #[test]
    fn index_37_in_four_columns_is_row_9_column_1() {
        let g = GridLayout::new(Constraint::FixedColumnCount(4));
        assert_eq!(g.cell(37), (9, 1));

        let p = g.item_position(&columns_cx(1000, 0.0), 37);
        assert_eq!(p, Vec2::new(50.0, 450.0));
    }

    #[test]
    fn free_axis_extent_uses_rounded_up_line_count() {
        let g = GridLayout::new(Constraint::FixedColumnCount(4));
        assert_eq!(g.content_extent(&columns_cx(1000, 0.0)), 12_500.0);
        assert_eq!(g.content_extent(&columns_cx(1001, 0.0)), 12_550.0);
    }

    #[test]
    fn visible_range_covers_whole_lines_plus_one() {
        let g = GridLayout::new(Constraint::FixedColumnCount(4));
        // rows floor(100/50)=2 ..= ceil(600/50)=12, end extends one extra row
        let r = g.visible_range(&columns_cx(1000, 100.0)).unwrap();
        assert_eq!((r.start, r.end), (8, 51));

        let tail = g.visible_range(&columns_cx(10, 0.0)).unwrap();
        assert_eq!((tail.start, tail.end), (0, 9));
    }

    #[test]
    fn fixed_rows_scroll_horizontally() {
        let g = GridLayout::new(Constraint::FixedRowCount(3));
        let cx = LayoutContext {
            total_count: 10,
            item_size: Size::new(20.0, 10.0),
            spacing: 2.0,
            padding: Padding::new(1.0, 1.0, 4.0, 4.0),
            viewport: Size::new(50.0, 60.0),
            content_size: Size::new(90.0, 60.0),
            scroll_offset: Vec2::ZERO,
            align_horizontal: Align::Start,
            align_vertical: Align::End,
        };
        assert_eq!(g.cell(7), (1, 2));
        // 4 columns: 4 * 20 + 3 * 2 + 2
        assert_eq!(g.content_extent(&cx), 88.0);

        // block = 3 * 10 + 2 * 2 = 34, available = 52 => (52 - 34) * 1.0 = 18
        let p = g.item_position(&cx, 7);
        assert_eq!(p.x, 1.0 + 2.0 * 22.0);
        assert_eq!(p.y, 4.0 + 18.0 + 12.0);
        assert_eq!(g.index_offset(&cx, 7), 45.0);
    }

    #[test]
    fn zero_constraint_is_rejected() {
        let g = GridLayout::new(Constraint::FixedColumnCount(0));
        assert_eq!(g.validate(), Err(ConfigError::InvalidConstraintCount));
        assert_eq!(g.visible_range(&columns_cx(10, 0.0)), None);
    }
}

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;
use std::collections::HashMap;

use crate::anchor::{PendingRestore, anchor_offset, capture_first_visible_anchor};
use crate::layout::{Layout, LayoutContext};
use crate::pool::ItemPool;
use crate::{
    Align, Axis, ConfigError, Easing, IndexRange, ItemUpdateCallback, ItemView, LoopScrollOptions,
    Padding, Phase, PoolStats, ScrollTween, Size, Vec2,
};

/// Everything that decides where an already-bound item sits.
///
/// When this changes between passes, items that stay in range are moved but not rebound.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Placement {
    layout: Layout,
    item_size: Size,
    spacing: f32,
    padding: Padding,
    content_size: Size,
    align_horizontal: Align,
    align_vertical: Align,
}

/// A headless, pooled loop-scroll engine.
///
/// The engine does not own any UI objects beyond the pooled `T` instances. An adapter drives it:
/// - `set_viewport_size` / `on_scroll` when the scroll container changes
/// - `layout()` (or `compute_extent` + `apply_layout`) during the layout pass
/// - `end_of_pass()` once the pass has fully completed
/// - `tick(dt)` every frame while a scroll-to animation runs
///
/// Placement and binding flow back through [`ItemView::set_position`] and the item-update
/// callback. The adapter applies `scroll_offset()` and `content_size()` to the real container.
pub struct LoopScroll<T> {
    options: LoopScrollOptions<T>,
    on_item_update: ItemUpdateCallback<T>,

    total_count: usize,
    item_size: Size,

    viewport: Size,
    scroll_offset: Vec2,
    content_extent: f32,
    content_size: Size,

    pool: ItemPool<T>,
    active: HashMap<usize, T>,
    staged: Vec<T>,

    last_range: Option<IndexRange>,
    last_placement: Option<Placement>,

    layout_dirty: bool,
    pending_recycle: bool,
    pending_restore: Option<PendingRestore>,
    tween: Option<ScrollTween>,

    phase: Phase,
    last_error: Option<ConfigError>,
}

impl<T: ItemView> LoopScroll<T> {
    /// Creates an engine with no data. Call [`Self::provide_data`] to populate it.
    pub fn new(
        options: LoopScrollOptions<T>,
        on_item_update: impl FnMut(&mut T, usize) + 'static,
    ) -> Self {
        vdebug!(
            layout = ?options.layout,
            enabled = options.enabled,
            "LoopScroll::new"
        );
        Self {
            options,
            on_item_update: Box::new(on_item_update),
            total_count: 0,
            item_size: Size::ZERO,
            viewport: Size::ZERO,
            scroll_offset: Vec2::ZERO,
            content_extent: 0.0,
            content_size: Size::ZERO,
            pool: ItemPool::new(),
            active: HashMap::new(),
            staged: Vec::new(),
            last_range: None,
            last_placement: None,
            layout_dirty: true,
            pending_recycle: false,
            pending_restore: None,
            tween: None,
            phase: Phase::Idle,
            last_error: None,
        }
    }

    pub fn options(&self) -> &LoopScrollOptions<T> {
        &self.options
    }

    /// Supplies the logical item count.
    ///
    /// A changed count rebuilds the visible window and, if the viewport was away from the top,
    /// restores the first visible index once the next layout pass has settled. An unchanged
    /// count only re-binds the active items, leaving pooling and positions alone.
    ///
    /// Configuration errors leave the engine untouched; they are logged once and returned.
    pub fn provide_data(&mut self, total_count: usize) -> Result<(), ConfigError> {
        if let Err(err) = self.options.validate() {
            self.report(&err);
            return Err(err);
        }
        self.last_error = None;

        if self.total_count == total_count {
            vtrace!(total_count, "provide_data: refresh in place");
            self.refresh_visible_items();
            return Ok(());
        }

        let layout = self.options.layout;
        let anchor = capture_first_visible_anchor(layout.strategy(), &self.context());
        vdebug!(
            from = self.total_count,
            to = total_count,
            anchor = ?anchor,
            "provide_data"
        );

        self.total_count = total_count;
        if let Some(template) = &self.options.item_template {
            self.item_size = template.size();
        }
        self.rebuild();
        self.set_dirty();
        self.pending_restore = anchor.map(PendingRestore::new);
        self.phase = Phase::LayoutPending;
        Ok(())
    }

    /// Re-binds every active item with its current index.
    pub fn refresh_visible_items(&mut self) {
        for (&index, item) in self.active.iter_mut() {
            (self.on_item_update)(item, index);
        }
    }

    /// Reports a scroll offset change from the container.
    ///
    /// Non-finite offsets are ignored.
    pub fn on_scroll(&mut self, offset: Vec2) {
        if !offset.x.is_finite() || !offset.y.is_finite() {
            vwarn!(x = offset.x, y = offset.y, "on_scroll: ignoring non-finite offset");
            return;
        }
        self.scroll_offset = offset;
        self.notify_scrolled();
    }

    /// Updates the viewport size. Sizes that are negative or not finite are ignored.
    pub fn set_viewport_size(&mut self, size: Size) {
        if self.viewport == size {
            return;
        }
        if !size.is_valid() {
            vwarn!(
                width = size.width,
                height = size.height,
                "set_viewport_size: ignoring invalid size"
            );
            return;
        }
        vtrace!(width = size.width, height = size.height, "set_viewport_size");
        self.viewport = size;
        self.set_dirty();
    }

    /// Runs a layout pass if anything invalidated the previous one.
    ///
    /// Returns `true` when a pass ran.
    pub fn layout(&mut self) -> bool {
        if !self.layout_dirty || !self.options.enabled {
            return false;
        }
        self.apply_layout();
        true
    }

    /// Computes the content extent along the scroll axis and the resulting content size.
    ///
    /// The scroll axis is at least as long as the viewport; the cross axis fills the viewport.
    pub fn compute_extent(&mut self) -> f32 {
        let layout = self.options.layout;
        let strategy = layout.strategy();
        let axis = strategy.scroll_axis();
        let extent = strategy.content_extent(&self.context());

        let main = extent.max(self.viewport.along(axis));
        let cross = self.viewport.along(axis.cross());
        self.content_extent = extent;
        self.content_size = Size::from_axes(axis, main, cross);
        extent
    }

    /// Lays out the visible window: stages departing items, positions and binds entering ones.
    ///
    /// Nothing happens when the visible range and the placement geometry are both unchanged.
    pub fn apply_layout(&mut self) {
        if !self.options.enabled {
            return;
        }
        self.compute_extent();
        self.layout_dirty = false;

        let layout = self.options.layout;
        let strategy = layout.strategy();
        let cx = self.context();
        let placement = self.placement();
        let placement_changed = self.last_placement != Some(placement);
        let range = strategy.visible_range(&cx);

        if placement_changed || range != self.last_range {
            vtrace!(
                range = ?range,
                placement_changed,
                "apply_layout"
            );
            match range {
                None => self.recycle_all(),
                Some(range) => {
                    let departed: Vec<usize> = self
                        .active
                        .keys()
                        .copied()
                        .filter(|&i| !range.contains(i))
                        .collect();
                    for index in departed {
                        if let Some(item) = self.active.remove(&index) {
                            self.stage(item);
                        }
                    }

                    if placement_changed {
                        for (&index, item) in self.active.iter_mut() {
                            item.set_position(strategy.item_position(&cx, index));
                        }
                    }

                    for index in range.iter() {
                        if self.active.contains_key(&index) {
                            continue;
                        }
                        let Some(template) = self.options.item_template.as_mut() else {
                            break;
                        };
                        let mut item = self.pool.acquire(template);
                        item.set_position(strategy.item_position(&cx, index));
                        (self.on_item_update)(&mut item, index);
                        self.active.insert(index, item);
                    }
                }
            }
            self.last_range = range;
            self.last_placement = Some(placement);
        }

        self.phase = match self.pending_restore.as_mut() {
            Some(restore) => {
                restore.settled = true;
                Phase::RestoringPosition
            }
            None => Phase::RangeComputed,
        };
        debug_assert_eq!(
            self.active.len() + self.pool.len() + self.staged.len(),
            self.pool.created(),
            "instance bookkeeping out of balance"
        );
    }

    /// Runs the deferred end-of-pass work: returns staged items to the pool, then restores the
    /// anchored position if a data change scheduled one and a layout pass has settled since.
    pub fn end_of_pass(&mut self) {
        if self.pending_recycle {
            self.pending_recycle = false;
            vtrace!(staged = self.staged.len(), "recycle staged items");
            for item in self.staged.drain(..) {
                self.pool.release(item);
            }
        }

        if self.pending_restore.is_some_and(|r| r.settled) {
            if let Some(restore) = self.pending_restore.take() {
                self.restore_position(restore.index);
            }
        }
    }

    /// Advances the scroll-to animation by `dt`.
    ///
    /// Returns the new scroll offset while an animation is running, `None` otherwise.
    pub fn tick(&mut self, dt: Duration) -> Option<Vec2> {
        if !self.options.enabled {
            return None;
        }
        let tween = self.tween.as_mut()?;
        let position = tween.advance(dt);
        if tween.is_done() {
            self.tween = None;
        }
        self.apply_normalized_position(position);
        Some(self.scroll_offset)
    }

    /// Scrolls so that `index` sits at the viewport's near edge.
    ///
    /// Out-of-range indexes are clamped. With `immediate` the position is applied right away;
    /// otherwise an animation starts, replacing any animation in flight. A disabled engine does
    /// not start animations.
    pub fn scroll_to(&mut self, index: usize, immediate: bool) {
        if self.total_count == 0 || self.options.layout.strategy().validate().is_err() {
            return;
        }
        if !immediate && !self.options.enabled {
            vtrace!(index, "scroll_to: animation skipped while disabled");
            return;
        }
        let index = index.min(self.total_count - 1);
        let target = self.normalized_position_for_index(index);
        vdebug!(index, target, immediate, "scroll_to");
        self.do_scroll_to(target, immediate);
    }

    /// Normalized position (`0` near edge, `1` far edge) that brings `index` to the near edge.
    ///
    /// When the content does not exceed the viewport there is nothing to scroll and the result
    /// is `0`.
    pub fn normalized_position_for_index(&self, index: usize) -> f32 {
        let layout = self.options.layout;
        let strategy = layout.strategy();
        let scrollable = self.max_scroll_offset();
        if !(scrollable > 0.0) {
            return 0.0;
        }
        let offset = strategy.index_offset(&self.context(), index);
        (offset / scrollable).clamp(0.0, 1.0)
    }

    /// Current scroll position along the scroll axis as a fraction of the scrollable range.
    pub fn normalized_position(&self) -> f32 {
        let scrollable = self.max_scroll_offset();
        if !(scrollable > 0.0) {
            return 0.0;
        }
        self.scroll_offset.along(self.scroll_axis()) / scrollable
    }

    /// Moves the scroll offset to a normalized position, clamped to `[0, 1]`.
    pub fn set_normalized_position(&mut self, value: f32) {
        self.apply_normalized_position(value);
    }

    /// Largest scroll offset along the scroll axis.
    pub fn max_scroll_offset(&self) -> f32 {
        let layout = self.options.layout;
        let strategy = layout.strategy();
        let extent = strategy.content_extent(&self.context());
        (extent - self.viewport.along(strategy.scroll_axis())).max(0.0)
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Drops the in-flight scroll-to animation without jumping to its target.
    pub fn cancel_scroll_animation(&mut self) {
        self.tween = None;
    }

    pub fn is_enabled(&self) -> bool {
        self.options.enabled
    }

    /// Subscribes to (or unsubscribes from) scroll notifications.
    ///
    /// Disabling cancels the pending recycle and any scroll-to animation; staged items wait for
    /// the next enable.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.options.enabled == enabled {
            return;
        }
        vdebug!(enabled, "set_enabled");
        self.options.enabled = enabled;
        if enabled {
            self.pending_recycle = !self.staged.is_empty();
            self.set_dirty();
        } else {
            self.pending_recycle = false;
            self.tween = None;
        }
    }

    pub fn set_spacing(&mut self, spacing: f32) -> Result<(), ConfigError> {
        if !spacing.is_finite() || spacing < 0.0 {
            let err = ConfigError::InvalidSpacing(spacing);
            self.report(&err);
            return Err(err);
        }
        self.options.spacing = spacing;
        self.set_dirty();
        Ok(())
    }

    pub fn set_padding(&mut self, padding: Padding) -> Result<(), ConfigError> {
        if !padding.is_valid() {
            let err = ConfigError::InvalidPadding(padding);
            self.report(&err);
            return Err(err);
        }
        self.options.padding = padding;
        self.set_dirty();
        Ok(())
    }

    pub fn set_alignment(&mut self, horizontal: Align, vertical: Align) {
        self.options.align_horizontal = horizontal;
        self.options.align_vertical = vertical;
        self.set_dirty();
    }

    /// Switches the layout variant (or grid constraint).
    ///
    /// Every active item is recycled since the index → position mapping changes wholesale.
    pub fn set_layout(&mut self, layout: Layout) -> Result<(), ConfigError> {
        if let Err(err) = layout.strategy().validate() {
            self.report(&err);
            return Err(err);
        }
        if self.options.layout == layout {
            return Ok(());
        }
        vdebug!(layout = ?layout, "set_layout");
        self.options.layout = layout;
        self.tween = None;
        self.rebuild();
        self.set_dirty();
        Ok(())
    }

    pub fn set_scroll_to_easing(&mut self, easing: Easing) {
        self.options.scroll_to_easing = easing;
    }

    pub fn set_scroll_to_duration(&mut self, duration: Duration) {
        self.options.scroll_to_duration = duration;
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn item_size(&self) -> Size {
        self.item_size
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    pub fn scroll_offset(&self) -> Vec2 {
        self.scroll_offset
    }

    pub fn scroll_axis(&self) -> Axis {
        self.options.layout.strategy().scroll_axis()
    }

    /// Content extent along the scroll axis from the last layout pass.
    pub fn content_extent(&self) -> f32 {
        self.content_extent
    }

    /// Content size from the last layout pass, for the adapter to apply to its content node.
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn is_layout_dirty(&self) -> bool {
        self.layout_dirty
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a position restore is waiting for a layout pass or for `end_of_pass`.
    pub fn has_pending_restore(&self) -> bool {
        self.pending_restore.is_some()
    }

    /// The visible range computed by the last layout pass.
    pub fn visible_range(&self) -> Option<IndexRange> {
        self.last_range
    }

    /// First logical index at the viewport's near edge for the current geometry.
    pub fn first_visible_index(&self) -> usize {
        let layout = self.options.layout;
        layout.strategy().first_visible_index(&self.context())
    }

    pub fn active_item(&self, index: usize) -> Option<&T> {
        self.active.get(&index)
    }

    /// Indexes currently bound to an instance, ascending.
    pub fn active_indices(&self) -> Vec<usize> {
        let mut out: Vec<usize> = self.active.keys().copied().collect();
        out.sort_unstable();
        out
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            active: self.active.len(),
            pooled: self.pool.len(),
            staged: self.staged.len(),
            created: self.pool.created(),
        }
    }

    fn context(&self) -> LayoutContext {
        LayoutContext {
            total_count: self.total_count,
            item_size: self.item_size,
            spacing: self.options.spacing,
            padding: self.options.padding,
            viewport: self.viewport,
            content_size: self.content_size,
            scroll_offset: self.scroll_offset,
            align_horizontal: self.options.align_horizontal,
            align_vertical: self.options.align_vertical,
        }
    }

    fn placement(&self) -> Placement {
        Placement {
            layout: self.options.layout,
            item_size: self.item_size,
            spacing: self.options.spacing,
            padding: self.options.padding,
            content_size: self.content_size,
            align_horizontal: self.options.align_horizontal,
            align_vertical: self.options.align_vertical,
        }
    }

    fn set_dirty(&mut self) {
        if self.options.enabled {
            self.layout_dirty = true;
        }
    }

    fn notify_scrolled(&mut self) {
        if !self.options.enabled {
            return;
        }
        self.layout_dirty = true;
        if self.phase == Phase::RangeComputed {
            self.phase = Phase::Scrolling;
        }
    }

    /// Forgets the visible window: every active item is staged and the cached range dropped.
    fn rebuild(&mut self) {
        self.recycle_all();
        self.last_range = None;
        self.last_placement = None;
    }

    fn recycle_all(&mut self) {
        if self.active.is_empty() {
            return;
        }
        let items: Vec<T> = self.active.drain().map(|(_, item)| item).collect();
        for item in items {
            self.stage(item);
        }
    }

    fn stage(&mut self, item: T) {
        self.staged.push(item);
        self.pending_recycle = true;
    }

    fn do_scroll_to(&mut self, target: f32, immediate: bool) {
        self.tween = None;
        if immediate {
            self.apply_normalized_position(target);
            return;
        }
        self.tween = Some(ScrollTween::new(
            self.normalized_position(),
            target,
            self.options.scroll_to_duration,
            self.options.scroll_to_easing,
        ));
    }

    fn apply_normalized_position(&mut self, value: f32) {
        let axis = self.scroll_axis();
        let offset = value.clamp(0.0, 1.0) * self.max_scroll_offset();
        self.scroll_offset.set_along(axis, offset);
        self.notify_scrolled();
    }

    fn restore_position(&mut self, index: usize) {
        let layout = self.options.layout;
        let strategy = layout.strategy();
        let axis = strategy.scroll_axis();
        // An emptied data set has nothing to anchor to; pull the offset back into range.
        let offset = anchor_offset(strategy, &self.context(), index).unwrap_or_else(|| {
            self.scroll_offset
                .along(axis)
                .clamp(0.0, self.max_scroll_offset())
        });
        vdebug!(index, offset, "restore anchored position");
        self.scroll_offset.set_along(axis, offset);
        self.set_dirty();
    }

    fn report(&mut self, err: &ConfigError) {
        if self.last_error.as_ref() == Some(err) {
            return;
        }
        vwarn!(error = %err, "LoopScroll: invalid configuration");
        self.last_error = Some(err.clone());
    }
}

impl<T> fmt::Debug for LoopScroll<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopScroll")
            .field("options", &self.options)
            .field("total_count", &self.total_count)
            .field("item_size", &self.item_size)
            .field("viewport", &self.viewport)
            .field("scroll_offset", &self.scroll_offset)
            .field("content_size", &self.content_size)
            .field("active", &self.active.len())
            .field("staged", &self.staged.len())
            .field("last_range", &self.last_range)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

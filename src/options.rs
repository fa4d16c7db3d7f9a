use core::fmt;
use core::time::Duration;

use crate::{Align, ConfigError, Easing, ItemTemplate, Layout, Padding};

/// Default duration of an animated `scroll_to`.
pub const DEFAULT_SCROLL_TO_DURATION: Duration = Duration::from_millis(500);

/// Configuration for [`crate::LoopScroll`].
pub struct LoopScrollOptions<T> {
    /// Prototype for pooled instances. Required: `provide_data` fails while this is `None`.
    pub item_template: Option<ItemTemplate<T>>,
    /// Gap between adjacent items (and adjacent grid lines).
    pub spacing: f32,
    pub padding: Padding,
    pub layout: Layout,

    /// Alignment on the horizontal axis: cross-axis item placement for vertical lists and
    /// column grids, block placement for short horizontal content.
    pub align_horizontal: Align,
    /// Alignment on the vertical axis (mirror of `align_horizontal`).
    pub align_vertical: Align,

    pub scroll_to_easing: Easing,
    pub scroll_to_duration: Duration,

    /// Whether the engine starts subscribed to scroll notifications.
    pub enabled: bool,
}

impl<T> LoopScrollOptions<T> {
    pub fn new(item_template: ItemTemplate<T>) -> Self {
        Self {
            item_template: Some(item_template),
            ..Self::without_template()
        }
    }

    /// Options with no template yet; `provide_data` reports [`ConfigError::MissingTemplate`]
    /// until one is installed.
    pub fn without_template() -> Self {
        Self {
            item_template: None,
            spacing: 0.0,
            padding: Padding::default(),
            layout: Layout::default(),
            align_horizontal: Align::Start,
            align_vertical: Align::Start,
            scroll_to_easing: Easing::default(),
            scroll_to_duration: DEFAULT_SCROLL_TO_DURATION,
            enabled: true,
        }
    }

    pub fn with_item_template(mut self, item_template: ItemTemplate<T>) -> Self {
        self.item_template = Some(item_template);
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_alignment(mut self, horizontal: Align, vertical: Align) -> Self {
        self.align_horizontal = horizontal;
        self.align_vertical = vertical;
        self
    }

    pub fn with_scroll_to(mut self, easing: Easing, duration: Duration) -> Self {
        self.scroll_to_easing = easing;
        self.scroll_to_duration = duration;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(template) = &self.item_template else {
            return Err(ConfigError::MissingTemplate);
        };
        let size = template.size();
        if !size.is_valid() {
            return Err(ConfigError::InvalidItemSize {
                width: size.width,
                height: size.height,
            });
        }
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(ConfigError::InvalidSpacing(self.spacing));
        }
        if !self.padding.is_valid() {
            return Err(ConfigError::InvalidPadding(self.padding));
        }
        self.layout.strategy().validate()
    }
}

impl<T> fmt::Debug for LoopScrollOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopScrollOptions")
            .field("item_template", &self.item_template)
            .field("spacing", &self.spacing)
            .field("padding", &self.padding)
            .field("layout", &self.layout)
            .field("align_horizontal", &self.align_horizontal)
            .field("align_vertical", &self.align_vertical)
            .field("scroll_to_easing", &self.scroll_to_easing)
            .field("scroll_to_duration", &self.scroll_to_duration)
            .field("enabled", &self.enabled)
            .finish()
    }
}

use alloc::sync::Arc;

use crate::error::LayoutError;
use crate::geometry::{EdgeInsets, Rect, Size};
use crate::types::{ItemRenderDirection, Style};

/// A per-section override hook for one tunable.
///
/// When present, the hook is asked for every section; when absent, the
/// global value on [`WaterfallOptions`] applies. This mirrors the delegate
/// protocol of the original engine: "ask the override provider; fall back
/// to the layout's own property."
pub type SectionOverride<T> = Arc<dyn Fn(usize) -> T + Send + Sync>;

/// Configuration for [`crate::Waterfall`].
///
/// This type is designed to be cheap to clone: content-provider hooks and
/// per-section overrides are stored in `Arc`s so adapters can update a few
/// fields and call `Waterfall::set_options` without reallocating closures.
pub struct WaterfallOptions {
    /// Number of sections in the layout.
    pub section_count: usize,
    /// Content-provider hook: number of items in a section.
    pub item_count: Arc<dyn Fn(usize) -> usize + Send + Sync>,
    /// Content-provider hook: natural (unconstrained) size of one item.
    ///
    /// Both dimensions must be positive for the item to receive a nonzero
    /// height; a placeholder size for not-yet-loaded content yields a
    /// zero-height frame rather than an error.
    pub item_size: Arc<dyn Fn(usize, usize) -> Size + Send + Sync>,

    /// How many columns each section lays out. Default: 2.
    pub column_count: usize,
    /// The minimum spacing between successive columns. Default: 10.0.
    pub minimum_column_spacing: f64,
    /// The minimum spacing between items in the same column. Default: 10.0.
    ///
    /// Not applied between the header and the columns or between the
    /// columns and the footer.
    pub minimum_interitem_spacing: f64,
    /// Height for section headers; 0 means no header band. Default: 0.
    pub header_height: f64,
    /// Height for section footers; 0 means no footer band. Default: 0.
    pub footer_height: f64,
    /// Margins around each section header band.
    pub header_inset: EdgeInsets,
    /// Margins around each section footer band.
    pub footer_inset: EdgeInsets,
    /// Margins around each section's item columns.
    pub section_inset: EdgeInsets,
    /// Column-assignment policy for sequential items.
    pub item_render_direction: ItemRenderDirection,
    /// Floor for the overall content height; lets a host keep a scrollable
    /// area taller than its content. Default: 0.
    pub minimum_content_height: f64,
    /// Header presentation style; `Plain` enables sticky headers.
    pub style: Style,
    /// Device pixel scale used to snap computed boundaries to the physical
    /// pixel grid. Default: 1.0.
    pub pixel_scale: f64,
    /// Viewport applied by `Waterfall::new`; the host can also supply it
    /// later via `set_viewport`.
    pub initial_viewport: Option<Rect>,

    pub column_count_for_section: Option<SectionOverride<usize>>,
    pub column_spacing_for_section: Option<SectionOverride<f64>>,
    pub interitem_spacing_for_section: Option<SectionOverride<f64>>,
    pub header_height_for_section: Option<SectionOverride<f64>>,
    pub footer_height_for_section: Option<SectionOverride<f64>>,
    pub section_inset_for_section: Option<SectionOverride<EdgeInsets>>,
    pub header_inset_for_section: Option<SectionOverride<EdgeInsets>>,
    pub footer_inset_for_section: Option<SectionOverride<EdgeInsets>>,
}

impl WaterfallOptions {
    /// Creates options for `section_count` sections backed by the given
    /// content-provider hooks.
    ///
    /// `item_count(section)` returns the number of items in a section;
    /// `item_size(section, item)` returns the item's natural size hint.
    pub fn new(
        section_count: usize,
        item_count: impl Fn(usize) -> usize + Send + Sync + 'static,
        item_size: impl Fn(usize, usize) -> Size + Send + Sync + 'static,
    ) -> Self {
        Self {
            section_count,
            item_count: Arc::new(item_count),
            item_size: Arc::new(item_size),
            column_count: 2,
            minimum_column_spacing: 10.0,
            minimum_interitem_spacing: 10.0,
            header_height: 0.0,
            footer_height: 0.0,
            header_inset: EdgeInsets::ZERO,
            footer_inset: EdgeInsets::ZERO,
            section_inset: EdgeInsets::ZERO,
            item_render_direction: ItemRenderDirection::ShortestFirst,
            minimum_content_height: 0.0,
            style: Style::Plain,
            pixel_scale: 1.0,
            initial_viewport: None,
            column_count_for_section: None,
            column_spacing_for_section: None,
            interitem_spacing_for_section: None,
            header_height_for_section: None,
            footer_height_for_section: None,
            section_inset_for_section: None,
            header_inset_for_section: None,
            footer_inset_for_section: None,
        }
    }

    pub fn with_column_count(mut self, column_count: usize) -> Self {
        self.column_count = column_count;
        self
    }

    pub fn with_minimum_column_spacing(mut self, spacing: f64) -> Self {
        self.minimum_column_spacing = spacing;
        self
    }

    pub fn with_minimum_interitem_spacing(mut self, spacing: f64) -> Self {
        self.minimum_interitem_spacing = spacing;
        self
    }

    pub fn with_header_height(mut self, height: f64) -> Self {
        self.header_height = height;
        self
    }

    pub fn with_footer_height(mut self, height: f64) -> Self {
        self.footer_height = height;
        self
    }

    pub fn with_header_inset(mut self, inset: EdgeInsets) -> Self {
        self.header_inset = inset;
        self
    }

    pub fn with_footer_inset(mut self, inset: EdgeInsets) -> Self {
        self.footer_inset = inset;
        self
    }

    pub fn with_section_inset(mut self, inset: EdgeInsets) -> Self {
        self.section_inset = inset;
        self
    }

    pub fn with_item_render_direction(mut self, direction: ItemRenderDirection) -> Self {
        self.item_render_direction = direction;
        self
    }

    pub fn with_minimum_content_height(mut self, height: f64) -> Self {
        self.minimum_content_height = height;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_pixel_scale(mut self, scale: f64) -> Self {
        self.pixel_scale = scale;
        self
    }

    /// Sets the initial viewport rectangle.
    pub fn with_initial_viewport(mut self, viewport: Option<Rect>) -> Self {
        self.initial_viewport = viewport;
        self
    }

    pub fn with_column_count_for_section(
        mut self,
        f: Option<impl Fn(usize) -> usize + Send + Sync + 'static>,
    ) -> Self {
        self.column_count_for_section = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_column_spacing_for_section(
        mut self,
        f: Option<impl Fn(usize) -> f64 + Send + Sync + 'static>,
    ) -> Self {
        self.column_spacing_for_section = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_interitem_spacing_for_section(
        mut self,
        f: Option<impl Fn(usize) -> f64 + Send + Sync + 'static>,
    ) -> Self {
        self.interitem_spacing_for_section = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_header_height_for_section(
        mut self,
        f: Option<impl Fn(usize) -> f64 + Send + Sync + 'static>,
    ) -> Self {
        self.header_height_for_section = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_footer_height_for_section(
        mut self,
        f: Option<impl Fn(usize) -> f64 + Send + Sync + 'static>,
    ) -> Self {
        self.footer_height_for_section = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_section_inset_for_section(
        mut self,
        f: Option<impl Fn(usize) -> EdgeInsets + Send + Sync + 'static>,
    ) -> Self {
        self.section_inset_for_section = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_header_inset_for_section(
        mut self,
        f: Option<impl Fn(usize) -> EdgeInsets + Send + Sync + 'static>,
    ) -> Self {
        self.header_inset_for_section = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_footer_inset_for_section(
        mut self,
        f: Option<impl Fn(usize) -> EdgeInsets + Send + Sync + 'static>,
    ) -> Self {
        self.footer_inset_for_section = f.map(|f| Arc::new(f) as _);
        self
    }

    /// Number of items in `section`.
    pub fn item_count_in(&self, section: usize) -> usize {
        (self.item_count)(section)
    }

    /// Natural size hint for one item.
    pub fn item_size_for(&self, section: usize, item: usize) -> Size {
        (self.item_size)(section, item)
    }

    /// Resolved column count for `section`: override if present, else the
    /// global value.
    pub fn column_count_in(&self, section: usize) -> usize {
        match &self.column_count_for_section {
            Some(f) => f(section),
            None => self.column_count,
        }
    }

    pub fn column_spacing_in(&self, section: usize) -> f64 {
        match &self.column_spacing_for_section {
            Some(f) => f(section),
            None => self.minimum_column_spacing,
        }
    }

    pub fn interitem_spacing_in(&self, section: usize) -> f64 {
        match &self.interitem_spacing_for_section {
            Some(f) => f(section),
            None => self.minimum_interitem_spacing,
        }
    }

    pub fn header_height_in(&self, section: usize) -> f64 {
        match &self.header_height_for_section {
            Some(f) => f(section),
            None => self.header_height,
        }
    }

    pub fn footer_height_in(&self, section: usize) -> f64 {
        match &self.footer_height_for_section {
            Some(f) => f(section),
            None => self.footer_height,
        }
    }

    pub fn section_inset_in(&self, section: usize) -> EdgeInsets {
        match &self.section_inset_for_section {
            Some(f) => f(section),
            None => self.section_inset,
        }
    }

    pub fn header_inset_in(&self, section: usize) -> EdgeInsets {
        match &self.header_inset_for_section {
            Some(f) => f(section),
            None => self.header_inset,
        }
    }

    pub fn footer_inset_in(&self, section: usize) -> EdgeInsets {
        match &self.footer_inset_for_section {
            Some(f) => f(section),
            None => self.footer_inset,
        }
    }

    /// Rejects configurations the layout pass cannot compute.
    ///
    /// The global column count and every section's resolved column count
    /// must be at least 1 (the pass divides the available width by it).
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.column_count == 0 && self.column_count_for_section.is_none() {
            return Err(LayoutError::InvalidConfiguration { section: None });
        }
        for section in 0..self.section_count {
            if self.column_count_in(section) == 0 {
                return Err(LayoutError::InvalidConfiguration {
                    section: Some(section),
                });
            }
        }
        Ok(())
    }
}

impl Clone for WaterfallOptions {
    fn clone(&self) -> Self {
        Self {
            section_count: self.section_count,
            item_count: Arc::clone(&self.item_count),
            item_size: Arc::clone(&self.item_size),
            column_count: self.column_count,
            minimum_column_spacing: self.minimum_column_spacing,
            minimum_interitem_spacing: self.minimum_interitem_spacing,
            header_height: self.header_height,
            footer_height: self.footer_height,
            header_inset: self.header_inset,
            footer_inset: self.footer_inset,
            section_inset: self.section_inset,
            item_render_direction: self.item_render_direction,
            minimum_content_height: self.minimum_content_height,
            style: self.style,
            pixel_scale: self.pixel_scale,
            initial_viewport: self.initial_viewport,
            column_count_for_section: self.column_count_for_section.clone(),
            column_spacing_for_section: self.column_spacing_for_section.clone(),
            interitem_spacing_for_section: self.interitem_spacing_for_section.clone(),
            header_height_for_section: self.header_height_for_section.clone(),
            footer_height_for_section: self.footer_height_for_section.clone(),
            section_inset_for_section: self.section_inset_for_section.clone(),
            header_inset_for_section: self.header_inset_for_section.clone(),
            footer_inset_for_section: self.footer_inset_for_section.clone(),
        }
    }
}

impl core::fmt::Debug for WaterfallOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WaterfallOptions")
            .field("section_count", &self.section_count)
            .field("column_count", &self.column_count)
            .field("minimum_column_spacing", &self.minimum_column_spacing)
            .field("minimum_interitem_spacing", &self.minimum_interitem_spacing)
            .field("header_height", &self.header_height)
            .field("footer_height", &self.footer_height)
            .field("header_inset", &self.header_inset)
            .field("footer_inset", &self.footer_inset)
            .field("section_inset", &self.section_inset)
            .field("item_render_direction", &self.item_render_direction)
            .field("minimum_content_height", &self.minimum_content_height)
            .field("style", &self.style)
            .field("pixel_scale", &self.pixel_scale)
            .field("initial_viewport", &self.initial_viewport)
            .finish_non_exhaustive()
    }
}

use alloc::vec::Vec;
use core::mem;
use core::ops::Range;

use crate::error::LayoutError;
use crate::geometry::{pixel_floor, EdgeInsets, Point, Rect, Size, Vector};
use crate::options::WaterfallOptions;
use crate::spatial::UnionIndex;
use crate::tracker::ColumnTracker;
use crate::types::{
    ElementKind, HeaderOverlay, ItemRenderDirection, LayoutAttributes, PassState, Style,
    STICKY_Z_INDEX,
};

/// A headless waterfall (masonry) layout engine.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects.
/// - Your adapter drives it by providing the viewport rectangle and the
///   content-provider hooks in [`WaterfallOptions`].
/// - Placement is exposed as plain [`LayoutAttributes`] values, via single
///   lookups or zero-allocation region iteration.
///
/// Layout is computed lazily: mutations mark state dirty and the next query
/// runs the pass. Sticky-header resolution on viewport changes is
/// incremental and never triggers a full pass.
#[derive(Clone, Debug)]
pub struct Waterfall {
    options: WaterfallOptions,
    viewport: Rect,
    state: PassState,

    column_heights: ColumnTracker,
    /// Every attribute of the current pass in paint order:
    /// header, cells, footer per section.
    all_attributes: Vec<LayoutAttributes>,
    /// Per section, the index range of its cells within `all_attributes`.
    item_ranges: Vec<Range<usize>>,
    headers: Vec<Option<usize>>,
    footers: Vec<Option<usize>>,
    /// Per section, the band from its top (header inset top) to its
    /// post-footer bottom, spanning the full viewport width.
    header_bands: Vec<Rect>,
    union_index: UnionIndex,
    sticky: Option<HeaderOverlay>,
}

impl Waterfall {
    /// Creates a new engine from options.
    ///
    /// Fails with [`LayoutError::InvalidConfiguration`] when any resolved
    /// column count is zero. If `options.initial_viewport` is set, it is
    /// applied immediately.
    pub fn new(options: WaterfallOptions) -> Result<Self, LayoutError> {
        options.validate()?;
        let viewport = options.initial_viewport.unwrap_or(Rect::ZERO);
        wdebug!(
            section_count = options.section_count,
            column_count = options.column_count,
            "Waterfall::new"
        );
        Ok(Self {
            options,
            viewport,
            state: PassState::NeedsFullPass,
            column_heights: ColumnTracker::default(),
            all_attributes: Vec::new(),
            item_ranges: Vec::new(),
            headers: Vec::new(),
            footers: Vec::new(),
            header_bands: Vec::new(),
            union_index: UnionIndex::default(),
            sticky: None,
        })
    }

    pub fn options(&self) -> &WaterfallOptions {
        &self.options
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// The overlay for the currently stuck header, if any.
    pub fn sticky_overlay(&self) -> Option<HeaderOverlay> {
        self.sticky
    }

    /// Replaces the whole configuration and invalidates the layout.
    pub fn set_options(&mut self, options: WaterfallOptions) -> Result<(), LayoutError> {
        options.validate()?;
        self.options = options;
        wtrace!(
            section_count = self.options.section_count,
            "Waterfall::set_options"
        );
        self.invalidate();
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to
    /// `set_options`.
    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut WaterfallOptions),
    ) -> Result<(), LayoutError> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    pub fn set_section_count(&mut self, section_count: usize) -> Result<(), LayoutError> {
        if self.options.section_count == section_count {
            return Ok(());
        }
        let prev = mem::replace(&mut self.options.section_count, section_count);
        if let Err(err) = self.options.validate() {
            self.options.section_count = prev;
            return Err(err);
        }
        self.invalidate();
        Ok(())
    }

    pub fn set_column_count(&mut self, column_count: usize) -> Result<(), LayoutError> {
        if self.options.column_count == column_count {
            return Ok(());
        }
        let prev = mem::replace(&mut self.options.column_count, column_count);
        if let Err(err) = self.options.validate() {
            self.options.column_count = prev;
            return Err(err);
        }
        self.invalidate();
        Ok(())
    }

    pub fn set_style(&mut self, style: Style) {
        if self.options.style == style {
            return;
        }
        self.options.style = style;
        self.invalidate();
    }

    pub fn set_item_render_direction(&mut self, direction: ItemRenderDirection) {
        if self.options.item_render_direction == direction {
            return;
        }
        self.options.item_render_direction = direction;
        self.invalidate();
    }

    pub fn set_minimum_column_spacing(&mut self, spacing: f64) {
        if self.options.minimum_column_spacing == spacing {
            return;
        }
        self.options.minimum_column_spacing = spacing;
        self.invalidate();
    }

    pub fn set_minimum_interitem_spacing(&mut self, spacing: f64) {
        if self.options.minimum_interitem_spacing == spacing {
            return;
        }
        self.options.minimum_interitem_spacing = spacing;
        self.invalidate();
    }

    pub fn set_header_height(&mut self, height: f64) {
        if self.options.header_height == height {
            return;
        }
        self.options.header_height = height;
        self.invalidate();
    }

    pub fn set_footer_height(&mut self, height: f64) {
        if self.options.footer_height == height {
            return;
        }
        self.options.footer_height = height;
        self.invalidate();
    }

    pub fn set_header_inset(&mut self, inset: EdgeInsets) {
        if self.options.header_inset == inset {
            return;
        }
        self.options.header_inset = inset;
        self.invalidate();
    }

    pub fn set_footer_inset(&mut self, inset: EdgeInsets) {
        if self.options.footer_inset == inset {
            return;
        }
        self.options.footer_inset = inset;
        self.invalidate();
    }

    pub fn set_section_inset(&mut self, inset: EdgeInsets) {
        if self.options.section_inset == inset {
            return;
        }
        self.options.section_inset = inset;
        self.invalidate();
    }

    pub fn set_minimum_content_height(&mut self, height: f64) {
        if self.options.minimum_content_height == height {
            return;
        }
        self.options.minimum_content_height = height;
        self.invalidate();
    }

    pub fn set_pixel_scale(&mut self, scale: f64) {
        if self.options.pixel_scale == scale {
            return;
        }
        self.options.pixel_scale = scale;
        self.invalidate();
    }

    /// Forces a full pass on the next query.
    ///
    /// A pending sticky-only suppression still consumes the next pass first
    /// (the suppression is one-shot); the full pass then runs on the
    /// invalidation after that.
    pub fn invalidate(&mut self) {
        if self.state == PassState::StickyOnly {
            return;
        }
        self.state = PassState::NeedsFullPass;
    }

    /// Tells the engine the host's viewport rectangle changed.
    ///
    /// Returns whether layout output may have changed (the host should
    /// re-query). With [`Style::Plain`], any bounds change runs the sticky
    /// resolver against the existing pass — no full re-layout, even when
    /// the width changed. With [`Style::Group`], a width change invalidates
    /// the layout and scroll-only changes are ignored.
    pub fn set_viewport(&mut self, bounds: Rect) -> bool {
        let old = mem::replace(&mut self.viewport, bounds);
        match self.options.style {
            Style::Plain => {
                if bounds == old {
                    return false;
                }
                wtrace!(
                    x = bounds.x,
                    y = bounds.y,
                    width = bounds.width,
                    height = bounds.height,
                    "set_viewport (plain)"
                );
                // The resolver only reuses the previous pass's bands and
                // header frames; without a valid pass there is nothing to
                // stick and nothing worth suppressing.
                if self.state != PassState::NeedsFullPass {
                    self.resolve_sticky(&bounds);
                    self.state = PassState::StickyOnly;
                }
                true
            }
            Style::Group => {
                if bounds.width != old.width {
                    self.invalidate();
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Runs any pending pass. Queries call this implicitly.
    pub fn prepare(&mut self) {
        match mem::replace(&mut self.state, PassState::Clean) {
            PassState::NeedsFullPass => self.rebuild_layout(),
            // One-shot suppression: the previous pass's frames stay valid.
            PassState::StickyOnly | PassState::Clean => {}
        }
    }

    /// The overall content extent: viewport width by converged column
    /// bottom of the last section, floored at `minimum_content_height`.
    pub fn content_size(&mut self) -> Size {
        self.prepare();
        if self.options.section_count == 0 {
            return Size::ZERO;
        }
        let mut height = self.column_heights.final_offset().unwrap_or(0.0);
        if height < self.options.minimum_content_height {
            height = self.options.minimum_content_height;
        }
        Size::new(self.viewport.width, height)
    }

    /// Placement of one cell, or `None` when the index is out of range.
    ///
    /// Absence is not an error: hosts may query speculatively without
    /// bounds-checking against the provider first.
    pub fn attributes_for_item(&mut self, section: usize, index: usize) -> Option<LayoutAttributes> {
        self.prepare();
        let range = self.item_ranges.get(section)?;
        if index >= range.len() {
            return None;
        }
        let attr = self.all_attributes[range.start + index];
        Some(self.composed(attr))
    }

    /// Placement of one header or footer band, or `None` when the section
    /// is out of range or has no such band.
    pub fn attributes_for_supplementary(
        &mut self,
        kind: ElementKind,
        section: usize,
    ) -> Option<LayoutAttributes> {
        self.prepare();
        let table = match kind {
            ElementKind::SectionHeader => &self.headers,
            ElementKind::SectionFooter => &self.footers,
            ElementKind::Cell => return None,
        };
        let index = (*table.get(section)?)?;
        Some(self.composed(self.all_attributes[index]))
    }

    /// Visits every attribute whose frame intersects `rect`, in paint
    /// order, without allocating.
    ///
    /// The union-rectangle index narrows the scan to the bracketing bucket
    /// span before exact intersection tests.
    pub fn for_each_attributes_in_rect(&mut self, rect: Rect, mut f: impl FnMut(LayoutAttributes)) {
        self.prepare();
        let span = self.union_index.span(&rect);
        for attr in &self.all_attributes[span] {
            if rect.intersects(&attr.frame) {
                f(self.composed(*attr));
            }
        }
    }

    /// Collects the attributes intersecting `rect` into `out` (clears
    /// `out` first).
    ///
    /// This is a convenience wrapper around
    /// [`Self::for_each_attributes_in_rect`]; prefer the `for_each` form
    /// with a reused scratch buffer in render loops.
    pub fn collect_attributes_in_rect(&mut self, rect: Rect, out: &mut Vec<LayoutAttributes>) {
        out.clear();
        self.for_each_attributes_in_rect(rect, |attr| out.push(attr));
    }

    /// The computed width of an item in `section`: the available width
    /// after section insets, split across the resolved column count, minus
    /// inter-column spacing, floored to the pixel grid.
    pub fn item_width_in_section(&self, section: usize) -> f64 {
        let inset = self.options.section_inset_in(section);
        let width = self.viewport.width - inset.left - inset.right;
        let column_count = self.options.column_count_in(section);
        let spacing = self.options.column_spacing_in(section);
        pixel_floor(
            (width - (column_count as f64 - 1.0) * spacing) / column_count as f64,
            self.options.pixel_scale,
        )
    }

    fn composed(&self, attr: LayoutAttributes) -> LayoutAttributes {
        match &self.sticky {
            Some(overlay)
                if attr.kind == ElementKind::SectionHeader && attr.section == overlay.section =>
            {
                LayoutAttributes {
                    transform: overlay.translation,
                    z_index: overlay.z_index,
                    ..attr
                }
            }
            _ => attr,
        }
    }

    fn rebuild_layout(&mut self) {
        self.all_attributes.clear();
        self.item_ranges.clear();
        self.headers.clear();
        self.footers.clear();
        self.header_bands.clear();
        self.union_index.clear();
        self.column_heights.clear();
        self.sticky = None;

        let section_count = self.options.section_count;
        wdebug!(
            section_count,
            viewport_width = self.viewport.width,
            "rebuild_layout"
        );
        if section_count == 0 {
            return;
        }

        let counts: Vec<usize> = (0..section_count)
            .map(|s| self.options.column_count_in(s))
            .collect();
        self.column_heights.begin_pass(counts.iter().copied());
        self.headers.resize(section_count, None);
        self.footers.resize(section_count, None);

        let bounds_width = self.viewport.width;
        let scale = self.options.pixel_scale;
        let mut top = 0.0f64;

        for section in 0..section_count {
            let interitem_spacing = self.options.interitem_spacing_in(section);
            let column_spacing = self.options.column_spacing_in(section);
            let section_inset = self.options.section_inset_in(section);
            let column_count = counts[section];

            let available = bounds_width - section_inset.left - section_inset.right;
            let item_width = pixel_floor(
                (available - (column_count as f64 - 1.0) * column_spacing) / column_count as f64,
                scale,
            );

            // Section header.
            let header_height = self.options.header_height_in(section);
            let header_inset = self.options.header_inset_in(section);

            top += header_inset.top;
            let band_top = top;

            if header_height > 0.0 {
                let frame = Rect::new(
                    header_inset.left,
                    top,
                    bounds_width - header_inset.left - header_inset.right,
                    header_height,
                );
                self.headers[section] = Some(self.all_attributes.len());
                self.all_attributes.push(LayoutAttributes::new(
                    section,
                    0,
                    ElementKind::SectionHeader,
                    frame,
                ));
                top = frame.max_y() + header_inset.bottom;
            }

            top += section_inset.top;
            self.column_heights.fill(section, top);

            // Section items.
            let item_count = self.options.item_count_in(section);
            let items_start = self.all_attributes.len();
            for item in 0..item_count {
                let column = self.next_column_index(section, item, column_count);
                let x = section_inset.left + (item_width + column_spacing) * column as f64;
                let y = self.column_heights.offset(section, column);
                let hint = self.options.item_size_for(section, item);
                // A non-positive hint dimension yields a zero-height frame
                // rather than an error; hosts pass placeholder sizes for
                // content that has not loaded yet.
                let item_height = if hint.width > 0.0 && hint.height > 0.0 {
                    pixel_floor(hint.height * item_width / hint.width, scale)
                } else {
                    0.0
                };
                let frame = Rect::new(x, y, item_width, item_height);
                self.all_attributes
                    .push(LayoutAttributes::new(section, item, ElementKind::Cell, frame));
                self.column_heights
                    .advance(section, column, frame.max_y() + interitem_spacing);
            }
            self.item_ranges.push(items_start..self.all_attributes.len());

            // Section footer. The longest column carries a trailing
            // interitem gap from its last item; undo it before the footer.
            let longest = self.column_heights.longest_column(section);
            top = self.column_heights.offset(section, longest) - interitem_spacing
                + section_inset.bottom;

            let footer_height = self.options.footer_height_in(section);
            let footer_inset = self.options.footer_inset_in(section);
            top += footer_inset.top;

            if footer_height > 0.0 {
                let frame = Rect::new(
                    footer_inset.left,
                    top,
                    bounds_width - footer_inset.left - footer_inset.right,
                    footer_height,
                );
                self.footers[section] = Some(self.all_attributes.len());
                self.all_attributes.push(LayoutAttributes::new(
                    section,
                    0,
                    ElementKind::SectionFooter,
                    frame,
                ));
                top = frame.max_y() + footer_inset.bottom;
            }

            // Converge every column on the post-footer cursor so the next
            // section (and the content height) start from one value.
            self.column_heights.fill(section, top);

            self.header_bands
                .push(Rect::new(0.0, band_top, bounds_width, top - band_top));
        }

        self.union_index = UnionIndex::build(&self.all_attributes);
        wtrace!(attributes = self.all_attributes.len(), "rebuild_layout done");
    }

    fn next_column_index(&self, section: usize, item: usize, column_count: usize) -> usize {
        match self.options.item_render_direction {
            ItemRenderDirection::ShortestFirst => self.column_heights.shortest_column(section),
            ItemRenderDirection::LeftToRight => item % column_count,
            ItemRenderDirection::RightToLeft => (column_count - 1) - (item % column_count),
        }
    }

    /// Re-evaluates which header (if any) is pinned for the new bounds.
    ///
    /// Reuses the previous pass's header bands and header frames; it never
    /// fabricates attributes.
    fn resolve_sticky(&mut self, bounds: &Rect) {
        // Un-stick any previously stuck header before evaluating.
        self.sticky = None;

        // Probe one pixel inside the viewport's top-left corner.
        let probe = Point::new(bounds.min_x() + 1.0, bounds.min_y() + 1.0);
        let Some(band) = self
            .header_bands
            .iter()
            .find(|band| band.contains_point(probe))
            .copied()
        else {
            wtrace!("resolve_sticky: no section band under the viewport top");
            return;
        };

        let mut stuck: Option<LayoutAttributes> = None;
        for &index in self.headers.iter().flatten() {
            let attr = self.all_attributes[index];
            if band.contains_rect(&attr.frame) {
                stuck = Some(attr);
            }
        }
        let Some(header) = stuck else {
            return;
        };
        let Some(intersection) = band.intersection(bounds) else {
            return;
        };

        let translation = if intersection.height >= header.frame.height {
            // Enough of the section is visible: pin the header's top-left
            // to the visible band's top-left.
            Vector::new(
                intersection.min_x() - header.frame.min_x(),
                intersection.min_y() - header.frame.min_y(),
            )
        } else {
            // The section is scrolling out: align the header's bottom with
            // the band's visible bottom so it yields to the next section.
            Vector::new(
                intersection.min_x() - header.frame.min_x(),
                (intersection.max_y() - header.frame.height) - header.frame.min_y(),
            )
        };

        wtrace!(section = header.section, "resolve_sticky: header stuck");
        self.sticky = Some(HeaderOverlay {
            section: header.section,
            translation,
            z_index: STICKY_Z_INDEX,
        });
    }
}

use crate::geometry::{Rect, Vector};

/// The z-index the sticky resolver assigns to a pinned header so it paints
/// above every cell in its section.
pub const STICKY_Z_INDEX: i32 = 1024;

/// The kind of element a [`LayoutAttributes`] describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    Cell,
    SectionHeader,
    SectionFooter,
}

/// The column-assignment policy for sequential items within a section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemRenderDirection {
    /// Each item goes to whichever column is currently shortest.
    #[default]
    ShortestFirst,
    /// Items cycle through columns left to right.
    LeftToRight,
    /// Items cycle through columns right to left.
    RightToLeft,
}

/// Section header presentation style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Style {
    /// Headers scroll with their section.
    Group,
    /// Headers stick to the top of the viewport while their section is the
    /// dominant one on screen.
    #[default]
    Plain,
}

/// The engine's sole output unit: the placement of one cell, header, or
/// footer.
///
/// Attributes are plain values created fresh by each full layout pass.
/// `transform` and `z_index` are zero by default; the sticky resolver's
/// overlay is composed into them at query time, so stored frames are never
/// mutated.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutAttributes {
    pub section: usize,
    /// Item index within the section; 0 for headers and footers.
    pub index: usize,
    pub kind: ElementKind,
    pub frame: Rect,
    /// Render-time translation; nonzero only for a stuck header.
    pub transform: Vector,
    /// Paint-order priority; [`STICKY_Z_INDEX`] for a stuck header.
    pub z_index: i32,
}

impl LayoutAttributes {
    pub(crate) fn new(section: usize, index: usize, kind: ElementKind, frame: Rect) -> Self {
        Self {
            section,
            index,
            kind,
            frame,
            transform: Vector::ZERO,
            z_index: 0,
        }
    }
}

/// The render overlay the sticky resolver applies to one section header.
///
/// At most one header is stuck at a time; every other header keeps the
/// identity transform and default z-index.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeaderOverlay {
    pub section: usize,
    pub translation: Vector,
    pub z_index: i32,
}

/// What the next triggered pass has to do.
///
/// `StickyOnly` is the one-shot suppression set by the sticky resolver: the
/// previous pass's frames are still valid and must not be rebuilt. It is
/// consumed (reset to `Clean`) at the start of the next pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PassState {
    NeedsFullPass,
    StickyOnly,
    Clean,
}

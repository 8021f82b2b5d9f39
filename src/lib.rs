//! A headless waterfall (masonry) layout engine inspired by CHTCollectionViewWaterfallLayout.
//!
//! This crate focuses on the core algorithms needed to lay out multi-column,
//! variable-height content at interactive frame rates: column placement by
//! render direction, per-section header/footer bands, a union-rectangle
//! spatial index for sub-linear region queries, and sticky-header resolution
//! on viewport changes.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the viewport rectangle (and notify the engine when it changes)
//! - item counts and per-item natural size hints
//! - rendering for the frames, transforms, and z-orders the engine reports
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("waterfall requires either the `std` or `libm` feature for pixel-grid rounding");

#[macro_use]
mod macros;

mod engine;
mod error;
mod geometry;
mod options;
mod spatial;
mod tracker;
mod types;


pub use engine::Waterfall;
pub use error::LayoutError;
pub use geometry::{pixel_floor, EdgeInsets, Point, Rect, Size, Vector};
pub use options::{SectionOverride, WaterfallOptions};
pub use types::{
    ElementKind, HeaderOverlay, ItemRenderDirection, LayoutAttributes, Style, STICKY_Z_INDEX,
};

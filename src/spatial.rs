use alloc::vec::Vec;
use core::ops::Range;

use crate::geometry::Rect;
use crate::types::LayoutAttributes;

/// How many attributes each union rectangle covers.
pub(crate) const UNION_SIZE: usize = 20;

/// A coarse spatial index over the paint-ordered attribute list.
///
/// The list is partitioned into consecutive buckets of [`UNION_SIZE`]
/// attributes (the final bucket may be shorter); each bucket stores the
/// geometric union of its members' frames. Buckets partition the index
/// space with no gaps and no overlap, though their bounds may overlap
/// geometrically. Region queries test buckets first and only then the
/// attributes inside the bracketing span, bounding per-query work by
/// O(buckets + span) instead of O(total) — viewport queries run on every
/// scroll tick.
#[derive(Clone, Debug, Default)]
pub(crate) struct UnionIndex {
    rects: Vec<Rect>,
    len: usize,
}

impl UnionIndex {
    pub(crate) fn build(attributes: &[LayoutAttributes]) -> Self {
        let len = attributes.len();
        let mut rects = Vec::with_capacity(len.div_ceil(UNION_SIZE));
        let mut index = 0;
        while index < len {
            let bucket_end = (index + UNION_SIZE).min(len);
            let mut union = attributes[index].frame;
            for attr in &attributes[index + 1..bucket_end] {
                union = union.union(&attr.frame);
            }
            rects.push(union);
            index = bucket_end;
        }
        Self { rects, len }
    }

    pub(crate) fn clear(&mut self) {
        self.rects.clear();
        self.len = 0;
    }

    /// The attribute index span bracketed by the first and last buckets
    /// intersecting `rect`, in paint order; empty when no bucket intersects.
    ///
    /// Attributes inside the span still need an exact intersection test.
    pub(crate) fn span(&self, rect: &Rect) -> Range<usize> {
        let Some(first) = self.rects.iter().position(|r| r.intersects(rect)) else {
            return 0..0;
        };
        // A forward hit guarantees the reverse scan finds one too.
        let last = self
            .rects
            .iter()
            .rposition(|r| r.intersects(rect))
            .unwrap_or(first);

        let begin = first * UNION_SIZE;
        let end = ((last + 1) * UNION_SIZE).min(self.len);
        begin..end
    }
}

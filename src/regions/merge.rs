use std::collections::HashMap;

use crate::foundation::core::{OptimizedRegion, Region, Rgb8};

/// Horizontal distance (pixels) across which same-band regions still merge.
pub const MERGE_GAP_PX: u32 = 10;

/// Merge horizontally adjacent same-color regions using [`MERGE_GAP_PX`].
pub fn optimize(regions: &[Region]) -> Vec<OptimizedRegion> {
    optimize_with_gap(regions, MERGE_GAP_PX)
}

/// Merge horizontally adjacent same-color regions.
///
/// Regions are grouped by exact color; groups are emitted in the order each color first
/// appears in `regions`. Inside a group regions are sorted by `(y, x)` and a region is folded
/// into the previously emitted one when both share `y` and `h` and it starts no further than
/// `gap_px` pixels past the previous right edge (inclusive).
///
/// Nothing is validated here; degenerate rectangles pass through untouched.
#[tracing::instrument(skip(regions), fields(regions_in = regions.len()))]
pub fn optimize_with_gap(regions: &[Region], gap_px: u32) -> Vec<OptimizedRegion> {
    let mut out = Vec::with_capacity(regions.len());
    for mut group in group_by_color(regions) {
        // stable: equal (y, x) keys keep input order
        group.sort_by_key(|r| (r.y, r.x));
        merge_sorted_group(&group, gap_px, &mut out);
    }

    tracing::debug!(
        regions_in = regions.len(),
        regions_out = out.len(),
        "optimized highlight regions"
    );
    out
}

fn group_by_color(regions: &[Region]) -> Vec<Vec<Region>> {
    let mut slot_of = HashMap::<Rgb8, usize>::new();
    let mut groups = Vec::<Vec<Region>>::new();
    for r in regions {
        let slot = *slot_of.entry(r.color).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(*r);
    }
    groups
}

fn merge_sorted_group(group: &[Region], gap_px: u32, out: &mut Vec<OptimizedRegion>) {
    let group_start = out.len();
    for r in group {
        if out.len() > group_start
            && let Some(prev) = out.last_mut()
            && mergeable(prev, r, gap_px)
        {
            let right = (u64::from(prev.x) + u64::from(prev.w))
                .max(u64::from(r.x) + u64::from(r.w));
            prev.w = u32::try_from(right - u64::from(prev.x)).unwrap_or(u32::MAX);
            continue;
        }
        out.push(*r);
    }
}

fn mergeable(prev: &Region, r: &Region, gap_px: u32) -> bool {
    prev.y == r.y
        && prev.h == r.h
        && u64::from(r.x) <= u64::from(prev.x) + u64::from(prev.w) + u64::from(gap_px)
}

#[cfg(test)]
#[path = "../../tests/unit/regions/merge.rs"]
mod tests;

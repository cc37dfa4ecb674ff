//! One-dimensional placement shared by both layout axes.
//!
//! Columns on the horizontal axis and cells within a column on the vertical
//! axis are placed by the same routine: every item is part of one gap-free
//! contiguous chain, and the two policies differ only in where that chain
//! is anchored relative to the work area.

use serde::{Deserialize, Serialize};

/// How the selected item steers the chain on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlacementPolicy {
    /// Keep the selected item centered; neighbors chain flush outward.
    #[default]
    Center,
    /// Scroll minimally: keep a run of recently-used items on screen and
    /// only shift the chain when the selection would leave the work area.
    LazyFollow,
}

/// Compute chained positions for all items on one axis.
///
/// `sizes` are the item extents along the axis, `ranks` the MRU rank of
/// each item (lower = more recent, `usize::MAX` for unranked), `selected`
/// the index steering the placement, `extent` the work-area dimension and
/// `peek` the sliver margin kept for the next off-screen item under
/// lazy-follow.
///
/// The result always satisfies `pos[i + 1] == pos[i] + sizes[i]`: no gaps,
/// no overlaps, whatever the policy.
pub(crate) fn place_axis(
    sizes: &[i32],
    ranks: &[usize],
    selected: usize,
    extent: i32,
    policy: PlacementPolicy,
    peek: i32,
) -> Vec<i32> {
    debug_assert_eq!(sizes.len(), ranks.len());
    debug_assert!(selected < sizes.len());

    // Offset of each item within the chain, relative to item 0.
    let mut offsets = Vec::with_capacity(sizes.len());
    let mut acc = 0;
    for &size in sizes {
        offsets.push(acc);
        acc += size;
    }

    let (anchor_idx, anchor_pos) = match policy {
        PlacementPolicy::Center => (selected, extent / 2 - sizes[selected] / 2),
        PlacementPolicy::LazyFollow => visible_run(sizes, ranks, selected, extent, peek),
    };

    let origin = anchor_pos - offsets[anchor_idx];
    offsets.iter().map(|&off| origin + off).collect()
}

/// Grow the lazy-follow visible run and return `(first index, position)`
/// of its first item.
///
/// Starting from the selected item, the run extends toward whichever
/// unplaced neighbor has the lower MRU rank until the next candidate would
/// overflow the extent. The run is then aligned flush against the edge
/// that was about to overflow, inset by `peek` on the truncated side so a
/// sliver of the next off-screen item stays visible. If both sides run out
/// before the extent fills, the whole chain is centered as one block.
fn visible_run(
    sizes: &[i32],
    ranks: &[usize],
    selected: usize,
    extent: i32,
    peek: i32,
) -> (usize, i32) {
    let mut lo = selected;
    let mut hi = selected;
    let mut total = sizes[selected];

    loop {
        let left = lo.checked_sub(1);
        let right = if hi + 1 < sizes.len() { Some(hi + 1) } else { None };

        let candidate = match (left, right) {
            // Everything fits: center the whole chain as one block.
            (None, None) => return (lo, (extent - total) / 2),
            (Some(l), None) => l,
            (None, Some(r)) => r,
            // Strictly lower rank wins; ranks are a strict permutation of
            // open windows, so equality only happens for unranked items,
            // where the left/above side is preferred.
            (Some(l), Some(r)) => {
                if ranks[l] <= ranks[r] {
                    l
                } else {
                    r
                }
            }
        };

        if total + sizes[candidate] > extent {
            return if candidate < lo {
                // Growth stopped on a left/above neighbor: flush against
                // the right/bottom edge, leaving at least `peek` pixels of
                // that neighbor visible on the truncated side.
                ((lo), (extent - total).max(peek))
            } else {
                // Growth stopped on a right/below neighbor: flush against
                // the left/top edge, with the peek sliver on the right.
                ((lo), (extent - peek - total).min(0))
            };
        }

        if candidate < lo {
            lo = candidate;
        } else {
            hi = candidate;
        }
        total += sizes[candidate];
    }
}

//! Reshuffle window around a conflicting pairing.

use std::ops::Range;

/// Half-open window of `width` positions centred on `center`, inside `0..max_index`.
///
/// Both halves are `width / 2` (floor), so odd widths lose a slot. Width cut
/// off by one edge is added back on the other side until the window spans
/// the whole list.
pub fn window_range(center: usize, width: usize, max_index: usize) -> Range<usize> {
    let half = width / 2;

    let mut left = center.saturating_sub(half);
    let left_deficit = half.saturating_sub(center);
    let mut right = center + half + left_deficit;

    if right > max_index {
        left = left.saturating_sub(right - max_index);
        right = max_index;
    }

    left.min(right)..right
}

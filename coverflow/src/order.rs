/// Emits item ordinals in paint order for a given selection.
///
/// Items left of the selection come first (ascending), then items right of it (descending),
/// then the selection itself: back-to-front by distance from the centered item, with the
/// centered item painted last so its touch target is never occluded by a neighbor's
/// transformed bounding region.
///
/// Out-of-range selections are clamped; `count == 0` emits nothing.
pub fn for_each_paint_index(count: usize, selection: usize, mut f: impl FnMut(usize)) {
    if count == 0 {
        return;
    }
    let selection = selection.min(count - 1);

    for i in 0..selection {
        f(i);
    }
    for i in (selection + 1..count).rev() {
        f(i);
    }
    f(selection);
}

/// Collects the paint order into `out` (clears `out` first).
///
/// This is a convenience wrapper around [`for_each_paint_index`]. For maximum performance,
/// prefer the `for_each` form and reuse a scratch buffer in your adapter.
pub fn collect_paint_order(count: usize, selection: usize, out: &mut Vec<usize>) {
    out.clear();
    for_each_paint_index(count, selection, |i| out.push(i));
}

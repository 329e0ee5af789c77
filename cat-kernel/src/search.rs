/// Return the index into `sorted` (ascending) whose value is nearest
/// `target`. Ties prefer the lower index. Clamped at the ends:
/// `target <= sorted[0]` returns `0`, `target >= sorted[last]` returns
/// `sorted.len() - 1`. Runs in `O(log n)` via bisection.
///
/// Panics if `sorted` is empty — callers are expected to have already
/// handled the empty-pool case (selectors return `(None, [])` before
/// reaching this point).
pub fn closest_index(sorted: &[f64], target: f64) -> usize {
    let n = sorted.len();
    assert!(n > 0, "closest_index requires a nonempty slice");
    if target <= sorted[0] {
        return 0;
    }
    if target >= sorted[n - 1] {
        return n - 1;
    }
    // Binary search for the smallest index whose value is >= target.
    let mut lo = 0usize;
    let mut hi = n - 1;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if sorted[mid] < target {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    let upper = lo;
    let lower = upper.saturating_sub(1);
    let d_lower = (target - sorted[lower]).abs();
    let d_upper = (sorted[upper] - target).abs();
    if d_lower <= d_upper {
        lower
    } else {
        upper
    }
}

/// Returns the index of the first element of `keys` that is strictly greater
/// than `value`, or `keys.len()` if there is none. `keys` must be sorted in
/// non-decreasing order.
pub fn upper_bound<T: Ord>(keys: &[T], value: &T) -> usize {
    keys.partition_point(|key| key <= value)
}

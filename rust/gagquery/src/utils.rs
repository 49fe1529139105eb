use thiserror::Error;

/// Finds the index range of elements in a sorted slice whose keys fall within a closed range.
///
/// The slice must be sorted ascending by `key_fn`. Works with floating point keys,
/// which is the common case for m/z values.
///
/// # Examples
///
/// ```
/// use gagquery::utils::{
///     TupleRange,
///     binary_search_range_by_key,
/// };
///
/// let mzs = vec![100.0, 100.5, 101.0, 101.5, 102.0];
/// let range = TupleRange::try_new(100.4, 101.2).unwrap();
/// let idx = binary_search_range_by_key(&mzs, range, |x| *x);
/// assert_eq!(&mzs[idx], &[100.5, 101.0]);
///
/// let empty = TupleRange::try_new(200.0, 300.0).unwrap();
/// assert!(mzs[binary_search_range_by_key(&mzs, empty, |x| *x)].is_empty());
/// ```
pub fn binary_search_range_by_key<T, K, F>(
    slice: &[T],
    key_range: TupleRange<K>,
    key_fn: F,
) -> std::ops::Range<usize>
where
    F: Fn(&T) -> K,
    K: Copy + PartialOrd + std::fmt::Debug,
{
    let start_idx = slice.partition_point(|x| key_fn(x) < key_range.start());
    let end_idx =
        start_idx + slice[start_idx..].partition_point(|x| key_fn(x) <= key_range.end());

    start_idx..end_idx
}

/// Closed-closed range `[a, b]` with `a <= b` enforced on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TupleRange<T: Copy + PartialOrd>(pub(crate) T, pub(crate) T);

#[derive(Error, Debug)]
pub enum TupleRangeError<T: Copy + PartialOrd + std::fmt::Debug> {
    #[error(
        "Expected the first element to be less than or equal to the second, got ({0:?}, {1:?})"
    )]
    ExpectedOrderedRange(T, T),
}

impl<T: Copy + PartialOrd + std::fmt::Debug> TupleRange<T> {
    pub fn try_new(left: T, right: T) -> Result<Self, TupleRangeError<T>> {
        // NaN bounds fail the `<=` check as well
        if left <= right {
            Ok(Self(left, right))
        } else {
            Err(TupleRangeError::ExpectedOrderedRange(left, right))
        }
    }

    pub fn contains(&self, x: T) -> bool {
        self.0 <= x && x <= self.1
    }

    pub fn start(&self) -> T {
        self.0
    }

    pub fn end(&self) -> T {
        self.1
    }

    pub fn intersects(&self, other: Self) -> bool {
        !(self.end() < other.start() || other.end() < self.start())
    }
}

impl<T> TryFrom<(T, T)> for TupleRange<T>
where
    T: Copy + PartialOrd + std::fmt::Debug,
{
    type Error = TupleRangeError<T>;

    fn try_from(value: (T, T)) -> Result<Self, Self::Error> {
        TupleRange::try_new(value.0, value.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_rejects_reversed_bounds() {
        assert!(TupleRange::try_new(2.0, 1.0).is_err());
        assert!(TupleRange::try_new(f64::NAN, 1.0).is_err());
        let r = TupleRange::try_new(1.0, 1.0).unwrap();
        assert!(r.contains(1.0));
    }

    #[test]
    fn test_intersects() {
        let a = TupleRange::try_new(1.0, 2.0).unwrap();
        let b = TupleRange::try_new(2.0, 3.0).unwrap();
        let c = TupleRange::try_new(2.5, 3.0).unwrap();
        assert!(a.intersects(b));
        assert!(!a.intersects(c));
    }

    #[test]
    fn test_binary_search_inclusive_edges() {
        let vals = [1.0, 2.0, 2.0, 3.0];
        let r = TupleRange::try_new(2.0, 3.0).unwrap();
        assert_eq!(binary_search_range_by_key(&vals, r, |x| *x), 1..4);
    }
}

use std::ops::Range;

/// An iterator over the maximal runs of consecutive elements sharing the same key.
///
/// Each item is the key together with the index range of its run in the original slice.
pub struct GroupBy<'a, T, F, K>
where
    T: 'a,
    F: FnMut(&T) -> K,
    K: PartialEq,
{
    slice: &'a [T],
    offset: usize,
    key: F,
}

impl<'a, T, F, K> GroupBy<'a, T, F, K>
where
    T: 'a,
    F: FnMut(&T) -> K,
    K: PartialEq,
{
    pub fn new(slice: &'a [T], key: F) -> Self {
        GroupBy {
            slice,
            offset: 0,
            key,
        }
    }
}

impl<'a, T, F, K> Iterator for GroupBy<'a, T, F, K>
where
    T: 'a,
    F: FnMut(&T) -> K,
    K: PartialEq,
{
    type Item = (K, Range<usize>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (first, rest) = self.slice.split_first()?;
        let key = (self.key)(first);
        let mut len = 1;
        for x in rest {
            if key == (self.key)(x) {
                len += 1;
            } else {
                break;
            }
        }
        let start = self.offset;
        self.slice = &self.slice[len..];
        self.offset += len;
        Some((key, start..start + len))
    }
}

//! Index rules for `nameof.full` and `nameof.split` segments.

use std::ops::Range;

use crate::error::NameofErrorKind;

/// A `start..start + count` window over a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub count: usize,
}

impl Segment {
    /// The whole path, or the window selected by an explicit index.
    ///
    /// A non-negative index skips that many leading elements; a negative
    /// index keeps that many trailing elements.
    pub fn for_index(length: usize, index: Option<i64>) -> Result<Segment, NameofErrorKind> {
        let Some(index) = index else {
            return Ok(Segment { start: 0, count: length });
        };
        let magnitude = index.unsigned_abs();
        if magnitude > length as u64 {
            return Err(NameofErrorKind::IndexOutOfBounds { index, length });
        }
        let magnitude = magnitude as usize;
        if index >= 0 {
            Ok(Segment {
                start: magnitude,
                count: length - magnitude,
            })
        } else {
            Ok(Segment {
                start: length - magnitude,
                count: magnitude,
            })
        }
    }

    /// Only the last element.
    pub fn last(length: usize) -> Segment {
        Segment {
            start: length.saturating_sub(1),
            count: 1,
        }
    }

    /// The index range into a path of `length`, if the window fits.
    pub fn range(&self, length: usize) -> Result<Range<usize>, NameofErrorKind> {
        let end = self.start.checked_add(self.count);
        match end {
            Some(end) if self.start < length && end <= length => Ok(self.start..end),
            _ => Err(NameofErrorKind::SegmentNotFound {
                start: self.start,
                count: self.count,
                length,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_and_negative_indexes() {
        assert_eq!(Segment::for_index(3, None), Ok(Segment { start: 0, count: 3 }));
        assert_eq!(Segment::for_index(3, Some(1)), Ok(Segment { start: 1, count: 2 }));
        assert_eq!(Segment::for_index(3, Some(-1)), Ok(Segment { start: 2, count: 1 }));
        assert_eq!(Segment::for_index(3, Some(-3)), Ok(Segment { start: 0, count: 3 }));
    }

    #[test]
    fn test_every_index_in_bounds_matches_explicit_window() {
        for length in 0..6usize {
            let n = length as i64;
            for index in -n..=n {
                let segment = Segment::for_index(length, Some(index)).unwrap();
                let (start, count) = if index >= 0 {
                    (index as usize, length - index as usize)
                } else {
                    ((n + index) as usize, (-index) as usize)
                };
                assert_eq!(segment, Segment { start, count });
            }
            for index in [n + 1, -(n + 1)] {
                assert_eq!(
                    Segment::for_index(length, Some(index)),
                    Err(NameofErrorKind::IndexOutOfBounds { index, length })
                );
            }
        }
    }

    #[test]
    fn test_range_rejects_start_at_end() {
        let segment = Segment::for_index(2, Some(2)).unwrap();
        assert_eq!(
            segment.range(2),
            Err(NameofErrorKind::SegmentNotFound {
                start: 2,
                count: 0,
                length: 2
            })
        );
        assert!(Segment::last(0).range(0).is_err());
        assert_eq!(Segment::last(4).range(4), Ok(3..4));
    }
}

//! Cumulative length table over the segments of a spline or path.
//!
//! The map is an immutable snapshot of the point sequence it was built from.
//! Segments reference that sequence by index range instead of copying
//! points, so the map must be rebuilt whenever the points change.

use crate::vector::Point;
use std::ops::Range;

/// What a segment is made of.
#[derive(Clone, Debug, PartialEq)]
pub enum SegmentKind {
    /// Bezier segment over `points[range]`. `lead` is an extra first control
    /// point that is not part of the sequence: the end of a preceding arc.
    Curve {
        range: Range<usize>,
        lead: Option<Point>,
    },
    /// Elliptic arc described by the arc spec at `points[index]`, resolved
    /// around `center`.
    Arc { index: usize, center: Point },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub length: f64,
}

/// Per-segment lengths plus their running total.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SegmentMap {
    segments: Vec<Segment>,
    length: f64,
    step: f64,
}

/// The segment a global percentage falls on.
#[derive(Clone, Copy, Debug)]
pub struct Located<'a> {
    pub index: usize,
    pub segment: &'a Segment,
    /// Percentage (0-100) of the segment's own parameter range.
    pub local_percent: f64,
}

impl SegmentMap {
    pub(crate) fn new(step: f64) -> Self {
        Self {
            segments: Vec::new(),
            length: 0.0,
            step,
        }
    }

    pub(crate) fn push(&mut self, kind: SegmentKind, length: f64) {
        tracing::debug!(
            index = self.segments.len(),
            length,
            arc = matches!(kind, SegmentKind::Arc { .. }),
            "closed segment"
        );
        self.length += length;
        self.segments.push(Segment { kind, length });
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total estimated length of all segments.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Sampling step the lengths were estimated with.
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn lengths(&self) -> impl Iterator<Item = f64> + '_ {
        self.segments.iter().map(|segment| segment.length)
    }

    /// Resolve `percent` of the total traveled distance to a segment and a
    /// local percentage on it.
    ///
    /// Segments are consumed while the distance covered so far plus the next
    /// segment stays short of the target; the first segment that reaches it
    /// is active. The last segment absorbs any rounding overshoot. Returns
    /// `None` only for an empty map.
    pub fn locate(&self, percent: f64) -> Option<Located<'_>> {
        let last = self.segments.len().checked_sub(1)?;
        let target = if percent >= 100.0 {
            self.length
        } else {
            self.length / 100.0 * percent
        };

        let mut consumed = 0.0;
        let mut index = 0;
        while index < last && consumed + self.segments[index].length < target {
            consumed += self.segments[index].length;
            index += 1;
        }

        let segment = &self.segments[index];
        let local_percent = if segment.length > 0.0 {
            (target - consumed) / (segment.length / 100.0)
        } else {
            0.0
        };

        Some(Located {
            index,
            segment,
            local_percent,
        })
    }
}

/// Control points of a curve segment: the optional lead followed by the
/// positions of `points[range]`. `None` when the range no longer fits the
/// sequence or covers an element that has no position.
pub(crate) fn curve_controls<T>(
    points: &[T],
    range: &Range<usize>,
    lead: Option<Point>,
    position: impl Fn(&T) -> Option<Point>,
) -> Option<Vec<Point>> {
    let slice = points.get(range.clone())?;
    let mut controls = Vec::with_capacity(slice.len() + 1);
    controls.extend(lead);
    for point in slice {
        controls.push(position(point)?);
    }
    Some(controls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn map_of(lengths: &[f64]) -> SegmentMap {
        let mut map = SegmentMap::new(1.0);
        for (i, length) in lengths.iter().enumerate() {
            map.push(
                SegmentKind::Curve {
                    range: i..i + 2,
                    lead: None,
                },
                *length,
            );
        }
        map
    }

    #[test]
    fn test_running_total() {
        let map = map_of(&[10.0, 30.0, 60.0]);
        assert_eq!(map.len(), 3);
        assert_eq!(map.length(), 100.0);
        assert_eq!(map.lengths().collect::<Vec<_>>(), vec![10.0, 30.0, 60.0]);
    }

    #[test]
    fn test_locate_picks_segment_by_distance() {
        let map = map_of(&[10.0, 30.0, 60.0]);

        let located = map.locate(5.0).unwrap();
        assert_eq!(located.index, 0);
        assert!((located.local_percent - 50.0).abs() < 1e-9);

        let located = map.locate(25.0).unwrap();
        assert_eq!(located.index, 1);
        assert!((located.local_percent - 50.0).abs() < 1e-9);

        let located = map.locate(70.0).unwrap();
        assert_eq!(located.index, 2);
        assert!((located.local_percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_locate_boundary_stays_on_earlier_segment() {
        let map = map_of(&[10.0, 30.0]);
        let located = map.locate(25.0).unwrap();
        assert_eq!(located.index, 0);
        assert!((located.local_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_locate_end_and_start() {
        let map = map_of(&[10.0, 30.0]);
        let end = map.locate(100.0).unwrap();
        assert_eq!(end.index, 1);
        assert!((end.local_percent - 100.0).abs() < 1e-9);

        let end = map.locate(250.0).unwrap();
        assert_eq!(end.index, 1);
        assert!((end.local_percent - 100.0).abs() < 1e-9);

        let start = map.locate(0.0).unwrap();
        assert_eq!(start.index, 0);
        assert_eq!(start.local_percent, 0.0);
    }

    #[test]
    fn test_locate_skips_zero_length_segments() {
        let map = map_of(&[0.0, 20.0]);
        let located = map.locate(50.0).unwrap();
        assert_eq!(located.index, 1);

        let located = map.locate(0.0).unwrap();
        assert_eq!(located.index, 0);
        assert_eq!(located.local_percent, 0.0);
    }

    #[test]
    fn test_empty_map_locates_nothing() {
        assert!(SegmentMap::new(1.0).locate(50.0).is_none());
    }

    #[test]
    fn test_curve_controls_prepends_lead() {
        let points = [DVec2::new(1.0, 1.0), DVec2::new(2.0, 2.0)];
        let controls =
            curve_controls(&points, &(0..2), Some(DVec2::ZERO), |p| Some(*p)).unwrap();
        assert_eq!(controls, vec![DVec2::ZERO, points[0], points[1]]);

        assert!(curve_controls(&points, &(1..3), None, |p| Some(*p)).is_none());
    }
}

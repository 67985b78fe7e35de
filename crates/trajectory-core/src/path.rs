//! Mixed paths of Bezier segments and chained elliptic arcs.
//!
//! An arc spec carries no position. Each arc starts where the previous
//! segment ended (the origin for a leading arc), and whatever follows the
//! arc starts from the arc's end point.

use crate::bezier::{curve_length, point_on_curve};
use crate::ellipse::{arc_center, arc_end, elliptic_arc_length, point_on_arc};
use crate::segment_map::{curve_controls, SegmentKind, SegmentMap};
use crate::vector::{to_point, Point};
use glam::DVec2;
use trajectory_data::{PathPoint, SamplingConfig};

fn curve_position(point: &PathPoint) -> Option<Point> {
    match point {
        PathPoint::Curve(point) => Some(to_point(point)),
        PathPoint::Arc(_) => None,
    }
}

fn measure_curve(
    points: &[PathPoint],
    range: std::ops::Range<usize>,
    lead: Option<Point>,
    step: f64,
) -> (SegmentKind, f64) {
    let length = curve_controls(points, &range, lead, curve_position)
        .map(|controls| curve_length(&controls, step))
        .unwrap_or(0.0);
    (SegmentKind::Curve { range, lead }, length)
}

/// Split a mixed path into segments and measure each.
///
/// A curve segment closes at a flagged point or right before an arc spec.
/// Every arc spec is a segment of its own.
pub fn build_path_map(points: &[PathPoint], config: &SamplingConfig) -> SegmentMap {
    let step = config.effective_step();
    let mut map = SegmentMap::new(step);
    if points.is_empty() {
        tracing::warn!("building a path map from an empty point sequence");
        return map;
    }

    let last = points.len() - 1;
    let mut anchor = DVec2::ZERO;
    let mut start = 0;
    let mut lead = None;
    for (i, point) in points.iter().enumerate() {
        match point {
            PathPoint::Arc(arc) => {
                let center = arc_center(arc, anchor);
                let length = elliptic_arc_length(
                    arc.radius_x,
                    arc.radius_y,
                    arc.start_angle,
                    arc.end_angle,
                    step,
                );
                map.push(SegmentKind::Arc { index: i, center }, length);

                anchor = arc_end(arc, center);
                start = i + 1;
                lead = Some(anchor);
            }
            PathPoint::Curve(curve) => {
                let next_is_arc = points.get(i + 1).is_some_and(PathPoint::is_arc);
                if (curve.segment_end && i != last) || next_is_arc {
                    let (kind, length) = measure_curve(points, start..i + 1, lead, step);
                    map.push(kind, length);
                    start = i;
                    lead = None;
                }
                anchor = to_point(curve);
            }
        }
    }

    // A trailing arc already closed the final segment.
    if !points[last].is_arc() {
        let (kind, length) = measure_curve(points, start..points.len(), lead, step);
        map.push(kind, length);
    }

    tracing::trace!(segments = map.len(), length = map.length(), "built path map");
    map
}

/// Point at `percent` (0-100) of the path's total length.
///
/// `map` must have been built from these same `points`. An empty or stale
/// map yields a NaN point.
pub fn point_on_path(percent: f64, points: &[PathPoint], map: &SegmentMap) -> Point {
    let Some(located) = map.locate(percent) else {
        tracing::warn!("point requested on an empty path map");
        return DVec2::NAN;
    };

    let resolved = match &located.segment.kind {
        SegmentKind::Curve { range, lead } => curve_controls(points, range, *lead, curve_position)
            .map(|controls| point_on_curve(located.local_percent, &controls)),
        SegmentKind::Arc { index, center } => match points.get(*index) {
            Some(PathPoint::Arc(arc)) => Some(point_on_arc(located.local_percent, arc, *center)),
            _ => None,
        },
    };

    resolved.unwrap_or_else(|| {
        tracing::warn!(
            segment = located.index,
            points = points.len(),
            "path map does not match its points"
        );
        DVec2::NAN
    })
}

/// A mixed path that owns its points together with their length map.
#[derive(Clone, Debug)]
pub struct Path {
    points: Vec<PathPoint>,
    map: SegmentMap,
}

impl Path {
    pub fn new(points: Vec<PathPoint>, config: &SamplingConfig) -> Self {
        let map = build_path_map(&points, config);
        Self { points, map }
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn map(&self) -> &SegmentMap {
        &self.map
    }

    pub fn length(&self) -> f64 {
        self.map.length()
    }

    pub fn point_at(&self, percent: f64) -> Point {
        point_on_path(percent, &self.points, &self.map)
    }

    /// Where the path ends: the last curve point, or the end of a trailing arc.
    pub fn end_point(&self) -> Point {
        self.point_at(100.0)
    }
}

//! Multi-segment Bezier splines traversed by distance.

use crate::bezier::{curve_length, point_on_curve};
use crate::segment_map::{curve_controls, SegmentKind, SegmentMap};
use crate::vector::{to_point, Point};
use glam::DVec2;
use trajectory_data::{SamplingConfig, SplinePoint};

/// Split `points` into Bezier segments at flagged points and measure each.
///
/// A flagged point closes the current segment and also opens the next one,
/// so neighbouring segments share it. A flag on the final point has nothing
/// to open and is ignored.
pub fn build_spline_map(points: &[SplinePoint], config: &SamplingConfig) -> SegmentMap {
    let step = config.effective_step();
    let mut map = SegmentMap::new(step);
    if points.is_empty() {
        tracing::warn!("building a spline map from an empty point sequence");
        return map;
    }

    let positions: Vec<Point> = points.iter().map(to_point).collect();
    let last = points.len() - 1;
    let mut start = 0;
    for (i, point) in points.iter().enumerate() {
        if point.segment_end && i != last {
            let length = curve_length(&positions[start..=i], step);
            map.push(SegmentKind::Curve { range: start..i + 1, lead: None }, length);
            start = i;
        }
    }
    let length = curve_length(&positions[start..], step);
    map.push(SegmentKind::Curve { range: start..points.len(), lead: None }, length);

    tracing::trace!(segments = map.len(), length = map.length(), "built spline map");
    map
}

/// Point at `percent` (0-100) of the spline's total length.
///
/// `map` must have been built from these same `points`. An empty or stale
/// map yields a NaN point.
pub fn point_on_spline(percent: f64, points: &[SplinePoint], map: &SegmentMap) -> Point {
    let Some(located) = map.locate(percent) else {
        tracing::warn!("point requested on an empty spline map");
        return DVec2::NAN;
    };

    let controls = match &located.segment.kind {
        SegmentKind::Curve { range, lead } => {
            curve_controls(points, range, *lead, |point| Some(to_point(point)))
        }
        SegmentKind::Arc { .. } => None,
    };
    match controls {
        Some(controls) => point_on_curve(located.local_percent, &controls),
        None => {
            tracing::warn!(
                segment = located.index,
                points = points.len(),
                "spline map does not match its points"
            );
            DVec2::NAN
        }
    }
}

/// A spline that owns its points together with the length map built from
/// them, so the two cannot drift apart.
#[derive(Clone, Debug)]
pub struct Spline {
    points: Vec<SplinePoint>,
    map: SegmentMap,
}

impl Spline {
    pub fn new(points: Vec<SplinePoint>, config: &SamplingConfig) -> Self {
        let map = build_spline_map(&points, config);
        Self { points, map }
    }

    pub fn points(&self) -> &[SplinePoint] {
        &self.points
    }

    pub fn map(&self) -> &SegmentMap {
        &self.map
    }

    pub fn length(&self) -> f64 {
        self.map.length()
    }

    pub fn point_at(&self, percent: f64) -> Point {
        point_on_spline(percent, &self.points, &self.map)
    }

    /// Control points of every segment, in order.
    pub fn segment_controls(&self) -> Vec<Vec<Point>> {
        self.map
            .segments()
            .iter()
            .filter_map(|segment| match &segment.kind {
                SegmentKind::Curve { range, lead } => {
                    curve_controls(&self.points, range, *lead, |point| Some(to_point(point)))
                }
                SegmentKind::Arc { .. } => None,
            })
            .collect()
    }
}

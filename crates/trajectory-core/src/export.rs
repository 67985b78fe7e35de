//! Conversion of splines and paths to `kurbo::BezPath` for the drawing side.
//!
//! Degree 1-3 segments map onto native path elements. Higher degrees have no
//! kurbo counterpart and are flattened into lines sampled at the map's step.

use crate::bezier::point_on_curve;
use crate::ellipse::point_on_arc;
use crate::path::Path;
use crate::segment_map::{curve_controls, SegmentKind};
use crate::spline::Spline;
use crate::vector::{sample_percents, Point};
use kurbo::{Arc, BezPath, PathEl, Vec2};
use trajectory_data::PathPoint;

/// Tolerance used when approximating arcs with cubic segments.
const ARC_TOLERANCE: f64 = 0.01;

fn kurbo_point(point: Point) -> kurbo::Point {
    kurbo::Point::new(point.x, point.y)
}

/// Append one Bezier segment whose first control point is already the
/// current point of `path`, or start the path there.
fn append_curve(path: &mut BezPath, controls: &[Point], step: f64) {
    let Some(&first) = controls.first() else {
        return;
    };
    if path.elements().is_empty() {
        path.move_to(kurbo_point(first));
    }
    match controls {
        [] | [_] => {}
        [_, end] => path.line_to(kurbo_point(*end)),
        [_, c, end] => path.quad_to(kurbo_point(*c), kurbo_point(*end)),
        [_, c1, c2, end] => {
            path.curve_to(kurbo_point(*c1), kurbo_point(*c2), kurbo_point(*end))
        }
        _ => {
            for shift in sample_percents(step).skip(1) {
                path.line_to(kurbo_point(point_on_curve(shift, controls)));
            }
        }
    }
}

impl Spline {
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let step = self.map().step();
        for controls in self.segment_controls() {
            append_curve(&mut path, &controls, step);
        }
        path
    }
}

impl Path {
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let step = self.map().step();
        for segment in self.map().segments() {
            match &segment.kind {
                SegmentKind::Curve { range, lead } => {
                    if let Some(controls) =
                        curve_controls(self.points(), range, *lead, |point| match point {
                            PathPoint::Curve(p) => Some(Point::new(p.x, p.y)),
                            PathPoint::Arc(_) => None,
                        })
                    {
                        append_curve(&mut path, &controls, step);
                    }
                }
                SegmentKind::Arc { index, center } => {
                    let PathPoint::Arc(spec) = self.points()[*index] else {
                        continue;
                    };
                    let arc = Arc {
                        center: kurbo_point(*center),
                        radii: Vec2::new(spec.radius_x, spec.radius_y),
                        start_angle: spec.start_angle,
                        sweep_angle: spec.end_angle - spec.start_angle,
                        // The stored ellipse formula negates tilt before
                        // applying it clockwise, which nets out to a plain
                        // counterclockwise rotation by `tilt`.
                        x_rotation: spec.tilt,
                    };
                    if path.elements().is_empty() {
                        path.move_to(kurbo_point(point_on_arc(0.0, &spec, *center)));
                    }
                    for el in arc.append_iter(ARC_TOLERANCE) {
                        path.push(el);
                    }
                }
            }
        }
        path
    }
}

/// End point of the last element of a path, if any.
pub fn last_point(path: &BezPath) -> Option<kurbo::Point> {
    path.elements().last().and_then(|el| match el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
        PathEl::QuadTo(_, p) => Some(*p),
        PathEl::CurveTo(_, _, p) => Some(*p),
        PathEl::ClosePath => None,
    })
}

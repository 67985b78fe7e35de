//! Elliptic arcs chained from a known rim point.

use crate::vector::{distance, point_on_ellipse, sample_percents, Point};
use glam::DVec2;
use std::f64::consts::PI;
use trajectory_data::ArcSpec;

/// Polyline estimate of the arc between `start_angle` and `end_angle`,
/// sampled every `step` percent of the sweep.
///
/// Tilt and center do not change the length, so the arc is measured on the
/// untilted ellipse around the origin.
pub fn elliptic_arc_length(
    radius_x: f64,
    radius_y: f64,
    start_angle: f64,
    end_angle: f64,
    step: f64,
) -> f64 {
    let mut length = 0.0;
    let mut last = point_on_ellipse(radius_x, radius_y, start_angle, 0.0, DVec2::ZERO);
    let angle_per_percent = (end_angle - start_angle) / 100.0;
    for shift in sample_percents(step) {
        let angle = start_angle + angle_per_percent * shift;
        let point = point_on_ellipse(radius_x, radius_y, angle, 0.0, DVec2::ZERO);
        length += distance(point - last);
        last = point;
    }
    length
}

/// Center of the ellipse on which `anchor` sits at the arc's start angle.
pub fn arc_center(arc: &ArcSpec, anchor: Point) -> Point {
    point_on_ellipse(
        arc.radius_x,
        arc.radius_y,
        arc.start_angle + PI,
        arc.tilt,
        anchor,
    )
}

/// Where the arc ends, given its center.
pub fn arc_end(arc: &ArcSpec, center: Point) -> Point {
    point_on_ellipse(arc.radius_x, arc.radius_y, arc.end_angle, arc.tilt, center)
}

/// Point at `percent` of the arc's sweep.
pub fn point_on_arc(percent: f64, arc: &ArcSpec, center: Point) -> Point {
    let angle = arc.start_angle + (arc.end_angle - arc.start_angle) / 100.0 * percent;
    point_on_ellipse(arc.radius_x, arc.radius_y, angle, arc.tilt, center)
}

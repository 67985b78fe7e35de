//! Point sampling on circles and ellipses, plus the small vector helpers the
//! curve evaluators are built on.

use glam::DVec2;
use std::f64::consts::{FRAC_PI_2, PI};
use trajectory_data::{SamplingConfig, SplinePoint};

/// A position in the plane.
pub type Point = DVec2;

/// Missing (NaN) coordinates are treated as 0.
fn coerce(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

fn coerce_point(point: Point) -> Point {
    DVec2::new(coerce(point.x), coerce(point.y))
}

pub(crate) fn to_point(point: &SplinePoint) -> Point {
    DVec2::from(point.xy())
}

/// Percentages visited by the length estimators: 0, step, 2*step, ... while
/// the running sum stays at or below 100. The sum is accumulated rather than
/// multiplied so fractional steps sample exactly where an incrementing loop
/// would.
pub(crate) fn sample_percents(step: f64) -> impl Iterator<Item = f64> {
    let step = SamplingConfig::with_step(step).effective_step();
    std::iter::successors(Some(0.0_f64), move |shift| Some(shift + step))
        .take_while(|shift| *shift <= 100.0)
}

/// Polar to cartesian conversion around `center`.
pub fn point_on_circle(angle: f64, radius: f64, center: Point) -> Point {
    let center = coerce_point(center);
    DVec2::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Point at parametric `angle` on an ellipse whose axes are rotated by `tilt`.
pub fn point_on_ellipse(
    radius_x: f64,
    radius_y: f64,
    angle: f64,
    tilt: f64,
    center: Point,
) -> Point {
    let tilt = -coerce(tilt);
    let center = coerce_point(center);

    let x1 = radius_x * angle.cos();
    let y1 = radius_y * angle.sin();
    let x2 = x1 * tilt.cos() + y1 * tilt.sin();
    let y2 = -x1 * tilt.sin() + y1 * tilt.cos();

    DVec2::new(x2 + center.x, y2 + center.y)
}

/// Euclidean norm of a vector measured from the origin.
pub fn distance(point: Point) -> f64 {
    (point.x * point.x + point.y * point.y).sqrt()
}

/// Angle of `point - center` from an asin/acos cross-check.
///
/// Exact for the upper half-plane. Below the x axis the result is the asin
/// angle reflected about `PI / 2` when the vector points left, and the plain
/// (negative) asin angle when it points right. A zero-length vector yields
/// NaN.
pub fn angle_of_vector(point: Point, center: Point) -> f64 {
    let offset = point - center;
    let radius = distance(offset);
    let angle = (offset.y / radius).asin();
    let acos = (offset.x / radius).acos();
    if acos > FRAC_PI_2 {
        PI - angle
    } else {
        angle
    }
}

/// Vertices of a regular polygon inscribed in a circle.
///
/// The vertex at `angle` is emitted first and then again as vertex 0 of the
/// `sides` evenly spaced vertices, so the result holds `sides + 1` points.
pub fn points_on_polygon(sides: usize, angle: f64, radius: f64, center: Point) -> Vec<Point> {
    let mut points = Vec::with_capacity(sides + 1);
    points.push(point_on_circle(angle, radius, center));
    for i in 0..sides {
        let vertex_angle = PI * 2.0 / sides as f64 * i as f64 + angle;
        points.push(point_on_circle(vertex_angle, radius, center));
    }
    points
}

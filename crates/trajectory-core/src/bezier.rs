//! Bernstein evaluation of arbitrary-degree Bezier curves.

use crate::vector::{distance, sample_percents, Point};
use glam::DVec2;

/// `n!` as a float, so degrees past 20 do not overflow.
pub fn factorial(n: usize) -> f64 {
    (1..=n).fold(1.0, |acc, k| acc * k as f64)
}

/// Binomial coefficient `C(n, k)`; zero when `k > n`.
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    factorial(n) / (factorial(k) * factorial(n - k))
}

/// Point at `percent` (0-100) of the curve's parameter range.
///
/// The degree is `points.len() - 1`. A single point evaluates to itself and
/// an empty slice to the origin.
pub fn point_on_curve(percent: f64, points: &[Point]) -> Point {
    let Some(degree) = points.len().checked_sub(1) else {
        return DVec2::ZERO;
    };
    let t = percent / 100.0;

    points
        .iter()
        .enumerate()
        .fold(DVec2::ZERO, |acc, (i, point)| {
            let weight = binomial(degree, i)
                * t.powi(i as i32)
                * (1.0 - t).powi((degree - i) as i32);
            acc + *point * weight
        })
}

/// Linear interpolation between two points.
pub fn point_on_line(percent: f64, start: Point, end: Point) -> Point {
    DVec2::new(
        (end.x - start.x) * (percent / 100.0) + start.x,
        (end.y - start.y) * (percent / 100.0) + start.y,
    )
}

/// Polyline estimate of the curve's length, sampled every `step` percent.
pub fn curve_length(points: &[Point], step: f64) -> f64 {
    let Some(&first) = points.first() else {
        return 0.0;
    };

    let mut length = 0.0;
    let mut last = first;
    for shift in sample_percents(step) {
        let coord = point_on_curve(shift, points);
        length += distance(coord - last);
        last = coord;
    }
    length
}

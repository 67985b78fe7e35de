//! Arc-length parameterization of composite curves.
//!
//! A [`SegmentMap`] is built once per shape and reused across position
//! queries, so that `percent` always means "share of the distance traveled"
//! rather than a per-segment parameter.

pub mod bezier;
pub mod color;
pub mod ellipse;
pub mod export;
pub mod path;
pub mod segment_map;
pub mod spline;
pub mod vector;

pub use bezier::{binomial, curve_length, factorial, point_on_curve, point_on_line};
pub use color::{
    hex_to_rgba, interpolate_color, is_color, is_hex_color, is_rgb, is_rgba, random_in_range,
    random_rgb, rgb_to_rgba, try_interpolate_color, ColorError, ColorFormat, Rgba,
};
pub use ellipse::{arc_center, arc_end, elliptic_arc_length, point_on_arc};
pub use path::{build_path_map, point_on_path, Path};
pub use segment_map::{Located, Segment, SegmentKind, SegmentMap};
pub use spline::{build_spline_map, point_on_spline, Spline};
pub use trajectory_data::{ArcSpec, PathPoint, SamplingConfig, SplinePoint};
pub use vector::{
    angle_of_vector, distance, point_on_circle, point_on_ellipse, points_on_polygon, Point,
};

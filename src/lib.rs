//! Points, lengths and color blends along composite curves.
//!
//! Build a [`Spline`] or [`Path`] (or a [`SegmentMap`] next to your own point
//! sequence) once per shape, then ask for points by share of distance
//! traveled as often as needed.

pub use trajectory_core::*;
pub use trajectory_data as data;
pub use trajectory_data::{decode_path, decode_spline, DataError};

pub mod prelude {
    pub use trajectory_core::{
        interpolate_color, Path, Point, SegmentMap, Spline,
    };
    pub use trajectory_data::{ArcSpec, PathPoint, SamplingConfig, SplinePoint};
}

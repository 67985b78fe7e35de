pub mod model;

pub use model::{
    decode_path, decode_spline, ArcSpec, DataError, PathPoint, SamplingConfig, SplinePoint,
};

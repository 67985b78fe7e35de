use serde::{ser::SerializeSeq, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Errors raised while decoding point sequences from their array wire shape.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("point must have 2, 3 or 5 elements, found {0}")]
    Arity(usize),
    #[error("element {0} of a point is not a number")]
    NotANumber(usize),
    #[error("segment end flag must be a boolean")]
    InvalidFlag,
    #[error("point sequence is empty")]
    Empty,
    #[error("malformed point json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Sampling granularity used when estimating segment lengths.
///
/// `step` is a percentage: the default of 1 takes 100 samples per segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub step: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self { step: 1.0 }
    }
}

impl SamplingConfig {
    pub fn with_step(step: f64) -> Self {
        Self { step }
    }

    /// The step actually used by the samplers. Zero, negative and non-finite
    /// steps fall back to 1 so a sampling loop always terminates.
    pub fn effective_step(&self) -> f64 {
        if self.step.is_finite() && self.step > 0.0 {
            self.step
        } else {
            1.0
        }
    }
}

/// A control point of a spline. `segment_end` closes the current segment at
/// this point and starts the next one from it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SplinePoint {
    pub x: f64,
    pub y: f64,
    pub segment_end: bool,
}

impl SplinePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            segment_end: false,
        }
    }

    /// A point that terminates its segment.
    pub fn boundary(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            segment_end: true,
        }
    }

    pub fn xy(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    fn from_values(values: &[Value]) -> Result<Self, DataError> {
        if !(2..=3).contains(&values.len()) {
            return Err(DataError::Arity(values.len()));
        }
        let segment_end = match values.get(2) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => *flag,
            Some(_) => return Err(DataError::InvalidFlag),
        };
        Ok(Self {
            x: number(values, 0)?,
            y: number(values, 1)?,
            segment_end,
        })
    }
}

/// One elliptical arc of a path. The arc has no position of its own: it is
/// chained from wherever the previous segment ended.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ArcSpec {
    pub radius_x: f64,
    pub radius_y: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub tilt: f64,
}

impl ArcSpec {
    pub fn new(radius_x: f64, radius_y: f64, start_angle: f64, end_angle: f64, tilt: f64) -> Self {
        Self {
            radius_x,
            radius_y,
            start_angle,
            end_angle,
            tilt,
        }
    }

    fn from_values(values: &[Value]) -> Result<Self, DataError> {
        if values.len() != 5 {
            return Err(DataError::Arity(values.len()));
        }
        Ok(Self {
            radius_x: number(values, 0)?,
            radius_y: number(values, 1)?,
            start_angle: number(values, 2)?,
            end_angle: number(values, 3)?,
            tilt: number(values, 4)?,
        })
    }
}

/// Element of a mixed curve/arc path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathPoint {
    Curve(SplinePoint),
    Arc(ArcSpec),
}

impl PathPoint {
    pub fn curve(x: f64, y: f64) -> Self {
        PathPoint::Curve(SplinePoint::new(x, y))
    }

    pub fn boundary(x: f64, y: f64) -> Self {
        PathPoint::Curve(SplinePoint::boundary(x, y))
    }

    pub fn arc(radius_x: f64, radius_y: f64, start_angle: f64, end_angle: f64, tilt: f64) -> Self {
        PathPoint::Arc(ArcSpec::new(
            radius_x,
            radius_y,
            start_angle,
            end_angle,
            tilt,
        ))
    }

    pub fn is_arc(&self) -> bool {
        matches!(self, PathPoint::Arc(_))
    }

    fn from_values(values: &[Value]) -> Result<Self, DataError> {
        // Arc specs are told apart from curve points by arity alone.
        if values.len() > 3 {
            ArcSpec::from_values(values).map(PathPoint::Arc)
        } else {
            SplinePoint::from_values(values).map(PathPoint::Curve)
        }
    }
}

impl From<SplinePoint> for PathPoint {
    fn from(point: SplinePoint) -> Self {
        PathPoint::Curve(point)
    }
}

impl From<ArcSpec> for PathPoint {
    fn from(arc: ArcSpec) -> Self {
        PathPoint::Arc(arc)
    }
}

fn number(values: &[Value], index: usize) -> Result<f64, DataError> {
    values
        .get(index)
        .and_then(Value::as_f64)
        .ok_or(DataError::NotANumber(index))
}

/// Decode a spline from its json wire shape, e.g. `[[0,0],[1,0,true],[2,0]]`.
pub fn decode_spline(json: &str) -> Result<Vec<SplinePoint>, DataError> {
    let points: Vec<SplinePoint> = serde_json::from_str(json)?;
    if points.is_empty() {
        return Err(DataError::Empty);
    }
    Ok(points)
}

/// Decode a mixed path, where 5-element arrays are arc specs.
pub fn decode_path(json: &str) -> Result<Vec<PathPoint>, DataError> {
    let points: Vec<PathPoint> = serde_json::from_str(json)?;
    if points.is_empty() {
        return Err(DataError::Empty);
    }
    Ok(points)
}

impl<'de> Deserialize<'de> for SplinePoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<Value>::deserialize(deserializer)?;
        SplinePoint::from_values(&values).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for ArcSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<Value>::deserialize(deserializer)?;
        ArcSpec::from_values(&values).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for PathPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<Value>::deserialize(deserializer)?;
        PathPoint::from_values(&values).map_err(serde::de::Error::custom)
    }
}

impl Serialize for SplinePoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = if self.segment_end { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.x)?;
        seq.serialize_element(&self.y)?;
        if self.segment_end {
            seq.serialize_element(&true)?;
        }
        seq.end()
    }
}

impl Serialize for ArcSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [
            self.radius_x,
            self.radius_y,
            self.start_angle,
            self.end_angle,
            self.tilt,
        ]
        .serialize(serializer)
    }
}

impl Serialize for PathPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PathPoint::Curve(point) => point.serialize(serializer),
            PathPoint::Arc(arc) => arc.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spline_point_flag_defaults_to_false() {
        let point: SplinePoint = serde_json::from_str("[3, 4]").unwrap();
        assert_eq!(point, SplinePoint::new(3.0, 4.0));

        let point: SplinePoint = serde_json::from_str("[3, 4, true]").unwrap();
        assert!(point.segment_end);
    }

    #[test]
    fn test_path_point_arity_selects_variant() {
        let curve: PathPoint = serde_json::from_str("[1.5, 2, false]").unwrap();
        assert_eq!(curve, PathPoint::curve(1.5, 2.0));

        let arc: PathPoint = serde_json::from_str("[10, 5, 0, 3.14, 0.5]").unwrap();
        assert_eq!(arc, PathPoint::arc(10.0, 5.0, 0.0, 3.14, 0.5));
    }

    #[test]
    fn test_rejects_four_element_point() {
        let err = serde_json::from_str::<PathPoint>("[1, 2, 3, 4]").unwrap_err();
        assert!(err.to_string().contains("found 4"));
    }

    #[test]
    fn test_rejects_numeric_flag_on_spline_point() {
        assert!(serde_json::from_str::<SplinePoint>("[1, 2, 1]").is_err());
    }

    #[test]
    fn test_effective_step_guards_degenerate_steps() {
        assert_eq!(SamplingConfig::default().effective_step(), 1.0);
        assert_eq!(SamplingConfig::with_step(2.5).effective_step(), 2.5);
        assert_eq!(SamplingConfig::with_step(0.0).effective_step(), 1.0);
        assert_eq!(SamplingConfig::with_step(-3.0).effective_step(), 1.0);
        assert_eq!(SamplingConfig::with_step(f64::NAN).effective_step(), 1.0);
    }

    #[test]
    fn test_sampling_config_fills_missing_fields() {
        let config: SamplingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SamplingConfig::default());
    }
}

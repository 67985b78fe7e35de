//! Color strings: classification, normalization to rgba, interpolation.
//!
//! Parsing is deliberately lenient in the default entry points: anything
//! that is not recognized is read as if it were an `rgba(...)` string, and
//! missing channels come out as NaN. [`Rgba::parse`] and
//! [`try_interpolate_color`] are the strict variants.

use rand::Rng;
use std::fmt;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    #[error("empty color string")]
    Empty,
    #[error("unrecognized color format: {0:?}")]
    UnknownFormat(String),
    #[error("{channel} channel out of range: {value}")]
    OutOfRange { channel: &'static str, value: f64 },
}

/// Shape of a color string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    /// `#rgb` or `#rrggbb`.
    Hex,
    /// `rgb(r, g, b)` with up to three digits per channel.
    Rgb,
    /// `rgba(r, g, b, a)` with a single-digit alpha and optional fraction.
    Rgba,
    Invalid,
}

impl ColorFormat {
    pub fn classify(color: &str) -> Self {
        if is_hex_color(color) {
            ColorFormat::Hex
        } else if is_rgba(color) {
            ColorFormat::Rgba
        } else if is_rgb(color) {
            ColorFormat::Rgb
        } else {
            ColorFormat::Invalid
        }
    }
}

/// Byte cursor for the fixed color grammars. Matching is anchored at the
/// start of the string; anything after the closing parenthesis is ignored.
struct Cursor<'a> {
    rest: &'a [u8],
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            rest: input.as_bytes(),
        }
    }

    fn keyword(&mut self, word: &str) -> bool {
        let word = word.as_bytes();
        match self.rest.get(..word.len()) {
            Some(head) if head.eq_ignore_ascii_case(word) => {
                self.rest = &self.rest[word.len()..];
                true
            }
            _ => false,
        }
    }

    fn byte(&mut self, expected: u8) -> bool {
        match self.rest.first() {
            Some(&b) if b == expected => {
                self.rest = &self.rest[1..];
                true
            }
            _ => false,
        }
    }

    fn digits(&mut self, min: usize, max: usize) -> bool {
        let count = self
            .rest
            .iter()
            .take(max)
            .take_while(|b| b.is_ascii_digit())
            .count();
        if count < min {
            return false;
        }
        self.rest = &self.rest[count..];
        true
    }

    /// ` ?\d{1,3}`
    fn channel(&mut self) -> bool {
        self.byte(b' ');
        self.digits(1, 3)
    }
}

pub fn is_hex_color(color: &str) -> bool {
    let mut chars = color.chars();
    let len = color.chars().count();
    (len == 4 || len == 7)
        && chars.next() == Some('#')
        && chars.all(|c| c.is_ascii_hexdigit())
}

pub fn is_rgb(color: &str) -> bool {
    let mut cursor = Cursor::new(color);
    cursor.keyword("rgb(")
        && (0..2).all(|_| cursor.channel() && cursor.byte(b','))
        && cursor.channel()
        && cursor.byte(b')')
}

pub fn is_rgba(color: &str) -> bool {
    let mut cursor = Cursor::new(color);
    if !(cursor.keyword("rgba(") && (0..3).all(|_| cursor.channel() && cursor.byte(b','))) {
        return false;
    }
    cursor.byte(b' ');
    if !cursor.digits(1, 1) {
        return false;
    }
    // Optional fraction: a dot only counts when digits follow it.
    if cursor.rest.first() == Some(&b'.') && cursor.rest.get(1).is_some_and(u8::is_ascii_digit) {
        cursor.byte(b'.');
        cursor.digits(1, usize::MAX);
    }
    cursor.byte(b')')
}

pub fn is_color(color: &str) -> bool {
    ColorFormat::classify(color) != ColorFormat::Invalid
}

/// Color normalized to 0-255 channels and a 0-1 alpha. Channels are floats
/// so malformed input can surface as NaN instead of failing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Lenient normalization of any color string.
    pub fn from_str_lossy(color: &str) -> Self {
        match ColorFormat::classify(color) {
            ColorFormat::Hex => hex_to_rgba(color, None),
            ColorFormat::Rgb | ColorFormat::Rgba => rgb_to_rgba(color),
            ColorFormat::Invalid => {
                tracing::warn!(color, "unrecognized color format, reading it as rgba");
                rgb_to_rgba(color)
            }
        }
    }

    /// Strict parsing: the string must match one of the known formats and
    /// every channel must be in range.
    pub fn parse(color: &str) -> Result<Self, ColorError> {
        if color.is_empty() {
            return Err(ColorError::Empty);
        }
        let rgba = match ColorFormat::classify(color) {
            ColorFormat::Hex => hex_to_rgba(color, None),
            ColorFormat::Rgb | ColorFormat::Rgba => rgb_to_rgba(color),
            ColorFormat::Invalid => return Err(ColorError::UnknownFormat(color.to_string())),
        };
        for (channel, value, max) in [
            ("red", rgba.r, 255.0),
            ("green", rgba.g, 255.0),
            ("blue", rgba.b, 255.0),
            ("alpha", rgba.a, 1.0),
        ] {
            if !(0.0..=max).contains(&value) {
                return Err(ColorError::OutOfRange { channel, value });
            }
        }
        Ok(rgba)
    }

    /// Channel-wise blend at `percent` (0-100). Color channels round to
    /// integers (halves up), alpha to four decimals.
    pub fn lerp(&self, other: &Self, percent: f64) -> Self {
        // Scale before dividing so exact midpoints such as 127.5 stay exact.
        let mix = |from: f64, to: f64| from + (to - from) * percent / 100.0;
        Self {
            r: round_half_up(mix(self.r, other.r)),
            g: round_half_up(mix(self.g, other.g)),
            b: round_half_up(mix(self.b, other.b)),
            a: (mix(self.a, other.a) * 10_000.0).round() / 10_000.0,
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Value of the leading hex digits; NaN when there are none.
fn hex_value(digits: &[char]) -> f64 {
    digits
        .iter()
        .map_while(|c| c.to_digit(16))
        .fold(None, |acc: Option<f64>, d| Some(acc.unwrap_or(0.0) * 16.0 + d as f64))
        .unwrap_or(f64::NAN)
}

/// Expand `#rgb` / `#rrggbb` to rgba. Any other length gives black.
/// An explicit `opacity`, including 0, replaces the default alpha of 1.
pub fn hex_to_rgba(hex: &str, opacity: Option<f64>) -> Rgba {
    let chars: Vec<char> = hex.chars().collect();
    let mut rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    match chars.len() {
        4 => {
            rgba.r = hex_value(&[chars[1], chars[1]]);
            rgba.g = hex_value(&[chars[2], chars[2]]);
            rgba.b = hex_value(&[chars[3], chars[3]]);
        }
        7 => {
            rgba.r = hex_value(&chars[1..3]);
            rgba.g = hex_value(&chars[3..5]);
            rgba.b = hex_value(&chars[5..7]);
        }
        _ => {}
    }
    if let Some(opacity) = opacity.filter(|o| !o.is_nan()) {
        rgba.a = opacity;
    }
    rgba
}

/// Numeric tokens as `\d{1,3}(\.\d+)?` finds them, left to right.
fn numeric_tokens(color: &str) -> Vec<&str> {
    let bytes = color.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && i - start < 3 && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if bytes.get(i) == Some(&b'.') && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }
        tokens.push(&color[start..i]);
    }
    tokens
}

/// Read the first four numbers of an `rgb(...)` / `rgba(...)` string.
///
/// Missing color channels are NaN. The alpha is 0 only for a literal `0`
/// token; a missing or zero-valued token otherwise means 1.
pub fn rgb_to_rgba(color: &str) -> Rgba {
    let tokens = numeric_tokens(color);
    let channel = |i: usize| {
        tokens
            .get(i)
            .and_then(|token| token.parse::<f64>().ok())
            .unwrap_or(f64::NAN)
    };
    let a = match tokens.get(3) {
        Some(&"0") => 0.0,
        Some(token) => token
            .parse::<f64>()
            .ok()
            .filter(|a| *a != 0.0 && !a.is_nan())
            .unwrap_or(1.0),
        None => 1.0,
    };
    Rgba::new(channel(0), channel(1), channel(2), a)
}

/// Blend two color strings at `percent` (0-100) into an `rgba(...)` string.
pub fn interpolate_color(start: &str, end: &str, percent: f64) -> String {
    let from = Rgba::from_str_lossy(start);
    let to = Rgba::from_str_lossy(end);
    from.lerp(&to, percent).to_string()
}

/// [`interpolate_color`] that rejects malformed colors.
pub fn try_interpolate_color(start: &str, end: &str, percent: f64) -> Result<String, ColorError> {
    let from = Rgba::parse(start)?;
    let to = Rgba::parse(end)?;
    Ok(from.lerp(&to, percent).to_string())
}

/// Uniform integer in `[min, max]`, in either argument order.
pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, min: u8, max: u8) -> u8 {
    rng.gen_range(min.min(max)..=min.max(max))
}

/// Random `rgb(r,g,b)` string with every channel in `[min, max]`.
pub fn random_rgb<R: Rng + ?Sized>(rng: &mut R, min: u8, max: u8) -> String {
    let r = random_in_range(rng, min, max);
    let g = random_in_range(rng, min, max);
    let b = random_in_range(rng, min, max);
    format!("rgb({r},{g},{b})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_hex_long_and_short_forms() {
        assert_eq!(hex_to_rgba("#ffffff", None), Rgba::new(255.0, 255.0, 255.0, 1.0));
        assert_eq!(hex_to_rgba("#fff", None), Rgba::new(255.0, 255.0, 255.0, 1.0));
        assert_eq!(hex_to_rgba("#1a2B3c", None), Rgba::new(26.0, 43.0, 60.0, 1.0));
        assert_eq!(hex_to_rgba("#abc", None), Rgba::new(170.0, 187.0, 204.0, 1.0));
    }

    #[test]
    fn test_hex_opacity_override() {
        assert_eq!(hex_to_rgba("#000", Some(0.0)).a, 0.0);
        assert_eq!(hex_to_rgba("#000000", Some(0.25)).a, 0.25);
        assert_eq!(hex_to_rgba("#000000", Some(f64::NAN)).a, 1.0);
    }

    #[test]
    fn test_hex_other_lengths_are_black() {
        assert_eq!(hex_to_rgba("#ffff", None), Rgba::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(hex_to_rgba("", Some(0.5)), Rgba::new(0.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn test_hex_reads_leading_digits_only() {
        let rgba = hex_to_rgba("#1g2h3i", None);
        assert_eq!(rgba.r, 1.0);
        assert_eq!(rgba.g, 2.0);
        assert_eq!(rgba.b, 3.0);
        assert!(hex_to_rgba("#zzz", None).r.is_nan());
    }

    #[test]
    fn test_rgb_strings() {
        assert_eq!(rgb_to_rgba("rgb(10, 20, 30)"), Rgba::new(10.0, 20.0, 30.0, 1.0));
        assert_eq!(rgb_to_rgba("rgba(10,20,30,0)"), Rgba::new(10.0, 20.0, 30.0, 0.0));
        assert_eq!(rgb_to_rgba("rgba(10,20,30,0.35)").a, 0.35);
        // Zero-valued alpha that is not the literal "0" falls back to 1.
        assert_eq!(rgb_to_rgba("rgba(10,20,30,0.0)").a, 1.0);
    }

    #[test]
    fn test_rgb_missing_channels_are_nan() {
        let rgba = rgb_to_rgba("rgb(10)");
        assert_eq!(rgba.r, 10.0);
        assert!(rgba.g.is_nan());
        assert!(rgba.b.is_nan());
        assert_eq!(rgba.a, 1.0);
    }

    #[test]
    fn test_numeric_tokens_split_long_runs() {
        assert_eq!(numeric_tokens("1234.5x7."), vec!["123", "4.5", "7"]);
    }

    #[test]
    fn test_classification() {
        assert_eq!(ColorFormat::classify("#a0B"), ColorFormat::Hex);
        assert_eq!(ColorFormat::classify("#a0b1c2"), ColorFormat::Hex);
        assert_eq!(ColorFormat::classify("#a0b1cz"), ColorFormat::Invalid);
        assert_eq!(ColorFormat::classify("rgb(1, 22,255)"), ColorFormat::Rgb);
        assert_eq!(ColorFormat::classify("RGB(1,2,3)"), ColorFormat::Rgb);
        assert_eq!(ColorFormat::classify("rgb(1,2,3"), ColorFormat::Invalid);
        assert_eq!(ColorFormat::classify("rgb(1000,2,3)"), ColorFormat::Invalid);
        assert_eq!(ColorFormat::classify("rgba(1,2,3,0.5)"), ColorFormat::Rgba);
        assert_eq!(ColorFormat::classify("rgba(1,2,3, 1)"), ColorFormat::Rgba);
        assert_eq!(ColorFormat::classify("rgba(1,2,3,10)"), ColorFormat::Invalid);
        assert_eq!(ColorFormat::classify("red"), ColorFormat::Invalid);
        assert!(is_color("#fff"));
        assert!(!is_color("fff"));
    }

    #[test]
    fn test_interpolate_rgba() {
        assert_eq!(
            interpolate_color("rgba(0,0,0,1)", "rgba(255,255,255,0)", 50.0),
            "rgba(128,128,128,0.5)"
        );
    }

    #[test]
    fn test_interpolate_mixed_formats() {
        assert_eq!(interpolate_color("#000", "rgb(100,200,50)", 0.0), "rgba(0,0,0,1)");
        assert_eq!(
            interpolate_color("#000", "rgb(100,200,50)", 100.0),
            "rgba(100,200,50,1)"
        );
        assert_eq!(
            interpolate_color("#ff0000", "rgba(0,0,255,0.2)", 25.0),
            "rgba(191,0,64,0.8)"
        );
    }

    #[test]
    fn test_interpolate_unknown_format_degrades() {
        assert_eq!(
            interpolate_color("red", "rgb(0,0,0)", 50.0),
            "rgba(NaN,NaN,NaN,1)"
        );
    }

    #[test]
    fn test_strict_parsing() {
        assert_eq!(Rgba::parse(""), Err(ColorError::Empty));
        assert!(matches!(Rgba::parse("red"), Err(ColorError::UnknownFormat(_))));
        assert!(matches!(
            Rgba::parse("rgb(300,0,0)"),
            Err(ColorError::OutOfRange { channel: "red", .. })
        ));
        assert!(matches!(
            Rgba::parse("rgba(0,0,0,5)"),
            Err(ColorError::OutOfRange { channel: "alpha", .. })
        ));
        assert!(try_interpolate_color("#fff", "blue", 10.0).is_err());
        assert_eq!(
            try_interpolate_color("#fff", "#000", 100.0).unwrap(),
            "rgba(0,0,0,1)"
        );
    }

    #[test]
    fn test_random_rgb_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let color = random_rgb(&mut rng, 40, 60);
            assert!(is_rgb(&color));
            let rgba = rgb_to_rgba(&color);
            for channel in [rgba.r, rgba.g, rgba.b] {
                assert!((40.0..=60.0).contains(&channel));
            }
        }
        assert_eq!(random_in_range(&mut rng, 9, 9), 9);
        assert!((3..=5).contains(&random_in_range(&mut rng, 5, 3)));
    }
}

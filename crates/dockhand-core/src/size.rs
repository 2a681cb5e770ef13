use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A pixel size or the `auto` sentinel ("determined by content").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SizeRepr", into = "SizeRepr")]
pub enum SizeValue {
    Px(f32),
    Auto,
}

impl SizeValue {
    pub fn is_auto(self) -> bool {
        matches!(self, SizeValue::Auto)
    }

    pub fn px(self) -> Option<f32> {
        match self {
            SizeValue::Px(v) => Some(v),
            SizeValue::Auto => None,
        }
    }
}

impl Default for SizeValue {
    fn default() -> Self {
        SizeValue::Auto
    }
}

impl fmt::Display for SizeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeValue::Px(v) => write!(f, "{}px", v),
            SizeValue::Auto => f.write_str("auto"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSizeError {
    input: String,
}

impl fmt::Display for ParseSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid size value: {:?}", self.input)
    }
}

impl std::error::Error for ParseSizeError {}

impl FromStr for SizeValue {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(SizeValue::Auto);
        }
        parse_px(s).map(SizeValue::Px).ok_or_else(|| ParseSizeError {
            input: s.to_string(),
        })
    }
}

/// Parse the leading number of an attribute value: `"150"`, `"150px"` and
/// `" 42.5"` all parse, `"auto"` or `"px"` do not.
pub fn parse_px(text: &str) -> Option<f32> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            has_digits = true;
            end = frac_end;
        }
    }

    if !has_digits {
        return None;
    }
    text[..end].parse::<f32>().ok().filter(|v| v.is_finite())
}

// Wire form: a bare number or the keyword "auto".
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SizeRepr {
    Px(f32),
    Keyword(String),
}

impl TryFrom<SizeRepr> for SizeValue {
    type Error = ParseSizeError;

    fn try_from(repr: SizeRepr) -> Result<Self, Self::Error> {
        match repr {
            SizeRepr::Px(v) => Ok(SizeValue::Px(v)),
            SizeRepr::Keyword(s) => s.parse(),
        }
    }
}

impl From<SizeValue> for SizeRepr {
    fn from(value: SizeValue) -> Self {
        match value {
            SizeValue::Px(v) => SizeRepr::Px(v),
            SizeValue::Auto => SizeRepr::Keyword("auto".to_string()),
        }
    }
}

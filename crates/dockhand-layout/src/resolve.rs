// Size constraint resolution
// Pure functions over a panel's declared values and its frames. Nothing here
// mutates a frame.

use dockhand_core::{parse_px, Axis, Constraint, Frame, SizeValue};
use serde::{Deserialize, Serialize};

/// Values a panel declares for itself, before its frames weigh in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Declared {
    pub width: SizeValue,
    pub height: SizeValue,
    pub min_width: SizeValue,
    pub min_height: SizeValue,
    /// `None` leaves the cap entirely to the frames.
    pub max_width: Option<SizeValue>,
    pub max_height: Option<SizeValue>,
}

pub const DEFAULT_PANEL_SIZE: f32 = 200.0;

impl Default for Declared {
    fn default() -> Self {
        Self {
            width: SizeValue::Px(DEFAULT_PANEL_SIZE),
            height: SizeValue::Px(DEFAULT_PANEL_SIZE),
            min_width: SizeValue::Px(DEFAULT_PANEL_SIZE),
            min_height: SizeValue::Px(DEFAULT_PANEL_SIZE),
            max_width: None,
            max_height: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSize {
    pub width: SizeValue,
    pub height: SizeValue,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMax {
    pub min_width: SizeValue,
    pub min_height: SizeValue,
    pub max_width: SizeValue,
    pub max_height: SizeValue,
}

impl MinMax {
    /// What a panel reports before it has ever been resolved.
    pub fn from_declared(declared: &Declared) -> Self {
        Self {
            min_width: declared.min_width,
            min_height: declared.min_height,
            max_width: declared.max_width.unwrap_or(SizeValue::Auto),
            max_height: declared.max_height.unwrap_or(SizeValue::Auto),
        }
    }
}

/// Compute a panel's width and height from its frames.
pub fn resolve_size<'a, F, I>(declared: &Declared, frames: I) -> ResolvedSize
where
    F: Frame + ?Sized + 'a,
    I: IntoIterator<Item = &'a F>,
{
    let mut width = declared.width;
    let mut height = declared.height;
    for frame in frames {
        width = widen(width, frame.size(Axis::Width));
        height = widen(height, frame.size(Axis::Height));
    }
    ResolvedSize { width, height }
}

/// Compute min/max constraints from the frames' declared attributes.
pub fn resolve_min_max<'a, F, I>(declared: &Declared, frames: I) -> MinMax
where
    F: Frame + ?Sized + 'a,
    I: IntoIterator<Item = &'a F>,
{
    let mut min_width = MinAxis::new(declared.min_width);
    let mut min_height = MinAxis::new(declared.min_height);
    let mut max_width = MaxAxis::new(declared.max_width);
    let mut max_height = MaxAxis::new(declared.max_height);

    for frame in frames {
        min_width.push(attribute_px(frame, Constraint::MinWidth));
        min_height.push(attribute_px(frame, Constraint::MinHeight));
        max_width.push(attribute_px(frame, Constraint::MaxWidth));
        max_height.push(attribute_px(frame, Constraint::MaxHeight));
    }

    MinMax {
        min_width: min_width.finish(),
        min_height: min_height.finish(),
        max_width: max_width.finish(),
        max_height: max_height.finish(),
    }
}

/// `auto` on either side is sticky; otherwise the larger size wins.
fn widen(current: SizeValue, child: SizeValue) -> SizeValue {
    match (current, child) {
        (SizeValue::Auto, _) | (_, SizeValue::Auto) => SizeValue::Auto,
        (SizeValue::Px(a), SizeValue::Px(b)) => SizeValue::Px(a.max(b)),
    }
}

fn attribute_px<F: Frame + ?Sized>(frame: &F, constraint: Constraint) -> Option<f32> {
    frame.attribute(constraint).and_then(parse_px)
}

// ──────────────────────────────────────────────
// Per-axis accumulators
// ──────────────────────────────────────────────

/// Mins only tighten upward. Missing, malformed or non-positive child
/// values are ignored.
struct MinAxis {
    value: SizeValue,
}

impl MinAxis {
    fn new(declared: SizeValue) -> Self {
        Self { value: declared }
    }

    fn push(&mut self, child: Option<f32>) {
        let Some(child) = child.filter(|v| *v > 0.0) else {
            return;
        };
        self.value = match self.value {
            SizeValue::Auto => SizeValue::Px(child),
            SizeValue::Px(current) => SizeValue::Px(current.max(child)),
        };
    }

    fn finish(self) -> SizeValue {
        self.value
    }
}

/// Maxes only relax. A child without a numeric max means "no cap" and
/// infects the axis for good.
struct MaxAxis {
    value: Option<f32>,
    infinite: bool,
}

impl MaxAxis {
    fn new(declared: Option<SizeValue>) -> Self {
        Self {
            value: declared.and_then(SizeValue::px),
            infinite: matches!(declared, Some(SizeValue::Auto)),
        }
    }

    fn push(&mut self, child: Option<f32>) {
        if self.infinite {
            return;
        }
        match child {
            None => self.infinite = true,
            Some(v) if v > 0.0 => {
                if self.value.map_or(true, |current| v > current) {
                    self.value = Some(v);
                }
            }
            Some(_) => {}
        }
    }

    fn finish(self) -> SizeValue {
        match (self.infinite, self.value) {
            (false, Some(v)) => SizeValue::Px(v),
            _ => SizeValue::Auto,
        }
    }
}

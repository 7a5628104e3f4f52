// SPDX-License-Identifier: GPL-3.0-or-later
//! Mapping normalized values to colors.
use std::fmt;

use tracing::debug;

use crate::error::PipelineError;

use super::color::Color;

/// Anchor points of the Iron ramp, as (position, color) pairs in ascending position order.
///
/// The ramp runs from black at 0.0 through dark purple, magenta, red, orange and yellow to white
/// at 1.0. Colors between anchors are linearly blended.
pub const IRON: [(f32, Color); 8] = [
    (0.00, Color::new(0x00, 0x00, 0x00)),
    (0.15, Color::new(0x20, 0x00, 0x8C)),
    (0.30, Color::new(0x8C, 0x00, 0xA0)),
    (0.45, Color::new(0xC8, 0x1E, 0x5A)),
    (0.60, Color::new(0xF0, 0x50, 0x00)),
    (0.75, Color::new(0xFF, 0xA0, 0x00)),
    (0.90, Color::new(0xFF, 0xE6, 0x40)),
    (1.00, Color::new(0xFF, 0xFF, 0xFF)),
];

/// The color `color_for(0.0)` maps to with the Iron ramp.
pub const IRON_COLD: Color = IRON[0].1;

/// The color `color_for(1.0)` maps to with the Iron ramp.
pub const IRON_HOT: Color = IRON[IRON.len() - 1].1;

/// Default number of graduated colors.
pub const DEFAULT_PALETTE_SIZE: usize = 100;

/// The ramp a [`Palette`] is sampled from.
#[derive(Clone, Copy)]
pub enum PaletteKind {
    Iron,
    Gradient(colorous::Gradient),
}

impl PaletteKind {
    /// Evaluate the ramp at `position` (0.0 to 1.0) without any quantization.
    pub fn eval(&self, position: f32) -> Color {
        let position = clamp_unit(position);
        match self {
            Self::Iron => eval_iron(position),
            Self::Gradient(gradient) => gradient.eval_continuous(position as f64).into(),
        }
    }
}

impl Default for PaletteKind {
    fn default() -> Self {
        Self::Iron
    }
}

impl fmt::Debug for PaletteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iron => f.write_str("Iron"),
            Self::Gradient(gradient) => f.debug_tuple("Gradient").field(gradient).finish(),
        }
    }
}

impl PartialEq for PaletteKind {
    fn eq(&self, other: &Self) -> bool {
        // colorous::Gradient doesn't implement PartialEq, but the Debug output includes the name.
        format!("{:?}", self) == format!("{:?}", other)
    }
}

/// Clamp a value into 0.0 to 1.0, treating NaN as 0.0.
pub(crate) fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0).min(1.0)
    }
}

fn eval_iron(position: f32) -> Color {
    let upper_index = IRON
        .iter()
        .position(|(anchor, _)| *anchor >= position)
        .unwrap_or(IRON.len() - 1);
    if upper_index == 0 {
        return IRON[0].1;
    }
    let (low_position, low_color) = IRON[upper_index - 1];
    let (high_position, high_color) = IRON[upper_index];
    let t = (position - low_position) / (high_position - low_position);
    low_color.lerp(&high_color, t)
}

/// A fixed set of `size + 1` colors sampled from a ramp at positions `k / size`.
///
/// Quantizing to discrete steps keeps the colors of a mostly static scene stable from frame to
/// frame, which is what lets the grid renderer skip unchanged cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    kind: PaletteKind,
    steps: Vec<Color>,
}

impl Palette {
    pub fn new(kind: PaletteKind, size: usize) -> Result<Self, PipelineError> {
        if size == 0 {
            return Err(PipelineError::InvalidConfig(
                "palette size must be greater than 0".to_string(),
            ));
        }
        let steps = (0..=size)
            .map(|step| kind.eval(step as f32 / size as f32))
            .collect();
        debug!(?kind, size, "built palette");
        Ok(Self { kind, steps })
    }

    pub fn iron(size: usize) -> Result<Self, PipelineError> {
        Self::new(PaletteKind::Iron, size)
    }

    /// The number of graduated steps (one less than the number of colors).
    pub fn size(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn kind(&self) -> PaletteKind {
        self.kind
    }

    /// Map a normalized value to its quantized palette color.
    ///
    /// Out of range values (and NaN) are clamped into 0.0 to 1.0 first.
    pub fn color_for(&self, value: f32) -> Color {
        let size = self.size();
        let step = (clamp_unit(value) * size as f32).round() as usize;
        self.steps[step.min(size)]
    }

    /// The unquantized ramp color at `position`.
    pub fn color_at(&self, position: f32) -> Color {
        self.kind.eval(position)
    }
}

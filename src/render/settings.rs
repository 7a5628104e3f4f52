// SPDX-License-Identifier: GPL-3.0-or-later
use serde::Deserialize;

use crate::settings::gradient;
use crate::temperature::TemperatureUnit;

use super::palette::{PaletteKind, DEFAULT_PALETTE_SIZE};

/// What the cell grid shows.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// The thermal image itself.
    Image,

    /// A histogram of the normalized values.
    Histogram,
}

impl Default for DisplayMode {
    fn default() -> Self {
        Self::Image
    }
}

fn default_palette_size() -> usize {
    DEFAULT_PALETTE_SIZE
}

fn default_selfie() -> bool {
    true
}

fn default_cell_size() -> u32 {
    16
}

fn default_units() -> TemperatureUnit {
    TemperatureUnit::Fahrenheit
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct RenderSettings {
    /// The number of graduated palette steps.
    #[serde(default = "default_palette_size")]
    pub palette_size: usize,

    #[serde(default, deserialize_with = "gradient::deserialize")]
    pub palette: PaletteKind,

    /// Mirror the image, for a camera facing the operator.
    #[serde(default = "default_selfie")]
    pub selfie: bool,

    #[serde(default)]
    pub mode: DisplayMode,

    /// The size (in pixels) each cell is drawn as in the preview image.
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,

    /// The unit statistics are reported in.
    #[serde(default = "default_units")]
    pub units: TemperatureUnit,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            palette_size: default_palette_size(),
            palette: PaletteKind::default(),
            selfie: default_selfie(),
            mode: DisplayMode::default(),
            cell_size: default_cell_size(),
            units: default_units(),
        }
    }
}

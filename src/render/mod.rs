// SPDX-License-Identifier: GPL-3.0-or-later
//! Coloring normalized grids.
mod color;
mod grid;
mod palette;
pub mod preview;
mod settings;

pub use self::color::Color;
pub use self::grid::GridRenderer;
pub use self::palette::{
    Palette, PaletteKind, DEFAULT_PALETTE_SIZE, IRON, IRON_COLD, IRON_HOT,
};
pub use self::settings::{DisplayMode, RenderSettings};

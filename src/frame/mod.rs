// SPDX-License-Identifier: GPL-3.0-or-later
//! Turning raw sensor frames into normalized grids.
mod normalize;
mod upscale;

pub use normalize::{FrameNormalizer, Orientation, Statistics, TemperatureRange};
pub use upscale::Upscaler;

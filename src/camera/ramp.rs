// SPDX-License-Identifier: GPL-3.0-or-later
use ndarray::Array2;

use crate::grid::{GridAxis, SampleGrid};

use super::ThermalCamera;

/// A stand-in camera that always sees a smooth ramp from 0°C up to just under `peak`.
///
/// The sample at `(x, y)` is `(x * height + y) / (width * height) * peak`.
#[derive(Clone, Debug)]
pub struct RampCamera {
    frame: SampleGrid,
}

impl RampCamera {
    pub fn new(axis: GridAxis, peak: f32) -> Self {
        let total = axis.len() as f32;
        let frame = Array2::from_shape_fn(axis.sample_shape(), |(x, y)| {
            (x * axis.height + y) as f32 / total * peak
        });
        Self { frame }
    }
}

impl ThermalCamera for RampCamera {
    fn sensor_axis(&self) -> GridAxis {
        self.frame.dim().into()
    }

    fn acquire(&mut self) -> anyhow::Result<SampleGrid> {
        Ok(self.frame.clone())
    }
}

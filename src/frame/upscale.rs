// SPDX-License-Identifier: GPL-3.0-or-later
use ndarray::{s, Array2, ArrayView2, ArrayViewMut1};
use tracing::trace;

use crate::error::PipelineError;
use crate::grid::GridAxis;

/// Doubles the resolution of a normalized grid with bilinear interpolation.
///
/// A `(W, H)` grid becomes `(2W - 1, 2H - 1)`: every source value lands on an even index and
/// each gap is filled with the mean of its two neighbors. The first axis is filled in first,
/// then the second axis across every row, including the freshly interpolated ones. That second
/// pass is what fills the cells with no original neighbor on either axis.
#[derive(Clone, Debug)]
pub struct Upscaler {
    sensor_axis: GridAxis,
    grid: Array2<f32>,
}

impl Upscaler {
    pub fn new(sensor_axis: GridAxis) -> Self {
        let grid_axis = GridAxis::from_sensor(sensor_axis, true);
        Self {
            sensor_axis,
            grid: Array2::zeros(grid_axis.sample_shape()),
        }
    }

    pub fn sensor_axis(&self) -> GridAxis {
        self.sensor_axis
    }

    pub fn grid_axis(&self) -> GridAxis {
        self.grid.dim().into()
    }

    /// The most recently upscaled grid.
    pub fn grid(&self) -> ArrayView2<'_, f32> {
        self.grid.view()
    }

    pub fn upscale(
        &mut self,
        source: ArrayView2<'_, f32>,
    ) -> Result<ArrayView2<'_, f32>, PipelineError> {
        self.sensor_axis.check_samples(&source)?;
        self.grid.slice_mut(s![..;2, ..;2]).assign(&source);
        // Along the first axis, only between original values.
        for lane in self.grid.columns_mut().into_iter().step_by(2) {
            fill_midpoints(lane);
        }
        // Along the second axis, for every lane.
        for lane in self.grid.rows_mut() {
            fill_midpoints(lane);
        }
        trace!(grid_axis = ?self.grid_axis(), "upscaled frame");
        Ok(self.grid.view())
    }
}

/// Set every odd index of a lane to the mean of its neighbors.
///
/// A trailing odd index has no next neighbor; it takes the previous value instead.
fn fill_midpoints(mut lane: ArrayViewMut1<'_, f32>) {
    let len = lane.len();
    for index in (1..len).step_by(2) {
        let previous = lane[index - 1];
        let next = if index + 1 < len {
            lane[index + 1]
        } else {
            previous
        };
        lane[index] = (previous + next) / 2.0;
    }
}

// SPDX-License-Identifier: GPL-3.0-or-later
//! Grid geometry shared by every stage of the pipeline.
//!
//! Sample and normalized grids are [`Array2<f32>`] with shape `(width, height)`, so the first
//! index walks along the x axis (columns) and the second along the y axis (rows). The rendered
//! cell grid is the other way around: shape `(height, width)`, addressed `[row][col]` the same
//! way the display lays cells out.
use ndarray::{Array2, ArrayView2};

use crate::error::PipelineError;

/// A grid of temperatures in degrees Celsius, as read from the sensor.
pub type SampleGrid = Array2<f32>;

/// A grid of values scaled to the range 0.0 to 1.0.
pub type NormalizedGrid = Array2<f32>;

/// The size of a grid, in cells.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GridAxis {
    pub width: usize,
    pub height: usize,
}

impl GridAxis {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// The grid produced from a sensor of this size, optionally doubled by interpolation.
    ///
    /// Interpolating an `n` cell axis yields `2n - 1` cells: every original cell plus one
    /// between each neighboring pair.
    pub fn from_sensor(sensor_axis: GridAxis, interpolate: bool) -> Self {
        if interpolate {
            Self::new(
                (2 * sensor_axis.width).saturating_sub(1),
                (2 * sensor_axis.height).saturating_sub(1),
            )
        } else {
            sensor_axis
        }
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shape of a sample or normalized grid of this size, `(width, height)`.
    pub fn sample_shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Shape of a rendered cell grid of this size, `(rows, columns)`.
    pub fn cell_shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Map a destination cell to the index of the normalized value it displays.
    ///
    /// Normally the cell at `(row, col)` shows the value at `(col, row)`. In selfie mode the
    /// grid is mirrored left to right, so `(row, col)` shows `(width - 1 - col, row)`.
    pub fn source_index_for(
        &self,
        dest_row: usize,
        dest_col: usize,
        selfie: bool,
    ) -> (usize, usize) {
        if selfie {
            (self.width - 1 - dest_col, dest_row)
        } else {
            (dest_col, dest_row)
        }
    }

    /// Fail with [`PipelineError::InputShape`] unless `grid` has this axis' sample shape.
    pub fn check_samples<T>(&self, grid: &ArrayView2<'_, T>) -> Result<(), PipelineError> {
        if grid.dim() == self.sample_shape() {
            Ok(())
        } else {
            Err(PipelineError::input_shape(self.sample_shape(), grid.dim()))
        }
    }

    /// A descending ramp covering the whole palette, shown before the first acquisition.
    pub fn spectrum(&self) -> NormalizedGrid {
        let total = self.len() as f32;
        Array2::from_shape_fn(self.sample_shape(), |(x, y)| {
            (total - (x * self.height + y) as f32) / total
        })
    }
}

impl From<(usize, usize)> for GridAxis {
    fn from((width, height): (usize, usize)) -> Self {
        Self::new(width, height)
    }
}

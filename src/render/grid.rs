// SPDX-License-Identifier: GPL-3.0-or-later
use ndarray::{Array2, ArrayView2};
use tracing::trace;

use crate::error::PipelineError;
use crate::grid::GridAxis;

use super::color::Color;
use super::palette::{clamp_unit, Palette};

/// Owner of the rendered cell colors.
///
/// Cells are only written when their color actually changes, as every write turns into a redraw
/// on the display. The display side reads the cells through [`GridRenderer::cells`].
#[derive(Clone, Debug)]
pub struct GridRenderer {
    axis: GridAxis,
    palette: Palette,
    cells: Array2<Color>,
    mutations: u64,
}

impl GridRenderer {
    pub fn new(axis: GridAxis, palette: Palette) -> Result<Self, PipelineError> {
        if axis.is_empty() {
            return Err(PipelineError::InvalidConfig(format!(
                "grid axis {}x{} has no cells",
                axis.width, axis.height
            )));
        }
        Ok(Self {
            axis,
            palette,
            cells: Array2::from_elem(axis.cell_shape(), Color::PURPLE),
            mutations: 0,
        })
    }

    pub fn axis(&self) -> GridAxis {
        self.axis
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The current cell colors, addressed `[row][col]`.
    pub fn cells(&self) -> ArrayView2<'_, Color> {
        self.cells.view()
    }

    /// Total number of cell writes since this renderer was created.
    pub fn mutation_count(&self) -> u64 {
        self.mutations
    }

    fn set_cell(&mut self, row: usize, col: usize, color: Color) -> bool {
        let cell = &mut self.cells[[row, col]];
        if *cell == color {
            false
        } else {
            *cell = color;
            self.mutations += 1;
            true
        }
    }

    /// Color the grid from a normalized frame, returning how many cells changed.
    pub fn update_image(
        &mut self,
        grid: ArrayView2<'_, f32>,
        selfie: bool,
    ) -> Result<usize, PipelineError> {
        self.axis.check_samples(&grid)?;
        let mut changed = 0;
        for row in 0..self.axis.height {
            for col in 0..self.axis.width {
                let (x, y) = self.axis.source_index_for(row, col, selfie);
                let color = self.palette.color_for(grid[[x, y]]);
                if self.set_cell(row, col, color) {
                    changed += 1;
                }
            }
        }
        trace!(changed, selfie, "updated image cells");
        Ok(changed)
    }

    /// Draw a histogram of a normalized frame, one bar per column, returning how many cells
    /// changed.
    ///
    /// There are as many bins as the grid is wide. Bars grow up from the bottom row, scaled so
    /// the fullest bin spans the grid's width in rows. Each bar is colored from the palette at
    /// its column divided by the grid height.
    pub fn update_histogram(&mut self, grid: ArrayView2<'_, f32>) -> Result<usize, PipelineError> {
        self.axis.check_samples(&grid)?;
        let bins = self.axis.width;
        let top_bin = bins - 1;
        let mut histogram = vec![0usize; bins];
        for value in grid.iter() {
            let bin = (clamp_unit(*value) * top_bin as f32) as usize;
            histogram[bin.min(top_bin)] += 1;
        }
        let max_count = histogram.iter().copied().max().unwrap_or(0);
        let mut scale = if top_bin > 0 {
            max_count as f32 / top_bin as f32
        } else {
            0.0
        };
        if scale <= 0.0 {
            scale = 1.0;
        }
        let mut changed = 0;
        for row in 0..self.axis.height {
            for col in 0..self.axis.width {
                let bar_height = histogram[col] as f32 / scale;
                let color = if bar_height > top_bin as f32 - row as f32 {
                    let position = col as f32 / self.axis.height as f32;
                    self.palette.color_at((position * 1000.0).round() / 1000.0)
                } else {
                    Color::BLACK
                };
                if self.set_cell(row, col, color) {
                    changed += 1;
                }
            }
        }
        trace!(changed, ?histogram, "updated histogram cells");
        Ok(changed)
    }
}

// SPDX-License-Identifier: GPL-3.0-or-later
use image::RgbImage;
use ndarray::ArrayView2;
use tracing::trace;

use crate::error::PipelineError;

use super::color::Color;

/// Enlarge a cell grid into an image where each cell is a `cell_size` pixel square.
///
/// Row 0 of the cells is the top row of the image, the same layout the display uses.
pub fn enlarge(cells: ArrayView2<'_, Color>, cell_size: u32) -> Result<RgbImage, PipelineError> {
    if cell_size == 0 {
        return Err(PipelineError::InvalidConfig(
            "preview cell size must be greater than 0".to_string(),
        ));
    }
    let (rows, cols) = cells.dim();
    let width = cols as u32 * cell_size;
    let height = rows as u32 * cell_size;
    trace!(width, height, cell_size, "enlarging cells");
    Ok(RgbImage::from_fn(width, height, |x, y| {
        let row = (y / cell_size) as usize;
        let col = (x / cell_size) as usize;
        cells[[row, col]].into()
    }))
}

#[cfg(test)]
mod test {
    use ndarray::array;

    use super::enlarge;
    use crate::render::Color;

    #[test]
    fn square_cells() {
        let red = Color::new(0xFF, 0, 0);
        let blue = Color::new(0, 0, 0xFF);
        let cells = array![[red, blue], [Color::BLACK, Color::WHITE]];
        let image = enlarge(cells.view(), 3).unwrap();
        assert_eq!(image.dimensions(), (6, 6));
        assert_eq!(Color::from(image.get_pixel(0, 0)), red);
        assert_eq!(Color::from(image.get_pixel(2, 2)), red);
        assert_eq!(Color::from(image.get_pixel(3, 0)), blue);
        assert_eq!(Color::from(image.get_pixel(5, 2)), blue);
        assert_eq!(Color::from(image.get_pixel(0, 3)), Color::BLACK);
        assert_eq!(Color::from(image.get_pixel(5, 5)), Color::WHITE);
    }

    #[test]
    fn one_to_one() {
        let cells = array![[Color::PURPLE, Color::WHITE, Color::BLACK]];
        let image = enlarge(cells.view(), 1).unwrap();
        assert_eq!(image.dimensions(), (3, 1));
        assert_eq!(Color::from(image.get_pixel(1, 0)), Color::WHITE);
    }

    #[test]
    fn zero_cell_size() {
        let cells = array![[Color::PURPLE]];
        assert!(enlarge(cells.view(), 0).is_err());
    }
}

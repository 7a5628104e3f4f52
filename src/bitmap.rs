// SPDX-License-Identifier: GPL-3.0-or-later
//! Uncompressed 24-bit BMP export of the rendered cells.
use bytes::{BufMut, Bytes, BytesMut};
use ndarray::ArrayView2;
use tracing::trace;

use crate::error::PipelineError;
use crate::grid::GridAxis;
use crate::render::Color;

/// Size of the BITMAPFILEHEADER.
const FILE_HEADER_SIZE: usize = 14;

/// Size of the BITMAPINFOHEADER.
const INFO_HEADER_SIZE: usize = 40;

/// Offset of the first pixel from the start of the file.
pub const PIXEL_DATA_OFFSET: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

const BITS_PER_PIXEL: u16 = 24;

/// Number of bytes in one stored row of a `width` pixel wide bitmap, padded to a multiple of 4.
pub fn bytes_per_row(width: usize) -> usize {
    let pixel_bytes = 3 * width;
    pixel_bytes + (4 - pixel_bytes % 4) % 4
}

/// Serializes a cell grid into a BMP file, one pixel per cell.
#[derive(Clone, Copy, Debug)]
pub struct BitmapEncoder {
    axis: GridAxis,
}

impl BitmapEncoder {
    pub fn new(axis: GridAxis) -> Self {
        Self { axis }
    }

    pub fn axis(&self) -> GridAxis {
        self.axis
    }

    /// Total size of an encoded file.
    pub fn file_size(&self) -> usize {
        PIXEL_DATA_OFFSET + self.axis.height * bytes_per_row(self.axis.width)
    }

    /// Encode `cells` (addressed `[row][col]`, row 0 at the top).
    ///
    /// When `mirror` is set every row is written right to left.
    pub fn encode(
        &self,
        cells: ArrayView2<'_, Color>,
        mirror: bool,
    ) -> Result<Bytes, PipelineError> {
        let expected = self.axis.cell_shape();
        if cells.dim() != expected {
            return Err(PipelineError::ShapeMismatch {
                expected,
                actual: cells.dim(),
            });
        }
        let GridAxis { width, height } = self.axis;
        let row_size = bytes_per_row(width);
        let padding = row_size - 3 * width;
        let file_size = self.file_size();
        let mut buf = BytesMut::with_capacity(file_size);

        // BITMAPFILEHEADER
        buf.put_slice(b"BM");
        buf.put_u32_le(file_size as u32);
        buf.put_u16_le(0);
        buf.put_u16_le(0);
        buf.put_u32_le(PIXEL_DATA_OFFSET as u32);

        // BITMAPINFOHEADER, uncompressed with no resolution or palette information.
        buf.put_u32_le(INFO_HEADER_SIZE as u32);
        buf.put_u32_le(width as u32);
        buf.put_u32_le(height as u32);
        buf.put_u16_le(1);
        buf.put_u16_le(BITS_PER_PIXEL);
        buf.put_slice(&[0; 24]);

        // Rows are stored bottom-up.
        for row in cells.outer_iter().rev() {
            if mirror {
                row.iter()
                    .rev()
                    .for_each(|color| buf.put_slice(&color.as_bgr()));
            } else {
                row.iter().for_each(|color| buf.put_slice(&color.as_bgr()));
            }
            buf.put_slice(&[0; 3][..padding]);
        }
        trace!(file_size, mirror, "encoded bitmap");
        Ok(buf.freeze())
    }

    /// The encoded bitmap as standard base64 text.
    pub fn encode_base64(
        &self,
        cells: ArrayView2<'_, Color>,
        mirror: bool,
    ) -> Result<String, PipelineError> {
        self.encode(cells, mirror).map(base64::encode)
    }
}

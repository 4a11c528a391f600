//! Frame grid layout.
//!
//! Every frame of a DMI file lives in one cell of a grid laid out row-major
//! over the raster. Frames are numbered in flattened order: states in order,
//! then each state's frames in storage order.
//!
//! ```text
//! columns = ceil(sqrt(frames))        (encoding)
//! columns = floor(raster_w / cell_w)  (decoding)
//! rows    = ceil(frames / columns)
//! cell i  = ((i % columns) * cell_w, (i / columns) * cell_h)
//! ```

use image::RgbaImage;

use super::frame::{Frame, PLACEHOLDER_COLOR};
use crate::file::DmiError;

/// Grid of equally sized cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
	/// Cell width in pixels
	pub cell_width: u32,
	/// Cell height in pixels
	pub cell_height: u32,
	/// Cells per row
	pub columns: u32,
	/// Number of rows
	pub rows: u32,
}

impl GridLayout {
	/// Layout used when packing `frame_count` frames.
	///
	/// An empty sheet still gets one cell so the raster is never zero sized.
	pub fn for_frames(frame_count: usize, cell_width: u32, cell_height: u32) -> Self {
		let frame_count = frame_count.max(1);
		let columns = frame_count.isqrt();
		let columns = if columns * columns < frame_count { columns + 1 } else { columns };
		let rows = frame_count.div_ceil(columns);
		Self {
			cell_width,
			cell_height,
			columns: columns as u32,
			rows: rows as u32,
		}
	}

	/// Layout of an existing raster.
	pub fn for_raster(raster_width: u32, raster_height: u32, cell_width: u32, cell_height: u32) -> Self {
		let columns = raster_width.checked_div(cell_width).unwrap_or(0);
		let rows = raster_height.checked_div(cell_height).unwrap_or(0);
		Self {
			cell_width,
			cell_height,
			columns,
			rows,
		}
	}

	/// Size of the raster in pixels.
	pub fn raster_size(&self) -> (u32, u32) {
		(self.columns * self.cell_width, self.rows * self.cell_height)
	}

	/// Number of whole cells in the grid.
	pub fn capacity(&self) -> usize {
		self.columns as usize * self.rows as usize
	}

	/// Top-left pixel of cell `index`.
	pub fn cell_origin(&self, index: usize) -> (u32, u32) {
		if self.columns == 0 {
			return (0, (index as u32).saturating_mul(self.cell_height));
		}
		let columns = self.columns as usize;
		let x = (index % columns) as u32 * self.cell_width;
		let y = (index / columns) as u32 * self.cell_height;
		(x, y)
	}

	/// Packs `frames` into a new raster.
	///
	/// # Errors
	///
	/// Returns [`DmiError::SizeMismatch`] if a frame is not cell sized.
	pub fn pack<'a>(&self, frames: impl IntoIterator<Item = &'a Frame>) -> Result<RgbaImage, DmiError> {
		let (width, height) = self.raster_size();
		let mut raster = RgbaImage::from_pixel(width, height, PLACEHOLDER_COLOR);
		for (index, frame) in frames.into_iter().enumerate() {
			if frame.dimensions() != (self.cell_width, self.cell_height) {
				return Err(DmiError::size_mismatch(
					(self.cell_width, self.cell_height),
					frame.dimensions(),
				));
			}
			let (x, y) = self.cell_origin(index);
			image::imageops::replace(&mut raster, frame.image(), i64::from(x), i64::from(y));
		}
		Ok(raster)
	}

	/// Cuts cell `index` out of `raster`.
	///
	/// # Errors
	///
	/// Returns [`DmiError::SizeMismatch`] if the part of the cell inside the
	/// raster is not a whole cell.
	pub fn slice(&self, raster: &RgbaImage, index: usize) -> Result<Frame, DmiError> {
		let (x, y) = self.cell_origin(index);
		let width = self.cell_width.min(raster.width().saturating_sub(x));
		let height = self.cell_height.min(raster.height().saturating_sub(y));
		if (width, height) != (self.cell_width, self.cell_height) {
			return Err(DmiError::size_mismatch((self.cell_width, self.cell_height), (width, height)));
		}
		let cell = image::imageops::crop_imm(raster, x, y, width, height).to_image();
		Ok(Frame::new(cell))
	}
}

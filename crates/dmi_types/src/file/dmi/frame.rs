//! DMI frame pixel buffers.
//!
//! A frame is one RGBA cell of the sheet. Pixel storage is reference counted
//! and copied on first write, so cloning a state or a whole sheet is cheap and
//! mutating a clone never touches the original.

use std::{fmt, io::Cursor, sync::Arc};

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{ImageFormat, Rgba, RgbaImage, imageops::FilterType};

use crate::file::DmiError;

/// Colour used for newly created frames (transparent mid-gray).
pub const PLACEHOLDER_COLOR: Rgba<u8> = Rgba([192, 192, 192, 0]);

/// Prefix of the data URLs used to carry frames in model strings.
const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// A single RGBA frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
	image: Arc<RgbaImage>,
}

impl Frame {
	/// Wraps an existing image.
	pub fn new(image: RgbaImage) -> Self {
		Self {
			image: Arc::new(image),
		}
	}

	/// Creates a frame filled with [`PLACEHOLDER_COLOR`].
	pub fn placeholder(width: u32, height: u32) -> Self {
		Self::new(RgbaImage::from_pixel(width, height, PLACEHOLDER_COLOR))
	}

	/// Creates a frame from raw RGBA bytes.
	///
	/// # Errors
	///
	/// Returns [`DmiError::InvalidFrameData`] if `pixels` is not
	/// `width * height * 4` bytes long.
	pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, DmiError> {
		let actual = pixels.len();
		RgbaImage::from_raw(width, height, pixels).map(Self::new).ok_or_else(|| {
			DmiError::InvalidFrameData(format!(
				"{width}x{height} frame needs {} bytes, got {actual}",
				width as usize * height as usize * 4
			))
		})
	}

	/// Returns the frame width.
	#[inline]
	pub fn width(&self) -> u32 {
		self.image.width()
	}

	/// Returns the frame height.
	#[inline]
	pub fn height(&self) -> u32 {
		self.image.height()
	}

	/// Returns `(width, height)`.
	#[inline]
	pub fn dimensions(&self) -> (u32, u32) {
		self.image.dimensions()
	}

	/// Returns the underlying image.
	#[inline]
	pub fn image(&self) -> &RgbaImage {
		&self.image
	}

	/// Returns the image for writing, detaching it from any clone first.
	pub fn image_mut(&mut self) -> &mut RgbaImage {
		Arc::make_mut(&mut self.image)
	}

	/// Returns the raw RGBA bytes.
	#[inline]
	pub fn pixels(&self) -> &[u8] {
		self.image.as_raw()
	}

	/// Returns `true` when both frames share the same pixel storage.
	pub fn shares_pixels_with(&self, other: &Frame) -> bool {
		Arc::ptr_eq(&self.image, &other.image)
	}

	/// Returns a copy resampled to `width x height` (nearest neighbour).
	pub fn resized(&self, width: u32, height: u32) -> Self {
		if self.dimensions() == (width, height) {
			return self.clone();
		}
		Self::new(image::imageops::resize(&*self.image, width, height, FilterType::Nearest))
	}

	/// Encodes the frame as a standalone PNG.
	pub fn to_png(&self) -> Result<Vec<u8>, DmiError> {
		let mut cursor = Cursor::new(Vec::new());
		self.image.write_to(&mut cursor, ImageFormat::Png)?;
		Ok(cursor.into_inner())
	}

	/// Decodes a frame from a standalone PNG.
	pub fn from_png(data: &[u8]) -> Result<Self, DmiError> {
		let image = image::load_from_memory_with_format(data, ImageFormat::Png)?;
		Ok(Self::new(image.to_rgba8()))
	}

	/// Encodes the frame as a `data:image/png;base64,` URL.
	pub fn to_data_url(&self) -> Result<String, DmiError> {
		let png = self.to_png()?;
		Ok(format!("{DATA_URL_PREFIX}{}", STANDARD.encode(png)))
	}

	/// Decodes a frame from a `data:image/png;base64,` URL.
	pub fn from_data_url(url: &str) -> Result<Self, DmiError> {
		let Some(payload) = url.strip_prefix(DATA_URL_PREFIX) else {
			return Err(DmiError::InvalidFrameData(format!(
				"expected a `{DATA_URL_PREFIX}` URL"
			)));
		};
		let png = STANDARD
			.decode(payload)
			.map_err(|e| DmiError::InvalidFrameData(e.to_string()))?;
		Self::from_png(&png)
	}
}

impl From<RgbaImage> for Frame {
	fn from(image: RgbaImage) -> Self {
		Self::new(image)
	}
}

impl fmt::Display for Frame {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}×{} RGBA frame", self.width(), self.height())
	}
}

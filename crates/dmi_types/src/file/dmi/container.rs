//! PNG container access.
//!
//! The DMI codec only needs two things from the image container: RGBA pixels
//! and the ancillary text chunks. [`RasterCodec`] is that seam, and
//! [`PngCodec`] implements it with the `png` crate.

use std::{fmt, io::Cursor};

use image::RgbaImage;

use crate::file::DmiError;

/// Kind of an ancillary text chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkKind {
	/// `tEXt`, uncompressed Latin-1
	Text,
	/// `zTXt`, compressed Latin-1
	CompressedText,
	/// `iTXt`, UTF-8
	InternationalText,
}

impl ChunkKind {
	/// Four character chunk type.
	pub fn chunk_type(self) -> &'static str {
		match self {
			Self::Text => "tEXt",
			Self::CompressedText => "zTXt",
			Self::InternationalText => "iTXt",
		}
	}
}

impl fmt::Display for ChunkKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.chunk_type())
	}
}

/// An ancillary text chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
	/// Chunk type
	pub kind: ChunkKind,
	/// Keyword (1-79 Latin-1 characters)
	pub keyword: String,
	/// Decompressed text payload
	pub text: String,
}

impl Chunk {
	/// Creates a new chunk.
	pub fn new(kind: ChunkKind, keyword: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			kind,
			keyword: keyword.into(),
			text: text.into(),
		}
	}
}

/// Decoded pixels and text chunks of a raster.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRaster {
	/// Pixels converted to RGBA8
	pub image: RgbaImage,
	/// Text chunks found in the file
	pub chunks: Vec<Chunk>,
}

impl DecodedRaster {
	/// Finds the first chunk of `kind` with `keyword`.
	pub fn find_chunk(&self, kind: ChunkKind, keyword: &str) -> Option<&Chunk> {
		self.chunks
			.iter()
			.find(|chunk| chunk.kind == kind && chunk.keyword == keyword)
	}
}

/// Raster encoder/decoder used by the DMI codec.
pub trait RasterCodec {
	/// Decodes `data` into RGBA pixels and its text chunks.
	fn decode(&self, data: &[u8]) -> Result<DecodedRaster, DmiError>;

	/// Encodes `image` with `chunks` placed right after the image header.
	fn encode(&self, image: &RgbaImage, chunks: &[Chunk]) -> Result<Vec<u8>, DmiError>;
}

/// [`RasterCodec`] backed by the `png` crate.
#[derive(Debug, Clone, Copy)]
pub struct PngCodec {
	compression: png::Compression,
}

impl Default for PngCodec {
	fn default() -> Self {
		Self::new()
	}
}

impl PngCodec {
	/// Creates a codec with default compression.
	pub fn new() -> Self {
		Self {
			compression: png::Compression::Default,
		}
	}

	/// Creates a codec with the given compression level.
	pub fn with_compression(compression: png::Compression) -> Self {
		Self { compression }
	}
}

impl RasterCodec for PngCodec {
	fn decode(&self, data: &[u8]) -> Result<DecodedRaster, DmiError> {
		let mut decoder = png::Decoder::new(Cursor::new(data));
		decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

		let mut reader = decoder.read_info()?;
		let mut buffer = vec![0; reader.output_buffer_size()];
		let output = reader.next_frame(&mut buffer)?;
		buffer.truncate(output.buffer_size());
		let image = expand_to_rgba(output.width, output.height, output.color_type, buffer)?;

		// Text chunks may also follow the image data
		reader.finish()?;

		let info = reader.info();
		let mut chunks = Vec::new();
		for chunk in &info.uncompressed_latin1_text {
			chunks.push(Chunk::new(ChunkKind::Text, chunk.keyword.clone(), chunk.text.clone()));
		}
		for chunk in &info.compressed_latin1_text {
			chunks.push(Chunk::new(ChunkKind::CompressedText, chunk.keyword.clone(), chunk.get_text()?));
		}
		for chunk in &info.utf8_text {
			chunks.push(Chunk::new(ChunkKind::InternationalText, chunk.keyword.clone(), chunk.get_text()?));
		}

		Ok(DecodedRaster { image, chunks })
	}

	fn encode(&self, image: &RgbaImage, chunks: &[Chunk]) -> Result<Vec<u8>, DmiError> {
		let mut out = Vec::new();
		{
			let mut encoder = png::Encoder::new(&mut out, image.width(), image.height());
			encoder.set_color(png::ColorType::Rgba);
			encoder.set_depth(png::BitDepth::Eight);
			encoder.set_compression(self.compression);

			// Chunks added before the header is written land directly after IHDR
			for chunk in chunks {
				let (keyword, text) = (chunk.keyword.clone(), chunk.text.clone());
				match chunk.kind {
					ChunkKind::Text => encoder.add_text_chunk(keyword, text)?,
					ChunkKind::CompressedText => encoder.add_ztxt_chunk(keyword, text)?,
					ChunkKind::InternationalText => encoder.add_itxt_chunk(keyword, text)?,
				}
			}

			let mut writer = encoder.write_header()?;
			writer.write_image_data(image.as_raw())?;
			writer.finish()?;
		}
		Ok(out)
	}
}

/// Converts 8-bit decoder output of any colour type to RGBA.
fn expand_to_rgba(
	width: u32,
	height: u32,
	color_type: png::ColorType,
	buffer: Vec<u8>,
) -> Result<RgbaImage, DmiError> {
	let pixels = match color_type {
		png::ColorType::Rgba => buffer,
		png::ColorType::Rgb => buffer.chunks_exact(3).flat_map(|p| [p[0], p[1], p[2], 0xFF]).collect(),
		png::ColorType::GrayscaleAlpha => buffer.chunks_exact(2).flat_map(|p| [p[0], p[0], p[0], p[1]]).collect(),
		png::ColorType::Grayscale => buffer.iter().flat_map(|&v| [v, v, v, 0xFF]).collect(),
		png::ColorType::Indexed => {
			return Err(DmiError::InvalidFrameData("indexed PNG was not expanded".to_owned()));
		}
	};
	RgbaImage::from_raw(width, height, pixels)
		.ok_or_else(|| DmiError::InvalidFrameData(format!("truncated {width}x{height} PNG image data")))
}

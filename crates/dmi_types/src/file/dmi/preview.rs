//! Display helpers: animated direction previews and composite strips.
//!
//! Nothing here is part of the on-disk format.

use std::{collections::HashMap, fmt};

use image::RgbaImage;

use super::{
	dir::Dir,
	frame::{Frame, PLACEHOLDER_COLOR},
	state::State,
};
use crate::file::DmiError;

/// Encoded previews of a state, keyed by direction.
///
/// The cache is a memo of derived data: clones start empty and it never
/// takes part in equality.
#[derive(Default)]
pub(crate) struct PreviewCache(HashMap<Dir, Vec<u8>>);

impl PreviewCache {
	pub(crate) fn clear(&mut self) {
		self.0.clear();
	}

	pub(crate) fn contains(&self, dir: Dir) -> bool {
		self.0.contains_key(&dir)
	}

	pub(crate) fn get(&self, dir: Dir) -> Option<&[u8]> {
		self.0.get(&dir).map(Vec::as_slice)
	}

	pub(crate) fn insert(&mut self, dir: Dir, encoded: Vec<u8>) {
		self.0.insert(dir, encoded);
	}
}

impl Clone for PreviewCache {
	fn clone(&self) -> Self {
		Self::default()
	}
}

impl PartialEq for PreviewCache {
	fn eq(&self, _other: &Self) -> bool {
		true
	}
}

impl fmt::Debug for PreviewCache {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.0.keys()).finish()
	}
}

/// Converts a delay in ticks (1/10 s) to an APNG delay fraction in ms.
fn delay_fraction(ticks: f64) -> (u16, u16) {
	let millis = (ticks * 100.0).round().clamp(0.0, f64::from(u16::MAX));
	(millis as u16, 1000)
}

/// Playback order of logical frames, bouncing back for rewinding states.
fn playback_order(frame_count: usize, rewind: bool) -> Vec<usize> {
	let mut order: Vec<usize> = (0..frame_count).collect();
	if rewind && frame_count > 2 {
		order.extend((1..frame_count - 1).rev());
	}
	order
}

/// Encodes the animation of `state` facing `dir` as an APNG.
pub(crate) fn encode_direction(state: &State, dir: Dir) -> Result<Vec<u8>, DmiError> {
	let frame_count = state.frame_count();
	if frame_count <= 1 {
		return match state.frame(0, dir) {
			Some(frame) => frame.to_png(),
			None => Frame::placeholder(state.width(), state.height()).to_png(),
		};
	}

	let order = playback_order(frame_count, state.rewind());
	let mut out = Vec::new();
	{
		let mut encoder = png::Encoder::new(&mut out, state.width(), state.height());
		encoder.set_color(png::ColorType::Rgba);
		encoder.set_depth(png::BitDepth::Eight);
		encoder.set_animated(order.len() as u32, state.loop_count())?;

		let mut writer = encoder.write_header()?;
		for &frame in &order {
			let (numerator, denominator) = delay_fraction(state.delay(frame));
			writer.set_frame_delay(numerator, denominator)?;
			match state.frame(frame, dir) {
				Some(image) => writer.write_image_data(image.pixels())?,
				None => return Err(DmiError::FrameCountMismatch {
					frames: state.frames().len(),
					dirs: state.dirs().to_u32(),
				}),
			}
		}
		writer.finish()?;
	}
	Ok(out)
}

/// Builds a strip with one row per direction and one column per logical frame.
pub(crate) fn composite(state: &State) -> RgbaImage {
	let (width, height) = (state.width(), state.height());
	let frame_count = state.frame_count() as u32;
	let mut out = RgbaImage::from_pixel(
		frame_count * width,
		state.dirs().to_u32() * height,
		PLACEHOLDER_COLOR,
	);

	for (row, &dir) in state.dirs().dirs().iter().enumerate() {
		for column in 0..frame_count {
			if let Some(frame) = state.frame(column as usize, dir) {
				image::imageops::replace(
					&mut out,
					frame.image(),
					i64::from(column * width),
					row as i64 * i64::from(height),
				);
			}
		}
	}
	out
}

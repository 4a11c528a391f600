use dmi_rs::prelude::*;
use dmi_rs::prelude::file::dmi::{Chunk, DESCRIPTION_KEYWORD};
use image::{Rgba, RgbaImage};

/// Frame filled with a colour derived from `seed`.
pub(crate) fn solid(width: u32, height: u32, seed: u8) -> Frame {
	Frame::new(RgbaImage::from_pixel(
		width,
		height,
		Rgba([seed, seed.wrapping_mul(3), seed.wrapping_add(40), 255]),
	))
}

/// State whose frames are numbered from `first_seed` in storage order.
pub(crate) fn numbered_state(
	name: &str,
	dirs: DirCount,
	frame_count: usize,
	(width, height): (u32, u32),
	first_seed: u8,
) -> DmiState {
	let frames = (0..frame_count * dirs.to_usize())
		.map(|i| solid(width, height, first_seed.wrapping_add(i as u8)))
		.collect();
	DmiState::from_frames(name, dirs, width, height, frames).unwrap()
}

/// Three single frame states named `a`, `b` and `c`.
pub(crate) fn letters() -> DmiFile {
	let mut dmi = DmiFile::new(32, 32);
	for (seed, name) in ["a", "b", "c"].into_iter().enumerate() {
		dmi.push_state(numbered_state(name, DirCount::One, 1, (32, 32), seed as u8 * 50))
			.unwrap();
	}
	dmi
}

/// Four states of 32x64 cells with mixed direction and frame counts.
pub(crate) fn rectangles() -> DmiFile {
	let size = (32, 64);
	let mut dmi = DmiFile::new(32, 64);

	let mut tall = numbered_state("tall", DirCount::Four, 2, size, 0);
	tall.set_delays(vec![1.0, 4.0]).unwrap();
	dmi.push_state(tall).unwrap();

	let mut spin = numbered_state("spin", DirCount::Eight, 1, size, 10);
	spin.set_movement(true);
	dmi.push_state(spin).unwrap();

	let mut bounce = numbered_state("bounce", DirCount::One, 3, size, 30);
	bounce.set_rewind(true);
	bounce.set_loop_count(5);
	let feet = Some(Hotspot::new(16, 60));
	bounce.set_hotspots(Some(vec![feet, feet, Some(Hotspot::new(16, 58))])).unwrap();
	dmi.push_state(bounce).unwrap();

	dmi.push_state(numbered_state("", DirCount::One, 1, size, 90)).unwrap();
	dmi
}

/// Encodes `image` with `metadata` as the `Description` chunk.
pub(crate) fn with_metadata(image: &RgbaImage, metadata: &str) -> Vec<u8> {
	let chunks = [Chunk::new(ChunkKind::CompressedText, DESCRIPTION_KEYWORD, metadata)];
	PngCodec::new().encode(image, &chunks).unwrap()
}

//! Benchmark helper utilities for dmi-rs
//!
//! This module provides utilities for generating synthetic sprite sheets and
//! common benchmark sizes for the dmi-rs project.

use dmi_types::file::dmi::{DirCount, Dmi, Frame, State};
use image::{Rgba, RgbaImage};

/// Generates a sheet of `state_count` four direction states with
/// `frame_count` logical frames each.
///
/// Every frame gets a distinct gradient so the PNG encoder has real work to do.
pub fn generate_test_dmi(cell: (u32, u32), state_count: usize, frame_count: usize) -> Dmi {
	let (width, height) = cell;
	let mut dmi = Dmi::new(width, height);

	for state_index in 0..state_count {
		let frames = (0..frame_count * DirCount::Four.to_usize())
			.map(|frame_index| gradient_frame(width, height, state_index * 31 + frame_index))
			.collect();
		let mut state = State::from_frames(format!("state_{state_index}"), DirCount::Four, width, height, frames)
			.expect("generated frames match the cell size");
		let delays = (0..frame_count).map(|i| 1.0 + (i % 3) as f64).collect();
		state.set_delays(delays).expect("one delay per logical frame");
		dmi.push_state(state).expect("state matches the sheet geometry");
	}

	dmi
}

/// Generates one frame filled with a seed dependent gradient
fn gradient_frame(width: u32, height: u32, seed: usize) -> Frame {
	let seed = (seed % 256) as u8;
	Frame::new(RgbaImage::from_fn(width, height, |x, y| {
		Rgba([
			seed.wrapping_add(x as u8),
			seed.wrapping_mul(3).wrapping_add(y as u8),
			(x ^ y) as u8,
			if (x + y) % 7 == 0 { 0 } else { 255 },
		])
	}))
}

/// Common benchmark sheets: (cell size, states, logical frames per state)
pub mod sizes {
	/// Small sheet: 32x32 cells, 4 states of 2 frames (32 cells)
	pub const SMALL: ((u32, u32), usize, usize) = ((32, 32), 4, 2);
	/// Medium sheet: 32x32 cells, 32 states of 4 frames (512 cells)
	pub const MEDIUM: ((u32, u32), usize, usize) = ((32, 32), 32, 4);
	/// Large sheet: 64x64 cells, 64 states of 4 frames (1024 cells)
	pub const LARGE: ((u32, u32), usize, usize) = ((64, 64), 64, 4);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generate_test_dmi() {
		let dmi = generate_test_dmi((8, 8), 3, 2);
		assert_eq!(dmi.states().len(), 3);
		assert_eq!(dmi.frame_count(), 3 * 2 * 4);
		assert_eq!(dmi.states()[0].delays(), &[1.0, 2.0]);
	}

	#[test]
	fn test_sizes_constants() {
		assert_eq!(sizes::SMALL, ((32, 32), 4, 2));
		assert_eq!(sizes::MEDIUM.1 * sizes::MEDIUM.2 * 4, 512);
		assert_eq!(sizes::LARGE.1 * sizes::LARGE.2 * 4, 1024);
	}
}

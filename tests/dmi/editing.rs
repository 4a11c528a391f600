use dmi_rs::prelude::*;

use crate::fixtures::{numbered_state, rectangles, solid};

#[test]
fn test_round_trip_after_edits() {
	let mut dmi = rectangles();
	for (index, mut state) in dmi.states_mut().enumerate() {
		match index {
			0 => state.set_dirs(DirCount::Eight),
			1 => state.set_frame_count(3),
			2 => state.set_name("renamed"),
			3 => state.set_frame(0, Dir::South, solid(32, 64, 7)).unwrap(),
			_ => {}
		}
	}

	let decoded = DmiFile::from_bytes(&dmi.to_bytes().unwrap()).unwrap();
	assert_eq!(decoded, dmi);
	assert!(decoded.is_same(&dmi));
	assert_eq!(decoded.states()[0].frames().len(), 16);
	assert_eq!(decoded.states()[1].frame_count(), 3);
}

#[test]
fn test_resize_sheet() {
	let mut dmi = rectangles();
	dmi.resize(16, 16);
	let decoded = DmiFile::from_bytes(&dmi.to_bytes().unwrap()).unwrap();
	assert_eq!((decoded.width(), decoded.height()), (16, 16));
	assert!(
		decoded
			.states()
			.iter()
			.flat_map(DmiState::frames)
			.all(|frame| frame.dimensions() == (16, 16))
	);
}

#[test]
fn test_clone_does_not_share_edits() {
	let original = rectangles();
	let mut copy = original.clone();
	if let Some(mut state) = copy.state_mut(0)
		&& let Some(frame) = state.frame_mut(0, Dir::North)
	{
		frame.image_mut().put_pixel(0, 0, image::Rgba([1, 2, 3, 4]));
	}
	assert_eq!(original, rectangles());
	assert!(!copy.is_same(&original));
}

#[test]
fn test_model_string_round_trip() {
	let dmi = rectangles();
	let json = dmi.to_model_string().unwrap();
	let restored = DmiFile::from_model_string(&json).unwrap();
	assert_eq!(restored, dmi);
	assert_eq!(restored.to_bytes().unwrap(), dmi.to_bytes().unwrap());
}

#[test]
fn test_previews() {
	let mut dmi = rectangles();
	let mut state = dmi.state_mut(0).unwrap();

	let preview = state.preview(Dir::East).unwrap().to_vec();
	assert_eq!(&preview[1..4], b"PNG");
	assert!(state.has_cached_preview(Dir::East));
	assert!(!state.has_cached_preview(Dir::Northeast));

	// Undrawn directions share the South preview
	let south = state.preview(Dir::South).unwrap().to_vec();
	assert!(state.has_cached_preview(Dir::Northeast));
	assert_eq!(state.preview(Dir::Northeast).unwrap(), &south[..]);

	state.set_loop_count(1);
	assert!(!state.has_cached_preview(Dir::East));

	let composite = state.build_composite();
	assert_eq!(composite.dimensions(), (32 * 2, 64 * 4));
}

#[test]
fn test_mismatched_state_rejected() {
	let mut dmi = DmiFile::new(32, 32);
	let result = dmi.push_state(numbered_state("big", DirCount::One, 1, (64, 64), 0));
	assert!(matches!(result, Err(DmiError::SizeMismatch { .. })));
}

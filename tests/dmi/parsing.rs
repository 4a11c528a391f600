use dmi_rs::prelude::*;
use image::{Rgba, RgbaImage};

use crate::fixtures::{letters, rectangles, solid, with_metadata};

#[test]
fn test_create_dmi() {
	let dmi = DmiFile::new(32, 32);
	assert_eq!(dmi.width(), 32);
	assert_eq!(dmi.height(), 32);
	assert!(dmi.states().is_empty());
}

#[test]
fn test_parse_letters() {
	let data = letters().to_bytes().unwrap();
	let dmi = DmiFile::from_bytes(&data).unwrap();

	assert_eq!((dmi.width(), dmi.height()), (32, 32));
	let names: Vec<&str> = dmi.states().iter().map(DmiState::name).collect();
	assert_eq!(names, vec!["a", "b", "c"]);
	assert_eq!(dmi, letters());
}

#[test]
fn test_parse_stateless() {
	let data = DmiFile::new(32, 32).to_bytes().unwrap();
	let dmi = DmiFile::from_bytes(&data).unwrap();
	assert_eq!((dmi.width(), dmi.height()), (32, 32));
	assert!(dmi.states().is_empty());
}

#[test]
fn test_parse_non_square() {
	let data = rectangles().to_bytes().unwrap();
	let dmi = DmiFile::from_bytes(&data).unwrap();

	assert_eq!((dmi.width(), dmi.height()), (32, 64));
	assert_eq!(dmi.states().len(), 4);
	assert_eq!(dmi.frame_count(), 8 + 8 + 3 + 1);

	let bounce = dmi.find_state("bounce").unwrap();
	assert!(bounce.rewind());
	assert_eq!(bounce.loop_count(), 5);
	assert_eq!(bounce.hotspot(0), Some(Hotspot::new(16, 60)));
	assert_eq!(bounce.hotspot(1), Some(Hotspot::new(16, 60)));
	assert_eq!(bounce.hotspot(2), Some(Hotspot::new(16, 58)));

	assert_eq!(dmi.states()[3].name(), "");
}

#[test]
fn test_handwritten_metadata() {
	// Two states over a 3x2 grid of 2x2 cells, one cell unused
	let mut raster = RgbaImage::new(6, 4);
	for (cell, seed) in [(0u32, 10u8), (1, 20), (2, 30), (3, 40), (4, 50)] {
		let (x, y) = ((cell % 3) * 2, (cell / 3) * 2);
		image::imageops::replace(&mut raster, solid(2, 2, seed).image(), i64::from(x), i64::from(y));
	}
	let metadata = "# BEGIN DMI
version = 4.0
	width = 2
	height = 2
state = \"door \\\"open\\\"\"
	dirs = 4
	frames = 1
	hotspot = 1,1,1
state = null
	dirs = 1
	frames = 1
	delay = 7
# END DMI
";
	let dmi = DmiFile::from_bytes(&with_metadata(&raster, metadata)).unwrap();

	let door = &dmi.states()[0];
	assert_eq!(door.name(), "door \"open\"");
	assert_eq!(door.frame(0, Dir::South), Some(&solid(2, 2, 10)));
	assert_eq!(door.frame(0, Dir::North), Some(&solid(2, 2, 20)));
	assert_eq!(door.frame(0, Dir::East), Some(&solid(2, 2, 30)));
	assert_eq!(door.frame(0, Dir::West), Some(&solid(2, 2, 40)));
	assert_eq!(door.hotspot(0), Some(Hotspot::new(1, 1)));

	let unnamed = &dmi.states()[1];
	assert_eq!(unnamed.name(), "");
	assert_eq!(unnamed.frames(), &[solid(2, 2, 50)]);
	assert_eq!(unnamed.delays(), &[7.0]);
}

#[test]
fn test_hotspot_runs() {
	let metadata = "# BEGIN DMI
version = 4.0
	width = 1
	height = 1
state = \"h\"
	dirs = 1
	frames = 4
	hotspot = 16,4,1
	hotspot = 0,0,3
# END DMI
";
	let dmi = DmiFile::from_bytes(&with_metadata(&RgbaImage::new(2, 2), metadata)).unwrap();
	let state = &dmi.states()[0];
	let a = Some(Hotspot::new(16, 4));
	let b = Some(Hotspot::new(0, 0));
	assert_eq!(state.hotspots(), Some(&[a, a, b, b][..]));

	let rewritten = state.clone();
	let reparsed = DmiFile::from_bytes(&dmi.to_bytes().unwrap()).unwrap();
	assert_eq!(reparsed.states()[0], rewritten);
}

#[test]
fn test_bare_png() {
	let image = RgbaImage::from_pixel(64, 64, Rgba([200, 10, 10, 255]));
	let data = PngCodec::new().encode(&image, &[]).unwrap();

	let dmi = DmiFile::from_bytes(&data).unwrap();
	assert_eq!((dmi.width(), dmi.height()), (64, 64));
	assert_eq!(dmi.states().len(), 1);
	assert_eq!(dmi.states()[0].name(), "png");
	assert_eq!(dmi.states()[0].frame_count(), 1);
}

#[test]
fn test_rejected_metadata() {
	let raster = RgbaImage::new(2, 2);
	let cases = [
		"# BEGIN DMI\nversion = 4.0\n\tcolor = red\n# END DMI\n",
		"# BEGIN DMI\nversion = 4.0\n\tframes = 1\n# END DMI\n",
		"# BEGIN DMI\nversion = 3.0\n# END DMI\n",
		"BEGIN\n",
	];
	for metadata in cases {
		let result = DmiFile::from_bytes(&with_metadata(&raster, metadata));
		assert!(matches!(result, Err(DmiError::Metadata(_))), "{metadata:?} was accepted");
	}
}

#[test]
fn test_corrupt_container() {
	let mut data = letters().to_bytes().unwrap();
	data.truncate(data.len() / 2);
	assert!(DmiFile::from_bytes(&data).is_err());
	assert!(matches!(DmiFile::from_bytes(b"GIF89a"), Err(DmiError::Decode(_))));
}

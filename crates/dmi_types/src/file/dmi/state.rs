//! DMI icon states.
//!
//! A state is one named animation. Its frames are stored grouped by logical
//! frame, and within a logical frame by direction in [`DIR_ORDER`]:
//!
//! ```text
//! index = logical_frame * dirs + direction_slot
//! ```
//!
//! `delays` and `hotspots` hold one entry per logical frame and are shared by
//! all directions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
	dir::{DIR_ORDER, Dir, DirCount},
	frame::Frame,
	preview::{self, PreviewCache},
};
use crate::file::DmiError;

/// Delay used for every frame of a state with no explicit delays (in ticks).
pub const DEFAULT_DELAY: f64 = 1.0;

/// Pixel offset used by external consumers to align a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Hotspot {
	/// X offset in pixels
	pub x: i32,
	/// Y offset in pixels
	pub y: i32,
}

impl Hotspot {
	/// Creates a new hotspot.
	pub fn new(x: i32, y: i32) -> Self {
		Self { x, y }
	}
}

impl From<[i32; 2]> for Hotspot {
	fn from([x, y]: [i32; 2]) -> Self {
		Self { x, y }
	}
}

impl From<Hotspot> for [i32; 2] {
	fn from(hotspot: Hotspot) -> Self {
		[hotspot.x, hotspot.y]
	}
}

impl fmt::Display for Hotspot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{},{}", self.x, self.y)
	}
}

/// One named, directional, animated icon state.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
	/// Display name, not required to be unique
	name: String,

	/// Number of directions
	dirs: DirCount,

	/// Cell width every frame must have
	width: u32,

	/// Cell height every frame must have
	height: u32,

	/// Frames in storage order
	frames: Vec<Frame>,

	/// Number of times the animation plays (0 = forever)
	loop_count: u32,

	/// Ping-pong playback
	rewind: bool,

	/// Marks a walking cycle
	movement: bool,

	/// Per logical frame delays in ticks, empty meaning 1 for every frame
	delays: Vec<f64>,

	/// Per logical frame hotspots
	hotspots: Option<Vec<Option<Hotspot>>>,

	/// Rendered per-direction previews
	previews: PreviewCache,
}

impl State {
	/// Creates an empty, single direction state for `width x height` cells.
	pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
		Self {
			name: name.into(),
			dirs: DirCount::One,
			width,
			height,
			frames: Vec::new(),
			loop_count: 0,
			rewind: false,
			movement: false,
			delays: Vec::new(),
			hotspots: None,
			previews: PreviewCache::default(),
		}
	}

	/// Creates a state holding `frames` in storage order.
	///
	/// # Errors
	///
	/// Returns an error if a frame is not `width x height` or if the number of
	/// frames is not a multiple of `dirs`.
	pub fn from_frames(
		name: impl Into<String>,
		dirs: DirCount,
		width: u32,
		height: u32,
		frames: Vec<Frame>,
	) -> Result<Self, DmiError> {
		let mut state = Self::new(name, width, height);
		state.set_frames(dirs, frames)?;
		Ok(state)
	}

	/// Returns the state name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Sets the state name.
	pub fn set_name(&mut self, name: impl Into<String>) {
		self.name = name.into();
	}

	/// Returns the direction count.
	pub fn dirs(&self) -> DirCount {
		self.dirs
	}

	/// Returns the number of logical frames.
	pub fn frame_count(&self) -> usize {
		self.frames.len() / self.dirs.to_usize()
	}

	/// Returns the cell width.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Returns the cell height.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Returns the loop count (0 = infinite).
	pub fn loop_count(&self) -> u32 {
		self.loop_count
	}

	/// Sets the loop count (0 = infinite).
	pub fn set_loop_count(&mut self, loop_count: u32) {
		self.loop_count = loop_count;
		self.mark_dirty();
	}

	/// Returns whether the animation plays back and forth.
	pub fn rewind(&self) -> bool {
		self.rewind
	}

	/// Sets ping-pong playback.
	pub fn set_rewind(&mut self, rewind: bool) {
		self.rewind = rewind;
		self.mark_dirty();
	}

	/// Returns whether this state is a movement state.
	pub fn movement(&self) -> bool {
		self.movement
	}

	/// Marks this state as a movement state.
	pub fn set_movement(&mut self, movement: bool) {
		self.movement = movement;
	}

	/// Returns the explicit delays (empty means 1 tick per frame).
	pub fn delays(&self) -> &[f64] {
		&self.delays
	}

	/// Returns the effective delay of a logical frame.
	pub fn delay(&self, frame: usize) -> f64 {
		self.delays.get(frame).copied().unwrap_or(DEFAULT_DELAY)
	}

	/// Replaces the delays.
	///
	/// # Errors
	///
	/// Returns [`DmiError::DelayCountMismatch`] unless `delays` is empty or
	/// holds exactly one entry per logical frame.
	pub fn set_delays(&mut self, delays: Vec<f64>) -> Result<(), DmiError> {
		let expected = self.frame_count();
		if !delays.is_empty() && delays.len() != expected {
			return Err(DmiError::DelayCountMismatch {
				expected,
				actual: delays.len(),
			});
		}
		self.delays = delays;
		self.mark_dirty();
		Ok(())
	}

	/// Returns the hotspots, if any.
	pub fn hotspots(&self) -> Option<&[Option<Hotspot>]> {
		self.hotspots.as_deref()
	}

	/// Returns the hotspot of a logical frame.
	pub fn hotspot(&self, frame: usize) -> Option<Hotspot> {
		self.hotspots.as_ref()?.get(frame).copied().flatten()
	}

	/// Replaces the hotspots.
	///
	/// # Errors
	///
	/// Returns [`DmiError::HotspotCountMismatch`] unless `hotspots` is `None`
	/// or holds exactly one entry per logical frame.
	pub fn set_hotspots(&mut self, hotspots: Option<Vec<Option<Hotspot>>>) -> Result<(), DmiError> {
		if let Some(list) = &hotspots
			&& list.len() != self.frame_count()
		{
			return Err(DmiError::HotspotCountMismatch {
				expected: self.frame_count(),
				actual: list.len(),
			});
		}
		self.hotspots = hotspots;
		Ok(())
	}

	/// Returns all frames in storage order.
	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	/// Replaces every frame and the direction count at once.
	///
	/// # Errors
	///
	/// Returns an error if a frame has the wrong size or if the number of
	/// frames is not a multiple of `dirs`.
	pub fn set_frames(&mut self, dirs: DirCount, frames: Vec<Frame>) -> Result<(), DmiError> {
		if frames.len() % dirs.to_usize() != 0 {
			return Err(DmiError::FrameCountMismatch {
				frames: frames.len(),
				dirs: dirs.to_u32(),
			});
		}
		if let Some(frame) = frames.iter().find(|f| f.dimensions() != (self.width, self.height)) {
			return Err(DmiError::size_mismatch((self.width, self.height), frame.dimensions()));
		}
		self.dirs = dirs;
		self.frames = frames;
		self.mark_dirty();
		Ok(())
	}

	/// Storage index of logical `frame` facing `dir`.
	///
	/// Directions this state does not draw resolve to the South slot.
	pub fn frame_index(&self, frame: usize, dir: Dir) -> usize {
		frame * self.dirs.to_usize() + self.dirs.slot(dir)
	}

	/// Returns logical `frame` facing `dir`.
	pub fn frame(&self, frame: usize, dir: Dir) -> Option<&Frame> {
		self.frames.get(self.frame_index(frame, dir))
	}

	/// Returns logical `frame` facing `dir` for editing.
	pub fn frame_mut(&mut self, frame: usize, dir: Dir) -> Option<&mut Frame> {
		let index = self.frame_index(frame, dir);
		self.mark_dirty();
		self.frames.get_mut(index)
	}

	/// Replaces logical `frame` facing `dir`.
	///
	/// # Errors
	///
	/// Returns [`DmiError::SizeMismatch`] if the frame has the wrong size, or
	/// [`DmiError::FrameCountMismatch`] if the slot does not exist.
	pub fn set_frame(&mut self, frame: usize, dir: Dir, replacement: Frame) -> Result<(), DmiError> {
		if replacement.dimensions() != (self.width, self.height) {
			return Err(DmiError::size_mismatch(
				(self.width, self.height),
				replacement.dimensions(),
			));
		}
		let index = self.frame_index(frame, dir);
		let frames = self.frames.len();
		let Some(slot) = self.frames.get_mut(index) else {
			return Err(DmiError::FrameCountMismatch {
				frames,
				dirs: self.dirs.to_u32(),
			});
		};
		*slot = replacement;
		self.mark_dirty();
		Ok(())
	}

	/// Changes the direction count, keeping every frame that exists in both
	/// layouts at the same `(frame, dir)` position.
	///
	/// New slots are filled with placeholder frames.
	pub fn set_dirs(&mut self, dirs: DirCount) {
		if dirs == self.dirs {
			return;
		}

		let frame_count = self.frame_count();
		let old_dirs = self.dirs.to_usize();
		let mut old: Vec<Option<Frame>> = std::mem::take(&mut self.frames).into_iter().map(Some).collect();

		let mut frames = Vec::with_capacity(frame_count * dirs.to_usize());
		for frame in 0..frame_count {
			for slot in 0..dirs.to_usize() {
				let existing = if slot < old_dirs {
					old.get_mut(frame * old_dirs + slot).and_then(Option::take)
				} else {
					None
				};
				frames.push(existing.unwrap_or_else(|| Frame::placeholder(self.width, self.height)));
			}
		}

		self.dirs = dirs;
		self.frames = frames;
		self.resize_frame_attributes();
		self.mark_dirty();
	}

	/// Changes the number of logical frames, holding the direction count.
	///
	/// New frames are filled with placeholders, new delays with 1 and new
	/// hotspots with the last hotspot set.
	pub fn set_frame_count(&mut self, frame_count: usize) {
		if frame_count == self.frame_count() {
			return;
		}

		let (width, height) = (self.width, self.height);
		self.frames
			.resize_with(frame_count * self.dirs.to_usize(), || Frame::placeholder(width, height));
		self.resize_frame_attributes();
		self.mark_dirty();
	}

	/// Brings delays and hotspots back to one entry per logical frame.
	fn resize_frame_attributes(&mut self) {
		let frame_count = self.frame_count();

		if !self.delays.is_empty() {
			self.delays.resize(frame_count, DEFAULT_DELAY);
		}

		if let Some(hotspots) = &mut self.hotspots {
			let last = hotspots.iter().rev().find_map(|h| *h);
			hotspots.resize(frame_count, last);
		}
	}

	/// Resamples every frame to `width x height`.
	pub(crate) fn resize_geometry(&mut self, width: u32, height: u32) {
		self.width = width;
		self.height = height;
		for frame in &mut self.frames {
			*frame = frame.resized(width, height);
		}
		self.mark_dirty();
	}

	/// Direct write access for the metadata parser, skipping validation.
	pub(crate) fn set_attributes_unchecked(
		&mut self,
		dirs: DirCount,
		delays: Vec<f64>,
		hotspots: Option<Vec<Option<Hotspot>>>,
	) {
		self.dirs = dirs;
		self.delays = delays;
		self.hotspots = hotspots;
	}

	/// Appends a frame produced by slicing, skipping validation.
	pub(crate) fn push_frame_unchecked(&mut self, frame: Frame) {
		self.frames.push(frame);
	}

	/// Drops every cached preview.
	pub fn mark_dirty(&mut self) {
		self.previews.clear();
	}

	/// Animated PNG preview of the state facing `dir`.
	///
	/// Single frame states yield a plain PNG. The result is cached until the
	/// state is modified.
	pub fn preview(&mut self, dir: Dir) -> Result<&[u8], DmiError> {
		let dir = DIR_ORDER[self.dirs.slot(dir)];
		if !self.previews.contains(dir) {
			let encoded = preview::encode_direction(self, dir)?;
			self.previews.insert(dir, encoded);
		}
		Ok(self.previews.get(dir).unwrap_or_default())
	}

	/// Returns `true` if a preview for `dir` is cached.
	pub fn has_cached_preview(&self, dir: Dir) -> bool {
		self.previews.contains(DIR_ORDER[self.dirs.slot(dir)])
	}

	/// Lays the state out as one row per direction and one column per frame.
	pub fn build_composite(&self) -> image::RgbaImage {
		preview::composite(self)
	}
}

impl fmt::Display for State {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"\"{}\": {} dirs, {} frames",
			self.name,
			self.dirs,
			self.frame_count()
		)?;
		if self.loop_count != 0 {
			write!(f, ", loop {}", self.loop_count)?;
		}
		if self.rewind {
			write!(f, ", rewind")?;
		}
		if self.movement {
			write!(f, ", movement")?;
		}
		Ok(())
	}
}

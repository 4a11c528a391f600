//! `.DMI` file format support for `dmi-rs` project.
//!
//! A DMI file is a PNG sprite sheet. Every frame of every icon state sits in
//! one cell of a square-ish grid, and a `zTXt` chunk with the keyword
//! `Description` describes how the cells group into states.
//!
//! # File Structure
//!
//! - **Raster:** RGBA cells of `width x height` pixels, laid out row-major,
//!   `ceil(sqrt(total_frames))` cells per row (see [`GridLayout`])
//! - **Metadata:** `# BEGIN DMI` ... `# END DMI` text block placed right after
//!   the `IHDR` chunk (see [`Metadata`])
//!
//! Cells are consumed in flattened order: states in order, then per state
//! logical frames, then directions in [`DIR_ORDER`] (South, North, East, West,
//! Southeast, Southwest, Northeast, Northwest).
//!
//! A PNG without a `Description` chunk is read as a sheet with one
//! single-frame state named `"png"`.
//!
//! # Usage Examples
//!
//! ## Building and encoding a sheet
//!
//! ```
//! use dmi_types::file::dmi::{Dir, DirCount, Dmi, Frame, State};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut dmi = Dmi::new(16, 16);
//!
//! let mut walk = State::new("walk", 16, 16);
//! walk.set_dirs(DirCount::Four);
//! walk.set_frame_count(2);
//! walk.set_delays(vec![1.0, 2.0])?;
//! walk.set_frame(1, Dir::East, Frame::placeholder(16, 16))?;
//! dmi.push_state(walk)?;
//!
//! let bytes = dmi.to_bytes()?;
//! let decoded = Dmi::from_bytes(&bytes)?;
//! assert_eq!(decoded, dmi);
//! # Ok(())
//! # }
//! ```
//!
//! ## Inspecting states
//!
//! ```no_run
//! use dmi_types::file::dmi::{Dir, Dmi};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("mob.dmi")?;
//! let dmi = Dmi::from_bytes(&data)?;
//!
//! for state in dmi.states() {
//!     println!("{state}");
//!     if let Some(frame) = state.frame(0, Dir::North) {
//!         println!("  first north frame: {frame}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::{
	fmt,
	ops::{Deref, DerefMut},
};

use image::RgbaImage;
use log::{debug, trace, warn};

use crate::file::DmiError;

pub mod container;
pub mod dir;
pub mod frame;
pub mod layout;
pub mod metadata;
mod model;
pub mod parse_config;
mod preview;
pub mod state;

pub use container::{Chunk, ChunkKind, DecodedRaster, PngCodec, RasterCodec};
pub use dir::{DIR_ORDER, Dir, DirCount};
pub use frame::{Frame, PLACEHOLDER_COLOR};
pub use layout::GridLayout;
pub use metadata::{HotspotRun, Metadata, StateMetadata};
pub use parse_config::ParseConfig;
pub use state::{Hotspot, State};

/// Keyword of the `zTXt` chunk holding the metadata.
pub const DESCRIPTION_KEYWORD: &str = "Description";

/// Name of the state created when reading a plain PNG.
pub const BARE_PNG_STATE_NAME: &str = "png";

/// A DMI sprite sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Dmi {
	/// Frame width in pixels
	width: u32,

	/// Frame height in pixels
	height: u32,

	/// Icon states in file order
	states: Vec<State>,
}

impl Default for Dmi {
	fn default() -> Self {
		Self::new(metadata::DEFAULT_SIZE, metadata::DEFAULT_SIZE)
	}
}

impl Dmi {
	/// Creates an empty sheet with `width x height` frames.
	pub fn new(width: u32, height: u32) -> Self {
		Self {
			width,
			height,
			states: Vec::new(),
		}
	}

	/// Wraps a plain image as a sheet with a single `"png"` state.
	pub fn from_image(image: RgbaImage) -> Self {
		let (width, height) = image.dimensions();
		let mut state = State::new(BARE_PNG_STATE_NAME, width, height);
		state.push_frame_unchecked(Frame::new(image));
		Self {
			width,
			height,
			states: vec![state],
		}
	}

	/// Returns the frame width.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Returns the frame height.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Returns the states.
	pub fn states(&self) -> &[State] {
		&self.states
	}

	/// Returns the states for editing.
	///
	/// Each state is handed out through a [`StateMut`] guard, so a state
	/// swapped for one of another cell size is resampled back to the sheet's.
	pub fn states_mut(&mut self) -> impl Iterator<Item = StateMut<'_>> {
		let (width, height) = (self.width, self.height);
		self.states
			.iter_mut()
			.map(move |state| StateMut { state, width, height })
	}

	/// Returns the state at `index`.
	pub fn state(&self, index: usize) -> Option<&State> {
		self.states.get(index)
	}

	/// Returns the state at `index` for editing.
	pub fn state_mut(&mut self, index: usize) -> Option<StateMut<'_>> {
		let (width, height) = (self.width, self.height);
		self.states
			.get_mut(index)
			.map(|state| StateMut { state, width, height })
	}

	/// Returns the first state named `name`.
	pub fn find_state(&self, name: &str) -> Option<&State> {
		self.states.iter().find(|state| state.name() == name)
	}

	/// Appends a state.
	///
	/// # Errors
	///
	/// Returns [`DmiError::SizeMismatch`] if the state's cell size differs
	/// from the sheet's.
	pub fn push_state(&mut self, state: State) -> Result<(), DmiError> {
		self.check_geometry(&state)?;
		self.states.push(state);
		Ok(())
	}

	/// Inserts a state at `index`.
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - `index > states().len()` ([`DmiError::StateIndexOutOfRange`])
	/// - The state's cell size differs from the sheet's ([`DmiError::SizeMismatch`])
	pub fn insert_state(&mut self, index: usize, state: State) -> Result<(), DmiError> {
		if index > self.states.len() {
			return Err(DmiError::StateIndexOutOfRange {
				index,
				len: self.states.len(),
			});
		}
		self.check_geometry(&state)?;
		self.states.insert(index, state);
		Ok(())
	}

	/// Removes and returns the state at `index`.
	pub fn remove_state(&mut self, index: usize) -> Option<State> {
		(index < self.states.len()).then(|| self.states.remove(index))
	}

	/// Replaces every state.
	///
	/// # Errors
	///
	/// Returns [`DmiError::SizeMismatch`] if any state's cell size differs
	/// from the sheet's; the sheet is left unchanged.
	pub fn set_states(&mut self, states: Vec<State>) -> Result<(), DmiError> {
		for state in &states {
			self.check_geometry(state)?;
		}
		self.states = states;
		Ok(())
	}

	fn check_geometry(&self, state: &State) -> Result<(), DmiError> {
		if (state.width(), state.height()) != (self.width, self.height) {
			return Err(DmiError::size_mismatch(
				(self.width, self.height),
				(state.width(), state.height()),
			));
		}
		Ok(())
	}

	/// Total number of cells across all states.
	pub fn frame_count(&self) -> usize {
		self.states.iter().map(|state| state.frames().len()).sum()
	}

	/// Resamples every frame of every state to `width x height`.
	pub fn resize(&mut self, width: u32, height: u32) {
		self.width = width;
		self.height = height;
		for state in &mut self.states {
			state.resize_geometry(width, height);
		}
	}

	/// Describes the sheet as metadata.
	pub fn metadata(&self) -> Metadata {
		Metadata::describe(self)
	}

	/// Packs every frame into the sheet raster.
	pub fn to_raster(&self) -> Result<RgbaImage, DmiError> {
		let layout = GridLayout::for_frames(self.frame_count(), self.width, self.height);
		layout.pack(self.states.iter().flat_map(State::frames))
	}

	/// Loads a DMI file from bytes using the default configuration.
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - The PNG container is malformed
	/// - The metadata text is malformed
	/// - A state has no frame count
	/// - The states declare more frames than the raster has cells
	pub fn from_bytes(data: &[u8]) -> Result<Self, DmiError> {
		Self::from_bytes_with_config(data, &ParseConfig::default())
	}

	/// Loads a DMI file from bytes.
	pub fn from_bytes_with_config(data: &[u8], config: &ParseConfig) -> Result<Self, DmiError> {
		Self::from_bytes_with_codec(data, &PngCodec::new(), config)
	}

	/// Loads a DMI file from bytes with a custom raster codec.
	pub fn from_bytes_with_codec<C: RasterCodec + ?Sized>(
		data: &[u8],
		codec: &C,
		config: &ParseConfig,
	) -> Result<Self, DmiError> {
		let raster = codec.decode(data)?;

		let Some(chunk) = raster.find_chunk(ChunkKind::CompressedText, DESCRIPTION_KEYWORD) else {
			if !config.bare_png_fallback {
				return Err(DmiError::MissingMetadata);
			}
			warn!(
				"No DMI metadata found, reading {}x{} image as a plain PNG",
				raster.image.width(),
				raster.image.height()
			);
			return Ok(Self::from_image(raster.image));
		};

		let metadata = Metadata::parse(&chunk.text)?;
		Self::from_metadata(&metadata, &raster.image, config)
	}

	/// Builds a sheet by slicing `raster` as `metadata` describes.
	///
	/// Nothing is allocated per frame until the declared frames are known to
	/// fit in the raster.
	pub fn from_metadata(
		metadata: &Metadata,
		raster: &RgbaImage,
		config: &ParseConfig,
	) -> Result<Self, DmiError> {
		let mut frame_counts = Vec::with_capacity(metadata.states.len());
		for described in &metadata.states {
			let Some(frames) = described.frames else {
				return Err(DmiError::MissingFrameCount {
					state: described.name.clone(),
				});
			};
			frame_counts.push(frames);
		}

		let (width, height) = (metadata.width, metadata.height);
		let layout = GridLayout::for_raster(raster.width(), raster.height(), width, height);
		let declared = metadata.declared_frame_count();
		if declared > layout.capacity() {
			return Err(DmiError::CapacityExceeded {
				declared,
				capacity: layout.capacity(),
			});
		}

		let mut dmi = Self::new(width, height);
		let mut cell = 0;

		for (described, frame_count) in metadata.states.iter().zip(frame_counts) {
			let cells = frame_count
				.checked_mul(described.dirs.to_usize())
				.ok_or(DmiError::CapacityExceeded {
					declared,
					capacity: layout.capacity(),
				})?;
			let mut state = described.to_state(width, height);
			for _ in 0..cells {
				state.push_frame_unchecked(layout.slice(raster, cell)?);
				cell += 1;
			}
			trace!("Sliced state {state}");

			let delays = described.delays.len();
			if delays != 0 && delays != frame_count {
				if config.strict_delays {
					return Err(DmiError::DelayCountMismatch {
						expected: frame_count,
						actual: delays,
					});
				}
				warn!(
					"State \"{}\" declares {frame_count} frames but {delays} delays",
					described.name
				);
			}

			dmi.states.push(state);
		}

		debug!(
			"Parsed {}x{} DMI: {} states, {} of {} cells used",
			width,
			height,
			dmi.states.len(),
			cell,
			layout.capacity()
		);
		Ok(dmi)
	}

	/// Encodes the sheet as a DMI file.
	pub fn to_bytes(&self) -> Result<Vec<u8>, DmiError> {
		self.to_bytes_with_codec(&PngCodec::new())
	}

	/// Encodes the sheet as a DMI file with a custom raster codec.
	pub fn to_bytes_with_codec<C: RasterCodec + ?Sized>(&self, codec: &C) -> Result<Vec<u8>, DmiError> {
		let metadata = self.metadata().to_string();
		let raster = self.to_raster()?;
		let chunks = [Chunk::new(ChunkKind::CompressedText, DESCRIPTION_KEYWORD, metadata)];
		let data = codec.encode(&raster, &chunks)?;
		debug!(
			"Encoded {}x{} DMI: {} states into a {}x{} raster, {} bytes",
			self.width,
			self.height,
			self.states.len(),
			raster.width(),
			raster.height(),
			data.len()
		);
		Ok(data)
	}

	/// Serializes the in-memory model to JSON.
	pub fn to_model_string(&self) -> Result<String, DmiError> {
		model::to_model_string(self)
	}

	/// Rebuilds a sheet from [`Dmi::to_model_string`] output.
	pub fn from_model_string(data: &str) -> Result<Self, DmiError> {
		model::from_model_string(data)
	}

	/// Returns `true` if both sheets have the same model string.
	pub fn is_same(&self, other: &Dmi) -> bool {
		match (self.to_model_string(), other.to_model_string()) {
			(Ok(a), Ok(b)) => a == b,
			_ => false,
		}
	}
}

/// Write access to one state of a [`Dmi`].
///
/// Dereferences to [`State`]. When dropped, a state whose cell size no longer
/// matches the sheet is resampled to the sheet's size.
#[derive(Debug)]
pub struct StateMut<'a> {
	state: &'a mut State,
	width: u32,
	height: u32,
}

impl Deref for StateMut<'_> {
	type Target = State;

	fn deref(&self) -> &State {
		self.state
	}
}

impl DerefMut for StateMut<'_> {
	fn deref_mut(&mut self) -> &mut State {
		self.state
	}
}

impl Drop for StateMut<'_> {
	fn drop(&mut self) {
		let size = (self.state.width(), self.state.height());
		if size != (self.width, self.height) {
			warn!(
				"State \"{}\" is {}x{} in a {}x{} sheet, resampling",
				self.state.name(),
				size.0,
				size.1,
				self.width,
				self.height
			);
			self.state.resize_geometry(self.width, self.height);
		}
	}
}

impl fmt::Display for Dmi {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"DMI File: {}x{}, {} states, {} frames",
			self.width,
			self.height,
			self.states.len(),
			self.frame_count()
		)
	}
}

impl TryFrom<&[u8]> for Dmi {
	type Error = DmiError;

	fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
		Self::from_bytes(value)
	}
}

impl TryFrom<Vec<u8>> for Dmi {
	type Error = DmiError;

	fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
		Self::from_bytes(&value)
	}
}

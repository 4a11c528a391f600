//! Error types for file format parsing and manipulation.

use thiserror::Error;

/// Errors that can occur when parsing the textual DMI metadata block
#[derive(Debug, Error)]
pub enum MetadataError {
	/// The `# BEGIN DMI` header or the version line is missing or wrong
	#[error("Missing or bad metadata header on line {line}: expected `{expected}`, got `{found}`")]
	MissingOrBadHeader {
		/// Line number (1-based)
		line: usize,
		/// Line that was expected
		expected: &'static str,
		/// Line that was found
		found: String,
	},

	/// A state-scoped key appeared before any `state` line
	#[error("Out of order state information on line {line}: `{key}` appears before any state")]
	OutOfOrderMetadata {
		/// Line number (1-based)
		line: usize,
		/// Offending key
		key: String,
	},

	/// The grammar is closed, any key not listed is rejected
	#[error("Unknown metadata key `{key}` on line {line}")]
	UnknownMetadataKey {
		/// Line number (1-based)
		line: usize,
		/// Offending key
		key: String,
	},

	/// A value could not be parsed for its key
	#[error("Invalid value `{value}` for `{key}` on line {line}")]
	InvalidValue {
		/// Line number (1-based)
		line: usize,
		/// Key the value belongs to
		key: &'static str,
		/// Raw value
		value: String,
	},

	/// A state name that is neither `null` nor quoted
	#[error("Invalid state name `{value}` on line {line}")]
	InvalidStateName {
		/// Line number (1-based)
		line: usize,
		/// Raw value
		value: String,
	},

	/// A `hotspot` line appeared before the state declared its frame count
	#[error("Hotspot on line {line} needs a frame count, but state `{state}` has not declared one")]
	MissingFrameCount {
		/// Line number (1-based)
		line: usize,
		/// Name of the open state
		state: String,
	},
}

/// Errors that can occur when parsing, building or encoding DMI files
#[derive(Debug, Error)]
pub enum DmiError {
	/// Malformed PNG container
	#[error("PNG decode error: {0}")]
	Decode(#[from] png::DecodingError),

	/// PNG encoder failure
	#[error("PNG encode error: {0}")]
	Encode(#[from] png::EncodingError),

	/// Malformed metadata text
	#[error(transparent)]
	Metadata(#[from] MetadataError),

	/// A frame does not have the geometry of its sheet
	#[error(
		"Size mismatch: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}"
	)]
	SizeMismatch {
		/// Expected width in pixels
		expected_width: u32,
		/// Expected height in pixels
		expected_height: u32,
		/// Actual width in pixels
		actual_width: u32,
		/// Actual height in pixels
		actual_height: u32,
	},

	/// A state never declared how many frames it has
	#[error("State `{state}` is missing its frame count")]
	MissingFrameCount {
		/// Name of the state
		state: String,
	},

	/// The metadata declares more frames than the raster has cells
	#[error("Capacity exceeded: metadata declares {declared} frames, the raster holds {capacity}")]
	CapacityExceeded {
		/// Total frames declared by all states (saturated)
		declared: usize,
		/// Number of whole cells in the raster
		capacity: usize,
	},

	/// A state index past the end of the sheet
	#[error("State index {index} out of range for a sheet of {len} states")]
	StateIndexOutOfRange {
		/// Requested index
		index: usize,
		/// Number of states in the sheet
		len: usize,
	},

	/// The PNG carries no `Description` metadata and bare images are not accepted
	#[error("No DMI metadata chunk found")]
	MissingMetadata,

	/// A frame list whose length is not a multiple of the direction count
	#[error("Frame count mismatch: {frames} frames cannot be split into {dirs} directions")]
	FrameCountMismatch {
		/// Number of frames supplied
		frames: usize,
		/// Direction count of the state
		dirs: u32,
	},

	/// A delay list whose length is neither 0 nor the frame count
	#[error("Delay count mismatch: expected 0 or {expected} delays, got {actual}")]
	DelayCountMismatch {
		/// Frame count of the state
		expected: usize,
		/// Number of delays supplied
		actual: usize,
	},

	/// A hotspot list whose length is not the frame count
	#[error("Hotspot count mismatch: expected {expected} hotspots, got {actual}")]
	HotspotCountMismatch {
		/// Frame count of the state
		expected: usize,
		/// Number of hotspots supplied
		actual: usize,
	},

	/// Frame data in a model string could not be decoded
	#[error("Invalid frame data: {0}")]
	InvalidFrameData(String),

	/// Model string (de)serialization error
	#[error(transparent)]
	ModelString(#[from] serde_json::Error),

	/// Image processing error
	#[error(transparent)]
	Image(#[from] image::ImageError),
}

impl DmiError {
	/// Creates a size mismatch error
	pub fn size_mismatch(expected: (u32, u32), actual: (u32, u32)) -> Self {
		Self::SizeMismatch {
			expected_width: expected.0,
			expected_height: expected.1,
			actual_width: actual.0,
			actual_height: actual.1,
		}
	}
}

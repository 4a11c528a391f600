//! Prelude module for `dmi_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```
//! use dmi_types::prelude::*;
//!
//! // Now you can use all common types directly
//! let mut dmi = DmiFile::new(16, 16);
//! let mut state = DmiState::new("walk", 16, 16);
//! state.set_dirs(DirCount::Four);
//! state.set_frame_count(2);
//! dmi.push_state(state).unwrap();
//! assert_eq!(dmi.frame_count(), 8);
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// Directions
	Dir,
	DirCount,

	// Errors
	DmiError,
	// DMI types
	DmiFile,
	DmiMetadata,
	DmiState,

	Frame,
	GridLayout,
	Hotspot,
	MetadataError,
	ParseConfig,
	StateMetadata,
	StateMut,
};

// Container seam
#[doc(inline)]
pub use crate::file::dmi::{ChunkKind, PngCodec, RasterCodec};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;

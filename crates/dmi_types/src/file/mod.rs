//! File type support for `dmi-rs` project.

mod error;

pub mod dmi;

// Re-export unified error types
pub use error::{DmiError, MetadataError};

// Re-export main file types
pub use dmi::{
	Dir, DirCount, Dmi as DmiFile, Frame, GridLayout, Hotspot, Metadata as DmiMetadata, ParseConfig,
	State as DmiState, StateMetadata, StateMut,
};

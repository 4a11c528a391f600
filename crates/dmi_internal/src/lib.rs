//! This module is separated into its own crate so the `dmi-rs` facade stays thin, and should not be used directly.

/// `use dmi_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export dmi_types for convenience
pub use dmi_types;

// Re-export commonly used types at crate root
pub use dmi_types::file::{Dir, DirCount, DmiError, DmiFile, DmiState, Frame, MetadataError, ParseConfig};

//! Prelude module for `dmi_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use dmi_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let mut state = DmiState::new("idle", 8, 8);
//! state.set_frame_count(1);
//! assert_eq!(state.frame(0, Dir::North), Some(&Frame::placeholder(8, 8)));
//! ```

// Re-export everything from dmi_types::prelude
#[doc(inline)]
pub use dmi_types::prelude::*;

// Re-export the entire dmi_types module for advanced usage
#[doc(inline)]
pub use dmi_types;

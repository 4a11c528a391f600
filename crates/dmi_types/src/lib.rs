//! This crate provides the data model and file format support for the `dmi-rs` project.
//!
//! # File Formats
//!
//! - **DMI**: PNG sprite sheets whose `zTXt` `Description` chunk groups the
//!   cells into named, directional, animated icon states
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use dmi_types::prelude::*;
//!
//! # fn main() -> Result<(), DmiError> {
//! let data = std::fs::read("mob.dmi").unwrap_or_default();
//! let dmi = DmiFile::from_bytes(&data)?;
//! for state in dmi.states() {
//!     println!("{state}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```
//! use dmi_types::file::dmi::{Dmi, State};
//!
//! let mut dmi = Dmi::new(32, 32);
//! dmi.push_state(State::new("idle", 32, 32)).unwrap();
//! assert_eq!(dmi.states().len(), 1);
//! ```

pub mod file;

/// `use dmi_types::prelude::*;` to import commonly used items.
pub mod prelude;

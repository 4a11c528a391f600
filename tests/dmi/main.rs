//! Integration tests for reading and writing DMI files through `dmi-rs`

mod editing;
mod fixtures;
mod parsing;

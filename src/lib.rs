#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `dmi-rs` reads, edits and writes DMI sprite sheets: PNG images that carry
//! BYOND icon state metadata in a `zTXt` chunk.
//!
pub use dmi_internal::*;

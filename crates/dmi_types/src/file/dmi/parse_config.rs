//! Parse configuration for DMI files.

/// Configuration for [`Dmi::from_bytes_with_config`](super::Dmi::from_bytes_with_config).
///
/// # Presets
///
/// - `default()` / `lenient()`: plain PNGs become a single `"png"` state and
///   delay lists are taken as written
/// - `strict()`: plain PNGs are rejected and delay lists must match the
///   declared frame count
///
/// # Examples
///
/// ```
/// use dmi_types::file::dmi::ParseConfig;
///
/// let config = ParseConfig::strict();
/// assert!(!config.bare_png_fallback);
///
/// let config = ParseConfig::new(true, true);
/// assert!(config.strict_delays);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
	/// Treat a PNG without a `Description` chunk as a one state sheet
	pub bare_png_fallback: bool,
	/// Reject states whose delay list is neither empty nor one per frame
	pub strict_delays: bool,
}

impl Default for ParseConfig {
	fn default() -> Self {
		Self {
			bare_png_fallback: true,
			strict_delays: false,
		}
	}
}

impl ParseConfig {
	/// Create a new parse configuration.
	///
	/// # Arguments
	/// * `bare_png_fallback` - Accept plain PNGs
	/// * `strict_delays` - Validate delay counts
	pub fn new(bare_png_fallback: bool, strict_delays: bool) -> Self {
		Self {
			bare_png_fallback,
			strict_delays,
		}
	}

	/// Same as the default: accept what other DMI tools accept.
	pub fn lenient() -> Self {
		Self::default()
	}

	/// Only accept well formed DMI files.
	pub fn strict() -> Self {
		Self {
			bare_png_fallback: false,
			strict_delays: true,
		}
	}
}

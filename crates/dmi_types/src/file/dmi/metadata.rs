//! DMI metadata text.
//!
//! The metadata lives in a `zTXt` chunk with the keyword `Description`:
//!
//! ```text
//! # BEGIN DMI
//! version = 4.0
//! 	width = 32
//! 	height = 32
//! state = "walk"
//! 	dirs = 4
//! 	frames = 3
//! 	delay = 1,2,1
//! 	movement = 1
//! 	hotspot = 16,4,1
//! # END DMI
//! ```
//!
//! Top-level keys are indented under an implicit scope and state keys under
//! their `state` line. The grammar is closed: unknown keys are an error.

use std::{fmt, str::FromStr};

use super::{
	Dmi,
	dir::DirCount,
	state::{Hotspot, State},
};
use crate::file::MetadataError;

/// First line of the metadata block.
pub const HEADER: &str = "# BEGIN DMI";

/// Last line of the metadata block.
pub const FOOTER: &str = "# END DMI";

/// Supported metadata version.
pub const VERSION: &str = "4.0";

/// Second line of the metadata block.
const VERSION_LINE: &str = "version = 4.0";

/// Sheet geometry used until a `width`/`height` line is seen.
pub const DEFAULT_SIZE: u32 = 32;

/// One `hotspot` line: `hotspot` applies to every logical frame from
/// `first_frame` (0-based) onwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotspotRun {
	/// First logical frame covered (0-based)
	pub first_frame: usize,
	/// Pixel offset
	pub hotspot: Hotspot,
}

/// Attributes of one state as written in the metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateMetadata {
	/// State name (unescaped)
	pub name: String,
	/// Direction count
	pub dirs: DirCount,
	/// Declared number of logical frames
	pub frames: Option<usize>,
	/// Explicit delays in ticks
	pub delays: Vec<f64>,
	/// Loop count (0 = infinite)
	pub loop_count: u32,
	/// Ping-pong playback
	pub rewind: bool,
	/// Movement state flag
	pub movement: bool,
	/// Hotspot lines in file order, expanded against `frames` on demand
	pub hotspot_runs: Vec<HotspotRun>,
}

impl StateMetadata {
	/// Creates metadata for a state named `name` with default attributes.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	/// Describes an existing state.
	pub fn describe(state: &State) -> Self {
		Self {
			name: state.name().to_owned(),
			dirs: state.dirs(),
			frames: Some(state.frame_count()),
			delays: state.delays().to_vec(),
			loop_count: state.loop_count(),
			rewind: state.rewind(),
			movement: state.movement(),
			hotspot_runs: state.hotspots().map(hotspot_runs).unwrap_or_default(),
		}
	}

	/// Expands the hotspot lines to one entry per declared logical frame.
	///
	/// Every line fills its frame and all later ones, so a later line wins
	/// for the range it covers. Allocates `frames` entries; callers parsing
	/// untrusted input should check the frame count first.
	pub fn expand_hotspots(&self) -> Option<Vec<Option<Hotspot>>> {
		if self.hotspot_runs.is_empty() {
			return None;
		}
		let mut hotspots = vec![None; self.frames.unwrap_or(0)];
		for run in &self.hotspot_runs {
			for slot in hotspots.iter_mut().skip(run.first_frame) {
				*slot = Some(run.hotspot);
			}
		}
		Some(hotspots)
	}

	/// Creates an empty state of `width x height` cells carrying these
	/// attributes, ready to receive its frames.
	pub(crate) fn to_state(&self, width: u32, height: u32) -> State {
		let mut state = State::new(self.name.clone(), width, height);
		state.set_loop_count(self.loop_count);
		state.set_rewind(self.rewind);
		state.set_movement(self.movement);
		state.set_attributes_unchecked(self.dirs, self.delays.clone(), self.expand_hotspots());
		state
	}

	fn write_to(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let frames = self.frames.unwrap_or(0);

		writeln!(f, "state = {}", escape_state_name(&self.name))?;
		writeln!(f, "\tdirs = {}", self.dirs)?;
		writeln!(f, "\tframes = {frames}")?;
		if frames > 1 && !self.delays.is_empty() {
			let delays: Vec<String> = self.delays.iter().map(f64::to_string).collect();
			writeln!(f, "\tdelay = {}", delays.join(","))?;
		}
		if self.loop_count != 0 {
			writeln!(f, "\tloop = {}", self.loop_count)?;
		}
		if self.rewind {
			writeln!(f, "\trewind = 1")?;
		}
		if self.movement {
			writeln!(f, "\tmovement = 1")?;
		}
		for run in &self.hotspot_runs {
			writeln!(
				f,
				"\thotspot = {},{},{}",
				run.hotspot.x,
				run.hotspot.y,
				run.first_frame + 1
			)?;
		}
		Ok(())
	}
}

/// Parsed or generated metadata block.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
	/// Cell width in pixels
	pub width: u32,
	/// Cell height in pixels
	pub height: u32,
	/// States in file order
	pub states: Vec<StateMetadata>,
}

impl Default for Metadata {
	fn default() -> Self {
		Self::new(DEFAULT_SIZE, DEFAULT_SIZE)
	}
}

impl Metadata {
	/// Creates metadata with no states.
	pub fn new(width: u32, height: u32) -> Self {
		Self {
			width,
			height,
			states: Vec::new(),
		}
	}

	/// Describes an existing sheet.
	pub fn describe(dmi: &Dmi) -> Self {
		Self {
			width: dmi.width(),
			height: dmi.height(),
			states: dmi.states().iter().map(StateMetadata::describe).collect(),
		}
	}

	/// Total number of cells the states declare, saturating at `usize::MAX`.
	pub fn declared_frame_count(&self) -> usize {
		self.states
			.iter()
			.map(|state| state.frames.unwrap_or(0).saturating_mul(state.dirs.to_usize()))
			.fold(0, usize::saturating_add)
	}

	/// Parses a metadata block.
	///
	/// # Errors
	///
	/// Fails on a wrong header or version line, state keys outside a state,
	/// unknown keys, malformed values and hotspots of states that have not
	/// declared their frame count.
	pub fn parse(text: &str) -> Result<Self, MetadataError> {
		let mut lines = text.split('\n').zip(1..);

		for (expected, line) in [(HEADER, 1), (VERSION_LINE, 2)] {
			let found = lines.next().map_or("", |(found, _)| found);
			if found != expected {
				return Err(MetadataError::MissingOrBadHeader {
					line,
					expected,
					found: found.to_owned(),
				});
			}
		}

		let mut metadata = Self::default();

		for (raw, line) in lines {
			if raw == FOOTER {
				break;
			}

			let (key, value) = raw.trim_start().split_once(" = ").unwrap_or((raw.trim_start(), ""));

			match key {
				"width" => metadata.width = parse_size(line, "width", value)?,
				"height" => metadata.height = parse_size(line, "height", value)?,
				"state" => {
					let name = unescape_state_name(value).ok_or_else(|| {
						MetadataError::InvalidStateName {
							line,
							value: value.to_owned(),
						}
					})?;
					metadata.states.push(StateMetadata::new(name));
				}
				"dirs" | "frames" | "delay" | "loop" | "rewind" | "movement" | "hotspot" => {
					let Some(state) = metadata.states.last_mut() else {
						return Err(MetadataError::OutOfOrderMetadata {
							line,
							key: key.to_owned(),
						});
					};
					state.apply(line, key, value)?;
				}
				_ => {
					return Err(MetadataError::UnknownMetadataKey {
						line,
						key: key.to_owned(),
					});
				}
			}
		}

		Ok(metadata)
	}
}

impl StateMetadata {
	/// Applies one state-scoped `key = value` line.
	fn apply(&mut self, line: usize, key: &str, value: &str) -> Result<(), MetadataError> {
		match key {
			"dirs" => {
				let dirs: u32 = parse_number(line, "dirs", value)?;
				self.dirs = DirCount::from_u32(dirs).ok_or_else(|| invalid(line, "dirs", value))?;
			}
			"frames" => self.frames = Some(parse_number(line, "frames", value)?),
			"delay" => {
				self.delays = value
					.split(',')
					.map(|delay| parse_delay(delay).ok_or_else(|| invalid(line, "delay", value)))
					.collect::<Result<_, _>>()?;
			}
			"loop" => self.loop_count = parse_number(line, "loop", value)?,
			"rewind" => self.rewind = parse_number::<i64>(line, "rewind", value)? == 1,
			"movement" => self.movement = parse_number::<i64>(line, "movement", value)? == 1,
			"hotspot" => self.apply_hotspot(line, value)?,
			_ => {
				return Err(MetadataError::UnknownMetadataKey {
					line,
					key: key.to_owned(),
				});
			}
		}
		Ok(())
	}

	/// Records a hotspot run starting at the 1-based `first_frame`.
	fn apply_hotspot(&mut self, line: usize, value: &str) -> Result<(), MetadataError> {
		let parts: Vec<&str> = value.split(',').collect();
		let [x, y, first_frame] = parts[..] else {
			return Err(invalid(line, "hotspot", value));
		};
		let hotspot = Hotspot::new(
			x.trim().parse().map_err(|_| invalid(line, "hotspot", value))?,
			y.trim().parse().map_err(|_| invalid(line, "hotspot", value))?,
		);
		let first_frame: usize = first_frame.trim().parse().map_err(|_| invalid(line, "hotspot", value))?;
		if first_frame == 0 {
			return Err(invalid(line, "hotspot", value));
		}

		if self.frames.is_none() {
			return Err(MetadataError::MissingFrameCount {
				line,
				state: self.name.clone(),
			});
		}

		self.hotspot_runs.push(HotspotRun {
			first_frame: first_frame - 1,
			hotspot,
		});
		Ok(())
	}
}

impl fmt::Display for Metadata {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "{HEADER}")?;
		writeln!(f, "{VERSION_LINE}")?;
		writeln!(f, "\twidth = {}", self.width)?;
		writeln!(f, "\theight = {}", self.height)?;
		for state in &self.states {
			state.write_to(f)?;
		}
		writeln!(f, "{FOOTER}")
	}
}

impl FromStr for Metadata {
	type Err = MetadataError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

fn invalid(line: usize, key: &'static str, value: &str) -> MetadataError {
	MetadataError::InvalidValue {
		line,
		key,
		value: value.to_owned(),
	}
}

fn parse_number<T: FromStr>(line: usize, key: &'static str, value: &str) -> Result<T, MetadataError> {
	value.trim().parse().map_err(|_| invalid(line, key, value))
}

/// Cell sizes must be at least one pixel.
fn parse_size(line: usize, key: &'static str, value: &str) -> Result<u32, MetadataError> {
	match parse_number(line, key, value)? {
		0 => Err(invalid(line, key, value)),
		size => Ok(size),
	}
}

/// Delays are integers unless they contain a decimal point.
fn parse_delay(value: &str) -> Option<f64> {
	let value = value.trim();
	if value.contains('.') {
		value.parse().ok()
	} else {
		value.parse::<i64>().ok().map(|delay| delay as f64)
	}
}

/// Run-length encodes per frame hotspots. Holes neither start nor end a run.
fn hotspot_runs(hotspots: &[Option<Hotspot>]) -> Vec<HotspotRun> {
	let mut runs = Vec::new();
	let mut previous: Option<Hotspot> = None;
	for (first_frame, hotspot) in hotspots.iter().enumerate() {
		let Some(hotspot) = *hotspot else {
			continue;
		};
		if previous != Some(hotspot) {
			runs.push(HotspotRun { first_frame, hotspot });
			previous = Some(hotspot);
		}
	}
	runs
}

/// Quotes a state name, escaping backslashes and double quotes.
pub fn escape_state_name(name: &str) -> String {
	let mut escaped = String::with_capacity(name.len() + 2);
	escaped.push('"');
	for c in name.chars() {
		if matches!(c, '\\' | '"') {
			escaped.push('\\');
		}
		escaped.push(c);
	}
	escaped.push('"');
	escaped
}

/// Reverses [`escape_state_name`]. The bare value `null` is the empty name.
///
/// Returns `None` if the value is not quoted.
pub fn unescape_state_name(value: &str) -> Option<String> {
	if value == "null" {
		return Some(String::new());
	}
	let inner = value.strip_prefix('"')?.strip_suffix('"')?;

	let mut name = String::with_capacity(inner.len());
	let mut chars = inner.chars();
	while let Some(c) = chars.next() {
		match c {
			'\\' => name.push(chars.next().unwrap_or('\\')),
			_ => name.push(c),
		}
	}
	Some(name)
}

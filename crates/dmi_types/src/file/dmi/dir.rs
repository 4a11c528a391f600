//! Sprite directions and direction counts.

use std::fmt::{self, Formatter};

use serde::{Deserialize, Serialize};

/// A facing direction.
///
/// The discriminants are the bit flags used by BYOND, diagonals being the
/// combination of their two cardinal components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Dir {
	/// North
	North = 1,
	/// South
	South = 2,
	/// East
	East = 4,
	/// West
	West = 8,
	/// Southeast
	Southeast = 2 | 4,
	/// Southwest
	Southwest = 2 | 8,
	/// Northeast
	Northeast = 1 | 4,
	/// Northwest
	Northwest = 1 | 8,
}

/// Canonical storage order of directions inside a state.
pub const DIR_ORDER: [Dir; 8] = [
	Dir::South,
	Dir::North,
	Dir::East,
	Dir::West,
	Dir::Southeast,
	Dir::Southwest,
	Dir::Northeast,
	Dir::Northwest,
];

impl Dir {
	/// Position of this direction in [`DIR_ORDER`].
	pub fn order_index(self) -> usize {
		match self {
			Self::South => 0,
			Self::North => 1,
			Self::East => 2,
			Self::West => 3,
			Self::Southeast => 4,
			Self::Southwest => 5,
			Self::Northeast => 6,
			Self::Northwest => 7,
		}
	}

	/// Human readable name.
	pub fn name(self) -> &'static str {
		match self {
			Self::North => "North",
			Self::South => "South",
			Self::East => "East",
			Self::West => "West",
			Self::Southeast => "Southeast",
			Self::Southwest => "Southwest",
			Self::Northeast => "Northeast",
			Self::Northwest => "Northwest",
		}
	}

	/// Converts a BYOND direction flag to `Dir`
	pub fn from_u8(value: u8) -> Option<Self> {
		DIR_ORDER.into_iter().find(|dir| *dir as u8 == value)
	}

	/// Converts `Dir` to its BYOND direction flag
	pub fn to_u8(self) -> u8 {
		self as u8
	}
}

impl fmt::Display for Dir {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Number of directions a state is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
#[repr(u32)]
pub enum DirCount {
	/// Non-directional
	#[default]
	One = 1,
	/// Cardinal directions
	Four = 4,
	/// Cardinal and diagonal directions
	Eight = 8,
}

impl DirCount {
	/// Converts a raw count to `DirCount`
	pub fn from_u32(value: u32) -> Option<Self> {
		match value {
			1 => Some(Self::One),
			4 => Some(Self::Four),
			8 => Some(Self::Eight),
			_ => None,
		}
	}

	/// Converts `DirCount` to u32
	pub fn to_u32(self) -> u32 {
		self as u32
	}

	/// Converts `DirCount` to usize
	pub fn to_usize(self) -> usize {
		self as usize
	}

	/// Directions covered by this count, in storage order.
	pub fn dirs(self) -> &'static [Dir] {
		&DIR_ORDER[..self.to_usize()]
	}

	/// Storage slot of `dir`, falling back to slot 0 (South) when the
	/// direction is not drawn.
	pub fn slot(self, dir: Dir) -> usize {
		let slot = dir.order_index();
		if slot >= self.to_usize() { 0 } else { slot }
	}
}

impl fmt::Display for DirCount {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.to_u32())
	}
}

impl TryFrom<u32> for DirCount {
	type Error = u32;

	fn try_from(value: u32) -> Result<Self, Self::Error> {
		Self::from_u32(value).ok_or(value)
	}
}

impl From<DirCount> for u32 {
	fn from(dirs: DirCount) -> Self {
		dirs.to_u32()
	}
}

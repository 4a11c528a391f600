//! JSON projection of a sheet.
//!
//! The model string carries a live [`Dmi`] to a detached consumer, for example
//! across a process boundary. Frames travel as PNG data URLs so the sheet is
//! rebuilt bit for bit. It is not the on-disk format.

use serde::{Deserialize, Serialize};

use super::{
	Dmi,
	dir::DirCount,
	frame::Frame,
	state::{Hotspot, State},
};
use crate::file::DmiError;

#[derive(Debug, Serialize, Deserialize)]
struct SheetModel {
	width: u32,
	height: u32,
	states: Vec<StateModel>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StateModel {
	name: String,
	#[serde(rename = "loop")]
	loop_count: u32,
	rewind: bool,
	movement: bool,
	dirs: DirCount,
	frames_encoded: Vec<String>,
	delays: Vec<f64>,
	hotspots: Option<Vec<Option<Hotspot>>>,
}

impl StateModel {
	fn from_state(state: &State) -> Result<Self, DmiError> {
		Ok(Self {
			name: state.name().to_owned(),
			loop_count: state.loop_count(),
			rewind: state.rewind(),
			movement: state.movement(),
			dirs: state.dirs(),
			frames_encoded: state.frames().iter().map(Frame::to_data_url).collect::<Result<_, _>>()?,
			delays: state.delays().to_vec(),
			hotspots: state.hotspots().map(<[_]>::to_vec),
		})
	}

	fn into_state(self, width: u32, height: u32) -> Result<State, DmiError> {
		let frames = self
			.frames_encoded
			.iter()
			.map(|url| Frame::from_data_url(url))
			.collect::<Result<Vec<_>, _>>()?;

		let mut state = State::from_frames(self.name, self.dirs, width, height, frames)?;
		state.set_loop_count(self.loop_count);
		state.set_rewind(self.rewind);
		state.set_movement(self.movement);
		state.set_attributes_unchecked(self.dirs, self.delays, self.hotspots);
		Ok(state)
	}
}

pub(super) fn to_model_string(dmi: &Dmi) -> Result<String, DmiError> {
	let model = SheetModel {
		width: dmi.width(),
		height: dmi.height(),
		states: dmi.states().iter().map(StateModel::from_state).collect::<Result<_, _>>()?,
	};
	Ok(serde_json::to_string(&model)?)
}

pub(super) fn from_model_string(data: &str) -> Result<Dmi, DmiError> {
	let model: SheetModel = serde_json::from_str(data)?;
	let mut dmi = Dmi::new(model.width, model.height);
	for state in model.states {
		dmi.push_state(state.into_state(model.width, model.height)?)?;
	}
	Ok(dmi)
}

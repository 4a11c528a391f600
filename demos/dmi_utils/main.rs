//! DMI CLI Utility
//!
//! A command-line tool for inspecting, unpacking and verifying DMI sprite sheets.
//!
//! # Features
//!
//! - **info**: Display the sheet geometry and every icon state
//! - **unpack**: Write one composite PNG per state plus a JSON summary
//! - **preview**: Write the animated preview of one state facing one direction
//! - **verify**: Check that decoding and re-encoding reproduces the sheet
//! - **from-png**: Wrap a plain PNG as a single state DMI file
//!
//! # Summary Format
//!
//! `unpack` writes `sheet.json` next to the composites:
//! ```json
//! {
//!   "width": 32,
//!   "height": 32,
//!   "states": [
//!     {
//!       "index": 0,
//!       "name": "walk",
//!       "dirs": 4,
//!       "frames": 3,
//!       "delays": [1.0, 2.0, 1.0],
//!       "composite_filename": "000_walk.png"
//!     }
//!   ]
//! }
//! ```
//!
//! # Usage
//!
//! ```bash
//! # Show DMI file information
//! cargo run --example dmi_utils -- info mob.dmi
//!
//! # Unpack every state to composite strips
//! cargo run --example dmi_utils -- unpack mob.dmi -o mob_states/
//!
//! # Render the east facing preview of state 2
//! cargo run --example dmi_utils -- preview mob.dmi 2 --dir east
//!
//! # Verify encoder/decoder round trip, rejecting sloppy metadata
//! cargo run --example dmi_utils -- verify mob.dmi --strict
//!
//! # Convert a PNG to a DMI file
//! cargo run --example dmi_utils -- from-png icon.png icon.dmi
//! ```

use std::{
	fs,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dmi_rs::prelude::*;
use log::{debug, info, warn};
use serde::Serialize;

fn main() -> Result<()> {
	// Initialize logger with default level set to info if RUST_LOG is not set
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Command::Info(opts) => run_info(opts),
		Command::Unpack(opts) => run_unpack(opts),
		Command::Preview(opts) => run_preview(opts),
		Command::Verify(opts) => run_verify(opts),
		Command::FromPng(opts) => run_from_png(opts),
	}
}

#[derive(Parser)]
#[command(name = "dmi_utils")]
#[command(author = "dmi-rs project")]
#[command(version)]
#[command(about = "DMI sprite sheet utility - inspect, unpack, preview and verify DMI files", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Display information about a DMI file
	Info(InfoArgs),
	/// Unpack every state to a composite PNG
	Unpack(UnpackArgs),
	/// Write the animated preview of one state
	Preview(PreviewArgs),
	/// Verify DMI encoder/decoder round-trip accuracy
	Verify(VerifyArgs),
	/// Wrap a plain PNG as a DMI file
	FromPng(FromPngArgs),
}

#[derive(Args)]
struct InfoArgs {
	/// Input DMI file path
	#[arg(value_name = "INPUT_DMI")]
	input: PathBuf,

	/// Print the raw metadata block
	#[arg(short, long, default_value_t = false)]
	metadata: bool,
}

#[derive(Args)]
struct UnpackArgs {
	/// Input DMI file path
	#[arg(value_name = "INPUT_DMI")]
	input: PathBuf,

	/// Output directory path (optional, defaults to `input_states/`)
	#[arg(short, long, value_name = "OUTPUT_DIR")]
	output: Option<PathBuf>,
}

#[derive(Args)]
struct PreviewArgs {
	/// Input DMI file path
	#[arg(value_name = "INPUT_DMI")]
	input: PathBuf,

	/// State index (0-based)
	#[arg(value_name = "STATE_INDEX")]
	state: usize,

	/// Direction to render
	#[arg(short, long, value_enum, default_value_t = DirArg::South)]
	dir: DirArg,

	/// Output PNG path (optional, defaults to `input_<STATE>_<DIR>.png`)
	#[arg(short, long, value_name = "OUTPUT")]
	output: Option<PathBuf>,
}

#[derive(Args)]
struct VerifyArgs {
	/// Input DMI file path to verify
	#[arg(value_name = "INPUT_DMI")]
	input: PathBuf,

	/// Reject plain PNGs and mismatched delay lists
	#[arg(short, long, default_value_t = false)]
	strict: bool,
}

#[derive(Args)]
struct FromPngArgs {
	/// Input PNG file path
	#[arg(value_name = "INPUT_PNG")]
	input: PathBuf,

	/// Output DMI file path
	#[arg(value_name = "OUTPUT_DMI")]
	output: PathBuf,

	/// Name of the created state
	#[arg(short, long, default_value = "")]
	name: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum DirArg {
	South,
	North,
	East,
	West,
	Southeast,
	Southwest,
	Northeast,
	Northwest,
}

impl From<DirArg> for Dir {
	fn from(value: DirArg) -> Self {
		match value {
			DirArg::South => Dir::South,
			DirArg::North => Dir::North,
			DirArg::East => Dir::East,
			DirArg::West => Dir::West,
			DirArg::Southeast => Dir::Southeast,
			DirArg::Southwest => Dir::Southwest,
			DirArg::Northeast => Dir::Northeast,
			DirArg::Northwest => Dir::Northwest,
		}
	}
}

/// State summary for JSON serialization
#[derive(Debug, Serialize)]
struct StateSummary {
	/// State index
	index: usize,
	/// State name
	name: String,
	/// Direction count
	dirs: u32,
	/// Logical frame count
	frames: usize,
	/// Explicit delays in ticks
	delays: Vec<f64>,
	/// Composite PNG filename
	composite_filename: String,
}

/// Sheet summary written by `unpack`
#[derive(Debug, Serialize)]
struct SheetSummary {
	/// Frame width in pixels
	width: u32,
	/// Frame height in pixels
	height: u32,
	/// List of state summaries
	states: Vec<StateSummary>,
}

fn load_dmi(path: &Path, config: &ParseConfig) -> Result<DmiFile> {
	let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
	let dmi = DmiFile::from_bytes_with_config(&data, config)
		.with_context(|| format!("Failed to parse {}", path.display()))?;
	debug!("Loaded {}: {}", path.display(), dmi);
	Ok(dmi)
}

/// Keeps file names portable, state names may contain anything.
fn sanitize(name: &str) -> String {
	let cleaned: String = name
		.chars()
		.map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
		.collect();
	if cleaned.is_empty() { "unnamed".to_owned() } else { cleaned }
}

fn run_info(args: InfoArgs) -> Result<()> {
	let dmi = load_dmi(&args.input, &ParseConfig::default())?;

	println!("{}", args.input.display());
	println!("  {dmi}");
	for (index, state) in dmi.states().iter().enumerate() {
		println!("  [{index:3}] {state}");
		if !state.delays().is_empty() {
			let delays: Vec<String> = state.delays().iter().map(f64::to_string).collect();
			println!("        delays: {}", delays.join(", "));
		}
		if let Some(hotspots) = state.hotspots() {
			let hotspots: Vec<String> = hotspots
				.iter()
				.map(|h| h.map_or_else(|| "-".to_owned(), |h| h.to_string()))
				.collect();
			println!("        hotspots: {}", hotspots.join(" "));
		}
	}

	if args.metadata {
		println!();
		print!("{}", dmi.metadata());
	}
	Ok(())
}

fn run_unpack(args: UnpackArgs) -> Result<()> {
	let dmi = load_dmi(&args.input, &ParseConfig::default())?;

	let output_dir = args.output.unwrap_or_else(|| {
		let stem = args
			.input
			.file_stem()
			.map_or_else(|| "dmi".into(), |s| s.to_string_lossy().into_owned());
		args.input.with_file_name(format!("{stem}_states"))
	});
	fs::create_dir_all(&output_dir)
		.with_context(|| format!("Failed to create {}", output_dir.display()))?;

	let mut summary = SheetSummary {
		width: dmi.width(),
		height: dmi.height(),
		states: Vec::with_capacity(dmi.states().len()),
	};

	for (index, state) in dmi.states().iter().enumerate() {
		let filename = format!("{index:03}_{}.png", sanitize(state.name()));
		let path = output_dir.join(&filename);
		state
			.build_composite()
			.save(&path)
			.with_context(|| format!("Failed to write {}", path.display()))?;
		info!("Wrote {} ({state})", path.display());

		summary.states.push(StateSummary {
			index,
			name: state.name().to_owned(),
			dirs: state.dirs().to_u32(),
			frames: state.frame_count(),
			delays: state.delays().to_vec(),
			composite_filename: filename,
		});
	}

	let json_path = output_dir.join("sheet.json");
	fs::write(&json_path, serde_json::to_string_pretty(&summary)?)
		.with_context(|| format!("Failed to write {}", json_path.display()))?;
	info!("Unpacked {} states to {}", summary.states.len(), output_dir.display());
	Ok(())
}

fn run_preview(args: PreviewArgs) -> Result<()> {
	let mut dmi = load_dmi(&args.input, &ParseConfig::default())?;
	let state_count = dmi.states().len();
	let Some(mut state) = dmi.state_mut(args.state) else {
		bail!("State index {} out of range (sheet has {} states)", args.state, state_count);
	};

	let dir = Dir::from(args.dir);
	let output = args.output.unwrap_or_else(|| {
		let stem = args
			.input
			.file_stem()
			.map_or_else(|| "dmi".into(), |s| s.to_string_lossy().into_owned());
		args.input
			.with_file_name(format!("{stem}_{}_{}.png", args.state, dir.name().to_lowercase()))
	});

	let encoded = state.preview(dir)?;
	fs::write(&output, encoded).with_context(|| format!("Failed to write {}", output.display()))?;
	info!("Wrote {} preview of \"{}\" to {}", dir, state.name(), output.display());
	Ok(())
}

fn run_verify(args: VerifyArgs) -> Result<()> {
	let config = if args.strict { ParseConfig::strict() } else { ParseConfig::lenient() };
	let original = load_dmi(&args.input, &config)?;

	let encoded = original.to_bytes()?;
	let decoded = DmiFile::from_bytes_with_config(&encoded, &config)?;

	if decoded != original {
		for (index, (a, b)) in original.states().iter().zip(decoded.states()).enumerate() {
			if a != b {
				warn!("State {index} differs after round trip: {a} / {b}");
			}
		}
		bail!("Round trip of {} does not reproduce the sheet", args.input.display());
	}

	let reencoded = decoded.to_bytes()?;
	if reencoded != encoded {
		bail!("Encoding is not deterministic for {}", args.input.display());
	}
	if !decoded.is_same(&original) {
		bail!("Model strings differ for {}", args.input.display());
	}

	info!(
		"{}: {} states, {} frames verified ({} bytes re-encoded)",
		args.input.display(),
		decoded.states().len(),
		decoded.frame_count(),
		encoded.len()
	);
	Ok(())
}

fn run_from_png(args: FromPngArgs) -> Result<()> {
	let image = image::open(&args.input)
		.with_context(|| format!("Failed to open {}", args.input.display()))?
		.to_rgba8();

	let mut dmi = DmiFile::from_image(image);
	if let Some(mut state) = dmi.state_mut(0) {
		state.set_name(args.name);
	}

	let data = dmi.to_bytes()?;
	fs::write(&args.output, &data).with_context(|| format!("Failed to write {}", args.output.display()))?;
	info!("Wrote {} ({dmi}, {} bytes)", args.output.display(), data.len());
	Ok(())
}

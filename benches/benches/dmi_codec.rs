//! Benchmark suite for the DMI codec
//!
//! This benchmark measures sheet encoding and decoding along with the grid
//! and metadata stages they are built from.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use dmi_benches::{generate_test_dmi, sizes};
use dmi_types::file::dmi::{Dmi, GridLayout, Metadata};
use std::hint::black_box;

const SHEETS: [(&str, ((u32, u32), usize, usize)); 3] =
	[("small", sizes::SMALL), ("medium", sizes::MEDIUM), ("large", sizes::LARGE)];

/// Benchmark full file decoding
fn bench_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("dmi_decode");

	for (name, (cell, states, frames)) in SHEETS {
		let dmi = generate_test_dmi(cell, states, frames);
		let data = match dmi.to_bytes() {
			Ok(d) => d,
			Err(e) => {
				eprintln!("Warning: Could not encode {name} sheet: {e}");
				continue;
			}
		};

		group.throughput(Throughput::Bytes(data.len() as u64));
		group.bench_with_input(BenchmarkId::new("from_bytes", name), &data, |b, data| {
			b.iter(|| {
				let result = Dmi::from_bytes(black_box(data));
				black_box(result)
			});
		});
	}

	group.finish();
}

/// Benchmark full file encoding
fn bench_encode(c: &mut Criterion) {
	let mut group = c.benchmark_group("dmi_encode");

	for (name, (cell, states, frames)) in SHEETS {
		let dmi = generate_test_dmi(cell, states, frames);
		group.throughput(Throughput::Elements(dmi.frame_count() as u64));
		group.bench_with_input(BenchmarkId::new("to_bytes", name), &dmi, |b, dmi| {
			b.iter(|| black_box(dmi).to_bytes());
		});
	}

	group.finish();
}

/// Benchmark grid packing and slicing without the PNG container
fn bench_grid(c: &mut Criterion) {
	let mut group = c.benchmark_group("dmi_grid");

	let (cell, states, frames) = sizes::MEDIUM;
	let dmi = generate_test_dmi(cell, states, frames);
	let raster = match dmi.to_raster() {
		Ok(r) => r,
		Err(e) => {
			eprintln!("Warning: Could not pack sheet: {e}");
			return;
		}
	};
	let count = dmi.frame_count();
	group.throughput(Throughput::Elements(count as u64));

	group.bench_function("pack", |b| {
		b.iter(|| black_box(&dmi).to_raster());
	});

	group.bench_function("slice", |b| {
		let layout = GridLayout::for_raster(raster.width(), raster.height(), cell.0, cell.1);
		b.iter(|| {
			for index in 0..count {
				black_box(layout.slice(black_box(&raster), index).ok());
			}
		});
	});

	group.finish();
}

/// Benchmark metadata text generation and parsing
fn bench_metadata(c: &mut Criterion) {
	let mut group = c.benchmark_group("dmi_metadata");

	let (cell, states, frames) = sizes::LARGE;
	let text = generate_test_dmi(cell, states, frames).metadata().to_string();

	group.throughput(Throughput::Bytes(text.len() as u64));
	group.bench_function("parse", |b| {
		b.iter(|| Metadata::parse(black_box(&text)));
	});

	let metadata = match Metadata::parse(&text) {
		Ok(m) => m,
		Err(e) => {
			eprintln!("Warning: Could not parse generated metadata: {e}");
			return;
		}
	};
	group.bench_function("generate", |b| {
		b.iter(|| black_box(&metadata).to_string());
	});

	group.finish();
}

criterion_group!(benches, bench_decode, bench_encode, bench_grid, bench_metadata);
criterion_main!(benches);

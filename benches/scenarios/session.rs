//! Benchmarks for preset sessions and full sweeps.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use lv2bm::{
    host::signal::ConstantSource, AxisKind, Bench, BenchConfig, ControlAxis, PluginHost,
};

/// Gain stage: cheapest possible plugin, so the runner's overhead dominates.
struct GainHost {
    axes: Vec<ControlAxis>,
    gain: f32,
    input: Vec<f32>,
    output: Vec<f32>,
}

impl GainHost {
    fn new(n_axes: usize) -> Self {
        let axes = (0..n_axes)
            .map(|i| {
                let axis = ControlAxis::new(format!("c{i}"), 0.0, 1.0, 0.5);
                if i % 2 == 0 {
                    axis
                } else {
                    axis.with_kind(AxisKind::Toggle { integer: false })
                }
            })
            .collect();
        Self {
            axes,
            gain: 1.0,
            input: Vec::new(),
            output: Vec::new(),
        }
    }
}

impl PluginHost for GainHost {
    fn uri(&self) -> &str {
        "urn:bench:gain"
    }

    fn control_axes(&self) -> &[ControlAxis] {
        &self.axes
    }

    fn set_axis_value(&mut self, index: usize, value: f32) {
        if index == 0 {
            self.gain = value;
        }
    }

    fn connect_input(&mut self, samples: &[f32]) {
        self.input = samples.to_vec();
        self.output = vec![0.0; samples.len()];
    }

    fn run(&mut self, frame_size: usize) {
        for (out, &s) in self.output[..frame_size].iter_mut().zip(&self.input) {
            *out = s * self.gain;
        }
        black_box(&self.output);
    }
}

pub fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/session");

    // Presets only
    for &frame_size in &[64u32, 256, 1024] {
        let config = BenchConfig::new().frame_size(frame_size).n_frames(16);
        group.bench_with_input(
            BenchmarkId::new("presets", frame_size),
            &frame_size,
            |b, _| {
                b.iter(|| {
                    let mut bench = Bench::new(GainHost::new(4), config.clone()).unwrap();
                    black_box(bench.process(&mut ConstantSource::default()))
                })
            },
        );
    }

    // Full sweep: grid size grows as 4 * 2 * 4 * 2 ...
    for &n_axes in &[1usize, 2, 3, 4] {
        let config = BenchConfig::new().frame_size(64).n_frames(4).full_test(true);
        group.bench_with_input(BenchmarkId::new("full_sweep", n_axes), &n_axes, |b, &n| {
            b.iter(|| {
                let mut bench = Bench::new(GainHost::new(n), config.clone()).unwrap();
                black_box(bench.process(&mut ConstantSource::default()))
            })
        });
    }

    group.finish();
}

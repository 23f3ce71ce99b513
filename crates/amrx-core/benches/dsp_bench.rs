//! Benchmarks for the AM receiver DSP chain
//!
//! Run with: cargo bench -p amrx-core --bench dsp_bench

use amrx_core::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const SAMPLE_RATE: f64 = 2_250_000.0;
const CARRIER: f64 = 225_000.0;
const CHUNK: usize = 64;
const NUM_SAMPLES: usize = 8_192;

fn stimulus() -> Vec<Sample> {
    AmSource::new(SAMPLE_RATE, CARRIER, 1_099.0)
        .unwrap()
        .with_modulation(0.3, 0.02, 0.5)
        .generate(NUM_SAMPLES)
        .to_u12()
        .iter()
        .map(|&v| v as f64)
        .collect()
}

fn bench_lut_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("lut_build");

    group.bench_function("chunk_aligned_64", |b| {
        b.iter(|| QuadratureLut::chunk_aligned(black_box(SAMPLE_RATE), black_box(CARRIER), CHUNK))
    });

    group.bench_function("best_fit_1024", |b| {
        b.iter(|| BestFitLut::build(black_box(40_179.0), black_box(8_766.3), 1024))
    });

    group.finish();
}

fn bench_mixers(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixers");
    group.throughput(Throughput::Elements(NUM_SAMPLES as u64));

    let samples = stimulus();
    let lut = QuadratureLut::chunk_aligned(SAMPLE_RATE, CARRIER, CHUNK).unwrap();

    group.bench_function("chunked_8192", |b| {
        b.iter(|| {
            let mut mixer = ChunkedMixer::new(lut.clone());
            mixer.process(black_box(&samples))
        })
    });

    let af_lut = BestFitLut::build(40_179.0, 8_766.3, 1024).unwrap();
    group.bench_function("single_tap_8192", |b| {
        b.iter(|| {
            let mut mixer = SingleTapMixer::new(af_lut.clone());
            mixer.process(black_box(&samples))
        })
    });

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope_filter");
    group.throughput(Throughput::Elements(NUM_SAMPLES as u64));

    let samples = stimulus();
    group.bench_function("smooth_8192", |b| {
        b.iter(|| {
            let mut filter = EnvelopeFilter::default();
            filter.process(black_box(&samples))
        })
    });

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Elements(NUM_SAMPLES as u64));

    let config = ReceiverConfig {
        num_samples: NUM_SAMPLES,
        dpsk_period: None,
        ..Default::default()
    };
    let wave = AmSource::new(config.sample_rate, config.carrier_freq, config.modulating_freq)
        .unwrap()
        .with_modulation(config.modulation_depth, config.amplitude, config.dc_offset)
        .generate(NUM_SAMPLES);
    let receiver = AmReceiver::new(config).unwrap();

    group.bench_function("demodulate_8192", |b| {
        b.iter(|| receiver.demodulate_waveform(black_box(&wave)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_lut_build,
    bench_mixers,
    bench_filter,
    bench_full_pipeline
);
criterion_main!(benches);

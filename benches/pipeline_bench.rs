//! Performance benchmarks for the conversion pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stratum_pcm::emit::{render, OutputFormat};
use stratum_pcm::{convert_waveform, PipelineConfig, QuantizePolicy, Waveform};

fn sine(sample_rate: u32, seconds: usize) -> Waveform {
    let samples = (0..sample_rate as usize * seconds)
        .map(|i| (i as f64 * 440.0 * 2.0 * std::f64::consts::PI / sample_rate as f64).sin() * 0.5)
        .collect();
    Waveform::new(sample_rate, samples)
}

fn bench_convert_waveform(c: &mut Criterion) {
    // 10 seconds at 44.1kHz, resampled to 22.05kHz
    let waveform = sine(44100, 10);
    let symmetric = PipelineConfig {
        target_sample_rate: Some(22050),
        ..Default::default()
    };
    let minmax = PipelineConfig {
        target_sample_rate: Some(22050),
        bit_depth: 12,
        policy: QuantizePolicy::MinMax,
        ..Default::default()
    };

    c.bench_function("convert_waveform_10s_symmetric", |b| {
        b.iter(|| convert_waveform(black_box(waveform.clone()), black_box(&symmetric)));
    });
    c.bench_function("convert_waveform_10s_minmax", |b| {
        b.iter(|| convert_waveform(black_box(waveform.clone()), black_box(&minmax)));
    });
}

fn bench_render_header(c: &mut Criterion) {
    let quantized = convert_waveform(sine(22050, 4), &PipelineConfig::default())
        .expect("benchmark input converts");
    let meta = quantized.metadata("bench_audio");

    c.bench_function("render_header_4s", |b| {
        b.iter(|| render(black_box(&quantized.samples), black_box(&meta), OutputFormat::Header));
    });
    c.bench_function("render_hex_4s", |b| {
        b.iter(|| render(black_box(&quantized.samples), black_box(&meta), OutputFormat::Hex));
    });
}

criterion_group!(benches, bench_convert_waveform, bench_render_header);
criterion_main!(benches);

//! Benchmarks for the SSG half-cycle hot path
//!
//! Run with: cargo bench --bench clock -p ssg

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use ssg::{GateSsg, Phase, SampleSsg, SsgBackend};

/// Typical music frame (R0-R15)
const FRAME_REGS: [u8; 16] = [
    0x10, 0x01, // R0-R1: Tone A period
    0x20, 0x02, // R2-R3: Tone B period
    0x30, 0x03, // R4-R5: Tone C period
    0x10, // R6: Noise period
    0x38, // R7: Mode (all tones)
    0x0F, // R8: Level A
    0x0C, // R9: Level B
    0x10, // R10: Level C (envelope)
    0x00, 0x10, // R11-R12: Envelope period
    0x0E, // R13: Envelope shape (triangle)
    0x00, 0x00, // R14-R15: I/O ports
];

fn bench_half_cycles<B: SsgBackend>(c: &mut Criterion, name: &str, mut chip: B) {
    let mut group = c.benchmark_group(name);

    chip.load_registers(&FRAME_REGS);
    chip.run_cycles(FRAME_REGS.len());

    for cycles in [1_000usize, 10_000, 100_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(cycles), cycles, |b, &cycles| {
            b.iter(|| {
                for _ in 0..cycles {
                    chip.clock(Phase::Zero);
                    chip.clock(Phase::One);
                    black_box(chip.analog_output());
                }
            });
        });
    }

    group.finish();
}

fn bench_gate_clock(c: &mut Criterion) {
    bench_half_cycles(c, "gate_clock", GateSsg::new());
}

fn bench_sample_clock(c: &mut Criterion) {
    bench_half_cycles(c, "sample_clock", SampleSsg::new());
}

fn bench_register_frame(c: &mut Criterion) {
    let mut chip = GateSsg::new();

    // One 50 Hz frame at a 2 MHz master clock divided by 8
    c.bench_function("gate_frame_5000_cycles", |b| {
        b.iter(|| {
            chip.load_registers(black_box(&FRAME_REGS));
            for _ in 0..5000 {
                chip.clock(Phase::Zero);
                chip.clock(Phase::One);
                black_box(chip.get_sample());
            }
        });
    });
}

fn bench_noise_three_channels(c: &mut Criterion) {
    let mut chip = GateSsg::new();
    chip.write_register(6, 0x01); // Fastest noise
    chip.write_register(7, 0x07); // Noise on A, B, C
    chip.write_register(8, 0x0F);
    chip.write_register(9, 0x0F);
    chip.write_register(10, 0x0F);
    chip.run_cycles(5);

    c.bench_function("gate_noise_three_channels", |b| {
        b.iter(|| {
            chip.run_cycles(1000);
            black_box(chip.analog_output());
        });
    });
}

criterion_group!(
    benches,
    bench_gate_clock,
    bench_sample_clock,
    bench_register_frame,
    bench_noise_three_channels
);
criterion_main!(benches);

// ============================================================================
// Multiprecision Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Integer - Multiplication and division across operand sizes
// 2. Rational - Canonicalizing arithmetic
// 3. Floats - FixedFloat vs RoundedFloat at equal precision
// 4. Copy-on-Write - Clone cost and first-mutation detach cost
// 5. Formatting - Radix output and parsing
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use multiprecision::prelude::*;
use std::hint::black_box;

fn operand(bits: u64, seed: u64) -> Integer {
    FastRandom::from_u64(seed).integer_bits(bits)
}

// ============================================================================
// Integer Benchmarks
// ============================================================================

fn benchmark_integer_arith(c: &mut Criterion) {
    let mut group = c.benchmark_group("integer_arith");

    for bits in [64u64, 1024, 16384].iter() {
        let a = operand(*bits, 1);
        let b = operand(*bits / 2, 2).add_i64(1);

        group.bench_with_input(BenchmarkId::new("mul", bits), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(a.mul(b)));
        });

        group.bench_with_input(BenchmarkId::new("div_rem", bits), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(a.div_rem(b)));
        });
    }

    group.finish();
}

// ============================================================================
// Rational Benchmarks
// ============================================================================

fn benchmark_rational_arith(c: &mut Criterion) {
    let x = Rational::from_parts(&operand(256, 3), &operand(256, 4).add_i64(1)).unwrap();
    let y = Rational::from_parts(&operand(256, 5), &operand(256, 6).add_i64(1)).unwrap();

    c.bench_function("rational_add_256", |b| {
        b.iter(|| black_box(x.add(&y)));
    });

    c.bench_function("rational_mul_256", |b| {
        b.iter(|| black_box(x.mul(&y)));
    });
}

// ============================================================================
// Float Benchmarks
// Same precision, truncating engine vs correctly rounded engine
// ============================================================================

fn benchmark_float_families(c: &mut Criterion) {
    let mut group = c.benchmark_group("float_sqrt");

    for bits in [64i64, 256, 4096].iter() {
        let precision = Precision::new(*bits).unwrap();
        let fixed = FixedFloat::from_i64(2, precision);
        let rounded = RoundedFloat::from_i64(2, precision, RoundingMode::Nearest).value;

        group.bench_with_input(BenchmarkId::new("FixedFloat", bits), &fixed, |b, x| {
            b.iter(|| black_box(x.sqrt()));
        });

        group.bench_with_input(BenchmarkId::new("RoundedFloat", bits), &rounded, |b, x| {
            b.iter(|| black_box(x.sqrt(RoundingMode::Nearest)));
        });
    }

    group.finish();

    let x = RoundedFloat::from_f64(0.75, Precision::QUAD, RoundingMode::Nearest).value;
    c.bench_function("rounded_exp_strict_113", |b| {
        b.iter(|| black_box(x.exp(RoundingMode::Nearest)));
    });
}

// ============================================================================
// Copy-on-Write Benchmarks
// ============================================================================

fn benchmark_copy_on_write(c: &mut Criterion) {
    let big = operand(65536, 7);

    c.bench_function("cow_clone_shared", |b| {
        b.iter(|| black_box(big.clone()));
    });

    c.bench_function("cow_first_mutation", |b| {
        b.iter(|| {
            let mut copy = big.clone();
            copy.assign_add_i64(1);
            black_box(copy)
        });
    });
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn benchmark_formatting(c: &mut Criterion) {
    let value = operand(4096, 8);
    let text = value.to_string();

    c.bench_function("integer_to_string_4096", |b| {
        b.iter(|| black_box(value.to_string_radix(Radix::DECIMAL)));
    });

    c.bench_function("integer_parse_4096", |b| {
        b.iter(|| black_box(Integer::parse(&text, 10)));
    });
}

criterion_group!(
    benches,
    benchmark_integer_arith,
    benchmark_rational_arith,
    benchmark_float_families,
    benchmark_copy_on_write,
    benchmark_formatting,
);
criterion_main!(benches);

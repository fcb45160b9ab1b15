//! Raw check-character algorithms.

use std::hint::black_box;

use credkit_core::{
    credit_code_check_digit, mrz_check_digit, organization_code_check_digit,
    resident_id_check_digit,
};
use criterion::{Criterion, criterion_group, criterion_main};

fn bench_check_digits(c: &mut Criterion) {
    let mut group = c.benchmark_group("check_digits");
    group.bench_function("resident_id", |b| {
        b.iter(|| resident_id_check_digit(black_box("33010519781027002")));
    });
    group.bench_function("credit_code", |b| {
        b.iter(|| credit_code_check_digit(black_box("91330106MA27Y4U47")));
    });
    group.bench_function("organization_code", |b| {
        b.iter(|| organization_code_check_digit(black_box("MA27Y4U4")));
    });
    group.bench_function("mrz_personal_number", |b| {
        b.iter(|| mrz_check_digit(black_box("19203301<<<<<<")));
    });
    group.finish();
}

criterion_group!(benches, bench_check_digits);
criterion_main!(benches);

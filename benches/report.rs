//! Benchmarks for table parsing and chart construction.
//!
//! Run with: `cargo bench --bench report`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use polybench_report::{
    ChartKind, ChartSettings, Dataset, build_chart, default_styles, parse_table, sanitize,
};

const NAMES: [&str; 6] = [
    "PolyMath F32",
    "PolyMath F64",
    "Boost F32",
    "Boost F64",
    "Clipper",
    "Geos",
];

/// Grid sizes used by the benchmark driver.
const GRID_SIZES: [u32; 20] = [
    1, 2, 3, 5, 7, 10, 15, 22, 33, 47, 68, 100, 150, 220, 330, 470, 680, 1000, 1500, 2200,
];

/// Result text in the driver's format, repeating the size sweep `repeats` times.
fn synthetic_result(repeats: usize) -> String {
    let mut text =
        String::from("Test Vertices PolyMath-F32 PolyMath-F64 Boost-F32 Boost-F64 Clipper Geos\n\n\n");
    let mut test = 0;
    for _ in 0..repeats {
        for &n in &GRID_SIZES {
            test += 1;
            let vertices = 4.0 * (n as f64) * (n as f64);
            text.push_str(&format!("{} {}", test, vertices));
            for k in 0..NAMES.len() {
                // Slowest competitors stop being measured at large sizes
                let elapsed = if k == 5 && n > 680 {
                    0.0
                } else {
                    1e-8 * (k + 1) as f64 * vertices * vertices.ln()
                };
                text.push_str(&format!(" {:e}", elapsed));
            }
            text.push('\n');
        }
    }
    text.push_str("Done.\n");
    text
}

fn bench_parse_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_table");

    for repeats in [1, 10, 100] {
        let text = synthetic_result(repeats);
        group.bench_with_input(
            BenchmarkId::new("rows", repeats * GRID_SIZES.len()),
            &text,
            |b, text| {
                b.iter(|| parse_table("bench.txt", text, 3));
            },
        );
    }

    group.finish();
}

fn bench_build_charts(c: &mut Criterion) {
    let styles = default_styles();
    let settings = ChartSettings::default();

    let mut group = c.benchmark_group("build_chart");

    for runs in [1, 3] {
        let table = parse_table("bench.txt", &synthetic_result(10), 3).unwrap();
        let dataset = sanitize(&Dataset::new(vec![table; runs]));

        group.bench_with_input(BenchmarkId::new("absolute", runs), &dataset, |b, ds| {
            b.iter(|| build_chart(ChartKind::AbsoluteTime, ds, &NAMES, &styles, &settings));
        });
        group.bench_with_input(BenchmarkId::new("normalized", runs), &dataset, |b, ds| {
            b.iter(|| build_chart(ChartKind::NormalizedTime, ds, &NAMES, &styles, &settings));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_table, bench_build_charts);
criterion_main!(benches);

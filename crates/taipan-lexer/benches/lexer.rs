//! Benchmarks for the Taipan scanner.
//!
//! This module contains benchmarks for scanner performance:
//! - Plain imperative code
//! - F-string heavy code
//! - View bodies with markup
//! - Scaling with increasing code size
//!
//! Run with: `cargo bench --package taipan-lexer`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use taipan_lexer::lexer::Scanner;
use taipan_source::types::FileID;

// Test data for benchmarks
const FIBONACCI: &str = r"
def fibonacci(n):
    if n <= 1:
        return n
    else:
        return fibonacci(n-1) + fibonacci(n-2)

result = fibonacci(10)
print(result)
";

const FSTRING_HEAVY: &str = r#"
def describe(user, score, width):
    header = f"== {user.name!r:>{width}} =="
    body = f"score {score:.2f} ({score / 100:%}) at {user.when}"
    footer = f"{{literal braces}} and {f"nested {score}"}"
    return f"{header}\n{body}\n{footer}"
"#;

const VIEW_BODY: &str = r#"
view ScoreCard(user, entries):
    <div class="card" data-kind="score">
        <h1>Scores for {user.name}</h1>
        <ul>
            <li>first: {entries[0]}</li>
            <li>last: {entries[-1]}</li>
        </ul>
        <img src={user.avatar} />
    </div>
"#;

fn scan(source: &str) -> usize {
    let result = Scanner::new(source.as_bytes(), FileID::new(0)).scan();
    result.tokens.len()
}

/// Benchmark scanning plain imperative code
fn bench_fibonacci(crit: &mut Criterion) {
    let _ = crit.bench_function("scan_fibonacci", |bencher| {
        bencher.iter(|| scan(black_box(FIBONACCI)));
    });
}

/// Benchmark scanning f-string heavy code
fn bench_fstrings(crit: &mut Criterion) {
    let _ = crit.bench_function("scan_fstrings", |bencher| {
        bencher.iter(|| scan(black_box(FSTRING_HEAVY)));
    });
}

/// Benchmark scanning a view body with markup
fn bench_view_body(crit: &mut Criterion) {
    let mut group = crit.benchmark_group("scan_view_body");
    let _ = group.throughput(Throughput::Bytes(VIEW_BODY.len() as u64));
    let _ = group.bench_function("view_body", |bencher| {
        bencher.iter(|| scan(black_box(VIEW_BODY)));
    });

    group.finish();
}

/// Benchmark scanning with varying code sizes
fn bench_scaling(crit: &mut Criterion) {
    let mut group = crit.benchmark_group("scan_scaling");

    for size in &[10, 50, 100, 500] {
        // Generate code with N simple functions
        let code = (0..*size).fold(String::new(), |acc, idx| {
            format!("{acc}\n\ndef func_{idx}(x):\n    return x * {idx}\n")
        });

        let _ = group.throughput(Throughput::Bytes(code.len() as u64));
        let _ =
            group.bench_with_input(BenchmarkId::from_parameter(size), &code, |bencher, code| {
                bencher.iter(|| scan(black_box(code)));
            });
    }

    group.finish();
}

criterion_group!(benches, bench_fibonacci, bench_fstrings, bench_view_body, bench_scaling);
criterion_main!(benches);

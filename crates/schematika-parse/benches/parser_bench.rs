//! Parser throughput benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use schematika_parse::parse_source;
use schematika_util::Handler;

fn parse(source: &str) {
    let mut handler = Handler::new();
    let _ = parse_source(source, &mut handler);
}

fn bench_parser_def(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_def");

    let source = "def pi : f64 = 3.14159265;";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("simple_def", |b| b.iter(|| parse(black_box(source))));

    group.finish();
}

fn bench_parser_lambda(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_lambda");

    let source = "def fib = lambda(n : i64) if n == 0 then 0 else n * fib(n - 1);";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("recursive_lambda", |b| b.iter(|| parse(black_box(source))));

    group.finish();
}

fn bench_parser_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_arithmetic");

    let source = "def x : f64 = 1 + 2 * 3 - 4 / 2 + 1.5;";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("mixed_precedence", |b| b.iter(|| parse(black_box(source))));

    group.finish();
}

fn bench_parser_nested_let1(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_let1");

    let source = "def r = { def a = 1; def b = a + 1; def c = b + 1; a + b + c };";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("nested_local_defs", |b| b.iter(|| parse(black_box(source))));

    group.finish();
}

fn bench_parser_program(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_program");

    let source = "def square = lambda(n : i64) n * n; \
                   def sum_of_squares = lambda(a : i64, b : i64) square(a) + square(b); \
                   def answer = sum_of_squares(3, 4);";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("multi_def_program", |b| b.iter(|| parse(black_box(source))));

    group.finish();
}

criterion_group!(
    benches,
    bench_parser_def,
    bench_parser_lambda,
    bench_parser_arithmetic,
    bench_parser_nested_let1,
    bench_parser_program
);
criterion_main!(benches);

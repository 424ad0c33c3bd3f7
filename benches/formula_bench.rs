use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use stat_formula::{CompiledFormula, Formula, parse};

// Benchmark parsing separately
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    group.bench_function("parse_simple_x+y*z", |b| {
        b.iter(|| parse(black_box("x + y * z")))
    });

    group.bench_function("parse_stat_base*(1+crit)-armor", |b| {
        b.iter(|| parse(black_box("base * (1 + crit) - armor")))
    });

    group.bench_function("parse_functions_clamp(lerp(a,b,t),0,100)", |b| {
        b.iter(|| parse(black_box("clamp(lerp(a, b, t), 0, 100)")))
    });

    group.bench_function("parse_constants_c0*level+c1", |b| {
        b.iter(|| parse(black_box("c0 * level + c1")))
    });

    group.finish();
}

// Benchmark compilation on pre-parsed trees
fn bench_compilation(c: &mut Criterion) {
    let mut group = c.benchmark_group("compilation");

    let simple = parse("x + y * z").unwrap();
    let stat = parse("base * (1 + crit) - armor").unwrap();
    let functions = parse("clamp(lerp(a, b, t), 0, 100)").unwrap();

    group.bench_function("compile_simple", |b| {
        b.iter(|| CompiledFormula::compile(black_box(&simple)))
    });

    group.bench_function("compile_stat", |b| {
        b.iter(|| CompiledFormula::compile(black_box(&stat)))
    });

    group.bench_function("compile_functions", |b| {
        b.iter(|| CompiledFormula::compile(black_box(&functions)))
    });

    group.finish();
}

// Benchmark evaluation of pre-compiled formulas (the per-frame hot path)
fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");

    let simple = CompiledFormula::compile(&parse("x + y * z").unwrap()).unwrap();
    let stat = CompiledFormula::compile(&parse("base * (1 + crit) - armor").unwrap()).unwrap();
    let functions =
        CompiledFormula::compile(&parse("clamp(lerp(a, b, t), 0, 100)").unwrap()).unwrap();
    let heavy =
        CompiledFormula::compile(&parse("sqrt(x^2 + y^2) * sin(a) + max(x, y, 1)").unwrap())
            .unwrap();

    group.bench_function("eval_simple", |b| {
        b.iter(|| simple.evaluate(black_box(&[1.0, 2.0, 3.0])))
    });

    group.bench_function("eval_stat", |b| {
        b.iter(|| stat.evaluate(black_box(&[40.0, 0.5, 12.0])))
    });

    group.bench_function("eval_functions", |b| {
        b.iter(|| functions.evaluate(black_box(&[0.0, 100.0, 0.5])))
    });

    group.bench_function("eval_heavy", |b| {
        b.iter(|| heavy.evaluate(black_box(&[3.0, 4.0, 0.7])))
    });

    group.finish();
}

// Full Formula lifecycle, as a host engine would drive it
fn bench_formula_api(c: &mut Criterion) {
    let mut group = c.benchmark_group("formula_api");

    group.bench_function("parse_and_evaluate", |b| {
        b.iter(|| {
            let mut formula = Formula::new(black_box("base * mult - armor"));
            formula.parse().unwrap();
            formula
                .evaluate_with(&[("base", 10.0), ("mult", 2.0), ("armor", 5.0)])
                .unwrap()
        })
    });

    let mut formula = Formula::new("base * mult - armor");
    formula.parse().unwrap();
    formula.set_parameter("base", 10.0).unwrap();
    formula.set_parameter("mult", 2.0).unwrap();
    formula.set_parameter("armor", 5.0).unwrap();

    group.bench_function("evaluate_cached", |b| {
        b.iter(|| black_box(&mut formula).evaluate().unwrap())
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parsing,
    bench_compilation,
    bench_evaluation,
    bench_formula_api,
);
criterion_main!(benches);

//! Emitter Benchmark
//!
//! Measures IR construction and rendering throughput (bytes/sec).

use cgen::ir::{Function, Int, SourceCode, generate};
use cgen::library::{VecRegistry, fib_unit, vec_demo};
use cgen::types::primitives;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

// =============================================================================
// Generated units
// =============================================================================

/// `functions` functions of `statements_per_fn` loop iterations each, plus a
/// few container instantiations.
fn build_large_unit(functions: usize, statements_per_fn: usize) -> SourceCode {
    let int32 = primitives::int32();
    let mut unit = SourceCode::new();

    let mut registry = VecRegistry::new();
    for element in [
        primitives::int32(),
        primitives::uint8(),
        cgen::types::Type::pointer(primitives::char()),
    ] {
        registry.instance(&element).expect("vec instantiation");
    }
    unit.add(&registry);

    for i in 0..functions {
        let mut f = Function::new(format!("func{i}")).with_return_type(int32.clone());
        let n = f.add_parameter(int32.clone(), Some("n"));
        let acc = f.declare(int32.clone(), Some("acc"));
        f.assign(&acc, Int::untyped(0)).expect("assign");
        f.loop_while((&acc, "<", &n), |f| {
            for s in 0..statements_per_fn {
                let tmp = f.declare(int32.clone(), Some("tmp"));
                let step = i64::try_from(s).unwrap_or_default();
                f.add((&tmp, "=", ((&acc, "*", Int::untyped(step)), "+", &n)))?;
                f.when((&tmp, ">", &n), |f| f.add((&acc, "=", (&acc, "+", 1))))?;
            }
            Ok(())
        })
        .expect("loop");
        f.ret(&acc).expect("return");
        unit.add(f);
    }
    unit
}

/// Benchmark: Build and emit the fib sample
fn bench_emit_fib(c: &mut Criterion) {
    c.bench_function("emit_fib", |b| {
        b.iter(|| {
            let unit = fib_unit(primitives::int()).expect("fib");
            black_box(generate(&unit))
        })
    });
}

/// Benchmark: Build and emit the container demo
fn bench_emit_vec_demo(c: &mut Criterion) {
    c.bench_function("emit_vec_demo", |b| {
        b.iter(|| {
            let unit = vec_demo(primitives::int32()).expect("vec demo");
            black_box(generate(&unit))
        })
    });
}

/// Benchmark: Emit throughput for various sizes
fn bench_emit_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("emitter_throughput");

    for (functions, statements) in [(10, 5), (20, 10), (50, 5), (100, 5)] {
        let unit = build_large_unit(functions, statements);
        let bytes = generate(&unit).len() as u64;
        let label = format!("{functions}fn_{statements}stmt");

        group.throughput(Throughput::Bytes(bytes));
        group.bench_with_input(BenchmarkId::new("emit", &label), &unit, |b, unit| {
            b.iter(|| black_box(generate(unit)))
        });
    }

    group.finish();
}

/// Benchmark: IR construction alone
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("ir_build");

    group.bench_function("build_50fn_10stmt", |b| {
        b.iter(|| black_box(build_large_unit(50, 10)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_emit_fib,
    bench_emit_vec_demo,
    bench_emit_throughput,
    bench_build
);
criterion_main!(benches);

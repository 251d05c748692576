use criterion::{criterion_main, BatchSize, BenchmarkId, Criterion};
use logo_lang_core::{Datum, PrintOptions};
use logo_lang_utils::{bench::Shape, datum_bench_group};

fn derivations(c: &mut Criterion) {
    let mut group = c.benchmark_group("lists");

    for size in [10, 1000] {
        let list = Shape::Flat.build(size);

        group.bench_with_input(BenchmarkId::new("butfirst", size), &size, |b, _| {
            b.iter(|| list.butfirst())
        });
        group.bench_with_input(BenchmarkId::new("butlast", size), &size, |b, _| {
            b.iter(|| list.butlast())
        });
        group.bench_with_input(BenchmarkId::new("last", size), &size, |b, _| {
            b.iter(|| list.last())
        });
        group.bench_with_input(BenchmarkId::new("fput", size), &size, |b, _| {
            b.iter(|| list.list().fput(Datum::from_text("head")))
        });
    }

    group.finish();
}

fn building(c: &mut Criterion) {
    c.bench_function("append 200", |b| {
        b.iter_batched(
            Datum::empty_list,
            |list| {
                for n in 0..200 {
                    list.list().append(Datum::from_number(n as f64));
                }
                list
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("list_from 10000", |b| {
        b.iter(|| Datum::list_from((0..10_000).map(|n| Datum::from_number(n as f64))))
    });
}

fn printing(c: &mut Criterion) {
    let flat = Shape::Flat.build(1000);
    let nested = Shape::Nested.build(200);

    c.bench_function("show flat 1000", |b| {
        b.iter(|| flat.show_value(PrintOptions::default()))
    });
    c.bench_function("show nested 200 depth 20", |b| {
        b.iter(|| nested.show_value(PrintOptions::default().with_depth_limit(20)))
    });
}

datum_bench_group! {
    name = benches;
    derivations,
    building,
    printing,
}

criterion_main!(benches);

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use cqlorm::{
    BoxError, Consistency, CqlSession, CqlValue, Extract, Order, Record, RowIter, Session, extract,
};
use std::future::Future;

#[derive(Debug, Default, Clone, Record)]
struct Reading {
    sensor_id: i64,
    bucket: i32,
    label: String,
    value: f64,
    note: Option<String>,
}

struct NoRows;

impl RowIter for NoRows {
    fn next_row(&mut self) -> impl Future<Output = Result<Option<Vec<CqlValue>>, BoxError>> + Send {
        async { Ok(None) }
    }

    fn row_count(&self) -> usize {
        0
    }

    fn close(self) -> impl Future<Output = Result<(), BoxError>> + Send {
        async { Ok(()) }
    }
}

/// Never executes anything; the benches only render.
struct Noop;

impl CqlSession for Noop {
    type Rows = NoRows;

    fn execute(
        &self,
        _cql: &str,
        _values: &[CqlValue],
        _consistency: Consistency,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        async { Ok(()) }
    }

    fn query(
        &self,
        _cql: &str,
        _values: &[CqlValue],
        _consistency: Consistency,
    ) -> impl Future<Output = Result<NoRows, BoxError>> + Send {
        async { Ok(NoRows) }
    }
}

fn reading() -> Reading {
    Reading {
        sensor_id: 7,
        bucket: 20240101,
        label: "boiler".into(),
        value: 71.5,
        note: None,
    }
}

fn bench_select_build(c: &mut Criterion) {
    let session = Session::new(Noop);
    let mut group = c.benchmark_group("cql_builder/select_build");

    for n in [1, 5, 10, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut qb = session.select().from::<Reading>();
                for i in 0..n {
                    qb = qb.gte("bucket", i as i32);
                }
                let built = qb.order_by("bucket", Order::Desc).limit(100).build();
                black_box(built.ok());
            });
        });
    }

    group.finish();
}

fn bench_record_predicates(c: &mut Criterion) {
    let session = Session::new(Noop);
    let record = reading();

    c.bench_function("cql_builder/filter_record", |b| {
        b.iter(|| black_box(session.select().filter(black_box(&record)).build().ok()));
    });
}

fn bench_insert_build(c: &mut Criterion) {
    let session = Session::new(Noop);
    let record = reading();

    c.bench_function("cql_builder/insert_build", |b| {
        b.iter(|| {
            black_box(
                session
                    .insert()
                    .values(black_box(&record))
                    .if_not_exists()
                    .build()
                    .ok(),
            )
        });
    });
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("cql_builder/extract");
    let record = reading();

    for (name, mode) in [("all", Extract::All), ("skip_zero", Extract::SkipZero)] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &mode, |b, &mode| {
            b.iter(|| black_box(extract(black_box(&record), mode).ok()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_select_build,
    bench_record_predicates,
    bench_insert_build,
    bench_extract
);
criterion_main!(benches);

use std::hint::black_box;

use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};
use telebill::CustomerIndex;

use crate::{record, Lfsr};

#[derive(Debug, Clone, Copy)]
struct BenchName {
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new("n_values", v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("get");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

/// Measure the time needed to look up an existing key in a tree of
/// `n_values` records.
fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let mut rand = Lfsr::default();
    let mut t = CustomerIndex::default();
    let mut phones = Vec::with_capacity(n_values);

    for _i in 0..n_values {
        let phone = rand.next_phone();
        t.insert(record(&phone)).unwrap();
        phones.push(phone);
    }

    let bench_name = BenchName { n_values };
    g.throughput(Throughput::Elements(1)); // Keys found per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        let mut i = 0;
        b.iter(|| {
            let phone = &phones[i % phones.len()];
            i += 1;
            black_box(t.get(phone))
        });
    });
}

//! Shared setup of the benchmarks.

use std::time::Duration;

use criterion::Criterion;
use logo_lang_core::Datum;

use crate::test_value::{nested, numbers};

/// The shapes of data the benchmarks run on.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Shape {
    /// A list of `size` numbers.
    Flat,
    /// `size` levels of nested lists.
    Nested,
    /// An array of `size` numbers.
    Array,
}

impl Shape {
    pub fn build(self, size: usize) -> Datum {
        match self {
            Shape::Flat => numbers((0..size).map(|n| n as f64)),
            Shape::Nested => nested("leaf", size),
            Shape::Array => Datum::array_from(1, (0..size).map(|n| Datum::from_number(n as f64))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Flat => "flat",
            Shape::Nested => "nested",
            Shape::Array => "array",
        }
    }
}

/// The criterion configuration shared by all benchmarks. The `benchmark-ci` feature of this
/// crate selects a shorter measurement.
pub fn criterion_config() -> Criterion {
    let config = Criterion::default();

    if cfg!(feature = "benchmark-ci") {
        config
            .warm_up_time(Duration::from_millis(500))
            .measurement_time(Duration::from_secs(2))
            .sample_size(20)
    } else {
        config
    }
}

/// Declares a benchmark group function named `$group_name` running each listed benchmark
/// function with the shared criterion configuration.
#[macro_export]
macro_rules! datum_bench_group {
    (name = $group_name:ident; $($bench:path),+ $(,)*) => {
        pub fn $group_name() {
            let mut c = $crate::bench::criterion_config().configure_from_args();
            $( $bench(&mut c); )+
        }
    }
}

//! Criterion benchmarks for the annealing solver.
//!
//! Measures solve time across route lengths (5, 10, 20 stops) with and
//! without start-stop optimisation.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package headway-solver-anneal
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use headway_core::{DispatchSolver, PenaltyWeights};
use headway_forecast::DemandCache;
use headway_scorer::CostFormula;
use headway_solver_anneal::AnnealSolver;


use bench_support::{
    BENCHMARK_SEED, build_request, generate_fleet, generate_forecast, generate_stops,
};

/// Route lengths to benchmark.
const ROUTE_LENGTHS: &[u32] = &[5, 10, 20];

/// Vehicles offered to every solve.
const FLEET_SIZE: u32 = 6;

fn bench_solve_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_time");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));

    let penalties = PenaltyWeights::default();
    let fleet = generate_fleet(FLEET_SIZE);

    for &length in ROUTE_LENGTHS {
        let stops = generate_stops(length);
        let table = generate_forecast(&stops, BENCHMARK_SEED);

        for optimise_start in [false, true] {
            let mut request = build_request(BENCHMARK_SEED);
            request.optimise_start = optimise_start;
            let label = if optimise_start { "optimised_start" } else { "fixed_start" };

            group.throughput(Throughput::Elements(u64::from(length)));
            group.bench_with_input(BenchmarkId::new(label, length), &length, |b, _| {
                b.iter(|| {
                    let mut cache = DemandCache::new();
                    let Ok(formula) = CostFormula::new(&stops, &table, &penalties, &mut cache)
                    else {
                        return;
                    };
                    #[expect(
                        clippy::let_underscore_must_use,
                        reason = "Benchmarking solve performance, result is intentionally discarded"
                    )]
                    let _ = AnnealSolver::new(formula).solve(&fleet, &request);
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_solve_times);
criterion_main!(benches);

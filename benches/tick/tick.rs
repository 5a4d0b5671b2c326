use criterion::{criterion_group, criterion_main, Criterion};
use quarantine_core::context::Context;
use quarantine_core::parameters::Parameters;
use quarantine_core::random::ContextRandomExt;
use quarantine_core::simulation::ContextSimulationExt;

static SEED: u64 = 123;
static TICKS: u64 = 100;

fn session_parameters() -> Parameters {
    Parameters {
        population: 10_000,
        police_share: 0.01,
        initially_infected: 100,
        initial_budget: 2_000_000.0,
        income: 30_000.0,
        basic_interaction_rate: 0.05,
        max_interaction_variance: 0.02,
        population_factor: 50,
    }
}

fn hundred_ticks() -> Context {
    let mut context = Context::new();

    context.init_random(SEED);
    context
        .init_simulation(session_parameters())
        .expect("failed to init session");

    context.run_ticks(TICKS);

    context
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("session hundred-ticks", |bencher| {
        bencher.iter_with_large_drop(hundred_ticks)
    });
}

criterion_group!(tick_benches, criterion_benchmark);
criterion_main!(tick_benches);

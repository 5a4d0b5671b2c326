use quarantine_core::prelude::*;

// Exact bookkeeping must hold at every observation point: state counts sum
// to the store size, privileged roles never exceed it, and every agent ever
// seeded is either still alive or tallied as deceased.
fn assert_session_consistent(context: &Context, seeded: usize) {
    let by_state: usize = HealthState::ALL
        .iter()
        .map(|state| context.count_in_state(*state))
        .sum();
    assert_eq!(by_state, context.population());
    assert!(context.police_count() + context.health_worker_count() <= context.population());
    assert_eq!(context.population() + context.deceased_total(), seeded);
    assert_eq!(context.count_in_state(HealthState::Deceased), 0);
}

#[test]
fn default_session_stays_consistent_over_a_year() {
    let parameters = Difficulty::Normal.parameters();
    let seeded = parameters.population;
    let mut context = Context::new();
    context.init_random(1234);
    context.init_simulation(parameters).unwrap();

    for _ in 0..365 {
        context.tick();
        assert_session_consistent(&context, seeded);
    }

    // Nothing in the base rules makes a hidden carrier visible, so the
    // displayed infection count stays at zero while the disease spreads
    // silently and nobody dies.
    assert_eq!(context.scaled_infected(), 0);
    assert!(context.count_in_state(HealthState::UnknowinglyInfected) >= 1_000);
    assert_eq!(context.population(), 32_400);
    assert_eq!(context.deceased_total(), 0);

    // Untouched budget is initial funds plus one income payment per tick
    assert_almost_eq!(context.budget(), 2_000_000.0 + 30_000.0 * 365.0, 1e-6);
    assert_eq!(context.get_current_tick(), 365);
}

#[test]
fn played_session_with_upgrades_reaches_immunity() {
    let mut parameters = Difficulty::Normal.parameters();
    parameters.population = 2_000;
    parameters.initially_infected = 200;
    parameters.basic_interaction_rate = 0.2;
    let seeded = parameters.population;

    let mut context = Context::new();
    context.init_random(99);
    context.init_simulation(parameters).unwrap();
    context.run_ticks(30);

    context.buy_police_officers(250_000.0, 20).unwrap();
    context.introduce_cure(1_000_000.0, 100).unwrap();
    assert_eq!(context.police_count(), 40);
    assert_eq!(context.health_worker_count(), 100);
    assert_eq!(context.rules().len(), 6);

    context.run_ticks(60);
    assert_session_consistent(&context, seeded);

    // The cure team has been at work, and no rule takes an agent out of the
    // cure-carrying state.
    assert!(context.count_in_state(HealthState::Immune) > 0);
    assert_eq!(context.count_in_state(HealthState::Cure), 100);
    assert_eq!(
        context.count_agents(|agent| agent.role() == Role::HealthWorker
            && agent.health_state() == HealthState::Cure),
        100
    );

    // 90 income payments, two purchases
    assert_almost_eq!(
        context.budget(),
        2_000_000.0 + 30_000.0 * 90.0 - 250_000.0 - 1_000_000.0,
        1e-6
    );
}

#[test]
fn early_health_workers_activate_once_the_cure_arrives() {
    let mut parameters = Difficulty::Normal.parameters();
    parameters.population = 1_000;
    parameters.initially_infected = 100;
    parameters.basic_interaction_rate = 0.3;

    let mut context = Context::new();
    context.init_random(7);
    context.init_simulation(parameters).unwrap();

    // Workers bought before the cure exists carry the cure state but no
    // rule mentions it, so they sit idle.
    context.buy_health_workers(100_000.0, 10).unwrap();
    context.run_ticks(20);
    assert_eq!(context.count_in_state(HealthState::Immune), 0);
    assert_eq!(context.count_in_state(HealthState::Cure), 10);

    // Introducing the cure appends the rules that match the cure state, so
    // the early workers start curing alongside the newly dispatched ones.
    context.introduce_cure(500_000.0, 10).unwrap();
    context.run_ticks(40);
    assert!(context.count_in_state(HealthState::Immune) > 0);
    assert_eq!(context.count_in_state(HealthState::Cure), 20);
    assert_eq!(context.health_worker_count(), 20);
}

#[test]
fn sessions_with_the_same_seed_agree_tick_by_tick() {
    let mut parameters = Difficulty::Hard.parameters();
    parameters.population = 500;
    parameters.initially_infected = 50;

    let mut first = Context::new();
    first.init_random(2024);
    first.init_simulation(parameters.clone()).unwrap();

    let mut second = Context::new();
    second.init_random(2024);
    second.init_simulation(parameters).unwrap();

    for _ in 0..100 {
        first.tick();
        second.tick();
        assert_eq!(first.tick_summary(), second.tick_summary());
    }
}

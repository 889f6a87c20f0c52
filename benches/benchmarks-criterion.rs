#![allow(dead_code)]

use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};

use turing_lab::config::Config;
use turing_lab::decider::cycler::DeciderCycler;
use turing_lab::decider::translated_cycler::DeciderTranslatedCycler;
use turing_lab::decider::Decider;
use turing_lab::known_machines;
use turing_lab::machine::Machine;
use turing_lab::rule::{Direction, Rule, Transition};
use turing_lab::tape::Tape;

const WARM_UP_TIME_MS: u64 = 500;
const MEASUREMENT_TIME_MS: u64 = 2000;

criterion_group!(benches, benchmark_tape_growth, benchmark_cycler_deciders,);
criterion_main!(benches);

fn benchmark_tape_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bench Tape Growth");
    group.warm_up_time(Duration::from_millis(WARM_UP_TIME_MS));
    group.measurement_time(Duration::from_millis(MEASUREMENT_TIME_MS));
    group.sample_size(20);

    group.bench_function("one-sided growth, 100k steps", |b| {
        b.iter(bench_tape_growth_right)
    });
    group.bench_function("two-sided growth, 100k steps", |b| {
        b.iter(bench_tape_growth_both_sides)
    });

    group.finish();
}

fn benchmark_cycler_deciders(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bench Cycler Deciders");
    group.warm_up_time(Duration::from_millis(WARM_UP_TIME_MS));
    group.measurement_time(Duration::from_millis(MEASUREMENT_TIME_MS));
    group.sample_size(10);

    let small_cycler = Machine::new(
        Rule::from_standard_tm_text_format("1RB---_1RC1RC_1LC1LB").unwrap(),
    );
    group.bench_function("Cycler on a small cycler", |b| {
        b.iter(|| bench_cycler(&small_cycler))
    });

    let boyd_johnson_text = known_machines::by_name("boyd_johnson").unwrap();
    let boyd_johnson = Machine::new(Rule::from_standard_tm_text_format(boyd_johnson_text).unwrap());
    group.bench_function("Translated-Cycler on Boyd-Johnson", |b| {
        b.iter(|| bench_translated_cycler(&boyd_johnson))
    });

    group.finish();
}

fn bench_tape_growth_right() {
    let mut tape = Tape::new(0);
    let transition = Transition {
        write_symbol: 1,
        direction: Direction::Right,
        target_state: 0,
    };
    for _ in 0..100_000 {
        tape.step(transition);
    }
}

fn bench_tape_growth_both_sides() {
    let mut tape = Tape::new(0);
    let right = Transition {
        write_symbol: 1,
        direction: Direction::Right,
        target_state: 0,
    };
    let left = Transition {
        write_symbol: 1,
        direction: Direction::Left,
        target_state: 0,
    };
    for i in 0..100_000 {
        tape.step(if i % 2 == 0 { right } else { left });
    }
}

fn bench_cycler(machine: &Machine) {
    let config = Config::builder(machine.rule().n_states(), machine.rule().n_symbols()).build();
    let result = DeciderCycler.find(machine, &config);
    assert!(matches!(result, turing_lab::status::DeciderResult::Cycler(_)));
}

fn bench_translated_cycler(machine: &Machine) {
    let config = Config::builder(machine.rule().n_states(), machine.rule().n_symbols())
        .step_limit_decider_translated_cycler(10_000_000)
        .build();
    let result = DeciderTranslatedCycler.find(machine, &config);
    assert!(matches!(
        result,
        turing_lab::status::DeciderResult::TranslatedCycler(_)
    ));
}

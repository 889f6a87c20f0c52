//! Runs every decider against a single machine, cheapest first, and prints
//! whichever certificate is found (or "undecided" if none is, within budget).

use turing_lab::config::Config;
use turing_lab::decider::bouncer::DeciderBouncer;
use turing_lab::decider::cycler::DeciderCycler;
use turing_lab::decider::translated_cycler::DeciderTranslatedCycler;
use turing_lab::decider::Decider;
use turing_lab::known_machines;
use turing_lab::machine::Machine;
use turing_lab::rule::Rule;

fn main() {
    run_known("bb5_champion", None);
    run_known("boyd_johnson", Some(200_000));
}

fn run_known(name: &str, translated_cycler_budget_override: Option<u32>) {
    let text = known_machines::by_name(name).expect("known machine name");
    let rule = Rule::from_standard_tm_text_format(text).expect("well-formed TNF");
    let mut builder = Config::builder(rule.n_states(), rule.n_symbols());
    if let Some(budget) = translated_cycler_budget_override {
        builder = builder.step_limit_decider_translated_cycler(budget);
    }
    let config = builder.build();
    let machine = Machine::new(rule);

    println!("{name} ({text}):");
    println!("  Halt pre-check: {}", DeciderCycler.decider_id().name);

    let (steps, halted) = machine.clone().run(config.step_limit_decider_halt());
    if halted {
        println!("  Halted after {steps} steps");
        return;
    }

    let cycler = DeciderCycler.find(&machine, &config);
    println!("  Cycler: {cycler}");

    let translated = DeciderTranslatedCycler.find(&machine, &config);
    println!("  Translated-Cycler: {translated}");

    let bouncer = DeciderBouncer.find(&machine, &config);
    println!("  Bouncer: {bouncer}");
}

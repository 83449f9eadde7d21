use blinkentape::{Automaton, LedColor, Step, LED_CELLS};
use clap::Parser;
use serde::Serialize;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// The 16-bit number to load onto the tape. A random seed is drawn when
    /// omitted.
    #[clap(short, long)]
    seed: Option<u16>,

    /// Print each tick of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Print the final machine report as JSON
    #[clap(short, long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    seed: u16,
    outcome: Step,
    ticks: usize,
    leds: [LedColor; LED_CELLS],
}

fn main() {
    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(rand::random);

    let mut automaton = match Automaton::new(seed) {
        Ok(automaton) => automaton,
        Err(e) => {
            eprintln!("Failed to load seed {}: {}", seed, e);
            std::process::exit(1);
        }
    };

    let outcome = if cli.debug {
        print_tick(&automaton);
        loop {
            match automaton.step() {
                Step::Running => print_tick(&automaton),
                done => break done,
            }
        }
    } else {
        automaton.run()
    };

    if cli.json {
        let report = Report {
            seed,
            outcome,
            ticks: automaton.tick_count(),
            leds: automaton.led_snapshot(),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("Seed:  {} (0b{:b})", seed, seed);
        println!("Ticks: {}", automaton.tick_count());
        println!("LEDs:  {}", strip(&automaton.led_snapshot()));
        match outcome {
            Step::Halted => println!("Machine halted."),
            Step::Failed => println!("Machine failed: {}", fault_message(&automaton)),
            Step::Running => println!("Machine still running after the tick budget."),
        }
    }

    match outcome {
        Step::Halted => {}
        Step::Failed => std::process::exit(1),
        Step::Running => std::process::exit(2),
    }
}

fn print_tick(automaton: &Automaton) {
    println!(
        "Tick: {:>5}, State: {:?}, Phase: {:?}, Head: {:>3}, LEDs: {}",
        automaton.tick_count(),
        automaton.state(),
        automaton.phase(),
        automaton.tape().head(),
        strip(&automaton.led_snapshot()),
    );
}

/// Renders the 12-cell strip as one character per LED.
fn strip(leds: &[LedColor; LED_CELLS]) -> String {
    leds.iter()
        .map(|color| match color {
            LedColor::Green => 'G',
            LedColor::Red => 'R',
            LedColor::Off => '.',
        })
        .collect()
}

fn fault_message(automaton: &Automaton) -> String {
    match automaton.fault() {
        Some(fault) => fault.to_string(),
        None => "unexpected blank under the head".to_string(),
    }
}

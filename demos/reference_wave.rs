//! Enumerates every feasible wave of the reference instance and prints the best one.
//!
//! Run with `RUST_LOG=debug` to see search statistics.

use wave_csp::wave::{TieBreak, WaveConfig, WaveInstance, WaveRunner};

fn main() {
    env_logger::init();

    let tie_break = match std::env::args().nth(1).as_deref() {
        Some("last") => TieBreak::Last,
        _ => TieBreak::First,
    };
    let config = WaveConfig::default().with_tie_break(tie_break);

    match WaveRunner::run(&WaveInstance::reference(), &config) {
        Ok(result) => {
            println!("{result}");
            println!(
                "({} nodes, {} checks, {} ms)",
                result.stats.nodes, result.stats.checks, result.solve_time_ms
            );
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

//! Solves the built-in hexagonal regex crossword by constraint propagation,
//! printing the board after every round until it stops changing.

use std::process::ExitCode;

use rexagon_engine::{LetterSet, Solver};

mod puzzle;

fn main() -> ExitCode {
    env_logger::init();
    let json = std::env::args().skip(1).any(|arg| arg == "--json");

    println!("Compiling regex objects...");
    let mut solver = match Solver::new(puzzle::SIDE, LetterSet::ALL, &puzzle::DEFINITIONS) {
        Ok(solver) => solver,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let rounds = solver.run(|round, solver| {
        println!();
        println!("Iteration {round}");
        for (pattern, line) in solver.lines() {
            println!("{pattern:<25} {line}");
        }
    });

    log::info!(
        "fixed point after {rounds} rounds; solved: {}",
        solver.is_solved()
    );

    if json {
        match serde_json::to_string_pretty(&solver.report(rounds)) {
            Ok(out) => println!("{out}"),
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

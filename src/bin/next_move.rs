use std::io::stdin;
use std::sync::Arc;

use match_taker::config::Config;
use match_taker::{GameState, GameTree, Solver};

fn main() {
    env_logger::try_init().ok();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let tree = match GameTree::new(config.root) {
        Ok(tree) => Arc::new(tree),
        Err(e) => {
            eprintln!("could not build the game tree for {}: {}", config.root, e);
            std::process::exit(1);
        }
    };
    log::info!(
        "game tree for {} ready: {} nodes",
        config.root,
        tree.node_count()
    );
    let mut solver = Solver::seeded(tree, config.seed);

    println!("enter rows and level, e.g. \"10340 2\" (empty line to quit)");
    loop {
        let mut input = String::new();
        stdin()
            .read_line(&mut input)
            .expect("line could not be read");
        let mut words = input.split_whitespace();
        let Some(rows) = words.next() else { break };
        let level: u8 = match words.next().unwrap_or("1").parse() {
            Ok(level) => level,
            Err(e) => {
                println!("error: level {}", e);
                continue;
            }
        };
        let solution = rows
            .parse::<GameState>()
            .map_err(match_taker::Error::from)
            .and_then(|state| solver.solve(&state, level));
        match solution {
            Ok(solution) => {
                if let Some(game_move) = solution.game_move {
                    println!(
                        "row index {}, number of matches {}, game continues {}",
                        game_move.row_index(),
                        game_move.match_count(),
                        solution.continuation.code()
                    );
                }
                if let Some(message) = solution.end_of_game() {
                    println!("{}", message);
                }
            }
            Err(e) => println!("error: {}", e),
        }
    }
}

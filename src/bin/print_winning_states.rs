use rayon::prelude::*;

use match_taker::config::init_rayon_threads;
use match_taker::{GameState, TreeCache, Winning};

/// Every normalized state of the standard game, in ascending order.
fn normalized_states() -> Vec<GameState> {
    let mut states = vec![];
    for a in 0..=1u8 {
        for b in a..=2 {
            for c in b..=3 {
                for d in c..=4 {
                    for e in d..=5 {
                        if let Ok(state) = GameState::new(&[a, b, c, d, e]) {
                            states.push(state);
                        }
                    }
                }
            }
        }
    }
    states
}

fn main() {
    env_logger::try_init().ok();
    let threads = init_rayon_threads();
    println!("Rayon threads: {}", threads);

    let cache = TreeCache::new();
    let states = normalized_states();
    let results: Vec<(GameState, Winning, usize)> = states
        .par_iter()
        .map(|state| {
            let tree = cache
                .get_or_build(state)
                .expect("every normalized state roots a tree");
            (*state, tree.root().winning(), tree.node_count())
        })
        .collect();

    let mut winning = 0;
    for (state, flag, node_count) in &results {
        let label = match flag {
            Winning::Winning => "win",
            Winning::Losing => "lose",
            Winning::Unknown => "?",
        };
        if *flag == Winning::Winning {
            winning += 1;
        }
        println!("{} {:>4} ({} nodes)", state, label, node_count);
    }
    println!(
        "{} of {} states are won by the player to move",
        winning,
        results.len()
    );
}

//! Move selection for the three playing strengths.
//!
//! Every strategy works on a copy of the requested state. Strategies that need the
//! canonical form normalize the copy and map the chosen row back to the original row
//! order with the permutation returned by [`GameState::normalize`].

use log::trace;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{ensure, Error, Result, ValidationError};
use crate::game_state::{GameMove, GameState, MAX_TAKE, ROW_COUNT};
use crate::node::Winning;
use crate::GameTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// A random legal move.
    Random,
    /// As many matches as allowed from the fullest row.
    Greedy,
    /// Perfect play looked up in the game tree.
    Perfect,
}

impl TryFrom<u8> for Level {
    type Error = ValidationError;

    fn try_from(level: u8) -> std::result::Result<Self, Self::Error> {
        match level {
            0 => Ok(Level::Random),
            1 => Ok(Level::Greedy),
            2 => Ok(Level::Perfect),
            _ => Err(ValidationError::Level(level)),
        }
    }
}

/// What the game looks like after the solver's move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Continuation {
    /// Exactly one match was left: the caller has already won and no move is made.
    AlreadyWon,
    /// The move leaves exactly one match for the opponent.
    Finished,
    /// The game goes on, nothing known about who wins.
    Ongoing,
    /// The game goes on and the player to move next can force a win.
    NextPlayerWins,
    /// The game goes on and the player to move next loses against perfect play.
    NextPlayerLoses,
}

impl Continuation {
    pub fn code(&self) -> i8 {
        match self {
            Continuation::AlreadyWon => -1,
            Continuation::Finished => 0,
            Continuation::Ongoing => 1,
            Continuation::NextPlayerWins => 2,
            Continuation::NextPlayerLoses => 3,
        }
    }
}

impl From<Continuation> for i8 {
    fn from(continuation: Continuation) -> Self {
        continuation.code()
    }
}

impl TryFrom<i8> for Continuation {
    type Error = String;

    fn try_from(code: i8) -> std::result::Result<Self, Self::Error> {
        match code {
            -1 => Ok(Continuation::AlreadyWon),
            0 => Ok(Continuation::Finished),
            1 => Ok(Continuation::Ongoing),
            2 => Ok(Continuation::NextPlayerWins),
            3 => Ok(Continuation::NextPlayerLoses),
            _ => Err(format!("unknown continuation code {}", code)),
        }
    }
}

/// The solver's answer: a move in the caller's row order, if any, and how the game goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    #[serde(flatten)]
    pub game_move: Option<GameMove>,
    #[serde(rename = "gameContinues")]
    pub continuation: Continuation,
}

impl Solution {
    /// End-of-game message for the caller, if the game is over.
    pub fn end_of_game(&self) -> Option<&'static str> {
        match self.continuation {
            Continuation::AlreadyWon => Some("You won! :-)"),
            Continuation::Finished => Some("You lost! :-("),
            _ => None,
        }
    }
}

/// Computes moves. Perfect play reads the labels of a shared [`GameTree`].
pub struct Solver<R = SmallRng>
where
    R: Rng,
{
    tree: Arc<GameTree<GameState>>,
    rng: R,
}

impl Solver<SmallRng> {
    pub fn seeded(tree: Arc<GameTree<GameState>>, seed: u64) -> Solver<SmallRng> {
        Solver::new(tree, SmallRng::seed_from_u64(seed))
    }
}

impl<R> Solver<R>
where
    R: Rng,
{
    pub fn new(tree: Arc<GameTree<GameState>>, rng: R) -> Solver<R> {
        Solver { tree, rng }
    }

    pub fn tree(&self) -> &GameTree<GameState> {
        &self.tree
    }

    /// Computes the next move on `state` at `level` (0 random, 1 greedy, 2 perfect).
    pub fn solve(&mut self, state: &GameState, level: u8) -> Result<Solution> {
        let level = Level::try_from(level)?;
        let total = state.get_total_count();
        if total == 1 {
            return Ok(Solution {
                game_move: None,
                continuation: Continuation::AlreadyWon,
            });
        }

        let (game_move, winning) = match level {
            Level::Random => (self.random_move(state)?, Winning::Unknown),
            Level::Greedy => (greedy_move(state)?, Winning::Unknown),
            Level::Perfect => self.perfect_move(state)?,
        };
        ensure(state.is_possible_move(&game_move), || {
            format!("{:?} computed for {} is not possible", game_move, state)
        })?;

        let remaining = total - game_move.match_count() as usize;
        let continuation = if remaining == 1 {
            Continuation::Finished
        } else {
            match winning {
                Winning::Winning => Continuation::NextPlayerWins,
                Winning::Losing => Continuation::NextPlayerLoses,
                Winning::Unknown => Continuation::Ongoing,
            }
        };
        trace!(
            "{:?} on {}: {:?}, {:?}",
            level,
            state,
            game_move,
            continuation
        );
        Ok(Solution {
            game_move: Some(game_move),
            continuation,
        })
    }

    fn random_move(&mut self, state: &GameState) -> Result<GameMove> {
        let rows = state.get_rows();
        let non_empty: Vec<usize> = (0..ROW_COUNT).filter(|&k| rows[k] > 0).collect();
        let row_index = non_empty[self.rng.random_range(0..non_empty.len())];
        let mut max_count = MAX_TAKE.min(rows[row_index]);
        // never take the last match
        if non_empty.len() == 1 {
            max_count = max_count.min(rows[row_index] - 1);
        }
        let match_count = self.rng.random_range(1..=max_count);
        Ok(GameMove::new(row_index, match_count)?)
    }

    fn perfect_move(&mut self, state: &GameState) -> Result<(GameMove, Winning)> {
        let (normalized, restore) = state.normalized();
        let node = self.tree.find(&normalized)?.ok_or_else(|| {
            Error::Internal(format!("{} is missing from the game tree", normalized))
        })?;
        let (game_move, winning) = self.tree.select_move(node, &mut self.rng)?;
        let game_move = GameMove::new(restore.apply(game_move.row_index()), game_move.match_count())?;
        Ok((game_move, winning))
    }
}

fn greedy_move(state: &GameState) -> Result<GameMove> {
    let (normalized, restore) = state.normalized();
    let rows = normalized.get_rows();
    let largest = rows[ROW_COUNT - 1];
    let mut match_count = MAX_TAKE.min(largest);
    // never take the last match
    if rows[ROW_COUNT - 2] == 0 {
        match_count = match_count.min(largest - 1);
    }
    Ok(GameMove::new(restore.apply(ROW_COUNT - 1), match_count)?)
}

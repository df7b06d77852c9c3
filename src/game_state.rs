use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ensure, Error, Result, ValidationError};
use crate::permutation::Permutation;
use crate::Impartial;

pub const ROW_COUNT: usize = 5;
pub const MAX_TAKE: u8 = 3;

/// Selects a row and takes 1..3 matches off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMove {
    row_index: usize,
    #[serde(rename = "numberOfMatches")]
    match_count: u8,
}

impl GameMove {
    pub fn new(row_index: usize, match_count: u8) -> std::result::Result<GameMove, ValidationError> {
        if row_index >= ROW_COUNT || !(1..=MAX_TAKE).contains(&match_count) {
            return Err(ValidationError::Move {
                row_index,
                match_count,
            });
        }
        Ok(GameMove {
            row_index,
            match_count,
        })
    }

    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn match_count(&self) -> u8 {
        self.match_count
    }
}

/// Five rows of matches, row `k` holding at most `k + 1` of them, at least one match in total.
///
/// States are ordered lexicographically by their rows. A state is normalized when its
/// rows are ascending; the normalized state stands for every reordering of its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct GameState {
    rows: [u8; ROW_COUNT],
}

impl GameState {
    pub fn new(rows: &[u8]) -> std::result::Result<GameState, ValidationError> {
        if rows.len() != ROW_COUNT {
            return Err(ValidationError::RowCount(rows.len()));
        }
        for (index, &value) in rows.iter().enumerate() {
            if value > 5 {
                return Err(ValidationError::RowOutOfRange { index, value });
            }
            if value as usize > index + 1 {
                return Err(ValidationError::RowOverCapacity { index, value });
            }
        }
        if rows.iter().all(|&value| value == 0) {
            return Err(ValidationError::NoMatches);
        }
        let mut state = GameState {
            rows: [0; ROW_COUNT],
        };
        state.rows.copy_from_slice(rows);
        Ok(state)
    }

    /// The starting position of the standard game.
    pub fn standard() -> GameState {
        GameState {
            rows: [1, 2, 3, 4, 5],
        }
    }

    pub fn get_rows(&self) -> [u8; ROW_COUNT] {
        self.rows
    }

    pub fn get_total_count(&self) -> usize {
        self.rows.iter().map(|&r| r as usize).sum()
    }

    /// Sorts the rows ascending and returns the permutation restoring the previous
    /// order, to be handed to [`GameState::denormalize`].
    pub fn normalize(&mut self) -> Permutation {
        let (sorted, p) = Permutation::sort_with_permutation(&self.rows);
        self.rows.copy_from_slice(&sorted);
        p.invert()
    }

    /// Returns a normalized copy together with the permutation restoring `self`.
    pub fn normalized(&self) -> (GameState, Permutation) {
        let mut state = *self;
        let restore = state.normalize();
        (state, restore)
    }

    pub fn is_normalized(&self) -> bool {
        self.rows.windows(2).all(|w| w[0] <= w[1])
    }

    /// Reorders the rows with `restore`, the permutation returned by [`GameState::normalize`].
    pub fn denormalize(&mut self, restore: &Permutation) -> Result<()> {
        let rows = restore.apply_to_list(&self.rows)?;
        let restored = GameState::new(&rows).map_err(|e| {
            Error::Internal(format!("denormalizing {} with {} gave {:?}: {}", self, restore, rows, e))
        })?;
        *self = restored;
        Ok(())
    }

    /// A move is possible if its row holds enough matches and at least one match stays on the table.
    pub fn is_possible_move(&self, game_move: &GameMove) -> bool {
        game_move.match_count <= self.rows[game_move.row_index]
            && (game_move.match_count as usize) < self.get_total_count()
    }

    pub fn make_move(&self, game_move: &GameMove) -> Result<GameState> {
        ensure(self.is_possible_move(game_move), || {
            format!("{:?} is not possible on {}", game_move, self)
        })?;
        let mut rows = self.rows;
        rows[game_move.row_index] -= game_move.match_count;
        Ok(GameState { rows })
    }

    /// All normalized states reachable with one move from this normalized state.
    ///
    /// Successors are grouped by the number of matches taken, ascending; duplicates are
    /// removed within a group only. `[0,0,1,2,2]` yields `[0,0,0,2,2]`, `[0,0,1,1,2]`, `[0,0,0,1,2]`.
    pub fn normalized_successors(&self) -> Result<Vec<GameState>> {
        ensure(self.is_normalized(), || {
            format!("successors of {} requested, which is not normalized", self)
        })?;
        let max_count = (MAX_TAKE as usize).min(self.get_total_count() - 1) as u8;
        let mut successors = vec![];
        for match_count in 1..=max_count {
            let mut group: Vec<GameState> = vec![];
            for row_index in 0..ROW_COUNT {
                if match_count <= self.rows[row_index] {
                    let mut successor = self.make_move(&GameMove::new(row_index, match_count)?)?;
                    successor.normalize();
                    if !group.contains(&successor) {
                        group.push(successor);
                    }
                }
            }
            successors.extend(group);
        }
        Ok(successors)
    }

    /// Returns the move turning this normalized state into `target` after normalization.
    ///
    /// The move takes the difference of the total counts from the last row that differs,
    /// e.g. `[1,2,3,4,5]` to `[1,2,2,3,5]` is row 3, two matches (`[1,2,3,2,5]` sorts to the target).
    pub fn get_move(&self, target: &GameState) -> Result<GameMove> {
        ensure(self.is_normalized() && target.is_normalized(), || {
            format!("get_move from {} to {} needs normalized states", self, target)
        })?;
        ensure(self.normalized_successors()?.contains(target), || {
            format!("{} is not a successor of {}", target, self)
        })?;
        let match_count = (self.get_total_count() - target.get_total_count()) as u8;
        let row_index = (0..ROW_COUNT)
            .rev()
            .find(|&k| self.rows[k] != target.rows[k])
            .ok_or_else(|| Error::Internal(format!("{} equals its successor", self)))?;
        let game_move = GameMove::new(row_index, match_count)?;
        let mut check = self.make_move(&game_move)?;
        check.normalize();
        ensure(check == *target, || {
            format!("{:?} on {} gives {}, expected {}", game_move, self, check, target)
        })?;
        Ok(game_move)
    }
}

impl Impartial for GameState {
    type Move = GameMove;

    fn get_size(&self) -> usize {
        self.get_total_count()
    }

    fn get_moves(&self) -> Result<Vec<Self>> {
        self.normalized_successors()
    }

    fn get_move_to(&self, target: &Self) -> Result<GameMove> {
        self.get_move(target)
    }
}

impl FromStr for GameState {
    type Err = ValidationError;

    /// Parses a row string such as `"10340"`, one digit per row.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let rows = s
            .trim()
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(d) => Ok(d as u8),
                None => Err(ValidationError::NotADigit(c)),
            })
            .collect::<std::result::Result<Vec<u8>, _>>()?;
        GameState::new(&rows)
    }
}

impl TryFrom<Vec<u8>> for GameState {
    type Error = ValidationError;

    fn try_from(rows: Vec<u8>) -> std::result::Result<Self, Self::Error> {
        GameState::new(&rows)
    }
}

impl From<GameState> for Vec<u8> {
    fn from(state: GameState) -> Self {
        state.rows.to_vec()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for row in self.rows {
            write!(f, "{}", row)?;
        }
        write!(f, "]")
    }
}

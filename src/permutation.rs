use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// A bijection of the non negative integers that moves only finitely many of them.
///
/// `(2,0,1)` and `(2,0,1,3,4)` denote the same permutation: every index beyond the
/// stored list is mapped to itself. The stored list is kept as short as possible,
/// so the identity is stored as `(0)` and equal permutations have equal lists.
/// The derived ordering is the lexicographic order of those lists.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Permutation {
    p: Vec<usize>,
}

impl Permutation {
    /// Builds a permutation from a list holding each of `0..list.len()` exactly once.
    /// The empty list is accepted as the identity.
    pub fn new(list: Vec<usize>) -> Result<Permutation, ValidationError> {
        let n = list.len();
        let mut occupied = vec![false; n];
        for &value in &list {
            if value >= n || occupied[value] {
                return Err(ValidationError::NotAPermutation(list));
            }
            occupied[value] = true;
        }
        Ok(Permutation::from_valid(list))
    }

    pub fn identity() -> Permutation {
        Permutation { p: vec![0] }
    }

    /// Trims trailing fixed points, e.g. `(2,0,1,3,4)` to `(2,0,1)`.
    fn from_valid(mut p: Vec<usize>) -> Permutation {
        while p.len() > 1 && p[p.len() - 1] == p.len() - 1 {
            p.pop();
        }
        if p.is_empty() {
            p.push(0);
        }
        Permutation { p }
    }

    /// Value of the permutation at `n`; `n` itself beyond the stored length.
    pub fn apply(&self, n: usize) -> usize {
        self.p.get(n).copied().unwrap_or(n)
    }

    /// Length of the stored list. The identity has length 1.
    pub fn len(&self) -> usize {
        self.p.len()
    }

    pub fn is_identity(&self) -> bool {
        self.p == [0]
    }

    /// Returns the stored list padded with fixed points up to length `n`.
    /// For `n` not above the stored length the stored list is returned as is.
    pub fn lengthen(&self, n: usize) -> Vec<usize> {
        let mut list = self.p.clone();
        list.extend(self.p.len()..n);
        list
    }

    /// Composition of functions: `p.compose(&q)` first applies `q`, then `p`.
    pub fn compose(&self, other: &Permutation) -> Permutation {
        let n = self.len().max(other.len());
        let p = self.lengthen(n);
        let q = other.lengthen(n);
        Permutation::from_valid(q.iter().map(|&k| p[k]).collect())
    }

    pub fn invert(&self) -> Permutation {
        let mut inverse = vec![0; self.p.len()];
        for (k, &value) in self.p.iter().enumerate() {
            inverse[value] = k;
        }
        Permutation::from_valid(inverse)
    }

    /// Permutes a list: the element at position `k` of the result is taken from
    /// position `invert().apply(k)` of `list`, i.e. the element at `k` moves to `apply(k)`.
    ///
    /// `Permutation::new(vec![2, 0, 1])?.apply_to_list(&[1, 2, 3, 4])` is `[2, 3, 1, 4]`.
    /// Fails if the permutation moves an index outside the list; the identity fits any list.
    pub fn apply_to_list<T: Clone>(&self, list: &[T]) -> Result<Vec<T>, ValidationError> {
        if !self.is_identity() && self.len() > list.len() {
            return Err(ValidationError::PermutationTooLong {
                permutation: self.len(),
                list: list.len(),
            });
        }
        let inverse = self.invert();
        Ok((0..list.len())
            .map(|k| list[inverse.apply(k)].clone())
            .collect())
    }

    /// Returns a sorted copy of `list` together with the permutation that turns
    /// `list` into that copy under [`Permutation::apply_to_list`].
    ///
    /// Equal elements keep their relative order, so the `i`-th occurrence of a value
    /// in `list` lands on the `i`-th slot holding that value in the sorted copy.
    pub fn sort_with_permutation<T: Ord + Clone>(list: &[T]) -> (Vec<T>, Permutation) {
        let mut order: Vec<usize> = (0..list.len()).collect();
        order.sort_by(|&a, &b| list[a].cmp(&list[b]));
        let sorted = order.iter().map(|&k| list[k].clone()).collect();
        let mut p = vec![0; list.len()];
        for (slot, &source) in order.iter().enumerate() {
            p[source] = slot;
        }
        (sorted, Permutation::from_valid(p))
    }
}

impl Default for Permutation {
    fn default() -> Self {
        Permutation::identity()
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = ValidationError;

    fn try_from(list: Vec<usize>) -> Result<Self, Self::Error> {
        Permutation::new(list)
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(permutation: Permutation) -> Self {
        permutation.p
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.p.iter().map(|v| v.to_string()).collect();
        write!(f, "({})", values.join(", "))
    }
}

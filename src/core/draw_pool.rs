//! Working set of roster positions the roll display draws from.

use crate::models::Roster;
use rand::Rng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawPool {
    indices: Vec<usize>,
}

impl DrawPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refill with the eligible positions of `roster`, shuffled.
    pub fn rebuild<R: Rng + ?Sized>(&mut self, roster: &Roster, no_repeat: bool, rng: &mut R) {
        self.indices = roster.eligible(no_repeat);
        self.indices.shuffle(rng);
    }

    /// Pick a position uniformly at random, leaving it in the pool.
    ///
    /// An empty pool is rebuilt first; `None` means nothing is eligible
    /// (every student present in no-repeat mode, or an empty roster).
    pub fn next<R: Rng + ?Sized>(
        &mut self,
        roster: &Roster,
        no_repeat: bool,
        rng: &mut R,
    ) -> Option<usize> {
        if self.indices.is_empty() {
            self.rebuild(roster, no_repeat, rng);
        }
        self.indices.choose(rng).copied()
    }

    /// Drop `idx` from the pool. Returns whether it was there.
    pub fn remove(&mut self, idx: usize) -> bool {
        let before = self.indices.len();
        self.indices.retain(|&i| i != idx);
        before != self.indices.len()
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.indices.contains(&idx)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

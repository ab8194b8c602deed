//! Implementation of a saturating counter.

use crate::branch::Outcome;
use crate::predictor::StatefulPredictor;

/// A two-bit saturating counter used to follow the behavior of a branch.
///
/// The counter value stays in `[0, 3]`: taken outcomes increment it
/// (saturating at 3) and not-taken outcomes decrement it (saturating at 0).
/// Values of 2 and above predict 'taken'. New counters start at 1, so a cold
/// counter predicts 'not-taken', weakly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaturatingCounter {
    ctr: u8,
}

impl SaturatingCounter {
    const MAX: u8 = 3;
    const INIT: u8 = 1;
    const TAKEN_POINT: u8 = 2;

    pub fn new() -> Self {
        Self { ctr: Self::INIT }
    }

    /// Return the raw counter value.
    pub fn value(&self) -> u8 { self.ctr }

    /// Move one step toward 'strongly taken'.
    pub fn increment(&mut self) {
        self.ctr = (self.ctr + 1).min(Self::MAX);
    }

    /// Move one step toward 'strongly not-taken'.
    pub fn decrement(&mut self) {
        self.ctr = self.ctr.saturating_sub(1);
    }
}

impl Default for SaturatingCounter {
    fn default() -> Self { Self::new() }
}

impl StatefulPredictor for SaturatingCounter {
    fn name(&self) -> &'static str { "SaturatingCounter" }

    fn reset(&mut self) {
        self.ctr = Self::INIT;
    }

    fn predict(&self) -> Outcome {
        (self.ctr >= Self::TAKEN_POINT).into()
    }

    fn update(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::T => self.increment(),
            Outcome::N => self.decrement(),
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cold_counter_predicts_not_taken() {
        let ctr = SaturatingCounter::new();
        assert_eq!(ctr.value(), 1);
        assert_eq!(ctr.predict(), Outcome::N);
    }

    #[test]
    fn saturates_at_both_ends() {
        let mut ctr = SaturatingCounter::new();
        for _ in 0..4 {
            ctr.update(Outcome::T);
        }
        assert_eq!(ctr.value(), 3);
        ctr.update(Outcome::T);
        assert_eq!(ctr.value(), 3);

        for _ in 0..3 {
            ctr.update(Outcome::N);
        }
        assert_eq!(ctr.value(), 0);
        ctr.update(Outcome::N);
        assert_eq!(ctr.value(), 0);
    }

    #[test]
    fn predicts_taken_at_two_and_above() {
        let mut ctr = SaturatingCounter::new();
        ctr.update(Outcome::T);
        assert_eq!(ctr.predict(), Outcome::T);
        ctr.update(Outcome::N);
        assert_eq!(ctr.predict(), Outcome::N);
    }

    #[test]
    fn reset_restores_weakly_not_taken() {
        let mut ctr = SaturatingCounter::new();
        for _ in 0..4 {
            ctr.update(Outcome::T);
        }
        ctr.reset();
        assert_eq!(ctr.value(), 1);
        assert_eq!(ctr.predict(), Outcome::N);
    }
}


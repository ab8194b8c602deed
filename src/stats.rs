//! Helpers for collecting statistics while evaluating a predictor.

use std::collections::*;

use bitvec::prelude::*;
use itertools::*;

use crate::branch::*;

/// Container for recording statistics while evaluating some predictor.
pub struct BranchStats {
    /// Per-branch statistics (indexed by program counter value)
    pub data: BTreeMap<usize, BranchData>,

    /// Number of correct predictions
    pub global_hits: usize,

    /// Number of predicted branches
    pub global_brns: usize,
}

impl BranchStats {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
            global_hits: 0,
            global_brns: 0,
        }
    }

    /// Record a resolved prediction, updating both the global and the
    /// per-branch counts.
    pub fn record(&mut self, record: &BranchRecord, prediction: Outcome) {
        let hit = prediction == record.outcome;
        self.global_brns += 1;
        if hit {
            self.global_hits += 1;
        }

        let data = self.get_mut(record.pc);
        data.occ += 1;
        data.pat.push(record.outcome.into());
        if hit {
            data.hits += 1;
        }
    }

    /// Return the global hit rate.
    pub fn hit_rate(&self) -> f64 {
        self.global_hits as f64 / self.global_brns as f64
    }

    /// Return the global hit count.
    pub fn global_hits(&self) -> usize { self.global_hits }

    /// Return the global miss count.
    pub fn global_miss(&self) -> usize { self.global_brns - self.global_hits }

    /// Return the total branch count.
    pub fn global_brns(&self) -> usize { self.global_brns }

    /// Returns a reference to data collected for a particular branch.
    pub fn get(&self, pc: usize) -> Option<&BranchData> {
        self.data.get(&pc)
    }

    /// Returns a mutable reference to data collected for a particular
    /// branch, creating a new entry if one doesn't already exist.
    pub fn get_mut(&mut self, pc: usize) -> &mut BranchData {
        self.data.entry(pc).or_insert(BranchData::new())
    }

    /// Returns the number of unique observed branch instructions.
    pub fn num_unique_branches(&self) -> usize {
        self.data.len()
    }

    /// Returns the 'n' most frequently executed branches.
    pub fn most_common(&self, n: usize) -> Vec<(usize, &BranchData)> {
        self.data.iter()
            .sorted_by_key(|(_, d)| std::cmp::Reverse(d.occ))
            .take(n)
            .map(|(pc, d)| (*pc, d))
            .collect()
    }
}

/// Container for per-branch statistics.
pub struct BranchData {
    /// Number of times this branch was executed
    pub occ: usize,

    /// Number of correct predictions for this branch
    pub hits: usize,

    /// Record of all observed outcomes for this branch
    pub pat: BitVec,
}

impl BranchData {
    pub fn new() -> Self {
        Self {
            occ: 0,
            hits: 0,
            pat: BitVec::new(),
        }
    }

    /// Return the hit rate for this branch.
    pub fn hit_rate(&self) -> f64 {
        self.hits as f64 / self.occ as f64
    }

    pub fn is_always_taken(&self) -> bool {
        self.pat.count_ones() == self.pat.len()
    }

    pub fn is_never_taken(&self) -> bool {
        self.pat.count_zeros() == self.pat.len()
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::branch::BranchKind;

    fn cbr(pc: usize, outcome: Outcome) -> BranchRecord {
        BranchRecord {
            pc,
            tgt: pc + 0x20,
            outcome,
            kind: BranchKind::DirectBranch,
        }
    }

    #[test]
    fn record_tracks_global_and_per_branch_counts() {
        let mut stat = BranchStats::new();
        stat.record(&cbr(0x10, Outcome::T), Outcome::T);
        stat.record(&cbr(0x10, Outcome::T), Outcome::N);
        stat.record(&cbr(0x20, Outcome::N), Outcome::N);

        assert_eq!(stat.global_brns(), 3);
        assert_eq!(stat.global_hits(), 2);
        assert_eq!(stat.global_miss(), 1);
        assert_eq!(stat.num_unique_branches(), 2);

        let data = stat.get(0x10).unwrap();
        assert_eq!(data.occ, 2);
        assert_eq!(data.hits, 1);
        assert!(data.is_always_taken());
        assert!(stat.get(0x20).unwrap().is_never_taken());
    }

    #[test]
    fn most_common_sorts_by_occurrence() {
        let mut stat = BranchStats::new();
        for _ in 0..3 {
            stat.record(&cbr(0x10, Outcome::T), Outcome::N);
        }
        stat.record(&cbr(0x20, Outcome::T), Outcome::N);

        let common = stat.most_common(2);
        assert_eq!(common[0].0, 0x10);
        assert_eq!(common[1].0, 0x20);
    }
}


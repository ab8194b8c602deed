
use rand::prelude::*;

use crate::branch::*;

/// A synthesized sequence of [`BranchRecord`].
///
/// This crate owns no trace file format; workloads for the evaluation
/// binaries and tests are generated here instead.
pub struct SyntheticTrace {
    records: Vec<BranchRecord>,
}

impl SyntheticTrace {
    /// Return the number of records.
    pub fn num_entries(&self) -> usize { self.records.len() }

    /// Return a slice of records.
    pub fn as_slice(&self) -> &[BranchRecord] { &self.records }

    /// A single conditional branch replaying a fixed outcome pattern.
    pub fn pattern(pc: usize, pattern: &[Outcome], reps: usize) -> Self {
        let records = pattern.iter()
            .cycle()
            .take(pattern.len() * reps)
            .map(|outcome| BranchRecord {
                pc,
                tgt: pc + 0x20,
                outcome: *outcome,
                kind: BranchKind::DirectBranch,
            })
            .collect();
        Self { records }
    }

    /// A single conditional branch taken on all but every `period`-th
    /// execution, like a loop back-edge.
    pub fn loop_branch(pc: usize, period: usize, len: usize) -> Self {
        assert!(period > 1);
        let records = (0..len)
            .map(|i| BranchRecord {
                pc,
                tgt: pc + 0x20,
                outcome: ((i + 1) % period != 0).into(),
                kind: BranchKind::DirectBranch,
            })
            .collect();
        Self { records }
    }

    /// A seeded random workload over `num_branches` conditional branch
    /// sites. Each site gets its own taken bias, so per-address
    /// organizations have something to learn.
    pub fn random_workload(num_branches: usize, len: usize, seed: u64) -> Self {
        assert!(num_branches > 0);
        let mut rng = StdRng::seed_from_u64(seed);

        let sites: Vec<(usize, f64)> = (0..num_branches)
            .map(|i| {
                let pc = 0x1000_0000 + (i * 0x40);
                let bias = rng.gen_range(0.05..0.95);
                (pc, bias)
            })
            .collect();

        let records = (0..len)
            .map(|_| {
                let (pc, bias) = sites[rng.gen_range(0..sites.len())];
                BranchRecord {
                    pc,
                    tgt: pc + 0x20,
                    outcome: rng.gen_bool(bias).into(),
                    kind: BranchKind::DirectBranch,
                }
            })
            .collect();
        Self { records }
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::branch::Outcome::{N, T};

    #[test]
    fn loop_branch_misses_the_exit_only() {
        let trace = SyntheticTrace::loop_branch(0x1000, 4, 8);
        let outcomes: Vec<Outcome> = trace.as_slice()
            .iter()
            .map(|r| r.outcome)
            .collect();
        assert_eq!(outcomes, vec![T, T, T, N, T, T, T, N]);
    }

    #[test]
    fn pattern_repeats_in_order() {
        let trace = SyntheticTrace::pattern(0x1000, &[T, N], 2);
        let outcomes: Vec<Outcome> = trace.as_slice()
            .iter()
            .map(|r| r.outcome)
            .collect();
        assert_eq!(outcomes, vec![T, N, T, N]);
        assert!(trace.as_slice().iter().all(|r| r.is_conditional()));
    }

    #[test]
    fn random_workload_is_reproducible() {
        let a = SyntheticTrace::random_workload(8, 64, 0x1234);
        let b = SyntheticTrace::random_workload(8, 64, 0x1234);
        assert_eq!(a.as_slice(), b.as_slice());
        assert_eq!(a.num_entries(), 64);
    }
}


//! Implementation of a two-level adaptive branch-direction predictor.
//!
//! See "Alternative Implementations of Two-Level Adaptive Branch Prediction"
//! (Yeh and Patt, 1992).

use crate::branch::{BranchRecord, Outcome, RecoveryInfo};
use crate::history::HistoryRegister;
use crate::predictor::hrt::*;
use crate::predictor::pht::PatternHistoryTable;
use crate::predictor::{PredictorTable, StatefulPredictor};

/// Two-level predictor organizations.
///
/// The first letter selects the history scope (one **G**lobal register, or
/// one register **P**er branch address); the last selects the pattern table
/// shape (one **g**lobal table, or one row **p**er address).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Organization {
    Gag,
    Gap,
    Pag,
    Pap,
}

/// Storage strategies for per-address history registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryStorage {
    /// Direct-mapped, always-hit, aliasing on hash collisions
    Hashed,
    /// Set-associative LRU cache, tagged, allocate-on-access
    Associative,
}

/// Configuration for building a [`TwoLevelPredictor`].
#[derive(Clone, Copy, Debug)]
pub struct TwoLevelConfig {
    /// The active organization
    pub organization: Organization,

    /// How per-address history is stored (ignored by Gag/Gap)
    pub storage: HistoryStorage,

    /// History length in bits
    pub history_len: usize,

    /// Number of low address bits selecting a pattern table row
    pub address_bits: usize,

    /// Number of per-address history registers
    pub table_capacity: usize,

    /// Ways per set in the associative history table
    pub associativity: usize,
}

impl TwoLevelConfig {
    /// Use this configuration to create a new [`TwoLevelPredictor`].
    ///
    /// Building the predictor allocates and zero-initializes every table and
    /// register for the selected organization.
    pub fn build(self) -> TwoLevelPredictor {
        let rows = match self.organization {
            Organization::Gag | Organization::Pag => 1,
            Organization::Gap | Organization::Pap => 1 << self.address_bits,
        };
        let cols = 1 << self.history_len;

        let history = match self.organization {
            Organization::Gag | Organization::Gap => {
                HistorySource::Global(HistoryRegister::new(self.history_len))
            }
            Organization::Pag | Organization::Pap => match self.storage {
                HistoryStorage::Hashed => HistorySource::Hashed(
                    HashedHistoryTable::new(self.table_capacity, self.history_len),
                ),
                HistoryStorage::Associative => HistorySource::Associative(
                    AssociativeHistoryTable::new(
                        self.table_capacity,
                        self.associativity,
                        self.history_len,
                    ),
                ),
            },
        };

        TwoLevelPredictor {
            cfg: self,
            pht: PatternHistoryTable::new(rows, cols),
            history,
        }
    }
}

/// The structure supplying the history value for a prediction, resolved once
/// at build time from the configured organization and storage strategy.
enum HistorySource {
    Global(HistoryRegister),
    Hashed(HashedHistoryTable),
    Associative(AssociativeHistoryTable),
}

impl HistorySource {
    /// Resolve the history value used to index the pattern table.
    /// May allocate a line in the associative table.
    fn read(&mut self, pc: usize) -> usize {
        match self {
            Self::Global(ghr) => ghr.value(),
            Self::Hashed(hhrt) => hhrt.read(pc),
            Self::Associative(ahrt) => ahrt.read(pc),
        }
    }

    /// Shift a resolved outcome into the backing history register.
    fn commit(&mut self, pc: usize, outcome: Outcome) {
        match self {
            Self::Global(ghr) => ghr.shift_in(outcome),
            Self::Hashed(hhrt) => hhrt.commit(pc, outcome),
            Self::Associative(ahrt) => ahrt.commit(pc, outcome),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Global(ghr) => ghr.clear(),
            Self::Hashed(hhrt) => hhrt.reset(),
            Self::Associative(ahrt) => ahrt.reset(),
        }
    }
}

/// A two-level adaptive branch-direction predictor.
///
/// One instance owns all predictor state for a single simulated core. Hosts
/// simulating multiple cores build one instance per core; sharing an
/// instance cross-pollutes histories between cores.
pub struct TwoLevelPredictor {
    cfg: TwoLevelConfig,
    pht: PatternHistoryTable,
    history: HistorySource,
}

impl TwoLevelPredictor {
    /// Predict the direction of a branch.
    ///
    /// Any record may be queried, conditional or not. Under the associative
    /// history storage, looking up an untracked address allocates a line for
    /// it; no other state changes.
    pub fn predict(&mut self, op: &BranchRecord) -> Outcome {
        let history = self.history.read(op.pc);
        self.pht.get_entry((op.pc, history)).predict()
    }

    /// Learn the resolved outcome of a branch. Records that are not
    /// conditional branches are ignored.
    ///
    /// The pattern table counter is adjusted before the outcome is shifted
    /// into the history register, so the adjustment lands on the counter
    /// selected by the pre-outcome history.
    pub fn update(&mut self, op: &BranchRecord) {
        if !op.is_conditional() {
            return;
        }
        let history = self.history.read(op.pc);
        self.pht.get_entry_mut((op.pc, history)).update(op.outcome);
        self.history.commit(op.pc, op.outcome);
    }

    /// Restore the predictor to its initial state.
    pub fn reset(&mut self) {
        self.pht.reset();
        self.history.reset();
    }

    /// Return the configuration used to build this predictor.
    pub fn config(&self) -> &TwoLevelConfig {
        &self.cfg
    }

    // Host-pipeline lifecycle hooks. This core keeps no speculative state,
    // so these accept the call and do nothing.

    pub fn timestamp(&mut self, _op: &BranchRecord) {}
    pub fn speculative_update(&mut self, _op: &BranchRecord) {}
    pub fn retire(&mut self, _op: &BranchRecord) {}
    pub fn recover(&mut self, _info: &RecoveryInfo) {}

    /// Report whether predictor structures need to drain before accepting
    /// more work. There are no such structures in this core.
    pub fn full(&self, _core_id: usize) -> bool {
        false
    }
}

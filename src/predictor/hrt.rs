//! History register tables: bounded storage for per-address branch history.

use crate::branch::Outcome;
use crate::history::HistoryRegister;

/// Interface to a table of per-address history registers.
///
/// `read` takes `&mut self` because a bounded table is allowed to allocate
/// storage for a previously-untracked address during the lookup.
pub trait HistoryTable {
    /// Returns the number of history registers the table can hold.
    fn capacity(&self) -> usize;

    /// Return the history value tracked for this address.
    fn read(&mut self, pc: usize) -> usize;

    /// Shift a resolved outcome into the history tracked for this address.
    fn commit(&mut self, pc: usize, outcome: Outcome);

    /// Reset every tracked history.
    fn reset(&mut self);
}

/// A direct-mapped table of history registers, indexed by hashing the branch
/// address.
///
/// Lookups always hit: two addresses that hash to the same slot silently
/// share one history register.
pub struct HashedHistoryTable {
    data: Vec<HistoryRegister>,
}

impl HashedHistoryTable {
    pub fn new(capacity: usize, history_len: usize) -> Self {
        assert!(capacity > 0);
        Self {
            data: vec![HistoryRegister::new(history_len); capacity],
        }
    }

    fn hash(&self, pc: usize) -> usize {
        pc % self.data.len()
    }
}

impl HistoryTable for HashedHistoryTable {
    fn capacity(&self) -> usize { self.data.len() }

    fn read(&mut self, pc: usize) -> usize {
        let index = self.hash(pc);
        self.data[index].value()
    }

    fn commit(&mut self, pc: usize, outcome: Outcome) {
        let index = self.hash(pc);
        self.data[index].shift_in(outcome);
    }

    fn reset(&mut self) {
        for reg in self.data.iter_mut() {
            reg.clear();
        }
    }
}

/// A line in an [`AssociativeHistoryTable`].
#[derive(Clone, Debug)]
struct HistoryLine {
    tag: usize,
    history: HistoryRegister,
    valid: bool,
    last_used: u64,
}

/// A set-associative, LRU-managed cache of history registers.
///
/// The cache holds `capacity / ways` sets. The set index comes from the low
/// address bits and the tag from the remaining high bits. A lookup that
/// misses allocates a line for the address with zero history, so the commit
/// that immediately follows a read of the same address observes a hit.
pub struct AssociativeHistoryTable {
    /// Cache lines, indexed by `set * ways + way`
    lines: Vec<HistoryLine>,
    sets: usize,
    ways: usize,

    /// Logical time, bumped on every cache touch
    clk: u64,
}

impl AssociativeHistoryTable {
    pub fn new(capacity: usize, ways: usize, history_len: usize) -> Self {
        assert!(ways > 0 && capacity % ways == 0);
        let sets = capacity / ways;
        assert!(sets.is_power_of_two());

        let line = HistoryLine {
            tag: 0,
            history: HistoryRegister::new(history_len),
            valid: false,
            last_used: 0,
        };
        Self {
            lines: vec![line; capacity],
            sets,
            ways,
            clk: 0,
        }
    }

    pub fn sets(&self) -> usize { self.sets }
    pub fn ways(&self) -> usize { self.ways }

    fn set_index(&self, pc: usize) -> usize {
        pc & (self.sets - 1)
    }

    fn tag(&self, pc: usize) -> usize {
        pc >> self.sets.trailing_zeros()
    }

    /// Scan the addressed set for a valid line with a matching tag.
    fn probe(&self, pc: usize) -> Option<usize> {
        let base = self.set_index(pc) * self.ways;
        let tag = self.tag(pc);
        (base..base + self.ways)
            .find(|&idx| self.lines[idx].valid && self.lines[idx].tag == tag)
    }

    /// Select a victim line in the addressed set: the first invalid way if
    /// one exists, otherwise the least-recently-used way.
    fn victim(&self, pc: usize) -> usize {
        let base = self.set_index(pc) * self.ways;
        let mut victim = base;
        let mut oldest = u64::MAX;
        for idx in base..base + self.ways {
            if !self.lines[idx].valid {
                return idx;
            }
            if self.lines[idx].last_used < oldest {
                oldest = self.lines[idx].last_used;
                victim = idx;
            }
        }
        victim
    }

    /// Find the line tracking this address, allocating one on a miss.
    /// Every call counts as a cache touch and refreshes the line's timestamp.
    fn lookup(&mut self, pc: usize) -> usize {
        self.clk += 1;
        let index = match self.probe(pc) {
            Some(index) => index,
            None => {
                let tag = self.tag(pc);
                let index = self.victim(pc);
                let line = &mut self.lines[index];
                line.tag = tag;
                line.history.clear();
                line.valid = true;
                index
            }
        };
        self.lines[index].last_used = self.clk;
        index
    }
}

impl HistoryTable for AssociativeHistoryTable {
    fn capacity(&self) -> usize { self.lines.len() }

    fn read(&mut self, pc: usize) -> usize {
        let index = self.lookup(pc);
        self.lines[index].history.value()
    }

    // The commit re-probes instead of reusing the line located by a prior
    // read. If another address evicted that line in the meantime, the commit
    // lands on a freshly-allocated zero history.
    fn commit(&mut self, pc: usize, outcome: Outcome) {
        let index = self.lookup(pc);
        self.lines[index].history.shift_in(outcome);
    }

    fn reset(&mut self) {
        for line in self.lines.iter_mut() {
            line.valid = false;
            line.history.clear();
            line.last_used = 0;
        }
        self.clk = 0;
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hashed_table_aliases_congruent_addresses() {
        let mut hhrt = HashedHistoryTable::new(16, 4);
        hhrt.commit(0x10, Outcome::T);
        assert_eq!(hhrt.read(0x10), 0b1);

        // 0x10 and 0x20 are congruent mod 16 and share one register
        assert_eq!(hhrt.read(0x20), 0b1);
        hhrt.commit(0x20, Outcome::T);
        assert_eq!(hhrt.read(0x10), 0b11);

        // A non-congruent address keeps its own register
        assert_eq!(hhrt.read(0x11), 0);
    }

    #[test]
    fn associative_table_keeps_histories_apart_without_pressure() {
        // 4 sets x 2 ways; 0x10 and 0x20 both land in set 0
        let mut ahrt = AssociativeHistoryTable::new(8, 2, 4);
        ahrt.commit(0x10, Outcome::T);
        ahrt.commit(0x20, Outcome::T);
        ahrt.commit(0x10, Outcome::T);
        assert_eq!(ahrt.read(0x10), 0b11);
        assert_eq!(ahrt.read(0x20), 0b1);
    }

    #[test]
    fn read_allocates_so_the_following_commit_hits() {
        let mut ahrt = AssociativeHistoryTable::new(8, 2, 4);
        assert_eq!(ahrt.read(0x10), 0);
        ahrt.commit(0x10, Outcome::T);
        assert_eq!(ahrt.read(0x10), 0b1);
    }

    #[test]
    fn lru_evicts_the_coldest_way() {
        // 4 sets x 2 ways; 0x10, 0x20, 0x30 all land in set 0
        let mut ahrt = AssociativeHistoryTable::new(8, 2, 4);
        ahrt.commit(0x10, Outcome::T);
        ahrt.commit(0x20, Outcome::T);
        ahrt.commit(0x30, Outcome::T);

        // The two most recent stay warm
        assert_eq!(ahrt.read(0x20), 0b1);
        assert_eq!(ahrt.read(0x30), 0b1);

        // 0x10 was evicted; touching it again observes a cold history
        assert_eq!(ahrt.read(0x10), 0);
    }

    #[test]
    fn commit_after_eviction_starts_from_zero_history() {
        let mut ahrt = AssociativeHistoryTable::new(8, 2, 4);
        ahrt.commit(0x10, Outcome::T);
        ahrt.commit(0x10, Outcome::T);
        assert_eq!(ahrt.read(0x10), 0b11);

        // Two other addresses in set 0 push 0x10 out
        ahrt.commit(0x20, Outcome::T);
        ahrt.commit(0x30, Outcome::T);

        // The re-probe misses, so the commit lands on a fresh zero history
        ahrt.commit(0x10, Outcome::N);
        assert_eq!(ahrt.read(0x10), 0);
    }

    #[test]
    fn capacity_reflects_sets_times_ways() {
        let ahrt = AssociativeHistoryTable::new(64, 4, 8);
        assert_eq!(ahrt.capacity(), 64);
        assert_eq!(ahrt.sets(), 16);
        assert_eq!(ahrt.ways(), 4);
    }
}


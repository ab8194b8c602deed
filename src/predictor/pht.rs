//! Implementations of a pattern history table (PHT).

use crate::predictor::counter::SaturatingCounter;
use crate::predictor::table::PredictorTable;
use crate::predictor::StatefulPredictor;

/// A table of [`SaturatingCounter`] indexed by a history value and,
/// optionally, by low branch-address bits.
///
/// Rows select on the address axis and columns on the history axis. The 1-D
/// organizations use a single row. All rows live in one flat allocation,
/// indexed as `row * cols + col`.
pub struct PatternHistoryTable {
    /// Table of counters, `rows * cols` entries
    data: Vec<SaturatingCounter>,

    /// Number of rows (the address axis)
    rows: usize,

    /// Number of columns (the history axis)
    cols: usize,
}

impl PatternHistoryTable {
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows.is_power_of_two() && cols.is_power_of_two());
        Self {
            data: vec![SaturatingCounter::new(); rows * cols],
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }

    /// Reset every counter to its initial state.
    pub fn reset(&mut self) {
        for ctr in self.data.iter_mut() {
            ctr.reset();
        }
    }
}

impl PredictorTable for PatternHistoryTable {
    /// An `(address, history)` pair. The address is masked down to the row
    /// axis and the history value to the column axis, so any input selects a
    /// valid entry.
    type Input = (usize, usize);
    type Entry = SaturatingCounter;

    fn size(&self) -> usize { self.rows * self.cols }

    fn get_index(&self, (addr, history): (usize, usize)) -> usize {
        let row = addr & (self.rows - 1);
        let col = history & (self.cols - 1);
        row * self.cols + col
    }

    fn get_entry(&self, input: (usize, usize)) -> &SaturatingCounter {
        &self.data[self.get_index(input)]
    }

    fn get_entry_mut(&mut self, input: (usize, usize)) -> &mut SaturatingCounter {
        let index = self.get_index(input);
        &mut self.data[index]
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::branch::Outcome;

    #[test]
    fn rows_and_columns_do_not_alias() {
        let mut pht = PatternHistoryTable::new(4, 8);
        pht.get_entry_mut((1, 2)).update(Outcome::T);
        assert_eq!(pht.get_entry((1, 2)).predict(), Outcome::T);
        assert_eq!(pht.get_entry((2, 1)).predict(), Outcome::N);
        assert_eq!(pht.get_entry((1, 3)).predict(), Outcome::N);
        assert_eq!(pht.get_entry((0, 2)).predict(), Outcome::N);
    }

    #[test]
    fn inputs_are_masked_to_the_table_shape() {
        let pht = PatternHistoryTable::new(4, 8);
        assert_eq!(pht.get_index((5, 9)), pht.get_index((1, 1)));
        assert_eq!(pht.get_index((4, 8)), pht.get_index((0, 0)));
    }

    #[test]
    fn single_row_table_ignores_the_address() {
        let mut pht = PatternHistoryTable::new(1, 4);
        pht.get_entry_mut((0xdead, 2)).update(Outcome::T);
        assert_eq!(pht.get_entry((0xbeef, 2)).predict(), Outcome::T);
    }

    #[test]
    fn reset_restores_cold_counters() {
        let mut pht = PatternHistoryTable::new(2, 4);
        pht.get_entry_mut((1, 1)).update(Outcome::T);
        pht.reset();
        assert_eq!(pht.get_entry((1, 1)).value(), 1);
    }
}


//! Types for representing branches and branch outcomes.

/// A branch outcome.
#[repr(u32)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    /// Not taken
    N = 0,
    /// Taken
    T = 1,
}

impl std::fmt::Debug for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::T => "t",
            Self::N => "n",
        };
        write!(f, "{}", s)
    }
}

impl std::ops::Not for Outcome {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::N => Self::T,
            Self::T => Self::N,
        }
    }
}

impl From<bool> for Outcome {
    fn from(x: bool) -> Self {
        match x {
            true => Self::T,
            false => Self::N,
        }
    }
}
impl From<Outcome> for bool {
    fn from(x: Outcome) -> Self {
        match x {
            Outcome::T => true,
            Outcome::N => false,
        }
    }
}

/// The kind of control-flow instruction reported by the host pipeline.
///
/// Only conditional branches participate in predictor training; the other
/// kinds may still be queried for a prediction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BranchKind {
    /// A direct conditional branch instruction.
    DirectBranch,

    /// A direct unconditional jump instruction.
    DirectJump,

    /// An indirect unconditional jump instruction.
    IndirectJump,

    /// A direct procedure call instruction.
    DirectCall,

    /// An indirect procedure call instruction.
    IndirectCall,

    /// A return instruction.
    Return,
}

/// A record of branch execution, as reported by the host pipeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BranchRecord {
    /// The program counter value for this branch
    pub pc: usize,

    /// The target address evaluated for this branch
    pub tgt: usize,

    /// The resolved outcome for this branch
    pub outcome: Outcome,

    /// The type/kind of branch
    pub kind: BranchKind,
}
impl BranchRecord {
    /// Returns 'true' if this is a conditional branch instruction.
    pub fn is_conditional(&self) -> bool {
        matches!(self.kind, BranchKind::DirectBranch)
    }

    /// Returns 'true' if this is an unconditional instruction.
    pub fn is_unconditional(&self) -> bool {
        !self.is_conditional()
    }
}

/// Rollback information passed along with the host pipeline's recovery hook.
/// Carried only to satisfy the host interface; the predictor core keeps no
/// speculative state of its own.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RecoveryInfo {
    /// The program counter value for the mispredicted branch
    pub pc: usize,

    /// The resolved outcome for the mispredicted branch
    pub outcome: Outcome,
}


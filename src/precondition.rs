//! Predicates over a world state that gate actions and define goals.

use std::fmt;
use std::iter;

use crate::error::Result;
use crate::symbol::SymbolId;
use crate::world_state::WorldState;

/// A condition on the value of a single symbol.
///
/// Evaluation is pure. A precondition on a symbol the state does not contain
/// is a modelling error, not a false result.
///
/// # Examples
///
/// ```
/// use forward_goap::{Precondition, WorldState};
///
/// let state = WorldState::builder()
///     .set_symbol("HasAxe", 1)
///     .set_symbol("Wood", 3)
///     .build();
///
/// assert!(Precondition::is_true("HasAxe").is_satisfied_by(&state).unwrap());
/// assert!(!Precondition::is_not_smaller("Wood", 5).is_satisfied_by(&state).unwrap());
/// assert!(Precondition::is_false("Iron").is_satisfied_by(&state).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Precondition {
    /// Holds when the value is non-zero
    IsTrue(SymbolId),
    /// Holds when the value is zero
    IsFalse(SymbolId),
    /// Holds when the value is at least `threshold`
    IsNotSmaller { symbol: SymbolId, threshold: i64 },
}

impl Precondition {
    pub fn is_true(symbol: impl Into<SymbolId>) -> Self {
        Self::IsTrue(symbol.into())
    }

    pub fn is_false(symbol: impl Into<SymbolId>) -> Self {
        Self::IsFalse(symbol.into())
    }

    pub fn is_not_smaller(symbol: impl Into<SymbolId>, threshold: i64) -> Self {
        Self::IsNotSmaller {
            symbol: symbol.into(),
            threshold,
        }
    }

    /// The symbol this precondition reads.
    pub fn symbol(&self) -> &SymbolId {
        match self {
            Self::IsTrue(symbol) | Self::IsFalse(symbol) => symbol,
            Self::IsNotSmaller { symbol, .. } => symbol,
        }
    }

    pub fn relevant_symbols(&self) -> impl Iterator<Item = &SymbolId> + '_ {
        iter::once(self.symbol())
    }

    pub fn is_satisfied_by(&self, state: &WorldState) -> Result<bool> {
        let value = state.symbol_value(self.symbol())?;
        Ok(match self {
            Self::IsTrue(_) => value != 0,
            Self::IsFalse(_) => value == 0,
            Self::IsNotSmaller { threshold, .. } => value >= *threshold,
        })
    }

    /// How far `state` is from satisfying this precondition.
    ///
    /// Zero exactly when satisfied. A violated boolean counts as one, a
    /// violated threshold counts the missing amount.
    pub fn distance_from(&self, state: &WorldState) -> Result<f64> {
        let value = state.symbol_value(self.symbol())?;
        Ok(match self {
            Self::IsTrue(_) if value == 0 => 1.0,
            Self::IsFalse(_) if value != 0 => 1.0,
            Self::IsNotSmaller { threshold, .. } if value < *threshold => {
                (i128::from(*threshold) - i128::from(value)) as f64
            }
            _ => 0.0,
        })
    }
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IsTrue(symbol) => write!(f, "{} is true", symbol),
            Self::IsFalse(symbol) => write!(f, "{} is false", symbol),
            Self::IsNotSmaller { symbol, threshold } => write!(f, "{} >= {}", symbol, threshold),
        }
    }
}

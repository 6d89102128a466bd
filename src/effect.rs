//! Pure transformations of a world state.

use std::fmt;
use std::iter;

use crate::error::{GoapError, Result};
use crate::symbol::SymbolId;
use crate::world_state::WorldState;

/// A change to the value of a single symbol.
///
/// Applying an effect never alters its input; it returns a new snapshot.
/// The target symbol must already be present, even for the `Set*` variants.
///
/// # Examples
///
/// ```
/// use forward_goap::{Effect, SymbolId, WorldState};
///
/// let wood = SymbolId::new("Wood");
/// let before = WorldState::builder().set_symbol(wood.clone(), 2).build();
/// let after = Effect::add(wood.clone(), 8).apply_to(&before).unwrap();
///
/// assert_eq!(before.symbol_value(&wood).unwrap(), 2);
/// assert_eq!(after.symbol_value(&wood).unwrap(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Effect {
    SetTrue(SymbolId),
    SetFalse(SymbolId),
    Add { symbol: SymbolId, delta: i64 },
    Subtract { symbol: SymbolId, delta: i64 },
}

impl Effect {
    pub fn set_true(symbol: impl Into<SymbolId>) -> Self {
        Self::SetTrue(symbol.into())
    }

    pub fn set_false(symbol: impl Into<SymbolId>) -> Self {
        Self::SetFalse(symbol.into())
    }

    pub fn add(symbol: impl Into<SymbolId>, delta: i64) -> Self {
        Self::Add {
            symbol: symbol.into(),
            delta,
        }
    }

    pub fn subtract(symbol: impl Into<SymbolId>, delta: i64) -> Self {
        Self::Subtract {
            symbol: symbol.into(),
            delta,
        }
    }

    /// The symbol this effect writes.
    pub fn symbol(&self) -> &SymbolId {
        match self {
            Self::SetTrue(symbol) | Self::SetFalse(symbol) => symbol,
            Self::Add { symbol, .. } | Self::Subtract { symbol, .. } => symbol,
        }
    }

    pub fn relevant_symbols(&self) -> impl Iterator<Item = &SymbolId> + '_ {
        iter::once(self.symbol())
    }

    /// Computes the value this effect writes, given the symbol's current value.
    fn resulting_value(&self, current: i64) -> Result<i64> {
        let overflow = |delta: i64| GoapError::ValueOverflow {
            symbol: self.symbol().clone(),
            value: current,
            delta,
        };
        match self {
            Self::SetTrue(_) => Ok(1),
            Self::SetFalse(_) => Ok(0),
            Self::Add { delta, .. } => current.checked_add(*delta).ok_or_else(|| overflow(*delta)),
            Self::Subtract { delta, .. } => current
                .checked_sub(*delta)
                .ok_or_else(|| overflow(delta.saturating_neg())),
        }
    }

    /// Returns a new state with this effect applied to `state`.
    ///
    /// # Errors
    ///
    /// - [`GoapError::SymbolNotPresent`] if `state` lacks the target symbol
    /// - [`GoapError::ValueOverflow`] if the arithmetic leaves the `i64` range
    pub fn apply_to(&self, state: &WorldState) -> Result<WorldState> {
        let current = state.symbol_value(self.symbol())?;
        let value = self.resulting_value(current)?;
        Ok(state
            .build_upon()
            .set_symbol(self.symbol().clone(), value)
            .build())
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetTrue(symbol) => write!(f, "{} = true", symbol),
            Self::SetFalse(symbol) => write!(f, "{} = false", symbol),
            Self::Add { symbol, delta } => write!(f, "{} += {}", symbol, delta),
            Self::Subtract { symbol, delta } => write!(f, "{} -= {}", symbol, delta),
        }
    }
}

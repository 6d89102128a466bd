//! Sources of symbol values the planner has not loaded yet.
//!
//! Before searching, the planner asks a [`KnowledgeProvider`] for the current
//! value of every symbol its actions and goal mention. Anything that can
//! answer "what is the value of this symbol?" can act as a provider:
//!
//! - a [`WorldState`] snapshot,
//! - a `HashMap` or `BTreeMap` from symbol to value,
//! - a closure, wrapped in [`FnKnowledgeProvider`].
//!
//! # Example
//!
//! ```
//! use forward_goap::{FnKnowledgeProvider, KnowledgeProvider, SymbolId};
//!
//! let sensor = FnKnowledgeProvider::new(|symbol: &SymbolId| symbol.name().len() as i64);
//! assert_eq!(sensor.symbol_value(&SymbolId::new("Wood")).unwrap(), 4);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::{GoapError, Result};
use crate::symbol::SymbolId;
use crate::world_state::WorldState;

/// Supplies the current value of a symbol.
///
/// Providers should answer consistently for the duration of one plan
/// formulation; the planner fetches each symbol at most once per call.
pub trait KnowledgeProvider {
    /// # Errors
    ///
    /// Returns [`GoapError::SymbolNotPresent`] when the provider knows
    /// nothing about `symbol`.
    fn symbol_value(&self, symbol: &SymbolId) -> Result<i64>;
}

impl KnowledgeProvider for WorldState {
    fn symbol_value(&self, symbol: &SymbolId) -> Result<i64> {
        WorldState::symbol_value(self, symbol)
    }
}

impl<S: std::hash::BuildHasher> KnowledgeProvider for HashMap<SymbolId, i64, S> {
    fn symbol_value(&self, symbol: &SymbolId) -> Result<i64> {
        self.get(symbol)
            .copied()
            .ok_or_else(|| GoapError::SymbolNotPresent(symbol.clone()))
    }
}

impl KnowledgeProvider for BTreeMap<SymbolId, i64> {
    fn symbol_value(&self, symbol: &SymbolId) -> Result<i64> {
        self.get(symbol)
            .copied()
            .ok_or_else(|| GoapError::SymbolNotPresent(symbol.clone()))
    }
}

/// Adapts a closure into a [`KnowledgeProvider`] that always has an answer.
pub struct FnKnowledgeProvider<F> {
    f: F,
}

impl<F> FnKnowledgeProvider<F>
where
    F: Fn(&SymbolId) -> i64,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> KnowledgeProvider for FnKnowledgeProvider<F>
where
    F: Fn(&SymbolId) -> i64,
{
    fn symbol_value(&self, symbol: &SymbolId) -> Result<i64> {
        Ok((self.f)(symbol))
    }
}

impl<F> fmt::Debug for FnKnowledgeProvider<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnKnowledgeProvider").finish_non_exhaustive()
    }
}

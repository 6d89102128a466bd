//! Immutable world state representation.
//!
//! A [`WorldState`] assigns an integer value to each of a set of
//! [`SymbolId`]s. Snapshots are never changed in place: every modification
//! goes through a [`WorldStateBuilder`] obtained from
//! [`WorldState::build_upon`], which yields a fresh snapshot and leaves the
//! original untouched.
//!
//! Snapshots share their storage. Cloning a state, or building upon it
//! without setting anything, costs a reference-count increment; the first
//! `set_symbol` on a builder copies the map once.
//!
//! # Example
//!
//! ```
//! use forward_goap::{SymbolId, WorldState};
//!
//! let wood = SymbolId::new("Wood");
//! let initial = WorldState::builder()
//!     .set_symbol(wood.clone(), 0)
//!     .set_symbol("HasAxe", 1)
//!     .build();
//!
//! let after_chopping = initial.build_upon().set_symbol(wood.clone(), 8).build();
//!
//! assert_eq!(initial.symbol_value(&wood).unwrap(), 0);
//! assert_eq!(after_chopping.symbol_value(&wood).unwrap(), 8);
//! assert!(initial.symbol_value(&SymbolId::new("Iron")).is_err());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{GoapError, Result};
use crate::symbol::SymbolId;

/// An immutable mapping from symbols to integer values.
///
/// Two states are equal, and hash identically, when they contain exactly the
/// same symbol/value pairs. An absent symbol is never treated as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WorldState {
    symbols: Arc<BTreeMap<SymbolId, i64>>,
}

impl WorldState {
    /// Creates an empty world state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts building a state from scratch.
    pub fn builder() -> WorldStateBuilder {
        WorldStateBuilder::default()
    }

    /// Starts building a new state that begins as a copy of this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_goap::{SymbolId, WorldState};
    ///
    /// let stone = SymbolId::new("Stone");
    /// let base = WorldState::builder().set_symbol(stone.clone(), 2).build();
    /// let derived = base.build_upon().set_symbol(stone.clone(), 3).build();
    ///
    /// assert_eq!(base.symbol_value(&stone).unwrap(), 2);
    /// assert_eq!(derived.symbol_value(&stone).unwrap(), 3);
    /// ```
    pub fn build_upon(&self) -> WorldStateBuilder {
        WorldStateBuilder {
            symbols: Arc::clone(&self.symbols),
        }
    }

    pub fn contains(&self, symbol: &SymbolId) -> bool {
        self.symbols.contains_key(symbol)
    }

    /// Looks up the value of `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`GoapError::SymbolNotPresent`] if the state has no value for
    /// the symbol.
    pub fn symbol_value(&self, symbol: &SymbolId) -> Result<i64> {
        self.symbols
            .get(symbol)
            .copied()
            .ok_or_else(|| GoapError::SymbolNotPresent(symbol.clone()))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterates over symbol/value pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&SymbolId, i64)> + '_ {
        self.symbols.iter().map(|(symbol, value)| (symbol, *value))
    }

    pub fn symbols(&self) -> impl Iterator<Item = &SymbolId> + '_ {
        self.symbols.keys()
    }

    /// Whether `other` is the very same snapshot, not merely an equal one.
    pub fn shares_storage_with(&self, other: &WorldState) -> bool {
        Arc::ptr_eq(&self.symbols, &other.symbols)
    }
}

impl FromIterator<(SymbolId, i64)> for WorldState {
    fn from_iter<I: IntoIterator<Item = (SymbolId, i64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(WorldState::builder(), |builder, (symbol, value)| {
                builder.set_symbol(symbol, value)
            })
            .build()
    }
}

impl fmt::Display for WorldState {
    /// Renders the state as `{Symbol: value, ...}` in symbol order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (symbol, value) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", symbol, value)?;
            first = false;
        }
        write!(f, "}}")
    }
}

/// Transient builder producing exactly one new [`WorldState`].
///
/// `build` consumes the builder, so it cannot be reused afterwards.
/// Setting the same symbol twice keeps the last value.
#[derive(Debug, Default)]
#[must_use = "a builder does nothing until `build` is called"]
pub struct WorldStateBuilder {
    symbols: Arc<BTreeMap<SymbolId, i64>>,
}

impl WorldStateBuilder {
    pub fn set_symbol(mut self, symbol: impl Into<SymbolId>, value: i64) -> Self {
        Arc::make_mut(&mut self.symbols).insert(symbol.into(), value);
        self
    }

    pub fn build(self) -> WorldState {
        WorldState {
            symbols: self.symbols,
        }
    }
}

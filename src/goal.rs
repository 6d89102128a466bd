//! Goals: conjunctions of preconditions with a distance estimate.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::Result;
use crate::precondition::Precondition;
use crate::symbol::SymbolId;
use crate::world_state::WorldState;

/// A named conjunction of preconditions the planner tries to satisfy.
///
/// # Examples
///
/// ```
/// use forward_goap::{Goal, Precondition, WorldState};
///
/// let goal = Goal::new("GatherWood", vec![Precondition::is_not_smaller("Wood", 5)]);
/// let state = WorldState::builder().set_symbol("Wood", 2).build();
///
/// assert!(!goal.is_satisfied_by(&state).unwrap());
/// assert_eq!(goal.distance_from(&state).unwrap(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    name: String,
    preconditions: Vec<Precondition>,
    precondition_symbols: BTreeSet<SymbolId>,
}

impl Goal {
    pub fn new(name: impl Into<String>, preconditions: Vec<Precondition>) -> Self {
        let precondition_symbols = preconditions
            .iter()
            .flat_map(|precondition| precondition.relevant_symbols())
            .cloned()
            .collect();
        Self {
            name: name.into(),
            preconditions,
            precondition_symbols,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn preconditions(&self) -> &[Precondition] {
        &self.preconditions
    }

    /// Symbols read by any of the goal's preconditions.
    pub fn precondition_symbols(&self) -> &BTreeSet<SymbolId> {
        &self.precondition_symbols
    }

    pub fn is_satisfied_by(&self, state: &WorldState) -> Result<bool> {
        for precondition in &self.preconditions {
            if !precondition.is_satisfied_by(state)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Sum of the per-precondition distances.
    ///
    /// Zero exactly when `state` satisfies the goal. This guides the search but
    /// is not an admissible estimate of the remaining plan cost.
    pub fn distance_from(&self, state: &WorldState) -> Result<f64> {
        let mut total = 0.0;
        for precondition in &self.preconditions {
            total += precondition.distance_from(state)?;
        }
        Ok(total)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.name)?;
        for (i, precondition) in self.preconditions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", precondition)?;
        }
        write!(f, "]")
    }
}

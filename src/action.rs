//! # Planning actions
//!
//! A [`PlanningAction`] is a named, costed bundle of preconditions and
//! effects. The planner treats actions as pure data: it checks whether an
//! action is applicable to a hypothetical world state and computes the state
//! it would produce, without ever executing anything.
//!
//! ## Basic Usage
//!
//! ```
//! use forward_goap::{Effect, PlanningAction, Precondition, WorldState};
//!
//! let take_axe = PlanningAction::new(
//!     "TakeAxe",
//!     vec![
//!         Precondition::is_false("HasAxe"),
//!         Precondition::is_not_smaller("AxesAvailable", 1),
//!     ],
//!     vec![Effect::set_true("HasAxe"), Effect::subtract("AxesAvailable", 1)],
//!     1.0,
//! )
//! .unwrap();
//!
//! let state = WorldState::builder()
//!     .set_symbol("HasAxe", 0)
//!     .set_symbol("AxesAvailable", 1)
//!     .build();
//!
//! assert!(take_axe.is_applicable_to(&state).unwrap());
//! let next = take_axe.apply(&state).unwrap();
//! assert!(!take_axe.is_applicable_to(&next).unwrap());
//! ```

use std::collections::BTreeSet;
use std::fmt;

use crate::effect::Effect;
use crate::error::{GoapError, Result};
use crate::precondition::Precondition;
use crate::symbol::SymbolId;
use crate::world_state::WorldState;

/// An immutable action the planner may choose.
///
/// - Preconditions form a conjunction; an action without any is always
///   applicable.
/// - Effects are applied in declaration order, each to the result of the
///   previous one.
/// - The cost is a fixed, non-negative scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanningAction {
    name: String,
    preconditions: Vec<Precondition>,
    effects: Vec<Effect>,
    cost: f64,
}

impl PlanningAction {
    /// Creates a new action.
    ///
    /// # Errors
    ///
    /// Returns [`GoapError::InvalidActionCost`] if `cost` is negative, NaN
    /// or infinite.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_goap::{Effect, PlanningAction};
    ///
    /// let rest = PlanningAction::new("Rest", vec![], vec![Effect::set_false("Tired")], 0.0);
    /// assert!(rest.is_ok());
    ///
    /// let invalid = PlanningAction::new("Invalid", vec![], vec![], -1.0);
    /// assert!(invalid.is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        preconditions: Vec<Precondition>,
        effects: Vec<Effect>,
        cost: f64,
    ) -> Result<Self> {
        let name = name.into();
        if !cost.is_finite() || cost < 0.0 {
            return Err(GoapError::InvalidActionCost { action: name, cost });
        }

        Ok(Self {
            name,
            preconditions,
            effects,
            cost,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn preconditions(&self) -> &[Precondition] {
        &self.preconditions
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Every symbol read by a precondition or written by an effect.
    pub fn relevant_symbols(&self) -> BTreeSet<SymbolId> {
        self.preconditions
            .iter()
            .flat_map(|precondition| precondition.relevant_symbols())
            .chain(self.effects.iter().flat_map(|effect| effect.relevant_symbols()))
            .cloned()
            .collect()
    }

    /// Checks the preconditions in order, stopping at the first that fails.
    pub fn is_applicable_to(&self, state: &WorldState) -> Result<bool> {
        for precondition in &self.preconditions {
            if !precondition.is_satisfied_by(state)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Folds the effects over `state`. Applicability is not checked.
    pub fn apply(&self, state: &WorldState) -> Result<WorldState> {
        self.effects
            .iter()
            .try_fold(state.clone(), |current, effect| effect.apply_to(&current))
    }
}

impl fmt::Display for PlanningAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (cost {})", self.name, self.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cut_trees() -> PlanningAction {
        PlanningAction::new(
            "CutTrees",
            vec![Precondition::is_true("HasAxe")],
            vec![Effect::add("Wood", 8)],
            5.0,
        )
        .unwrap()
    }

    fn state(wood: i64, has_axe: i64) -> WorldState {
        WorldState::builder()
            .set_symbol("Wood", wood)
            .set_symbol("HasAxe", has_axe)
            .build()
    }

    #[test]
    fn test_invalid_action_cost() {
        for cost in [-1.0, f64::NAN, f64::INFINITY] {
            let result = PlanningAction::new("invalid_action", vec![], vec![], cost);
            assert!(matches!(result, Err(GoapError::InvalidActionCost { .. })));
        }
        assert!(PlanningAction::new("free", vec![], vec![], 0.0).is_ok());
    }

    #[test]
    fn test_empty_preconditions_always_applicable() {
        let action = PlanningAction::new("Wait", vec![], vec![], 1.0).unwrap();
        assert!(action.is_applicable_to(&WorldState::new()).unwrap());
    }

    #[test]
    fn test_conjunction() {
        let action = PlanningAction::new(
            "BuildHouse",
            vec![
                Precondition::is_not_smaller("Wood", 20),
                Precondition::is_true("HasAxe"),
            ],
            vec![],
            30.0,
        )
        .unwrap();

        assert!(action.is_applicable_to(&state(20, 1)).unwrap());
        assert!(!action.is_applicable_to(&state(19, 1)).unwrap());
        assert!(!action.is_applicable_to(&state(20, 0)).unwrap());
    }

    #[test]
    fn test_conjunction_short_circuits() {
        // The second precondition reads a missing symbol but is never reached.
        let action = PlanningAction::new(
            "Gated",
            vec![Precondition::is_true("HasAxe"), Precondition::is_true("Missing")],
            vec![],
            1.0,
        )
        .unwrap();
        assert!(!action.is_applicable_to(&state(0, 0)).unwrap());
        assert!(action.is_applicable_to(&state(0, 1)).is_err());
    }

    #[test]
    fn test_effects_apply_in_order() {
        let action = PlanningAction::new(
            "Juggle",
            vec![],
            vec![
                Effect::set_true("Wood"),
                Effect::add("Wood", 4),
                Effect::subtract("Wood", 2),
            ],
            1.0,
        )
        .unwrap();
        let next = action.apply(&state(10, 0)).unwrap();
        assert_eq!(next.symbol_value(&SymbolId::new("Wood")).unwrap(), 3);
    }

    #[test]
    fn test_apply_does_not_touch_input() {
        let s = state(0, 1);
        let next = cut_trees().apply(&s).unwrap();
        assert_eq!(s.symbol_value(&SymbolId::new("Wood")).unwrap(), 0);
        assert_eq!(next.symbol_value(&SymbolId::new("Wood")).unwrap(), 8);
    }

    #[test]
    fn test_relevant_symbols_union() {
        let action = PlanningAction::new(
            "TakeAxe",
            vec![
                Precondition::is_false("HasAxe"),
                Precondition::is_not_smaller("AxesAvailable", 1),
            ],
            vec![Effect::set_true("HasAxe"), Effect::subtract("AxesAvailable", 1)],
            1.0,
        )
        .unwrap();

        let symbols: Vec<_> = action
            .relevant_symbols()
            .into_iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(symbols, vec!["AxesAvailable", "HasAxe"]);
    }
}

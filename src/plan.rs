//! The result of a successful plan formulation.

use std::fmt;

use crate::action::PlanningAction;
use crate::error::{GoapError, Result};
use crate::goal::Goal;
use crate::world_state::WorldState;

/// An ordered, costed sequence of action names.
///
/// # Examples
///
/// ```
/// use forward_goap::{Plan, PlanningAction};
///
/// let take_axe = PlanningAction::new("TakeAxe", vec![], vec![], 1.0).unwrap();
/// let cut_trees = PlanningAction::new("CutTrees", vec![], vec![], 5.0).unwrap();
///
/// let plan = Plan::from_actions([&take_axe, &cut_trees]);
/// assert_eq!(plan.len(), 2);
/// assert_eq!(plan.cost(), 6.0);
/// assert_eq!(plan.to_string(), "Plan of length 2 and cost 6: TakeAxe -> CutTrees");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    actions: Vec<String>,
    cost: f64,
}

impl Plan {
    /// The empty plan, for a goal that already holds.
    pub fn empty() -> Self {
        Self {
            actions: Vec::new(),
            cost: 0.0,
        }
    }

    /// Builds a plan from actions in execution order, summing their costs.
    pub fn from_actions<'a, I>(actions: I) -> Self
    where
        I: IntoIterator<Item = &'a PlanningAction>,
    {
        actions
            .into_iter()
            .fold(Self::empty(), |mut plan, action| {
                plan.actions.push(action.name().to_string());
                plan.cost += action.cost();
                plan
            })
    }

    pub fn action_names(&self) -> &[String] {
        &self.actions
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.actions.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Replays the plan from `initial` and checks that it reaches `goal`.
    ///
    /// Each step is looked up by name in `actions`, must be applicable to the
    /// state produced by the previous step, and the final state must satisfy
    /// the goal.
    ///
    /// # Errors
    ///
    /// Returns [`GoapError::InvalidPlan`] describing the first failing step,
    /// or any modelling error raised while evaluating the actions.
    pub fn validate(
        &self,
        initial: &WorldState,
        actions: &[PlanningAction],
        goal: &Goal,
    ) -> Result<()> {
        let mut state = initial.clone();
        for (step, name) in self.iter().enumerate() {
            let action = actions
                .iter()
                .find(|action| action.name() == name)
                .ok_or_else(|| {
                    GoapError::InvalidPlan(format!("step {}: unknown action {}", step + 1, name))
                })?;
            if !action.is_applicable_to(&state)? {
                return Err(GoapError::InvalidPlan(format!(
                    "step {}: {} is not applicable to {}",
                    step + 1,
                    name,
                    state
                )));
            }
            state = action.apply(&state)?;
        }

        if !goal.is_satisfied_by(&state)? {
            return Err(GoapError::InvalidPlan(format!(
                "final state {} does not satisfy {}",
                state,
                goal.name()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plan of length {} and cost {}: ", self.len(), self.cost)?;
        if self.is_empty() {
            return write!(f, "(empty)");
        }
        write!(f, "{}", self.actions.join(" -> "))
    }
}

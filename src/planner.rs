//! # Forward planner
//!
//! The planner turns a goal, a catalog of actions and a source of current
//! symbol values into a [`Plan`]. It works in two phases:
//!
//! 1. **Seeding.** Every symbol mentioned by any action or by the goal is
//!    fetched once from the [`KnowledgeProvider`] into an initial
//!    [`WorldState`]. After this no further lookups happen.
//! 2. **Search.** A bounded best-first search runs forward from the initial
//!    state, expanding a state into one successor per applicable action,
//!    until a state satisfies the goal or a bound is hit.
//!
//! The search is guided by [`Goal::distance_from`], which is informative but
//! not admissible, so the plan found is the best the bounded search reached,
//! not necessarily the cheapest that exists.
//!
//! ## Basic Usage
//!
//! ```
//! use forward_goap::{
//!     Effect, ForwardPlanner, Goal, Planner, PlanningAction, Precondition, WorldState,
//! };
//!
//! let current = WorldState::builder()
//!     .set_symbol("Wood", 0)
//!     .set_symbol("HasAxe", 0)
//!     .set_symbol("AxesAvailable", 1)
//!     .build();
//!
//! let actions = vec![
//!     PlanningAction::new(
//!         "TakeAxe",
//!         vec![
//!             Precondition::is_false("HasAxe"),
//!             Precondition::is_not_smaller("AxesAvailable", 1),
//!         ],
//!         vec![Effect::set_true("HasAxe"), Effect::subtract("AxesAvailable", 1)],
//!         1.0,
//!     )
//!     .unwrap(),
//!     PlanningAction::new(
//!         "CutTrees",
//!         vec![Precondition::is_true("HasAxe")],
//!         vec![Effect::add("Wood", 8)],
//!         5.0,
//!     )
//!     .unwrap(),
//! ];
//!
//! let goal = Goal::new("GatherWood", vec![Precondition::is_not_smaller("Wood", 5)]);
//!
//! let planner = ForwardPlanner::default();
//! let plan = planner.formulate_plan(&current, &actions, &goal).unwrap();
//!
//! assert_eq!(plan.action_names(), &["TakeAxe", "CutTrees"]);
//! assert_eq!(plan.cost(), 6.0);
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use crate::action::PlanningAction;
use crate::error::{GoapError, Result};
use crate::forward::{ForwardEdge, ForwardNode, ForwardNodeExpander, GoalNode};
use crate::goal::Goal;
use crate::knowledge::KnowledgeProvider;
use crate::plan::Plan;
use crate::search::{AStarPathfinder, Heuristic, PathfinderConfig};
use crate::symbol::SymbolId;
use crate::world_state::WorldState;

/// Default bound on the number of actions in a plan.
pub const DEFAULT_MAX_PLAN_LENGTH: usize = 20;

/// Default wall-clock budget for one search.
pub const DEFAULT_SEARCH_TIME_LIMIT: Duration = Duration::from_millis(350);

/// Formulates plans that reach a goal from the current state of the world.
pub trait Planner {
    /// # Errors
    ///
    /// Returns [`GoapError::PlanNotFound`] when no plan within the planner's
    /// bounds satisfies `goal`. Modelling errors, such as a symbol the
    /// knowledge provider cannot supply, are returned unchanged.
    fn formulate_plan(
        &self,
        knowledge: &dyn KnowledgeProvider,
        actions: &[PlanningAction],
        goal: &Goal,
    ) -> Result<Plan>;
}

/// Bounds for a [`ForwardPlanner`].
///
/// # Examples
///
/// ```
/// use forward_goap::{ForwardPlanner, ForwardPlannerConfig};
/// use std::time::Duration;
///
/// let config = ForwardPlannerConfig::default()
///     .with_max_plan_length(8)
///     .with_search_time_limit(Duration::from_secs(1));
/// assert!(ForwardPlanner::new(config).is_ok());
///
/// let invalid = ForwardPlannerConfig::default().with_max_plan_length(0);
/// assert!(ForwardPlanner::new(invalid).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardPlannerConfig {
    /// Longest plan, in actions, the planner may return
    pub max_plan_length: usize,
    /// Wall-clock budget for one search
    pub search_time_limit: Duration,
}

impl ForwardPlannerConfig {
    pub fn with_max_plan_length(mut self, max_plan_length: usize) -> Self {
        self.max_plan_length = max_plan_length;
        self
    }

    pub fn with_search_time_limit(mut self, search_time_limit: Duration) -> Self {
        self.search_time_limit = search_time_limit;
        self
    }

    /// # Errors
    ///
    /// Returns [`GoapError::InvalidConfiguration`] if the plan length or
    /// time limit is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_plan_length == 0 {
            return Err(GoapError::InvalidConfiguration(
                "max_plan_length must be positive".to_string(),
            ));
        }
        if self.search_time_limit.is_zero() {
            return Err(GoapError::InvalidConfiguration(
                "search_time_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ForwardPlannerConfig {
    fn default() -> Self {
        Self {
            max_plan_length: DEFAULT_MAX_PLAN_LENGTH,
            search_time_limit: DEFAULT_SEARCH_TIME_LIMIT,
        }
    }
}

impl fmt::Display for ForwardPlannerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ForwardPlanner(max_plan_length = {}, search_time_limit = {:?})",
            self.max_plan_length, self.search_time_limit
        )
    }
}

/// Guides the search by how far a state is from satisfying the goal.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalDistanceHeuristic;

impl Heuristic<ForwardNode, GoalNode> for GoalDistanceHeuristic {
    fn estimate(&self, source: &ForwardNode, target: &GoalNode) -> Result<f64> {
        target.goal().distance_from(source.world_state())
    }
}

/// Plans by searching forward from the current world state.
///
/// Holds only immutable configuration, so one planner can serve any number
/// of independent, concurrent calls.
#[derive(Debug, Clone)]
pub struct ForwardPlanner {
    config: ForwardPlannerConfig,
    pathfinder: AStarPathfinder<GoalDistanceHeuristic>,
}

impl ForwardPlanner {
    /// # Errors
    ///
    /// Returns [`GoapError::InvalidConfiguration`] if `config` does not
    /// validate.
    pub fn new(config: ForwardPlannerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: ForwardPlannerConfig) -> Self {
        let pathfinder = AStarPathfinder::new(
            GoalDistanceHeuristic,
            PathfinderConfig::default()
                .with_max_depth(config.max_plan_length)
                .with_time_limit(config.search_time_limit),
        );
        Self { config, pathfinder }
    }

    pub fn config(&self) -> &ForwardPlannerConfig {
        &self.config
    }

    pub fn max_plan_length(&self) -> usize {
        self.config.max_plan_length
    }

    /// Builds the world state the search starts from.
    ///
    /// Contains every symbol relevant to any of `actions` or to `goal`, each
    /// fetched exactly once from `knowledge`.
    pub fn initial_world_state(
        knowledge: &dyn KnowledgeProvider,
        actions: &[PlanningAction],
        goal: &Goal,
    ) -> Result<WorldState> {
        let symbols: BTreeSet<SymbolId> = actions
            .iter()
            .flat_map(PlanningAction::relevant_symbols)
            .chain(goal.precondition_symbols().iter().cloned())
            .collect();

        let mut builder = WorldState::builder();
        for symbol in symbols {
            let value = knowledge.symbol_value(&symbol)?;
            builder = builder.set_symbol(symbol, value);
        }
        Ok(builder.build())
    }
}

impl Default for ForwardPlanner {
    fn default() -> Self {
        Self::from_valid_config(ForwardPlannerConfig::default())
    }
}

impl Planner for ForwardPlanner {
    fn formulate_plan(
        &self,
        knowledge: &dyn KnowledgeProvider,
        actions: &[PlanningAction],
        goal: &Goal,
    ) -> Result<Plan> {
        let initial_state = Self::initial_world_state(knowledge, actions, goal)?;
        log::debug!(
            "Planning for \"{}\" from {} seeded symbols with {} actions",
            goal.name(),
            initial_state.len(),
            actions.len()
        );

        let start = ForwardNode::new(initial_state, ForwardNodeExpander::new(actions.to_vec()));
        let target = GoalNode::new(goal.clone());

        match self.pathfinder.find_path(start, &target) {
            Ok(path) => {
                let plan = Plan::from_actions(path.edges().iter().map(ForwardEdge::action));
                log::info!(
                    "Found a plan of length {} and cost {} to satisfy \"{}\" after {} expansions",
                    plan.len(),
                    plan.cost(),
                    goal.name(),
                    path.expansions()
                );
                Ok(plan)
            }
            Err(GoapError::PathNotFound(cause)) => {
                log::warn!("No plan found to satisfy \"{}\": {}", goal.name(), cause);
                Err(GoapError::PlanNotFound {
                    planner: self.config,
                    max_plan_length: self.config.max_plan_length,
                    goal: Box::new(goal.clone()),
                    cause,
                })
            }
            Err(e) => Err(e),
        }
    }
}

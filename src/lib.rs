//! Forward-chaining Goal-Oriented Action Planning.
//!
//! Plans are found by a bounded best-first search from the current world
//! state towards a goal, applying one [`PlanningAction`] per step.

mod action;
mod effect;
mod error;
mod forward;
mod goal;
mod knowledge;
mod plan;
mod planner;
mod precondition;
pub mod search;
mod symbol;
mod world_state;

pub use action::PlanningAction;
pub use effect::Effect;
pub use error::{GoapError, Result};
pub use forward::{ForwardEdge, ForwardNode, ForwardNodeExpander, GoalNode};
pub use goal::Goal;
pub use knowledge::{FnKnowledgeProvider, KnowledgeProvider};
pub use plan::Plan;
pub use planner::{
    ForwardPlanner, ForwardPlannerConfig, GoalDistanceHeuristic, Planner,
    DEFAULT_MAX_PLAN_LENGTH, DEFAULT_SEARCH_TIME_LIMIT,
};
pub use precondition::Precondition;
pub use search::{AStarPathfinder, PathNotFound, PathNotFoundReason, ZeroHeuristic};
pub use symbol::SymbolId;
pub use world_state::{WorldState, WorldStateBuilder};

use thiserror::Error;

use crate::goal::Goal;
use crate::planner::ForwardPlannerConfig;
use crate::search::PathNotFound;
use crate::symbol::SymbolId;

/// Errors produced while modelling, searching and planning.
///
/// Only [`GoapError::PlanNotFound`] is an expected runtime outcome of
/// planning. The symbol and overflow variants signal a defect in the
/// supplied action or goal model and are passed through the planner as-is.
///
/// # Examples
///
/// ```
/// use forward_goap::{GoapError, SymbolId};
///
/// let error = GoapError::SymbolNotPresent(SymbolId::new("Wood"));
/// assert_eq!(error.to_string(), "Symbol not present in world state: Wood");
/// ```
#[derive(Error, Debug)]
pub enum GoapError {
    /// A precondition, effect or lookup referenced a symbol the world state lacks
    #[error("Symbol not present in world state: {0}")]
    SymbolNotPresent(SymbolId),

    /// Adding or subtracting a delta left the `i64` range
    #[error("Applying {delta:+} to {symbol} = {value} overflows")]
    ValueOverflow {
        symbol: SymbolId,
        value: i64,
        delta: i64,
    },

    /// Action costs must be finite and non-negative
    #[error("Action cost must be non-negative and finite: {action} has cost {cost}")]
    InvalidActionCost { action: String, cost: f64 },

    /// Planner or pathfinder constructed with unusable parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A plan does not replay against the given world state and goal
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    /// The search engine gave up without reaching the target
    #[error(transparent)]
    PathNotFound(#[from] PathNotFound),

    /// No plan within the planner's bounds satisfies the goal
    #[error(
        "{planner} found no plan of length at most {max_plan_length} to satisfy \"{}\"",
        .goal.name()
    )]
    PlanNotFound {
        planner: ForwardPlannerConfig,
        max_plan_length: usize,
        goal: Box<Goal>,
        #[source]
        cause: PathNotFound,
    },
}

/// Result type alias for planning operations.
pub type Result<T> = std::result::Result<T, GoapError>;

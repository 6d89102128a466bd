//! Forward state-space graph over world states.
//!
//! Nothing here is materialized up front. A [`ForwardNode`] is a world state
//! plus a handle on the shared action catalog; asking it for its edges yields
//! one [`ForwardEdge`] per applicable action, and an edge only computes its
//! destination state when the search asks for it.
//!
//! The goal is represented by a separate [`GoalNode`] type. It is a match
//! target, never expanded, and a regular node reaches it when its world state
//! satisfies every goal precondition.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::action::PlanningAction;
use crate::error::Result;
use crate::goal::Goal;
use crate::search::{SearchEdge, SearchNode, SearchTarget};
use crate::world_state::WorldState;

/// Produces the outgoing edges of a world state from a fixed action catalog.
///
/// Cloning shares the catalog.
#[derive(Debug, Clone)]
pub struct ForwardNodeExpander {
    actions: Arc<[PlanningAction]>,
}

impl ForwardNodeExpander {
    pub fn new(actions: impl IntoIterator<Item = PlanningAction>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    pub fn actions(&self) -> &[PlanningAction] {
        &self.actions
    }

    /// One edge per action applicable to `node`'s state, in catalog order.
    /// Computed afresh on every call.
    pub fn expand(&self, node: &ForwardNode) -> Result<Vec<ForwardEdge>> {
        let mut edges = Vec::new();
        for (action_index, action) in self.actions.iter().enumerate() {
            if action.is_applicable_to(&node.state)? {
                edges.push(ForwardEdge {
                    source: node.clone(),
                    action_index,
                });
            }
        }
        Ok(edges)
    }
}

/// A regular search node: a world state reached during planning.
///
/// Nodes compare and hash by world state alone.
#[derive(Debug, Clone)]
pub struct ForwardNode {
    state: WorldState,
    expander: ForwardNodeExpander,
}

impl ForwardNode {
    pub fn new(state: WorldState, expander: ForwardNodeExpander) -> Self {
        Self { state, expander }
    }

    pub fn world_state(&self) -> &WorldState {
        &self.state
    }
}

impl PartialEq for ForwardNode {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl Eq for ForwardNode {}

impl Hash for ForwardNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.state.hash(state);
    }
}

impl SearchNode for ForwardNode {
    type Edge = ForwardEdge;

    fn outgoing_edges(&self) -> Result<Vec<ForwardEdge>> {
        self.expander.expand(self)
    }
}

/// Applying one action to the state of a regular node.
#[derive(Debug, Clone)]
pub struct ForwardEdge {
    source: ForwardNode,
    action_index: usize,
}

impl ForwardEdge {
    pub fn action(&self) -> &PlanningAction {
        &self.source.expander.actions[self.action_index]
    }

    pub fn source(&self) -> &ForwardNode {
        &self.source
    }
}

impl SearchEdge for ForwardEdge {
    type Node = ForwardNode;

    fn cost(&self) -> f64 {
        self.action().cost()
    }

    fn target(&self) -> Result<ForwardNode> {
        let state = self.action().apply(&self.source.state)?;
        Ok(ForwardNode::new(state, self.source.expander.clone()))
    }
}

impl fmt::Display for ForwardEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --{}-->", self.source.state, self.action().name())
    }
}

/// The goal sentinel the search is aiming for.
#[derive(Debug, Clone)]
pub struct GoalNode {
    goal: Goal,
}

impl GoalNode {
    pub fn new(goal: Goal) -> Self {
        Self { goal }
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }
}

impl SearchTarget<ForwardNode> for GoalNode {
    fn is_reached_by(&self, node: &ForwardNode) -> Result<bool> {
        self.goal.is_satisfied_by(&node.state)
    }
}

//! Generic bounded best-first path search.
//!
//! The pathfinder knows nothing about world states or actions. It explores an
//! implicit graph described by three traits:
//!
//! - [`SearchNode`]: a vertex that can list its outgoing edges on demand,
//! - [`SearchEdge`]: a costed transition whose destination is computed lazily,
//! - [`SearchTarget`]: the thing being searched for, tested against nodes.
//!
//! A [`Heuristic`] estimates the remaining distance from a node to the target.
//! Its signature is typed over the node and target types separately, so it
//! cannot be invoked on any other pairing.
//!
//! Searches are bounded by an optional maximum path depth and an optional
//! wall-clock budget. Hitting either bound, or exhausting the reachable graph,
//! ends the search with [`PathNotFound`]; a partial path is never returned.

use std::cmp::{Ordering, Reverse};
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::error::{GoapError, Result};

/// A vertex of an implicit search graph.
///
/// Nodes are compared and hashed to detect revisits of the same vertex.
pub trait SearchNode: Clone + Eq + Hash {
    type Edge: SearchEdge<Node = Self>;

    /// Lists the edges leaving this node. Called once per expansion.
    fn outgoing_edges(&self) -> Result<Vec<Self::Edge>>;
}

/// A costed transition between two nodes.
pub trait SearchEdge {
    type Node;

    fn cost(&self) -> f64;

    /// Computes the destination node.
    fn target(&self) -> Result<Self::Node>;
}

/// What a search is looking for.
pub trait SearchTarget<N> {
    fn is_reached_by(&self, node: &N) -> Result<bool>;
}

/// Estimates the remaining cost from a node to the target.
pub trait Heuristic<N, T>: Send + Sync {
    fn estimate(&self, source: &N, target: &T) -> Result<f64>;
}

impl<N, T, F> Heuristic<N, T> for F
where
    F: Fn(&N, &T) -> Result<f64> + Send + Sync,
{
    fn estimate(&self, source: &N, target: &T) -> Result<f64> {
        self(source, target)
    }
}

/// Zero heuristic, turning the search into Dijkstra's algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl<N, T> Heuristic<N, T> for ZeroHeuristic {
    fn estimate(&self, _source: &N, _target: &T) -> Result<f64> {
        Ok(0.0)
    }
}

/// Why a search ended without a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathNotFoundReason {
    /// Every reachable node was explored
    Exhausted,
    /// Every unexplored node lies beyond the depth limit
    DepthLimitReached,
    /// The search ran out of time
    TimeLimitExceeded,
}

impl fmt::Display for PathNotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted => write!(f, "search space exhausted"),
            Self::DepthLimitReached => write!(f, "depth limit reached"),
            Self::TimeLimitExceeded => write!(f, "time limit exceeded"),
        }
    }
}

/// The search finished without reaching its target.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("No path found ({reason}) after {expansions} expansions in {elapsed:?}")]
pub struct PathNotFound {
    pub reason: PathNotFoundReason,
    pub expansions: usize,
    pub elapsed: Duration,
}

/// An ordered sequence of edges from the start node to the target.
#[derive(Debug, Clone)]
pub struct Path<E> {
    edges: Vec<E>,
    cost: f64,
    expansions: usize,
}

impl<E> Path<E> {
    pub fn edges(&self) -> &[E] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<E> {
        self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Sum of the edge costs.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of nodes expanded while finding this path.
    pub fn expansions(&self) -> usize {
        self.expansions
    }
}

/// Bounds applied to a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathfinderConfig {
    /// Longest path, in edges, the search may return
    pub max_depth: Option<usize>,
    /// Wall-clock budget for one search
    pub time_limit: Option<Duration>,
}

impl PathfinderConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }
}

/// One discovered path prefix.
#[derive(Debug)]
struct Record<N, E> {
    node: N,
    parent: Option<usize>,
    /// Edge that led here from `parent`
    edge: Option<E>,
    g_cost: f64,
    h_cost: f64,
    depth: usize,
}

impl<N, E> Record<N, E> {
    fn f_cost(&self) -> f64 {
        self.g_cost + self.h_cost
    }
}

/// Priority queue entry. Orders by `f` ascending, then `g` descending
/// (prefer paths that are further along), then discovery order.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    idx: usize,
    f_cost: f64,
    g_cost: f64,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_cost
            .total_cmp(&other.f_cost)
            .then_with(|| other.g_cost.total_cmp(&self.g_cost))
            .then_with(|| self.idx.cmp(&other.idx))
    }
}

/// Mutable state of one search. Owned by the call and dropped with it.
struct SearchContext<N: SearchNode> {
    records: Vec<Record<N, N::Edge>>,
    open_set: BinaryHeap<Reverse<FrontierEntry>>,
    closed_set: HashSet<usize>,
    /// Cheapest cost and shallowest depth each node has been reached with
    best: HashMap<N, (f64, usize)>,
    expansions: usize,
    depth_limited: bool,
}

impl<N: SearchNode> SearchContext<N> {
    fn new(start: N, h_cost: f64) -> Self {
        let mut context = Self {
            records: Vec::new(),
            open_set: BinaryHeap::new(),
            closed_set: HashSet::new(),
            best: HashMap::new(),
            expansions: 0,
            depth_limited: false,
        };
        context.best.insert(start.clone(), (0.0, 0));
        context.push(Record {
            node: start,
            parent: None,
            edge: None,
            g_cost: 0.0,
            h_cost,
            depth: 0,
        });
        context
    }

    fn push(&mut self, record: Record<N, N::Edge>) {
        let idx = self.records.len();
        self.open_set.push(Reverse(FrontierEntry {
            idx,
            f_cost: record.f_cost(),
            g_cost: record.g_cost,
        }));
        self.records.push(record);
    }

    /// Pops the most promising record that has not been expanded yet.
    fn next_record(&mut self) -> Option<usize> {
        while let Some(Reverse(entry)) = self.open_set.pop() {
            if !self.closed_set.contains(&entry.idx) {
                return Some(entry.idx);
            }
        }
        None
    }

    /// Whether reaching `node` with this cost and depth improves on every
    /// earlier visit. A shallower revisit matters under a depth limit.
    fn improves(&mut self, node: &N, g_cost: f64, depth: usize) -> bool {
        match self.best.entry(node.clone()) {
            Entry::Vacant(vacant) => {
                vacant.insert((g_cost, depth));
                true
            }
            Entry::Occupied(mut occupied) => {
                let (best_g, best_depth) = *occupied.get();
                if g_cost < best_g || depth < best_depth {
                    occupied.insert((best_g.min(g_cost), best_depth.min(depth)));
                    true
                } else {
                    false
                }
            }
        }
    }

    fn into_path(mut self, idx: usize) -> Path<N::Edge> {
        let cost = self.records[idx].g_cost;
        let mut edges = Vec::with_capacity(self.records[idx].depth);
        let mut current = Some(idx);

        while let Some(i) = current {
            let record = &mut self.records[i];
            if let Some(edge) = record.edge.take() {
                edges.push(edge);
            }
            current = record.parent;
        }

        edges.reverse();
        Path {
            edges,
            cost,
            expansions: self.expansions,
        }
    }
}

/// Best-first search ordered by `g + h` with depth and time bounds.
///
/// With an admissible heuristic and no bounds hit this is A*; with
/// [`ZeroHeuristic`] it is Dijkstra's algorithm. With an inadmissible
/// heuristic the returned path is not guaranteed to be the cheapest.
///
/// # Examples
///
/// ```
/// use forward_goap::search::{
///     AStarPathfinder, PathfinderConfig, SearchEdge, SearchNode, SearchTarget, ZeroHeuristic,
/// };
/// use forward_goap::Result;
///
/// // Counting up from zero in steps of one or two.
/// #[derive(Clone, PartialEq, Eq, Hash)]
/// struct Number(u32);
///
/// struct Step { from: u32, by: u32 }
///
/// impl SearchEdge for Step {
///     type Node = Number;
///     fn cost(&self) -> f64 { 1.0 }
///     fn target(&self) -> Result<Number> { Ok(Number(self.from + self.by)) }
/// }
///
/// impl SearchNode for Number {
///     type Edge = Step;
///     fn outgoing_edges(&self) -> Result<Vec<Step>> {
///         Ok(vec![Step { from: self.0, by: 1 }, Step { from: self.0, by: 2 }])
///     }
/// }
///
/// struct Exactly(u32);
///
/// impl SearchTarget<Number> for Exactly {
///     fn is_reached_by(&self, node: &Number) -> Result<bool> { Ok(node.0 == self.0) }
/// }
///
/// let pathfinder = AStarPathfinder::new(
///     ZeroHeuristic,
///     PathfinderConfig::default().with_max_depth(10),
/// );
/// let path = pathfinder.find_path(Number(0), &Exactly(7)).unwrap();
/// assert_eq!(path.len(), 4);
/// assert!(pathfinder.find_path(Number(0), &Exactly(25)).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct AStarPathfinder<H> {
    heuristic: H,
    config: PathfinderConfig,
}

impl<H> AStarPathfinder<H> {
    pub fn new(heuristic: H, config: PathfinderConfig) -> Self {
        Self { heuristic, config }
    }

    pub fn config(&self) -> &PathfinderConfig {
        &self.config
    }

    /// Searches for a path from `start` to a node that reaches `target`.
    ///
    /// # Errors
    ///
    /// - [`GoapError::PathNotFound`] when the graph is exhausted or a bound is hit
    /// - any error raised by node expansion, edge targets, the target test or
    ///   the heuristic, unchanged
    pub fn find_path<N, T>(&self, start: N, target: &T) -> Result<Path<N::Edge>>
    where
        N: SearchNode,
        T: SearchTarget<N>,
        H: Heuristic<N, T>,
    {
        let started = Instant::now();
        let h_start = self.heuristic.estimate(&start, target)?;
        let mut context = SearchContext::new(start, h_start);

        while let Some(idx) = context.next_record() {
            if let Some(limit) = self.config.time_limit {
                if started.elapsed() > limit {
                    return Err(self.not_found(
                        PathNotFoundReason::TimeLimitExceeded,
                        &context,
                        started,
                    ));
                }
            }

            let record = &context.records[idx];
            let (g_cost, depth) = (record.g_cost, record.depth);
            if target.is_reached_by(&record.node)? {
                log::debug!(
                    "Path of length {} and cost {} found after {} expansions",
                    depth,
                    g_cost,
                    context.expansions
                );
                return Ok(context.into_path(idx));
            }

            context.closed_set.insert(idx);
            if self.config.max_depth.is_some_and(|max| depth >= max) {
                context.depth_limited = true;
                continue;
            }

            let node = context.records[idx].node.clone();
            let depth = depth + 1;
            context.expansions += 1;

            let edges = node.outgoing_edges()?;
            log::trace!(
                "Expanding node #{} at depth {} (g = {}): {} edges",
                idx,
                depth - 1,
                g_cost,
                edges.len()
            );

            for edge in edges {
                let successor = edge.target()?;
                let successor_g = g_cost + edge.cost();
                if !context.improves(&successor, successor_g, depth) {
                    continue;
                }
                let h_cost = self.heuristic.estimate(&successor, target)?;
                context.push(Record {
                    node: successor,
                    parent: Some(idx),
                    edge: Some(edge),
                    g_cost: successor_g,
                    h_cost,
                    depth,
                });
            }
        }

        let reason = if context.depth_limited {
            PathNotFoundReason::DepthLimitReached
        } else {
            PathNotFoundReason::Exhausted
        };
        Err(self.not_found(reason, &context, started))
    }

    fn not_found<N: SearchNode>(
        &self,
        reason: PathNotFoundReason,
        context: &SearchContext<N>,
        started: Instant,
    ) -> GoapError {
        let error = PathNotFound {
            reason,
            expansions: context.expansions,
            elapsed: started.elapsed(),
        };
        log::debug!("{}", error);
        error.into()
    }
}

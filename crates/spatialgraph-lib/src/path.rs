use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};

use tracing::debug;

use crate::cancel::{CancellationToken, Outcome};
use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, NodeId};

/// One edge of a path together with the direction it was walked in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStep<'g> {
    pub edge: &'g Edge,
    pub from: NodeId,
    pub to: NodeId,
}

/// Minimal-weight route between two nodes, ordered from source to target.
///
/// A path from a node to itself is present but has no steps.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult<'g> {
    pub source: NodeId,
    pub target: NodeId,
    pub steps: Vec<PathStep<'g>>,
}

impl<'g> PathResult<'g> {
    /// Edges in traversal order.
    pub fn edges(&self) -> impl Iterator<Item = &'g Edge> + '_ {
        self.steps.iter().map(|step| step.edge)
    }

    /// Number of edges in the path.
    pub fn hop_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of the edge weights along the path.
    pub fn total_weight(&self) -> f64 {
        self.steps.iter().map(|step| step.edge.weight).sum()
    }

    /// Nodes visited, starting with the source.
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(self.steps.len() + 1);
        nodes.push(self.source);
        nodes.extend(self.steps.iter().map(|step| step.to));
        nodes
    }
}

/// Find the minimal-weight path from `source` to `target`.
///
/// Returns `Ok(None)` when either node is unknown to the graph or the target
/// cannot be reached under the graph's orientation.
pub fn shortest_path(
    graph: &Graph,
    source: NodeId,
    target: NodeId,
) -> Result<Option<PathResult<'_>>> {
    let never = CancellationToken::new();
    match shortest_path_with_cancel(graph, source, target, &never)? {
        Outcome::Complete(path) => Ok(path),
        Outcome::Cancelled => Ok(None),
    }
}

/// Run Dijkstra's algorithm, polling `cancel` every
/// [`CANCEL_CHECK_INTERVAL`](crate::cancel::CANCEL_CHECK_INTERVAL) settled nodes.
///
/// Equal-cost frontier entries are settled in the order they were discovered,
/// and a node's predecessor only changes on a strictly cheaper route, so the
/// same graph always yields the same path. Edge weights are validated as they
/// are relaxed; a negative or NaN weight aborts the search with
/// [`Error::InvalidWeight`].
pub fn shortest_path_with_cancel<'g>(
    graph: &'g Graph,
    source: NodeId,
    target: NodeId,
    cancel: &CancellationToken,
) -> Result<Outcome<Option<PathResult<'g>>>> {
    if !graph.contains_node(source) || !graph.contains_node(target) {
        debug!(
            source_node = source,
            target_node = target,
            "shortest path endpoint not in graph"
        );
        return Ok(Outcome::Complete(None));
    }

    if source == target {
        return Ok(Outcome::Complete(Some(PathResult {
            source,
            target,
            steps: Vec::new(),
        })));
    }

    let mut distances: HashMap<NodeId, f64> = HashMap::new();
    let mut parents: HashMap<NodeId, PathStep<'g>> = HashMap::new();
    let mut queue = BinaryHeap::new();
    let mut sequence = 0u64;
    let mut settled = 0usize;

    distances.insert(source, 0.0);
    queue.push(QueueEntry::new(source, 0.0, sequence));

    while let Some(entry) = queue.pop() {
        let current_distance = distances.get(&entry.node).copied().unwrap_or(f64::INFINITY);
        if entry.cost.0 > current_distance {
            continue;
        }

        if cancel.should_abort(settled) {
            debug!(settled, "shortest path search cancelled");
            return Ok(Outcome::Cancelled);
        }
        settled += 1;

        if entry.node == target {
            let path = reconstruct_path(&parents, source, target);
            debug!(
                source_node = source,
                target_node = target,
                hops = path.hop_count(),
                weight = path.total_weight(),
                settled,
                "found shortest path"
            );
            return Ok(Outcome::Complete(Some(path)));
        }

        for step in graph.traversals(entry.node) {
            let weight = step.edge.weight;
            if weight.is_nan() || weight < 0.0 {
                return Err(Error::InvalidWeight {
                    edge: step.edge.id,
                    row: step.edge.row_index,
                    start_node: step.edge.source,
                    end_node: step.edge.target,
                    weight,
                });
            }

            let next_cost = current_distance + weight;
            let improved = match distances.entry(step.to) {
                Entry::Occupied(mut known) if next_cost < *known.get() => {
                    known.insert(next_cost);
                    true
                }
                Entry::Occupied(_) => false,
                Entry::Vacant(slot) => {
                    slot.insert(next_cost);
                    true
                }
            };
            if improved {
                parents.insert(
                    step.to,
                    PathStep {
                        edge: step.edge,
                        from: step.from,
                        to: step.to,
                    },
                );
                sequence += 1;
                queue.push(QueueEntry::new(step.to, next_cost, sequence));
            }
        }
    }

    debug!(
        source_node = source,
        target_node = target,
        settled,
        "no path between nodes"
    );
    Ok(Outcome::Complete(None))
}

fn reconstruct_path<'g>(
    parents: &HashMap<NodeId, PathStep<'g>>,
    source: NodeId,
    target: NodeId,
) -> PathResult<'g> {
    let mut steps = Vec::new();
    let mut current = target;
    while current != source {
        let Some(step) = parents.get(&current) else {
            break;
        };
        steps.push(*step);
        current = step.from;
    }
    steps.reverse();
    PathResult {
        source,
        target,
        steps,
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeId,
    cost: FloatOrd,
    sequence: u64,
}

impl QueueEntry {
    fn new(node: NodeId, cost: f64, sequence: u64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            sequence,
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then by
        // discovery order.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

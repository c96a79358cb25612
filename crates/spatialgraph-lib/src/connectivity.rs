use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use tracing::debug;

use crate::cancel::{CancellationToken, Outcome};
use crate::graph::{Graph, NodeId};

/// Nodes grouped by weakly connected component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Components {
    /// Components in ascending order of their smallest node id. Node ids
    /// within a component are sorted.
    pub components: Vec<Vec<NodeId>>,
    #[serde(skip)]
    membership: HashMap<NodeId, usize>,
}

impl Components {
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// 1-based component id of `node`, if the node is in the graph.
    pub fn component_of(&self, node: NodeId) -> Option<usize> {
        self.membership.get(&node).map(|index| index + 1)
    }

    /// Whether both nodes belong to the same component.
    pub fn connected(&self, a: NodeId, b: NodeId) -> bool {
        match (self.membership.get(&a), self.membership.get(&b)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// Group the nodes of `graph` into weakly connected components, ignoring
/// edge direction.
pub fn connected_components(
    graph: &Graph,
    cancel: &CancellationToken,
) -> Outcome<Components> {
    let mut membership: HashMap<NodeId, usize> = HashMap::with_capacity(graph.node_count());
    let mut components: Vec<Vec<NodeId>> = Vec::new();
    let mut visited = 0usize;

    for start in graph.node_ids() {
        if membership.contains_key(&start) {
            continue;
        }

        let component = components.len();
        let mut members = Vec::new();
        let mut queue = VecDeque::from([start]);
        membership.insert(start, component);

        while let Some(node) = queue.pop_front() {
            if cancel.should_abort(visited) {
                debug!(visited, "connected components cancelled");
                return Outcome::Cancelled;
            }
            visited += 1;
            members.push(node);

            let neighbours = graph
                .outgoing(node)
                .map(|edge| edge.target)
                .chain(graph.incoming(node).map(|edge| edge.source));
            for next in neighbours {
                if membership.contains_key(&next) {
                    continue;
                }
                membership.insert(next, component);
                queue.push_back(next);
            }
        }

        members.sort_unstable();
        components.push(members);
    }

    debug!(
        nodes = graph.node_count(),
        components = components.len(),
        "computed connected components"
    );
    Outcome::Complete(Components {
        components,
        membership,
    })
}

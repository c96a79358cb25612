use std::collections::HashMap;

use crate::orientation::Orientation;
use crate::source::Geometry;

/// Numeric identifier for a network node.
pub type NodeId = i64;

/// Position of an edge in its graph's edge list.
pub type EdgeId = usize;

/// Edge within the multigraph.
///
/// `source` and `target` keep the inserted direction even when the graph is
/// undirected; undirected graphs simply allow traversing the edge backwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f64,
    pub geometry: Geometry,
    /// Index of the row this edge was loaded from.
    pub row_index: usize,
}

/// A step across an edge, in the direction it was traversed.
#[derive(Debug, Clone, Copy)]
pub struct Traversal<'g> {
    pub edge: &'g Edge,
    pub from: NodeId,
    pub to: NodeId,
}

#[derive(Debug, Clone, Default)]
struct Incidence {
    outgoing: Vec<EdgeId>,
    incoming: Vec<EdgeId>,
}

/// Multigraph structure used by the path and connectivity queries.
///
/// Edges are stored once. Each node keeps the ids of its outgoing and incoming
/// edges in insertion order, so parallel edges stay distinct and traversal
/// order is reproducible.
#[derive(Debug, Clone)]
pub struct Graph {
    orientation: Orientation,
    weighted: bool,
    edges: Vec<Edge>,
    nodes: HashMap<NodeId, Incidence>,
}

impl Graph {
    /// Create an empty graph whose traversal semantics follow `orientation`.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            weighted: false,
            edges: Vec::new(),
            nodes: HashMap::new(),
        }
    }

    /// Pre-allocate for a known number of edges.
    pub fn with_capacity(orientation: Orientation, edge_count: usize) -> Self {
        Self {
            orientation,
            weighted: false,
            edges: Vec::with_capacity(edge_count),
            nodes: HashMap::with_capacity(edge_count),
        }
    }

    pub(crate) fn set_weighted(&mut self, weighted: bool) {
        self.weighted = weighted;
    }

    /// Orientation the graph was built with.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Whether edges may only be traversed from source to target.
    pub fn is_directed(&self) -> bool {
        !self.orientation.is_undirected()
    }

    /// Whether edge weights were read from a column.
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Register a node. Returns `false` when the node already existed.
    pub fn add_node(&mut self, node: NodeId) -> bool {
        if self.nodes.contains_key(&node) {
            return false;
        }
        self.nodes.insert(node, Incidence::default());
        true
    }

    /// Append an edge, creating its endpoints when needed.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        weight: f64,
        geometry: Geometry,
        row_index: usize,
    ) -> EdgeId {
        let id = self.edges.len();
        self.edges.push(Edge {
            id,
            source,
            target,
            weight,
            geometry,
            row_index,
        });
        self.nodes.entry(source).or_default().outgoing.push(id);
        self.nodes.entry(target).or_default().incoming.push(id);
        id
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Lookup an edge by id.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Node identifiers in ascending order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Edges leaving `node` in their stored direction.
    pub fn outgoing(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.incidence(node, true)
    }

    /// Edges entering `node` in their stored direction.
    pub fn incoming(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.incidence(node, false)
    }

    /// Edges that may be followed out of `node` under the graph's orientation.
    ///
    /// Outgoing edges come first, then (for undirected graphs) incoming edges
    /// walked backwards. Self-loops are only reported once.
    pub fn traversals(&self, node: NodeId) -> impl Iterator<Item = Traversal<'_>> + '_ {
        let forward = self.outgoing(node).map(move |edge| Traversal {
            edge,
            from: node,
            to: edge.target,
        });
        let backward = self
            .incoming(node)
            .filter(move |edge| !self.is_directed() && edge.source != edge.target)
            .map(move |edge| Traversal {
                edge,
                from: node,
                to: edge.source,
            });
        forward.chain(backward)
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|edge| edge.weight).sum()
    }

    fn incidence(&self, node: NodeId, outgoing: bool) -> impl Iterator<Item = &Edge> + '_ {
        let ids: &[EdgeId] = match self.nodes.get(&node) {
            Some(incidence) if outgoing => &incidence.outgoing,
            Some(incidence) => &incidence.incoming,
            None => &[],
        };
        ids.iter().map(move |&id| &self.edges[id])
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(Orientation::Direct)
    }
}

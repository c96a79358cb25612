//! Query entry points mirroring the SQL function surface.
//!
//! Each call builds its own [`Graph`], runs one query against it and drops the
//! graph before returning, so concurrent queries never share state.

use serde::Serialize;
use tracing::info;

use crate::builder::build_graph;
use crate::cancel::{CancellationToken, Outcome};
use crate::db::WEIGHT_COLUMN;
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::materialize::{materialize, OutputRow};
use crate::orientation::Orientation;
use crate::path::shortest_path_with_cancel;
use crate::source::EdgeSource;

/// Parameters of a shortest path query.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathRequest {
    pub source: NodeId,
    pub target: NodeId,
    /// Read weights from the source's weight column instead of counting hops.
    pub weighted: bool,
    /// Orientation override; falls back to the source's orientation, then `Direct`.
    pub orientation: Option<Orientation>,
}

impl ShortestPathRequest {
    /// Weighted request with the default orientation.
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            weighted: true,
            orientation: None,
        }
    }

    pub fn unweighted(mut self) -> Self {
        self.weighted = false;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }
}

/// Rows and metadata produced by a shortest path query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPathResponse {
    pub source: NodeId,
    pub target: NodeId,
    pub orientation: Orientation,
    pub weighted: bool,
    /// `false` when no path exists; `true` with zero rows for a trivial path.
    pub path_found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_weight: Option<f64>,
    pub hops: usize,
    pub rows: Vec<OutputRow>,
}

/// Shape of a built graph, for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    pub orientation: Orientation,
    pub weighted: bool,
    pub nodes: usize,
    pub edges: usize,
    pub total_weight: f64,
}

impl GraphSummary {
    pub fn of(graph: &Graph) -> Self {
        Self {
            orientation: graph.orientation(),
            weighted: graph.is_weighted(),
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            total_weight: graph.total_weight(),
        }
    }
}

/// Orientation used for `request` against `source`.
pub fn resolve_orientation(source: &dyn EdgeSource, request: &ShortestPathRequest) -> Orientation {
    request
        .orientation
        .or_else(|| source.orientation())
        .unwrap_or_default()
}

/// Compute the shortest path between two nodes and materialize it as rows.
///
/// Weighted requests require the source to expose a weight column.
pub fn shortest_path_query(
    source: &dyn EdgeSource,
    request: &ShortestPathRequest,
    cancel: &CancellationToken,
) -> Result<Outcome<ShortestPathResponse>> {
    let orientation = resolve_orientation(source, request);
    let weight_column = if request.weighted {
        Some(source.weight_column().ok_or_else(|| Error::MissingColumn {
            table: None,
            column: WEIGHT_COLUMN.to_string(),
        })?)
    } else {
        None
    };

    let graph = match build_graph(source, orientation, weight_column, cancel)? {
        Outcome::Complete(graph) => graph,
        Outcome::Cancelled => return Ok(Outcome::Cancelled),
    };

    let path = match shortest_path_with_cancel(&graph, request.source, request.target, cancel)? {
        Outcome::Complete(path) => path,
        Outcome::Cancelled => return Ok(Outcome::Cancelled),
    };

    let response = ShortestPathResponse {
        source: request.source,
        target: request.target,
        orientation,
        weighted: request.weighted,
        path_found: path.is_some(),
        total_weight: path.as_ref().map(|path| path.total_weight()),
        hops: path.as_ref().map_or(0, |path| path.hop_count()),
        rows: path.as_ref().map(materialize).unwrap_or_default(),
    };

    info!(
        source_node = request.source,
        target_node = request.target,
        %orientation,
        weighted = request.weighted,
        path_found = response.path_found,
        hops = response.hops,
        "shortest path query finished"
    );
    Ok(Outcome::Complete(response))
}

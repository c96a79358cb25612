use std::ops::ControlFlow;

use tracing::{debug, warn};

use crate::cancel::{CancellationToken, Outcome};
use crate::error::Result;
use crate::graph::Graph;
use crate::orientation::Orientation;
use crate::source::EdgeSource;
use crate::weight::{resolver_for, EdgeWeightResolver};

/// Populates a [`Graph`] from an edge source.
///
/// Orientation and weighting are independent: any [`Orientation`] combines
/// with any [`EdgeWeightResolver`].
pub struct GraphBuilder<R> {
    orientation: Orientation,
    resolver: R,
}

impl<R: EdgeWeightResolver> GraphBuilder<R> {
    pub fn new(orientation: Orientation, resolver: R) -> Self {
        Self {
            orientation,
            resolver,
        }
    }

    /// Build the graph, polling `cancel` every
    /// [`CANCEL_CHECK_INTERVAL`](crate::cancel::CANCEL_CHECK_INTERVAL) rows.
    ///
    /// A cancelled build drops the partially populated graph.
    pub fn build(
        &self,
        source: &dyn EdgeSource,
        cancel: &CancellationToken,
    ) -> Result<Outcome<Graph>> {
        let mut graph = Graph::new(self.orientation);
        graph.set_weighted(self.resolver.is_weighted());

        let mut processed = 0usize;
        let mut cancelled = false;
        source.scan(&mut |row| {
            if cancel.should_abort(processed) {
                cancelled = true;
                return Ok(ControlFlow::Break(()));
            }
            processed += 1;

            let weight = self.resolver.resolve_weight(&row)?;
            let (from, to) = self.orientation.orient(row.start_node, row.end_node);
            graph.add_node(from);
            graph.add_node(to);
            graph.add_edge(from, to, weight, row.geometry, row.index);
            Ok(ControlFlow::Continue(()))
        })?;

        if cancelled || cancel.is_cancelled() {
            debug!(rows = processed, "graph build cancelled");
            return Ok(Outcome::Cancelled);
        }

        if processed == 0 {
            warn!(orientation = %self.orientation, "edge source yielded no rows");
        }
        debug!(
            orientation = %self.orientation,
            weighted = graph.is_weighted(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built graph"
        );
        Ok(Outcome::Complete(graph))
    }
}

/// Build a graph from `source`, reading weights from `weight_column` when given
/// and using unit weights otherwise.
pub fn build_graph(
    source: &dyn EdgeSource,
    orientation: Orientation,
    weight_column: Option<&str>,
    cancel: &CancellationToken,
) -> Result<Outcome<Graph>> {
    GraphBuilder::new(orientation, resolver_for(weight_column)).build(source, cancel)
}

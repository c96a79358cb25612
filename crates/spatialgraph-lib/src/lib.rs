//! Spatial network graph library entry points.
//!
//! This crate turns edge tables (start node, end node, optional weight,
//! geometry) into in-memory multigraphs with a chosen orientation, runs
//! shortest path and connectivity queries against them, and maps paths back to
//! geometry-bearing rows. Higher-level consumers (the CLI) should only depend
//! on the functions exported here instead of reimplementing behavior.

#![deny(warnings)]

pub mod builder;
pub mod cancel;
pub mod connectivity;
pub mod db;
pub mod error;
pub mod graph;
pub mod materialize;
pub mod orientation;
pub mod path;
pub mod query;
pub mod source;
pub mod weight;

pub use builder::{build_graph, GraphBuilder};
pub use cancel::{CancellationToken, Outcome, CANCEL_CHECK_INTERVAL};
pub use connectivity::{connected_components, Components};
pub use db::{open_database, EdgeTableConfig, SqliteEdgeSource};
pub use error::{Error, Result};
pub use graph::{Edge, EdgeId, Graph, NodeId, Traversal};
pub use materialize::{materialize, OutputRow, OUTPUT_COLUMNS};
pub use orientation::Orientation;
pub use path::{shortest_path, shortest_path_with_cancel, PathResult, PathStep};
pub use query::{
    resolve_orientation, shortest_path_query, GraphSummary, ShortestPathRequest,
    ShortestPathResponse,
};
pub use source::{EdgeRow, EdgeSource, Geometry, MemoryEdgeSource, RowVisitor};
pub use weight::{EdgeWeightResolver, Unweighted, Weighted, UNIT_WEIGHT};

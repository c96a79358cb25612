//! Edge row sources consumed by the graph builder.
//!
//! A source yields a finite, ordered sequence of [`EdgeRow`] values. Sources
//! are scanned through a visitor so that database-backed implementations can
//! stream rows from a prepared statement without buffering the whole table,
//! and so the builder can stop the scan early when a query is cancelled.

use std::ops::ControlFlow;

use serde::Serialize;

use crate::error::Result;
use crate::graph::NodeId;
use crate::orientation::Orientation;

/// Geometry payload carried through the graph untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Geometry {
    /// NULL geometry cell.
    #[default]
    Empty,
    /// Well-known text, e.g. `LINESTRING (0 0, 1 1)`.
    Wkt(String),
    /// Binary geometry blob (usually WKB).
    Wkb(Vec<u8>),
}

impl Geometry {
    /// Convenience constructor for WKT geometries.
    pub fn wkt(text: impl Into<String>) -> Self {
        Geometry::Wkt(text.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Geometry::Empty)
    }
}

/// One tabular record describing an edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRow {
    /// Position of the row in its source, starting at zero.
    pub index: usize,
    pub start_node: NodeId,
    pub end_node: NodeId,
    /// Value of the configured weight column; `None` when no weight column was read.
    pub weight: Option<f64>,
    pub geometry: Geometry,
}

impl EdgeRow {
    /// Create an unweighted row.
    pub fn new(index: usize, start_node: NodeId, end_node: NodeId, geometry: Geometry) -> Self {
        Self {
            index,
            start_node,
            end_node,
            weight: None,
            geometry,
        }
    }

    /// Attach a weight value to the row.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// Visitor invoked for every row produced by a source.
pub type RowVisitor<'a> = dyn FnMut(EdgeRow) -> Result<ControlFlow<()>> + 'a;

/// Producer of edge rows.
pub trait EdgeSource {
    /// Name of the weight column rows carry values for, if any.
    fn weight_column(&self) -> Option<&str>;

    /// Orientation configured on the source itself, if any.
    fn orientation(&self) -> Option<Orientation> {
        None
    }

    /// Feed every row to `visit`, in source order, until the rows run out or
    /// the visitor breaks.
    fn scan(&self, visit: &mut RowVisitor<'_>) -> Result<()>;
}

/// Edge source backed by rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryEdgeSource {
    rows: Vec<EdgeRow>,
    weight_column: Option<String>,
    orientation: Option<Orientation>,
}

impl MemoryEdgeSource {
    /// Build a source from rows. Row indices are reassigned to match their position.
    pub fn new(rows: impl IntoIterator<Item = EdgeRow>) -> Self {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| EdgeRow { index, ..row })
            .collect();
        Self {
            rows,
            weight_column: None,
            orientation: None,
        }
    }

    /// Build a weighted source from `(start, end, weight)` triples with empty geometries.
    pub fn from_weighted_edges(edges: impl IntoIterator<Item = (NodeId, NodeId, f64)>) -> Self {
        Self::new(
            edges
                .into_iter()
                .map(|(start, end, weight)| {
                    EdgeRow::new(0, start, end, Geometry::Empty).with_weight(weight)
                }),
        )
        .with_weight_column("weight")
    }

    /// Declare the weight column the rows were read from.
    pub fn with_weight_column(mut self, column: impl Into<String>) -> Self {
        self.weight_column = Some(column.into());
        self
    }

    /// Pin the orientation used when a query does not request one.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn rows(&self) -> &[EdgeRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl EdgeSource for MemoryEdgeSource {
    fn weight_column(&self) -> Option<&str> {
        self.weight_column.as_deref()
    }

    fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    fn scan(&self, visit: &mut RowVisitor<'_>) -> Result<()> {
        for row in &self.rows {
            if visit(row.clone())?.is_break() {
                break;
            }
        }
        Ok(())
    }
}

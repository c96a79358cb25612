use crate::error::{Error, Result};
use crate::source::EdgeRow;

/// Weight assigned to every edge of an unweighted graph.
pub const UNIT_WEIGHT: f64 = 1.0;

/// Strategy turning an edge row into an edge weight.
pub trait EdgeWeightResolver {
    /// Weight for `row`.
    fn resolve_weight(&self, row: &EdgeRow) -> Result<f64>;

    /// Whether the resolved weights come from a column.
    fn is_weighted(&self) -> bool;
}

/// Reads weights from a named column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weighted {
    column: String,
}

impl Weighted {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }
}

impl EdgeWeightResolver for Weighted {
    fn resolve_weight(&self, row: &EdgeRow) -> Result<f64> {
        row.weight.ok_or_else(|| Error::MissingColumn {
            table: None,
            column: self.column.clone(),
        })
    }

    fn is_weighted(&self) -> bool {
        true
    }
}

/// Gives every edge a weight of [`UNIT_WEIGHT`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unweighted;

impl EdgeWeightResolver for Unweighted {
    fn resolve_weight(&self, _row: &EdgeRow) -> Result<f64> {
        Ok(UNIT_WEIGHT)
    }

    fn is_weighted(&self) -> bool {
        false
    }
}

impl EdgeWeightResolver for Box<dyn EdgeWeightResolver> {
    fn resolve_weight(&self, row: &EdgeRow) -> Result<f64> {
        self.as_ref().resolve_weight(row)
    }

    fn is_weighted(&self) -> bool {
        self.as_ref().is_weighted()
    }
}

/// Pick the resolver matching an optional weight column.
pub fn resolver_for(weight_column: Option<&str>) -> Box<dyn EdgeWeightResolver> {
    match weight_column {
        Some(column) => Box::new(Weighted::new(column)),
        None => Box::new(Unweighted),
    }
}

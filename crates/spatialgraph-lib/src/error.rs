use std::path::PathBuf;

use thiserror::Error;

use crate::graph::{EdgeId, NodeId};

/// Convenient result alias for the spatial graph library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an orientation value is not one of the three recognised modes.
    #[error("invalid graph orientation '{value}'; please enter an appropriate graph orientation (1, 2 or 3)")]
    InvalidOrientation { value: String },

    /// Raised when the edge database file does not exist.
    #[error("edge database not found at {path}")]
    DatabaseNotFound { path: PathBuf },

    /// Raised when the configured edge table does not exist.
    #[error("edge table {table} not found")]
    MissingTable { table: String },

    /// Raised when a configured column is absent from the row schema.
    #[error("column {column} not found{}", format_table(.table))]
    MissingColumn {
        table: Option<String>,
        column: String,
    },

    /// Raised when a weighted edge row holds NULL in the weight column.
    #[error("edge row {row} has a NULL value in weight column {column}")]
    NullWeight { row: usize, column: String },

    /// Raised when the search reaches an edge whose weight is negative or not a number.
    #[error("edge {edge} ({start_node} -> {end_node}, row {row}) has invalid weight {weight}; weights must be non-negative")]
    InvalidWeight {
        edge: EdgeId,
        row: usize,
        start_node: NodeId,
        end_node: NodeId,
        weight: f64,
    },

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_table(table: &Option<String>) -> String {
    match table {
        Some(table) => format!(" in table {table}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_mentions_table_when_known() {
        let err = Error::MissingColumn {
            table: Some("roads".to_string()),
            column: "length".to_string(),
        };
        assert_eq!(err.to_string(), "column length not found in table roads");

        let err = Error::MissingColumn {
            table: None,
            column: "length".to_string(),
        };
        assert_eq!(err.to_string(), "column length not found");
    }

    #[test]
    fn invalid_orientation_echoes_value() {
        let err = Error::InvalidOrientation {
            value: "7".to_string(),
        };
        assert!(err.to_string().contains("'7'"));
        assert!(err.to_string().contains("(1, 2 or 3)"));
    }
}

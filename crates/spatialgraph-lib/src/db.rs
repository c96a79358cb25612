//! SQLite-backed edge tables.
//!
//! An edge table holds one row per network edge with integer start and end
//! node columns, a geometry column and, for weighted graphs, a numeric weight
//! column. Columns are validated against the table schema when the source is
//! opened so configuration mistakes surface before any row is read.

use std::ops::ControlFlow;
use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row};
use tracing::debug;

use crate::error::{Error, Result};
use crate::orientation::Orientation;
use crate::source::{EdgeRow, EdgeSource, Geometry, RowVisitor};

/// Default name of the geometry column.
pub const GEOMETRY_COLUMN: &str = "the_geom";
/// Default name of the start node column.
pub const START_NODE_COLUMN: &str = "start_node";
/// Default name of the end node column.
pub const END_NODE_COLUMN: &str = "end_node";
/// Conventional name of the weight column.
pub const WEIGHT_COLUMN: &str = "weight";

/// Column layout of an edge table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeTableConfig {
    pub table: String,
    pub start_node_column: String,
    pub end_node_column: String,
    pub geometry_column: String,
    /// Column holding edge weights; `None` for unweighted tables.
    pub weight_column: Option<String>,
    /// Orientation applied when a query does not request one.
    pub orientation: Option<Orientation>,
}

impl EdgeTableConfig {
    /// Configuration using the default column names and no weight column.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            start_node_column: START_NODE_COLUMN.to_string(),
            end_node_column: END_NODE_COLUMN.to_string(),
            geometry_column: GEOMETRY_COLUMN.to_string(),
            weight_column: None,
            orientation: None,
        }
    }

    pub fn with_weight_column(mut self, column: impl Into<String>) -> Self {
        self.weight_column = Some(column.into());
        self
    }

    pub fn with_geometry_column(mut self, column: impl Into<String>) -> Self {
        self.geometry_column = column.into();
        self
    }

    pub fn with_node_columns(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_node_column = start.into();
        self.end_node_column = end.into();
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }
}

/// Open a SQLite database read-only.
pub fn open_database(path: &Path) -> Result<Connection> {
    if !path.exists() {
        return Err(Error::DatabaseNotFound {
            path: path.to_path_buf(),
        });
    }
    let connection = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    debug!(path = %path.display(), "opened edge database");
    Ok(connection)
}

/// Edge source streaming rows out of a SQLite table.
#[derive(Debug)]
pub struct SqliteEdgeSource<'c> {
    connection: &'c Connection,
    config: EdgeTableConfig,
    sql: String,
}

impl<'c> SqliteEdgeSource<'c> {
    /// Validate `config` against the table schema and prepare the row query.
    pub fn open(connection: &'c Connection, config: EdgeTableConfig) -> Result<Self> {
        if !table_exists(connection, &config.table)? {
            return Err(Error::MissingTable {
                table: config.table.clone(),
            });
        }

        let columns = table_columns(connection, &config.table)?;
        let mut required = vec![
            config.start_node_column.as_str(),
            config.end_node_column.as_str(),
            config.geometry_column.as_str(),
        ];
        if let Some(weight) = config.weight_column.as_deref() {
            required.push(weight);
        }
        if let Some(missing) = required.into_iter().find(|name| {
            !columns
                .iter()
                .any(|column| column.eq_ignore_ascii_case(name))
        }) {
            return Err(Error::MissingColumn {
                table: Some(config.table.clone()),
                column: missing.to_string(),
            });
        }

        let mut selects = vec![
            quote_identifier(&config.start_node_column),
            quote_identifier(&config.end_node_column),
            quote_identifier(&config.geometry_column),
        ];
        if let Some(weight) = config.weight_column.as_deref() {
            selects.push(quote_identifier(weight));
        }
        let sql = format!(
            "SELECT {selects} FROM {table}",
            selects = selects.join(", "),
            table = quote_identifier(&config.table)
        );
        debug!(table = %config.table, %sql, "opened edge table");

        Ok(Self {
            connection,
            config,
            sql,
        })
    }

    pub fn config(&self) -> &EdgeTableConfig {
        &self.config
    }

    fn read_row(&self, index: usize, row: &Row<'_>) -> Result<EdgeRow> {
        let geometry = match row.get_ref(2)? {
            ValueRef::Null => Geometry::Empty,
            ValueRef::Text(text) => Geometry::Wkt(String::from_utf8_lossy(text).into_owned()),
            ValueRef::Blob(blob) => Geometry::Wkb(blob.to_vec()),
            ValueRef::Integer(value) => Geometry::Wkt(value.to_string()),
            ValueRef::Real(value) => Geometry::Wkt(value.to_string()),
        };

        let weight = match self.config.weight_column.as_deref() {
            Some(column) => {
                let value: Option<f64> = row.get(3)?;
                Some(value.ok_or_else(|| Error::NullWeight {
                    row: index,
                    column: column.to_string(),
                })?)
            }
            None => None,
        };

        Ok(EdgeRow {
            index,
            start_node: row.get(0)?,
            end_node: row.get(1)?,
            weight,
            geometry,
        })
    }
}

impl EdgeSource for SqliteEdgeSource<'_> {
    fn weight_column(&self) -> Option<&str> {
        self.config.weight_column.as_deref()
    }

    fn orientation(&self) -> Option<Orientation> {
        self.config.orientation
    }

    fn scan(&self, visit: &mut RowVisitor<'_>) -> Result<()> {
        let mut stmt = self.connection.prepare(&self.sql)?;
        let mut rows = stmt.query([])?;

        let mut index = 0usize;
        while let Some(row) = rows.next()? {
            let edge = self.read_row(index, row)?;
            index += 1;
            if let ControlFlow::Break(()) = visit(edge)? {
                break;
            }
        }
        Ok(())
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn table_exists(connection: &Connection, table: &str) -> Result<bool> {
    let mut stmt = connection.prepare(
        "SELECT 1 FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1 COLLATE NOCASE LIMIT 1",
    )?;
    let mut rows = stmt.query([table])?;
    Ok(rows.next()?.is_some())
}

fn table_columns(connection: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = connection.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let mut rows = stmt.query([table])?;

    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        let name: String = row.get(0)?;
        columns.push(name);
    }
    Ok(columns)
}

// Module exports for CLI subcommands
//
// Each module handles one subcommand. main.rs parses arguments and dispatches
// to these handlers.

pub mod components;
pub mod graph;
pub mod path;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use rusqlite::Connection;

use spatialgraph_lib::{open_database, EdgeTableConfig, Orientation, SqliteEdgeSource};

/// Environment variable consulted when `--db` is not given.
pub const DB_ENV_VAR: &str = "SPATIALGRAPH_DB";

/// Location and layout of the edge table shared by every subcommand.
#[derive(Debug, Clone)]
pub struct EdgeTableArgs {
    /// SQLite database file.
    pub db: Option<PathBuf>,
    /// Edge table name.
    pub table: String,
    /// Geometry column name.
    pub geometry_column: String,
    /// Start node column name.
    pub start_node_column: String,
    /// End node column name.
    pub end_node_column: String,
}

impl EdgeTableArgs {
    /// Database path from `--db`, falling back to `SPATIALGRAPH_DB`.
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.db {
            return Ok(path.clone());
        }
        match std::env::var_os(DB_ENV_VAR) {
            Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => bail!("no database given; pass --db or set {DB_ENV_VAR}"),
        }
    }

    /// Table configuration reading weights from `weight_column`, if any.
    pub fn config(
        &self,
        weight_column: Option<&str>,
        orientation: Option<Orientation>,
    ) -> EdgeTableConfig {
        let mut config = EdgeTableConfig::new(&self.table)
            .with_geometry_column(&self.geometry_column)
            .with_node_columns(&self.start_node_column, &self.end_node_column);
        if let Some(column) = weight_column {
            config = config.with_weight_column(column);
        }
        if let Some(orientation) = orientation {
            config = config.with_orientation(orientation);
        }
        config
    }

    pub fn connect(&self) -> Result<Connection> {
        let path = self.database_path()?;
        open_database(&path)
            .with_context(|| format!("failed to open database {}", path.display()))
    }
}

/// Open the edge table described by `config` on `connection`.
pub fn open_edges(
    connection: &Connection,
    config: EdgeTableConfig,
) -> Result<SqliteEdgeSource<'_>> {
    let table = config.table.clone();
    SqliteEdgeSource::open(connection, config)
        .with_context(|| format!("failed to open edge table '{table}'"))
}

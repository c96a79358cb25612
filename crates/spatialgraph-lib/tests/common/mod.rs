//! Shared fixtures for integration tests.

use std::path::PathBuf;

use rusqlite::{params, Connection};
use spatialgraph_lib::{Geometry, MemoryEdgeSource};
use tempfile::TempDir;

/// The three-edge network used throughout the path tests:
/// `1 -> 2 (1)`, `2 -> 3 (1)`, `1 -> 3 (5)`.
#[allow(dead_code)]
pub fn triangle() -> MemoryEdgeSource {
    MemoryEdgeSource::from_weighted_edges([(1, 2, 1.0), (2, 3, 1.0), (1, 3, 5.0)])
}

/// A SQLite edge table living in a temporary directory.
#[allow(dead_code)]
pub struct EdgeTableFixture {
    _temp_dir: TempDir,
    pub db_path: PathBuf,
}

#[allow(dead_code)]
impl EdgeTableFixture {
    /// Create a `roads` table with a `length` weight column holding `edges`.
    pub fn roads(edges: &[(i64, i64, f64)]) -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let db_path = temp_dir.path().join("network.db");
        let connection = Connection::open(&db_path).expect("create database");
        connection
            .execute_batch(
                "CREATE TABLE roads (
                    gid INTEGER PRIMARY KEY,
                    the_geom TEXT,
                    start_node INTEGER NOT NULL,
                    end_node INTEGER NOT NULL,
                    length REAL
                );",
            )
            .expect("create roads table");
        for (start, end, length) in edges {
            connection
                .execute(
                    "INSERT INTO roads (the_geom, start_node, end_node, length) VALUES (?1, ?2, ?3, ?4)",
                    params![line_between(*start, *end), start, end, length],
                )
                .expect("insert edge");
        }
        Self {
            _temp_dir: temp_dir,
            db_path,
        }
    }
}

/// WKT stored for the edge between `start` and `end` in fixtures.
#[allow(dead_code)]
pub fn line_between(start: i64, end: i64) -> String {
    format!("LINESTRING ({start} 0, {end} 0)")
}

#[allow(dead_code)]
pub fn wkt_between(start: i64, end: i64) -> Geometry {
    Geometry::wkt(line_between(start, end))
}

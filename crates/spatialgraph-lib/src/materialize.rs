//! Turning paths back into geometry-bearing rows.

use serde::Serialize;

use crate::graph::NodeId;
use crate::path::PathResult;
use crate::source::Geometry;

/// Column names of the output row schema, in order.
pub const OUTPUT_COLUMNS: [&str; 5] = ["the_geom", "gid", "start_node", "end_node", "weight"];

/// One traversed edge in an output row stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    /// Geometry of the edge, untransformed.
    pub the_geom: Geometry,
    /// 0-based position of the edge in traversal order.
    pub gid: usize,
    pub start_node: NodeId,
    pub end_node: NodeId,
    pub weight: f64,
}

/// Map every edge of `path` to an output row, in traversal order.
///
/// `start_node`/`end_node` are the endpoints the edge was stored with, so an
/// undirected path may list an edge whose `end_node` comes first in the walk.
/// A zero-edge path produces no rows.
pub fn materialize(path: &PathResult<'_>) -> Vec<OutputRow> {
    path.edges()
        .enumerate()
        .map(|(gid, edge)| OutputRow {
            the_geom: edge.geometry.clone(),
            gid,
            start_node: edge.source,
            end_node: edge.target,
            weight: edge.weight,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::orientation::Orientation;
    use crate::path::shortest_path;

    fn line(id: usize) -> Geometry {
        Geometry::wkt(format!("LINESTRING ({id} 0, {} 0)", id + 1))
    }

    #[test]
    fn rows_follow_traversal_order() {
        let mut graph = Graph::new(Orientation::Direct);
        graph.add_edge(1, 2, 1.0, line(0), 0);
        graph.add_edge(2, 3, 2.0, line(1), 1);
        graph.add_edge(3, 4, 3.0, line(2), 2);

        let path = shortest_path(&graph, 1, 4).unwrap().expect("path");
        let rows = materialize(&path);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows.iter().map(|row| row.gid).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(rows[1].the_geom, line(1));
        assert_eq!((rows[2].start_node, rows[2].end_node, rows[2].weight), (3, 4, 3.0));
    }

    #[test]
    fn trivial_path_has_no_rows() {
        let mut graph = Graph::new(Orientation::Direct);
        graph.add_edge(1, 2, 1.0, Geometry::Empty, 0);
        let path = shortest_path(&graph, 1, 1).unwrap().expect("trivial path");
        assert!(materialize(&path).is_empty());
    }

    #[test]
    fn rows_serialize_with_output_column_names() {
        let row = OutputRow {
            the_geom: Geometry::wkt("POINT (0 0)"),
            gid: 0,
            start_node: 1,
            end_node: 2,
            weight: 1.0,
        };
        let value = serde_json::to_value(&row).expect("serialize");
        for column in OUTPUT_COLUMNS {
            assert!(value.get(column).is_some(), "missing {column}");
        }
    }
}

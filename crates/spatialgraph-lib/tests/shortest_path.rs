mod common;

use spatialgraph_lib::{
    build_graph, materialize, shortest_path, CancellationToken, EdgeRow, Graph, MemoryEdgeSource,
    NodeId, Orientation,
};

use common::triangle;

fn graph(source: &MemoryEdgeSource, orientation: Orientation, weighted: bool) -> Graph {
    let column = weighted.then_some("weight");
    build_graph(source, orientation, column, &CancellationToken::new())
        .expect("build graph")
        .complete()
        .expect("build not cancelled")
}

fn edge_pairs(graph: &Graph, from: NodeId, to: NodeId) -> Option<Vec<(NodeId, NodeId)>> {
    shortest_path(graph, from, to)
        .expect("search succeeds")
        .map(|path| path.edges().map(|edge| (edge.source, edge.target)).collect())
}

#[test]
fn direct_triangle_prefers_the_two_hop_route() {
    let graph = graph(&triangle(), Orientation::Direct, true);
    let path = shortest_path(&graph, 1, 3).unwrap().expect("path exists");

    assert_eq!(edge_pairs(&graph, 1, 3), Some(vec![(1, 2), (2, 3)]));
    assert_eq!(path.total_weight(), 2.0);
    assert_eq!(path.nodes(), vec![1, 2, 3]);
}

#[test]
fn undirected_triangle_walks_back_through_node_two() {
    let graph = graph(&triangle(), Orientation::Undirect, true);
    let path = shortest_path(&graph, 3, 1).unwrap().expect("path exists");

    assert_eq!(path.total_weight(), 2.0);
    assert_eq!(path.nodes(), vec![3, 2, 1]);
}

#[test]
fn undirected_reachability_is_symmetric() {
    let source = MemoryEdgeSource::from_weighted_edges([
        (1, 2, 3.0),
        (2, 3, 1.5),
        (4, 3, 2.0),
        (5, 6, 1.0),
    ]);
    let graph = graph(&source, Orientation::Undirect, true);

    for a in 1..=6 {
        for b in 1..=6 {
            let forward = shortest_path(&graph, a, b).unwrap();
            let backward = shortest_path(&graph, b, a).unwrap();
            assert_eq!(forward.is_some(), backward.is_some(), "{a} <-> {b}");
            if let (Some(forward), Some(backward)) = (forward, backward) {
                assert_eq!(forward.total_weight(), backward.total_weight(), "{a} <-> {b}");
            }
        }
    }
}

#[test]
fn reversed_costs_mirror_direct_costs() {
    let source = MemoryEdgeSource::from_weighted_edges([
        (1, 2, 2.0),
        (2, 3, 0.5),
        (3, 4, 4.0),
        (1, 4, 9.0),
        (4, 2, 1.0),
    ]);
    let direct = graph(&source, Orientation::Direct, true);
    let reversed = graph(&source, Orientation::Reversed, true);

    for a in 1..=4 {
        for b in 1..=4 {
            let forward = shortest_path(&direct, a, b).unwrap().map(|p| p.total_weight());
            let mirrored = shortest_path(&reversed, b, a).unwrap().map(|p| p.total_weight());
            assert_eq!(forward, mirrored, "{a} -> {b}");
        }
    }
}

#[test]
fn unweighted_paths_cost_their_hop_count() {
    let source = MemoryEdgeSource::from_weighted_edges([
        (1, 2, 10.0),
        (2, 3, 10.0),
        (3, 4, 10.0),
        (1, 5, 0.5),
        (5, 6, 0.5),
        (6, 7, 0.5),
        (7, 4, 0.5),
    ]);
    let graph = graph(&source, Orientation::Direct, false);
    let path = shortest_path(&graph, 1, 4).unwrap().expect("path exists");

    assert_eq!(path.hop_count(), 3);
    assert_eq!(path.total_weight(), path.hop_count() as f64);
    assert_eq!(path.nodes(), vec![1, 2, 3, 4]);
}

#[test]
fn path_to_self_is_present_and_empty() {
    let graph = graph(&triangle(), Orientation::Direct, true);
    for node in [1, 2, 3] {
        let path = shortest_path(&graph, node, node).unwrap().expect("trivial path");
        assert!(path.is_empty());
        assert_eq!(path.total_weight(), 0.0);
        assert!(materialize(&path).is_empty());
    }
}

#[test]
fn unreachable_and_unknown_targets_have_no_path() {
    let graph = graph(&triangle(), Orientation::Direct, true);
    assert_eq!(edge_pairs(&graph, 3, 1), None);
    assert_eq!(edge_pairs(&graph, 1, 99), None);
    assert_eq!(edge_pairs(&graph, 99, 1), None);
}

#[test]
fn materialized_rows_number_the_traversed_edges() {
    let source = MemoryEdgeSource::from_weighted_edges((1..=6).map(|n| (n, n + 1, n as f64)));
    let graph = graph(&source, Orientation::Direct, true);
    let path = shortest_path(&graph, 1, 7).unwrap().expect("path exists");
    let rows = materialize(&path);

    assert_eq!(rows.len(), path.hop_count());
    assert_eq!(rows.iter().map(|row| row.gid).collect::<Vec<_>>(), (0..6).collect::<Vec<_>>());
    assert_eq!(rows.iter().map(|row| row.weight).sum::<f64>(), path.total_weight());
}

#[test]
fn parallel_edges_stay_distinct() {
    let source = MemoryEdgeSource::new([
        EdgeRow::new(0, 1, 2, common::wkt_between(1, 2)).with_weight(4.0),
        EdgeRow::new(0, 1, 2, spatialgraph_lib::Geometry::wkt("LINESTRING (1 0, 1 1, 2 0)"))
            .with_weight(3.0),
    ])
    .with_weight_column("weight");
    let graph = graph(&source, Orientation::Direct, true);

    assert_eq!(graph.edge_count(), 2);
    let path = shortest_path(&graph, 1, 2).unwrap().expect("path exists");
    let rows = materialize(&path);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].weight, 3.0);
    assert_eq!(
        rows[0].the_geom,
        spatialgraph_lib::Geometry::wkt("LINESTRING (1 0, 1 1, 2 0)")
    );
}

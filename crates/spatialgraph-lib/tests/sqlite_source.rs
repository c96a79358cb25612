mod common;

use spatialgraph_lib::{
    build_graph, connected_components, open_database, shortest_path_query, CancellationToken,
    EdgeTableConfig, Error, Orientation, ShortestPathRequest, SqliteEdgeSource,
};

use common::{wkt_between, EdgeTableFixture};

fn roads() -> EdgeTableFixture {
    EdgeTableFixture::roads(&[(1, 2, 1.0), (2, 3, 1.0), (1, 3, 5.0), (7, 8, 2.0)])
}

#[test]
fn weighted_query_over_sqlite_table() {
    let fixture = roads();
    let connection = open_database(&fixture.db_path).expect("open database");
    let source = SqliteEdgeSource::open(
        &connection,
        EdgeTableConfig::new("roads").with_weight_column("length"),
    )
    .expect("open edge table");

    let response = shortest_path_query(
        &source,
        &ShortestPathRequest::new(1, 3),
        &CancellationToken::new(),
    )
    .expect("query succeeds")
    .complete()
    .expect("not cancelled");

    assert!(response.path_found);
    assert_eq!(response.total_weight, Some(2.0));
    let rows: Vec<_> = response
        .rows
        .iter()
        .map(|row| (row.gid, row.start_node, row.end_node, row.the_geom.clone()))
        .collect();
    assert_eq!(
        rows,
        vec![(0, 1, 2, wkt_between(1, 2)), (1, 2, 3, wkt_between(2, 3))]
    );
}

#[test]
fn configured_orientation_is_used_by_default() {
    let fixture = roads();
    let connection = open_database(&fixture.db_path).expect("open database");
    let source = SqliteEdgeSource::open(
        &connection,
        EdgeTableConfig::new("roads")
            .with_weight_column("length")
            .with_orientation(Orientation::Undirect),
    )
    .expect("open edge table");

    let response = shortest_path_query(
        &source,
        &ShortestPathRequest::new(3, 1),
        &CancellationToken::new(),
    )
    .unwrap()
    .complete()
    .expect("not cancelled");
    assert_eq!(response.orientation, Orientation::Undirect);
    assert_eq!(response.total_weight, Some(2.0));
    // Undirected rows keep the endpoints the edge was stored with.
    assert_eq!(
        (response.rows[0].start_node, response.rows[0].end_node),
        (2, 3)
    );
}

#[test]
fn missing_weight_column_fails_before_reading_rows() {
    let fixture = roads();
    let connection = open_database(&fixture.db_path).expect("open database");
    let err = SqliteEdgeSource::open(
        &connection,
        EdgeTableConfig::new("roads").with_weight_column("cost"),
    )
    .unwrap_err();
    assert!(matches!(err, Error::MissingColumn { ref column, .. } if column == "cost"));
}

#[test]
fn missing_database_is_reported() {
    let fixture = roads();
    let err = open_database(&fixture.db_path.with_file_name("absent.db")).unwrap_err();
    assert!(matches!(err, Error::DatabaseNotFound { .. }));
}

#[test]
fn components_of_sqlite_network() {
    let fixture = roads();
    let connection = open_database(&fixture.db_path).expect("open database");
    let source =
        SqliteEdgeSource::open(&connection, EdgeTableConfig::new("roads")).expect("open table");
    let graph = build_graph(&source, Orientation::Direct, None, &CancellationToken::new())
        .unwrap()
        .complete()
        .expect("not cancelled");

    let components = connected_components(&graph, &CancellationToken::new())
        .complete()
        .expect("not cancelled");
    assert_eq!(components.components, vec![vec![1, 2, 3], vec![7, 8]]);
}

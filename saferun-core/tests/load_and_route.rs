use std::fs;
use std::path::PathBuf;

use saferun_core::prelude::*;

struct Fixture {
    dir: PathBuf,
}

impl Fixture {
    fn new(name: &str, nodes: &str, edges: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("saferun-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("create fixture dir");
        fs::write(dir.join("nodes.csv"), nodes).expect("write nodes");
        fs::write(dir.join("edges.csv"), edges).expect("write edges");
        Self { dir }
    }

    fn config(&self) -> RouteModelConfig {
        RouteModelConfig {
            nodes_path: self.dir.join("nodes.csv"),
            edges_path: self.dir.join("edges.csv"),
        }
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

const SQUARE_NODES: &str = "\
osmid,safety_score,x,y,street_count
10,4.0,128.530,35.850,3
20,2.0,128.532,35.850,2
30,,128.532,35.852,2
40,1.0,128.530,35.852,2
99,8.0,128.600,35.900,1
";

/// Two-way square 10-20-30-40 of 250 m sides, plus an extra one-way
/// shortcut row and a row with no length.
const SQUARE_EDGES: &str = "\
u,v,length,oneway
10,20,250.0,false
20,30,250.0,false
30,40,250.0,false
40,10,250.0,false
10,30,,true
bad,row,1,true
";

#[test]
fn loads_tables_with_defaults() {
    let fixture = Fixture::new("defaults", SQUARE_NODES, SQUARE_EDGES);
    let model = create_route_model(&fixture.config()).expect("model");
    let graph = &model.street_graph;

    // node 99 is not part of the edge list
    assert_eq!(model.node_count(), 4);
    assert_eq!(model.edge_count(), 9);
    assert!(graph.node_index(99).is_none());

    let idx = |id| graph.node_index(id).unwrap();
    assert_eq!(graph.node(idx(10)).unwrap().safety_score, 100.0);
    assert_eq!(graph.node(idx(40)).unwrap().safety_score, 25.0);
    assert_eq!(graph.node(idx(30)).unwrap().safety_score, 0.0);

    assert_eq!(graph.edge(idx(10), idx(30)).unwrap().length(), 1.0);
    assert!(graph.edge(idx(30), idx(10)).is_none());
    assert_eq!(graph.edge(idx(20), idx(10)).unwrap().length(), 250.0);
}

#[test]
fn missing_files_fail_loudly() {
    let config = RouteModelConfig {
        nodes_path: PathBuf::from("/nonexistent/nodes.csv"),
        edges_path: PathBuf::from("/nonexistent/edges.csv"),
    };

    assert!(matches!(create_route_model(&config), Err(Error::DataLoad(_))));
}

#[test]
fn empty_edge_list_is_rejected() {
    let fixture = Fixture::new("empty", SQUARE_NODES, "u,v,length\n");

    assert!(matches!(
        create_route_model(&fixture.config()),
        Err(Error::DataLoad(_))
    ));
}

#[test]
fn recommends_loops_around_the_square() {
    let fixture = Fixture::new("square", SQUARE_NODES, SQUARE_EDGES);
    let model = create_route_model(&fixture.config()).expect("model");

    let routes = model
        .recommend(
            35.8501,
            128.5301,
            0.5,
            &mut RandomOrder::seeded(17),
            &LoopSearchConfig::default(),
        )
        .expect("routes");

    assert!(!routes.is_empty());
    for route in &routes {
        assert_eq!(route.nodes.first(), Some(&10));
        assert_eq!(route.nodes.last(), Some(&10));
        assert!(route.length_m >= 425.0 && route.length_m <= 575.0);
        assert_eq!(route.waypoints.len(), route.nodes.len());
        assert_eq!(route.waypoints[0].lat, Some(35.850));
    }

    let json = serde_json::to_value(&routes).unwrap();
    assert!(json[0]["type"].is_string());
    assert!(json[0]["distance_km"].is_number());
}

#[test]
fn unlocated_graph_has_no_start_node() {
    let fixture = Fixture::new("unlocated", "osmid,safety_score,x,y\n", "u,v,length\n1,2,10\n");
    let model = create_route_model(&fixture.config()).expect("model");

    let result = model.recommend(
        35.0,
        128.0,
        1.0,
        &mut RandomOrder::seeded(1),
        &LoopSearchConfig::default(),
    );
    assert!(matches!(result, Err(Error::NoStartNode)));
}

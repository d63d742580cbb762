use std::collections::BTreeSet;

use depgraph_core::{DepGraph, build_graph};
use proptest::prelude::*;

fn build(mapping: &[(String, Vec<String>)]) -> DepGraph {
    build_graph(mapping.iter().map(|(key, deps)| (key, deps)))
}

fn arb_mapping() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    let name = "[a-f]{1,2}";
    prop::collection::vec((name, prop::collection::vec(name, 0..4)), 0..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn every_key_and_dependency_is_a_node(mapping in arb_mapping()) {
        let graph = build(&mapping);
        for (key, deps) in &mapping {
            prop_assert!(graph.has_node(key));
            for dep in deps {
                prop_assert!(graph.has_node(dep));
                prop_assert!(graph.has_edge(key, dep));
            }
        }
    }

    #[test]
    fn edges_are_deduplicated(mapping in arb_mapping()) {
        let graph = build(&mapping);
        let distinct: BTreeSet<(&str, &str)> = mapping
            .iter()
            .flat_map(|(key, deps)| deps.iter().map(move |dep| (key.as_str(), dep.as_str())))
            .collect();
        prop_assert_eq!(graph.edge_count(), distinct.len());
    }

    #[test]
    fn neighbors_always_resolve(mapping in arb_mapping()) {
        let graph = build(&mapping);
        let mut total = 0;
        for name in graph.node_names() {
            for dep in graph.neighbors(name).expect("enumerated node exists") {
                prop_assert!(graph.has_node(dep));
                total += 1;
            }
        }
        prop_assert_eq!(total, graph.edge_count());
    }

    #[test]
    fn roots_have_no_incoming_edges(mapping in arb_mapping()) {
        let graph = build(&mapping);
        let targets: BTreeSet<&str> = graph
            .node_names()
            .flat_map(|name| graph.neighbors(name).expect("enumerated node exists"))
            .collect();

        let roots: BTreeSet<&str> = graph.roots().into_iter().collect();
        let expected: BTreeSet<&str> = graph
            .node_names()
            .filter(|name| !targets.contains(name))
            .collect();
        prop_assert_eq!(roots, expected);
    }

    #[test]
    fn rebuilding_is_deterministic(mapping in arb_mapping()) {
        let a = build(&mapping);
        let b = build(&mapping);
        prop_assert_eq!(a.content_hash(), b.content_hash());
        let names_a: Vec<&str> = a.node_names().collect();
        let names_b: Vec<&str> = b.node_names().collect();
        prop_assert_eq!(names_a, names_b);
    }
}

#[test]
fn empty_graph_is_default() {
    let graph = DepGraph::default();
    assert!(graph.is_empty());
    assert_eq!(graph.content_hash(), DepGraph::new().content_hash());
}

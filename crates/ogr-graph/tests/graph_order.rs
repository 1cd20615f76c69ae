//! Ordering properties of the attribute graph.

use ogr_core::NamespacePath;
use ogr_graph::{AttributeGraph, DocumentHead, MetaTag};
use proptest::prelude::*;

#[test]
fn test_head_to_graph_keeps_repeated_structured_tags_apart() {
    let head = DocumentHead {
        meta: vec![
            MetaTag::new("og:image", "http://example.org/a.png"),
            MetaTag::new("og:image:width", "10"),
            MetaTag::new("og:image", "http://example.org/b.png"),
            MetaTag::new("og:image:height", "20"),
        ],
        ..DocumentHead::default()
    };
    let graph = head.graph();
    let images = graph.select_by("og:image");
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].children().next().unwrap().name(), "width");
    assert_eq!(images[1].children().next().unwrap().name(), "height");
}

proptest! {
    #[test]
    fn repeated_values_keep_emission_order(values in proptest::collection::vec("[a-z]{1,8}", 1..10)) {
        let path = NamespacePath::parse("article:tag").unwrap();
        let mut graph = AttributeGraph::new();
        for v in &values {
            graph.insert(&path, v.as_str());
        }
        let seen: Vec<String> = graph
            .select_by("article:tag")
            .iter()
            .filter_map(|n| n.content().map(str::to_string))
            .collect();
        prop_assert_eq!(seen, values.clone());
        prop_assert_eq!(graph.len(), values.len());
    }

    #[test]
    fn every_inserted_value_is_visited_once(
        pairs in proptest::collection::vec(("(og|article|book):[a-z]{1,5}", "[a-z0-9]{1,5}"), 0..20)
    ) {
        let mut graph = AttributeGraph::new();
        for (p, v) in &pairs {
            graph.insert(&NamespacePath::parse(p).unwrap(), v.as_str());
        }
        let mut visited: Vec<(String, String)> = graph
            .iter()
            .map(|n| (n.full_name(), n.content().unwrap_or_default().to_string()))
            .collect();
        let mut expected = pairs.clone();
        visited.sort();
        expected.sort();
        prop_assert_eq!(visited, expected);
    }
}

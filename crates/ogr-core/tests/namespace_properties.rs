//! Property tests for namespace paths and configuration overrides.

use ogr_core::{NamespacePath, ReaderConfig};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,10}"
}

proptest! {
    #[test]
    fn parse_joined_round_trip(segments in proptest::collection::vec(segment(), 1..6)) {
        let raw = segments.join(":");
        let path = NamespacePath::parse(&raw).unwrap();
        prop_assert_eq!(path.len(), segments.len());
        prop_assert_eq!(path.joined(), raw.to_lowercase());
        prop_assert_eq!(NamespacePath::parse(&path.joined()).unwrap(), path);
    }

    #[test]
    fn segments_are_lowercase(segments in proptest::collection::vec(segment(), 1..6)) {
        let path = NamespacePath::from_segments(&segments).unwrap();
        for s in path.segments() {
            prop_assert_eq!(s.clone(), s.to_lowercase());
        }
    }

    #[test]
    fn empty_segment_rejected(
        mut segments in proptest::collection::vec(segment(), 0..4),
        at in 0usize..5,
    ) {
        let at = at.min(segments.len());
        segments.insert(at, String::new());
        prop_assert!(NamespacePath::parse(&segments.join(":")).is_err());
    }

    #[test]
    fn parent_and_child_are_inverse(
        segments in proptest::collection::vec(segment(), 1..5),
        extra in segment(),
    ) {
        let path = NamespacePath::from_segments(&segments).unwrap();
        let child = path.child(&extra).unwrap();
        prop_assert_eq!(child.parent(), Some(path.clone()));
        prop_assert!(child.starts_with(&path));
        prop_assert_eq!(child.leaf(), extra.to_lowercase());
    }

    #[test]
    fn unparseable_override_is_rejected(value in "[a-z]{2,8}") {
        prop_assume!(value != "true" && value != "false");
        let result = ReaderConfig::default().with_overrides(|name| {
            (name == "OGR_STRICT").then(|| value.clone())
        });
        prop_assert!(result.is_err());
    }
}

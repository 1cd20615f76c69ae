//! Property tests for the type processors and the standard registry.

use ogr_core::{NamespacePath, ReaderConfig, Scalar};
use ogr_schema::{ProcessContext, Processor, SchemaRegistry, ValueOptions};
use proptest::prelude::*;

fn process(processor: &Processor, raw: &str, config: &ReaderConfig) -> Option<Scalar> {
    processor
        .process("prop", raw, ValueOptions::default(), &ProcessContext::new(config))
        .ok()
        .flatten()
}

#[test]
fn test_every_declared_path_resolves() {
    let registry = SchemaRegistry::standard().unwrap();
    for descriptor in registry.types() {
        let path = NamespacePath::parse(descriptor.namespace()).unwrap();
        assert!(registry.is_registered(&path));
    }
    for (alias, target) in registry.aliases() {
        let path = NamespacePath::parse(alias).unwrap();
        assert_eq!(registry.resolve(&path).unwrap().namespace(), target);
    }
}

#[test]
fn test_unknown_root_namespace_is_reported() {
    let registry = SchemaRegistry::standard().unwrap();
    let err = registry
        .resolve(&NamespacePath::parse("fb:app_id").unwrap())
        .unwrap_err();
    assert!(err.to_string().contains("fb:app_id is not a registered namespace"));
}

proptest! {
    #[test]
    fn integers_parse_back(n in any::<i64>()) {
        let config = ReaderConfig::default();
        prop_assert_eq!(process(&Processor::Integer, &n.to_string(), &config), Some(Scalar::Integer(n)));
    }

    #[test]
    fn strings_are_untouched(s in ".*") {
        let config = ReaderConfig::default();
        prop_assert_eq!(process(&Processor::String, &s, &config), Some(Scalar::Text(s.clone())));
    }

    #[test]
    fn absolute_urls_always_accepted(path in "[a-z0-9/]{0,20}", secure in any::<bool>()) {
        let config = ReaderConfig::default();
        let scheme = if secure { "https" } else { "http" };
        let url = format!("{scheme}://example.org/{path}");
        let options = ValueOptions { reference: true, ..ValueOptions::default() };
        let value = Processor::Url
            .process("url", &url, options, &ProcessContext::new(&config))
            .unwrap();
        prop_assert_eq!(value, Some(Scalar::Url(url.clone())));
    }

    #[test]
    fn enum_accepts_only_members(raw in "[a-z]{0,6}") {
        let config = ReaderConfig::default();
        let allowed = vec!["a".to_string(), "an".to_string(), "the".to_string()];
        let processor = Processor::Enum(allowed.clone());
        let accepted = process(&processor, &raw, &config).is_some();
        prop_assert_eq!(accepted, allowed.contains(&raw));
    }

    #[test]
    fn discarding_never_fails_optional_values(raw in ".*") {
        let config = ReaderConfig {
            discard_invalid_optional_properties: true,
            ..ReaderConfig::default()
        };
        for processor in [Processor::Integer, Processor::Float, Processor::Boolean, Processor::DateTime] {
            let result = processor.process("prop", &raw, ValueOptions::default(), &ProcessContext::new(&config));
            prop_assert!(result.is_ok());
        }
    }

    #[test]
    fn synthesized_urls_are_absolute(path in "[a-z0-9]{1,10}(/[a-z0-9]{1,10}){0,3}") {
        let config = ReaderConfig { synthesize_full_url: true, ..ReaderConfig::default() };
        let ctx = ProcessContext::new(&config).with_origin(Some("https://example.org/page"));
        let value = Processor::Url
            .process("url", &path, ValueOptions::default(), &ctx)
            .unwrap()
            .unwrap();
        let text = value.as_str().unwrap().to_string();
        prop_assert!(text.starts_with("https://example.org/"));
        prop_assert!(text.ends_with(&path));
    }
}

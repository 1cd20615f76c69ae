//! Post-build synthesis of missing `og` values.
//!
//! Each step is gated by its own configuration flag and only fills values
//! that are absent:
//!
//! - `synthesize_url`: `og:url` from the document origin.
//! - `synthesize_title`: `og:title` from the fallback title.
//! - `synthesize_image_content`: the first image's content from its
//!   resolved URL (`secure_url`, then `url`).

use ogr_core::{InvalidObjectError, Scalar};
use ogr_graph::OG_NAMESPACE;

use crate::context::BuildContext;
use crate::object::RootContainer;

pub fn synthesize(root: &mut RootContainer, ctx: &BuildContext) -> Result<(), InvalidObjectError> {
    let config = &ctx.config;
    let pctx = ctx.process_context();
    let Some(og) = root.get_mut(OG_NAMESPACE) else {
        return Ok(());
    };

    if config.synthesize_url && !og.is_set("url") {
        if let Some(origin) = ctx.origin.as_deref() {
            tracing::debug!(origin, "synthesizing og:url");
            og.set("url", origin, &pctx)?;
        }
    }

    if config.synthesize_title && !og.is_set("title") {
        if let Some(title) = ctx.fallback_title.as_deref() {
            tracing::debug!(title, "synthesizing og:title");
            og.set("title", title, &pctx)?;
        }
    }

    if config.synthesize_image_content {
        if let Some(image) = og.first_object_mut("image") {
            if image.content().is_none() {
                if let Some(url) = image.resolved_url().map(str::to_string) {
                    tracing::debug!(url = %url, "synthesizing image content");
                    image.set_content_value(Scalar::Url(url));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{OpenGraphObject, PropertyValue};
    use ogr_core::{NamespacePath, ReaderConfig};
    use ogr_schema::SchemaRegistry;

    fn object(registry: &SchemaRegistry, ns: &str) -> OpenGraphObject {
        let path = NamespacePath::parse(ns).unwrap();
        OpenGraphObject::new(registry.resolve(&path).unwrap().clone(), path)
    }

    fn root_with_og(registry: &SchemaRegistry) -> RootContainer {
        let mut root = RootContainer::new("website", None);
        root.insert("og", object(registry, "og"));
        root
    }

    #[test]
    fn url_from_origin() {
        let registry = SchemaRegistry::standard().unwrap();
        let mut root = root_with_og(&registry);
        let ctx = BuildContext::new(ReaderConfig {
            synthesize_url: true,
            ..ReaderConfig::default()
        })
        .with_origin("https://example.org/page");
        synthesize(&mut root, &ctx).unwrap();
        let url = root.og().unwrap().get("url").unwrap().and_then(|v| v.as_str());
        assert_eq!(url, Some("https://example.org/page"));
    }

    #[test]
    fn existing_url_kept() {
        let registry = SchemaRegistry::standard().unwrap();
        let mut root = root_with_og(&registry);
        let ctx = BuildContext::new(ReaderConfig {
            synthesize_url: true,
            ..ReaderConfig::default()
        })
        .with_origin("https://example.org/page");
        let pctx = ctx.process_context();
        root.get_mut("og")
            .unwrap()
            .set("url", "https://example.org/canonical", &pctx)
            .unwrap();
        synthesize(&mut root, &ctx).unwrap();
        let url = root.og().unwrap().get("url").unwrap().and_then(|v| v.as_str());
        assert_eq!(url, Some("https://example.org/canonical"));
    }

    #[test]
    fn title_only_when_enabled() {
        let registry = SchemaRegistry::standard().unwrap();
        let mut root = root_with_og(&registry);
        let ctx = BuildContext::new(ReaderConfig::default()).with_fallback_title("Page");
        synthesize(&mut root, &ctx).unwrap();
        assert!(!root.og().unwrap().is_set("title"));

        let ctx = BuildContext::new(ReaderConfig {
            synthesize_title: true,
            ..ReaderConfig::default()
        })
        .with_fallback_title("Page");
        synthesize(&mut root, &ctx).unwrap();
        assert!(root.og().unwrap().is_set("title"));
    }

    #[test]
    fn image_content_from_url() {
        let registry = SchemaRegistry::standard().unwrap();
        let mut root = root_with_og(&registry);
        let ctx = BuildContext::new(ReaderConfig {
            synthesize_image_content: true,
            ..ReaderConfig::default()
        });
        let pctx = ctx.process_context();
        let mut image = object(&registry, "og:image");
        image.set("url", "http://example.org/a.png", &pctx).unwrap();
        root.get_mut("og").unwrap().push("image", PropertyValue::Object(image));

        synthesize(&mut root, &ctx).unwrap();
        let image = root.og().unwrap().values("image").unwrap()[0].as_object().unwrap();
        assert_eq!(image.content().and_then(Scalar::as_str), Some("http://example.org/a.png"));
    }

    #[test]
    fn no_og_object_is_a_no_op() {
        let mut root = RootContainer::new("website", None);
        let ctx = BuildContext::new(ReaderConfig {
            synthesize_url: true,
            synthesize_title: true,
            synthesize_image_content: true,
            ..ReaderConfig::default()
        })
        .with_origin("https://example.org/");
        synthesize(&mut root, &ctx).unwrap();
        assert!(root.is_empty());
    }
}

//! # Standard Vocabulary
//!
//! The types and properties of the OpenGraph protocol (<https://ogp.me/>):
//! the `og` root with its structured `image`, `audio`, `video` and `locale`
//! subtypes, plus the `profile`, `article`, `book`, `video` and `music`
//! object types with their verticals.

use crate::descriptor::{ContentDescriptor, PropertyDescriptor as P, TypeDescriptor};
use crate::processor::Processor;
use crate::registry::{SchemaDefinitionError, SchemaRegistry};

/// Type names accepted in strict mode besides declared namespaces and
/// registered verticals.
pub const BASELINE_TYPES: &[&str] = &["website", "article", "book", "profile"];

/// The property naming the document's type.
pub const TYPE_PROPERTY: &str = "og:type";

/// Type assumed when a document does not declare one.
pub const DEFAULT_TYPE: &str = "website";

const VIDEO_VERTICALS: &[&str] = &["movie", "episode", "tv_show", "other"];

impl SchemaRegistry {
    /// A registry holding the standard OpenGraph vocabulary.
    pub fn standard() -> Result<Self, SchemaDefinitionError> {
        Self::builder().register_all(standard_types()).build()
    }
}

/// Every standard type declaration.
pub fn standard_types() -> Vec<TypeDescriptor> {
    vec![
        og(),
        og_image(),
        og_audio(),
        og_locale(),
        og_video(),
        profile(),
        article(),
        book(),
        video(),
        music(),
    ]
}

fn og() -> TypeDescriptor {
    TypeDescriptor::new("og")
        .property(P::string("type").required().downcase().default_value(DEFAULT_TYPE))
        .property(P::string("title").required())
        .property(P::url("image").image().required().collection())
        .property(P::url("url").required())
        .property(P::url("audio"))
        .property(P::string("description"))
        .property(P::enumeration("determiner", &["", "a", "an", "the", "auto"]).default_value(""))
        .property(P::string("locale"))
        .property(P::string("site_name"))
        .property(P::url("video"))
}

fn og_image() -> TypeDescriptor {
    TypeDescriptor::new("og:image")
        .content_descriptor_with(ContentDescriptor::new(Processor::Url).image())
        .property(P::url("url").image())
        .property(P::url("secure_url").image())
        .property(P::string("type"))
        .property(P::integer("width"))
        .property(P::integer("height"))
        .property(P::string("alt"))
}

fn og_audio() -> TypeDescriptor {
    TypeDescriptor::new("og:audio")
        .content(Processor::Url)
        .property(P::url("url"))
        .property(P::url("secure_url"))
        .property(P::string("type"))
}

fn og_locale() -> TypeDescriptor {
    TypeDescriptor::new("og:locale")
        .content(Processor::String)
        .property(P::string("alternate").collection())
}

fn og_video() -> TypeDescriptor {
    TypeDescriptor::new("og:video")
        .content(Processor::Url)
        .property(P::url("url"))
        .property(P::url("secure_url"))
        .property(P::string("type"))
        .property(P::integer("width"))
        .property(P::integer("height"))
        .property(P::string("alt"))
}

fn profile() -> TypeDescriptor {
    TypeDescriptor::new("profile")
        .content(Processor::Url)
        .property(P::string("first_name"))
        .property(P::string("last_name"))
        .property(P::string("username"))
        .property(P::enumeration("gender", &["male", "female"]))
        .property(P::string("role"))
}

fn article() -> TypeDescriptor {
    TypeDescriptor::new("article")
        .property(P::datetime("published_time"))
        .property(P::datetime("modified_time"))
        .property(P::datetime("expiration_time"))
        .property(P::url("author").collection().references("profile"))
        .property(P::string("section"))
        .property(P::string("tag").collection())
}

fn book() -> TypeDescriptor {
    TypeDescriptor::new("book")
        .property(P::url("author").collection().references("profile"))
        .property(P::string("isbn"))
        .property(P::datetime("release_date"))
        .property(P::string("tag").collection())
}

fn video() -> TypeDescriptor {
    TypeDescriptor::new("video")
        .content(Processor::Url)
        .property(P::url("actor").collection().references("profile").verticals(VIDEO_VERTICALS))
        .property(P::url("director").collection().references("profile").verticals(VIDEO_VERTICALS))
        .property(P::url("writer").collection().references("profile").verticals(VIDEO_VERTICALS))
        .property(P::integer("duration").verticals(VIDEO_VERTICALS))
        .property(P::datetime("release_date").verticals(VIDEO_VERTICALS))
        .property(P::string("tag").collection().verticals(VIDEO_VERTICALS))
        .property(P::url("series").references("video").verticals(&["episode"]))
}

fn music() -> TypeDescriptor {
    TypeDescriptor::new("music")
        .content(Processor::Url)
        .property(P::integer("duration").verticals(&["song"]))
        .property(P::url("album").collection().references("music").verticals(&["song"]))
        .property(P::integer("disc").verticals(&["song", "album", "playlist"]))
        .property(P::integer("track").verticals(&["song", "album", "playlist"]))
        .property(
            P::url("musician")
                .collection()
                .references("profile")
                .verticals(&["song", "album"]),
        )
        .property(P::url("song").references("music").verticals(&["album", "playlist"]))
        .property(P::datetime("release_date").verticals(&["album"]))
        .property(
            P::url("creator")
                .references("profile")
                .verticals(&["playlist", "radio_station"]),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ogr_core::NamespacePath;

    fn path(raw: &str) -> NamespacePath {
        NamespacePath::parse(raw).unwrap()
    }

    #[test]
    fn standard_registry_builds() {
        let registry = SchemaRegistry::standard().unwrap();
        assert_eq!(registry.len(), 10);
    }

    #[test]
    fn og_required_properties() {
        let registry = SchemaRegistry::standard().unwrap();
        let og = registry.resolve(&path("og")).unwrap();
        let required: Vec<_> = og.required_properties().map(|p| p.name()).collect();
        assert_eq!(required, vec!["type", "title", "image", "url"]);
    }

    #[test]
    fn og_media_properties_are_singular() {
        let registry = SchemaRegistry::standard().unwrap();
        let og = registry.resolve(&path("og")).unwrap();
        assert!(!og.property_named("audio").unwrap().is_collection());
        assert!(!og.property_named("video").unwrap().is_collection());
        assert!(og.property_named("image").unwrap().is_collection());
    }

    #[test]
    fn structured_subtypes_registered() {
        let registry = SchemaRegistry::standard().unwrap();
        for ns in ["og:image", "og:audio", "og:video", "og:locale"] {
            assert!(registry.is_registered(&path(ns)), "{ns}");
        }
        let image = registry.resolve(&path("og:image")).unwrap();
        assert!(image.content_descriptor().unwrap().is_image());
    }

    #[test]
    fn reference_aliases_resolve_to_targets() {
        let registry = SchemaRegistry::standard().unwrap();
        assert_eq!(
            registry.resolve(&path("article:author")).unwrap().namespace(),
            "profile"
        );
        assert_eq!(
            registry.resolve(&path("video:series")).unwrap().namespace(),
            "video"
        );
        assert_eq!(
            registry.resolve(&path("music:song")).unwrap().namespace(),
            "music"
        );
    }

    #[test]
    fn verticals_registered() {
        let registry = SchemaRegistry::standard().unwrap();
        for vertical in [
            "video.movie",
            "video.episode",
            "video.tv_show",
            "video.other",
            "music.song",
            "music.album",
            "music.playlist",
            "music.radio_station",
        ] {
            assert!(registry.is_vertical(vertical), "{vertical}");
        }
    }

    #[test]
    fn episode_allows_series_but_movie_does_not() {
        let registry = SchemaRegistry::standard().unwrap();
        let video = registry.type_descriptor("video").unwrap();
        assert!(video.allowed_in_vertical("episode").contains(&"series".to_string()));
        assert!(!video.allowed_in_vertical("movie").contains(&"series".to_string()));
    }

    #[test]
    fn type_defaults_to_website() {
        let registry = SchemaRegistry::standard().unwrap();
        let og = registry.type_descriptor("og").unwrap();
        let ty = og.property_named("type").unwrap();
        assert!(ty.is_downcased());
        assert_eq!(ty.default().and_then(|s| s.as_str()), Some(DEFAULT_TYPE));
    }
}

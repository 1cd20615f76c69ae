//! # Validator
//!
//! Runs over the built and pruned tree, every object recursively:
//!
//! - **Required properties** (when `validate_required` is on): each
//!   property flagged required must resolve to a value, counting declared
//!   defaults. `og:type` defaults to `website`, so it never fails.
//! - **Verticals**: when the document type is dotted (`video.movie`), each
//!   object of the `video` type that knows the `movie` vertical may only
//!   have properties set that are unrestricted or allowed for `movie`.

use ogr_core::{InvalidObjectError, ReaderConfig};

use crate::object::{OpenGraphObject, RootContainer};

pub fn validate(root: &RootContainer, config: &ReaderConfig) -> Result<(), InvalidObjectError> {
    let vertical = root.vertical();
    for (_, object) in root.iter() {
        validate_object(object, config, root.type_name(), vertical)?;
    }
    Ok(())
}

fn validate_object(
    object: &OpenGraphObject,
    config: &ReaderConfig,
    type_name: &str,
    vertical: Option<(&str, &str)>,
) -> Result<(), InvalidObjectError> {
    if config.validate_required {
        validate_required(object)?;
    }
    if let Some((family, short)) = vertical {
        validate_vertical(object, type_name, family, short)?;
    }
    for child in object.nested_objects() {
        validate_object(child, config, type_name, vertical)?;
    }
    Ok(())
}

fn validate_required(object: &OpenGraphObject) -> Result<(), InvalidObjectError> {
    for property in object.descriptor().required_properties() {
        if object.get(property.name())?.is_none() {
            return Err(InvalidObjectError::MissingRequired {
                property: property.name().to_string(),
                object: object.namespace().joined(),
            });
        }
    }
    Ok(())
}

fn validate_vertical(
    object: &OpenGraphObject,
    type_name: &str,
    family: &str,
    short: &str,
) -> Result<(), InvalidObjectError> {
    let descriptor = object.descriptor();
    if descriptor.namespace() != family || !descriptor.verticals().contains(short) {
        return Ok(());
    }
    let offending = object
        .populated_properties()
        .into_iter()
        .find(|name| {
            descriptor
                .property_named(name)
                .is_some_and(|p| !p.allows_vertical(short))
        });
    match offending {
        Some(property) => Err(InvalidObjectError::InvalidVerticalProperty {
            property: property.to_string(),
            vertical: type_name.to_string(),
            allowed: descriptor.allowed_in_vertical(short),
        }),
        None => Ok(()),
    }
}

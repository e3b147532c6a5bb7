//! Construction-time consistency checks for schema trees
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use crate::path::{FieldPath, PathSegment};
use crate::schema::error::{SchemaDefinitionError, SchemaResult};
use crate::schema::rule::PartialNode;
use crate::schema::{AnyOfRequired, SchemaKind, SchemaNode};

pub(super) fn check_node(node: &SchemaNode, location: &str) -> SchemaResult<()> {
    let kind = node.kind;

    if kind != SchemaKind::Object {
        for (keyword, used) in [
            ("properties", !node.properties.is_empty()),
            ("required", !node.required.is_empty()),
            ("anyOf", !node.any_of_required.is_empty()),
            ("allOf", !node.rules.is_empty()),
        ] {
            if used {
                return Err(SchemaDefinitionError::not_applicable(location, keyword, kind));
            }
        }
    }
    if kind != SchemaKind::Array && node.items.is_some() {
        return Err(SchemaDefinitionError::not_applicable(location, "items", kind));
    }
    if kind != SchemaKind::String {
        for (keyword, used) in [
            ("pattern", node.pattern.is_some()),
            ("maxLength", node.max_length.is_some()),
            ("format", node.format.is_some()),
        ] {
            if used {
                return Err(SchemaDefinitionError::not_applicable(location, keyword, kind));
            }
        }
    }
    if let Some(values) = &node.enum_values {
        check_enum(kind, values, location)?;
    }

    for field in &node.required {
        if node.property_node(field).is_none() {
            return Err(SchemaDefinitionError::UnknownRequiredField {
                location: location.to_string(),
                field: field.clone(),
            });
        }
    }
    for any_of in &node.any_of_required {
        check_any_of(node, any_of, location)?;
    }
    for (index, rule) in node.rules.iter().enumerate() {
        let rule_location = format!("{}/allOf/{}/then", location, index);
        check_partial(node, rule.consequence(), &rule_location)?;
    }

    for (name, child) in &node.properties {
        check_node(child, &format!("{}/properties/{}", location, name))?;
    }
    if let Some(items) = &node.items {
        check_node(items, &format!("{}/items", location))?;
    }
    Ok(())
}

/// A consequence may only narrow what the target node already declares
fn check_partial(node: &SchemaNode, partial: &PartialNode, location: &str) -> SchemaResult<()> {
    let kind = node.kind;

    if kind != SchemaKind::Object {
        if !partial.required.is_empty() {
            return Err(SchemaDefinitionError::not_applicable(location, "required", kind));
        }
        if !partial.any_of_required.is_empty() {
            return Err(SchemaDefinitionError::not_applicable(location, "anyOf", kind));
        }
        if !partial.properties.is_empty() {
            return Err(SchemaDefinitionError::not_applicable(location, "properties", kind));
        }
    }
    if partial.pattern.is_some() && kind != SchemaKind::String {
        return Err(SchemaDefinitionError::not_applicable(location, "pattern", kind));
    }
    if let Some(values) = &partial.enum_values {
        check_enum(kind, values, location)?;
    }

    for field in &partial.required {
        if node.property_node(field).is_none() {
            return Err(SchemaDefinitionError::UnknownRequiredField {
                location: location.to_string(),
                field: field.clone(),
            });
        }
    }
    for any_of in &partial.any_of_required {
        check_any_of(node, any_of, location)?;
    }
    for (name, child_partial) in &partial.properties {
        let child = node
            .property_node(name)
            .ok_or_else(|| SchemaDefinitionError::UnknownProperty {
                location: location.to_string(),
                field: name.clone(),
            })?;
        check_partial(child, child_partial, &format!("{}/properties/{}", location, name))?;
    }
    Ok(())
}

fn check_enum(kind: SchemaKind, values: &[crate::value::Value], location: &str) -> SchemaResult<()> {
    if matches!(kind, SchemaKind::Object | SchemaKind::Array) {
        return Err(SchemaDefinitionError::not_applicable(location, "enum", kind));
    }
    if values.is_empty() {
        return Err(SchemaDefinitionError::invalid_keyword(location, "enum", "must list at least one value"));
    }
    if values.iter().any(|v| !v.is_literal()) {
        return Err(SchemaDefinitionError::invalid_keyword(
            location,
            "enum",
            "values must be strings, numbers, booleans or null",
        ));
    }
    Ok(())
}

fn check_any_of(node: &SchemaNode, any_of: &AnyOfRequired, location: &str) -> SchemaResult<()> {
    if any_of.alternatives().is_empty() {
        return Err(SchemaDefinitionError::EmptyAlternatives {
            location: location.to_string(),
        });
    }
    for alternative in any_of.alternatives() {
        check_declared(node, alternative, location)?;
    }
    Ok(())
}

/// Every step of `path` must walk through declared object properties
fn check_declared(node: &SchemaNode, path: &FieldPath, location: &str) -> SchemaResult<()> {
    let mut current = node;
    for segment in path.segments() {
        let name = match segment {
            PathSegment::Key(name) => name,
            PathSegment::Index(_) => {
                return Err(SchemaDefinitionError::invalid_keyword(
                    location,
                    "anyOf",
                    format!("alternative '{}' must address object fields only", path),
                ))
            }
        };
        current = current
            .property_node(name)
            .ok_or_else(|| SchemaDefinitionError::UnknownProperty {
                location: location.to_string(),
                field: path.to_string(),
            })?;
    }
    if path.is_empty() {
        return Err(SchemaDefinitionError::invalid_keyword(location, "anyOf", "alternative path is empty"));
    }
    Ok(())
}

//! Reference on-disk form: a JSON-Schema-shaped document
//!
//! Nodes use `type`, `required`, `properties`, `items`, `enum`/`const`,
//! `pattern`, `maxLength`, `format`, `anyOf` and conditional rules written
//! as `allOf: [{"if": ..., "then": ...}]` or a bare `if`/`then` pair.
//! Field tests inside `if` are addressed from the record root, whatever
//! node the rule is declared on; `required` inside `if` tests presence.
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use crate::path::{FieldPath, PathSegment};
use crate::schema::error::{SchemaDefinitionError, SchemaResult};
use crate::schema::rule::{Condition, ConditionalRule, Matcher, PartialNode, Predicate};
use crate::schema::{AnyOfRequired, Format, Pattern, Schema, SchemaKind, SchemaNode};
use crate::value::Value;
use serde_json::{json, Map};

type Json = serde_json::Value;

/// Keywords accepted and ignored on any node
const ANNOTATIONS: &[&str] = &[
    "$schema",
    "$id",
    "$comment",
    "title",
    "description",
    "examples",
    "default",
];

pub(super) fn parse_schema(document: &Json) -> SchemaResult<Schema> {
    let root = parse_node(document, "#")?;
    let schema = Schema::new(root)?;
    Ok(match document.get("title").and_then(Json::as_str) {
        Some(title) => schema.with_title(title),
        None => schema,
    })
}

fn as_object<'a>(value: &'a Json, location: &str, keyword: &str) -> SchemaResult<&'a Map<String, Json>> {
    value
        .as_object()
        .ok_or_else(|| SchemaDefinitionError::invalid_keyword(location, keyword, "expected an object"))
}

fn string_list(value: &Json, location: &str, keyword: &str) -> SchemaResult<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| SchemaDefinitionError::invalid_keyword(location, keyword, "expected an array of strings"))?;
    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                SchemaDefinitionError::invalid_keyword(location, keyword, "expected an array of strings")
            })
        })
        .collect()
}

fn literal_list(value: &Json, location: &str, keyword: &str) -> SchemaResult<Vec<Value>> {
    let raw = match keyword {
        "const" => vec![value.clone()],
        _ => value
            .as_array()
            .cloned()
            .ok_or_else(|| SchemaDefinitionError::invalid_keyword(location, keyword, "expected an array"))?,
    };
    raw.iter()
        .map(|item| {
            Value::from_json(item)
                .map_err(|e| SchemaDefinitionError::invalid_keyword(location, keyword, e.to_string()))
        })
        .collect()
}

fn parse_pattern(value: &Json, location: &str) -> SchemaResult<Pattern> {
    let source = value
        .as_str()
        .ok_or_else(|| SchemaDefinitionError::invalid_keyword(location, "pattern", "expected a string"))?;
    Pattern::new(source).map_err(|source_error| SchemaDefinitionError::InvalidPattern {
        location: location.to_string(),
        pattern: source.to_string(),
        source: source_error,
    })
}

fn parse_kind(value: &Json, location: &str) -> SchemaResult<SchemaKind> {
    let name = value
        .as_str()
        .ok_or_else(|| SchemaDefinitionError::invalid_keyword(location, "type", "expected a string"))?;
    match name {
        "object" => Ok(SchemaKind::Object),
        "array" => Ok(SchemaKind::Array),
        "string" => Ok(SchemaKind::String),
        "number" | "integer" => Ok(SchemaKind::Number),
        "boolean" => Ok(SchemaKind::Boolean),
        other => Err(SchemaDefinitionError::UnknownType {
            location: location.to_string(),
            type_name: other.to_string(),
        }),
    }
}

fn parse_node(value: &Json, location: &str) -> SchemaResult<SchemaNode> {
    let object = as_object(value, location, "schema")?;
    let kind = match object.get("type") {
        Some(kind) => parse_kind(kind, location)?,
        None => SchemaKind::Any,
    };
    let mut node = SchemaNode::new(kind);

    for (keyword, entry) in object {
        match keyword.as_str() {
            "type" => {}
            "required" => node.required = string_list(entry, location, keyword)?,
            "properties" => {
                for (name, child) in as_object(entry, location, keyword)? {
                    let child_location = format!("{}/properties/{}", location, name);
                    node.properties.push((name.clone(), parse_node(child, &child_location)?));
                }
            }
            "items" => node.items = Some(Box::new(parse_node(entry, &format!("{}/items", location))?)),
            "enum" | "const" => node.enum_values = Some(literal_list(entry, location, keyword)?),
            "pattern" => node.pattern = Some(parse_pattern(entry, location)?),
            "maxLength" => {
                let max = entry.as_u64().ok_or_else(|| {
                    SchemaDefinitionError::invalid_keyword(location, keyword, "expected a non-negative integer")
                })?;
                node.max_length = Some(usize::try_from(max).unwrap_or(usize::MAX));
            }
            "format" => {
                let name = entry
                    .as_str()
                    .ok_or_else(|| SchemaDefinitionError::invalid_keyword(location, keyword, "expected a string"))?;
                node.format = Some(name.parse::<Format>().map_err(|format| {
                    SchemaDefinitionError::UnknownFormat {
                        location: location.to_string(),
                        format,
                    }
                })?);
            }
            "anyOf" => node
                .any_of_required
                .push(parse_any_of(entry, &format!("{}/anyOf", location))?),
            "allOf" => {
                let entries = entry.as_array().ok_or_else(|| {
                    SchemaDefinitionError::invalid_keyword(location, keyword, "expected an array of if/then rules")
                })?;
                for (index, rule) in entries.iter().enumerate() {
                    let rule_location = format!("{}/allOf/{}", location, index);
                    let rule_object = as_object(rule, &rule_location, "allOf")?;
                    if let Some(extra) = rule_object.keys().find(|k| !matches!(k.as_str(), "if" | "then")) {
                        return Err(SchemaDefinitionError::UnsupportedKeyword {
                            location: rule_location,
                            keyword: extra.clone(),
                        });
                    }
                    node.rules.push(parse_rule(rule_object, &rule_location)?);
                }
            }
            "if" | "then" => {}
            "additionalProperties" if entry == &Json::Bool(true) => {}
            other if ANNOTATIONS.contains(&other) => {}
            other => {
                return Err(SchemaDefinitionError::UnsupportedKeyword {
                    location: location.to_string(),
                    keyword: other.to_string(),
                })
            }
        }
    }

    if object.contains_key("if") || object.contains_key("then") {
        node.rules.push(parse_rule(object, location)?);
    }

    Ok(node)
}

fn parse_rule(object: &Map<String, Json>, location: &str) -> SchemaResult<ConditionalRule> {
    let (Some(condition), Some(consequence)) = (object.get("if"), object.get("then")) else {
        return Err(SchemaDefinitionError::invalid_keyword(
            location,
            "if",
            "conditional rules need both 'if' and 'then'",
        ));
    };

    let mut predicate = Predicate::new();
    parse_predicate(condition, &format!("{}/if", location), &FieldPath::root(), &mut predicate)?;
    let consequence = parse_partial(consequence, &format!("{}/then", location))?;
    Ok(ConditionalRule::new(predicate, consequence))
}

fn parse_predicate(value: &Json, location: &str, prefix: &FieldPath, predicate: &mut Predicate) -> SchemaResult<()> {
    let object = as_object(value, location, "if")?;
    for (keyword, entry) in object {
        match keyword.as_str() {
            "properties" => {
                for (name, test) in as_object(entry, location, keyword)? {
                    let field_location = format!("{}/properties/{}", location, name);
                    parse_field_test(test, &field_location, &prefix.child(name.as_str()), predicate)?;
                }
            }
            "required" => {
                for name in string_list(entry, location, keyword)? {
                    predicate.push(Condition::present(prefix.child(name)));
                }
            }
            other if ANNOTATIONS.contains(&other) => {}
            other => {
                return Err(SchemaDefinitionError::UnsupportedKeyword {
                    location: location.to_string(),
                    keyword: other.to_string(),
                })
            }
        }
    }
    Ok(())
}

/// A field test is `enum`/`const` on the field itself, nested `properties`, or both
fn parse_field_test(value: &Json, location: &str, path: &FieldPath, predicate: &mut Predicate) -> SchemaResult<()> {
    let object = as_object(value, location, "properties")?;
    for (keyword, entry) in object {
        match keyword.as_str() {
            "enum" | "const" => {
                let allowed = literal_list(entry, location, keyword)?;
                predicate.push(Condition::new(path.clone(), allowed));
            }
            "properties" | "required" => {}
            other if ANNOTATIONS.contains(&other) => {}
            other => {
                return Err(SchemaDefinitionError::UnsupportedKeyword {
                    location: location.to_string(),
                    keyword: other.to_string(),
                })
            }
        }
    }
    let nested: Map<String, Json> = object
        .iter()
        .filter(|(keyword, _)| matches!(keyword.as_str(), "properties" | "required"))
        .map(|(keyword, entry)| (keyword.clone(), entry.clone()))
        .collect();
    if !nested.is_empty() {
        parse_predicate(&Json::Object(nested), location, path, predicate)?;
    }
    Ok(())
}

fn parse_partial(value: &Json, location: &str) -> SchemaResult<PartialNode> {
    let object = as_object(value, location, "then")?;
    let mut partial = PartialNode::new();
    for (keyword, entry) in object {
        match keyword.as_str() {
            "required" => partial.required = string_list(entry, location, keyword)?,
            "anyOf" => partial
                .any_of_required
                .push(parse_any_of(entry, &format!("{}/anyOf", location))?),
            "allOf" => {
                let groups = parse_any_of_groups(entry, &format!("{}/allOf", location))?;
                partial.any_of_required.extend(groups);
            }
            "enum" | "const" => partial.enum_values = Some(literal_list(entry, location, keyword)?),
            "pattern" => partial.pattern = Some(parse_pattern(entry, location)?),
            "properties" => {
                for (name, child) in as_object(entry, location, keyword)? {
                    let child_location = format!("{}/properties/{}", location, name);
                    partial.properties.push((name.clone(), parse_partial(child, &child_location)?));
                }
            }
            other if ANNOTATIONS.contains(&other) => {}
            other => {
                return Err(SchemaDefinitionError::UnsupportedKeyword {
                    location: location.to_string(),
                    keyword: other.to_string(),
                })
            }
        }
    }
    Ok(partial)
}

/// `allOf: [{"anyOf": [...]}, ...]` carries further any-of groups of one consequence
fn parse_any_of_groups(value: &Json, location: &str) -> SchemaResult<Vec<AnyOfRequired>> {
    let entries = value
        .as_array()
        .ok_or_else(|| SchemaDefinitionError::invalid_keyword(location, "allOf", "expected an array"))?;
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let entry_location = format!("{}/{}", location, index);
            let object = as_object(entry, &entry_location, "allOf")?;
            match (object.get("anyOf"), object.len()) {
                (Some(any_of), 1) => parse_any_of(any_of, &format!("{}/anyOf", entry_location)),
                _ => Err(SchemaDefinitionError::invalid_keyword(
                    entry_location.as_str(),
                    "allOf",
                    "inside 'then' each entry must hold a single 'anyOf'",
                )),
            }
        })
        .collect()
}

/// `anyOf: [{"required": ["a"]}, {"properties": {"b": {"required": ["c"]}}}]`
fn parse_any_of(value: &Json, location: &str) -> SchemaResult<AnyOfRequired> {
    let entries = value
        .as_array()
        .ok_or_else(|| SchemaDefinitionError::invalid_keyword(location, "anyOf", "expected an array"))?;
    let alternatives = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_alternative(entry, &format!("{}/{}", location, index), FieldPath::root()))
        .collect::<SchemaResult<Vec<_>>>()?;
    Ok(AnyOfRequired::new(alternatives))
}

fn parse_alternative(value: &Json, location: &str, prefix: FieldPath) -> SchemaResult<FieldPath> {
    let object = as_object(value, location, "anyOf")?;
    let shape_error = || {
        SchemaDefinitionError::invalid_keyword(
            location,
            "anyOf",
            "each alternative must require exactly one field, optionally nested under single-key properties",
        )
    };

    match (object.get("required"), object.get("properties"), object.len()) {
        (Some(required), None, 1) => match string_list(required, location, "required")?.as_slice() {
            [name] => Ok(prefix.child(name.as_str())),
            _ => Err(shape_error()),
        },
        (None, Some(properties), 1) => {
            let properties = as_object(properties, location, "properties")?;
            match properties.iter().next() {
                Some((name, nested)) if properties.len() == 1 => {
                    let nested_location = format!("{}/properties/{}", location, name);
                    parse_alternative(nested, &nested_location, prefix.child(name.as_str()))
                }
                _ => Err(shape_error()),
            }
        }
        _ => Err(shape_error()),
    }
}

pub(super) fn render_schema(schema: &Schema) -> Json {
    let mut document = Map::new();
    document.insert("$schema".to_string(), json!("http://json-schema.org/draft-07/schema#"));
    if let Some(title) = schema.title() {
        document.insert("title".to_string(), json!(title));
    }
    if let Json::Object(root) = render_node(schema.root()) {
        document.extend(root);
    }
    Json::Object(document)
}

fn render_literals(values: &[Value]) -> Json {
    Json::Array(values.iter().map(Value::to_json).collect())
}

fn render_node(node: &SchemaNode) -> Json {
    let mut object = Map::new();
    if node.kind() != SchemaKind::Any {
        object.insert("type".to_string(), json!(node.kind().name()));
    }
    if !node.required().is_empty() {
        object.insert("required".to_string(), json!(node.required()));
    }
    if !node.properties.is_empty() {
        let properties: Map<String, Json> = node
            .properties()
            .map(|(name, child)| (name.to_string(), render_node(child)))
            .collect();
        object.insert("properties".to_string(), Json::Object(properties));
    }
    if let Some(items) = node.items() {
        object.insert("items".to_string(), render_node(items));
    }
    if let Some(values) = node.enum_values() {
        object.insert("enum".to_string(), render_literals(values));
    }
    if let Some(pattern) = node.pattern() {
        object.insert("pattern".to_string(), json!(pattern.as_str()));
    }
    if let Some(max_length) = node.max_length() {
        object.insert("maxLength".to_string(), json!(max_length));
    }
    if let Some(format) = node.format() {
        object.insert("format".to_string(), json!(format.name()));
    }
    // A single anyOf keyword per node; later requirements are only reachable
    // through the builder and render under allOf with an empty predicate.
    let mut rules: Vec<Json> = node.rules().iter().map(render_rule).collect();
    if let Some((first, rest)) = node.any_of_required().split_first() {
        object.insert("anyOf".to_string(), render_any_of(first));
        for any_of in rest {
            rules.push(json!({"if": {}, "then": {"anyOf": render_any_of(any_of)}}));
        }
    }
    if !rules.is_empty() {
        object.insert("allOf".to_string(), Json::Array(rules));
    }
    Json::Object(object)
}

fn render_rule(rule: &ConditionalRule) -> Json {
    let mut condition = Map::new();
    for test in rule.predicate().conditions() {
        insert_condition(&mut condition, test.path().segments(), test.matcher());
    }
    json!({"if": Json::Object(condition), "then": render_partial(rule.consequence())})
}

fn insert_condition(target: &mut Map<String, Json>, segments: &[PathSegment], matcher: &Matcher) {
    let Some((PathSegment::Key(name), rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() && *matcher == Matcher::Present {
        let required = target
            .entry("required")
            .or_insert_with(|| Json::Array(Vec::new()));
        if let Json::Array(names) = required {
            names.push(json!(name));
        }
        return;
    }
    let properties = target
        .entry("properties")
        .or_insert_with(|| Json::Object(Map::new()));
    let Json::Object(properties) = properties else {
        return;
    };
    let field = properties
        .entry(name.clone())
        .or_insert_with(|| Json::Object(Map::new()));
    let Json::Object(field) = field else {
        return;
    };
    match matcher {
        Matcher::OneOf(allowed) if rest.is_empty() => {
            field.insert("enum".to_string(), render_literals(allowed));
        }
        _ => insert_condition(field, rest, matcher),
    }
}

fn render_partial(partial: &PartialNode) -> Json {
    let mut object = Map::new();
    if !partial.required().is_empty() {
        object.insert("required".to_string(), json!(partial.required()));
    }
    if let Some((first, rest)) = partial.any_of_required().split_first() {
        object.insert("anyOf".to_string(), render_any_of(first));
        if !rest.is_empty() {
            let groups = rest.iter().map(|any_of| json!({"anyOf": render_any_of(any_of)})).collect();
            object.insert("allOf".to_string(), Json::Array(groups));
        }
    }
    if let Some(values) = partial.enum_values() {
        object.insert("enum".to_string(), render_literals(values));
    }
    if let Some(pattern) = partial.pattern() {
        object.insert("pattern".to_string(), json!(pattern.as_str()));
    }
    if partial.properties().next().is_some() {
        let properties: Map<String, Json> = partial
            .properties()
            .map(|(name, child)| (name.to_string(), render_partial(child)))
            .collect();
        object.insert("properties".to_string(), Json::Object(properties));
    }
    Json::Object(object)
}

fn render_any_of(any_of: &AnyOfRequired) -> Json {
    Json::Array(
        any_of
            .alternatives()
            .iter()
            .map(|path| render_alternative(path.segments()))
            .collect(),
    )
}

fn render_alternative(segments: &[PathSegment]) -> Json {
    match segments {
        [PathSegment::Key(name)] => json!({"required": [name]}),
        [PathSegment::Key(name), rest @ ..] => json!({"properties": {name: render_alternative(rest)}}),
        _ => json!({}),
    }
}

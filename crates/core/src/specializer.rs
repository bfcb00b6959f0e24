//! OpenAPI Specializer
//!
//! Turns the generic template into the contract for one concrete object.
//! Each step below is an isolated transformation over a JSON tree; they are
//! composed by [`specialize`] in a fixed order, because later steps rely on
//! the schemas registered and the paths renamed by earlier ones.
//!
//! The template itself is never touched. [`specialize`] clones it up front, so
//! the function is pure over `(template, fields, object, domain, version)`.

use crate::error::{Error, Result};
use crate::mapping::{UnmappedFieldType, build_properties};
use crate::metadata::FieldDescriptor;
use crate::template::OpenApiTemplate;
use crate::urls::server_url;
use serde_json::{Map, Value};
use tracing::debug;

const QUERY_PATH: &str = "/query";
const COLLECTION_PATH: &str = "/sobjects/{sObject}";
const ITEM_PATH: &str = "/sobjects/{sObject}/{id}";
const JSON_MEDIA: &str = "application/json";
const XML_MEDIA: &str = "application/xml";

/// The identifier carried in the path, never in a request body.
const ID_PROPERTY: &str = "Id";
const SOBJECT_PARAMETER: &str = "sObject";

/// A specialized OpenAPI document, plus the fields whose types had to fall
/// back to `string`.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApiDocument {
    document: Value,
    warnings: Vec<UnmappedFieldType>,
}

impl OpenApiDocument {
    pub fn as_value(&self) -> &Value {
        &self.document
    }

    pub fn into_value(self) -> Value {
        self.document
    }

    pub fn warnings(&self) -> &[UnmappedFieldType] {
        &self.warnings
    }
}

pub fn query_result_name(object: &str) -> String {
    format!("QueryResult{}", object)
}

pub fn sobject_name(object: &str) -> String {
    format!("SObject{}", object)
}

fn schema_ref(name: &str) -> String {
    format!("#/components/schemas/{}", name)
}

/// Specializes `template` for `object`.
pub fn specialize(
    template: &OpenApiTemplate,
    fields: &[FieldDescriptor],
    object: &str,
    domain: &str,
    version: &str,
) -> Result<OpenApiDocument> {
    let properties = build_properties(fields);
    let mut document = template.document().clone();

    let query_result = build_query_result_schema(&document, &properties.properties)?;
    let sobject = build_sobject_schema(&document, &properties.properties)?;
    register_schemas(&mut document, object, query_result, sobject)?;
    set_server_url(&mut document, domain, version)?;
    rewrite_query_path(&mut document, object)?;
    rewrite_collection_path(&mut document, object)?;
    rewrite_item_path(&mut document, object)?;

    debug!(
        object,
        fields = fields.len(),
        unmapped = properties.warnings.len(),
        "Template specialized"
    );

    Ok(OpenApiDocument {
        document,
        warnings: properties.warnings,
    })
}

/// Step 1: the generic `QueryResult` with the field properties injected into
/// its record items.
pub fn build_query_result_schema(document: &Value, properties: &Map<String, Value>) -> Result<Value> {
    let mut schema = lookup(document, &["components", "schemas", "QueryResult"])?.clone();
    let items = object_at(&mut schema, &["properties", "records", "items"])
        .map_err(|e| in_schema(e, "QueryResult"))?;
    items.insert("properties".to_string(), Value::Object(properties.clone()));
    Ok(schema)
}

/// Step 2: the generic `SObject` without its `Id`, extended with the field
/// properties. Field properties replace template properties of the same name;
/// `Id` stays out even when the describe result lists it.
pub fn build_sobject_schema(document: &Value, properties: &Map<String, Value>) -> Result<Value> {
    let mut schema = lookup(document, &["components", "schemas", "SObject"])?.clone();
    let target = object_at(&mut schema, &["properties"]).map_err(|e| in_schema(e, "SObject"))?;

    target.shift_remove(ID_PROPERTY);
    for (name, property) in properties {
        if name != ID_PROPERTY {
            target.insert(name.clone(), property.clone());
        }
    }
    Ok(schema)
}

/// Step 3: adds `QueryResult<Object>` and `SObject<Object>` to the schema
/// registry.
pub fn register_schemas(
    document: &mut Value,
    object: &str,
    query_result: Value,
    sobject: Value,
) -> Result<()> {
    let schemas = object_at(document, &["components", "schemas"])?;
    schemas.insert(query_result_name(object), query_result);
    schemas.insert(sobject_name(object), sobject);
    Ok(())
}

/// Step 4: points the single server entry at the object's API base.
pub fn set_server_url(document: &mut Value, domain: &str, version: &str) -> Result<()> {
    let server = object_at(document, &["servers", "0"])?;
    server.insert("url".to_string(), Value::String(server_url(domain, version)));
    Ok(())
}

/// Step 5: the `/query` operation returns `QueryResult<Object>` in both media
/// types.
pub fn rewrite_query_path(document: &mut Value, object: &str) -> Result<()> {
    let target = schema_ref(&query_result_name(object));
    let operation = object_at(document, &["paths", QUERY_PATH, "get"])?;

    append_operation_id(operation, object, "paths./query.get")?;
    for media in [XML_MEDIA, JSON_MEDIA] {
        let schema = object_at_in(
            operation,
            &["responses", "200", "content", media, "schema"],
            "paths./query.get",
        )?;
        schema.insert("$ref".to_string(), Value::String(target.clone()));
    }
    Ok(())
}

/// Step 6: `/sobjects/{sObject}` becomes `/sobjects/<Object>` with only the
/// create operation left.
pub fn rewrite_collection_path(document: &mut Value, object: &str) -> Result<()> {
    let path = format!("/sobjects/{}", object);
    let paths = object_at(document, &["paths"])?;
    rename_key(paths, COLLECTION_PATH, &path)?;

    let item = object_at_in(paths, &[path.as_str()], "paths")?;
    item.shift_remove("get");

    let location = format!("paths.{}.post", path);
    let create = object_at_in(item, &["post"], &format!("paths.{}", path))?;
    append_operation_id(create, object, &location)?;
    strip_sobject_parameter(create, &location)?;
    retarget_request_body(create, &schema_ref(&sobject_name(object)), &location)?;
    Ok(())
}

/// Step 7: `/sobjects/{sObject}/{id}` becomes `/sobjects/<Object>/{id}` and
/// its get, delete and patch operations are bound to `SObject<Object>`.
pub fn rewrite_item_path(document: &mut Value, object: &str) -> Result<()> {
    let path = format!("/sobjects/{}/{{id}}", object);
    let sobject_ref = schema_ref(&sobject_name(object));
    let paths = object_at(document, &["paths"])?;
    rename_key(paths, ITEM_PATH, &path)?;
    let item = object_at_in(paths, &[path.as_str()], "paths")?;
    let base = format!("paths.{}", path);

    let location = format!("{}.get", base);
    let get = object_at_in(item, &["get"], &base)?;
    append_operation_id(get, object, &location)?;
    strip_sobject_parameter(get, &location)?;
    let schema = object_at_in(get, &["responses", "200", "content", JSON_MEDIA, "schema"], &location)?;
    schema.insert("$ref".to_string(), Value::String(sobject_ref.clone()));

    let location = format!("{}.delete", base);
    let delete = object_at_in(item, &["delete"], &base)?;
    append_operation_id(delete, object, &location)?;
    strip_sobject_parameter(delete, &location)?;

    let location = format!("{}.patch", base);
    let patch = object_at_in(item, &["patch"], &base)?;
    append_operation_id(patch, object, &location)?;
    strip_sobject_parameter(patch, &location)?;
    retarget_request_body(patch, &sobject_ref, &location)?;
    Ok(())
}

fn append_operation_id(operation: &mut Map<String, Value>, object: &str, location: &str) -> Result<()> {
    match operation.get_mut("operationId") {
        Some(Value::String(id)) => {
            id.push_str(object);
            Ok(())
        }
        _ => Err(Error::TemplateShape(format!("{}.operationId", location))),
    }
}

fn strip_sobject_parameter(operation: &mut Map<String, Value>, location: &str) -> Result<()> {
    let parameters = operation
        .get_mut("parameters")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| Error::TemplateShape(format!("{}.parameters", location)))?;
    parameters.retain(|p| p.get("name").and_then(Value::as_str) != Some(SOBJECT_PARAMETER));
    Ok(())
}

/// Drops the placeholder examples and points the JSON request body at `target`.
fn retarget_request_body(operation: &mut Map<String, Value>, target: &str, location: &str) -> Result<()> {
    let media = object_at_in(operation, &["requestBody", "content", JSON_MEDIA], location)?;
    media.shift_remove("examples");
    let schema = object_at_in(media, &["schema"], &format!("{}.requestBody.content.{}", location, JSON_MEDIA))?;
    schema.insert("$ref".to_string(), Value::String(target.to_string()));
    Ok(())
}

/// Renames `from` to `to` without moving the entry.
fn rename_key(map: &mut Map<String, Value>, from: &str, to: &str) -> Result<()> {
    if !map.contains_key(from) {
        return Err(Error::TemplateShape(format!("paths.{}", from)));
    }
    *map = std::mem::take(map)
        .into_iter()
        .map(|(key, value)| if key == from { (to.to_string(), value) } else { (key, value) })
        .collect();
    Ok(())
}

fn lookup<'a>(root: &'a Value, keys: &[&str]) -> Result<&'a Value> {
    let mut current = root;
    for (depth, key) in keys.iter().enumerate() {
        current = match current {
            Value::Object(map) => map.get(*key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
        .ok_or_else(|| Error::TemplateShape(keys[..=depth].join(".")))?;
    }
    Ok(current)
}

fn lookup_mut<'a>(root: &'a mut Value, keys: &[&str]) -> Result<&'a mut Value> {
    let mut current = root;
    for (depth, key) in keys.iter().enumerate() {
        current = match current {
            Value::Object(map) => map.get_mut(*key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get_mut(i)),
            _ => None,
        }
        .ok_or_else(|| Error::TemplateShape(keys[..=depth].join(".")))?;
    }
    Ok(current)
}

/// The JSON object at `keys` below `root`.
fn object_at<'a>(root: &'a mut Value, keys: &[&str]) -> Result<&'a mut Map<String, Value>> {
    lookup_mut(root, keys)?
        .as_object_mut()
        .ok_or_else(|| Error::TemplateShape(keys.join(".")))
}

/// Like [`object_at`], starting from an object already reached at `location`.
fn object_at_in<'a>(
    map: &'a mut Map<String, Value>,
    keys: &[&str],
    location: &str,
) -> Result<&'a mut Map<String, Value>> {
    let (first, rest) = keys
        .split_first()
        .ok_or_else(|| Error::TemplateShape(location.to_string()))?;
    let value = map
        .get_mut(*first)
        .ok_or_else(|| Error::TemplateShape(format!("{}.{}", location, first)))?;
    let location = format!("{}.{}", location, first);
    object_at(value, rest).map_err(|e| relocate(e, &location))
}

fn relocate(err: Error, location: &str) -> Error {
    match err {
        Error::TemplateShape(inner) if inner.is_empty() => Error::TemplateShape(location.to_string()),
        Error::TemplateShape(inner) => Error::TemplateShape(format!("{}.{}", location, inner)),
        other => other,
    }
}

fn in_schema(err: Error, schema: &str) -> Error {
    relocate(err, &format!("components.schemas.{}", schema))
}

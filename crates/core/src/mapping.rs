//! Field Type Mapping
//!
//! Translates remote field descriptors into OpenAPI property schemas. The
//! mapping is total: tags without an entry fall back to a plain `string` and
//! are reported as [`UnmappedFieldType`] warnings instead of failing the run.

use crate::metadata::{FieldDescriptor, SourceFieldType};
use serde_json::{Map, Value};
use tracing::warn;

/// The OpenAPI `type` keyword values a mapped property can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenApiType {
    String,
    Number,
    Integer,
    Object,
    Boolean,
}

impl OpenApiType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Object => "object",
            Self::Boolean => "boolean",
        }
    }
}

/// The schema of a single property inside `SObject<Object>` and the
/// `QueryResult<Object>` record items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenApiProperty {
    pub kind: OpenApiType,
    pub format: Option<&'static str>,
    pub read_only: Option<bool>,
}

impl From<OpenApiProperty> for Value {
    fn from(property: OpenApiProperty) -> Self {
        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::from(property.kind.as_str()));
        if let Some(read_only) = property.read_only {
            schema.insert("readOnly".to_string(), Value::Bool(read_only));
        }
        if let Some(format) = property.format {
            schema.insert("format".to_string(), Value::from(format));
        }
        Value::Object(schema)
    }
}

/// A field whose type tag had no entry in the mapping table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmappedFieldType {
    pub field: String,
    pub field_type: String,
}

/// Looks up the OpenAPI type and format for a source tag.
///
/// Returns `None` for tags outside the known table.
pub fn map_type(field_type: &SourceFieldType) -> Option<(OpenApiType, Option<&'static str>)> {
    use SourceFieldType as S;

    let mapped = match field_type {
        S::Address => (OpenApiType::Object, None),
        S::AnyType
        | S::Calculated
        | S::Combobox
        | S::Boolean
        | S::Email
        | S::EncryptedString
        | S::Id
        | S::Location
        | S::MasterRecord
        | S::MultiPicklist
        | S::Phone
        | S::Picklist
        | S::Reference
        | S::String
        | S::TextArea
        | S::Url => (OpenApiType::String, None),
        S::Currency | S::Double => (OpenApiType::Number, None),
        S::Percent => (OpenApiType::Number, Some("double")),
        S::Date => (OpenApiType::String, Some("date")),
        S::DateTime => (OpenApiType::String, Some("date-time")),
        S::Int => (OpenApiType::Integer, Some("int32")),
        S::Other(_) => return None,
    };
    Some(mapped)
}

/// Builds the property schema for one field.
///
/// The second element is set when the field's type tag was not recognised and
/// the property fell back to `string`.
pub fn map_field(field: &FieldDescriptor) -> (OpenApiProperty, Option<UnmappedFieldType>) {
    let (kind, format, unmapped) = match map_type(&field.field_type) {
        Some((kind, format)) => (kind, format, None),
        None => (
            OpenApiType::String,
            None,
            Some(UnmappedFieldType {
                field: field.name.clone(),
                field_type: field.field_type.to_string(),
            }),
        ),
    };

    let property = OpenApiProperty {
        kind,
        format,
        read_only: (!field.updateable).then_some(true),
    };
    (property, unmapped)
}

/// Property schemas keyed by field name, in describe order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    pub properties: Map<String, Value>,
    pub warnings: Vec<UnmappedFieldType>,
}

/// Maps every field and collects the results into a [`PropertySet`].
pub fn build_properties(fields: &[FieldDescriptor]) -> PropertySet {
    let mut set = PropertySet::default();

    for field in fields {
        let (property, unmapped) = map_field(field);

        if let Some(unmapped) = unmapped {
            warn!(
                field = %unmapped.field,
                field_type = %unmapped.field_type,
                "Unmapped field type. Defaulting to string."
            );
            set.warnings.push(unmapped);
        }

        if set
            .properties
            .insert(field.name.clone(), Value::from(property))
            .is_some()
        {
            warn!(field = %field.name, "Duplicate field name in describe result; keeping the last one.");
        }
    }

    set
}

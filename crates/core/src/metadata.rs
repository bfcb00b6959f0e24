//! Object Metadata
//!
//! Types for the field-level schema returned by the remote platform's describe
//! call. Only the attributes the specializer needs are kept; everything else
//! in the describe body is ignored during deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A field type tag as reported by the remote platform.
///
/// The platform adds new tags over time, so unknown values are kept verbatim
/// in [`SourceFieldType::Other`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceFieldType {
    Address,
    AnyType,
    Boolean,
    Calculated,
    Combobox,
    Currency,
    Date,
    DateTime,
    Double,
    Email,
    EncryptedString,
    Id,
    Int,
    Location,
    MasterRecord,
    MultiPicklist,
    Percent,
    Phone,
    Picklist,
    Reference,
    String,
    TextArea,
    Url,
    Other(String),
}

impl SourceFieldType {
    /// The tag exactly as the remote platform spells it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Address => "address",
            Self::AnyType => "anyType",
            Self::Boolean => "boolean",
            Self::Calculated => "calculated",
            Self::Combobox => "combobox",
            Self::Currency => "currency",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Double => "double",
            Self::Email => "email",
            Self::EncryptedString => "encryptedstring",
            Self::Id => "id",
            Self::Int => "int",
            Self::Location => "location",
            Self::MasterRecord => "masterrecord",
            Self::MultiPicklist => "multipicklist",
            Self::Percent => "percent",
            Self::Phone => "phone",
            Self::Picklist => "picklist",
            Self::Reference => "reference",
            Self::String => "string",
            Self::TextArea => "textarea",
            Self::Url => "url",
            Self::Other(tag) => tag,
        }
    }
}

impl From<&str> for SourceFieldType {
    fn from(tag: &str) -> Self {
        match tag {
            "address" => Self::Address,
            "anyType" => Self::AnyType,
            "boolean" => Self::Boolean,
            "calculated" => Self::Calculated,
            "combobox" => Self::Combobox,
            "currency" => Self::Currency,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "double" => Self::Double,
            "email" => Self::Email,
            "encryptedstring" => Self::EncryptedString,
            "id" => Self::Id,
            "int" => Self::Int,
            "location" => Self::Location,
            "masterrecord" => Self::MasterRecord,
            "multipicklist" => Self::MultiPicklist,
            "percent" => Self::Percent,
            "phone" => Self::Phone,
            "picklist" => Self::Picklist,
            "reference" => Self::Reference,
            "string" => Self::String,
            "textarea" => Self::TextArea,
            "url" => Self::Url,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for SourceFieldType {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<SourceFieldType> for String {
    fn from(tag: SourceFieldType) -> Self {
        tag.as_str().to_string()
    }
}

impl fmt::Display for SourceFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field of the remote object's schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: SourceFieldType,
    pub updateable: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: impl Into<SourceFieldType>, updateable: bool) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            updateable,
        }
    }
}

/// The subset of a describe response body the specializer consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectDescribe {
    pub fields: Vec<FieldDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_body_projects_fields() {
        let body = r#"{
            "name": "Account",
            "label": "Account",
            "fields": [
                {"name": "Id", "type": "id", "updateable": false, "length": 18},
                {"name": "Name", "type": "string", "updateable": true, "label": "Account Name"},
                {"name": "Shape__c", "type": "hologram", "updateable": true}
            ]
        }"#;

        let describe: ObjectDescribe = serde_json::from_str(body).unwrap();

        assert_eq!(
            describe.fields,
            vec![
                FieldDescriptor::new("Id", "id", false),
                FieldDescriptor::new("Name", "string", true),
                FieldDescriptor::new("Shape__c", "hologram", true),
            ]
        );
        assert_eq!(
            describe.fields[2].field_type,
            SourceFieldType::Other("hologram".to_string())
        );
    }

    #[test]
    fn test_describe_body_without_fields_is_rejected() {
        let result: Result<ObjectDescribe, _> = serde_json::from_str(r#"{"name": "Account"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_tags_keep_platform_spelling() {
        for tag in ["anyType", "datetime", "encryptedstring", "multipicklist", "textarea"] {
            assert_eq!(SourceFieldType::from(tag).as_str(), tag);
            assert!(!matches!(SourceFieldType::from(tag), SourceFieldType::Other(_)));
        }
        assert_eq!(SourceFieldType::from("DateTime").to_string(), "DateTime");
    }
}

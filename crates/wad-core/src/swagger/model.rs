use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A Swagger 1.2 model: the wire form of a representation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelDeclaration {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(default)]
    pub properties: IndexMap<String, TypePropertyDeclaration>,

    #[serde(rename = "subTypes", default, skip_serializing_if = "Vec::is_empty")]
    pub sub_types: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
}

/// A property of a model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TypePropertyDeclaration {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemsDeclaration>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<String>,

    #[serde(rename = "uniqueItems", default, skip_serializing_if = "is_false")]
    pub unique_items: bool,
}

/// The element type of an array: a primitive `type` or a model `$ref`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemsDeclaration {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,
}

impl ItemsDeclaration {
    pub fn of_type(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ref_name: None,
        }
    }

    pub fn of_ref(ref_name: impl Into<String>) -> Self {
        Self {
            type_name: None,
            ref_name: Some(ref_name.into()),
        }
    }

    /// The item type name, preferring `type` over `$ref`.
    pub fn name(&self) -> Option<&str> {
        self.type_name.as_deref().or(self.ref_name.as_deref())
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

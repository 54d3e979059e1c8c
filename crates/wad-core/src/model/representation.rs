use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A named structural type exchanged by operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Representation {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,

    /// Name of the single parent representation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_type: Option<String>,

    /// Binary content without structural properties.
    #[serde(default)]
    pub raw: bool,

    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub sections: IndexSet<String>,
}

impl Representation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A field of a representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,

    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub min_occurs: i32,

    /// `-1` means unbounded.
    #[serde(default = "default_max_occurs")]
    pub max_occurs: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enumeration: Vec<String>,

    #[serde(default)]
    pub unique_items: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            description: None,
            min_occurs: 0,
            max_occurs: 1,
            min: None,
            max: None,
            enumeration: Vec::new(),
            unique_items: false,
        }
    }

    pub fn is_required(&self) -> bool {
        self.min_occurs > 0
    }

    pub fn is_array(&self) -> bool {
        self.max_occurs > 1 || self.max_occurs == -1
    }
}

fn default_max_occurs() -> i32 {
    1
}

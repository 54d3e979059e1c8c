use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::representation::Representation;

/// The resources and representations that make up an API's shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    #[serde(default)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub representations: Vec<Representation>,

    /// Named groupings of resources. Empty means the contract is not sectioned.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
}

impl Contract {
    pub fn representation(&self, name: &str) -> Option<&Representation> {
        self.representations.iter().find(|r| r.name == name)
    }

    pub fn representation_mut(&mut self, name: &str) -> Option<&mut Representation> {
        self.representations.iter_mut().find(|r| r.name == name)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn resource(&self, path: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.resource_path == path)
    }
}

/// A named grouping of resources.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Section {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An addressable resource of the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Always starts with `/`.
    pub resource_path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path_variables: Vec<PathVariable>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<Operation>,

    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub sections: IndexSet<String>,
}

/// A variable segment of a resource path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathVariable {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", default = "default_type")]
    pub type_name: String,

    #[serde(default)]
    pub array: bool,
}

/// A method that can be invoked on a resource.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub method: String,

    #[serde(default)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_payload: Option<PayLoad>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query_parameters: Vec<QueryParameter>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub responses: Vec<Response>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
}

impl Operation {
    /// The first response carrying a 2xx status code.
    pub fn success_response(&self) -> Option<&Response> {
        self.responses.iter().find(|r| r.is_success())
    }
}

/// A query string parameter accepted by an operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParameter {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", default = "default_type")]
    pub type_name: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub allow_multiple: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enumeration: Vec<String>,
}

/// One possible outcome of an operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub code: u16,

    #[serde(default)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_payload: Option<PayLoad>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

/// A reference to a primitive type or a representation, possibly repeated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PayLoad {
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub array: bool,
}

impl PayLoad {
    pub fn new(type_name: impl Into<String>, array: bool) -> Self {
        Self {
            type_name: type_name.into(),
            array,
        }
    }
}

fn default_type() -> String {
    "String".to_string()
}

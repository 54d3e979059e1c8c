use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::listing::{ApiInfo, AuthorizationsDeclaration};
use super::model::{ItemsDeclaration, ModelDeclaration};
use crate::SWAGGER_VERSION;

/// A Swagger 1.2 document describing one category's resources and models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDeclaration {
    #[serde(rename = "swaggerVersion")]
    pub swagger_version: String,

    #[serde(rename = "apiVersion", skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    #[serde(rename = "resourcePath", skip_serializing_if = "Option::is_none")]
    pub resource_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<ApiInfo>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorizations: Option<AuthorizationsDeclaration>,

    #[serde(default)]
    pub apis: Vec<ResourceDeclaration>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub models: BTreeMap<String, ModelDeclaration>,
}

impl Default for ApiDeclaration {
    fn default() -> Self {
        Self {
            swagger_version: SWAGGER_VERSION.to_string(),
            api_version: None,
            base_path: None,
            resource_path: None,
            info: None,
            produces: Vec::new(),
            consumes: Vec::new(),
            authorizations: None,
            apis: Vec::new(),
            models: BTreeMap::new(),
        }
    }
}

/// A path and its operations. In a resource listing only `path` and
/// `description` are set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceDeclaration {
    pub path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<ResourceOperationDeclaration>,
}

/// An operation on a path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceOperationDeclaration {
    pub method: String,

    #[serde(default)]
    pub nickname: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Return type: a primitive, a model id, `array` or `void`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemsDeclaration>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,

    #[serde(default)]
    pub parameters: Vec<ResourceOperationParameterDeclaration>,

    #[serde(
        rename = "responseMessages",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub response_messages: Vec<ResponseMessageDeclaration>,
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Path,
    Query,
    Body,
    Header,
    Form,
}

/// A parameter of an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceOperationParameterDeclaration {
    #[serde(rename = "paramType")]
    pub param_type: ParamType,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemsDeclaration>,

    #[serde(default)]
    pub required: bool,

    #[serde(rename = "allowMultiple", default)]
    pub allow_multiple: bool,

    #[serde(rename = "defaultValue", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
}

impl ResourceOperationParameterDeclaration {
    pub fn new(param_type: ParamType, name: impl Into<String>) -> Self {
        Self {
            param_type,
            name: name.into(),
            description: None,
            type_name: None,
            items: None,
            required: false,
            allow_multiple: false,
            default_value: None,
            enum_values: Vec::new(),
        }
    }
}

/// A non-success response of an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessageDeclaration {
    pub code: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(rename = "responseModel", skip_serializing_if = "Option::is_none")]
    pub response_model: Option<String>,
}

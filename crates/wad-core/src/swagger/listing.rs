use serde::{Deserialize, Serialize};

use super::declaration::ResourceDeclaration;
use crate::SWAGGER_VERSION;

/// The Swagger 1.2 top-level index of API categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceListing {
    #[serde(rename = "swaggerVersion")]
    pub swagger_version: String,

    #[serde(rename = "apiVersion", skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<ApiInfo>,

    /// One entry per category, pointing at an API declaration.
    #[serde(default)]
    pub apis: Vec<ResourceDeclaration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorizations: Option<AuthorizationsDeclaration>,
}

impl Default for ResourceListing {
    fn default() -> Self {
        Self {
            swagger_version: SWAGGER_VERSION.to_string(),
            api_version: None,
            info: None,
            apis: Vec::new(),
            authorizations: None,
        }
    }
}

impl ResourceListing {
    /// The listing entry with the given path.
    pub fn api(&self, path: &str) -> Option<&ResourceDeclaration> {
        self.apis.iter().find(|api| api.path == path)
    }
}

/// Metadata about the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "termsOfServiceUrl", skip_serializing_if = "Option::is_none")]
    pub terms_of_service_url: Option<String>,

    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(rename = "licenseUrl", skip_serializing_if = "Option::is_none")]
    pub license_url: Option<String>,
}

/// The authorization schemes an API supports.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthorizationsDeclaration {
    #[serde(rename = "basicAuth", skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<BasicAuthorizationDeclaration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth2: Option<OAuth2AuthorizationDeclaration>,

    #[serde(rename = "apiKey", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<ApiKeyAuthorizationDeclaration>,
}

impl AuthorizationsDeclaration {
    pub fn is_empty(&self) -> bool {
        self.basic_auth.is_none() && self.oauth2.is_none() && self.api_key.is_none()
    }
}

/// HTTP basic authentication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicAuthorizationDeclaration {
    #[serde(rename = "type", default = "basic_auth_type")]
    pub auth_type: String,
}

impl Default for BasicAuthorizationDeclaration {
    fn default() -> Self {
        Self {
            auth_type: basic_auth_type(),
        }
    }
}

/// OAuth2 authorization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuth2AuthorizationDeclaration {
    #[serde(rename = "type", default = "oauth2_type")]
    pub auth_type: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<OAuth2Scope>,

    #[serde(rename = "grantTypes", skip_serializing_if = "Option::is_none")]
    pub grant_types: Option<serde_json::Value>,
}

impl Default for OAuth2AuthorizationDeclaration {
    fn default() -> Self {
        Self {
            auth_type: oauth2_type(),
            scopes: Vec::new(),
            grant_types: None,
        }
    }
}

/// A scope an OAuth2 token may be granted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuth2Scope {
    pub scope: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// API key passed as a header or query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKeyAuthorizationDeclaration {
    #[serde(rename = "type", default = "api_key_type")]
    pub auth_type: String,

    #[serde(rename = "passAs", skip_serializing_if = "Option::is_none")]
    pub pass_as: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyname: Option<String>,
}

fn basic_auth_type() -> String {
    "basicAuth".to_string()
}

fn oauth2_type() -> String {
    "oauth2".to_string()
}

fn api_key_type() -> String {
    "apiKey".to_string()
}

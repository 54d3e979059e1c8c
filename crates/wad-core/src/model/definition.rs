use serde::{Deserialize, Serialize};
use url::Url;

use super::contract::Contract;

/// The format-neutral description of a web API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<Endpoint>,

    #[serde(default)]
    pub contract: Contract,
}

/// Contact information.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// License information.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct License {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Authentication scheme protecting an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthenticationProtocol {
    HttpBasic,
    #[serde(rename = "HTTP_OAUTH")]
    HttpOAuth,
    #[serde(rename = "HTTP_OAUTH_BEARER")]
    HttpOAuthBearer,
    #[serde(rename = "HTTP_OAUTH_MAC")]
    HttpOAuthMac,
    /// Anything else, API keys included.
    Custom,
}

impl AuthenticationProtocol {
    pub fn is_oauth(&self) -> bool {
        matches!(
            self,
            AuthenticationProtocol::HttpOAuth
                | AuthenticationProtocol::HttpOAuthBearer
                | AuthenticationProtocol::HttpOAuthMac
        )
    }
}

/// A base URL the API is served from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub protocol: String,
    pub domain: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_protocol: Option<AuthenticationProtocol>,
}

/// Base that relative references are resolved against.
const DUMMY_BASE: &str = "http://example.invalid/";

impl Endpoint {
    /// Split a URL such as `https://api.example.com:8443/v1` into its parts.
    ///
    /// A protocol-relative URL (`//host/api`) keeps an empty protocol. A
    /// relative reference (`/api`) keeps an empty domain and is stored
    /// verbatim as the base path.
    pub fn from_url(url: &str) -> Self {
        if let Ok(parsed) = Url::parse(url) {
            return Self::from_parsed(&parsed, parsed.scheme())
                .unwrap_or_else(|| Self::relative(url));
        }
        let joined = Url::parse(DUMMY_BASE).and_then(|base| base.join(url));
        match joined {
            Ok(parsed) if url.starts_with("//") => {
                Self::from_parsed(&parsed, "").unwrap_or_else(|| Self::relative(url))
            }
            _ => Self::relative(url),
        }
    }

    fn from_parsed(parsed: &Url, protocol: &str) -> Option<Self> {
        let domain = parsed.host_str().filter(|h| !h.is_empty())?;
        let path = parsed.path();
        Some(Self {
            protocol: protocol.to_string(),
            domain: domain.to_string(),
            port: parsed.port(),
            base_path: Some(path.to_string()).filter(|p| !p.is_empty() && p != "/"),
            authentication_protocol: None,
        })
    }

    fn relative(url: &str) -> Self {
        Self {
            protocol: String::new(),
            domain: String::new(),
            port: None,
            base_path: Some(url.to_string()).filter(|p| !p.is_empty()),
            authentication_protocol: None,
        }
    }

    /// Rebuild the URL this endpoint describes.
    pub fn compute_url(&self) -> String {
        if self.domain.is_empty() {
            return self.base_path.clone().unwrap_or_else(|| "/".to_string());
        }
        let mut url = if self.protocol.is_empty() {
            format!("//{}", self.domain)
        } else {
            format!("{}://{}", self.protocol, self.domain)
        };
        if let Some(port) = self.port {
            url.push_str(&format!(":{port}"));
        }
        if let Some(ref base_path) = self.base_path {
            url.push_str(base_path);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_full_url() {
        let endpoint = Endpoint::from_url("https://api.example.com:8443/v1");
        assert_eq!(endpoint.protocol, "https");
        assert_eq!(endpoint.domain, "api.example.com");
        assert_eq!(endpoint.port, Some(8443));
        assert_eq!(endpoint.base_path.as_deref(), Some("/v1"));
        assert_eq!(endpoint.compute_url(), "https://api.example.com:8443/v1");
    }

    #[test]
    fn test_endpoint_relative_base_path() {
        let endpoint = Endpoint::from_url("/api");
        assert_eq!(endpoint.protocol, "");
        assert_eq!(endpoint.domain, "");
        assert_eq!(endpoint.port, None);
        assert_eq!(endpoint.base_path.as_deref(), Some("/api"));
        assert_eq!(endpoint.compute_url(), "/api");
    }

    #[test]
    fn test_endpoint_protocol_relative() {
        let endpoint = Endpoint::from_url("//api.example.com:8080/v2");
        assert_eq!(endpoint.protocol, "");
        assert_eq!(endpoint.domain, "api.example.com");
        assert_eq!(endpoint.port, Some(8080));
        assert_eq!(endpoint.base_path.as_deref(), Some("/v2"));
        assert_eq!(endpoint.compute_url(), "//api.example.com:8080/v2");
    }

    #[test]
    fn test_endpoint_without_path() {
        let endpoint = Endpoint::from_url("http://example.com");
        assert_eq!(endpoint.base_path, None);
        assert_eq!(endpoint.compute_url(), "http://example.com");
    }

    #[test]
    fn test_endpoint_trailing_slash_dropped() {
        let endpoint = Endpoint::from_url("http://example.com/");
        assert_eq!(endpoint.base_path, None);
    }

    #[test]
    fn test_authentication_protocol_names() {
        let json = serde_json::to_string(&AuthenticationProtocol::HttpOAuthBearer).unwrap();
        assert_eq!(json, "\"HTTP_OAUTH_BEARER\"");
        let parsed: AuthenticationProtocol = serde_json::from_str("\"HTTP_BASIC\"").unwrap();
        assert_eq!(parsed, AuthenticationProtocol::HttpBasic);
        assert!(AuthenticationProtocol::HttpOAuthMac.is_oauth());
        assert!(!AuthenticationProtocol::Custom.is_oauth());
    }
}

pub mod declaration;
pub mod listing;
pub mod load;
pub mod model;

pub use declaration::*;
pub use listing::*;
pub use load::load_documents;
pub use model::*;

use serde::de::DeserializeOwned;

use crate::SWAGGER_VERSION;
use crate::error::ParseError;

/// A top-level Swagger 1.2 document.
pub trait SwaggerDocument: DeserializeOwned {
    fn swagger_version(&self) -> &str;
}

impl SwaggerDocument for ResourceListing {
    fn swagger_version(&self) -> &str {
        &self.swagger_version
    }
}

impl SwaggerDocument for ApiDeclaration {
    fn swagger_version(&self) -> &str {
        &self.swagger_version
    }
}

/// Parse a Swagger document from YAML.
pub fn from_yaml<T: SwaggerDocument>(input: &str) -> Result<T, ParseError> {
    let doc: T = serde_yaml_ng::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

/// Parse a Swagger document from JSON.
pub fn from_json<T: SwaggerDocument>(input: &str) -> Result<T, ParseError> {
    let doc: T = serde_json::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

fn validate_version<T: SwaggerDocument>(doc: &T) -> Result<(), ParseError> {
    if doc.swagger_version() != SWAGGER_VERSION {
        return Err(ParseError::UnsupportedVersion(
            doc.swagger_version().to_string(),
        ));
    }
    Ok(())
}

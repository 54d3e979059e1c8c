pub mod config;
pub mod error;
pub mod model;
pub mod swagger;
pub mod translate;

/// Supported version of Swagger.
pub const SWAGGER_VERSION: &str = "1.2";

/// The media type that marks an operation as exchanging raw file content.
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Name of the raw representation standing in for file content.
pub const FILE_TYPE: &str = "File";

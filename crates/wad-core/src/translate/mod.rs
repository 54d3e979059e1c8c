pub mod export;
pub mod import;
pub mod naming;
pub mod type_mapper;
pub mod validate;

pub use export::{
    ExportOptions, export_all, export_all_with_options, export_api_declaration,
    export_api_declaration_with_options, export_resource_listing,
};
pub use import::import;
pub use validate::validate;

use std::collections::{BTreeMap, VecDeque};

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace, warn};

use crate::FILE_TYPE;
use crate::model::*;
use crate::swagger::{
    ApiDeclaration, ApiInfo, AuthorizationsDeclaration, BasicAuthorizationDeclaration,
    ItemsDeclaration, ModelDeclaration, OAuth2AuthorizationDeclaration, ParamType,
    ResourceDeclaration, ResourceListing, ResourceOperationDeclaration,
    ResourceOperationParameterDeclaration, ResponseMessageDeclaration, TypePropertyDeclaration,
};

use super::naming::route_to_nickname;
use super::type_mapper::{is_primitive_type, to_swagger_type};

/// Base URL used when a definition declares no endpoint.
pub const DEFAULT_BASE_PATH: &str = "http://example.com";

/// Options controlling how a definition is projected onto Swagger.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub placeholder_base_path: String,
    /// Derive a nickname from method + path for operations without a name.
    pub derive_nicknames: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            placeholder_base_path: DEFAULT_BASE_PATH.to_string(),
            derive_nicknames: true,
        }
    }
}

/// Build the Swagger API declaration of one section of the definition.
pub fn export_api_declaration(section_name: &str, definition: &Definition) -> ApiDeclaration {
    export_api_declaration_with_options(section_name, definition, &ExportOptions::default())
}

/// Build the Swagger API declaration of one section with explicit options.
pub fn export_api_declaration_with_options(
    section_name: &str,
    definition: &Definition,
    options: &ExportOptions,
) -> ApiDeclaration {
    // Swagger 1.2 has room for a single base path
    if definition.endpoints.len() > 1 {
        warn!(
            "Definition declares {} endpoints, only the first one is exported",
            definition.endpoints.len()
        );
    }
    let endpoint = definition.endpoints.first();
    let base_path = endpoint
        .map(Endpoint::compute_url)
        .unwrap_or_else(|| options.placeholder_base_path.clone());

    let contract = &definition.contract;
    let section_path = format!("/{section_name}");
    let sectioned = !contract.sections.is_empty();

    let mut used_models = IndexSet::new();
    let mut apis: Vec<ResourceDeclaration> = contract
        .resources
        .iter()
        .filter(|r| !sectioned || r.sections.contains(section_name))
        .filter(|r| r.resource_path.starts_with(&section_path))
        .map(|r| export_resource(r, contract, options, &mut used_models))
        .collect();
    apis.sort_by(|a, b| a.path.cmp(&b.path));

    let models = export_models(contract, &used_models);

    ApiDeclaration {
        api_version: definition.version.clone(),
        base_path: Some(base_path),
        resource_path: Some(section_path),
        authorizations: endpoint.and_then(export_authorizations),
        apis,
        models,
        ..Default::default()
    }
}

/// Build the Swagger resource listing of the definition.
pub fn export_resource_listing(definition: &Definition) -> ResourceListing {
    let contract = &definition.contract;

    let info = ApiInfo {
        title: Some(contract.name.clone()).filter(|t| !t.is_empty()),
        description: contract.description.clone(),
        contact: definition.contact.as_ref().and_then(|c| c.email.clone()),
        license_url: definition.license.as_ref().and_then(|l| l.url.clone()),
        ..Default::default()
    };

    let mut added = IndexSet::new();
    let mut apis = Vec::new();
    for resource in &contract.resources {
        if contract.sections.is_empty() {
            let path = first_segment(&resource.resource_path);
            if added.insert(path.clone()) {
                apis.push(ResourceDeclaration {
                    path,
                    description: resource.description.clone(),
                    operations: Vec::new(),
                });
            }
        } else {
            for section_name in &resource.sections {
                let path = format!("/{section_name}");
                if added.insert(path.clone()) {
                    apis.push(ResourceDeclaration {
                        path,
                        description: contract
                            .section(section_name)
                            .and_then(|s| s.description.clone()),
                        operations: Vec::new(),
                    });
                }
            }
        }
    }
    apis.sort_by(|a, b| a.path.cmp(&b.path));

    ResourceListing {
        api_version: definition.version.clone(),
        info: Some(info),
        apis,
        authorizations: definition.endpoints.first().and_then(export_authorizations),
        ..Default::default()
    }
}

/// Build the resource listing and one API declaration per listing entry,
/// keyed by section name.
pub fn export_all(definition: &Definition) -> (ResourceListing, IndexMap<String, ApiDeclaration>) {
    export_all_with_options(definition, &ExportOptions::default())
}

pub fn export_all_with_options(
    definition: &Definition,
    options: &ExportOptions,
) -> (ResourceListing, IndexMap<String, ApiDeclaration>) {
    let listing = export_resource_listing(definition);
    let declarations = listing
        .apis
        .iter()
        .map(|api| {
            let section = api.path.trim_start_matches('/');
            (
                section.to_string(),
                export_api_declaration_with_options(section, definition, options),
            )
        })
        .collect();
    (listing, declarations)
}

fn export_authorizations(endpoint: &Endpoint) -> Option<AuthorizationsDeclaration> {
    match endpoint.authentication_protocol? {
        AuthenticationProtocol::HttpBasic => Some(AuthorizationsDeclaration {
            basic_auth: Some(BasicAuthorizationDeclaration::default()),
            ..Default::default()
        }),
        protocol if protocol.is_oauth() => Some(AuthorizationsDeclaration {
            oauth2: Some(OAuth2AuthorizationDeclaration::default()),
            ..Default::default()
        }),
        protocol => {
            // TODO: map API key authentication once the definition carries the key name
            warn!("Authentication protocol {protocol:?} has no Swagger 1.2 counterpart");
            None
        }
    }
}

fn export_resource(
    resource: &Resource,
    contract: &Contract,
    options: &ExportOptions,
    used_models: &mut IndexSet<String>,
) -> ResourceDeclaration {
    let operations = resource
        .operations
        .iter()
        .map(|op| export_operation(resource, op, contract, options, used_models))
        .collect();

    ResourceDeclaration {
        path: resource.resource_path.clone(),
        description: resource.description.clone(),
        operations,
    }
}

fn export_operation(
    resource: &Resource,
    operation: &Operation,
    contract: &Contract,
    options: &ExportOptions,
    used_models: &mut IndexSet<String>,
) -> ResourceOperationDeclaration {
    let nickname = if operation.name.is_empty() && options.derive_nicknames {
        route_to_nickname(&operation.method, &resource.resource_path)
    } else {
        operation.name.clone()
    };

    let mut rod = ResourceOperationDeclaration {
        method: operation.method.clone(),
        nickname,
        summary: operation.description.clone(),
        produces: operation.produces.clone(),
        consumes: operation.consumes.clone(),
        ..Default::default()
    };

    for pv in &resource.path_variables {
        let mut param = ResourceOperationParameterDeclaration::new(ParamType::Path, &pv.name);
        param.type_name = Some(to_swagger_type(&pv.type_name).to_string());
        param.required = true;
        param.description = pv.description.clone();
        rod.parameters.push(param);
    }

    if let Some(ref input) = operation.input_payload {
        let raw = contract
            .representation(&input.type_name)
            .is_some_and(|r| r.raw);
        let mut param = ResourceOperationParameterDeclaration::new(ParamType::Body, "body");
        param.required = true;
        if raw {
            param.type_name = Some(FILE_TYPE.to_string());
        } else if input.array {
            param.type_name = Some("array".to_string());
            param.items = Some(items_of(&input.type_name));
        } else {
            param.type_name = Some(to_swagger_type(&input.type_name).to_string());
        }
        mark_used(used_models, &input.type_name);
        rod.parameters.push(param);
    }

    let output = operation
        .success_response()
        .and_then(|r| r.output_payload.as_ref())
        .filter(|p| !p.type_name.is_empty());
    match output {
        Some(out) if out.array => {
            trace!("Operation {} returns an array", rod.nickname);
            rod.type_name = Some("array".to_string());
            rod.items = Some(items_of(&out.type_name));
            mark_used(used_models, &out.type_name);
        }
        Some(out) => {
            trace!("Operation {} returns a single representation", rod.nickname);
            rod.type_name = Some(to_swagger_type(&out.type_name).to_string());
            mark_used(used_models, &out.type_name);
        }
        None => rod.type_name = Some("void".to_string()),
    }

    for qp in &operation.query_parameters {
        let mut param = ResourceOperationParameterDeclaration::new(ParamType::Query, &qp.name);
        param.type_name = Some(to_swagger_type(&qp.type_name).to_string());
        param.description = qp.description.clone();
        param.required = qp.required;
        param.allow_multiple = true;
        param.enum_values = qp.enumeration.clone();
        param.default_value = qp.default_value.clone();
        mark_used(used_models, &qp.type_name);
        rod.parameters.push(param);
    }

    for response in operation.responses.iter().filter(|r| !r.is_success()) {
        let response_model = response
            .output_payload
            .as_ref()
            .map(|p| p.type_name.clone());
        if let Some(ref model) = response_model {
            mark_used(used_models, model);
        }
        rod.response_messages.push(ResponseMessageDeclaration {
            code: response.code,
            message: response.message.clone(),
            response_model,
        });
    }

    rod
}

fn mark_used(used_models: &mut IndexSet<String>, type_name: &str) {
    if !type_name.is_empty() && !is_primitive_type(type_name) {
        used_models.insert(type_name.to_string());
    }
}

fn items_of(type_name: &str) -> ItemsDeclaration {
    if is_primitive_type(type_name) {
        ItemsDeclaration::of_type(to_swagger_type(type_name))
    } else {
        ItemsDeclaration::of_ref(type_name)
    }
}

/// Every model reachable from `used` through non-primitive property types
/// and parent links, in discovery order. Names without a representation
/// are included; callers drop them.
fn collect_models(contract: &Contract, used: &IndexSet<String>) -> IndexSet<String> {
    let mut visited = IndexSet::new();
    let mut queue: VecDeque<String> = used.iter().cloned().collect();

    while let Some(name) = queue.pop_front() {
        if is_primitive_type(&name) || !visited.insert(name.clone()) {
            continue;
        }
        let Some(repr) = contract.representation(&name) else {
            continue;
        };
        for prop in &repr.properties {
            if !is_primitive_type(&prop.type_name) && !visited.contains(&prop.type_name) {
                queue.push_back(prop.type_name.clone());
            }
        }
        if let Some(ref parent) = repr.extended_type {
            queue.push_back(parent.clone());
        }
    }

    visited
}

fn export_models(
    contract: &Contract,
    used: &IndexSet<String>,
) -> BTreeMap<String, ModelDeclaration> {
    let retained: Vec<&Representation> = collect_models(contract, used)
        .iter()
        .filter_map(|name| contract.representation(name))
        .collect();

    retained
        .iter()
        .map(|repr| {
            let model = export_model(repr, &retained);
            debug!("Model {} added", model.id);
            (model.id.clone(), model)
        })
        .collect()
}

fn export_model(repr: &Representation, retained: &[&Representation]) -> ModelDeclaration {
    let mut model = ModelDeclaration {
        id: repr.name.clone(),
        description: repr.description.clone(),
        ..Default::default()
    };

    for prop in &repr.properties {
        if prop.is_required() {
            model.required.push(prop.name.clone());
        }

        let mut tpd = TypePropertyDeclaration {
            description: prop.description.clone(),
            enum_values: prop.enumeration.clone(),
            minimum: prop.min.clone(),
            maximum: prop.max.clone(),
            unique_items: prop.unique_items,
            ..Default::default()
        };
        if prop.is_array() {
            tpd.type_name = Some("array".to_string());
            tpd.items = Some(items_of(&prop.type_name));
        } else if is_primitive_type(&prop.type_name) {
            tpd.type_name = Some(to_swagger_type(&prop.type_name).to_string());
        } else {
            tpd.ref_name = Some(prop.type_name.clone());
        }

        model.properties.insert(prop.name.clone(), tpd);
    }

    let mut sub_types: Vec<String> = retained
        .iter()
        .filter(|r| r.extended_type.as_deref() == Some(repr.name.as_str()))
        .map(|r| r.name.clone())
        .collect();
    sub_types.sort();
    model.sub_types = sub_types;

    model
}

/// First path segment of a resource path, e.g. "/pets/{petId}" → "/pets".
fn first_segment(path: &str) -> String {
    match path.split('/').find(|s| !s.is_empty()) {
        Some(segment) => format!("/{segment}"),
        None => "/".to_string(),
    }
}

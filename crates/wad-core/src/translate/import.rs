use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, trace, warn};

use crate::error::{BuildError, TranslationError};
use crate::model::*;
use crate::swagger::{
    ApiDeclaration, ItemsDeclaration, ModelDeclaration, ParamType, ResourceDeclaration,
    ResourceListing, ResourceOperationDeclaration, ResourceOperationParameterDeclaration,
};
use crate::{FILE_TYPE, MULTIPART_FORM_DATA};

use super::naming::route_to_nickname;
use super::type_mapper::to_internal_type;
use super::validate::validate;

/// Translate a Swagger resource listing and its API declarations, keyed by
/// section name, into a definition.
///
/// Fails with a `file` error when the listing and the declarations disagree
/// in number, and with a `compliance` error when the documents do not have
/// the expected shape.
pub fn import(
    listing: &ResourceListing,
    declarations: &IndexMap<String, ApiDeclaration>,
) -> Result<Definition, TranslationError> {
    validate(listing, declarations)?;

    let mut importer = Importer::default();
    importer.build(listing, declarations).map_err(|e| {
        debug!("Swagger import failed: {e}");
        TranslationError::compliance()
    })
}

/// State scoped to a single import call.
#[derive(Default)]
struct Importer {
    definition: Definition,
    /// Set once a raw file representation has been synthesized.
    contains_raw_types: bool,
    /// Model ids already turned into representations.
    declared_types: HashSet<String>,
    /// Parent model id → subtype ids, accumulated across declarations.
    subtypes: IndexMap<String, Vec<String>>,
}

impl Importer {
    fn build(
        &mut self,
        listing: &ResourceListing,
        declarations: &IndexMap<String, ApiDeclaration>,
    ) -> Result<Definition, BuildError> {
        let info = listing.info.clone().unwrap_or_default();
        self.definition.version = listing.api_version.clone();
        self.definition.contact = Some(Contact {
            email: info.contact,
            ..Default::default()
        });
        self.definition.license = Some(License {
            url: info.license_url,
            ..Default::default()
        });
        self.definition.contract.name = info.title.unwrap_or_default();
        self.definition.contract.description = info.description;
        debug!("Contract {} added", self.definition.contract.name);

        for (section_name, declaration) in declarations {
            self.import_declaration(listing, section_name, declaration)?;
        }

        debug!("Definition successfully retrieved from Swagger documents");
        Ok(std::mem::take(&mut self.definition))
    }

    fn import_declaration(
        &mut self,
        listing: &ResourceListing,
        section_name: &str,
        declaration: &ApiDeclaration,
    ) -> Result<(), BuildError> {
        let section_path = format!("/{section_name}");
        let entry = listing
            .api(&section_path)
            .ok_or_else(|| BuildError::MissingListingEntry(section_path.clone()))?;
        self.definition.contract.sections.push(Section {
            name: section_name.to_string(),
            description: entry.description.clone(),
        });

        for api in &declaration.apis {
            let resource = self.import_resource(section_name, declaration, api)?;
            self.add_resource(resource);
            debug!("Resource {} added", api.path);
        }

        // Swagger 1.2 has room for a single base path, the first declaration's wins
        if self.definition.endpoints.is_empty() {
            let base_path = declaration
                .base_path
                .as_deref()
                .ok_or_else(|| BuildError::MissingBasePath(section_name.to_string()))?;
            let mut endpoint = Endpoint::from_url(base_path);
            endpoint.authentication_protocol = listing.authorizations.as_ref().and_then(|auth| {
                if auth.basic_auth.is_some() {
                    Some(AuthenticationProtocol::HttpBasic)
                } else if auth.oauth2.is_some() {
                    Some(AuthenticationProtocol::HttpOAuth)
                } else if auth.api_key.is_some() {
                    Some(AuthenticationProtocol::Custom)
                } else {
                    None
                }
            });
            self.definition.endpoints.push(endpoint);
        } else if declaration.base_path.is_some() {
            trace!("Base path of section {section_name} ignored");
        }

        Ok(())
    }

    fn import_resource(
        &mut self,
        section_name: &str,
        declaration: &ApiDeclaration,
        api: &ResourceDeclaration,
    ) -> Result<Resource, BuildError> {
        let mut resource = Resource {
            resource_path: api.path.clone(),
            description: api.description.clone(),
            ..Default::default()
        };
        resource.sections.insert(section_name.to_string());

        let mut declared_path_variables: HashSet<String> = HashSet::new();
        for swag_op in &api.operations {
            let operation = self.import_operation(
                section_name,
                declaration,
                &api.path,
                swag_op,
                &mut resource,
                &mut declared_path_variables,
            )?;
            debug!("Method {} added", operation.method);
            resource.operations.push(operation);

            self.import_models(section_name, declaration)?;
            self.apply_subtypes()?;
        }

        Ok(resource)
    }

    fn import_operation(
        &mut self,
        section_name: &str,
        declaration: &ApiDeclaration,
        path: &str,
        swag_op: &ResourceOperationDeclaration,
        resource: &mut Resource,
        declared_path_variables: &mut HashSet<String>,
    ) -> Result<Operation, BuildError> {
        let name = if swag_op.nickname.is_empty() {
            route_to_nickname(&swag_op.method, path)
        } else {
            swag_op.nickname.clone()
        };
        let mut operation = Operation {
            method: swag_op.method.clone(),
            name,
            description: swag_op.summary.clone(),
            ..Default::default()
        };

        let produces = if swag_op.produces.is_empty() {
            &declaration.produces
        } else {
            &swag_op.produces
        };
        let consumes = if swag_op.consumes.is_empty() {
            &declaration.consumes
        } else {
            &swag_op.consumes
        };
        for media_type in produces.iter().chain(consumes) {
            if media_type == MULTIPART_FORM_DATA {
                self.ensure_raw_representation(section_name);
            }
        }
        operation.produces = produces.clone();
        operation.consumes = consumes.clone();

        operation.responses.push(Response {
            code: 200,
            name: "Success".to_string(),
            description: Some("Success".to_string()),
            message: Some("OK".to_string()),
            output_payload: return_payload(swag_op)?,
        });

        for param in &swag_op.parameters {
            match param.param_type {
                ParamType::Path => {
                    if declared_path_variables.insert(param.name.clone()) {
                        resource.path_variables.push(path_variable(param));
                    }
                }
                ParamType::Body => {
                    if operation.input_payload.is_none() {
                        operation.input_payload = Some(body_payload(param)?);
                    } else {
                        warn!(
                            "Operation {} declares several body parameters, {} ignored",
                            operation.name, param.name
                        );
                    }
                }
                ParamType::Query => operation.query_parameters.push(query_parameter(param)),
                ParamType::Header | ParamType::Form => {
                    trace!("Parameter {} of type {:?} skipped", param.name, param.param_type);
                }
            }
        }

        for message in swag_op
            .response_messages
            .iter()
            .filter(|m| !(200..300).contains(&m.code))
        {
            operation.responses.push(Response {
                code: message.code,
                name: format!("Error {}", message.code),
                description: None,
                message: message.message.clone(),
                output_payload: message
                    .response_model
                    .as_deref()
                    .map(|model| PayLoad::new(to_internal_type(model), false)),
            });
        }

        Ok(operation)
    }

    /// Register the raw file representation the first time a multipart
    /// media type shows up.
    fn ensure_raw_representation(&mut self, section_name: &str) {
        if self.contains_raw_types {
            return;
        }
        self.contains_raw_types = true;
        if !self.declared_types.insert(FILE_TYPE.to_string()) {
            // Already imported as a model, an empty one stands for file content
            if let Some(existing) = self.definition.contract.representation_mut(FILE_TYPE)
                && existing.properties.is_empty()
            {
                existing.raw = true;
            }
            debug!("Representation {FILE_TYPE} already declared");
            return;
        }
        let mut representation = Representation::new(FILE_TYPE);
        representation.raw = true;
        representation.sections.insert(section_name.to_string());
        self.definition.contract.representations.push(representation);
        debug!("Raw representation {FILE_TYPE} added");
    }

    fn import_models(
        &mut self,
        section_name: &str,
        declaration: &ApiDeclaration,
    ) -> Result<(), BuildError> {
        for (id, model) in &declaration.models {
            if !model.sub_types.is_empty() {
                self.subtypes.insert(model.id.clone(), model.sub_types.clone());
            }
            if self.declared_types.insert(id.clone()) {
                let mut representation = to_representation(id, model)?;
                representation.sections.insert(section_name.to_string());
                self.definition.contract.representations.push(representation);
                debug!("Representation {id} added");
            }
        }
        Ok(())
    }

    /// Point every recorded subtype at its parent. Conflicting claims leave
    /// the last parent in place.
    fn apply_subtypes(&mut self) -> Result<(), BuildError> {
        let contract = &mut self.definition.contract;
        for (parent, children) in &self.subtypes {
            for child in children {
                let representation = contract.representation_mut(child).ok_or_else(|| {
                    BuildError::UnknownSubtype {
                        parent: parent.clone(),
                        child: child.clone(),
                    }
                })?;
                if let Some(ref previous) = representation.extended_type
                    && previous != parent
                {
                    warn!("Representation {child} is claimed by {previous} and {parent}");
                }
                representation.extended_type = Some(parent.clone());
            }
        }
        Ok(())
    }

    fn add_resource(&mut self, resource: Resource) {
        let resources = &mut self.definition.contract.resources;
        match resources
            .iter_mut()
            .find(|r| r.resource_path == resource.resource_path)
        {
            Some(existing) => {
                existing.sections.extend(resource.sections);
                for pv in resource.path_variables {
                    if !existing.path_variables.iter().any(|p| p.name == pv.name) {
                        existing.path_variables.push(pv);
                    }
                }
                existing.operations.extend(resource.operations);
            }
            None => resources.push(resource),
        }
    }
}

fn return_payload(swag_op: &ResourceOperationDeclaration) -> Result<Option<PayLoad>, BuildError> {
    match swag_op.type_name.as_deref() {
        Some("array") => {
            trace!("Operation {} returns an array", swag_op.nickname);
            let item = item_name(swag_op.items.as_ref(), &swag_op.nickname)?;
            Ok(Some(PayLoad::new(to_internal_type(item), true)))
        }
        Some("void") => Ok(None),
        Some(type_name) => {
            trace!("Operation {} returns a single representation", swag_op.nickname);
            Ok(Some(PayLoad::new(to_internal_type(type_name), false)))
        }
        None => Ok(swag_op
            .ref_name
            .as_deref()
            .map(|r| PayLoad::new(to_internal_type(r), false))),
    }
}

fn body_payload(param: &ResourceOperationParameterDeclaration) -> Result<PayLoad, BuildError> {
    match param.type_name.as_deref() {
        Some("array") => {
            let item = item_name(param.items.as_ref(), &param.name)?;
            Ok(PayLoad::new(to_internal_type(item), true))
        }
        Some(type_name) => Ok(PayLoad::new(to_internal_type(type_name), false)),
        None => Err(BuildError::MissingType(format!("parameter {}", param.name))),
    }
}

fn item_name<'a>(items: Option<&'a ItemsDeclaration>, owner: &str) -> Result<&'a str, BuildError> {
    items
        .and_then(ItemsDeclaration::name)
        .ok_or_else(|| BuildError::MissingItems(owner.to_string()))
}

fn path_variable(param: &ResourceOperationParameterDeclaration) -> PathVariable {
    PathVariable {
        name: param.name.clone(),
        description: param.description.clone(),
        type_name: to_internal_type(param.type_name.as_deref().unwrap_or("string")).to_string(),
        array: param.allow_multiple,
    }
}

fn query_parameter(param: &ResourceOperationParameterDeclaration) -> QueryParameter {
    QueryParameter {
        name: param.name.clone(),
        description: param.description.clone(),
        type_name: to_internal_type(param.type_name.as_deref().unwrap_or("string")).to_string(),
        required: param.required,
        allow_multiple: param.allow_multiple,
        default_value: param.default_value.clone(),
        enumeration: param.enum_values.clone(),
    }
}

fn to_representation(id: &str, model: &ModelDeclaration) -> Result<Representation, BuildError> {
    let mut representation = Representation::new(id);
    representation.description = model.description.clone();

    for (name, swag_property) in &model.properties {
        let is_array = swag_property.type_name.as_deref() == Some("array");
        let type_name = if is_array {
            item_name(swag_property.items.as_ref(), name)?
        } else {
            swag_property
                .type_name
                .as_deref()
                .or(swag_property.ref_name.as_deref())
                .ok_or_else(|| BuildError::MissingType(format!("property {id}.{name}")))?
        };

        let mut property = Property::new(name.clone(), to_internal_type(type_name));
        property.description = swag_property.description.clone();
        property.min_occurs = i32::from(model.required.contains(name));
        property.max_occurs = if is_array { -1 } else { 1 };
        property.min = swag_property.minimum.clone();
        property.max = swag_property.maximum.clone();
        property.enumeration = swag_property.enum_values.clone();
        property.unique_items = swag_property.unique_items;

        representation.properties.push(property);
        debug!("Property {name} added");
    }

    Ok(representation)
}

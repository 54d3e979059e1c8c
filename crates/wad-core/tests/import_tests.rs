use indexmap::IndexMap;
use wad_core::error::{TranslationError, TranslationErrorKind};
use wad_core::model::*;
use wad_core::swagger::*;
use wad_core::translate::import;

fn petstore_documents() -> (ResourceListing, IndexMap<String, ApiDeclaration>) {
    let listing: ResourceListing =
        from_json(include_str!("fixtures/petstore-listing.json")).unwrap();
    let mut declarations = IndexMap::new();
    declarations.insert(
        "pets".to_string(),
        from_json(include_str!("fixtures/pets.json")).unwrap(),
    );
    declarations.insert(
        "store".to_string(),
        from_yaml(include_str!("fixtures/store.yaml")).unwrap(),
    );
    (listing, declarations)
}

fn listing(paths: &[&str]) -> ResourceListing {
    ResourceListing {
        api_version: Some("1.0".to_string()),
        apis: paths
            .iter()
            .map(|p| ResourceDeclaration {
                path: p.to_string(),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

fn declaration(path: &str, operations: Vec<ResourceOperationDeclaration>) -> ApiDeclaration {
    ApiDeclaration {
        base_path: Some("http://api.example.com".to_string()),
        apis: vec![ResourceDeclaration {
            path: path.to_string(),
            description: None,
            operations,
        }],
        ..Default::default()
    }
}

fn operation(method: &str, nickname: &str) -> ResourceOperationDeclaration {
    ResourceOperationDeclaration {
        method: method.to_string(),
        nickname: nickname.to_string(),
        type_name: Some("void".to_string()),
        ..Default::default()
    }
}

fn model(id: &str, sub_types: &[&str]) -> ModelDeclaration {
    let mut model = ModelDeclaration {
        id: id.to_string(),
        sub_types: sub_types.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    };
    model.properties.insert(
        "name".to_string(),
        TypePropertyDeclaration {
            type_name: Some("string".to_string()),
            ..Default::default()
        },
    );
    model
}

fn single(section: &str, decl: ApiDeclaration) -> IndexMap<String, ApiDeclaration> {
    let mut declarations = IndexMap::new();
    declarations.insert(section.to_string(), decl);
    declarations
}

#[test]
fn import_petstore_contract() {
    let (listing, declarations) = petstore_documents();
    let definition = import(&listing, &declarations).unwrap();

    assert_eq!(definition.version.as_deref(), Some("1.0.0"));
    assert_eq!(
        definition.contact.as_ref().and_then(|c| c.email.as_deref()),
        Some("api@petstore.example.com")
    );
    assert_eq!(
        definition.license.as_ref().and_then(|l| l.url.as_deref()),
        Some("https://www.apache.org/licenses/LICENSE-2.0")
    );

    let contract = &definition.contract;
    assert_eq!(contract.name, "Petstore");
    assert_eq!(contract.description.as_deref(), Some("A sample pet store"));

    let sections: Vec<(&str, Option<&str>)> = contract
        .sections
        .iter()
        .map(|s| (s.name.as_str(), s.description.as_deref()))
        .collect();
    assert_eq!(
        sections,
        vec![
            ("pets", Some("Operations on pets")),
            ("store", Some("Store operations")),
        ]
    );

    let paths: Vec<&str> = contract
        .resources
        .iter()
        .map(|r| r.resource_path.as_str())
        .collect();
    assert_eq!(
        paths,
        vec!["/pets", "/pets/{petId}", "/pets/{petId}/photo", "/store/orders"]
    );
    let orders = contract.resource("/store/orders").unwrap();
    assert!(orders.sections.contains("store"));
    assert!(!orders.sections.contains("pets"));
}

#[test]
fn import_endpoint_from_first_declaration() {
    let (listing, declarations) = petstore_documents();
    let definition = import(&listing, &declarations).unwrap();

    // store.yaml carries another base path, it is ignored
    assert_eq!(definition.endpoints.len(), 1);
    let endpoint = &definition.endpoints[0];
    assert_eq!(endpoint.protocol, "https");
    assert_eq!(endpoint.domain, "petstore.example.com");
    assert_eq!(endpoint.base_path.as_deref(), Some("/v1"));
    assert_eq!(
        endpoint.authentication_protocol,
        Some(AuthenticationProtocol::HttpBasic)
    );
    assert_eq!(endpoint.compute_url(), "https://petstore.example.com/v1");
}

#[test]
fn import_operations() {
    let (listing, declarations) = petstore_documents();
    let definition = import(&listing, &declarations).unwrap();
    let contract = &definition.contract;

    let collection = contract.resource("/pets").unwrap();
    let list = &collection.operations[0];
    assert_eq!(list.name, "listPets");
    assert_eq!(list.description.as_deref(), Some("List pets"));
    // Inherited from the declaration
    assert_eq!(list.produces, vec!["application/json"]);

    // Duplicate query parameters are kept as declared
    assert_eq!(list.query_parameters.len(), 2);
    let status = &list.query_parameters[0];
    assert_eq!(status.type_name, "String");
    assert!(status.allow_multiple);
    assert_eq!(status.default_value.as_deref(), Some("available"));
    assert_eq!(status.enumeration, vec!["available", "sold"]);

    assert_eq!(list.responses.len(), 2);
    let success = &list.responses[0];
    assert_eq!(success.code, 200);
    assert_eq!(success.name, "Success");
    assert_eq!(success.message.as_deref(), Some("OK"));
    assert_eq!(success.output_payload, Some(PayLoad::new("Pet", true)));
    let error = &list.responses[1];
    assert_eq!(error.code, 400);
    assert_eq!(error.name, "Error 400");
    assert_eq!(error.message.as_deref(), Some("Invalid status"));
    assert_eq!(error.output_payload, Some(PayLoad::new("Error", false)));

    // Only the first body parameter is kept
    let create = &collection.operations[1];
    assert_eq!(create.input_payload, Some(PayLoad::new("Pet", false)));
    assert_eq!(create.consumes, vec!["application/json"]);
    assert_eq!(create.produces, vec!["application/json"]);

    let single = contract.resource("/pets/{petId}").unwrap();
    assert_eq!(single.path_variables.len(), 1);
    assert_eq!(single.path_variables[0].name, "petId");
    assert_eq!(single.path_variables[0].type_name, "Integer");

    let delete = &single.operations[1];
    assert_eq!(delete.method, "DELETE");
    assert_eq!(delete.name, "deletePet");
    assert_eq!(delete.responses[0].output_payload, None);
    assert_eq!(delete.responses[1].code, 404);
    assert_eq!(delete.responses[1].output_payload, None);
}

#[test]
fn import_multipart_synthesizes_file_once() {
    let (listing, declarations) = petstore_documents();
    let definition = import(&listing, &declarations).unwrap();
    let contract = &definition.contract;

    let files: Vec<&Representation> = contract
        .representations
        .iter()
        .filter(|r| r.name == "File")
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].raw);
    assert!(files[0].sections.contains("pets"));

    let photo = contract.resource("/pets/{petId}/photo").unwrap();
    assert_eq!(photo.path_variables.len(), 1);
    assert_eq!(photo.operations.len(), 2);
    assert_eq!(
        photo.operations[0].input_payload,
        Some(PayLoad::new("File", false))
    );
    assert_eq!(photo.operations[0].consumes, vec!["multipart/form-data"]);
}

#[test]
fn import_declared_file_model_is_not_duplicated() {
    let mut docs = declaration("/docs", vec![operation("GET", "listDocs")]);
    docs.models.insert(
        "File".to_string(),
        ModelDeclaration {
            id: "File".to_string(),
            ..Default::default()
        },
    );
    let mut upload = operation("POST", "uploadDoc");
    upload.consumes = vec!["multipart/form-data".to_string()];
    let uploads = declaration("/uploads", vec![upload]);

    let mut declarations = single("docs", docs);
    declarations.insert("uploads".to_string(), uploads);
    let definition = import(&listing(&["/docs", "/uploads"]), &declarations).unwrap();

    let files: Vec<&Representation> = definition
        .contract
        .representations
        .iter()
        .filter(|r| r.name == "File")
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].raw);
    assert!(files[0].sections.contains("docs"));
}

#[test]
fn import_representations() {
    let (listing, declarations) = petstore_documents();
    let definition = import(&listing, &declarations).unwrap();
    let contract = &definition.contract;

    let names: Vec<&str> = contract
        .representations
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["Dog", "Error", "Person", "Pet", "File", "Order"]);

    // The duplicate in store.yaml does not replace the first one
    let pet = contract.representation("Pet").unwrap();
    assert_eq!(pet.description.as_deref(), Some("A pet in the store"));
    assert!(pet.sections.contains("pets"));

    let id = &pet.properties[0];
    assert_eq!((id.name.as_str(), id.type_name.as_str()), ("id", "Integer"));
    assert!(id.is_required());
    let tags = &pet.properties[2];
    assert_eq!(tags.type_name, "String");
    assert!(tags.is_array());
    assert!(tags.unique_items);
    let owner = &pet.properties[3];
    assert_eq!(owner.type_name, "Person");
    assert!(!owner.is_required());

    let dog = contract.representation("Dog").unwrap();
    assert_eq!(dog.extended_type.as_deref(), Some("Pet"));

    let order = contract.representation("Order").unwrap();
    assert!(order.sections.contains("store"));
    assert_eq!(order.properties[0].type_name, "long");
    assert!(order.properties[0].is_required());
    assert_eq!(order.properties[1].type_name, "Integer");
    assert_eq!(order.properties[1].min.as_deref(), Some("1"));
    assert_eq!(order.properties[1].max.as_deref(), Some("100"));
}

#[test]
fn import_rejects_missing_declarations() {
    let (listing, mut declarations) = petstore_documents();
    declarations.shift_remove("store");

    let err = import(&listing, &declarations).unwrap_err();
    assert_eq!(err.kind, TranslationErrorKind::File);
    assert_eq!(err.message, "Some API declarations are missing");
}

#[test]
fn import_rejects_unmapped_declarations() {
    let (listing, mut declarations) = petstore_documents();
    declarations.insert("users".to_string(), declaration("/users", vec![]));

    let err = import(&listing, &declarations).unwrap_err();
    assert_eq!(err.kind, TranslationErrorKind::File);
    assert_eq!(
        err.message,
        "One of your API declarations is not mapped in your resource listing"
    );
}

#[test]
fn import_rejects_declaration_without_listing_entry() {
    let err = import(
        &listing(&["/pets"]),
        &single("users", declaration("/users", vec![operation("GET", "listUsers")])),
    )
    .unwrap_err();
    assert_eq!(err, TranslationError::compliance());
    assert_eq!(
        err.to_string(),
        "compliance: Impossible to read your API definition, check your Swagger specs compliance"
    );
}

#[test]
fn import_rejects_unknown_subtype() {
    let mut decl = declaration("/pets", vec![operation("GET", "listPets")]);
    decl.models.insert("Pet".to_string(), model("Pet", &["Cat"]));

    let err = import(&listing(&["/pets"]), &single("pets", decl)).unwrap_err();
    assert_eq!(err.kind, TranslationErrorKind::Compliance);
}

#[test]
fn import_rejects_missing_base_path() {
    let mut decl = declaration("/pets", vec![operation("GET", "listPets")]);
    decl.base_path = None;

    let err = import(&listing(&["/pets"]), &single("pets", decl)).unwrap_err();
    assert_eq!(err.kind, TranslationErrorKind::Compliance);
}

#[test]
fn import_rejects_array_without_items() {
    let mut op = operation("GET", "listPets");
    op.type_name = Some("array".to_string());

    let err = import(
        &listing(&["/pets"]),
        &single("pets", declaration("/pets", vec![op])),
    )
    .unwrap_err();
    assert_eq!(err.kind, TranslationErrorKind::Compliance);
}

#[test]
fn import_conflicting_subtypes_last_parent_wins() {
    let mut decl = declaration("/animals", vec![operation("GET", "listAnimals")]);
    decl.models.insert("Animal".to_string(), model("Animal", &["Cat"]));
    decl.models.insert("Pet".to_string(), model("Pet", &["Cat"]));
    decl.models.insert("Cat".to_string(), model("Cat", &[]));

    let definition = import(&listing(&["/animals"]), &single("animals", decl)).unwrap();
    let cat = definition.contract.representation("Cat").unwrap();
    assert_eq!(cat.extended_type.as_deref(), Some("Pet"));
}

#[test]
fn import_subtypes_across_declarations() {
    let mut pets = declaration("/pets", vec![operation("GET", "listPets")]);
    pets.models.insert("Pet".to_string(), model("Pet", &[]));
    let mut dogs = declaration("/dogs", vec![operation("GET", "listDogs")]);
    dogs.models.insert("Dog".to_string(), model("Dog", &[]));
    dogs.models.insert("Pet".to_string(), model("Pet", &["Dog"]));

    let mut declarations = single("pets", pets);
    declarations.insert("dogs".to_string(), dogs);

    let definition = import(&listing(&["/pets", "/dogs"]), &declarations).unwrap();
    let contract = &definition.contract;
    assert_eq!(contract.representations.len(), 2);
    assert_eq!(
        contract.representation("Dog").unwrap().extended_type.as_deref(),
        Some("Pet")
    );
}

#[test]
fn import_authorization_schemes() {
    let decl = || single("pets", declaration("/pets", vec![operation("GET", "listPets")]));

    let definition = import(&listing(&["/pets"]), &decl()).unwrap();
    assert_eq!(definition.endpoints[0].authentication_protocol, None);

    let with_auth = |json: &str| {
        let mut listing = listing(&["/pets"]);
        listing.authorizations = Some(serde_json::from_str(json).unwrap());
        import(&listing, &decl()).unwrap().endpoints[0].authentication_protocol
    };

    assert_eq!(
        with_auth(r#"{ "oauth2": { "type": "oauth2", "scopes": [{ "scope": "read" }] } }"#),
        Some(AuthenticationProtocol::HttpOAuth)
    );
    assert_eq!(
        with_auth(r#"{ "apiKey": { "type": "apiKey", "passAs": "header", "keyname": "X-Key" } }"#),
        Some(AuthenticationProtocol::Custom)
    );
    assert_eq!(
        with_auth(r#"{ "basicAuth": { "type": "basicAuth" }, "apiKey": { "type": "apiKey" } }"#),
        Some(AuthenticationProtocol::HttpBasic)
    );
}

#[test]
fn import_merges_recurring_resource_paths() {
    let mut first = declaration("/shared", vec![operation("GET", "getShared")]);
    first.apis[0].operations[0].parameters.push({
        let mut p = ResourceOperationParameterDeclaration::new(ParamType::Query, "q");
        p.type_name = Some("string".to_string());
        p
    });
    let second = declaration("/shared", vec![operation("POST", "createShared")]);

    let mut declarations = single("a", first);
    declarations.insert("b".to_string(), second);

    let definition = import(&listing(&["/a", "/b"]), &declarations).unwrap();
    let contract = &definition.contract;
    assert_eq!(contract.resources.len(), 1);

    let shared = &contract.resources[0];
    let sections: Vec<&str> = shared.sections.iter().map(String::as_str).collect();
    assert_eq!(sections, vec!["a", "b"]);
    let names: Vec<&str> = shared.operations.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["getShared", "createShared"]);
}

#[test]
fn import_derives_missing_nicknames() {
    let decl = declaration("/pets/{petId}", vec![operation("PUT", "")]);
    let definition = import(&listing(&["/pets"]), &single("pets", decl)).unwrap();
    assert_eq!(
        definition.contract.resources[0].operations[0].name,
        "updatePet"
    );
}

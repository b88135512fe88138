#![allow(dead_code)]

use std::sync::Arc;

use graphql_docs_lsp::*;
use tower_lsp::LanguageServer;
use tower_lsp::lsp_types::*;

pub fn create_test_backend() -> Backend {
    Backend::new_test_with_schema(sample_schema())
}

fn arg(name: &str, ty: TypeRef) -> Arc<InputValueInfo> {
    Arc::new(InputValueInfo {
        name: name.to_string(),
        ty,
        description: None,
        default_value: None,
        deprecation_reason: None,
    })
}

fn field(name: &str, ty: TypeRef) -> FieldInfo {
    FieldInfo {
        name: name.to_string(),
        ty,
        description: None,
        deprecation_reason: None,
        args: Vec::new(),
    }
}

/// A small schema with one of every kind of type:
///
/// ```graphql
/// type Query { user(id: ID!): User  users(first: Int = 10): [User!]!  search(term: String!): [SearchResult] }
/// type Mutation { createUser(name: String!): User }
/// interface Node { id: ID! }
/// type User implements Node { id  name  email @deprecated  emails  posts(first, after) }
/// type Post implements Node { id  title  author }
/// union SearchResult = User | Post
/// enum Role { ADMIN  GUEST @deprecated }
/// scalar Date
/// input UserFilter { name: String }
/// input EmptyInput
/// ```
pub fn sample_schema() -> SchemaGraph {
    let mut schema = SchemaGraph {
        description: Some("The sample API.".to_string()),
        query_type: Some("Query".to_string()),
        mutation_type: Some("Mutation".to_string()),
        ..SchemaGraph::default()
    };

    let mut query = NamedType::new("Query", TypeKind::Object);
    let mut user_field = field("user", TypeRef::named("User"));
    user_field.description = Some("Look up a user by id.".to_string());
    user_field.args = vec![arg("id", TypeRef::non_null(TypeRef::named("ID")))];
    let mut users_field = field(
        "users",
        TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::named("User")))),
    );
    users_field.args = vec![Arc::new(InputValueInfo {
        name: "first".to_string(),
        ty: TypeRef::named("Int"),
        description: Some("How many users to return.".to_string()),
        default_value: Some("10".to_string()),
        deprecation_reason: None,
    })];
    let mut search_field = field("search", TypeRef::list(TypeRef::named("SearchResult")));
    search_field.args = vec![arg("term", TypeRef::non_null(TypeRef::named("String")))];
    query.fields = vec![
        Arc::new(user_field),
        Arc::new(users_field),
        Arc::new(search_field),
    ];
    schema.insert_type(query);

    let mut mutation = NamedType::new("Mutation", TypeKind::Object);
    let mut create = field("createUser", TypeRef::named("User"));
    create.args = vec![arg("name", TypeRef::non_null(TypeRef::named("String")))];
    mutation.fields = vec![Arc::new(create)];
    schema.insert_type(mutation);

    let mut node = NamedType::new("Node", TypeKind::Interface);
    node.fields = vec![Arc::new(field("id", TypeRef::non_null(TypeRef::named("ID"))))];
    node.possible_types = vec!["User".to_string(), "Post".to_string()];
    schema.insert_type(node);

    let mut user = NamedType::new("User", TypeKind::Object);
    user.description = Some("A person with an account.".to_string());
    user.interfaces = vec!["Node".to_string()];
    let mut name = field("name", TypeRef::named("String"));
    name.description = Some("The display name.".to_string());
    let mut email = field("email", TypeRef::named("String"));
    email.deprecation_reason = Some("Use `emails`.".to_string());
    let mut posts = field(
        "posts",
        TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::named("Post")))),
    );
    posts.args = vec![
        arg("first", TypeRef::named("Int")),
        arg("after", TypeRef::named("String")),
    ];
    user.fields = vec![
        Arc::new(field("id", TypeRef::non_null(TypeRef::named("ID")))),
        Arc::new(name),
        Arc::new(email),
        Arc::new(field(
            "emails",
            TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::named("String")))),
        )),
        Arc::new(posts),
    ];
    schema.insert_type(user);

    let mut post = NamedType::new("Post", TypeKind::Object);
    post.interfaces = vec!["Node".to_string()];
    post.fields = vec![
        Arc::new(field("id", TypeRef::non_null(TypeRef::named("ID")))),
        Arc::new(field("title", TypeRef::non_null(TypeRef::named("String")))),
        Arc::new(field("author", TypeRef::named("User"))),
    ];
    schema.insert_type(post);

    let mut search_result = NamedType::new("SearchResult", TypeKind::Union);
    search_result.possible_types = vec!["User".to_string(), "Post".to_string()];
    schema.insert_type(search_result);

    let mut role = NamedType::new("Role", TypeKind::Enum);
    role.enum_values = vec![
        EnumValueInfo {
            name: "ADMIN".to_string(),
            description: None,
            deprecation_reason: None,
        },
        EnumValueInfo {
            name: "GUEST".to_string(),
            description: None,
            deprecation_reason: Some("No guests.".to_string()),
        },
    ];
    schema.insert_type(role);

    schema.insert_type(NamedType::new("Date", TypeKind::Scalar));
    for scalar in ["ID", "String", "Int", "Boolean"] {
        schema.insert_type(NamedType::new(scalar, TypeKind::Scalar));
    }

    let mut filter = NamedType::new("UserFilter", TypeKind::InputObject);
    filter.input_fields = vec![arg("name", TypeRef::named("String"))];
    schema.insert_type(filter);
    schema.insert_type(NamedType::new("EmptyInput", TypeKind::InputObject));

    let mut introspection = NamedType::new("__Schema", TypeKind::Object);
    introspection.fields = vec![Arc::new(field("description", TypeRef::named("String")))];
    schema.insert_type(introspection);

    schema
}

pub fn type_def(schema: &SchemaGraph, name: &str) -> Definition {
    Definition::Type(schema.get_type(name).cloned().expect("type in sample schema"))
}

pub fn field_def(schema: &SchemaGraph, type_name: &str, field: &str) -> Definition {
    Definition::Field(
        schema
            .get_type(type_name)
            .and_then(|t| t.field(field))
            .cloned()
            .expect("field in sample schema"),
    )
}

/// A minimal introspection result in the standard response shape.
pub const INTROSPECTION_JSON: &str = r#"{
  "data": {
    "__schema": {
      "description": null,
      "queryType": { "name": "Query" },
      "mutationType": null,
      "subscriptionType": null,
      "types": [
        {
          "kind": "OBJECT",
          "name": "Query",
          "description": "The root.",
          "fields": [
            {
              "name": "viewer",
              "description": "The current user.",
              "args": [
                {
                  "name": "locale",
                  "description": null,
                  "type": { "kind": "SCALAR", "name": "String", "ofType": null },
                  "defaultValue": "\"en\""
                }
              ],
              "type": {
                "kind": "NON_NULL",
                "name": null,
                "ofType": { "kind": "OBJECT", "name": "Viewer", "ofType": null }
              },
              "isDeprecated": false,
              "deprecationReason": null
            },
            {
              "name": "legacy",
              "description": null,
              "args": [],
              "type": {
                "kind": "LIST",
                "name": null,
                "ofType": {
                  "kind": "NON_NULL",
                  "name": null,
                  "ofType": { "kind": "SCALAR", "name": "String", "ofType": null }
                }
              },
              "isDeprecated": true,
              "deprecationReason": null
            }
          ],
          "inputFields": null,
          "interfaces": [],
          "enumValues": null,
          "possibleTypes": null
        },
        {
          "kind": "OBJECT",
          "name": "Viewer",
          "description": null,
          "fields": [
            {
              "name": "login",
              "description": "Login <b>name</b>.",
              "args": [],
              "type": { "kind": "SCALAR", "name": "String", "ofType": null },
              "isDeprecated": false,
              "deprecationReason": null
            }
          ],
          "inputFields": null,
          "interfaces": [],
          "enumValues": null,
          "possibleTypes": null
        },
        {
          "kind": "SCALAR",
          "name": "String",
          "description": null,
          "fields": null,
          "inputFields": null,
          "interfaces": null,
          "enumValues": null,
          "possibleTypes": null
        },
        {
          "kind": "ENUM",
          "name": "__TypeKind",
          "description": null,
          "fields": null,
          "inputFields": null,
          "interfaces": null,
          "enumValues": [
            { "name": "SCALAR", "description": null, "isDeprecated": false, "deprecationReason": null }
          ],
          "possibleTypes": null
        }
      ],
      "directives": []
    }
  }
}"#;

/// Open `text` as a document in `backend`.
pub async fn open_document(backend: &Backend, uri: &Url, text: &str) {
    backend
        .did_open(DidOpenTextDocumentParams {
            text_document: TextDocumentItem {
                uri: uri.clone(),
                language_id: "graphql".to_string(),
                version: 1,
                text: text.to_string(),
            },
        })
        .await;
}

/// Request completion at `line:character` and return the item labels.
pub async fn complete_at(backend: &Backend, uri: &Url, line: u32, character: u32) -> Vec<CompletionItem> {
    let result = backend
        .completion(CompletionParams {
            text_document_position: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier { uri: uri.clone() },
                position: Position { line, character },
            },
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
            context: None,
        })
        .await
        .unwrap();

    match result {
        Some(CompletionResponse::Array(items)) => items,
        Some(CompletionResponse::List(list)) => list.items,
        None => Vec::new(),
    }
}

pub fn labels(items: &[CompletionItem]) -> Vec<&str> {
    items.iter().map(|i| i.label.as_str()).collect()
}

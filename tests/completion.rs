mod common;

use common::{INTROSPECTION_JSON, complete_at, create_test_backend, labels, open_document};
use graphql_docs_lsp::config::WORKSPACE_CONFIG_FILE;
use graphql_docs_lsp::*;
use tower_lsp::LanguageServer;
use tower_lsp::jsonrpc::ErrorCode;
use tower_lsp::lsp_types::*;

fn uri() -> Url {
    Url::parse("file:///query.graphql").unwrap()
}

async fn resolve(backend: &Backend, item: CompletionItem) -> String {
    let item = backend.completion_resolve(item).await.unwrap();
    match item.documentation {
        Some(Documentation::MarkupContent(content)) => {
            assert_eq!(content.kind, MarkupKind::Markdown);
            content.value
        }
        other => panic!("expected markup documentation, got {other:?}"),
    }
}

fn item<'a>(items: &'a [CompletionItem], label: &str) -> &'a CompletionItem {
    items
        .iter()
        .find(|i| i.label == label)
        .unwrap_or_else(|| panic!("no item {label}"))
}

async fn explore(backend: &Backend, action: ExploreAction) -> Option<graphql_docs_lsp::explorer::panel::Panel> {
    backend
        .explore(ExploreParams { action })
        .await
        .unwrap()
        .panel
}

// ─── Selection sets ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fields_of_nested_selection() {
    let backend = create_test_backend();
    let text = "query {\n  user(id: \"1\") {\n    \n  }\n}\n";
    open_document(&backend, &uri(), text).await;

    let items = complete_at(&backend, &uri(), 2, 4).await;
    assert_eq!(
        labels(&items),
        vec!["id", "name", "email", "emails", "posts", "__typename"]
    );
    let posts = item(&items, "posts");
    assert_eq!(posts.kind, Some(CompletionItemKind::FIELD));
    assert_eq!(
        posts.detail.as_deref(),
        Some("posts(first: Int, after: String): [Post!]!")
    );
}

#[tokio::test]
async fn test_root_fields_of_anonymous_query() {
    let backend = create_test_backend();
    open_document(&backend, &uri(), "{\n  \n}").await;
    let items = complete_at(&backend, &uri(), 1, 2).await;
    assert_eq!(labels(&items), vec!["user", "users", "search", "__typename"]);
}

#[tokio::test]
async fn test_mutation_root() {
    let backend = create_test_backend();
    open_document(&backend, &uri(), "mutation AddUser {\n  \n}").await;
    let items = complete_at(&backend, &uri(), 1, 2).await;
    assert_eq!(labels(&items), vec!["createUser", "__typename"]);
}

#[tokio::test]
async fn test_alias_and_variables_do_not_confuse_the_path() {
    let backend = create_test_backend();
    let text = "query Q($id: ID!) {\n  me: user(id: $id) @include(if: true) {\n    posts { \n  }\n}";
    open_document(&backend, &uri(), text).await;
    let items = complete_at(&backend, &uri(), 2, 12).await;
    assert_eq!(labels(&items), vec!["id", "title", "author", "__typename"]);
}

#[tokio::test]
async fn test_fragment_type_condition() {
    let backend = create_test_backend();
    let text = "fragment Parts on Post {\n  author {\n    \n  }\n}";
    open_document(&backend, &uri(), text).await;
    let items = complete_at(&backend, &uri(), 2, 4).await;
    assert!(labels(&items).contains(&"emails"));
}

#[tokio::test]
async fn test_union_offers_typename_and_inline_fragment_narrows() {
    let backend = create_test_backend();
    let text = "{\n  search(term: \"x\") {\n    \n    ... on Post {\n      \n    }\n  }\n}";
    open_document(&backend, &uri(), text).await;

    let items = complete_at(&backend, &uri(), 2, 4).await;
    assert_eq!(labels(&items), vec!["__typename"]);

    let items = complete_at(&backend, &uri(), 4, 6).await;
    assert_eq!(labels(&items), vec!["id", "title", "author", "__typename"]);
}

#[tokio::test]
async fn test_deprecated_field_is_tagged() {
    let backend = create_test_backend();
    open_document(&backend, &uri(), "{ user { } }").await;
    let items = complete_at(&backend, &uri(), 0, 9).await;
    assert_eq!(
        item(&items, "email").tags,
        Some(vec![CompletionItemTag::DEPRECATED])
    );
    assert_eq!(item(&items, "name").tags, None);
}

#[tokio::test]
async fn test_columns_count_utf16_units() {
    let backend = create_test_backend();
    // Each emoji is one char but two UTF-16 units.
    let text = "{ user(id: \"😀😀\") {  } }";
    open_document(&backend, &uri(), text).await;

    // Column 21 sits between the two spaces inside `user { }`.
    let items = complete_at(&backend, &uri(), 0, 21).await;
    assert!(labels(&items).contains(&"emails"), "got: {:?}", labels(&items));

    // Column 23 is just past the first closing brace, back at the root.
    let items = complete_at(&backend, &uri(), 0, 23).await;
    assert!(labels(&items).contains(&"users"), "got: {:?}", labels(&items));
}

#[tokio::test]
async fn test_no_completion_outside_selection_sets() {
    let backend = create_test_backend();
    open_document(&backend, &uri(), "query Q(\n").await;
    assert!(complete_at(&backend, &uri(), 0, 8).await.is_empty());
    assert!(complete_at(&backend, &uri(), 0, 0).await.is_empty());
}

#[tokio::test]
async fn test_unknown_field_path_yields_nothing() {
    let backend = create_test_backend();
    open_document(&backend, &uri(), "{ nope { } }").await;
    assert!(complete_at(&backend, &uri(), 0, 9).await.is_empty());
}

#[tokio::test]
async fn test_no_completion_without_schema() {
    let backend = Backend::new_test();
    open_document(&backend, &uri(), "{ }").await;
    assert!(complete_at(&backend, &uri(), 0, 2).await.is_empty());
}

// ─── Arguments ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_argument_completion() {
    let backend = create_test_backend();
    open_document(&backend, &uri(), "{\n  user { posts(").await;
    let items = complete_at(&backend, &uri(), 1, 17).await;
    assert_eq!(labels(&items), vec!["first", "after"]);
    let first = item(&items, "first");
    assert_eq!(first.kind, Some(CompletionItemKind::PROPERTY));
    assert_eq!(first.insert_text.as_deref(), Some("first: "));
    assert_eq!(first.detail.as_deref(), Some("Int"));
}

#[tokio::test]
async fn test_directive_arguments_are_not_field_arguments() {
    let backend = create_test_backend();
    open_document(&backend, &uri(), "{ user @include(").await;
    assert!(complete_at(&backend, &uri(), 0, 16).await.is_empty());
}

// ─── Resolve ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_resolve_prefixes_type_badge() {
    let backend = create_test_backend();
    open_document(&backend, &uri(), "{ user { } }").await;
    let items = complete_at(&backend, &uri(), 0, 9).await;

    let doc = resolve(&backend, item(&items, "name").clone()).await;
    assert_eq!(doc, "`String` The display name.");
}

#[tokio::test]
async fn test_resolve_uses_fallback_text() {
    let backend = create_test_backend();
    open_document(&backend, &uri(), "{ user { } }").await;
    let items = complete_at(&backend, &uri(), 0, 9).await;

    let doc = resolve(&backend, item(&items, "id").clone()).await;
    assert_eq!(doc, "`ID!` no description available");
}

#[tokio::test]
async fn test_resolve_appends_deprecation() {
    let backend = create_test_backend();
    open_document(&backend, &uri(), "{ user { } }").await;
    let items = complete_at(&backend, &uri(), 0, 9).await;

    let doc = resolve(&backend, item(&items, "email").clone()).await;
    assert_eq!(
        doc,
        "`String` no description available\n\n**Deprecated** Use `emails`."
    );
}

#[tokio::test]
async fn test_resolve_argument() {
    let backend = create_test_backend();
    open_document(&backend, &uri(), "{ users(").await;
    let items = complete_at(&backend, &uri(), 0, 8).await;
    let doc = resolve(&backend, item(&items, "first").clone()).await;
    assert_eq!(doc, "`Int` How many users to return.");
}

#[tokio::test]
async fn test_resolve_leaves_typename_alone() {
    let backend = create_test_backend();
    open_document(&backend, &uri(), "{ user { } }").await;
    let items = complete_at(&backend, &uri(), 0, 9).await;
    let typename = item(&items, "__typename").clone();
    let resolved = backend.completion_resolve(typename.clone()).await.unwrap();
    assert_eq!(resolved, typename);
}

// ─── Explorer requests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_explore_navigation_round_trip() {
    let backend = create_test_backend();

    let panel = explore(&backend, ExploreAction::Refresh).await.expect("first render");
    assert_eq!(panel.mode, "schema");
    assert_eq!(panel.title, "Documentation Explorer");
    assert!(explore(&backend, ExploreAction::Refresh).await.is_none());

    let panel = explore(
        &backend,
        ExploreAction::OpenType {
            name: "User".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(panel.mode, "type");
    assert_eq!(panel.back_label.as_deref(), Some("Docs"));

    let panel = explore(
        &backend,
        ExploreAction::OpenField {
            type_name: "User".into(),
            field: "posts".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(panel.mode, "field");
    assert_eq!(panel.back_label.as_deref(), Some("User"));
    assert!(panel.search.is_none());

    let panel = explore(
        &backend,
        ExploreAction::OpenArgument {
            type_name: "User".into(),
            field: "posts".into(),
            argument: "after".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(panel.title, "after");
    assert_eq!(panel.back_label.as_deref(), Some("posts"));

    let panel = explore(&backend, ExploreAction::Pop).await.unwrap();
    assert_eq!(panel.title, "posts");

    let panel = explore(&backend, ExploreAction::Reset).await.unwrap();
    assert_eq!(panel.mode, "schema");
}

#[tokio::test]
async fn test_explore_search() {
    let backend = create_test_backend();
    let panel = explore(&backend, ExploreAction::Search { term: "post".into() })
        .await
        .unwrap();
    assert_eq!(panel.mode, "search-results");
    assert_eq!(panel.search.map(|s| s.value), Some("post".to_string()));

    let panel = explore(&backend, ExploreAction::Search { term: String::new() })
        .await
        .unwrap();
    assert_eq!(panel.mode, "schema");
}

#[tokio::test]
async fn test_explore_unknown_member_is_invalid_params() {
    let backend = create_test_backend();
    let err = backend
        .explore(ExploreParams {
            action: ExploreAction::OpenField {
                type_name: "User".into(),
                field: "age".into(),
            },
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidParams);
}

#[tokio::test]
async fn test_explore_without_schema() {
    let backend = Backend::new_test();
    let panel = explore(&backend, ExploreAction::Refresh).await.unwrap();
    assert_eq!(panel.mode, "spinner");

    let err = backend
        .explore(ExploreParams {
            action: ExploreAction::OpenType {
                name: "User".into(),
            },
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidParams);
}

#[test]
fn test_explore_action_wire_format() {
    let params: ExploreParams = serde_json::from_str(
        r#"{ "action": { "kind": "openField", "typeName": "User", "field": "posts" } }"#,
    )
    .unwrap();
    assert_eq!(
        params.action,
        ExploreAction::OpenField {
            type_name: "User".into(),
            field: "posts".into(),
        }
    );
    let params: ExploreParams = serde_json::from_str(r#"{ "action": { "kind": "pop" } }"#).unwrap();
    assert_eq!(params.action, ExploreAction::Pop);
}

// ─── Workspace loading ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_initialized_loads_workspace_config_and_schema() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(WORKSPACE_CONFIG_FILE),
        "schema = \"schema.json\"\nsearch_limit = 5\nmarkup = \"html\"\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("schema.json"), INTROSPECTION_JSON).unwrap();

    let backend = Backend::new_test_with_workspace(dir.path().to_path_buf());
    backend.initialized(InitializedParams {}).await;

    let schema = backend.loaded_schema().expect("schema loaded");
    assert!(schema.get_type("Viewer").is_some());
    assert_eq!(backend.active_config().search_limit, 5);

    // HTML markup setting: the badge is an element spliced into the paragraph.
    open_document(&backend, &uri(), "{ viewer { } }").await;
    let items = complete_at(&backend, &uri(), 0, 11).await;
    let doc = resolve(&backend, item(&items, "login").clone()).await;
    assert!(
        doc.starts_with(r#"<p><span class="info-type"><a class="type-name">String</a></span>Login &lt;b&gt;name&lt;/b&gt;."#),
        "got: {doc}"
    );
}

#[tokio::test]
async fn test_initialized_with_broken_schema_shows_error_panel() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(WORKSPACE_CONFIG_FILE), "schema = \"schema.json\"\n").unwrap();
    std::fs::write(dir.path().join("schema.json"), "{ \"data\": {} }").unwrap();

    let backend = Backend::new_test_with_workspace(dir.path().to_path_buf());
    backend.initialized(InitializedParams {}).await;

    assert!(backend.loaded_schema().is_none());
    let panel = explore(&backend, ExploreAction::Refresh).await.unwrap();
    assert_eq!(panel.mode, "error");
    assert!(panel.content.contains("__schema"));
}

#[tokio::test]
async fn test_initialization_options_override_schema() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("other.json");
    std::fs::write(&schema_path, INTROSPECTION_JSON).unwrap();

    let backend = Backend::new_test();
    backend
        .initialize(InitializeParams {
            initialization_options: Some(serde_json::json!({ "schema": schema_path })),
            ..InitializeParams::default()
        })
        .await
        .unwrap();
    backend.initialized(InitializedParams {}).await;

    assert!(backend.loaded_schema().is_some());
    let panel = explore(&backend, ExploreAction::Refresh).await.unwrap();
    assert_eq!(panel.mode, "schema");
}

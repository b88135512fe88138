mod common;

use common::{complete_at, create_test_backend, open_document};
use graphql_docs_lsp::Backend;
use tower_lsp::LanguageServer;
use tower_lsp::lsp_types::*;

#[tokio::test]
async fn test_initialize_reports_capabilities() {
    let backend = Backend::new_test();
    let result = backend.initialize(InitializeParams::default()).await.unwrap();

    let info = result.server_info.unwrap();
    assert_eq!(info.name, "GraphQLDocsLSP");
    assert_eq!(info.version.as_deref(), Some(env!("CARGO_PKG_VERSION")));

    let completion = result.capabilities.completion_provider.unwrap();
    assert_eq!(completion.resolve_provider, Some(true));
    assert!(completion.trigger_characters.unwrap().contains(&"{".to_string()));
    assert_eq!(
        result.capabilities.text_document_sync,
        Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL))
    );
}

#[tokio::test]
async fn test_did_change_replaces_document() {
    let backend = create_test_backend();
    let uri = Url::parse("file:///a.graphql").unwrap();
    open_document(&backend, &uri, "{ user { } }").await;

    backend
        .did_change(DidChangeTextDocumentParams {
            text_document: VersionedTextDocumentIdentifier {
                uri: uri.clone(),
                version: 2,
            },
            content_changes: vec![TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: "{ users { } }".to_string(),
            }],
        })
        .await;

    // Same cursor, new text: still inside a User selection set.
    let items = complete_at(&backend, &uri, 0, 10).await;
    assert!(items.iter().any(|i| i.label == "emails"));
}

#[tokio::test]
async fn test_did_close_forgets_document() {
    let backend = create_test_backend();
    let uri = Url::parse("file:///a.graphql").unwrap();
    open_document(&backend, &uri, "{ user { } }").await;
    backend
        .did_close(DidCloseTextDocumentParams {
            text_document: TextDocumentIdentifier { uri: uri.clone() },
        })
        .await;
    assert!(complete_at(&backend, &uri, 0, 9).await.is_empty());
}

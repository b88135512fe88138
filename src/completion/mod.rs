/// Completion-related modules.
///
/// This sub-module groups all completion logic:
/// - **context**: Finding the selection set or argument list at the cursor
/// - **builder**: Building LSP `CompletionItem`s from schema members
/// - **handler**: The `completion` and `completionItem/resolve` flows
pub mod builder;
pub mod context;
pub mod handler;

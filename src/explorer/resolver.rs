/// Content resolution for the documentation explorer.
///
/// Decides, from the schema state and the navigation history, which view
/// is shown, whether a search box appears, what the back button says and
/// what the title is.  Every function here is pure and re-evaluated on
/// each render.
use std::sync::Arc;

use crate::navigation::{NavigationEntry, NavigationHistory};
use crate::types::{Definition, NamedType, SchemaGraph};

/// The schema as the resolver sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaState<'a> {
    /// Still being fetched.
    Loading,
    /// Loading failed with these messages.
    Errored(&'a [String]),
    /// Loading finished and there is no schema.
    Unavailable,
    Ready(&'a Arc<SchemaGraph>),
}

/// The six mutually exclusive things the explorer can display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    ErrorView(Vec<String>),
    SpinnerView,
    NoSchemaView,
    SearchResultsView {
        term: String,
        scope: Option<Definition>,
    },
    SchemaRootView,
    TypeDetailView(Arc<NamedType>),
    /// A field or an argument.
    FieldDetailView(Option<Definition>),
}

impl ViewMode {
    /// A stable identifier for the view, sent to clients alongside the
    /// rendered content.
    pub fn kind(&self) -> &'static str {
        match self {
            ViewMode::ErrorView(_) => "error",
            ViewMode::SpinnerView => "spinner",
            ViewMode::NoSchemaView => "no-schema",
            ViewMode::SearchResultsView { .. } => "search-results",
            ViewMode::SchemaRootView => "schema",
            ViewMode::TypeDetailView(_) => "type",
            ViewMode::FieldDetailView(_) => "field",
        }
    }
}

/// Everything the resolver decides for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerView {
    pub mode: ViewMode,
    pub shows_search: bool,
    pub back_label: Option<String>,
    pub title: String,
}

/// Resolve all decisions for the current history position.
pub fn resolve_view(state: &SchemaState<'_>, history: &NavigationHistory) -> ExplorerView {
    let current = history.current();
    let depth = history.depth();
    ExplorerView {
        mode: resolve(state, current, depth),
        shows_search: shows_search(current, depth),
        back_label: back_label(history),
        title: current.display_title().to_string(),
    }
}

/// Pick the view mode.  The first matching rule wins.
///
/// An entry whose `def` is neither a type nor a field (including a
/// missing `def` above the root) falls through to the field view.  This
/// is a tolerant default rather than an error.
pub fn resolve(state: &SchemaState<'_>, current: &NavigationEntry, depth: usize) -> ViewMode {
    match state {
        SchemaState::Errored(errors) => return ViewMode::ErrorView(errors.to_vec()),
        SchemaState::Loading => return ViewMode::SpinnerView,
        SchemaState::Unavailable => return ViewMode::NoSchemaView,
        SchemaState::Ready(_) => {}
    }

    if let Some(term) = current.search_term() {
        return ViewMode::SearchResultsView {
            term: term.to_string(),
            scope: current.def.clone(),
        };
    }

    if depth == 1 {
        return ViewMode::SchemaRootView;
    }

    match &current.def {
        Some(Definition::Type(ty)) => ViewMode::TypeDetailView(Arc::clone(ty)),
        other => ViewMode::FieldDetailView(other.clone()),
    }
}

/// The search box is shown at the root, and on types that expose a
/// field set.
pub fn shows_search(current: &NavigationEntry, depth: usize) -> bool {
    if depth == 1 {
        return true;
    }
    current
        .def
        .as_ref()
        .and_then(Definition::as_type)
        .is_some_and(|ty| ty.exposes_field_set())
}

/// The back button label: the name of the entry below the current one.
pub fn back_label(history: &NavigationHistory) -> Option<String> {
    if history.depth() <= 1 {
        return None;
    }
    history.previous().map(|e| e.name.clone())
}

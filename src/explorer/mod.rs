/// Documentation explorer.
///
/// This sub-module groups the schema browser:
/// - **resolver**: Pure decision of what to show for a history position
/// - **search**: Member search behind the search results view
/// - **panel**: Rendering a resolved view into a titled panel
///
/// [`DocExplorer`] ties them together with an explicitly passed
/// [`NavigationHistory`] and a render guard.
pub mod panel;
pub mod resolver;
pub mod search;

use std::sync::Arc;

use crate::error::ExplorerError;
use crate::markup::MarkdownRenderer;
use crate::navigation::NavigationHistory;
use crate::types::SchemaGraph;

use panel::{Panel, PanelContext, render_panel};
use resolver::{SchemaState, resolve_view};
use search::SubstringMatcher;

/// Default cap on matches per search result group.
pub const DEFAULT_SEARCH_LIMIT: usize = 100;

/// Where the schema is in its lifecycle.
#[derive(Debug, Clone, Default)]
pub enum SchemaSlot {
    /// Not loaded yet.
    #[default]
    Pending,
    /// Loading finished without a schema.
    Absent,
    Loaded(Arc<SchemaGraph>),
}

/// The schema and its load errors, as handed to the explorer.
#[derive(Debug, Clone, Default)]
pub struct SchemaSource {
    pub schema: SchemaSlot,
    pub errors: Option<Arc<Vec<String>>>,
}

impl SchemaSource {
    pub fn loaded(schema: SchemaGraph) -> Self {
        Self {
            schema: SchemaSlot::Loaded(Arc::new(schema)),
            errors: None,
        }
    }

    pub fn errored(errors: Vec<String>) -> Self {
        Self {
            schema: SchemaSlot::Absent,
            errors: Some(Arc::new(errors)),
        }
    }

    pub fn state(&self) -> SchemaState<'_> {
        if let Some(errors) = self.errors.as_deref()
            && !errors.is_empty()
        {
            return SchemaState::Errored(errors);
        }
        match &self.schema {
            SchemaSlot::Pending => SchemaState::Loading,
            SchemaSlot::Absent => SchemaState::Unavailable,
            SchemaSlot::Loaded(schema) => SchemaState::Ready(schema),
        }
    }

    pub fn graph(&self) -> Option<&Arc<SchemaGraph>> {
        match &self.schema {
            SchemaSlot::Loaded(schema) => Some(schema),
            SchemaSlot::Pending | SchemaSlot::Absent => None,
        }
    }
}

/// Skips a render when neither the schema reference, the errors
/// reference nor the navigation history changed since the last one.
///
/// Comparison is by pointer identity, never by content.
#[derive(Debug, Default)]
pub struct RenderGuard {
    last: Option<Snapshot>,
}

#[derive(Debug)]
struct Snapshot {
    schema: Option<Arc<SchemaGraph>>,
    pending: bool,
    errors: Option<Arc<Vec<String>>>,
    revision: u64,
}

fn same<T>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

impl RenderGuard {
    /// Record the inputs and report whether they differ from the last call.
    pub fn changed(&mut self, source: &SchemaSource, history: &NavigationHistory) -> bool {
        let snapshot = Snapshot {
            schema: source.graph().cloned(),
            pending: matches!(source.schema, SchemaSlot::Pending),
            errors: source.errors.clone(),
            revision: history.revision(),
        };
        let changed = match &self.last {
            Some(last) => {
                !same(&last.schema, &snapshot.schema)
                    || last.pending != snapshot.pending
                    || !same(&last.errors, &snapshot.errors)
                    || last.revision != snapshot.revision
            }
            None => true,
        };
        self.last = Some(snapshot);
        changed
    }

    /// Forget the last render so the next one always happens.
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

/// A mounted documentation explorer.
#[derive(Debug)]
pub struct DocExplorer {
    navigation: NavigationHistory,
    guard: RenderGuard,
    search_limit: usize,
    trailing: Option<String>,
}

impl DocExplorer {
    /// Mount an explorer over a navigation history.
    ///
    /// Fails with [`ExplorerError::MissingNavigation`] when no history is
    /// supplied; this is a configuration error, not something to recover
    /// from.
    pub fn mount(navigation: Option<NavigationHistory>) -> Result<Self, ExplorerError> {
        let navigation = navigation.ok_or(ExplorerError::MissingNavigation)?;
        Ok(Self::new(navigation))
    }

    pub fn new(navigation: NavigationHistory) -> Self {
        Self {
            navigation,
            guard: RenderGuard::default(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            trailing: None,
        }
    }

    pub fn set_search_limit(&mut self, limit: usize) {
        self.search_limit = limit;
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    /// Markup placed at the end of the title bar.
    pub fn with_trailing(mut self, markup: impl Into<String>) -> Self {
        self.trailing = Some(markup.into());
        self
    }

    pub fn navigation(&self) -> &NavigationHistory {
        &self.navigation
    }

    pub fn navigation_mut(&mut self) -> &mut NavigationHistory {
        &mut self.navigation
    }

    /// Render unless nothing changed since the previous render.
    pub fn render(&mut self, source: &SchemaSource) -> Option<Panel> {
        if !self.guard.changed(source, &self.navigation) {
            tracing::trace!("explorer inputs unchanged, skipping render");
            return None;
        }
        Some(self.render_now(source))
    }

    /// Render unconditionally.
    pub fn render_now(&self, source: &SchemaSource) -> Panel {
        let state = source.state();
        let view = resolve_view(&state, &self.navigation);
        tracing::debug!(mode = view.mode.kind(), depth = self.navigation.depth(), "explorer render");
        render_panel(
            &view,
            &PanelContext {
                schema: source.graph().map(Arc::as_ref),
                text: &MarkdownRenderer,
                matcher: &SubstringMatcher,
                search_limit: self.search_limit,
                trailing: self.trailing.as_deref(),
            },
        )
    }
}

/// Completion documentation overlay.
///
/// This sub-module groups the overlay logic:
/// - **surface**: The node surface trait hosts implement
/// - **memory**: An in-memory surface for headless hosts
/// - **compose**: Building info and deprecation content for a suggestion
///
/// An [`OverlayController`] follows one autocomplete invocation.  It
/// creates its two overlay nodes on the first selection, rewrites them on
/// every later selection, and tears itself down once the host removes the
/// suggestion list.
pub mod compose;
pub mod memory;
pub mod surface;

use crate::markup::TextRenderer;

use compose::{DEFAULT_FALLBACK_DESCRIPTION, OverlayStyle, Suggestion};
use surface::{ChildListMutation, NodeId, Surface, WatchHandle};

pub const INFO_CLASS: &str = "hint-information";
pub const DEPRECATION_CLASS: &str = "hint-deprecation";

/// The live part of an overlay: its nodes and the removal watch.
#[derive(Debug)]
pub struct OverlaySession {
    /// The host's suggestion list.
    container: NodeId,
    info: NodeId,
    deprecation: NodeId,
    /// Watches the container's parent for the container's removal.
    watch: WatchHandle,
}

impl OverlaySession {
    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn info(&self) -> NodeId {
        self.info
    }

    pub fn deprecation(&self) -> NodeId {
        self.deprecation
    }
}

#[derive(Debug, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Active(OverlaySession),
    /// Terminal for the invocation.
    Destroyed,
}

type InfoCallback = Box<dyn FnMut(NodeId)>;

pub struct OverlayController<R: TextRenderer> {
    renderer: R,
    style: OverlayStyle,
    fallback: String,
    on_info: Option<InfoCallback>,
    state: SessionState,
}

impl<R: TextRenderer> std::fmt::Debug for OverlayController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayController")
            .field("style", &self.style)
            .field("fallback", &self.fallback)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<R: TextRenderer> OverlayController<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            style: OverlayStyle::Html,
            fallback: DEFAULT_FALLBACK_DESCRIPTION.to_string(),
            on_info: None,
            state: SessionState::Uninitialized,
        }
    }

    pub fn with_style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Called with the info node after every update.
    pub fn with_info_callback(mut self, callback: impl FnMut(NodeId) + 'static) -> Self {
        self.on_info = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session(&self) -> Option<&OverlaySession> {
        match &self.state {
            SessionState::Active(session) => Some(session),
            SessionState::Uninitialized | SessionState::Destroyed => None,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        matches!(self.state, SessionState::Destroyed)
    }

    /// Start a new autocomplete invocation.
    ///
    /// Always leaves the controller `Uninitialized`.  A session that is
    /// still live (its removal was never observed) is torn down first.
    pub fn begin_invocation<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if matches!(self.state, SessionState::Active(_)) {
            tracing::debug!("overlay invocation started while a session is live");
        }
        self.close(surface, SessionState::Uninitialized);
    }

    /// Release the live session, if any, and move to `next`.
    fn close<S: Surface + ?Sized>(&mut self, surface: &mut S, next: SessionState) {
        if let SessionState::Active(session) = std::mem::replace(&mut self.state, next) {
            surface.unwatch(session.watch);
            surface.remove_node(session.info);
            surface.remove_node(session.deprecation);
            tracing::debug!(container = %session.container, "overlay session closed");
        }
    }

    /// Handle the host's selection-changed event.
    ///
    /// `list` is the host's suggestion list container.  Selections after
    /// teardown are ignored.  A live session tracking a different
    /// container is replaced.
    pub fn on_select<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        suggestion: &Suggestion,
        list: NodeId,
    ) {
        if let SessionState::Active(ref session) = self.state
            && session.container != list
        {
            tracing::debug!(old = %session.container, new = %list, "suggestion list replaced");
            self.close(surface, SessionState::Uninitialized);
        }

        if matches!(self.state, SessionState::Uninitialized) {
            let Some(parent) = surface.parent(list) else {
                tracing::warn!(container = %list, "suggestion list is detached, overlay not created");
                return;
            };
            let info = surface.create_node(INFO_CLASS);
            let deprecation = surface.create_node(DEPRECATION_CLASS);
            surface.append_child(parent, info);
            surface.append_child(parent, deprecation);
            let watch = surface.watch_child_removal(parent);
            tracing::debug!(container = %list, info = %info, "overlay session started");
            self.state = SessionState::Active(OverlaySession {
                container: list,
                info,
                deprecation,
                watch,
            });
        }

        let SessionState::Active(ref session) = self.state else {
            tracing::debug!(label = %suggestion.label, "select after overlay teardown ignored");
            return;
        };
        let (info, deprecation) = (session.info, session.deprecation);

        let content = compose::compose(suggestion, &self.renderer, self.style, &self.fallback);
        surface.set_markup(info, &content.info);
        match content.deprecation {
            Some(markup) => {
                surface.set_markup(deprecation, &markup);
                surface.set_visible(deprecation, true);
            }
            None => surface.set_visible(deprecation, false),
        }

        if let Some(callback) = self.on_info.as_mut() {
            callback(info);
        }
    }

    /// Handle a child-list mutation reported by the removal watch.
    ///
    /// Tears the session down only when the removed nodes include the
    /// tracked container under its watched parent.  Returns whether this
    /// call tore the session down.
    pub fn on_mutation<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        mutation: &ChildListMutation,
    ) -> bool {
        let is_ours = match &self.state {
            SessionState::Active(session) => {
                mutation.target == session.watch.target()
                    && mutation.removed.contains(&session.container)
            }
            SessionState::Uninitialized | SessionState::Destroyed => false,
        };
        if !is_ours {
            return false;
        }

        self.close(surface, SessionState::Destroyed);
        true
    }
}

/// The node surface the completion overlay draws on.
///
/// Hosts (an editor UI, a headless test harness) implement [`Surface`];
/// the overlay controller only ever talks to nodes through it.
use std::fmt;

/// Identifies a node on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A registered child-removal watch.
///
/// Returned when the watch is registered and handed back exactly once to
/// [`Surface::unwatch`]; it is deliberately neither `Clone` nor `Copy`.
#[derive(Debug, PartialEq, Eq)]
pub struct WatchHandle {
    id: u64,
    target: NodeId,
}

impl WatchHandle {
    pub fn new(id: u64, target: NodeId) -> Self {
        Self { id, target }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// The node whose children are watched.
    pub fn target(&self) -> NodeId {
        self.target
    }
}

/// A change to a node's child list, as delivered to a watch.
///
/// `removed` may list nodes unrelated to whoever is watching; observers
/// must check for the node they care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildListMutation {
    pub target: NodeId,
    pub removed: Vec<NodeId>,
}

pub trait Surface {
    /// Create a detached node with the given class name.
    fn create_node(&mut self, class: &str) -> NodeId;

    /// The parent of `node`, or `None` when detached or unknown.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Detach `node` from its parent and release it.  The id is dead
    /// afterwards.  Removing an unknown node is a no-op, and watches are
    /// not notified of removals made this way.
    fn remove_node(&mut self, node: NodeId);

    /// Replace the node's content with markup.
    fn set_markup(&mut self, node: NodeId, markup: &str);

    /// Show or hide a node without removing it.
    fn set_visible(&mut self, node: NodeId, visible: bool);

    /// Start watching `target` for removed children.
    fn watch_child_removal(&mut self, target: NodeId) -> WatchHandle;

    fn unwatch(&mut self, handle: WatchHandle);
}

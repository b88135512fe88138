/// An in-memory [`Surface`] for headless hosts.
///
/// Keeps a flat node table with parent links.  Removing a child returns
/// the [`ChildListMutation`] that active watches on the parent observe,
/// which the host then forwards to its overlay controllers.
use std::collections::{BTreeMap, HashMap};

use super::surface::{ChildListMutation, NodeId, Surface, WatchHandle};

#[derive(Debug, Clone, Default)]
pub struct MemoryNode {
    pub class: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub markup: String,
    pub visible: bool,
}

#[derive(Debug, Default)]
pub struct MemorySurface {
    nodes: BTreeMap<NodeId, MemoryNode>,
    watches: HashMap<u64, NodeId>,
    next_node: u32,
    next_watch: u64,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&MemoryNode> {
        self.nodes.get(&id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of registered, not yet released watches.
    pub fn active_watches(&self) -> usize {
        self.watches.len()
    }

    /// Whether any active watch targets `node`.
    pub fn is_watched(&self, node: NodeId) -> bool {
        self.watches.values().any(|&t| t == node)
    }

    /// Detach `child` from `parent`.
    ///
    /// Returns the mutation record when the parent is being watched, or
    /// `None` when nobody is listening (or `child` was not a child).
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Option<ChildListMutation> {
        let removed = {
            let node = self.nodes.get_mut(&parent)?;
            let before = node.children.len();
            node.children.retain(|&c| c != child);
            node.children.len() != before
        };
        if !removed {
            return None;
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = None;
        }
        self.is_watched(parent).then(|| ChildListMutation {
            target: parent,
            removed: vec![child],
        })
    }
}

impl Surface for MemorySurface {
    fn create_node(&mut self, class: &str) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.nodes.insert(
            id,
            MemoryNode {
                class: class.to_string(),
                visible: true,
                ..MemoryNode::default()
            },
        );
        id
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node)?.parent
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.nodes.contains_key(&parent) {
            return;
        }
        if let Some(old_parent) = self.parent(child)
            && let Some(node) = self.nodes.get_mut(&old_parent)
        {
            node.children.retain(|&c| c != child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    fn remove_node(&mut self, node: NodeId) {
        let Some(removed) = self.nodes.remove(&node) else {
            return;
        };
        if let Some(p) = removed.parent.and_then(|p| self.nodes.get_mut(&p)) {
            p.children.retain(|&c| c != node);
        }
        for child in removed.children {
            if let Some(c) = self.nodes.get_mut(&child) {
                c.parent = None;
            }
        }
    }

    fn set_markup(&mut self, node: NodeId, markup: &str) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.markup = markup.to_string();
        }
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.visible = visible;
        }
    }

    fn watch_child_removal(&mut self, target: NodeId) -> WatchHandle {
        let id = self.next_watch;
        self.next_watch += 1;
        self.watches.insert(id, target);
        WatchHandle::new(id, target)
    }

    fn unwatch(&mut self, handle: WatchHandle) {
        self.watches.remove(&handle.id());
    }
}

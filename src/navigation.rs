/// Navigation history for the documentation explorer.
///
/// A stack of visited schema nodes.  The current entry is always the last
/// one and the stack never drops below its root entry, so `depth()` is
/// at least 1.  Entries are immutable once pushed: `set_search` replaces
/// the current entry with an updated copy instead of editing it.
use crate::types::Definition;

/// The name of the root entry.
pub const ROOT_NAME: &str = "Docs";

/// One step in the browsing history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntry {
    /// Short name, also used as the back-button label of the entry above.
    pub name: String,
    /// Display title; `name` is shown when absent.
    pub title: Option<String>,
    /// The visited node, or `None` for the schema root.
    pub def: Option<Definition>,
    /// Active search term for this entry.
    pub search: Option<String>,
}

impl NavigationEntry {
    pub fn root() -> Self {
        Self {
            name: ROOT_NAME.to_string(),
            title: Some("Documentation Explorer".to_string()),
            def: None,
            search: None,
        }
    }

    /// An entry for a schema node, named after it.
    pub fn for_definition(def: Definition) -> Self {
        Self {
            name: def.name().to_string(),
            title: None,
            def: Some(def),
            search: None,
        }
    }

    /// The active search term, if any.  An empty term counts as no search.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationHistory {
    entries: Vec<NavigationEntry>,
    revision: u64,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self {
            entries: vec![NavigationEntry::root()],
            revision: 0,
        }
    }

    pub fn current(&self) -> &NavigationEntry {
        // The root entry is never popped.
        &self.entries[self.entries.len() - 1]
    }

    /// The entry immediately below the current one.
    pub fn previous(&self) -> Option<&NavigationEntry> {
        let len = self.entries.len();
        len.checked_sub(2).map(|i| &self.entries[i])
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    /// Bumped on every mutation; lets render guards notice history changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn push(&mut self, entry: NavigationEntry) {
        tracing::debug!(name = %entry.name, depth = self.depth() + 1, "navigation push");
        self.entries.push(entry);
        self.revision += 1;
    }

    /// Pop the current entry.  Returns `None` at the root, which stays.
    pub fn pop(&mut self) -> Option<NavigationEntry> {
        if self.entries.len() <= 1 {
            return None;
        }
        let popped = self.entries.pop();
        self.revision += 1;
        popped
    }

    /// Set the search term on the current entry.  An empty term clears it.
    pub fn set_search(&mut self, term: &str) {
        let mut entry = self.current().clone();
        entry.search = (!term.is_empty()).then(|| term.to_string());
        let last = self.entries.len() - 1;
        self.entries[last] = entry;
        self.revision += 1;
    }

    /// Drop everything above the root entry and clear its search.
    pub fn reset(&mut self) {
        self.entries.truncate(1);
        self.entries[0] = NavigationEntry::root();
        self.revision += 1;
    }
}

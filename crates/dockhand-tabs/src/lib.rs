// Tab strip model
// Implements dockhand_core::TabStrip: ordered tab handles, the active tab,
// out-of-date markers and the strip's focused flag.


use dockhand_core::{Tab, TabChanged, TabId, TabStrip};

/// Ordered tab handles of one panel. Order is visual order and also the
/// order keyboard cycling walks through.
#[derive(Debug, Default)]
pub struct TabBar {
    tabs: Vec<Tab>,
    active: Option<TabId>,
    focused: bool,
}

impl TabBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Move the active marker, reporting the transition.
    fn activate(&mut self, new: Option<TabId>) -> Option<TabChanged> {
        if self.active == new {
            return None;
        }
        let old = std::mem::replace(&mut self.active, new);
        Some(TabChanged { old, new })
    }
}

impl TabStrip for TabBar {
    fn add_tab(&mut self, label: &str) -> TabId {
        let tab = Tab::new(label);
        let id = tab.id;
        self.tabs.push(tab);
        id
    }

    fn insert_tab(&mut self, tab: Tab, before: Option<TabId>) -> usize {
        // Re-inserting a tab we already hold is a move within the strip.
        if let Some(existing) = self.index_of(tab.id) {
            self.tabs.remove(existing);
        }

        let index = before
            .and_then(|b| self.index_of(b))
            .unwrap_or(self.tabs.len());
        self.tabs.insert(index, tab);
        index
    }

    fn remove_tab(&mut self, id: TabId) -> Option<(Tab, Option<TabChanged>)> {
        let index = self.index_of(id)?;
        let tab = self.tabs.remove(index);

        let changed = if self.active == Some(id) {
            // Hand the selection to whichever tab slid into the hole.
            let next = if self.tabs.is_empty() {
                None
            } else {
                Some(self.tabs[index.min(self.tabs.len() - 1)].id)
            };
            self.activate(next)
        } else {
            None
        };

        Some((tab, changed))
    }

    fn select(&mut self, index: usize) -> Option<TabChanged> {
        let id = self.tabs.get(index)?.id;
        self.activate(Some(id))
    }

    fn active_tab(&self) -> Option<TabId> {
        self.active
    }

    fn active_index(&self) -> Option<usize> {
        self.active.and_then(|id| self.index_of(id))
    }

    fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    fn tab_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    fn out_of_date(&mut self, index: usize) {
        match self.tabs.get_mut(index) {
            Some(tab) => tab.out_of_date = true,
            None => log::trace!("out_of_date: no tab at index {}", index),
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn len(&self) -> usize {
        self.tabs.len()
    }
}

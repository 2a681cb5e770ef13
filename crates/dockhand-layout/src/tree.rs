// Dock tree: binary split tree of panels.
// Implements dockhand_core::DockContainer so emptied panels can prune
// themselves, and drives layout passes over every panel it hosts.

use std::collections::HashMap;

use dockhand_core::{DockContainer, Dockable, Frame, PanelId, Resizable, SplitDirection, TabStrip};

use crate::panel::DockPanel;

#[derive(Debug, Clone, PartialEq)]
pub enum DockNode {
    Panel(PanelId),
    Split {
        direction: SplitDirection,
        ratio: f32,
        first: Box<DockNode>,
        second: Box<DockNode>,
    },
}

impl DockNode {
    pub fn contains(&self, panel: PanelId) -> bool {
        match self {
            DockNode::Panel(id) => *id == panel,
            DockNode::Split { first, second, .. } => {
                first.contains(panel) || second.contains(panel)
            }
        }
    }

    fn panel_ids(&self, out: &mut Vec<PanelId>) {
        match self {
            DockNode::Panel(id) => out.push(*id),
            DockNode::Split { first, second, .. } => {
                first.panel_ids(out);
                second.panel_ids(out);
            }
        }
    }

    /// Collect every panel with the direction of the split that hosts it.
    /// `outer` is the direction to report for a panel sitting at the root.
    fn placements(&self, outer: SplitDirection, out: &mut Vec<(PanelId, SplitDirection)>) {
        match self {
            DockNode::Panel(id) => out.push((*id, outer)),
            DockNode::Split {
                direction,
                first,
                second,
                ..
            } => {
                first.placements(*direction, out);
                second.placements(*direction, out);
            }
        }
    }

    /// Leaves reachable through consecutive splits in `dir`.
    fn count_chain_leaves(&self, dir: SplitDirection) -> usize {
        match self {
            DockNode::Panel(_) => 1,
            DockNode::Split {
                direction,
                first,
                second,
                ..
            } if *direction == dir => {
                first.count_chain_leaves(dir) + second.count_chain_leaves(dir)
            }
            _ => 1,
        }
    }

    fn equalize(&mut self) {
        if let DockNode::Split {
            direction,
            ratio,
            first,
            second,
        } = self
        {
            let n_first = first.count_chain_leaves(*direction);
            let n_second = second.count_chain_leaves(*direction);
            *ratio = n_first as f32 / (n_first + n_second) as f32;
        }
    }

    /// Replace the leaf `target` with a split holding `target` and then
    /// `new_panel`. Same-direction chains are re-equalized on the way up.
    fn split_panel(&mut self, target: PanelId, new_panel: PanelId, direction: SplitDirection) -> bool {
        match self {
            DockNode::Panel(id) if *id == target => {
                *self = DockNode::Split {
                    direction,
                    ratio: 0.5,
                    first: Box::new(DockNode::Panel(target)),
                    second: Box::new(DockNode::Panel(new_panel)),
                };
                true
            }
            DockNode::Panel(_) => false,
            DockNode::Split {
                direction: dir,
                first,
                second,
                ..
            } => {
                let same = *dir == direction;
                let found = first.split_panel(target, new_panel, direction)
                    || second.split_panel(target, new_panel, direction);
                if found && same {
                    self.equalize();
                }
                found
            }
        }
    }

    /// Remove a panel. Returns:
    /// - Some(Some(node)) if the panel was found and `node` replaces this subtree
    /// - Some(None) if this node itself was the panel
    /// - None if the panel is not in this subtree
    ///
    /// When removal changes a side's same-direction leaf count, the split is
    /// re-equalized so rows/columns stay balanced.
    fn remove_panel(&mut self, target: PanelId) -> Option<Option<DockNode>> {
        match self {
            DockNode::Panel(id) if *id == target => Some(None),
            DockNode::Panel(_) => None,
            DockNode::Split {
                direction,
                ratio,
                first,
                second,
            } => {
                let dir = *direction;

                let first_old = first.count_chain_leaves(dir);
                if let Some(replacement) = first.remove_panel(target) {
                    return match replacement {
                        Some(node) => {
                            **first = node;
                            if first.count_chain_leaves(dir) != first_old {
                                let n1 = first.count_chain_leaves(dir);
                                let n2 = second.count_chain_leaves(dir);
                                *ratio = n1 as f32 / (n1 + n2) as f32;
                            }
                            Some(Some(self.clone()))
                        }
                        // Sibling takes the split's place.
                        None => Some(Some(second.as_ref().clone())),
                    };
                }

                let second_old = second.count_chain_leaves(dir);
                if let Some(replacement) = second.remove_panel(target) {
                    return match replacement {
                        Some(node) => {
                            **second = node;
                            if second.count_chain_leaves(dir) != second_old {
                                let n1 = first.count_chain_leaves(dir);
                                let n2 = second.count_chain_leaves(dir);
                                *ratio = n1 as f32 / (n1 + n2) as f32;
                            }
                            Some(Some(self.clone()))
                        }
                        None => Some(Some(first.as_ref().clone())),
                    };
                }
                None
            }
        }
    }
}

// ──────────────────────────────────────────────
// DockTree
// ──────────────────────────────────────────────

pub struct DockTree {
    root: Option<DockNode>,
    /// Direction reported for a panel that sits alone at the root.
    root_direction: SplitDirection,
    dockable: bool,
}

impl DockTree {
    pub fn new() -> Self {
        Self {
            root: None,
            root_direction: SplitDirection::Horizontal,
            dockable: true,
        }
    }

    pub fn with_panel(panel: PanelId) -> Self {
        Self {
            root: Some(DockNode::Panel(panel)),
            ..Self::new()
        }
    }

    pub fn from_root(root: DockNode) -> Self {
        Self {
            root: Some(root),
            ..Self::new()
        }
    }

    /// A tree that refuses to host docked children: panels never prune
    /// themselves out of it.
    pub fn locked(mut self) -> Self {
        self.dockable = false;
        self
    }

    pub fn root(&self) -> Option<&DockNode> {
        self.root.as_ref()
    }

    pub fn panel_ids(&self) -> Vec<PanelId> {
        let mut ids = Vec::new();
        if let Some(ref root) = self.root {
            root.panel_ids(&mut ids);
        }
        ids
    }

    pub fn contains(&self, panel: PanelId) -> bool {
        self.root.as_ref().is_some_and(|r| r.contains(panel))
    }

    /// Direction of the split hosting `panel`.
    pub fn direction_of(&self, panel: PanelId) -> Option<SplitDirection> {
        self.placements()
            .into_iter()
            .find(|(id, _)| *id == panel)
            .map(|(_, dir)| dir)
    }

    fn placements(&self) -> Vec<(PanelId, SplitDirection)> {
        let mut out = Vec::new();
        if let Some(ref root) = self.root {
            root.placements(self.root_direction, &mut out);
        }
        out
    }

    /// Split `target`, placing `new_panel` after it.
    pub fn split(&mut self, target: PanelId, new_panel: PanelId, direction: SplitDirection) -> bool {
        match self.root {
            Some(ref mut root) => root.split_panel(target, new_panel, direction),
            None => {
                self.root = Some(DockNode::Panel(new_panel));
                true
            }
        }
    }

    pub fn remove(&mut self, panel: PanelId) -> bool {
        let Some(ref mut root) = self.root else {
            return false;
        };
        match root.remove_panel(panel) {
            Some(Some(replacement)) => {
                *root = replacement;
                true
            }
            Some(None) => {
                self.root = None;
                true
            }
            None => false,
        }
    }

    /// Layout pass: every hosted panel finalizes size against the direction
    /// of its parent split, then min/max, then style.
    pub fn reflow<F: Frame, S: TabStrip>(
        &self,
        panels: &mut HashMap<PanelId, DockPanel<F, S>>,
        reset: bool,
    ) {
        for (id, direction) in self.placements() {
            if let Some(panel) = panels.get_mut(&id) {
                panel.finalize_size_recursively(reset, direction);
                panel.finalize_min_max_recursively();
                panel.finalize_style_recursively();
                panel.reflow_recursively();
            }
        }
    }

    /// Propagate a size change to every hosted panel.
    pub fn notify_resize<F: Frame, S: TabStrip>(&self, panels: &mut HashMap<PanelId, DockPanel<F, S>>) {
        for id in self.panel_ids() {
            if let Some(panel) = panels.get_mut(&id) {
                panel.notify_resize();
            }
        }
    }
}

impl Default for DockTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DockContainer for DockTree {
    fn is_dockable(&self) -> bool {
        self.dockable
    }

    fn is_row(&self, panel: PanelId) -> bool {
        self.direction_of(panel).is_some_and(SplitDirection::is_row)
    }

    fn remove_dock(&mut self, panel: PanelId) -> bool {
        self.remove(panel)
    }
}

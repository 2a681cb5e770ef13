// Workspace: a dock tree, the panels it hosts and the in-process
// collaborators they report to. Replays session commands and renders the
// resulting layout as text.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::rc::Rc;
use std::time::Duration;

use dockhand_core::{
    DockContainer, Dockable, EventLog, FrameId, InputEvent, LayoutChangeCounter, Modifiers,
    MouseButton, PanelId, TabId, TimerQueue,
};
use dockhand_input::Hotkey;
use dockhand_layout::{ContentFrame, DockPanel, DockTree, PanelContext, PanelSettings};

use crate::session::{parse_direction, Command, Session};

pub type Panel = DockPanel<ContentFrame>;

pub struct Workspace {
    pub tree: DockTree,
    pub panels: HashMap<PanelId, Panel>,
    ctx: PanelContext,
    events: Rc<EventLog>,
    layout: Rc<LayoutChangeCounter>,
    timer: Rc<TimerQueue>,
}

impl Workspace {
    /// Build the dock tree and its panels from a session, then run a full
    /// reset reflow.
    pub fn from_session(session: &Session, settings: &PanelSettings) -> Option<Self> {
        let root = session.layout.to_dock_node()?;
        let tree = DockTree::from_root(root);

        let events = Rc::new(EventLog::new());
        let layout = Rc::new(LayoutChangeCounter::new());
        let timer = Rc::new(TimerQueue::new());
        let ctx = PanelContext::new(events.clone(), layout.clone(), timer.clone())
            .with_settings(settings);

        let mut panels = HashMap::new();
        for entry in &session.panels {
            if !tree.contains(entry.id) {
                log::warn!("panel {} is not in the layout, skipping", entry.id);
                continue;
            }
            let mut panel = DockPanel::with_frames(entry.id, ctx.clone(), entry.frames.clone());
            if let Some(declared) = entry.declared {
                panel.set_declared(declared);
            }
            panels.insert(entry.id, panel);
        }
        for id in tree.panel_ids() {
            panels
                .entry(id)
                .or_insert_with(|| DockPanel::new(id, ctx.clone()));
        }

        tree.reflow(&mut panels, true);
        Some(Self {
            tree,
            panels,
            ctx,
            events,
            layout,
            timer,
        })
    }

    pub fn event_count(&self) -> usize {
        self.events.events().len()
    }

    pub fn layout_changes(&self) -> usize {
        self.layout.count()
    }

    pub fn apply(&mut self, command: &Command) {
        log::debug!("apply {:?}", command);
        match command {
            Command::AddFrame { panel, frame } => {
                if let Some(p) = self.panel_mut(*panel) {
                    p.add_tab(frame.clone());
                }
            }
            Command::Select { panel, index } => {
                if let Some(p) = self.panel_mut(*panel) {
                    p.select_by_index(*index);
                }
            }
            Command::SelectFrame { panel, frame } => {
                if let Some(p) = self.panel_mut(*panel) {
                    p.select_by_frame(*frame);
                }
            }
            Command::Key {
                panel,
                key,
                shift,
                ctrl,
                meta,
                alt,
            } => {
                let Some(key) = Hotkey::key_from_name(key) else {
                    log::warn!("unknown key name: {}", key);
                    return;
                };
                let modifiers = Modifiers {
                    shift: *shift,
                    ctrl: *ctrl,
                    alt: *alt,
                    meta: *meta,
                };
                if let Some(p) = self.panel_mut(*panel) {
                    p.handle_input(InputEvent::KeyPress { key, modifiers });
                }
            }
            Command::Click { panel } => {
                if let Some(p) = self.panel_mut(*panel) {
                    p.handle_input(InputEvent::MouseDown {
                        button: MouseButton::Left,
                    });
                }
            }
            Command::FocusIn { panel } => {
                if let Some(p) = self.panel_mut(*panel) {
                    p.handle_input(InputEvent::FocusIn);
                }
            }
            Command::FocusOut { panel } => {
                if let Some(p) = self.panel_mut(*panel) {
                    p.handle_input(InputEvent::FocusOut);
                }
            }
            Command::Wait { ms } => self.wait(Duration::from_millis(*ms)),
            Command::MoveFrame {
                frame,
                from,
                to,
                before,
            } => self.move_frame(*frame, *from, *to, *before),
            Command::CloseFrame { panel, frame } => self.close_frame(*panel, *frame),
            Command::MarkOutOfDate { panel, frame } => {
                if let Some(p) = self.panel_mut(*panel) {
                    p.mark_out_of_date_by_frame(*frame);
                }
            }
            Command::Split {
                target,
                panel,
                direction,
                frames,
            } => self.split(*target, *panel, direction, frames),
            Command::Reflow { reset } => self.tree.reflow(&mut self.panels, *reset),
            Command::Resize => self.tree.notify_resize(&mut self.panels),
        }
    }

    fn panel_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        let panel = self.panels.get_mut(&id);
        if panel.is_none() {
            log::warn!("no panel {}", id);
        }
        panel
    }

    /// Advance the clock and hand each expired token to the panel that owns it.
    fn wait(&mut self, by: Duration) {
        for token in self.timer.advance(by) {
            for panel in self.panels.values_mut() {
                if panel.on_timer(token) {
                    break;
                }
            }
        }
    }

    fn move_frame(&mut self, frame: FrameId, from: PanelId, to: PanelId, before: Option<FrameId>) {
        if !self.panels.contains_key(&to) {
            log::warn!("no destination panel {}", to);
            return;
        }
        let Some(source) = self.panels.get_mut(&from) else {
            log::warn!("no source panel {}", from);
            return;
        };
        let Some(tab) = tab_for_frame(source, frame) else {
            log::warn!("frame {} is not in panel {}", frame, from);
            return;
        };

        if from == to {
            let before = before.and_then(|f| tab_for_frame(source, f));
            source.reorder_tab(tab, before);
            return;
        }

        let Some(detached) = source.close_tab_no_collapse(tab) else {
            return;
        };
        if source.collapse(&mut self.tree) {
            self.panels.remove(&from);
        }

        if let Some(dest) = self.panels.get_mut(&to) {
            let before = before.and_then(|f| tab_for_frame(dest, f));
            dest.insert_tab(detached.tab, detached.frame, before);
            dest.select_by_frame(frame);
        }
        self.tree.reflow(&mut self.panels, false);
    }

    fn close_frame(&mut self, panel: PanelId, frame: FrameId) {
        let Some(p) = self.panels.get_mut(&panel) else {
            log::warn!("no panel {}", panel);
            return;
        };
        let Some(tab) = tab_for_frame(p, frame) else {
            return;
        };
        if let Some(closed) = p.close_tab(tab, &mut self.tree) {
            if closed.collapsed {
                self.panels.remove(&panel);
            }
            self.tree.reflow(&mut self.panels, false);
        }
    }

    fn split(&mut self, target: PanelId, panel: PanelId, direction: &str, frames: &[ContentFrame]) {
        let Some(direction) = parse_direction(direction) else {
            log::warn!("unknown split direction: {}", direction);
            return;
        };
        if self.tree.contains(panel) {
            log::warn!("panel {} already docked", panel);
            return;
        }
        if self.tree.split(target, panel, direction) {
            let new_panel = DockPanel::with_frames(panel, self.ctx.clone(), frames.to_vec());
            self.panels.insert(panel, new_panel);
            self.tree.reflow(&mut self.panels, false);
        }
    }

    // ──────────────────────────────────────────────
    // Rendering
    // ──────────────────────────────────────────────

    pub fn render(&self) -> String {
        let mut out = String::new();
        let ids = self.tree.panel_ids();
        let _ = writeln!(
            out,
            "{} panel(s), {} layout change(s), {} event(s)",
            ids.len(),
            self.layout_changes(),
            self.event_count()
        );

        for id in ids {
            let Some(panel) = self.panels.get(&id) else {
                continue;
            };
            let (width, height) = panel.cur_size();
            let style = panel.style();
            let _ = writeln!(
                out,
                "panel {} [{}] {} x {} (min {} x {}, max {} x {}){}",
                id,
                if self.tree.is_row(id) { "row" } else { "column" },
                width,
                height,
                style.min_width,
                style.min_height,
                style.max_width,
                style.max_height,
                if panel.focused() { " focused" } else { "" }
            );
            for (index, (tab, frame)) in panel.tabs().tabs().iter().zip(panel.frames()).enumerate() {
                let marker = if panel.active_index() == Some(index) { '*' } else { ' ' };
                let _ = writeln!(
                    out,
                    "  {} {} {}{}{}",
                    marker,
                    index,
                    tab.label,
                    if frame.visible { "" } else { " (hidden)" },
                    if tab.out_of_date { " (out of date)" } else { "" }
                );
            }
        }
        out
    }
}

fn tab_for_frame(panel: &Panel, frame: FrameId) -> Option<TabId> {
    let index = panel.frames().position(|f| f.id == frame)?;
    panel.tab_at(index)
}

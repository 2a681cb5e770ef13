// DockPanel: a dock-tree leaf hosting frames behind a tab strip.
// Owns tab/frame alignment, constraint recomputation, focus debouncing,
// keyboard tab cycling and the collapse protocol.

use std::rc::Rc;
use std::time::Duration;

use dockhand_core::{
    DockContainer, Dockable, EventSink, EventTarget, Frame, FrameId, InputEvent, LayoutPersistence,
    MouseButton, PanelEvent, PanelId, Resizable, SizeValue, SplitDirection, Tab, TabChanged, TabId,
    TabStrip, Timer, TimerToken,
};
use dockhand_input::{KeybindingMap, PanelHotkey};
use dockhand_tabs::TabBar;

use crate::focus::FocusTracker;
use crate::resolve::{resolve_min_max, resolve_size, Declared, MinMax};
use crate::settings::PanelSettings;

// ──────────────────────────────────────────────
// Collaborators
// ──────────────────────────────────────────────

/// Services injected into every panel.
#[derive(Clone)]
pub struct PanelContext {
    pub events: Rc<dyn EventSink>,
    pub layout: Rc<dyn LayoutPersistence>,
    pub timer: Rc<dyn Timer>,
    pub keymap: Rc<KeybindingMap>,
    pub defaults: Declared,
    pub blur_debounce: Duration,
}

/// One task-queue tick.
pub const DEFAULT_BLUR_DEBOUNCE: Duration = Duration::from_millis(1);

impl PanelContext {
    pub fn new(
        events: Rc<dyn EventSink>,
        layout: Rc<dyn LayoutPersistence>,
        timer: Rc<dyn Timer>,
    ) -> Self {
        Self {
            events,
            layout,
            timer,
            keymap: Rc::new(KeybindingMap::new()),
            defaults: Declared::default(),
            blur_debounce: DEFAULT_BLUR_DEBOUNCE,
        }
    }

    pub fn with_settings(mut self, settings: &PanelSettings) -> Self {
        self.keymap = Rc::new(KeybindingMap::from_settings(&settings.keybindings));
        self.defaults = settings.defaults;
        self.blur_debounce = Duration::from_millis(settings.blur_debounce_ms);
        self
    }
}

// ──────────────────────────────────────────────
// Attached / detached frames
// ──────────────────────────────────────────────

struct Attached<F> {
    tab: TabId,
    frame: F,
}

/// A tab and its frame after leaving a panel, ready to be re-homed.
#[derive(Debug)]
pub struct Detached<F> {
    pub tab: Tab,
    pub frame: F,
}

/// Result of a collapsing close.
#[derive(Debug)]
pub struct Closed<F> {
    pub detached: Detached<F>,
    /// Whether the panel emptied and its parent removed it.
    pub collapsed: bool,
}

/// Min/max values as committed to the panel's style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedStyle {
    pub min_width: SizeValue,
    pub max_width: SizeValue,
    pub min_height: SizeValue,
    pub max_height: SizeValue,
}

// ──────────────────────────────────────────────
// DockPanel
// ──────────────────────────────────────────────

pub struct DockPanel<F: Frame, S: TabStrip = TabBar> {
    id: PanelId,
    tabs: S,
    /// Index-aligned with `tabs`.
    frames: Vec<Attached<F>>,
    declared: Declared,
    computed_width: SizeValue,
    computed_height: SizeValue,
    min_max: MinMax,
    cur_width: SizeValue,
    cur_height: SizeValue,
    style: AppliedStyle,
    focus: FocusTracker,
    ctx: PanelContext,
}

impl<F: Frame> DockPanel<F, TabBar> {
    pub fn new(id: PanelId, ctx: PanelContext) -> Self {
        Self::with_tab_strip(id, ctx, TabBar::new())
    }

    /// Build a panel around an initial set of frames: every frame gets a tab,
    /// all are hidden, then the first one is selected.
    pub fn with_frames(id: PanelId, ctx: PanelContext, frames: impl IntoIterator<Item = F>) -> Self {
        let mut panel = Self::new(id, ctx);
        for frame in frames {
            panel.attach_fresh(frame);
        }
        panel.refresh_constraints();
        panel.finalize_size_recursively(true, SplitDirection::Horizontal);
        panel.select_by_index(0);
        panel
    }
}

impl<F: Frame, S: TabStrip> DockPanel<F, S> {
    pub fn with_tab_strip(id: PanelId, ctx: PanelContext, tabs: S) -> Self {
        let declared = ctx.defaults;
        let min_max = MinMax::from_declared(&declared);
        Self {
            id,
            tabs,
            frames: Vec::new(),
            declared,
            computed_width: declared.width,
            computed_height: declared.height,
            min_max,
            cur_width: declared.width,
            cur_height: declared.height,
            style: style_of(&min_max),
            focus: FocusTracker::default(),
            ctx,
        }
    }

    // ── Properties ──────────────────────────────

    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn focused(&self) -> bool {
        self.focus.is_focused()
    }

    pub fn has_pending_blur(&self) -> bool {
        self.focus.has_pending_blur()
    }

    pub fn active_tab(&self) -> Option<TabId> {
        self.tabs.active_tab()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.tabs.active_index()
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn tabs(&self) -> &S {
        &self.tabs
    }

    pub fn tab_at(&self, index: usize) -> Option<TabId> {
        self.frames.get(index).map(|a| a.tab)
    }

    pub fn frames(&self) -> impl Iterator<Item = &F> {
        self.frames.iter().map(|a| &a.frame)
    }

    pub fn frame(&self, id: FrameId) -> Option<&F> {
        self.frames().find(|f| f.id() == id)
    }

    pub fn frame_mut(&mut self, id: FrameId) -> Option<&mut F> {
        self.frames
            .iter_mut()
            .map(|a| &mut a.frame)
            .find(|f| f.id() == id)
    }

    pub fn frame_for_tab(&self, tab: TabId) -> Option<&F> {
        self.frames.iter().find(|a| a.tab == tab).map(|a| &a.frame)
    }

    pub fn active_frame(&self) -> Option<&F> {
        self.active_tab().and_then(|tab| self.frame_for_tab(tab))
    }

    pub fn declared(&self) -> &Declared {
        &self.declared
    }

    /// Replace the declared values. Takes effect on the next reflow.
    pub fn set_declared(&mut self, declared: Declared) {
        self.declared = declared;
    }

    pub fn computed_size(&self) -> (SizeValue, SizeValue) {
        (self.computed_width, self.computed_height)
    }

    pub fn min_max(&self) -> MinMax {
        self.min_max
    }

    /// The size actually applied to the panel.
    pub fn cur_size(&self) -> (SizeValue, SizeValue) {
        (self.cur_width, self.cur_height)
    }

    pub fn style(&self) -> AppliedStyle {
        self.style
    }

    // ── Tab & frame management ──────────────────

    /// Append a new tab for `frame`. Returns the new tab's index.
    pub fn add_tab(&mut self, frame: F) -> usize {
        self.attach_fresh(frame);
        self.refresh_constraints();
        self.ensure_selection();
        log::debug!("panel {}: added tab, {} total", self.id, self.tabs.len());
        self.frames.len() - 1
    }

    /// Place `tab` and its frame before `before` (or at the end). A tab that
    /// was detached from another panel keeps its frame's visibility; a fresh
    /// one starts hidden. Returns the tab's index.
    pub fn insert_tab(&mut self, mut tab: Tab, mut frame: F, before: Option<TabId>) -> usize {
        if let Some(stale) = self.frames.iter().position(|a| a.tab == tab.id) {
            log::warn!("panel {}: tab {} inserted twice, replacing", self.id, tab.id);
            self.frames.remove(stale);
        }

        if tab.origin.is_none() {
            frame.set_visible(false);
        }
        tab.draggable = true;
        tab.icon = frame.icon().map(str::to_string);

        let tab_id = tab.id;
        let index = self.tabs.insert_tab(tab, before);
        self.frames.insert(index, Attached { tab: tab_id, frame });

        self.refresh_constraints();
        self.ensure_selection();
        log::debug!("panel {}: inserted tab {} at {}", self.id, tab_id, index);
        index
    }

    /// Move an attached tab before `before` (or to the end) within this panel.
    pub fn reorder_tab(&mut self, tab: TabId, before: Option<TabId>) -> Option<usize> {
        if before == Some(tab) {
            return self.tabs.index_of(tab);
        }
        let from = self.frames.iter().position(|a| a.tab == tab)?;
        let handle = self.tabs.tab(tab)?.clone();
        let attached = self.frames.remove(from);
        let to = self.tabs.insert_tab(handle, before);
        self.frames.insert(to, attached);
        Some(to)
    }

    /// Detach `tab` and its frame without ever collapsing the panel. Used
    /// when the frame is about to be re-homed elsewhere.
    pub fn close_tab_no_collapse(&mut self, tab: TabId) -> Option<Detached<F>> {
        let index = self.frames.iter().position(|a| a.tab == tab)?;
        let (mut handle, changed) = self.tabs.remove_tab(tab)?;
        let attached = self.frames.remove(index);
        handle.origin = Some(self.id);

        // The leaving frame is already detached, so only the newly active
        // frame is touched here.
        if let Some(changed) = changed {
            self.on_tab_changed(changed);
        }

        self.refresh_constraints();
        log::debug!("panel {}: closed tab {}, {} left", self.id, tab, self.tabs.len());
        Some(Detached {
            tab: handle,
            frame: attached.frame,
        })
    }

    /// Close `tab` and, if that emptied the panel, ask `parent` to prune it.
    pub fn close_tab(&mut self, tab: TabId, parent: &mut dyn DockContainer) -> Option<Closed<F>> {
        let detached = self.close_tab_no_collapse(tab)?;
        let collapsed = self.collapse(parent);
        Some(Closed { detached, collapsed })
    }

    pub fn select_by_index(&mut self, index: usize) {
        if let Some(changed) = self.tabs.select(index) {
            self.on_tab_changed(changed);
        }
    }

    pub fn select_by_frame(&mut self, frame: FrameId) {
        if let Some(index) = self.index_of_frame(frame) {
            self.select_by_index(index);
        }
    }

    pub fn mark_out_of_date(&mut self, index: usize) {
        self.tabs.out_of_date(index);
    }

    pub fn mark_out_of_date_by_frame(&mut self, frame: FrameId) {
        if let Some(index) = self.index_of_frame(frame) {
            self.tabs.out_of_date(index);
        }
    }

    fn index_of_frame(&self, frame: FrameId) -> Option<usize> {
        self.frames.iter().position(|a| a.frame.id() == frame)
    }

    fn attach_fresh(&mut self, mut frame: F) {
        let tab_id = self.tabs.add_tab(frame.name());
        if let Some(tab) = self.tabs.tab_mut(tab_id) {
            tab.draggable = true;
            tab.icon = frame.icon().map(str::to_string);
        }
        frame.set_visible(false);
        self.frames.push(Attached { tab: tab_id, frame });
    }

    /// Keep exactly one active tab whenever the panel has any.
    fn ensure_selection(&mut self) {
        if self.tabs.active_tab().is_none() && !self.tabs.is_empty() {
            self.select_by_index(0);
        }
    }

    fn on_tab_changed(&mut self, changed: TabChanged) {
        if let Some(old) = changed.old {
            if let Some(attached) = self.frames.iter_mut().find(|a| a.tab == old) {
                attached.frame.set_visible(false);
                self.ctx
                    .events
                    .fire(EventTarget::Frame(attached.frame.id()), PanelEvent::PanelHide);
            }
        }

        if let Some(new) = changed.new {
            if let Some(attached) = self.frames.iter_mut().find(|a| a.tab == new) {
                attached.frame.set_visible(true);
                self.ctx
                    .events
                    .fire(EventTarget::Frame(attached.frame.id()), PanelEvent::PanelShow);
            }
        }

        self.ctx.layout.layout_changed();
    }

    // ── Layout passes ───────────────────────────

    /// Full reflow requested by the parent: size along `direction`'s cross
    /// axis (or both when `reset`), then min/max, then style.
    pub fn reflow(&mut self, reset: bool, direction: SplitDirection) {
        self.finalize_size_recursively(reset, direction);
        self.refresh_constraints();
    }

    fn refresh_constraints(&mut self) {
        self.apply_frame_min_max();
        self.apply_style();
    }

    fn apply_frame_size(&mut self, reset: bool, direction: SplitDirection) {
        let size = resolve_size(&self.declared, self.frames.iter().map(|a| &a.frame));
        self.computed_width = size.width;
        self.computed_height = size.height;

        if reset {
            self.cur_width = size.width;
            self.cur_height = size.height;
        } else if direction.is_row() {
            // The parent controls the width while it drags a row split.
            self.cur_height = size.height;
        } else {
            self.cur_width = size.width;
        }
        log::trace!(
            "panel {}: size {} x {} (reset={})",
            self.id,
            self.cur_width,
            self.cur_height,
            reset
        );
    }

    fn apply_frame_min_max(&mut self) {
        self.min_max = resolve_min_max(&self.declared, self.frames.iter().map(|a| &a.frame));
    }

    fn apply_style(&mut self) {
        self.style = style_of(&self.min_max);
        log::trace!(
            "panel {}: min {} x {}, max {} x {}",
            self.id,
            self.style.min_width,
            self.style.min_height,
            self.style.max_width,
            self.style.max_height
        );
    }

    // ── Focus ───────────────────────────────────

    /// Give input focus to the active frame.
    pub fn set_focus(&mut self) {
        if let Some(frame) = self.active_frame_mut() {
            frame.focus();
        }
    }

    pub fn set_blur(&mut self) {
        if let Some(frame) = self.active_frame_mut() {
            frame.blur();
        }
    }

    fn active_frame_mut(&mut self) -> Option<&mut F> {
        let tab = self.tabs.active_tab()?;
        self.frames
            .iter_mut()
            .find(|a| a.tab == tab)
            .map(|a| &mut a.frame)
    }

    /// Something inside the panel gained focus.
    pub fn focus_in(&mut self) {
        if self.focus.focus_in() {
            log::trace!("panel {}: focused", self.id);
        }
        self.tabs.set_focused(true);
    }

    /// Something inside the panel lost focus. The panel only turns
    /// unfocused if no focus-enter arrives before the debounce expires.
    pub fn focus_out(&mut self) {
        let token = self.focus.focus_out();
        self.ctx.timer.schedule(self.ctx.blur_debounce, token);
    }

    /// Deliver an expired timer token. Returns true if it completed a blur
    /// of this panel; tokens belonging to other panels are ignored.
    pub fn on_timer(&mut self, token: TimerToken) -> bool {
        if !self.focus.expire(token) {
            return false;
        }
        self.tabs.set_focused(false);
        log::trace!("panel {}: unfocused", self.id);
        true
    }

    // ── Input ───────────────────────────────────

    /// Handle input captured at the panel boundary, ahead of any frame.
    /// Returns true when the event was consumed.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::KeyPress { key, modifiers } => {
                match self.ctx.keymap.match_key(key, modifiers) {
                    Some(hotkey) => self.cycle(hotkey),
                    None => false,
                }
            }
            InputEvent::MouseDown { button } => {
                if button == MouseButton::Left {
                    self.set_focus();
                }
                false
            }
            InputEvent::FocusIn => {
                self.focus_in();
                false
            }
            InputEvent::FocusOut => {
                self.focus_out();
                false
            }
        }
    }

    pub fn select_next(&mut self) -> bool {
        self.cycle(PanelHotkey::NextTab)
    }

    pub fn select_prev(&mut self) -> bool {
        self.cycle(PanelHotkey::PrevTab)
    }

    fn cycle(&mut self, hotkey: PanelHotkey) -> bool {
        let count = self.tabs.len();
        if count == 0 {
            return false;
        }
        let current = self.tabs.active_index().unwrap_or(0);
        let target = match hotkey {
            PanelHotkey::NextTab => (current + 1) % count,
            PanelHotkey::PrevTab => (current + count - 1) % count,
        };
        self.select_by_index(target);
        self.set_focus();
        true
    }
}

fn style_of(min_max: &MinMax) -> AppliedStyle {
    AppliedStyle {
        min_width: min_max.min_width,
        max_width: min_max.max_width,
        min_height: min_max.min_height,
        max_height: min_max.max_height,
    }
}

// ──────────────────────────────────────────────
// Capabilities
// ──────────────────────────────────────────────

impl<F: Frame, S: TabStrip> Resizable for DockPanel<F, S> {
    /// Every frame hears about the resize, active or not, so a hidden frame
    /// has current geometry by the time it is shown.
    fn notify_resize(&mut self) {
        self.ctx
            .events
            .fire(EventTarget::Panel(self.id), PanelEvent::Resize);
        for attached in &self.frames {
            self.ctx
                .events
                .fire(EventTarget::Frame(attached.frame.id()), PanelEvent::Resize);
        }
    }

    fn finalize_size_recursively(&mut self, reset: bool, direction: SplitDirection) {
        self.apply_frame_size(reset, direction);
    }
}

impl<F: Frame, S: TabStrip> Dockable for DockPanel<F, S> {
    fn collapse(&mut self, parent: &mut dyn DockContainer) -> bool {
        if !self.tabs.is_empty() || !parent.is_dockable() {
            return false;
        }
        let removed = parent.remove_dock(self.id);
        if removed {
            log::debug!("panel {}: collapsed", self.id);
        }
        removed
    }

    fn finalize_min_max_recursively(&mut self) {
        self.apply_frame_min_max();
    }

    fn finalize_style_recursively(&mut self) {
        self.apply_style();
    }
}

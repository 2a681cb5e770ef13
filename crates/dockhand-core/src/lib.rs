// Core types and collaborator traits shared by every Dockhand crate.
// The panel engine only talks to the outside world through the traits
// defined here, so hosts (and tests) can inject their own collaborators.

mod collab;
mod size;
mod tests;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub use collab::{EventLog, LayoutChangeCounter, TimerQueue};
pub use size::{parse_px, ParseSizeError, SizeValue};

// ──────────────────────────────────────────────
// Identity
// ──────────────────────────────────────────────

pub type PanelId = u64;
pub type TabId = u64;
pub type FrameId = u64;
pub type TimerToken = u64;

static NEXT_TAB_ID: AtomicU64 = AtomicU64::new(1);

/// Allocate a tab id that is unique for the lifetime of the process.
/// Tabs travel between panels, so ids cannot be scoped to one tab strip.
pub fn next_tab_id() -> TabId {
    NEXT_TAB_ID.fetch_add(1, Ordering::Relaxed)
}

// ──────────────────────────────────────────────
// Axes and constraints
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Width,
    Height,
}

/// The four min/max attributes a frame may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    MinWidth,
    MinHeight,
    MaxWidth,
    MaxHeight,
}

impl Constraint {
    pub fn attribute_name(self) -> &'static str {
        match self {
            Constraint::MinWidth => "min-width",
            Constraint::MinHeight => "min-height",
            Constraint::MaxWidth => "max-width",
            Constraint::MaxHeight => "max-height",
        }
    }
}

/// Split orientation of a container. `Horizontal` lays children out side by
/// side (a "row"), `Vertical` stacks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDirection {
    Horizontal,
    Vertical,
}

impl SplitDirection {
    pub fn is_row(self) -> bool {
        self == SplitDirection::Horizontal
    }

    /// The axis a split in this direction divides.
    pub fn main_axis(self) -> Axis {
        match self {
            SplitDirection::Horizontal => Axis::Width,
            SplitDirection::Vertical => Axis::Height,
        }
    }
}

// ──────────────────────────────────────────────
// Input
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Tab,
    Escape,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    Insert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Input delivered to a panel at its boundary, before any descendant sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPress { key: Key, modifiers: Modifiers },
    MouseDown { button: MouseButton },
    FocusIn,
    FocusOut,
}

// ──────────────────────────────────────────────
// Events
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Panel(PanelId),
    Frame(FrameId),
}

/// Synchronous notifications fired by a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelEvent {
    PanelShow,
    PanelHide,
    Resize,
}

impl PanelEvent {
    pub fn name(self) -> &'static str {
        match self {
            PanelEvent::PanelShow => "panel-show",
            PanelEvent::PanelHide => "panel-hide",
            PanelEvent::Resize => "resize",
        }
    }
}

// ──────────────────────────────────────────────
// Tabs
// ──────────────────────────────────────────────

/// Lightweight handle selecting one content frame for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub id: TabId,
    pub label: String,
    pub icon: Option<String>,
    pub draggable: bool,
    pub out_of_date: bool,
    /// The panel this tab was detached from, if it has lived in one.
    /// `None` for a freshly created tab.
    pub origin: Option<PanelId>,
}

impl Tab {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: next_tab_id(),
            label: label.into(),
            icon: None,
            draggable: false,
            out_of_date: false,
            origin: None,
        }
    }
}

/// Emitted whenever the active tab of a strip changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabChanged {
    pub old: Option<TabId>,
    pub new: Option<TabId>,
}

// ──────────────────────────────────────────────
// Trait: Frame
// ──────────────────────────────────────────────

/// Externally supplied content node hosted by a panel. The panel attaches
/// and detaches frames but never creates or destroys them; it only drives
/// their visibility and reads their size constraints.
pub trait Frame {
    fn id(&self) -> FrameId;
    fn name(&self) -> &str;
    fn icon(&self) -> Option<&str> {
        None
    }
    fn is_visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);
    /// Declared frame size on `axis`.
    fn size(&self, axis: Axis) -> SizeValue;
    /// Raw text of a min/max attribute, if the frame declares one.
    fn attribute(&self, constraint: Constraint) -> Option<&str>;
    fn focus(&mut self);
    fn blur(&mut self);
}

// ──────────────────────────────────────────────
// Trait: TabStrip
// ──────────────────────────────────────────────

/// Ordered collection of tab handles rendered above a panel's frames.
pub trait TabStrip {
    fn add_tab(&mut self, label: &str) -> TabId;
    /// Place `tab` before `before` (or at the end). Returns its new index.
    fn insert_tab(&mut self, tab: Tab, before: Option<TabId>) -> usize;
    /// Remove a tab, returning it together with the selection change the
    /// removal caused, if any.
    fn remove_tab(&mut self, id: TabId) -> Option<(Tab, Option<TabChanged>)>;
    /// Select by index. Returns `None` when nothing changed.
    fn select(&mut self, index: usize) -> Option<TabChanged>;
    fn active_tab(&self) -> Option<TabId>;
    fn active_index(&self) -> Option<usize>;
    fn index_of(&self, id: TabId) -> Option<usize>;
    fn tab(&self, id: TabId) -> Option<&Tab>;
    fn tab_mut(&mut self, id: TabId) -> Option<&mut Tab>;
    fn out_of_date(&mut self, index: usize);
    fn set_focused(&mut self, focused: bool);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ──────────────────────────────────────────────
// Trait: DockContainer
// ──────────────────────────────────────────────

/// The split node that hosts panels. It owns the tree structure; a panel
/// only ever asks it to prune an emptied panel.
pub trait DockContainer {
    /// Whether this node can host docked children at all.
    fn is_dockable(&self) -> bool {
        true
    }
    /// Whether the node hosting `panel` lays its children out in a row.
    fn is_row(&self, panel: PanelId) -> bool;
    fn remove_dock(&mut self, panel: PanelId) -> bool;
}

// ──────────────────────────────────────────────
// Capabilities: Resizable / Dockable
// ──────────────────────────────────────────────

pub trait Resizable {
    /// Called after the node's size changed.
    fn notify_resize(&mut self);
    /// Commit computed size. `reset` recommits both axes; otherwise only the
    /// axis orthogonal to `direction` is refreshed.
    fn finalize_size_recursively(&mut self, reset: bool, direction: SplitDirection);
}

pub trait Dockable {
    fn collapse(&mut self, parent: &mut dyn DockContainer) -> bool;
    fn collapse_recursively(&mut self, parent: &mut dyn DockContainer) -> bool {
        self.collapse(parent)
    }
    fn finalize_min_max_recursively(&mut self);
    fn finalize_style_recursively(&mut self);
    fn reflow_recursively(&mut self) {}
}

// ──────────────────────────────────────────────
// Injected services
// ──────────────────────────────────────────────

/// Generic "dispatch custom event" primitive.
pub trait EventSink {
    fn fire(&self, target: EventTarget, event: PanelEvent);
}

/// Fire-and-forget notification that the persisted layout is stale.
pub trait LayoutPersistence {
    fn layout_changed(&self);
}

/// Deferred callbacks. The scheduler hands `token` back to whoever owns the
/// timer once `delay` has elapsed; owners invalidate tokens themselves.
pub trait Timer {
    fn schedule(&self, delay: Duration, token: TimerToken);
}

// Session description: a dock layout, the panels it hosts and a script of
// commands to replay against them.

use std::path::Path;

use dockhand_core::{FrameId, PanelId, SplitDirection};
use dockhand_layout::{ContentFrame, Declared, DockNode};
use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Serializable session types
// ──────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct Session {
    pub layout: SessionLayout,
    #[serde(default)]
    pub panels: Vec<SessionPanel>,
    #[serde(default)]
    pub commands: Vec<Command>,
}

#[derive(Debug, Serialize, Deserialize)]
pub enum SessionLayout {
    Panel {
        id: PanelId,
    },
    Split {
        direction: String, // "horizontal" or "vertical"
        ratio: f32,
        first: Box<SessionLayout>,
        second: Box<SessionLayout>,
    },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionPanel {
    pub id: PanelId,
    /// Overrides the configured defaults for this panel.
    #[serde(default)]
    pub declared: Option<Declared>,
    #[serde(default)]
    pub frames: Vec<ContentFrame>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    AddFrame {
        panel: PanelId,
        frame: ContentFrame,
    },
    Select {
        panel: PanelId,
        index: usize,
    },
    SelectFrame {
        panel: PanelId,
        frame: FrameId,
    },
    /// A key press delivered at the panel boundary, e.g. `"tab"` with `ctrl`.
    Key {
        panel: PanelId,
        key: String,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        meta: bool,
        #[serde(default)]
        alt: bool,
    },
    Click {
        panel: PanelId,
    },
    FocusIn {
        panel: PanelId,
    },
    FocusOut {
        panel: PanelId,
    },
    /// Advance the clock, delivering expired timers.
    Wait {
        ms: u64,
    },
    MoveFrame {
        frame: FrameId,
        from: PanelId,
        to: PanelId,
        #[serde(default)]
        before: Option<FrameId>,
    },
    CloseFrame {
        panel: PanelId,
        frame: FrameId,
    },
    MarkOutOfDate {
        panel: PanelId,
        frame: FrameId,
    },
    Split {
        target: PanelId,
        panel: PanelId,
        direction: String,
        #[serde(default)]
        frames: Vec<ContentFrame>,
    },
    Reflow {
        #[serde(default)]
        reset: bool,
    },
    Resize,
}

pub fn parse_direction(name: &str) -> Option<SplitDirection> {
    match name {
        "horizontal" | "row" => Some(SplitDirection::Horizontal),
        "vertical" | "column" => Some(SplitDirection::Vertical),
        _ => None,
    }
}

impl SessionLayout {
    /// Convert to a dock tree node. Returns None on an unknown direction.
    pub fn to_dock_node(&self) -> Option<DockNode> {
        match self {
            SessionLayout::Panel { id } => Some(DockNode::Panel(*id)),
            SessionLayout::Split {
                direction,
                ratio,
                first,
                second,
            } => {
                let dir = parse_direction(direction)?;
                Some(DockNode::Split {
                    direction: dir,
                    ratio: ratio.clamp(0.0, 1.0),
                    first: Box::new(first.to_dock_node()?),
                    second: Box::new(second.to_dock_node()?),
                })
            }
        }
    }
}

// ──────────────────────────────────────────────
// Session file I/O
// ──────────────────────────────────────────────

pub fn load_session(path: &Path) -> Option<Session> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) => {
            log::error!("Failed to read session {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&data) {
        Ok(session) => Some(session),
        Err(e) => {
            log::error!("Malformed session {}: {}", path.display(), e);
            None
        }
    }
}

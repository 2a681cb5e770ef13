// Dock panel engine
// A panel is a dock-tree leaf hosting frames behind a tab strip. This crate
// resolves its size constraints, manages tabs, debounces focus and prunes
// emptied panels out of their container.

mod focus;
mod frame;
mod panel;
mod resolve;
mod settings;
mod tree;


pub use frame::ContentFrame;
pub use panel::{
    AppliedStyle, Closed, Detached, DockPanel, PanelContext, DEFAULT_BLUR_DEBOUNCE,
};
pub use resolve::{resolve_min_max, resolve_size, Declared, MinMax, ResolvedSize, DEFAULT_PANEL_SIZE};
pub use settings::{load_settings, load_settings_from, save_settings_to, settings_path, PanelSettings};
pub use tree::{DockNode, DockTree};

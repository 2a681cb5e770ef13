use dockhand_core::{Axis, Constraint, Frame, FrameId, SizeValue};
use serde::{Deserialize, Serialize};

/// Plain data frame: the declared attributes of a content node and the
/// visibility/focus state a panel drives on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentFrame {
    pub id: FrameId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub width: SizeValue,
    #[serde(default)]
    pub height: SizeValue,
    /// Raw attribute text, e.g. `"150"` or `"auto"`.
    #[serde(default)]
    pub min_width: Option<String>,
    #[serde(default)]
    pub min_height: Option<String>,
    #[serde(default)]
    pub max_width: Option<String>,
    #[serde(default)]
    pub max_height: Option<String>,
    #[serde(skip, default = "default_visible")]
    pub visible: bool,
    #[serde(skip)]
    pub focused: bool,
}

fn default_visible() -> bool {
    true
}

impl ContentFrame {
    pub fn new(id: FrameId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            icon: None,
            width: SizeValue::Auto,
            height: SizeValue::Auto,
            min_width: None,
            min_height: None,
            max_width: None,
            max_height: None,
            visible: true,
            focused: false,
        }
    }

    pub fn with_size(mut self, width: SizeValue, height: SizeValue) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_attribute(mut self, constraint: Constraint, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match constraint {
            Constraint::MinWidth => self.min_width = value,
            Constraint::MinHeight => self.min_height = value,
            Constraint::MaxWidth => self.max_width = value,
            Constraint::MaxHeight => self.max_height = value,
        }
        self
    }
}

impl Frame for ContentFrame {
    fn id(&self) -> FrameId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn size(&self, axis: Axis) -> SizeValue {
        match axis {
            Axis::Width => self.width,
            Axis::Height => self.height,
        }
    }

    fn attribute(&self, constraint: Constraint) -> Option<&str> {
        match constraint {
            Constraint::MinWidth => self.min_width.as_deref(),
            Constraint::MinHeight => self.min_height.as_deref(),
            Constraint::MaxWidth => self.max_width.as_deref(),
            Constraint::MaxHeight => self.max_height.as_deref(),
        }
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }
}

//! Widget data held in the menu arena.
//!
//! A widget is either a leaf or a frame; frames own an ordered list of child
//! ids and a scroll viewport. Parent links are arena ids, never pointers.

use std::fmt;

use framepack_macros::WithBuilders;
use glam::Vec2;
use slotmap::new_key_type;

use crate::error::{LayoutError, Result};
use crate::frame::FrameData;
use crate::layout::{HorizontalAlign, Margin, Spacing, VerticalAlign};

new_key_type! {
    /// Arena handle of a widget inside a [`Menu`](crate::Menu)
    pub struct WidgetId;
}

/// User-facing identifier of a widget, unique within a menu
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WidgetName(String);

impl WidgetName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WidgetName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for WidgetName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for WidgetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Defaults applied by [`WidgetConfig::new`] and [`FrameConfig`](crate::FrameConfig)
/// constructors. Passed explicitly; there is no process-wide theme.
#[derive(Clone, Debug, PartialEq, WithBuilders)]
pub struct LayoutDefaults {
    pub margin: Margin,
    pub padding: Spacing,
    pub border_width: f32,
    pub align: HorizontalAlign,
    pub v_align: VerticalAlign,
    pub selectable: bool,
    /// Thickness of frame scrollbars in px
    pub scrollbar_thickness: f32,
    /// Font size handed to the content measurer for labels
    pub font_size: f32,
}

impl Default for LayoutDefaults {
    fn default() -> Self {
        Self {
            margin: Margin::ZERO,
            padding: Spacing::ZERO,
            border_width: 0.0,
            align: HorizontalAlign::Left,
            v_align: VerticalAlign::Top,
            selectable: true,
            scrollbar_thickness: 20.0,
            font_size: 16.0,
        }
    }
}

/// Box model and flags of a single widget
#[derive(Clone, Debug, PartialEq, WithBuilders)]
pub struct WidgetConfig {
    #[with_builders(some, into)]
    pub name: Option<WidgetName>,
    /// Content size, excluding padding and border
    pub size: Vec2,
    pub margin: Margin,
    pub padding: Spacing,
    pub border_width: f32,
    /// Cross-axis alignment inside vertical frames and menu columns
    pub align: HorizontalAlign,
    /// Cross-axis alignment inside horizontal frames
    pub v_align: VerticalAlign,
    /// Floating widgets draw at `float_offset` and take no packing space
    pub floating: bool,
    pub float_offset: Vec2,
    pub visible: bool,
    pub selectable: bool,
}

impl WidgetConfig {
    pub fn new(defaults: &LayoutDefaults) -> Self {
        Self {
            name: None,
            size: Vec2::ZERO,
            margin: defaults.margin,
            padding: defaults.padding,
            border_width: defaults.border_width,
            align: defaults.align,
            v_align: defaults.v_align,
            floating: false,
            float_offset: Vec2::ZERO,
            visible: true,
            selectable: defaults.selectable,
        }
    }

    /// Set the content size in px
    pub fn with_size_px(self, width: f32, height: f32) -> Self {
        self.with_size(Vec2::new(width, height))
    }

    /// Make the widget floating at `offset` from its container's content origin
    pub fn floating_at(mut self, offset: Vec2) -> Self {
        self.floating = true;
        self.float_offset = offset;
        self
    }

    /// Empty, non-selectable widget reserving `height` px of vertical space
    pub fn vertical_spacer(height: f32, defaults: &LayoutDefaults) -> Result<Self> {
        Self::spacer(Vec2::new(0.0, height), height, defaults)
    }

    /// Empty, non-selectable widget reserving `width` px of horizontal space
    pub fn horizontal_spacer(width: f32, defaults: &LayoutDefaults) -> Result<Self> {
        Self::spacer(Vec2::new(width, 0.0), width, defaults)
    }

    fn spacer(size: Vec2, extent: f32, defaults: &LayoutDefaults) -> Result<Self> {
        if !(extent.is_finite() && extent > 0.0) {
            return Err(LayoutError::InvalidSize(format!("spacer extent {extent} must be positive")));
        }
        Ok(Self {
            size,
            padding: Spacing::all(0.0),
            border_width: 0.0,
            selectable: false,
            ..Self::new(defaults)
        })
    }

    /// Size of the border box: content + padding + border on both sides
    pub fn outer_size(&self) -> Vec2 {
        self.size + self.padding.total() + Vec2::splat(2.0 * self.border_width)
    }
}

/// Attachment status of a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachState {
    /// Not owned by any frame or the menu
    Detached,
    /// Attached, but not yet part of a successful layout pass
    Unrendered,
    /// Attached and positioned by the last successful layout pass
    Rendered,
}

/// Leaf or container
#[derive(Debug, Clone)]
pub enum WidgetKind {
    Leaf { text: Option<String> },
    Frame(FrameData),
}

#[derive(Debug, Clone)]
pub struct Widget {
    pub(crate) config: WidgetConfig,
    pub(crate) kind: WidgetKind,
    pub(crate) parent: Option<WidgetId>,
    pub(crate) state: AttachState,
}

impl Widget {
    pub(crate) fn leaf(config: WidgetConfig, text: Option<String>) -> Self {
        Self {
            config,
            kind: WidgetKind::Leaf { text },
            parent: None,
            state: AttachState::Detached,
        }
    }

    pub(crate) fn frame(config: WidgetConfig, frame: FrameData) -> Self {
        Self {
            config,
            kind: WidgetKind::Frame(frame),
            parent: None,
            state: AttachState::Detached,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn name(&self) -> Option<&WidgetName> {
        self.config.name.as_ref()
    }

    pub fn kind(&self) -> &WidgetKind {
        &self.kind
    }

    pub fn state(&self) -> AttachState {
        self.state
    }

    /// Owning frame, `None` for top-level and detached widgets
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub fn is_frame(&self) -> bool {
        matches!(self.kind, WidgetKind::Frame(_))
    }

    pub fn as_frame(&self) -> Option<&FrameData> {
        match &self.kind {
            WidgetKind::Frame(frame) => Some(frame),
            WidgetKind::Leaf { .. } => None,
        }
    }

    pub(crate) fn as_frame_mut(&mut self) -> Option<&mut FrameData> {
        match &mut self.kind {
            WidgetKind::Frame(frame) => Some(frame),
            WidgetKind::Leaf { .. } => None,
        }
    }

    /// Child ids in packing order; empty for leaves
    pub fn children(&self) -> &[WidgetId] {
        match &self.kind {
            WidgetKind::Frame(frame) => &frame.children,
            WidgetKind::Leaf { .. } => &[],
        }
    }

    /// Name for logs and error messages
    pub(crate) fn describe(&self, id: WidgetId) -> String {
        match (&self.config.name, &self.kind) {
            (Some(name), _) => name.to_string(),
            (None, WidgetKind::Frame(_)) => format!("frame {id:?}"),
            (None, WidgetKind::Leaf { .. }) => format!("widget {id:?}"),
        }
    }

    /// Label text for widgets created through a content measurer
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            WidgetKind::Leaf { text } => text.as_deref(),
            WidgetKind::Frame(_) => None,
        }
    }
}

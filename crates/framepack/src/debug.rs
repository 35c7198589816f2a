use std::fmt::Write;

use crate::menu::Menu;
use crate::widget::{Widget, WidgetId, WidgetKind};

/// Configuration for the widget structure dump
#[derive(Clone, Copy, Debug, Default)]
pub struct DebugOptions {
    /// Show arena ids
    pub show_ids: bool,
    /// Show column/row within the parent grid
    pub show_positions: bool,
    /// Show computed rectangles
    pub show_rects: bool,
    /// Show floating/hidden/scroll/non-selectable markers
    pub show_flags: bool,
}

impl DebugOptions {
    /// Create debug options with nothing enabled
    pub const fn none() -> Self {
        Self {
            show_ids: false,
            show_positions: false,
            show_rects: false,
            show_flags: false,
        }
    }

    /// Create debug options with everything enabled
    pub const fn all() -> Self {
        Self {
            show_ids: true,
            show_positions: true,
            show_rects: true,
            show_flags: true,
        }
    }

    pub const fn with_ids(mut self, enabled: bool) -> Self {
        self.show_ids = enabled;
        self
    }

    pub const fn with_positions(mut self, enabled: bool) -> Self {
        self.show_positions = enabled;
        self
    }

    pub const fn with_rects(mut self, enabled: bool) -> Self {
        self.show_rects = enabled;
        self
    }

    pub const fn with_flags(mut self, enabled: bool) -> Self {
        self.show_flags = enabled;
        self
    }
}

/// Render the attached tree as text, one line per widget in traversal order.
///
/// ```text
/// menu 400x300
/// ├ outer [frame, Vertical] (0,0) scroll:y
/// │ ├ play (0,0)
/// │ └ quit hidden
/// └ credits (0,1)
/// ```
pub fn describe_tree(menu: &Menu, options: DebugOptions) -> String {
    let config = menu.config();
    let mut out = format!("menu {}x{}", config.width, config.height);
    if options.show_positions && (config.columns > 1 || config.rows.is_some()) {
        let rows = config.rows.map_or_else(|| "*".to_string(), |rows| rows.to_string());
        let _ = write!(out, " grid {}x{rows}", config.columns);
    }
    out.push('\n');

    let root = menu.root_widgets();
    for (i, &id) in root.iter().enumerate() {
        describe_widget(menu, id, "", i + 1 == root.len(), options, &mut out);
    }
    out
}

fn describe_widget(menu: &Menu, id: WidgetId, prefix: &str, last: bool, options: DebugOptions, out: &mut String) {
    let Some(widget) = menu.widget(id) else {
        return;
    };

    out.push_str(prefix);
    out.push_str(if last { "└ " } else { "├ " });
    out.push_str(&widget.describe(id));
    if let WidgetKind::Frame(frame) = widget.kind() {
        let _ = write!(out, " [frame, {:?}]", frame.orientation());
    }
    if options.show_ids && widget.name().is_some() {
        let _ = write!(out, " {id:?}");
    }

    let layout = menu.layout(id);
    if options.show_positions {
        if let Some(layout) = layout {
            let _ = write!(out, " ({},{})", layout.column, layout.row);
        }
    }
    if options.show_rects {
        if let Some(layout) = layout {
            let r = layout.rect;
            let _ = write!(out, " [{},{} {}x{}]", r.min[0], r.min[1], r.width(), r.height());
        }
    }
    if options.show_flags {
        write_flags(widget, out);
    }
    out.push('\n');

    let child_prefix = format!("{prefix}{}", if last { "  " } else { "│ " });
    let children = widget.children();
    for (i, &child) in children.iter().enumerate() {
        describe_widget(menu, child, &child_prefix, i + 1 == children.len(), options, out);
    }
}

fn write_flags(widget: &Widget, out: &mut String) {
    let config = widget.config();
    if config.floating {
        out.push_str(" floating");
    }
    if !config.visible {
        out.push_str(" hidden");
    }
    if !config.selectable && !widget.is_frame() {
        out.push_str(" unselectable");
    }
    if let Some(frame) = widget.as_frame() {
        let scroll = frame.scroll();
        match (scroll.is_scrollable(crate::Axis::X), scroll.is_scrollable(crate::Axis::Y)) {
            (true, true) => out.push_str(" scroll:xy"),
            (true, false) => out.push_str(" scroll:x"),
            (false, true) => out.push_str(" scroll:y"),
            (false, false) => {}
        }
    }
}

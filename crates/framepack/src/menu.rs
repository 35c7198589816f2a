//! The menu: arena-owned widget tree and its mutation API.
//!
//! Every structural or size-affecting call is a transaction. The menu takes a
//! checkpoint, applies the change, runs the solver and commits the result. If
//! any step fails the checkpoint is restored, so a rejected call leaves the
//! tree, the layouts and the selection exactly as they were.

use framepack_macros::WithBuilders;
use glam::Vec2;
use slotmap::{SecondaryMap, SlotMap};

use crate::error::{LayoutError, Result};
use crate::frame::{FrameConfig, FrameData};
use crate::layout::{Axis, ComputedLayout, HorizontalAlign, Margin, Spacing, VerticalAlign};
use crate::measure::{ContentMeasurer, MeasureTextRequest};
use crate::primitives::{Point, Rect};
use crate::solver::{self, Solution};
use crate::widget::{AttachState, LayoutDefaults, Widget, WidgetConfig, WidgetId};

/// Menu surface and top-level grid
#[derive(Clone, Debug, PartialEq, WithBuilders)]
pub struct MenuConfig {
    pub width: f32,
    pub height: f32,
    /// Number of grid columns, split evenly across the width
    pub columns: usize,
    /// Widgets per column; unbounded when `None`
    #[with_builders(some)]
    pub rows: Option<usize>,
    pub defaults: LayoutDefaults,
}

impl MenuConfig {
    pub fn new(width: f32, height: f32, defaults: LayoutDefaults) -> Self {
        Self {
            width,
            height,
            columns: 1,
            rows: None,
            defaults,
        }
    }

    /// Check that the surface has a finite, positive size
    pub fn validate(&self) -> Result<()> {
        let size = Vec2::new(self.width, self.height);
        if !size.is_finite() || size.min_element() <= 0.0 {
            return Err(LayoutError::InvalidSize(format!(
                "menu size {}x{} must be finite and positive",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// State restored when a transaction fails
struct Checkpoint {
    config: MenuConfig,
    widgets: SlotMap<WidgetId, Widget>,
    root: Vec<WidgetId>,
    selected: Option<WidgetId>,
}

#[derive(Debug)]
pub struct Menu {
    pub(crate) config: MenuConfig,
    pub(crate) widgets: SlotMap<WidgetId, Widget>,
    /// Top-level widgets in insertion order
    pub(crate) root: Vec<WidgetId>,
    pub(crate) layouts: SecondaryMap<WidgetId, ComputedLayout>,
    pub(crate) selected: Option<WidgetId>,
    /// Selectable widgets in traversal order, as of the last committed pass
    pub(crate) selectable: Vec<WidgetId>,
}

impl Menu {
    pub fn new(config: MenuConfig) -> Self {
        Self {
            config,
            widgets: SlotMap::with_key(),
            root: Vec::new(),
            layouts: SecondaryMap::new(),
            selected: None,
            selectable: Vec::new(),
        }
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn defaults(&self) -> &LayoutDefaults {
        &self.config.defaults
    }

    /// Menu surface as a rectangle at the origin
    pub fn bounds(&self) -> Rect {
        Rect::from_origin(Vec2::ZERO, Vec2::new(self.config.width, self.config.height))
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(id)
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    /// Look a widget up by name
    pub fn find(&self, name: &str) -> Option<WidgetId> {
        self.widgets
            .iter()
            .find(|(_, widget)| widget.name().is_some_and(|n| n.as_str() == name))
            .map(|(id, _)| id)
    }

    // ---------------------------------------------------------------------
    // Creation

    /// Create a detached leaf widget
    pub fn create_widget(&mut self, config: WidgetConfig) -> Result<WidgetId> {
        self.validate_config(&config, None)?;
        let id = self.widgets.insert(Widget::leaf(config, None));
        log::trace!("created {}", self.describe(id));
        Ok(id)
    }

    /// Create a detached frame
    pub fn create_frame(&mut self, config: FrameConfig) -> Result<WidgetId> {
        let (widget, frame) = config.build()?;
        self.validate_config(&widget, None)?;
        let id = self.widgets.insert(Widget::frame(widget, frame));
        log::trace!("created {}", self.describe(id));
        Ok(id)
    }

    /// Create a detached label sized by `measurer`.
    ///
    /// The measured text size replaces `config.size`.
    pub fn create_label(
        &mut self,
        text: impl Into<String>,
        config: WidgetConfig,
        measurer: &mut dyn ContentMeasurer,
    ) -> Result<WidgetId> {
        let text = text.into();
        let size = measurer.measure_text(MeasureTextRequest::new(&text, self.config.defaults.font_size));
        let config = config.with_size(size.as_vec2());
        self.validate_config(&config, None)?;
        Ok(self.widgets.insert(Widget::leaf(config, Some(text))))
    }

    /// Create a leaf and add it to the menu; nothing is kept on failure
    pub fn add_widget(&mut self, config: WidgetConfig) -> Result<WidgetId> {
        let id = self.create_widget(config)?;
        self.attach_new(id, None)
    }

    /// Create a frame and add it to the menu; nothing is kept on failure
    pub fn add_frame(&mut self, config: FrameConfig) -> Result<WidgetId> {
        let id = self.create_frame(config)?;
        self.attach_new(id, None)
    }

    /// Create a leaf and pack it into `frame`; nothing is kept on failure
    pub fn pack_widget(&mut self, config: WidgetConfig, frame: WidgetId) -> Result<WidgetId> {
        let id = self.create_widget(config)?;
        self.attach_new(id, Some(frame))
    }

    fn attach_new(&mut self, id: WidgetId, frame: Option<WidgetId>) -> Result<WidgetId> {
        let result = match frame {
            Some(frame) => self.pack(id, frame),
            None => self.add(id),
        };
        match result {
            Ok(()) => Ok(id),
            Err(err) => {
                self.widgets.remove(id);
                Err(err)
            }
        }
    }

    fn validate_config(&self, config: &WidgetConfig, except: Option<WidgetId>) -> Result<()> {
        if let Some(name) = &config.name {
            if self.find(name.as_str()).is_some_and(|id| Some(id) != except) {
                return Err(LayoutError::DuplicateId(name.to_string()));
            }
        }
        let p = config.padding;
        Spacing::from_shorthand(&[p.top, p.right, p.bottom, p.left])?;
        Margin::new(config.margin.x, config.margin.y)?;
        let finite = config.size.is_finite() && config.float_offset.is_finite();
        if !finite || config.size.min_element() < 0.0 || !(config.border_width >= 0.0) {
            return Err(LayoutError::InvalidSize(format!(
                "size {} and border {} must be finite and non-negative",
                config.size, config.border_width
            )));
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Attachment

    /// Attach a detached widget at menu level
    pub fn add(&mut self, id: WidgetId) -> Result<()> {
        let widget = self.get(id)?;
        if widget.state != AttachState::Detached {
            return Err(LayoutError::AlreadyAttached(widget.describe(id)));
        }
        self.with_rollback("add", |menu| {
            menu.root.push(id);
            Ok(())
        })
    }

    /// Pack a detached widget at the end of `frame`'s children
    pub fn pack(&mut self, id: WidgetId, frame: WidgetId) -> Result<()> {
        let widget = self.get(id)?;
        let target = self.get(frame)?;
        if id == frame || self.is_ancestor(id, frame) {
            return Err(LayoutError::Cycle {
                widget: widget.describe(id),
                frame: target.describe(frame),
            });
        }
        if widget.state != AttachState::Detached {
            return Err(LayoutError::AlreadyAttached(widget.describe(id)));
        }
        if !target.is_frame() {
            return Err(LayoutError::NotAFrame(target.describe(frame)));
        }

        self.with_rollback("pack", |menu| {
            menu.frame_mut(frame)?.children.push(id);
            menu.get_mut(id)?.parent = Some(frame);
            menu.check_unsolved_subtrees(frame)
        })
    }

    /// Detach a widget from its frame or the menu. Its own children stay packed.
    pub fn unpack(&mut self, id: WidgetId) -> Result<()> {
        let widget = self.get(id)?;
        if widget.state == AttachState::Detached {
            return Err(LayoutError::NotAttached(widget.describe(id)));
        }
        self.with_rollback("unpack", |menu| {
            menu.detach(id);
            Ok(())
        })
    }

    /// Delete a widget from the menu.
    ///
    /// With `cascade` the whole subtree is deleted; otherwise the children of a
    /// removed frame are left detached.
    pub fn remove(&mut self, id: WidgetId, cascade: bool) -> Result<()> {
        self.get(id)?;
        self.with_rollback("remove", |menu| {
            menu.detach(id);
            let children = menu.get(id)?.children().to_vec();
            if cascade {
                for descendant in menu.descendants(id) {
                    menu.widgets.remove(descendant);
                }
            } else {
                for child in children {
                    if let Some(child) = menu.widgets.get_mut(child) {
                        child.parent = None;
                    }
                }
            }
            menu.widgets.remove(id);
            Ok(())
        })
    }

    fn detach(&mut self, id: WidgetId) {
        let Some(widget) = self.widgets.get_mut(id) else {
            return;
        };
        let parent = widget.parent.take();
        widget.state = AttachState::Detached;
        match parent {
            Some(parent) => {
                if let Some(frame) = self.widgets.get_mut(parent).and_then(Widget::as_frame_mut) {
                    frame.children.retain(|&child| child != id);
                }
            }
            None => self.root.retain(|&top| top != id),
        }
    }

    /// Whether `ancestor` is a strict ancestor of `id`
    fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    /// Measure the subtrees around `id` that the next pass will skip
    ///
    /// Hidden widgets on the path to the top take no part in the solve, and
    /// neither does a top that is not attached to the menu.
    fn check_unsolved_subtrees(&self, id: WidgetId) -> Result<()> {
        let mut top = id;
        loop {
            if self.widgets.get(top).is_some_and(|w| !w.config.visible) {
                solver::check_subtree(&self.widgets, top)?;
            }
            match self.parent(top) {
                Some(parent) => top = parent,
                None => break,
            }
        }
        if self.root.contains(&top) {
            return Ok(());
        }
        solver::check_subtree(&self.widgets, top)
    }

    // ---------------------------------------------------------------------
    // Mutation

    /// Apply `update` to a widget's configuration and re-solve
    pub fn configure(&mut self, id: WidgetId, update: impl FnOnce(&mut WidgetConfig)) -> Result<()> {
        self.get(id)?;
        self.with_rollback("configure", |menu| {
            let widget = menu.get_mut(id)?;
            update(&mut widget.config);
            let config = widget.config.clone();
            menu.validate_config(&config, Some(id))?;
            menu.check_unsolved_subtrees(id)
        })
    }

    /// Set the content size; for frames this is the declared content area
    pub fn set_size(&mut self, id: WidgetId, width: f32, height: f32) -> Result<()> {
        self.configure(id, |config| config.size = Vec2::new(width, height))
    }

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> Result<()> {
        self.configure(id, |config| config.visible = visible)
    }

    /// Make a widget floating at `offset`, or packed again with `None`
    pub fn set_floating(&mut self, id: WidgetId, offset: Option<Vec2>) -> Result<()> {
        self.configure(id, |config| {
            config.floating = offset.is_some();
            config.float_offset = offset.unwrap_or(Vec2::ZERO);
        })
    }

    pub fn set_margin(&mut self, id: WidgetId, margin: Margin) -> Result<()> {
        self.configure(id, |config| config.margin = margin)
    }

    /// Set padding from a 1 to 4 value shorthand
    pub fn set_padding(&mut self, id: WidgetId, values: &[f32]) -> Result<()> {
        let padding = Spacing::from_shorthand(values)?;
        self.configure(id, |config| config.padding = padding)
    }

    pub fn set_align(&mut self, id: WidgetId, align: HorizontalAlign) -> Result<()> {
        self.configure(id, |config| config.align = align)
    }

    pub fn set_v_align(&mut self, id: WidgetId, v_align: VerticalAlign) -> Result<()> {
        self.configure(id, |config| config.v_align = v_align)
    }

    /// Resize the menu surface
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        self.with_rollback("resize", |menu| {
            menu.config.width = width;
            menu.config.height = height;
            Ok(())
        })
    }

    /// Change the top-level grid
    pub fn set_grid(&mut self, columns: usize, rows: Option<usize>) -> Result<()> {
        self.with_rollback("set_grid", |menu| {
            menu.config.columns = columns;
            menu.config.rows = rows;
            Ok(())
        })
    }

    // ---------------------------------------------------------------------
    // Transactions

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            config: self.config.clone(),
            widgets: self.widgets.clone(),
            root: self.root.clone(),
            selected: self.selected,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.config = checkpoint.config;
        self.widgets = checkpoint.widgets;
        self.root = checkpoint.root;
        self.selected = checkpoint.selected;
    }

    pub(crate) fn with_rollback<T>(
        &mut self,
        operation: &str,
        mutate: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let checkpoint = self.checkpoint();
        let result = mutate(self).and_then(|value| self.relayout().map(|()| value));
        if let Err(err) = &result {
            log::warn!("{operation} rejected, restoring previous tree: {err}");
            self.restore(checkpoint);
        }
        result
    }

    /// Re-solve the attached tree and commit the result
    fn relayout(&mut self) -> Result<()> {
        let solution = solver::solve(&self.widgets, &self.root, &self.config)?;
        self.commit(solution);
        Ok(())
    }

    fn commit(&mut self, solution: Solution) {
        for (id, &(world, view)) in &solution.extents {
            if let Some(frame) = self.widgets.get_mut(id).and_then(Widget::as_frame_mut) {
                frame.scroll.set_extent(world, view);
            }
        }
        self.layouts = solution.layouts;
        self.refresh_states();
        self.refresh_selection();
    }

    fn refresh_states(&mut self) {
        for widget in self.widgets.values_mut() {
            widget.state = if widget.parent.is_some() {
                AttachState::Unrendered
            } else {
                AttachState::Detached
            };
        }
        let mut stack = self.root.clone();
        while let Some(id) = stack.pop() {
            if let Some(widget) = self.widgets.get_mut(id) {
                widget.state = AttachState::Rendered;
                stack.extend_from_slice(widget.children());
            }
        }
    }

    // ---------------------------------------------------------------------
    // Scrolling

    pub fn scroll_offset(&self, frame: WidgetId) -> Option<Vec2> {
        self.frame(frame).map(|frame| frame.scroll.offset())
    }

    /// Valid offset range of `frame` on `axis`
    pub fn scroll_range(&self, frame: WidgetId, axis: Axis) -> Option<(f32, f32)> {
        self.frame(frame).map(|frame| frame.scroll.range(axis))
    }

    /// Set a frame's scroll offset; returns the clamped offset actually applied
    pub fn set_scroll_offset(&mut self, frame: WidgetId, offset: Vec2) -> Result<Vec2> {
        self.with_rollback("scroll", |menu| Ok(menu.frame_mut(frame)?.scroll.set_offset(offset)))
    }

    pub fn scroll_by(&mut self, frame: WidgetId, delta: Vec2) -> Result<Vec2> {
        self.with_rollback("scroll", |menu| Ok(menu.frame_mut(frame)?.scroll.scroll_by(delta)))
    }

    /// Scroll every ancestor frame, innermost first, so that `id` is visible
    pub fn scroll_to(&mut self, id: WidgetId) -> Result<()> {
        let mut ancestor = self.get(id)?.parent;
        while let Some(frame_id) = ancestor {
            let target = self.rect(id).ok_or_else(|| self.not_rendered(id))?;
            let viewport = self.viewport(frame_id).ok_or_else(|| self.not_rendered(frame_id))?;
            let scroll = &self.get(frame_id)?.as_frame().ok_or(LayoutError::UnknownWidget)?.scroll;
            if scroll.has_scrollbars() {
                let offset = scroll.offset();
                let local = target.translate(offset - viewport.origin());
                let next = scroll.offset_to_reveal(local);
                if next != offset {
                    self.set_scroll_offset(frame_id, next)?;
                }
            }
            ancestor = self.parent(frame_id);
        }
        Ok(())
    }

    fn not_rendered(&self, id: WidgetId) -> LayoutError {
        LayoutError::NotAttached(self.describe(id))
    }

    /// Screen rectangle of a frame's scrollbar thumb
    pub fn scrollbar_thumb(&self, frame: WidgetId, axis: Axis) -> Option<Rect> {
        let viewport = self.viewport(frame)?;
        self.frame(frame)?.scroll.thumb_rect(axis, viewport)
    }

    /// Screen rectangle of a frame's scrollbar track
    pub fn scrollbar_track(&self, frame: WidgetId, axis: Axis) -> Option<Rect> {
        let viewport = self.viewport(frame)?;
        self.frame(frame)?.scroll.track_rect(axis, viewport)
    }

    /// Start dragging a scrollbar thumb; `false` when `axis` does not scroll
    pub fn begin_scrollbar_drag(&mut self, frame: WidgetId, axis: Axis, pointer: Point) -> Result<bool> {
        let pointer = Vec2::new(pointer.x, pointer.y);
        Ok(self.frame_mut(frame)?.scroll.begin_drag(axis, pointer))
    }

    /// Follow the pointer during a thumb drag; `None` when no drag is active
    pub fn drag_scrollbar(&mut self, frame: WidgetId, pointer: Point) -> Result<Option<Vec2>> {
        let pointer = Vec2::new(pointer.x, pointer.y);
        self.with_rollback("scrollbar drag", |menu| Ok(menu.frame_mut(frame)?.scroll.drag_to(pointer)))
    }

    pub fn end_scrollbar_drag(&mut self, frame: WidgetId) -> Result<()> {
        self.frame_mut(frame)?.scroll.end_drag();
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Queries

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.widgets.get(id).and_then(|widget| widget.parent)
    }

    /// Children of a frame in packing order; empty for leaves and unknown ids
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.widgets.get(id).map(Widget::children).unwrap_or(&[])
    }

    /// Top-level widgets in insertion order
    pub fn root_widgets(&self) -> &[WidgetId] {
        &self.root
    }

    /// Number of frames above `id`
    pub fn frame_depth(&self, id: WidgetId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    pub fn attach_state(&self, id: WidgetId) -> Option<AttachState> {
        self.widgets.get(id).map(|widget| widget.state)
    }

    /// Layout from the last committed pass; `None` for hidden or unrendered widgets
    pub fn layout(&self, id: WidgetId) -> Option<&ComputedLayout> {
        self.layouts.get(id)
    }

    pub fn rect(&self, id: WidgetId) -> Option<Rect> {
        self.layout(id).map(|layout| layout.rect)
    }

    pub fn clip_rect(&self, id: WidgetId) -> Option<Rect> {
        self.layout(id).map(|layout| layout.clip)
    }

    /// Visible content area of a rendered frame in screen coordinates
    pub fn viewport(&self, frame: WidgetId) -> Option<Rect> {
        let widget = self.widgets.get(frame)?;
        let layout = self.layouts.get(frame)?;
        Some(widget.as_frame()?.viewport_in(layout.rect, &widget.config))
    }

    /// Every attached widget, depth-first pre-order, hidden ones included
    pub fn widgets_in_order(&self) -> Vec<WidgetId> {
        self.walk(false)
    }

    /// Visible widgets in draw order: parents before children, later siblings on top
    pub fn render_order(&self) -> Vec<WidgetId> {
        self.walk(true)
    }

    fn walk(&self, visible_only: bool) -> Vec<WidgetId> {
        let mut order = Vec::with_capacity(self.widgets.len());
        let mut stack: Vec<WidgetId> = self.root.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(widget) = self.widgets.get(id) else {
                continue;
            };
            if visible_only && !widget.config.visible {
                continue;
            }
            order.push(id);
            stack.extend(widget.children().iter().rev());
        }
        order
    }

    /// `id` and all its descendants, pre-order
    fn descendants(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        out
    }

    pub(crate) fn describe(&self, id: WidgetId) -> String {
        self.widgets
            .get(id)
            .map_or_else(|| format!("{id:?}"), |widget| widget.describe(id))
    }

    pub(crate) fn get(&self, id: WidgetId) -> Result<&Widget> {
        self.widgets.get(id).ok_or(LayoutError::UnknownWidget)
    }

    fn get_mut(&mut self, id: WidgetId) -> Result<&mut Widget> {
        self.widgets.get_mut(id).ok_or(LayoutError::UnknownWidget)
    }

    pub fn frame(&self, id: WidgetId) -> Option<&FrameData> {
        self.widgets.get(id).and_then(Widget::as_frame)
    }

    fn frame_mut(&mut self, id: WidgetId) -> Result<&mut FrameData> {
        let widget = self.get(id)?;
        if !widget.is_frame() {
            return Err(LayoutError::NotAFrame(widget.describe(id)));
        }
        self.widgets
            .get_mut(id)
            .and_then(Widget::as_frame_mut)
            .ok_or(LayoutError::UnknownWidget)
    }
}

impl From<MenuConfig> for Menu {
    fn from(config: MenuConfig) -> Self {
        Self::new(config)
    }
}

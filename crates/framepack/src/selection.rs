//! Keyboard-style selection over the attached tree.
//!
//! Selectable widgets are visited in depth-first pre-order, skipping hidden
//! subtrees. Stepping wraps around at both ends.

use crate::error::{LayoutError, Result};
use crate::menu::Menu;
use crate::widget::WidgetId;

impl Menu {
    pub fn selected(&self) -> Option<WidgetId> {
        self.selected
    }

    /// Selectable widgets in traversal order
    pub fn selectable_widgets(&self) -> &[WidgetId] {
        &self.selectable
    }

    /// Select `id` and scroll it into view
    pub fn select(&mut self, id: WidgetId) -> Result<()> {
        let widget = self.get(id)?;
        if !self.selectable.contains(&id) {
            return Err(LayoutError::NotSelectable(widget.describe(id)));
        }
        self.selected = Some(id);
        self.scroll_to(id)
    }

    /// Move the selection forward, wrapping after the last widget
    pub fn select_next(&mut self) -> Result<Option<WidgetId>> {
        self.step_selection(true)
    }

    /// Move the selection backward, wrapping before the first widget
    pub fn select_previous(&mut self) -> Result<Option<WidgetId>> {
        self.step_selection(false)
    }

    fn step_selection(&mut self, forward: bool) -> Result<Option<WidgetId>> {
        let len = self.selectable.len();
        if len == 0 {
            return Ok(None);
        }
        let current = self
            .selected
            .and_then(|selected| self.selectable.iter().position(|&id| id == selected));
        let next = match current {
            Some(index) if forward => (index + 1) % len,
            Some(index) => (index + len - 1) % len,
            None => 0,
        };
        let id = self.selectable[next];
        self.selected = Some(id);
        self.scroll_to(id)?;
        Ok(Some(id))
    }

    /// Recompute the selectable order after a committed pass.
    ///
    /// The first selectable widget is picked when nothing is selected. A
    /// selection that left the tree moves to the widget that took its place.
    pub(crate) fn refresh_selection(&mut self) {
        let order: Vec<WidgetId> = self
            .render_order()
            .into_iter()
            .filter(|&id| self.widgets.get(id).is_some_and(|widget| widget.config.selectable))
            .collect();

        self.selected = match self.selected {
            Some(id) if order.contains(&id) => Some(id),
            Some(id) => {
                let index = self.selectable.iter().position(|&old| old == id).unwrap_or(0);
                order.get(index.min(order.len().saturating_sub(1))).copied()
            }
            None => order.first().copied(),
        };
        if let Some(id) = self.selected {
            log::trace!("selected {}", self.describe(id));
        }
        self.selectable = order;
    }
}

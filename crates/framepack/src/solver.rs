//! Layout solver.
//!
//! A pass runs in two phases over the attached tree:
//! 1. **measure** (bottom-up): border-box footprint of every visible widget;
//!    frames pack their children and check them against the declared size.
//! 2. **place** (top-down): the menu grid positions top-level widgets, each
//!    frame converts its children's packed positions to absolute coordinates
//!    by adding its content origin and subtracting its scroll offset.
//!
//! The solver never mutates the tree. The menu commits a [`Solution`] only
//! when the whole pass succeeded.

use glam::Vec2;
use slotmap::{SecondaryMap, SlotMap};

use crate::error::{LayoutError, Result};
use crate::frame::{self, PackItem, Packing};
use crate::layout::{align_offset, Axis, ComputedLayout};
use crate::menu::MenuConfig;
use crate::primitives::Rect;
use crate::widget::{Widget, WidgetId, WidgetKind};

/// Tolerance for size comparisons, absorbs float noise from fractional sizes
const EPSILON: f32 = 1e-3;

/// Output of a successful pass
#[derive(Debug, Default)]
pub(crate) struct Solution {
    pub layouts: SecondaryMap<WidgetId, ComputedLayout>,
    /// (world, view) extents of every visible frame
    pub extents: SecondaryMap<WidgetId, (Vec2, Vec2)>,
}

/// Measurement of a frame kept between the two phases
struct FrameMeasure {
    world: Vec2,
    view: Vec2,
    offset: Vec2,
    children: Vec<WidgetId>,
    items: Vec<PackItem>,
}

struct Solver<'a> {
    widgets: &'a SlotMap<WidgetId, Widget>,
    footprints: SecondaryMap<WidgetId, Vec2>,
    frames: SecondaryMap<WidgetId, FrameMeasure>,
}

pub(crate) fn solve(
    widgets: &SlotMap<WidgetId, Widget>,
    root: &[WidgetId],
    config: &MenuConfig,
) -> Result<Solution> {
    config.validate()?;
    let mut solver = Solver {
        widgets,
        footprints: SecondaryMap::new(),
        frames: SecondaryMap::new(),
    };
    let bounds = Vec2::new(config.width, config.height);

    let mut top = Vec::with_capacity(root.len());
    let mut items = Vec::with_capacity(root.len());
    for &id in root {
        let widget = widgets.get(id).ok_or(LayoutError::UnknownWidget)?;
        if !widget.config.visible {
            continue;
        }
        let footprint = solver.measure(id)?;
        for axis in [Axis::X, Axis::Y] {
            if axis.of(footprint) > axis.of(bounds) + EPSILON {
                return Err(LayoutError::Sizing {
                    widget: widget.describe(id),
                    axis,
                    required: axis.of(footprint),
                    available: axis.of(bounds),
                });
            }
        }
        top.push(id);
        items.push(PackItem::from_config(&widget.config, footprint));
    }

    let grid = arrange_grid(config, &items)?;

    let mut solution = Solution::default();
    let menu_rect = Rect::from_origin(Vec2::ZERO, bounds);
    for (k, &id) in top.iter().enumerate() {
        solver.place(id, grid.positions[k], menu_rect, grid.slots[k], 0, &mut solution);
    }

    log::debug!(
        "layout pass: {} widgets placed in {}x{} menu",
        solution.layouts.len(),
        config.width,
        config.height
    );
    Ok(solution)
}

/// Measure a subtree that is not reachable from the menu.
///
/// Catches frame sizing errors while building a tree bottom-up, before its
/// top frame is added.
pub(crate) fn check_subtree(widgets: &SlotMap<WidgetId, Widget>, id: WidgetId) -> Result<()> {
    let mut solver = Solver {
        widgets,
        footprints: SecondaryMap::new(),
        frames: SecondaryMap::new(),
    };
    solver.measure(id).map(|_| ())
}

impl Solver<'_> {
    fn measure(&mut self, id: WidgetId) -> Result<Vec2> {
        let widgets = self.widgets;
        let widget = widgets.get(id).ok_or(LayoutError::UnknownWidget)?;

        let footprint = match &widget.kind {
            WidgetKind::Leaf { .. } => widget.config.outer_size(),
            WidgetKind::Frame(frame) => {
                let mut children = Vec::with_capacity(frame.children.len());
                let mut items = Vec::with_capacity(frame.children.len());
                for &child in &frame.children {
                    let child_widget = widgets.get(child).ok_or(LayoutError::UnknownWidget)?;
                    if !child_widget.config.visible {
                        continue;
                    }
                    let size = self.measure(child)?;
                    children.push(child);
                    items.push(PackItem::from_config(&child_widget.config, size));
                }

                let declared = widget.config.size;
                let packed = frame::content_size(frame.orientation, &items);
                let view = frame.view_size(declared);
                let mut world = declared;
                for axis in [Axis::X, Axis::Y] {
                    let needed = axis.of(packed);
                    if frame.scroll.is_scrollable(axis) {
                        axis.set(&mut world, needed.max(axis.of(declared)));
                    } else if needed > axis.of(declared) + EPSILON {
                        return Err(LayoutError::Sizing {
                            widget: widget.describe(id),
                            axis,
                            required: needed,
                            available: axis.of(declared),
                        });
                    }
                }

                let mut scroll = frame.scroll.clone();
                scroll.set_extent(world, view);
                log::trace!(
                    "packed {} ({} children): content {packed}, world {world}, view {view}",
                    widget.describe(id),
                    children.len()
                );
                self.frames.insert(
                    id,
                    FrameMeasure {
                        world,
                        view,
                        offset: scroll.offset(),
                        children,
                        items,
                    },
                );
                frame.footprint(&widget.config)
            }
        };

        self.footprints.insert(id, footprint);
        Ok(footprint)
    }

    fn place(
        &mut self,
        id: WidgetId,
        origin: Vec2,
        clip: Rect,
        slot: (usize, usize),
        depth: usize,
        solution: &mut Solution,
    ) {
        let widgets = self.widgets;
        let (Some(widget), Some(&footprint)) = (widgets.get(id), self.footprints.get(id)) else {
            return;
        };

        let rect = Rect::from_origin(origin, footprint);
        solution.layouts.insert(
            id,
            ComputedLayout {
                rect,
                clip,
                column: slot.0,
                row: slot.1,
                depth,
            },
        );

        let (Some(frame), Some(measure)) = (widget.as_frame(), self.frames.remove(id)) else {
            return;
        };

        let viewport = frame.viewport_in(rect, &widget.config);
        let child_clip = clip
            .intersect(&viewport)
            .unwrap_or_else(|| Rect::from_origin(viewport.origin(), Vec2::ZERO));
        let packing = frame::pack(
            frame.orientation,
            &measure.items,
            frame.orientation.cross(measure.world),
        );

        for (k, &child) in measure.children.iter().enumerate() {
            let child_origin = viewport.origin() + packing.positions[k] - measure.offset;
            self.place(child, child_origin, child_clip, packing.slots[k], depth + 1, solution);
        }
        solution.extents.insert(id, (measure.world, measure.view));
    }
}

/// Place top-level widgets on the menu's column/row grid.
///
/// Columns split the menu width evenly and fill top to bottom, column-major.
fn arrange_grid(config: &MenuConfig, items: &[PackItem]) -> Result<Packing> {
    let count = items.iter().filter(|item| item.floating.is_none()).count();
    let columns = config.columns.max(1);
    let rows = match config.rows {
        Some(rows) => {
            let capacity = columns * rows;
            if count > capacity {
                return Err(LayoutError::GridOverflow { count, capacity });
            }
            rows.max(1)
        }
        None => count.div_ceil(columns).max(1),
    };

    let column_width = config.width / columns as f32;
    let mut cursors = vec![0.0f32; columns];
    let mut positions = Vec::with_capacity(items.len());
    let mut slots = Vec::with_capacity(items.len());
    let mut index = 0usize;

    for item in items {
        if let Some(offset) = item.floating {
            positions.push(offset);
            slots.push(slots.last().copied().unwrap_or((0, 0)));
            continue;
        }

        let extent = item.size + item.margin.as_vec2();
        if extent.x > column_width + EPSILON {
            return Err(LayoutError::Overflow {
                axis: Axis::X,
                required: extent.x,
                available: column_width,
            });
        }

        let (column, row) = (index / rows, index % rows);
        let x = column as f32 * column_width + align_offset(item.align.into(), column_width, extent.x);
        positions.push(Vec2::new(x, cursors[column]));
        slots.push((column, row));
        cursors[column] += extent.y;
        index += 1;
    }

    let height = cursors.iter().copied().fold(0.0f32, f32::max);
    if height > config.height + EPSILON {
        return Err(LayoutError::Overflow {
            axis: Axis::Y,
            required: height,
            available: config.height,
        });
    }

    let used_columns = count.div_ceil(rows).min(columns);
    Ok(Packing {
        positions,
        slots,
        content_size: Vec2::new(used_columns as f32 * column_width, height),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{HorizontalAlign, Margin};
    use crate::widget::LayoutDefaults;

    fn item(w: f32, h: f32) -> PackItem {
        PackItem::new(Vec2::new(w, h))
    }

    fn config(width: f32, height: f32) -> MenuConfig {
        MenuConfig::new(width, height, LayoutDefaults::default())
    }

    #[test]
    fn test_grid_single_column_stacks() {
        let packing = arrange_grid(&config(200.0, 100.0), &[item(50.0, 20.0), item(50.0, 30.0)]).unwrap();
        assert_eq!(packing.positions, vec![Vec2::new(0.0, 0.0), Vec2::new(0.0, 20.0)]);
        assert_eq!(packing.slots, vec![(0, 0), (0, 1)]);
        assert_eq!(packing.content_size, Vec2::new(200.0, 50.0));
    }

    #[test]
    fn test_grid_columns_fill_column_major() {
        let cfg = config(200.0, 100.0).with_columns(2).with_rows(2);
        let mut centered = item(50.0, 10.0);
        centered.align = HorizontalAlign::Center;
        let items = [item(50.0, 10.0), item(50.0, 10.0), centered];

        let packing = arrange_grid(&cfg, &items).unwrap();
        assert_eq!(packing.slots, vec![(0, 0), (0, 1), (1, 0)]);
        assert_eq!(packing.positions[2], Vec2::new(125.0, 0.0));
    }

    #[test]
    fn test_grid_capacity() {
        let cfg = config(200.0, 100.0).with_columns(1).with_rows(2);
        let err = arrange_grid(&cfg, &[item(1.0, 1.0), item(1.0, 1.0), item(1.0, 1.0)]).unwrap_err();
        assert_eq!(err, LayoutError::GridOverflow { count: 3, capacity: 2 });
    }

    #[test]
    fn test_grid_overflow_height_counts_margins() {
        let mut a = item(10.0, 50.0);
        a.margin = Margin { x: 0.0, y: 10.0 };
        let err = arrange_grid(&config(100.0, 100.0), &[a, item(10.0, 50.0)]).unwrap_err();
        assert!(matches!(err, LayoutError::Overflow { axis: Axis::Y, .. }));
    }

    #[test]
    fn test_grid_floating_keeps_previous_slot() {
        let mut floating = item(10.0, 10.0);
        floating.floating = Some(Vec2::new(40.0, 5.0));
        let packing = arrange_grid(&config(100.0, 100.0), &[item(10.0, 10.0), item(10.0, 10.0), floating]).unwrap();
        assert_eq!(packing.slots[2], (0, 1));
        assert_eq!(packing.positions[2], Vec2::new(40.0, 5.0));
    }
}

//! Hit-testing module for finding widgets at specific screen positions
//!
//! Uses the layouts of the last committed pass. A point hits a widget when it
//! is inside both the widget's rectangle and its clip rect, so content
//! scrolled out of a frame's viewport never receives input. Containment is
//! half-open: a point on a rectangle's right or bottom edge belongs to its
//! neighbour.

use crate::layout::Axis;
use crate::menu::Menu;
use crate::primitives::{Point, Rect};
use crate::widget::WidgetId;

/// Result of a hit test against a widget
#[derive(Debug, Clone, PartialEq)]
pub struct HitTestResult {
    pub widget: WidgetId,
    /// Position relative to the widget's top-left corner
    pub local_pos: Point,
    /// The computed rectangle of the hit widget
    pub rect: Rect,
    /// Number of frames above the widget
    pub depth: usize,
}

/// Hit-test a point against the menu's widget tree
///
/// Returns every widget containing the point, ordered from shallowest to
/// deepest. Where siblings overlap, only the one drawn last is descended
/// into. Hidden and detached widgets are never hit.
pub fn hit_test_point(menu: &Menu, point: Point) -> Vec<HitTestResult> {
    let mut results = Vec::new();
    hit_test_siblings(menu, menu.root_widgets(), point, &mut results);
    results
}

/// Find the deepest widget at a given point
pub fn hit_test_deepest(menu: &Menu, point: Point) -> Option<HitTestResult> {
    hit_test_point(menu, point).pop()
}

/// Test siblings from last to first, stopping at the first hit
fn hit_test_siblings(menu: &Menu, siblings: &[WidgetId], point: Point, results: &mut Vec<HitTestResult>) {
    for &id in siblings.iter().rev() {
        if hit_test_recursive(menu, id, point, results) {
            return;
        }
    }
}

fn hit_test_recursive(menu: &Menu, id: WidgetId, point: Point, results: &mut Vec<HitTestResult>) -> bool {
    // Hidden widgets have no layout
    let Some(computed) = menu.layout(id) else {
        return false;
    };
    if !computed.clip.contains_half_open(point) || !computed.rect.contains_half_open(point) {
        return false;
    }

    let rect = computed.rect;
    results.push(HitTestResult {
        widget: id,
        local_pos: Point::new(point.x - rect.min[0], point.y - rect.min[1]),
        rect,
        depth: computed.depth,
    });

    hit_test_siblings(menu, menu.children(id), point, results);
    true
}

impl Menu {
    /// Innermost widget under `point`
    pub fn hit_test(&self, point: Point) -> Option<WidgetId> {
        hit_test_deepest(self, point).map(|hit| hit.widget)
    }

    /// Scrollbar track under `point`, as the owning frame and the bar's axis
    ///
    /// Frames deeper in the tree win over their ancestors.
    pub fn hit_test_scrollbar(&self, point: Point) -> Option<(WidgetId, Axis)> {
        hit_test_point(self, point).iter().rev().find_map(|hit| {
            [Axis::Y, Axis::X].into_iter().find_map(|axis| {
                self.scrollbar_track(hit.widget, axis)
                    .filter(|track| track.contains_half_open(point))
                    .map(|_| (hit.widget, axis))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameConfig;
    use crate::menu::MenuConfig;
    use crate::widget::{LayoutDefaults, WidgetConfig};
    use glam::Vec2;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Outer frame (scrolls y, 200 visible) holding a spacer and an inner frame
    /// (scrolls y, 100 visible) holding four 50px rows.
    fn nested_menu() -> (Menu, WidgetId, WidgetId, Vec<WidgetId>) {
        let defaults = LayoutDefaults::default().with_scrollbar_thickness(10.0);
        let mut menu = Menu::new(MenuConfig::new(400.0, 400.0, defaults.clone()));

        let outer = menu
            .add_frame(FrameConfig::vertical(300.0, 400.0, &defaults).with_max_height(200.0).with_name("outer"))
            .unwrap();
        menu.pack_widget(WidgetConfig::vertical_spacer(150.0, &defaults).unwrap(), outer).unwrap();
        let inner = menu
            .create_frame(FrameConfig::vertical(200.0, 200.0, &defaults).with_max_height(100.0).with_name("inner"))
            .unwrap();
        menu.pack(inner, outer).unwrap();

        let rows = (0..4)
            .map(|i| {
                let config = WidgetConfig::new(&defaults).with_name(format!("row{i}")).with_size_px(150.0, 50.0);
                menu.pack_widget(config, inner).unwrap()
            })
            .collect();
        (menu, outer, inner, rows)
    }

    #[test]
    fn test_hit_innermost_in_nested_scrolled_frames() {
        init_logger();
        let (mut menu, outer, inner, rows) = nested_menu();

        // Inner frame starts at y=150 in outer content; scroll it fully into view.
        menu.scroll_to(inner).unwrap();
        assert_eq!(menu.scroll_offset(outer).unwrap().y, 50.0);
        menu.set_scroll_offset(inner, Vec2::new(0.0, 75.0)).unwrap();

        // Inner viewport is at screen y 100..200; content y = 75 + (130 - 100) = 105
        let hit = menu.hit_test(Point::new(20.0, 130.0));
        assert_eq!(hit, Some(rows[2]));

        let path: Vec<WidgetId> = hit_test_point(&menu, Point::new(20.0, 130.0))
            .into_iter()
            .map(|hit| hit.widget)
            .collect();
        assert_eq!(path, vec![outer, inner, rows[2]]);
    }

    #[test]
    fn test_clipped_content_is_not_hit() {
        let (menu, outer, _, rows) = nested_menu();
        // Row 2 sits at screen y 250..300 unscrolled, below the outer viewport
        let layout = menu.layout(rows[2]).unwrap();
        assert_eq!(layout.rect.min[1], 250.0);
        assert_eq!(menu.hit_test(Point::new(20.0, 260.0)), None);
        assert_eq!(menu.hit_test(Point::new(20.0, 20.0)), Some(outer));
    }

    #[test]
    fn test_later_sibling_wins() {
        let mut menu = Menu::new(MenuConfig::new(200.0, 200.0, LayoutDefaults::default()));
        let defaults = menu.defaults().clone();
        let a = menu.add_widget(WidgetConfig::new(&defaults).with_size_px(100.0, 100.0)).unwrap();
        let b = menu
            .add_widget(WidgetConfig::new(&defaults).with_size_px(50.0, 50.0).floating_at(Vec2::new(25.0, 25.0)))
            .unwrap();

        assert_eq!(menu.hit_test(Point::new(30.0, 30.0)), Some(b));
        assert_eq!(menu.hit_test(Point::new(90.0, 90.0)), Some(a));

        menu.set_visible(b, false).unwrap();
        assert_eq!(menu.hit_test(Point::new(30.0, 30.0)), Some(a));
    }

    #[test]
    fn test_hit_scrollbar() {
        let (menu, outer, inner, _) = nested_menu();
        // Outer content is 300 wide, its vertical bar spans x 300..310
        assert_eq!(menu.hit_test_scrollbar(Point::new(305.0, 20.0)), Some((outer, Axis::Y)));
        // Inner frame at y 150..250, bar at x 200..210
        assert_eq!(menu.hit_test_scrollbar(Point::new(205.0, 160.0)), Some((inner, Axis::Y)));
        assert_eq!(menu.hit_test_scrollbar(Point::new(50.0, 20.0)), None);
    }

    #[test]
    fn test_viewport_edge_does_not_hit_content_below() {
        let mut menu = Menu::new(MenuConfig::new(400.0, 400.0, LayoutDefaults::default()));
        let defaults = menu.defaults().clone();
        let frame = menu
            .add_frame(FrameConfig::vertical(100.0, 600.0, &defaults).with_max_height(150.0))
            .unwrap();
        let rows: Vec<_> = (0..12)
            .map(|_| menu.pack_widget(WidgetConfig::new(&defaults).with_size_px(80.0, 50.0), frame).unwrap())
            .collect();

        // Row 3 starts exactly on the viewport's bottom edge
        let below = menu.layout(rows[3]).unwrap();
        assert_eq!(below.rect.min[1], 150.0);
        assert_eq!(below.clip.max[1], 150.0);
        assert_eq!(menu.hit_test(Point::new(10.0, 150.0)), None);
        assert_eq!(menu.hit_test(Point::new(10.0, 149.5)), Some(rows[2]));

        // Shared edge between two visible rows belongs to the lower one
        assert_eq!(menu.hit_test(Point::new(10.0, 50.0)), Some(rows[1]));
        assert_eq!(menu.hit_test(Point::new(10.0, 0.0)), Some(rows[0]));
    }
}

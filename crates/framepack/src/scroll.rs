//! Scroll viewport of a frame.
//!
//! A frame whose content is larger than its visible area on an axis gets a
//! scrollbar on that axis. The two axes are independent. All offset updates
//! are clamped to `[0, world - view]`.

use glam::{BVec2, Vec2};

use crate::layout::Axis;
use crate::primitives::Rect;

/// In-progress thumb drag
#[derive(Debug, Clone, Copy, PartialEq)]
struct ThumbDrag {
    axis: Axis,
    start_pointer: f32,
    start_offset: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollViewport {
    /// Axes that have a scrollbar
    enabled: BVec2,
    /// Scrollbar thickness in px
    thickness: f32,
    /// Current offset of the content, (0, 0) shows the content origin
    offset: Vec2,
    /// Packed content extent, updated by each successful layout pass
    world: Vec2,
    /// Visible extent of the content area
    view: Vec2,
    drag: Option<ThumbDrag>,
}

impl ScrollViewport {
    pub fn new(enabled: BVec2, view: Vec2, thickness: f32) -> Self {
        Self {
            enabled,
            thickness,
            offset: Vec2::ZERO,
            world: view,
            view,
            drag: None,
        }
    }

    pub fn is_scrollable(&self, axis: Axis) -> bool {
        self.enabled.test(axis.index())
    }

    pub fn has_scrollbars(&self) -> bool {
        self.enabled.any()
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// Space the scrollbars take next to the visible area, as (width, height)
    pub fn scrollbar_space(&self) -> Vec2 {
        Vec2::new(
            if self.is_scrollable(Axis::Y) { self.thickness } else { 0.0 },
            if self.is_scrollable(Axis::X) { self.thickness } else { 0.0 },
        )
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn world(&self) -> Vec2 {
        self.world
    }

    pub fn view(&self) -> Vec2 {
        self.view
    }

    /// Largest valid offset; zero on axes without a scrollbar
    pub fn max_offset(&self) -> Vec2 {
        let max = (self.world - self.view).max(Vec2::ZERO);
        Vec2::select(self.enabled, max, Vec2::ZERO)
    }

    /// Valid offset range on `axis`
    pub fn range(&self, axis: Axis) -> (f32, f32) {
        (0.0, axis.of(self.max_offset()))
    }

    /// Clamp `offset` into the valid range
    pub fn clamp(&self, offset: Vec2) -> Vec2 {
        offset.clamp(Vec2::ZERO, self.max_offset())
    }

    /// Update content and visible extents, re-clamping the offset
    pub fn set_extent(&mut self, world: Vec2, view: Vec2) {
        self.world = world;
        self.view = view;
        self.offset = self.clamp(self.offset);
    }

    /// Set the offset, returning the clamped value that was applied
    pub fn set_offset(&mut self, offset: Vec2) -> Vec2 {
        self.offset = self.clamp(offset);
        self.offset
    }

    pub fn scroll_by(&mut self, delta: Vec2) -> Vec2 {
        self.set_offset(self.offset + delta)
    }

    /// Offset after the smallest move that brings `target` fully into view.
    ///
    /// `target` is in content coordinates (relative to the unscrolled content
    /// origin). A target larger than the view is aligned to its start edge.
    pub fn offset_to_reveal(&self, target: Rect) -> Vec2 {
        let mut offset = self.offset;
        for axis in [Axis::X, Axis::Y] {
            if !self.is_scrollable(axis) {
                continue;
            }
            let i = axis.index();
            let (start, end) = (target.min[i], target.max[i]);
            let current = axis.of(offset);
            let view = axis.of(self.view);
            let next = if end - start > view || start < current {
                start
            } else if end > current + view {
                end - view
            } else {
                current
            };
            axis.set(&mut offset, next);
        }
        self.clamp(offset)
    }

    /// Scrollbar track on `axis` for a frame whose visible content area is `viewport`
    pub fn track_rect(&self, axis: Axis, viewport: Rect) -> Option<Rect> {
        if !self.is_scrollable(axis) {
            return None;
        }
        Some(match axis {
            Axis::Y => Rect::new(
                [viewport.max[0], viewport.min[1]],
                [viewport.max[0] + self.thickness, viewport.max[1]],
            ),
            Axis::X => Rect::new(
                [viewport.min[0], viewport.max[1]],
                [viewport.max[0], viewport.max[1] + self.thickness],
            ),
        })
    }

    /// Length of the thumb along `axis`, proportional to the visible fraction
    pub fn thumb_length(&self, axis: Axis) -> f32 {
        let track = axis.of(self.view);
        let world = axis.of(self.world);
        if world <= 0.0 {
            return track;
        }
        let min_length = self.thickness.min(track);
        (track * (axis.of(self.view) / world).min(1.0)).max(min_length)
    }

    /// Distance the thumb can travel along its track
    pub fn thumb_travel(&self, axis: Axis) -> f32 {
        (axis.of(self.view) - self.thumb_length(axis)).max(0.0)
    }

    /// Thumb rectangle inside the track of `axis`
    pub fn thumb_rect(&self, axis: Axis, viewport: Rect) -> Option<Rect> {
        let track = self.track_rect(axis, viewport)?;
        let max = axis.of(self.max_offset());
        let fraction = if max > 0.0 { axis.of(self.offset) / max } else { 0.0 };
        let start = self.thumb_travel(axis) * fraction;
        let length = self.thumb_length(axis);
        Some(match axis {
            Axis::Y => Rect::new(
                [track.min[0], track.min[1] + start],
                [track.max[0], track.min[1] + start + length],
            ),
            Axis::X => Rect::new(
                [track.min[0] + start, track.min[1]],
                [track.min[0] + start + length, track.max[1]],
            ),
        })
    }

    /// Start dragging the thumb of `axis` from pointer position `pointer`
    pub fn begin_drag(&mut self, axis: Axis, pointer: Vec2) -> bool {
        if !self.is_scrollable(axis) {
            return false;
        }
        self.drag = Some(ThumbDrag {
            axis,
            start_pointer: axis.of(pointer),
            start_offset: axis.of(self.offset),
        });
        true
    }

    /// Move the dragged thumb to `pointer`; the offset follows proportionally.
    ///
    /// Returns the applied offset, or `None` when no drag is in progress.
    pub fn drag_to(&mut self, pointer: Vec2) -> Option<Vec2> {
        let drag = self.drag?;
        let axis = drag.axis;
        let travel = self.thumb_travel(axis);
        let delta = axis.of(pointer) - drag.start_pointer;
        let scroll_delta = if travel > 0.0 {
            delta / travel * axis.of(self.max_offset())
        } else {
            0.0
        };
        let mut offset = self.offset;
        axis.set(&mut offset, drag.start_offset + scroll_delta);
        Some(self.set_offset(offset))
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical(world: f32, view: f32) -> ScrollViewport {
        let mut scroll = ScrollViewport::new(BVec2::new(false, true), Vec2::new(100.0, view), 10.0);
        scroll.set_extent(Vec2::new(100.0, world), Vec2::new(100.0, view));
        scroll
    }

    #[test]
    fn test_range_and_clamp() {
        let mut scroll = vertical(450.0, 150.0);
        assert_eq!(scroll.range(Axis::Y), (0.0, 300.0));
        assert_eq!(scroll.range(Axis::X), (0.0, 0.0));

        assert_eq!(scroll.set_offset(Vec2::new(50.0, 1000.0)), Vec2::new(0.0, 300.0));
        assert_eq!(scroll.scroll_by(Vec2::new(0.0, -5000.0)), Vec2::ZERO);
    }

    #[test]
    fn test_extent_shrink_reclamps() {
        let mut scroll = vertical(450.0, 150.0);
        scroll.set_offset(Vec2::new(0.0, 300.0));
        scroll.set_extent(Vec2::new(100.0, 200.0), Vec2::new(100.0, 150.0));
        assert_eq!(scroll.offset(), Vec2::new(0.0, 50.0));
    }

    #[test]
    fn test_reveal_minimal_delta() {
        let mut scroll = vertical(450.0, 150.0);

        // below the view: align bottom edges
        let below = Rect::new([0.0, 200.0], [100.0, 250.0]);
        assert_eq!(scroll.offset_to_reveal(below), Vec2::new(0.0, 100.0));

        // already visible: no change
        scroll.set_offset(Vec2::new(0.0, 100.0));
        let visible = Rect::new([0.0, 120.0], [100.0, 200.0]);
        assert_eq!(scroll.offset_to_reveal(visible), Vec2::new(0.0, 100.0));

        // above the view: align top edges
        let above = Rect::new([0.0, 20.0], [100.0, 60.0]);
        assert_eq!(scroll.offset_to_reveal(above), Vec2::new(0.0, 20.0));

        // past the end of content: clamped
        let tail = Rect::new([0.0, 430.0], [100.0, 500.0]);
        assert_eq!(scroll.offset_to_reveal(tail), Vec2::new(0.0, 300.0));
    }

    #[test]
    fn test_thumb_geometry() {
        let mut scroll = vertical(450.0, 150.0);
        let viewport = Rect::new([0.0, 0.0], [100.0, 150.0]);

        assert_eq!(scroll.thumb_length(Axis::Y), 50.0);
        assert_eq!(scroll.thumb_travel(Axis::Y), 100.0);
        assert_eq!(
            scroll.track_rect(Axis::Y, viewport),
            Some(Rect::new([100.0, 0.0], [110.0, 150.0]))
        );
        assert!(scroll.track_rect(Axis::X, viewport).is_none());

        scroll.set_offset(Vec2::new(0.0, 150.0));
        assert_eq!(
            scroll.thumb_rect(Axis::Y, viewport),
            Some(Rect::new([100.0, 50.0], [110.0, 100.0]))
        );
    }

    #[test]
    fn test_drag_is_proportional_and_clamped() {
        let mut scroll = vertical(450.0, 150.0);
        assert!(scroll.begin_drag(Axis::Y, Vec2::new(105.0, 10.0)));

        // 100px of travel maps to 300px of content
        assert_eq!(scroll.drag_to(Vec2::new(105.0, 30.0)), Some(Vec2::new(0.0, 60.0)));
        assert_eq!(scroll.drag_to(Vec2::new(105.0, 500.0)), Some(Vec2::new(0.0, 300.0)));
        assert_eq!(scroll.drag_to(Vec2::new(105.0, -500.0)), Some(Vec2::ZERO));

        scroll.end_drag();
        assert!(!scroll.is_dragging());
        assert_eq!(scroll.drag_to(Vec2::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_disabled_axis_cannot_drag() {
        let mut scroll = vertical(450.0, 150.0);
        assert!(!scroll.begin_drag(Axis::X, Vec2::ZERO));
        assert!(!scroll.is_dragging());
    }
}

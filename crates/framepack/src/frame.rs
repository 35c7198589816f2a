//! Frames and the packing algorithm.
//!
//! A frame lays out its children along one axis in insertion order. Each
//! non-floating child advances a running cursor by its main-axis size plus
//! margin; on the cross axis it is aligned within the frame's extent.
//! Floating children sit at their own offset and never move the cursor.
//!
//! ```text
//!   vertical            horizontal
//!   --------            ----------------
//!   |W1    |            |W1            |
//!   |  W2  |            |   W2     ... |
//!   |    W3|            |      W3      |
//!   --------            ----------------
//! ```

use framepack_macros::WithBuilders;
use glam::{BVec2, Vec2};

use crate::error::{LayoutError, Result};
use crate::layout::{align_offset, Alignment, HorizontalAlign, Margin, Orientation, VerticalAlign};
use crate::primitives::Rect;
use crate::scroll::ScrollViewport;
use crate::widget::{LayoutDefaults, WidgetConfig, WidgetId};

/// Configuration of a new frame.
///
/// `width` and `height` include padding: a 100×200 frame with 25px padding has a
/// 50×150 content area. A `max_width`/`max_height` smaller than the frame size
/// adds a scrollbar on that axis and shows only that much of the content.
#[derive(Clone, Debug, PartialEq, WithBuilders)]
pub struct FrameConfig {
    #[with_builders(skip)]
    pub orientation: Orientation,
    pub width: f32,
    pub height: f32,
    #[with_builders(some)]
    pub max_width: Option<f32>,
    #[with_builders(some)]
    pub max_height: Option<f32>,
    pub scrollbar_thickness: f32,
    pub widget: WidgetConfig,
}

impl FrameConfig {
    pub fn new(orientation: Orientation, width: f32, height: f32, defaults: &LayoutDefaults) -> Self {
        Self {
            orientation,
            width,
            height,
            max_width: None,
            max_height: None,
            scrollbar_thickness: defaults.scrollbar_thickness,
            widget: WidgetConfig::new(defaults).with_selectable(false),
        }
    }

    pub fn horizontal(width: f32, height: f32, defaults: &LayoutDefaults) -> Self {
        Self::new(Orientation::Horizontal, width, height, defaults)
    }

    pub fn vertical(width: f32, height: f32, defaults: &LayoutDefaults) -> Self {
        Self::new(Orientation::Vertical, width, height, defaults)
    }

    /// Set the frame's widget name
    pub fn with_name(mut self, name: impl Into<crate::WidgetName>) -> Self {
        self.widget.name = Some(name.into());
        self
    }

    /// Validate sizes and split the configuration into widget box and frame data
    pub(crate) fn build(self) -> Result<(WidgetConfig, FrameData)> {
        let pad = self.widget.padding.total();
        if !(self.width > pad.x) {
            return Err(LayoutError::InvalidSize(format!(
                "frame width ({}) must be greater than its horizontal padding ({})",
                self.width, pad.x
            )));
        }
        if !(self.height > pad.y) {
            return Err(LayoutError::InvalidSize(format!(
                "frame height ({}) must be greater than its vertical padding ({})",
                self.height, pad.y
            )));
        }

        let content = Vec2::new(self.width, self.height) - pad;
        let mut view = content;
        let mut enabled = BVec2::FALSE;
        for (index, max, full, padding) in [
            (0, self.max_width, self.width, pad.x),
            (1, self.max_height, self.height, pad.y),
        ] {
            let Some(max) = max else { continue };
            if max >= full {
                continue;
            }
            if !(max > padding) {
                return Err(LayoutError::InvalidSize(format!(
                    "frame max size ({max}) must be greater than its padding ({padding})"
                )));
            }
            enabled.set(index, true);
            view[index] = max - padding;
        }

        let mut widget = self.widget;
        widget.size = content;
        let frame = FrameData {
            orientation: self.orientation,
            children: Vec::new(),
            scroll: ScrollViewport::new(enabled, view, self.scrollbar_thickness),
        };
        Ok((widget, frame))
    }
}

/// Container state of a frame widget
#[derive(Debug, Clone)]
pub struct FrameData {
    pub(crate) orientation: Orientation,
    pub(crate) children: Vec<WidgetId>,
    pub(crate) scroll: ScrollViewport,
}

impl FrameData {
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    pub fn scroll(&self) -> &ScrollViewport {
        &self.scroll
    }

    /// Visible content extent given the declared content size
    pub(crate) fn view_size(&self, content: Vec2) -> Vec2 {
        let mut view = content;
        for axis in [crate::Axis::X, crate::Axis::Y] {
            if self.scroll.is_scrollable(axis) {
                axis.set(&mut view, axis.of(self.scroll.view()).min(axis.of(content)));
            }
        }
        view
    }

    /// Border box size of the frame: visible area, scrollbars, padding and border
    pub(crate) fn footprint(&self, config: &WidgetConfig) -> Vec2 {
        self.view_size(config.size)
            + self.scroll.scrollbar_space()
            + config.padding.total()
            + Vec2::splat(2.0 * config.border_width)
    }

    /// Visible content rectangle of a frame placed at `rect`
    pub(crate) fn viewport_in(&self, rect: Rect, config: &WidgetConfig) -> Rect {
        let bars = self.scroll.scrollbar_space();
        let border = config.border_width;
        let pad = config.padding;
        rect.inset(
            border + pad.top,
            border + pad.right + bars.x,
            border + pad.bottom + bars.y,
            border + pad.left,
        )
    }
}

/// One child as seen by the packing algorithm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackItem {
    /// Border box size of the child
    pub size: Vec2,
    pub margin: Margin,
    pub align: HorizontalAlign,
    pub v_align: VerticalAlign,
    /// Own position for floating children
    pub floating: Option<Vec2>,
}

impl PackItem {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            margin: Margin::ZERO,
            align: HorizontalAlign::Left,
            v_align: VerticalAlign::Top,
            floating: None,
        }
    }

    pub(crate) fn from_config(config: &WidgetConfig, size: Vec2) -> Self {
        Self {
            size,
            margin: config.margin,
            align: config.align,
            v_align: config.v_align,
            floating: config.floating.then_some(config.float_offset),
        }
    }

    /// Space the item occupies including its margin
    fn extent(&self) -> Vec2 {
        self.size + self.margin.as_vec2()
    }

    fn cross_alignment(&self, orientation: Orientation) -> Alignment {
        match orientation {
            Orientation::Vertical => self.align.into(),
            Orientation::Horizontal => self.v_align.into(),
        }
    }
}

/// Result of packing a frame's children
#[derive(Debug, Clone, PartialEq)]
pub struct Packing {
    /// Position of each item relative to the content origin, in input order
    pub positions: Vec<Vec2>,
    /// (column, row) of each item in the frame's grid
    pub slots: Vec<(usize, usize)>,
    /// Σ main extents and max cross extent of the non-floating items
    pub content_size: Vec2,
}

/// Packed content size without computing positions
pub fn content_size(orientation: Orientation, items: &[PackItem]) -> Vec2 {
    let (main, cross) = items
        .iter()
        .filter(|item| item.floating.is_none())
        .fold((0.0f32, 0.0f32), |(main, cross), item| {
            let extent = item.extent();
            (main + orientation.main(extent), cross.max(orientation.cross(extent)))
        });
    orientation.compose(main, cross)
}

/// Pack `items` along `orientation` within a cross-axis extent of `cross_extent`.
///
/// Items wider than `cross_extent` are placed at the start edge; detecting that
/// condition is left to the caller via [`Packing::content_size`].
pub fn pack(orientation: Orientation, items: &[PackItem], cross_extent: f32) -> Packing {
    let mut positions = Vec::with_capacity(items.len());
    let mut slots = Vec::with_capacity(items.len());
    let mut cursor = 0.0f32;
    let mut index = 0usize;
    let mut placed_any = false;

    for item in items {
        if let Some(offset) = item.floating {
            positions.push(offset);
            // floating widgets share the slot of the widget before them
            slots.push(slot(orientation, index.saturating_sub(usize::from(placed_any))));
            continue;
        }

        let extent = item.extent();
        let cross = align_offset(
            item.cross_alignment(orientation),
            cross_extent,
            orientation.cross(extent),
        );
        positions.push(orientation.compose(cursor, cross));
        slots.push(slot(orientation, index));
        cursor += orientation.main(extent);
        index += 1;
        placed_any = true;
    }

    Packing {
        positions,
        slots,
        content_size: content_size(orientation, items),
    }
}

fn slot(orientation: Orientation, index: usize) -> (usize, usize) {
    match orientation {
        Orientation::Horizontal => (index, 0),
        Orientation::Vertical => (0, index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(w: f32, h: f32) -> PackItem {
        PackItem::new(Vec2::new(w, h))
    }

    #[test]
    fn test_empty_frame_packs_to_zero() {
        let packing = pack(Orientation::Vertical, &[], 100.0);
        assert!(packing.positions.is_empty());
        assert_eq!(packing.content_size, Vec2::ZERO);
    }

    #[test]
    fn test_horizontal_floating_does_not_advance() {
        let mut b = item(50.0, 10.0);
        b.floating = Some(Vec2::new(7.0, 3.0));
        let items = [item(100.0, 10.0), b, item(80.0, 10.0)];

        let packing = pack(Orientation::Horizontal, &items, 10.0);
        assert_eq!(packing.positions[0], Vec2::new(0.0, 0.0));
        assert_eq!(packing.positions[1], Vec2::new(7.0, 3.0));
        assert_eq!(packing.positions[2], Vec2::new(100.0, 0.0));
        assert_eq!(packing.content_size, Vec2::new(180.0, 10.0));
        assert_eq!(packing.slots, vec![(0, 0), (0, 0), (1, 0)]);
    }

    /// Deterministic pseudo-random items: mixed alignment, some floating,
    /// margins in -4..6
    fn generated_items(seed: u32, len: usize) -> Vec<PackItem> {
        let mut state = seed;
        let mut next = move || {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 8) as f32 / (1u32 << 24) as f32
        };
        (0..len)
            .map(|i| {
                let mut packed = item(1.0 + next() * 80.0, 1.0 + next() * 40.0);
                packed.margin = Margin {
                    x: next() * 10.0 - 4.0,
                    y: next() * 10.0 - 4.0,
                };
                packed.align = [HorizontalAlign::Left, HorizontalAlign::Center, HorizontalAlign::Right][i % 3];
                packed.v_align = [VerticalAlign::Top, VerticalAlign::Center, VerticalAlign::Bottom][i % 3];
                if next() < 0.25 {
                    packed.floating = Some(Vec2::new(next() * 50.0, next() * 50.0));
                }
                packed
            })
            .collect()
    }

    #[test]
    fn test_main_extent_sum_matches_content_size() {
        for seed in 0..64u32 {
            let items = generated_items(seed, (seed % 9) as usize);
            for orientation in [Orientation::Vertical, Orientation::Horizontal] {
                let packing = pack(orientation, &items, 60.0);

                let mut cursor = 0.0f32;
                for (packed, position) in items.iter().zip(&packing.positions) {
                    match packed.floating {
                        Some(offset) => assert_eq!(*position, offset),
                        None => {
                            assert_eq!(orientation.main(*position), cursor);
                            cursor += orientation.main(packed.size + packed.margin.as_vec2());
                        }
                    }
                }
                assert_eq!(orientation.main(packing.content_size).to_bits(), cursor.to_bits());
            }
        }
    }

    #[test]
    fn test_margin_counts_toward_main_extent() {
        let mut items: Vec<PackItem> = [(10.0, 30.0), (20.0, 45.5), (5.0, 12.25)]
            .iter()
            .map(|&(w, h)| item(w, h))
            .collect();
        items[1].margin = Margin { x: 0.0, y: 4.0 };

        let packing = pack(Orientation::Vertical, &items, 40.0);
        assert_eq!(packing.content_size, Vec2::new(20.0, 30.0 + 45.5 + 4.0 + 12.25));
        assert_eq!(packing.positions[2].y, 30.0 + 45.5 + 4.0);
    }

    #[test]
    fn test_cross_alignment() {
        let mut center = item(40.0, 10.0);
        center.align = HorizontalAlign::Center;
        let mut right = item(40.0, 10.0);
        right.align = HorizontalAlign::Right;
        let items = [item(40.0, 10.0), center, right];

        let packing = pack(Orientation::Vertical, &items, 100.0);
        assert_eq!(packing.positions[0].x, 0.0);
        assert_eq!(packing.positions[1].x, 30.0);
        assert_eq!(packing.positions[2].x, 60.0);

        let mut bottom = item(10.0, 20.0);
        bottom.v_align = VerticalAlign::Bottom;
        let packing = pack(Orientation::Horizontal, &[bottom], 50.0);
        assert_eq!(packing.positions[0], Vec2::new(0.0, 30.0));
    }

    #[test]
    fn test_oversized_cross_item_reported_in_content_size() {
        let mut wide = item(150.0, 10.0);
        wide.align = HorizontalAlign::Right;
        let packing = pack(Orientation::Vertical, &[wide], 100.0);
        assert_eq!(packing.positions[0].x, 0.0);
        assert!(packing.content_size.x > 100.0);
    }

    #[test]
    fn test_repacking_is_idempotent() {
        for seed in 0..64u32 {
            let items = generated_items(seed.wrapping_mul(7919), 1 + (seed % 12) as usize);
            for orientation in [Orientation::Vertical, Orientation::Horizontal] {
                let first = pack(orientation, &items, 99.9);
                let second = pack(orientation, &items, 99.9);
                assert_eq!(first.slots, second.slots);
                let bits = |size: Vec2| size.to_array().map(f32::to_bits);
                assert_eq!(bits(first.content_size), bits(second.content_size));
                for (a, b) in first.positions.iter().zip(&second.positions) {
                    assert_eq!(a.x.to_bits(), b.x.to_bits());
                    assert_eq!(a.y.to_bits(), b.y.to_bits());
                }
            }
        }
    }

    #[test]
    fn test_frame_config_build() {
        let defaults = LayoutDefaults::default();
        let config = FrameConfig::vertical(100.0, 200.0, &defaults)
            .with_widget(WidgetConfig::new(&defaults).with_padding(crate::Spacing::all(25.0)));
        let (widget, frame) = config.build().unwrap();
        assert_eq!(widget.size, Vec2::new(50.0, 150.0));
        assert!(!frame.scroll.has_scrollbars());
        assert_eq!(frame.footprint(&widget), Vec2::new(100.0, 200.0));
    }

    #[test]
    fn test_frame_config_rejects_padding_larger_than_size() {
        let defaults = LayoutDefaults::default();
        let config = FrameConfig::vertical(40.0, 200.0, &defaults)
            .with_widget(WidgetConfig::new(&defaults).with_padding(crate::Spacing::all(20.0)));
        assert!(matches!(config.build(), Err(LayoutError::InvalidSize(_))));
    }

    #[test]
    fn test_frame_config_scrollbars() {
        let defaults = LayoutDefaults::default().with_scrollbar_thickness(10.0);
        let (widget, frame) = FrameConfig::vertical(200.0, 300.0, &defaults)
            .with_max_height(150.0)
            .build()
            .unwrap();
        assert!(frame.scroll.is_scrollable(crate::Axis::Y));
        assert!(!frame.scroll.is_scrollable(crate::Axis::X));
        assert_eq!(frame.footprint(&widget), Vec2::new(210.0, 150.0));

        let viewport = frame.viewport_in(Rect::from_min_size([0.0, 0.0], [210.0, 150.0]), &widget);
        assert_eq!(viewport, Rect::new([0.0, 0.0], [200.0, 150.0]));
    }
}

//! Intrinsic content measurement for label-like widgets.
//!
//! Text shaping lives outside this crate. Hosts implement [`ContentMeasurer`]
//! with whatever font engine they render with, and the menu uses it to size
//! labels before packing.

use glam::Vec2;

/// Request to measure the intrinsic size of a piece of text.
#[derive(Debug, Clone)]
pub struct MeasureTextRequest<'a> {
    pub text: &'a str,
    pub font_size: f32,
}

impl<'a> MeasureTextRequest<'a> {
    pub fn new(text: &'a str, font_size: f32) -> Self {
        Self { text, font_size }
    }
}

/// Intrinsic size measurement result.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntrinsicSize {
    pub width: f32,
    pub height: f32,
}

impl IntrinsicSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Backend-agnostic content measurement.
///
/// Should return the tight bounding box of the shaped text, excluding padding
/// and margins (those are handled by layout).
pub trait ContentMeasurer {
    fn measure_text(&mut self, request: MeasureTextRequest<'_>) -> IntrinsicSize;
}

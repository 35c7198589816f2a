use std::fmt;

use glam::Vec2;

use crate::error::{LayoutError, Result};
use crate::primitives::Rect;

/// Packing direction of a frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Children are packed left to right
    Horizontal,
    /// Children are packed top to bottom
    #[default]
    Vertical,
}

impl Orientation {
    /// Axis children advance along
    pub const fn main_axis(self) -> Axis {
        match self {
            Orientation::Horizontal => Axis::X,
            Orientation::Vertical => Axis::Y,
        }
    }

    /// Axis perpendicular to the packing direction
    pub const fn cross_axis(self) -> Axis {
        self.main_axis().other()
    }

    /// Component of `v` along the main axis
    pub fn main(self, v: Vec2) -> f32 {
        self.main_axis().of(v)
    }

    /// Component of `v` along the cross axis
    pub fn cross(self, v: Vec2) -> f32 {
        self.cross_axis().of(v)
    }

    /// Build a vector from main and cross components
    pub fn compose(self, main: f32, cross: f32) -> Vec2 {
        match self {
            Orientation::Horizontal => Vec2::new(main, cross),
            Orientation::Vertical => Vec2::new(cross, main),
        }
    }
}

/// A screen axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    pub fn set(self, v: &mut Vec2, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Horizontal alignment of a widget inside a vertical frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical alignment of a widget inside a horizontal frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Position of an item of `size` within `extent` for a start/center/end alignment
pub(crate) fn align_offset(alignment: Alignment, extent: f32, size: f32) -> f32 {
    let free = (extent - size).max(0.0);
    match alignment {
        Alignment::Start => 0.0,
        Alignment::Center => free / 2.0,
        Alignment::End => free,
    }
}

/// Axis-independent alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Alignment {
    Start,
    Center,
    End,
}

impl From<HorizontalAlign> for Alignment {
    fn from(align: HorizontalAlign) -> Self {
        match align {
            HorizontalAlign::Left => Alignment::Start,
            HorizontalAlign::Center => Alignment::Center,
            HorizontalAlign::Right => Alignment::End,
        }
    }
}

impl From<VerticalAlign> for Alignment {
    fn from(align: VerticalAlign) -> Self {
        match align {
            VerticalAlign::Top => Alignment::Start,
            VerticalAlign::Center => Alignment::Center,
            VerticalAlign::Bottom => Alignment::End,
        }
    }
}

/// Padding inside a widget, CSS order
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spacing {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Spacing {
    pub const ZERO: Self = Self::all(0.0);

    /// Create spacing with all sides equal
    pub const fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create spacing with symmetric horizontal and vertical values (CSS-style)
    ///
    /// ```
    /// # use framepack::Spacing;
    /// let spacing = Spacing::symmetric(10.0, 20.0);
    /// assert_eq!(spacing.left, 10.0);
    /// assert_eq!(spacing.right, 10.0);
    /// assert_eq!(spacing.top, 20.0);
    /// assert_eq!(spacing.bottom, 20.0);
    /// ```
    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub const fn trbl(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Expand a CSS padding shorthand of 1 to 4 values into (top, right, bottom, left).
    ///
    /// - 1 value: all sides
    /// - 2 values: vertical, horizontal
    /// - 3 values: top, horizontal, bottom
    /// - 4 values: top, right, bottom, left
    ///
    /// ```
    /// # use framepack::Spacing;
    /// let spacing = Spacing::from_shorthand(&[1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(spacing, Spacing::trbl(1.0, 2.0, 3.0, 2.0));
    /// assert!(Spacing::from_shorthand(&[-1.0]).is_err());
    /// ```
    pub fn from_shorthand(values: &[f32]) -> Result<Self> {
        if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(LayoutError::InvalidSpacing(format!(
                "padding components must be finite and non-negative, got {bad}"
            )));
        }
        match *values {
            [all] => Ok(Self::all(all)),
            [v, h] => Ok(Self::trbl(v, h, v, h)),
            [top, h, bottom] => Ok(Self::trbl(top, h, bottom, h)),
            [top, right, bottom, left] => Ok(Self::trbl(top, right, bottom, left)),
            _ => Err(LayoutError::InvalidSpacing(format!(
                "padding takes 1 to 4 values, got {}",
                values.len()
            ))),
        }
    }

    pub fn get_vertical(&self) -> f32 {
        self.top + self.bottom
    }

    pub fn get_horizontal(&self) -> f32 {
        self.right + self.left
    }

    /// Total padding as (horizontal, vertical)
    pub fn total(&self) -> Vec2 {
        Vec2::new(self.get_horizontal(), self.get_vertical())
    }
}

/// Space a widget reserves after itself, per axis
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
    pub x: f32,
    pub y: f32,
}

impl Margin {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(LayoutError::InvalidSpacing(format!(
                "margin must be finite, got ({x}, {y})"
            )));
        }
        Ok(Self { x, y })
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Computed layout information after a successful solver pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComputedLayout {
    /// Absolute position in screen coordinates (border box)
    pub rect: Rect,
    /// Intersection of all ancestor viewports; the renderer must clip to it
    pub clip: Rect,
    /// Column within the parent's grid
    pub column: usize,
    /// Row within the parent's grid
    pub row: usize,
    /// Number of ancestor frames
    pub depth: usize,
}

impl ComputedLayout {
    /// Whether any part of the widget survives clipping
    pub fn is_visible_in_clip(&self) -> bool {
        self.rect.intersect(&self.clip).is_some_and(|r| r.width() > 0.0 && r.height() > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_shorthand() {
        assert_eq!(Spacing::from_shorthand(&[4.0]).unwrap(), Spacing::all(4.0));
        assert_eq!(
            Spacing::from_shorthand(&[1.0, 2.0]).unwrap(),
            Spacing::trbl(1.0, 2.0, 1.0, 2.0)
        );
        assert_eq!(
            Spacing::from_shorthand(&[1.0, 2.0, 3.0]).unwrap(),
            Spacing::trbl(1.0, 2.0, 3.0, 2.0)
        );
        assert_eq!(
            Spacing::from_shorthand(&[1.0, 2.0, 3.0, 4.0]).unwrap(),
            Spacing::trbl(1.0, 2.0, 3.0, 4.0)
        );
    }

    #[test]
    fn test_padding_rejects_bad_input() {
        assert!(Spacing::from_shorthand(&[]).is_err());
        assert!(Spacing::from_shorthand(&[1.0, 2.0, 3.0, 4.0, 5.0]).is_err());
        assert!(Spacing::from_shorthand(&[1.0, -2.0]).is_err());
        assert!(Spacing::from_shorthand(&[f32::NAN]).is_err());
    }

    #[test]
    fn test_margin_validation() {
        assert!(Margin::new(-5.0, 3.0).is_ok());
        assert!(Margin::new(f32::INFINITY, 0.0).is_err());
    }

    #[test]
    fn test_orientation_axes() {
        let v = Vec2::new(3.0, 7.0);
        assert_eq!(Orientation::Horizontal.main(v), 3.0);
        assert_eq!(Orientation::Horizontal.cross(v), 7.0);
        assert_eq!(Orientation::Vertical.main(v), 7.0);
        assert_eq!(Orientation::Vertical.compose(1.0, 2.0), Vec2::new(2.0, 1.0));
    }

    #[test]
    fn test_align_offset() {
        assert_eq!(align_offset(Alignment::Start, 100.0, 40.0), 0.0);
        assert_eq!(align_offset(Alignment::Center, 100.0, 40.0), 30.0);
        assert_eq!(align_offset(Alignment::End, 100.0, 40.0), 60.0);
        // oversized items stick to the start edge
        assert_eq!(align_offset(Alignment::End, 100.0, 140.0), 0.0);
    }
}

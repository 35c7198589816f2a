//! # framepack
//!
//! Backend agnostic frame packing engine for widget menus.
//!
//! This crate computes where every widget of a menu goes. It owns no renderer
//! and no font engine: hosts draw the rectangles it produces and supply text
//! measurement through [`ContentMeasurer`].
//!
//! ## Core Types
//!
//! - [`Menu`] - Arena-owned widget tree and its transactional mutation API
//! - [`WidgetConfig`] / [`FrameConfig`] - Box model of leaves and containers
//! - [`LayoutDefaults`] - Explicit defaults threaded into widget creation
//!
//! ## Layout
//!
//! - [`pack`] - One-axis packing of a frame's children
//! - [`ScrollViewport`] - Clamped scroll offsets and scrollbar geometry
//! - [`ComputedLayout`] - Absolute rectangle and clip of a rendered widget
//!
//! ## Input
//!
//! - [`hit_test_point`] - Widgets under a point, shallow to deep
//! - [`Menu::select_next`] - Selection traversal with scroll-into-view
//!
//! ## Errors
//!
//! Every mutation returns [`Result`]; on error the menu is left unchanged.
//! See [`LayoutError`].

mod debug;
mod error;
mod frame;
mod hit_test;
mod layout;
mod measure;
mod menu;
mod primitives;
mod scroll;
mod selection;
mod solver;
mod widget;

pub use debug::*;
pub use error::*;
pub use frame::*;
pub use hit_test::*;
pub use layout::*;
pub use measure::*;
pub use menu::*;
pub use primitives::*;
pub use scroll::*;
pub use widget::*;

pub use framepack_macros::WithBuilders;

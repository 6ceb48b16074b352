//! Pure geometry data for Maestro
//!
//! This crate contains the value types shared by every other Maestro crate:
//! points, sizes and frames, the immutable [`GeometrySnapshot`] a host hands
//! over after a layout pass, and the alignment / frame behaviour vocabulary
//! the read modifiers use when they ask the host for a frame.

mod alignment;
mod frame;
mod geometry;
mod snapshot;

pub use alignment::*;
pub use frame::*;
pub use geometry::*;
pub use snapshot::*;

pub mod prelude {
    pub use crate::alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
    pub use crate::frame::{FrameBehavior, FrameRequest};
    pub use crate::geometry::{Axis, Point, Rect, Size};
    pub use crate::snapshot::{CoordinateSpace, GeometryError, GeometrySnapshot};
}

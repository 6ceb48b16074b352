//! Immutable geometry snapshots reported by the host after layout.

use crate::{Rect, Size};
use std::fmt;

/// Coordinate space a frame is expressed in.
///
/// The host decides which spaces it can resolve; asking for one it does not
/// know yields no frame rather than a guess.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum CoordinateSpace {
    /// The view's own bounds, origin at its top-left corner.
    #[default]
    Local,
    /// The root of the host's view tree.
    Global,
    /// A space the host registered under a name.
    Named(String),
}

impl CoordinateSpace {
    pub fn named(name: impl Into<String>) -> Self {
        CoordinateSpace::Named(name.into())
    }
}

/// Rejected host measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeometryError {
    NegativeExtent { width: f32, height: f32 },
    NonFinite { width: f32, height: f32 },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::NegativeExtent { width, height } => {
                write!(f, "negative extent in measured size {width}x{height}")
            }
            GeometryError::NonFinite { width, height } => {
                write!(f, "non-finite extent in measured size {width}x{height}")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// A view's measured size and, when the host resolved one, its frame.
///
/// Snapshots are values: a new measurement produces a new snapshot. Equality
/// is exact on every field, so two measurements only differ when the host
/// actually reported different numbers.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GeometrySnapshot {
    size: Size,
    frame: Option<Rect>,
}

impl GeometrySnapshot {
    /// Validates `size` and wraps it without a frame.
    pub fn new(size: Size) -> Result<Self, GeometryError> {
        if !size.is_finite() {
            return Err(GeometryError::NonFinite {
                width: size.width,
                height: size.height,
            });
        }
        if size.width < 0.0 || size.height < 0.0 {
            return Err(GeometryError::NegativeExtent {
                width: size.width,
                height: size.height,
            });
        }
        Ok(Self { size, frame: None })
    }

    pub const fn zero() -> Self {
        Self {
            size: Size::ZERO,
            frame: None,
        }
    }

    /// Returns a snapshot carrying `frame` in addition to the size.
    pub fn with_frame(self, frame: Rect) -> Self {
        Self {
            frame: Some(frame),
            ..self
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn frame(&self) -> Option<Rect> {
        self.frame
    }

    pub fn min_x(&self) -> f32 {
        self.frame.map(|frame| frame.min_x()).unwrap_or(0.0)
    }

    pub fn mid_x(&self) -> f32 {
        self.frame.map(|frame| frame.mid_x()).unwrap_or(0.0)
    }

    pub fn max_x(&self) -> f32 {
        self.frame.map(|frame| frame.max_x()).unwrap_or(0.0)
    }

    pub fn min_y(&self) -> f32 {
        self.frame.map(|frame| frame.min_y()).unwrap_or(0.0)
    }

    pub fn mid_y(&self) -> f32 {
        self.frame.map(|frame| frame.mid_y()).unwrap_or(0.0)
    }

    pub fn max_y(&self) -> f32 {
        self.frame.map(|frame| frame.max_y()).unwrap_or(0.0)
    }
}

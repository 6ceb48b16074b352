//! Geometry-aware view decorations for Maestro hosts.
//!
//! Hosts render views decorated with a [`Modifier`] chain. The chain reads
//! resolved geometry into observable state ([`Modifier::read_size`],
//! [`Modifier::measure`] and friends) and keeps groups of views at a shared
//! size ([`Modifier::equal_widths`], [`Modifier::equal_heights`],
//! [`Modifier::equal_size`]).

mod host;
mod measuring_shape;
pub mod modifier;
mod participant;

pub use host::{GeometryProxy, LayoutPass, MeasuredGeometry};
pub use measuring_shape::MeasuringShape;
pub use modifier::{GeometryElement, GeometrySource, Modifier, SizeOverride};
pub use participant::{EqualSizeParticipant, ParticipantPhase};

pub use maestro_core::{
    mutable_state_of, Dimension, Extent, GeometryObserver, GroupKey, MutableState, Runtime,
    RuntimeHandle, SizeRegistry,
};
pub use maestro_geometry::{
    Alignment, CoordinateSpace, FrameBehavior, FrameRequest, GeometryError, GeometrySnapshot,
    Point, Rect, Size,
};

pub mod prelude {
    pub use crate::host::{GeometryProxy, LayoutPass, MeasuredGeometry};
    pub use crate::modifier::Modifier;
    pub use crate::participant::EqualSizeParticipant;
    pub use maestro_core::prelude::*;
    pub use maestro_geometry::prelude::*;
}

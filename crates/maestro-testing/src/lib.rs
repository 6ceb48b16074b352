//! Testing utilities and headless host for Maestro

pub mod assertions;
pub mod host;

pub use assertions::*;
pub use host::{HostError, TestHost, ViewId, DEFAULT_MAX_PASSES, ROW_SPACE};

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::host::{HostError, TestHost, ViewId, DEFAULT_MAX_PASSES, ROW_SPACE};
    pub use maestro_ui::prelude::*;
}

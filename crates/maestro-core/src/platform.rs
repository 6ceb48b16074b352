//! Platform abstraction for Maestro runtime services.
//!
//! The runtime never drives frames itself. When deferred work is queued it
//! asks the host, through [`RuntimeScheduler`], to run another render pass so
//! the work gets a commit to run after.

/// Requests render passes from the host.
///
/// Implementations must be safe to share across threads even though the
/// runtime itself is confined to the UI thread; hosts commonly forward the
/// request to an event loop proxy.
pub trait RuntimeScheduler: Send + Sync {
    /// Ask the host to schedule a new frame.
    fn schedule_frame(&self);
}

/// Scheduler for hosts that poll [`Runtime::needs_frame`](crate::Runtime::needs_frame).
#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

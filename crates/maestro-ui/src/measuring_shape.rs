//! Measurement without host geometry callbacks.
//!
//! A [`MeasuringShape`] is an invisible shape the host asks for its outline
//! while rendering. Writing state at that point would mutate what is being
//! rendered, so the shape hands the rect's size on only after the current
//! render pass has been committed. When the delivered size changes what the
//! host renders, the shape asks the runtime for another frame.

use maestro_core::{MutableState, RuntimeHandle};
use maestro_geometry::{Rect, Size};
use std::fmt;
use std::rc::Rc;

#[derive(Clone)]
pub struct MeasuringShape {
    sink: Rc<dyn Fn(Size) -> bool>,
}

impl MeasuringShape {
    /// Shape that writes the measured size into `binding`.
    pub fn new(binding: MutableState<Size>) -> Self {
        Self::with_sink(move |size| binding.set(size))
    }

    /// Shape that hands each size to `sink`. The sink returns `true` when the
    /// size changed something the host renders.
    pub fn with_sink(sink: impl Fn(Size) -> bool + 'static) -> Self {
        Self {
            sink: Rc::new(sink),
        }
    }

    /// Outline of the shape inside `rect`.
    ///
    /// The size of `rect` is delivered one turn after the commit of the
    /// current pass, never synchronously.
    pub fn path(&self, rect: Rect, runtime: &RuntimeHandle) -> Rect {
        let sink = Rc::clone(&self.sink);
        let size = rect.size();
        let handle = runtime.clone();
        runtime.defer_until_commit(move || {
            if sink(size) {
                handle.schedule();
            }
        });
        rect
    }
}

impl fmt::Debug for MeasuringShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeasuringShape").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maestro_core::{mutable_state_of, Runtime, RuntimeScheduler};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingScheduler {
        frames: AtomicUsize,
    }

    impl RuntimeScheduler for CountingScheduler {
        fn schedule_frame(&self) {
            self.frames.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn size_is_written_after_the_pass_commits() {
        let runtime = Runtime::default();
        let binding = mutable_state_of(Size::ZERO);
        let shape = MeasuringShape::new(binding.clone());

        {
            let _pass = runtime.begin_pass();
            let outline = shape.path(Rect::new(0.0, 0.0, 30.0, 12.0), &runtime.handle());
            assert_eq!(outline, Rect::new(0.0, 0.0, 30.0, 12.0));
            assert_eq!(binding.get(), Size::ZERO);
        }

        assert_eq!(binding.get(), Size::new(30.0, 12.0));
        assert!(!runtime.has_pending());
    }

    #[test]
    fn write_waits_for_the_next_commit_outside_a_pass() {
        let runtime = Runtime::default();
        let binding = mutable_state_of(Size::ZERO);
        MeasuringShape::new(binding.clone()).path(Rect::new(0.0, 0.0, 5.0, 5.0), &runtime.handle());

        assert!(runtime.needs_frame());
        assert_eq!(binding.get(), Size::ZERO);
        assert!(runtime.handle().drain_deferred());
        assert_eq!(binding.get(), Size::new(5.0, 5.0));
    }

    #[test]
    fn only_a_changed_size_asks_for_another_frame() {
        let scheduler = Arc::new(CountingScheduler::default());
        let runtime = Runtime::new(scheduler.clone());
        let binding = mutable_state_of(Size::ZERO);
        let shape = MeasuringShape::new(binding.clone());
        let rect = Rect::new(0.0, 0.0, 20.0, 8.0);

        let mut frames = Vec::new();
        for _ in 0..4 {
            {
                let _pass = runtime.begin_pass();
                shape.path(rect, &runtime.handle());
            }
            frames.push(scheduler.frames.load(Ordering::SeqCst));
        }

        assert_eq!(frames, vec![1, 1, 1, 1]);
        assert_eq!(binding.get(), Size::new(20.0, 8.0));
        assert_eq!(binding.write_count(), 1);
        assert!(!runtime.needs_frame());
    }
}

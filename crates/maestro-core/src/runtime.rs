use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::thread::ThreadId;

use crate::platform::{DefaultScheduler, RuntimeScheduler};

type DeferredTask = Box<dyn FnOnce() + 'static>;

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    deferred: RefCell<VecDeque<DeferredTask>>,
    pass_depth: Cell<usize>,
    commits: Cell<u64>,
    ui_thread_id: ThreadId,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            deferred: RefCell::new(VecDeque::new()),
            pass_depth: Cell::new(0),
            commits: Cell::new(0),
            ui_thread_id: std::thread::current().id(),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    /// Queues a closure that runs on the UI thread after the next commit.
    ///
    /// The closure may capture `Rc`/`RefCell` values because it never leaves
    /// the runtime thread. Work queued inside a pass runs at that pass's
    /// commit, so only work queued outside a pass asks for a frame.
    fn defer(&self, task: DeferredTask) {
        self.assert_ui_thread();
        self.deferred.borrow_mut().push_back(task);
        if !self.in_pass() {
            self.schedule();
        }
    }

    fn in_pass(&self) -> bool {
        self.pass_depth.get() > 0
    }

    fn begin_pass(&self) {
        self.assert_ui_thread();
        self.pass_depth.set(self.pass_depth.get() + 1);
    }

    fn end_pass(&self) {
        let depth = self.pass_depth.get();
        debug_assert!(depth > 0, "render pass depth underflowed");
        self.pass_depth.set(depth.saturating_sub(1));
        if depth == 1 {
            self.commit();
        }
    }

    fn commit(&self) {
        // Only the work queued before this commit runs now. Anything queued by
        // that work waits for the following commit.
        let batch: Vec<DeferredTask> = self.deferred.borrow_mut().drain(..).collect();
        self.needs_frame.set(false);
        let commit = self.commits.get() + 1;
        self.commits.set(commit);
        if !batch.is_empty() {
            log::trace!("commit {commit}: running {} deferred task(s)", batch.len());
        }
        for task in batch {
            task();
        }
    }

    fn has_pending(&self) -> bool {
        self.deferred
            .try_borrow()
            .map(|tasks| !tasks.is_empty())
            .unwrap_or(true)
    }

    fn assert_ui_thread(&self) {
        debug_assert_eq!(
            std::thread::current().id(),
            self.ui_thread_id,
            "runtime used off its UI thread"
        );
    }
}

/// Deferred-execution runtime driven by the host's render passes.
///
/// The host brackets every render pass with [`Runtime::begin_pass`]; when the
/// returned guard drops the pass is committed and work deferred before the
/// commit runs. This is the only place where observable state may be written
/// on behalf of code that ran during rendering.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Marks the start of a render pass. Dropping the guard commits it.
    pub fn begin_pass(&self) -> PassGuard {
        self.inner.begin_pass();
        PassGuard {
            inner: Rc::clone(&self.inner),
        }
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn has_pending(&self) -> bool {
        self.inner.has_pending()
    }

    /// Number of commits so far.
    pub fn commit_count(&self) -> u64 {
        self.inner.commits.get()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(Arc::new(DefaultScheduler))
    }
}

/// Guard returned by [`Runtime::begin_pass`].
#[must_use = "PassGuard commits the render pass on drop"]
pub struct PassGuard {
    inner: Rc<RuntimeInner>,
}

impl Drop for PassGuard {
    fn drop(&mut self) {
        self.inner.end_pass();
    }
}

/// Weak handle to a [`Runtime`], cheap to clone into modifiers.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    /// Runs `task` once the current render pass has been committed.
    ///
    /// Outside a pass the task waits for the next commit. If the runtime is
    /// gone no pass can be in progress, so the task runs immediately.
    pub fn defer_until_commit(&self, task: impl FnOnce() + 'static) {
        if let Some(inner) = self.inner.upgrade() {
            inner.defer(Box::new(task));
        } else {
            task();
        }
    }

    /// Commits pending deferred work when no pass is in progress.
    ///
    /// Hosts without explicit pass boundaries call this at the end of each
    /// frame. Returns `false` when a pass is still open and nothing ran.
    pub fn drain_deferred(&self) -> bool {
        match self.inner.upgrade() {
            Some(inner) if inner.in_pass() => {
                log::debug!("drain_deferred called inside a render pass; ignoring");
                false
            }
            Some(inner) => {
                inner.commit();
                true
            }
            None => false,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_pending())
            .unwrap_or(false)
    }

    pub fn is_in_pass(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.in_pass())
            .unwrap_or(false)
    }

    /// Asks the host for another frame.
    ///
    /// Deferred work calls this when it changed something the host renders.
    pub fn schedule(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.schedule();
        }
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

pub type Task = Box<dyn FnOnce()>;

/// Single-threaded timer queue. Callbacks run to completion one at a time.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle;
}

/// Cancellation handle for a scheduled task. A cancelled task never runs.
#[derive(Debug, Clone, Default)]
pub struct TaskHandle {
    cancelled: Rc<Cell<bool>>,
    abort: Option<Rc<tokio::task::AbortHandle>>,
}

impl TaskHandle {
    fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
        if let Some(abort) = &self.abort {
            abort.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

struct Scheduled {
    handle: TaskHandle,
    task: Task,
}

#[derive(Default)]
struct TimerQueue {
    now: Duration,
    next_seq: u64,
    tasks: BTreeMap<(Duration, u64), Scheduled>,
}

/// Deterministic scheduler driven by a virtual clock.
///
/// Nothing runs until [`ManualScheduler::advance`] or
/// [`ManualScheduler::run_until_idle`] is called. Tasks due at the same
/// instant run in the order they were scheduled, and tasks scheduled while
/// advancing run in the same call when they fall due inside the window.
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<TimerQueue>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since construction.
    pub fn now(&self) -> Duration {
        self.queue.borrow().now
    }

    /// Number of scheduled tasks that have not been cancelled.
    pub fn pending(&self) -> usize {
        self.queue
            .borrow()
            .tasks
            .values()
            .filter(|scheduled| !scheduled.handle.is_cancelled())
            .count()
    }

    /// Moves the clock forward by `by`, running every task that falls due.
    /// Returns the number of tasks that ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut ran = 0;
        while let Some(scheduled) = self.pop_due(target) {
            if !scheduled.handle.is_cancelled() {
                (scheduled.task)();
                ran += 1;
            }
        }
        self.queue.borrow_mut().now = target;
        ran
    }

    /// Runs tasks until none remain, jumping the clock to each deadline.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.queue.borrow().tasks.keys().next().map(|(at, _)| *at);
            let Some(at) = next else {
                return ran;
            };
            let now = self.now();
            ran += self.advance(at.saturating_sub(now));
        }
    }

    fn pop_due(&self, target: Duration) -> Option<Scheduled> {
        let mut queue = self.queue.borrow_mut();
        let key = *queue.tasks.keys().next()?;
        if key.0 > target {
            return None;
        }
        queue.now = key.0;
        queue.tasks.remove(&key)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let handle = TaskHandle::new();
        let mut queue = self.queue.borrow_mut();
        let key = (queue.now + delay, queue.next_seq);
        queue.next_seq += 1;
        queue.tasks.insert(
            key,
            Scheduled {
                handle: handle.clone(),
                task,
            },
        );
        handle
    }
}

/// Scheduler backed by tokio timers on the current thread.
///
/// Tasks are spawned with [`tokio::task::spawn_local`], so every call must
/// happen inside a [`tokio::task::LocalSet`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let cancelled = Rc::new(Cell::new(false));
        let flag = cancelled.clone();
        let join = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            if !flag.get() {
                task();
            }
        });

        TaskHandle {
            cancelled,
            abort: Some(Rc::new(join.abort_handle())),
        }
    }
}

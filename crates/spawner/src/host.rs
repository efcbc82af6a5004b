use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

/// A repeating job registered with a scheduling host.
pub type Job = Box<dyn FnMut() + Send>;

/// Capability for running repeating jobs.
///
/// The first fire happens immediately (delay zero); later fires follow at
/// the given interval. After `cancel` returns, the job fires no more.
/// A job is never run concurrently with itself.
pub trait SchedulingHost {
    type Handle;

    fn run_periodic(&mut self, interval: Duration, job: Job) -> Self::Handle;

    fn cancel(&mut self, handle: Self::Handle);
}

/// Fake-clock host: registered jobs fire only when the caller says so.
///
/// Drives the scheduler tests and the CLI demo without real timers.
pub struct ManualHost {
    jobs: Vec<Slot>,
    next_id: u64,
    cancelled: usize,
}

struct Slot {
    id: u64,
    interval: Duration,
    job: Job,
}

/// Handle to a job registered with a [`ManualHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualHandle(u64);

impl ManualHost {
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            next_id: 0,
            cancelled: 0,
        }
    }

    /// Fire every live job once, in registration order.
    pub fn fire_all(&mut self) {
        for slot in &mut self.jobs {
            (slot.job)();
        }
    }

    /// Number of live (not cancelled) jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Number of jobs cancelled so far.
    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }

    /// Intervals of the live jobs, in registration order.
    pub fn intervals(&self) -> Vec<Duration> {
        self.jobs.iter().map(|slot| slot.interval).collect()
    }
}

impl Default for ManualHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulingHost for ManualHost {
    type Handle = ManualHandle;

    fn run_periodic(&mut self, interval: Duration, job: Job) -> ManualHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.jobs.push(Slot { id, interval, job });
        ManualHandle(id)
    }

    fn cancel(&mut self, handle: ManualHandle) {
        let before = self.jobs.len();
        self.jobs.retain(|slot| slot.id != handle.0);
        self.cancelled += before - self.jobs.len();
    }
}

/// Host backed by one background thread per job.
///
/// The job runs immediately, then after each interval; the sleep-after-run
/// loop means a job can never overlap itself. Cancellation signals the
/// thread and joins it.
pub struct ThreadHost;

/// Handle to a job running on a [`ThreadHost`] thread.
pub struct ThreadHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl SchedulingHost for ThreadHost {
    type Handle = ThreadHandle;

    fn run_periodic(&mut self, interval: Duration, mut job: Job) -> ThreadHandle {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let thread = std::thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                job();
                // Sleep in short steps so cancellation stays prompt even
                // for long intervals.
                let mut remaining = interval;
                while !flag.load(Ordering::Relaxed) && remaining > Duration::ZERO {
                    let step = remaining.min(Duration::from_millis(50));
                    std::thread::sleep(step);
                    remaining = remaining.saturating_sub(step);
                }
            }
        });
        ThreadHandle {
            stop,
            thread: Some(thread),
        }
    }

    fn cancel(&mut self, mut handle: ThreadHandle) {
        handle.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = handle.thread.take() {
            let _ = thread.join();
        }
    }
}

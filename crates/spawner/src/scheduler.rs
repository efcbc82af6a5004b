use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use hoard_config::HoardConfig;
use hoard_world::WorldQuery;

use crate::cycle::spawn_cycle;
use crate::host::SchedulingHost;

/// Run state of the scheduler. Mutated only by explicit start/stop
/// requests; the tick job merely observes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// Outcome of a start request. Starting twice is a no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
}

/// Outcome of a stop request. Stopping twice is a no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    NotRunning,
}

/// State shared between the scheduler facade and its tick job: the run
/// flag and the active configuration snapshot, guarded together by one
/// mutex and never updated independently.
struct Control {
    state: Mutex<ControlState>,
}

struct ControlState {
    run: RunState,
    config: Option<Arc<HoardConfig>>,
}

impl Control {
    fn new() -> Self {
        Self {
            state: Mutex::new(ControlState {
                run: RunState::Stopped,
                config: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControlState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_running(&self) -> bool {
        self.lock().run == RunState::Running
    }

    /// Configuration snapshot for the tick that is about to run, or `None`
    /// once a stop has been observed.
    fn snapshot(&self) -> Option<Arc<HoardConfig>> {
        let state = self.lock();
        if state.run == RunState::Running {
            state.config.clone()
        } else {
            None
        }
    }
}

/// The hoard scheduler: owns the run state and the periodic timer, and
/// fans each tick out over all active participants.
pub struct Hoard<W, H: SchedulingHost> {
    world: Arc<W>,
    host: H,
    control: Arc<Control>,
    timer: Option<H::Handle>,
}

impl<W, H> Hoard<W, H>
where
    W: WorldQuery + Send + Sync + 'static,
    H: SchedulingHost,
{
    pub fn new(world: Arc<W>, host: H) -> Self {
        Self {
            world,
            host,
            control: Arc::new(Control::new()),
            timer: None,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.control.lock().run
    }

    /// Begin periodic spawning with the given configuration. The first
    /// tick fires immediately, later ticks at the configured interval.
    pub fn start(&mut self, config: HoardConfig) -> StartOutcome {
        let interval = config.interval();
        {
            let mut state = self.control.lock();
            if state.run == RunState::Running {
                tracing::warn!("hoard is already running");
                return StartOutcome::AlreadyRunning;
            }
            state.run = RunState::Running;
            state.config = Some(Arc::new(config));
        }

        let control = Arc::clone(&self.control);
        let world = Arc::clone(&self.world);
        let mut rng = StdRng::from_entropy();
        let handle = self.host.run_periodic(
            interval,
            Box::new(move || run_tick(&control, world.as_ref(), &mut rng)),
        );
        self.timer = Some(handle);

        tracing::info!(interval_secs = interval.as_secs(), "hoard spawning started");
        StartOutcome::Started
    }

    /// Stop periodic spawning. A tick already in flight aborts before its
    /// next placement.
    pub fn stop(&mut self) -> StopOutcome {
        {
            let mut state = self.control.lock();
            if state.run == RunState::Stopped {
                tracing::warn!("hoard is not running");
                return StopOutcome::NotRunning;
            }
            state.run = RunState::Stopped;
        }
        if let Some(handle) = self.timer.take() {
            self.host.cancel(handle);
        }
        tracing::info!("hoard spawning stopped");
        StopOutcome::Stopped
    }

    /// Atomically replace the active configuration snapshot. Does not
    /// affect the run state; a tick already in flight keeps the snapshot
    /// it captured.
    pub fn reload(&self, config: HoardConfig) {
        self.control.lock().config = Some(Arc::new(config));
        tracing::info!("hoard configuration reloaded");
    }

    /// The scheduling host, for callers that drive a manual host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

/// One tick: fan out over the participant snapshot and run up to
/// `spawn_limit` spawn cycles per participant per configured world,
/// re-checking the run state before each placement.
fn run_tick<W: WorldQuery>(control: &Control, world: &W, rng: &mut impl Rng) {
    let Some(config) = control.snapshot() else {
        return;
    };

    let participants = world.active_participants();
    if participants.is_empty() {
        tracing::warn!("no participants are online to spawn the hoard");
        return;
    }

    for participant in participants {
        let Some(world_config) = config.resolve(&participant.world) else {
            tracing::warn!(
                world = %participant.world,
                "world is not configured for hoard spawns"
            );
            continue;
        };
        let environment = world.environment(&participant.world);

        for _ in 0..world_config.spawn_limit {
            if !control.is_running() {
                return;
            }
            spawn_cycle(
                world,
                &participant.world,
                environment,
                &world_config,
                participant.position,
                rng,
            );
        }
    }
}

//! The hoard spawner core: a start/stop-able periodic scheduler that, each
//! tick, places randomly chosen entities near every active participant.
//!
//! # Invariants
//! - The timer handle exists iff the scheduler is running; repeated
//!   start/stop requests are no-ops reported as distinct outcomes.
//! - A tick polls the run state before every placement and never places an
//!   entity after observing a stop request.
//! - Safe location search examines at most [`search::MAX_ATTEMPTS`]
//!   candidates per call; exhausting them is an expected outcome.

pub mod cycle;
pub mod host;
pub mod scheduler;
pub mod search;
pub mod snap;

pub use cycle::spawn_cycle;
pub use host::{ManualHost, SchedulingHost, ThreadHost};
pub use scheduler::{Hoard, RunState, StartOutcome, StopOutcome};
pub use search::find_safe_location;
pub use snap::snap_to_ground;

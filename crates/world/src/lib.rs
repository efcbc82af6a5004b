//! World access for the hoard spawner: the [`WorldQuery`] collaborator
//! contract and [`SimWorld`], an in-memory multi-world implementation used
//! by tests and the CLI demo.
//!
//! # Invariants
//! - Queries take `&self`; implementations provide their own interior
//!   mutability so a world can be shared across the scheduler boundary.
//! - Entity tables iterate in a deterministic order.

pub mod query;
pub mod sim;

pub use query::{EntitySnapshot, Participant, WorldQuery};
pub use sim::SimWorld;

//! Bounce simulation module
//!
//! All toy logic lives here. This module must stay free of platform code:
//! - One unit integration step per frame
//! - Seeded RNG only
//! - Stable iteration order (bodies in list order)
//! - Drawing and audio go through injected traits

pub mod body;
pub mod boundary;
pub mod collision;
pub mod field;
pub mod state;
pub mod tick;
pub mod tone;

pub use body::{FieldBody, FieldPolarity, LAUNCH_DIRECTION, MovingBody, TrailPoint};
pub use boundary::{Boundary, Shape};
pub use collision::{
    CollisionResult, boundary_collision, bounce_velocity, reflect_velocity, rotate_velocity,
};
pub use field::{apply_field, field_impulse};
pub use state::{SimPhase, SimState};
pub use tick::{PointerEvent, StepOutcome, TickInput, handle_pointer, step_body, tick};
pub use tone::{Contact, ToneError, ToneRange, contact_frequency, edge_frequency};

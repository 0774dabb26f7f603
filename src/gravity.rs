//! Falling speed accumulator. Grounded and falling are derived each tick from
//! the sensor reading; no separate state is stored beyond one scalar.

use bevy::prelude::*;

/// Downward acceleration applied while airborne, in host units per second
/// squared. Negative: vertical velocity only ever grows more negative.
pub const GRAVITY_ACCEL: f32 = -12.9;

/// Accumulated falling speed. Owned by the control loop for its lifetime and
/// mutated once per tick; reset to exactly zero on ground contact.
#[derive(Resource, Default)]
pub struct VerticalVelocity(pub f32);

/// One integration step.
pub fn integrate(vertical: f32, grounded: bool, dt: f32) -> f32 {
    if grounded {
        0.0
    } else {
        vertical + GRAVITY_ACCEL * dt
    }
}
